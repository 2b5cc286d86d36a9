use nova::intent::predicates::strict_phrases;
use nova::lexicon::{keys, Lexicon, PhraseSet};
use nova::text::fuzzy::{best_command_key, compact, fold, fuzzy_in, match_phrases, strict_in, Cutoffs};

fn impossible_cutoffs() -> Cutoffs {
    Cutoffs {
        normal: 1.0,
        compact: 1.0,
        short_len: 0,
        short_relax: 0.0,
        windows: true,
    }
}

#[test]
fn test_containment_always_matches() {
    let lexicon = Lexicon::builtin().unwrap();
    let cutoffs = impossible_cutoffs();

    for (key, phrases) in lexicon.iter() {
        for phrase in phrases {
            let text = format!("please {} now", phrase.as_str());
            assert!(
                fuzzy_in(&text, &[phrase.as_str()], &cutoffs),
                "{key}: '{}' must match text that contains it",
                phrase.as_str()
            );
        }
    }
}

#[test]
fn test_missing_spaces_match_via_compact_form() {
    let result = match_phrases("please do a pokeball check", &["poke ball"], &Cutoffs::default());
    assert!(result.matched);
    assert_eq!(result.score, Some(1.0));
}

#[test]
fn test_empty_inputs_never_match() {
    let cutoffs = Cutoffs::default();
    assert!(!fuzzy_in("", &["weather", "news"], &cutoffs));
    assert!(!fuzzy_in("   ", &["weather"], &cutoffs));
    assert!(!fuzzy_in("?!", &["weather"], &cutoffs));
    let none: [&str; 0] = [];
    assert!(!fuzzy_in("weather", &none, &cutoffs));
    assert!(!strict_in("", &["weather"]));
}

#[test]
fn test_folding_is_idempotent() {
    let lexicon = Lexicon::builtin().unwrap();
    let samples = ["Météo À Lyon!!", "  what's   the WEATHER? ", "Größe", "मौसम कैसा है?", "¿Qué hora es?"];

    for s in samples {
        assert_eq!(fold(&fold(s)), fold(s), "fold not idempotent for {s:?}");
        assert_eq!(compact(&compact(s)), compact(s));
    }
    for (_, phrases) in lexicon.iter() {
        for phrase in phrases {
            assert_eq!(fold(&fold(phrase.as_str())), fold(phrase.as_str()));
        }
    }
}

#[test]
fn test_strict_is_word_bounded() {
    assert!(strict_in("please lock the screen", &["lock the screen"]));
    assert!(!strict_in("unlock the screens", &["lock the screen"]));
    assert!(!strict_in("shutdowns happen", &["shutdown"]));
    // Symbol-only phrases fall back to plain containment.
    assert!(strict_in("2+2", &["+"]));
}

#[test]
fn test_strict_and_fuzzy_disagree_on_destructive_near_misses() {
    let lexicon = Lexicon::builtin().unwrap();
    let destructive = lexicon.destructive();
    let phrases: Vec<&str> = destructive.iter().map(|p| p.as_str()).collect();
    let cutoffs = Cutoffs::default();

    for near_miss in ["shutdwn", "shut dwn", "lock scren", "log ot", "power of"] {
        assert!(
            !strict_phrases(&destructive, near_miss),
            "strict matcher fired on near miss {near_miss:?}"
        );
        assert!(
            fuzzy_in(near_miss, &phrases, &cutoffs),
            "fixture {near_miss:?} should be close enough for a fuzzy matcher"
        );
    }

    assert!(strict_phrases(&destructive, "shutdown"));
    assert!(strict_phrases(&destructive, "please lock the screen"));
}

#[test]
fn test_typo_inside_sentence_matches_weather() {
    let cutoffs = Cutoffs::default();
    assert!(fuzzy_in("what's the wether today", &["weather"], &cutoffs));

    let result = match_phrases("what's the wether today", &["weather"], &cutoffs);
    assert_eq!(result.phrase.as_deref(), Some("weather"));
    assert!(result.score.unwrap() >= 0.82);
}

#[test]
fn test_short_phrase_does_not_match_similar_words_in_sentence() {
    let cutoffs = Cutoffs::default();
    assert!(!fuzzy_in("i want some grape juice", &["graph"], &cutoffs));
    assert!(!fuzzy_in("the pilot landed", &["plot"], &cutoffs));
    // The whole utterance still gets the relaxed short cutoff.
    assert!(fuzzy_in("grapf", &["graph"], &cutoffs));
}

#[test]
fn test_whole_text_only_ignores_windows() {
    let cutoffs = Cutoffs::default().whole_text_only();
    assert!(!fuzzy_in("what's the wether today", &["weather"], &cutoffs));
    assert!(fuzzy_in("wether", &["weather"], &cutoffs));
}

#[test]
fn test_best_command_key_finds_weather() {
    let lexicon = Lexicon::builtin().unwrap();
    let best = best_command_key("wheather", &lexicon).expect("some suggestion");
    assert_eq!(best.key, keys::GET_WEATHER);
    assert_eq!(best.phrase, "weather");
    assert!(best.score >= 0.86, "score {} too low", best.score);

    let shutdown = PhraseSet::new(["shutdown"]);
    let lone = Lexicon::from_entries([(keys::SHUTDOWN_SYSTEM, shutdown)].into_iter().collect()).unwrap();
    let unrelated = best_command_key("wheather", &lone).expect("scored anyway");
    assert!(unrelated.score < 0.5, "unrelated score {} too high", unrelated.score);
}

#[test]
fn test_best_command_key_is_deterministic() {
    let lexicon = Lexicon::builtin().unwrap();
    let first = best_command_key("opne the notes", &lexicon);
    for _ in 0..10 {
        assert_eq!(best_command_key("opne the notes", &lexicon), first);
    }
    assert_eq!(best_command_key("", &lexicon), None);
}

//! Classify a free-form reply as yes / no / unclear.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::lang::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Unclear,
}

fn yes_words(lang: Lang) -> &'static [&'static str] {
    match lang {
        Lang::En => &[
            "yes", "yeah", "yep", "yup", "ya", "sure", "ok", "okay", "of course", "correct",
            "right", "do it", "go ahead", "affirmative", "please do", "absolutely", "that's right",
        ],
        Lang::Hi => &["हाँ", "हां", "हा", "जी", "जी हाँ", "ठीक है", "सही", "बिल्कुल", "हाँ जी", "करो"],
        Lang::Fr => &["oui", "ouais", "d'accord", "bien sûr", "exactement", "vas-y", "c'est ça", "ok"],
        Lang::Es => &["sí", "si", "claro", "vale", "de acuerdo", "por supuesto", "correcto", "hazlo", "ok"],
        Lang::De => &["ja", "jawohl", "klar", "genau", "natürlich", "richtig", "mach es", "ok", "okay"],
    }
}

fn no_words(lang: Lang) -> &'static [&'static str] {
    match lang {
        Lang::En => &[
            "no", "nope", "nah", "not", "don't", "do not", "cancel", "stop", "negative", "never mind", "wrong",
        ],
        Lang::Hi => &["नहीं", "नही", "ना", "मत करो", "रहने दो", "गलत", "रद्द करो"],
        Lang::Fr => &["non", "annule", "arrête", "jamais", "pas du tout"],
        Lang::Es => &["no", "nunca", "cancela", "de ninguna manera", "incorrecto"],
        Lang::De => &["nein", "nicht", "abbrechen", "stopp", "niemals", "falsch", "auf keinen fall"],
    }
}

/// NFKC, punctuation to spaces, collapsed whitespace, lowercase.
pub fn clean(s: &str) -> String {
    let spaced: String = s
        .nfkc()
        .flat_map(char::to_lowercase)
        .map(|c| {
            if c.is_alphanumeric() || is_combining_mark(c) {
                c
            } else {
                ' '
            }
        })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn contains_word(padded_text: &str, phrase: &str) -> bool {
    let p = clean(phrase);
    !p.is_empty() && padded_text.contains(&format!(" {} ", p))
}

fn vocabularies(lang: Lang) -> Vec<Lang> {
    if lang == Lang::En {
        vec![Lang::En]
    } else {
        vec![lang, Lang::En]
    }
}

/// Classify `reply` using the vocabulary of `lang` plus English.
///
/// An exact vocabulary match wins. Otherwise the reply is scanned for whole
/// words; hits from only one side decide, hits from both are unclear.
pub fn classify(reply: &str, lang: Lang) -> Answer {
    let text = clean(reply);
    if text.is_empty() {
        return Answer::Unclear;
    }

    let langs = vocabularies(lang);
    let exact = |words: fn(Lang) -> &'static [&'static str]| {
        langs.iter().any(|l| words(*l).iter().any(|w| clean(w) == text))
    };
    if exact(yes_words) {
        return Answer::Yes;
    }
    if exact(no_words) {
        return Answer::No;
    }

    let padded = format!(" {} ", text);
    let yes = langs.iter().any(|l| yes_words(*l).iter().any(|w| contains_word(&padded, w)));
    let no = langs.iter().any(|l| no_words(*l).iter().any(|w| contains_word(&padded, w)));
    match (yes, no) {
        (true, false) => Answer::Yes,
        (false, true) => Answer::No,
        _ => Answer::Unclear,
    }
}

/// True when `phrase` is, on its own, a plain affirmation in any supported language.
pub fn is_affirmation(phrase: &str) -> bool {
    let text = clean(phrase);
    !text.is_empty() && Lang::ALL.iter().any(|l| yes_words(*l).iter().any(|w| clean(w) == text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_words() {
        assert_eq!(classify("Yes!", Lang::En), Answer::Yes);
        assert_eq!(classify("nein", Lang::De), Answer::No);
        assert_eq!(classify("हाँ", Lang::Hi), Answer::Yes);
        assert_eq!(classify("d'accord", Lang::Fr), Answer::Yes);
    }

    #[test]
    fn english_fallback_for_other_languages() {
        assert_eq!(classify("yes", Lang::Es), Answer::Yes);
        assert_eq!(classify("no", Lang::Fr), Answer::No);
    }

    #[test]
    fn mixed_or_missing_is_unclear() {
        assert_eq!(classify("yes no", Lang::En), Answer::Unclear);
        assert_eq!(classify("maybe later", Lang::En), Answer::Unclear);
        assert_eq!(classify("   ", Lang::En), Answer::Unclear);
    }

    #[test]
    fn word_boundaries() {
        assert_eq!(classify("yes please go ahead", Lang::En), Answer::Yes);
        // "no" inside "know" is not a refusal
        assert_eq!(classify("i know", Lang::En), Answer::Unclear);
    }

    #[test]
    fn affirmations() {
        assert!(is_affirmation("OK"));
        assert!(is_affirmation("ठीक है"));
        assert!(!is_affirmation("plot it"));
    }
}

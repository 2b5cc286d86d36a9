//! Replays a labelled corpus of utterances through the default route table.
//! Retuning cutoffs or reordering routes should keep this file green.

mod common;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Case {
    utterance: String,
    intent: Option<String>,
}

fn corpus() -> Vec<Case> {
    let raw = include_str!("fixtures/routing_corpus.json");
    serde_json::from_str(raw).expect("corpus fixture is valid json")
}

#[test]
fn test_corpus_routes_as_labelled() {
    let h = common::harness();
    let cases = corpus();
    assert!(cases.len() > 50, "corpus unexpectedly small");

    let misses: Vec<String> = cases
        .iter()
        .filter_map(|case| {
            let got = h.dispatcher.resolve(&case.utterance).map(|k| k.as_str().to_string());
            (got != case.intent).then(|| format!("{:?}: expected {:?}, got {:?}", case.utterance, case.intent, got))
        })
        .collect();

    assert!(misses.is_empty(), "misrouted:\n{}", misses.join("\n"));
}

#[test]
fn test_corpus_covers_every_route() {
    let h = common::harness();
    let cases = corpus();

    for route in h.dispatcher.registry().routes() {
        assert!(
            cases.iter().any(|c| c.intent.as_deref() == Some(route.key.as_str())),
            "no corpus utterance exercises {}",
            route.key
        );
    }
}

#[test]
fn test_case_and_padding_do_not_change_routing() {
    let h = common::harness();

    for case in corpus() {
        let shouted = format!("  {}  ", case.utterance.to_uppercase());
        assert_eq!(
            h.dispatcher.resolve(&shouted),
            h.dispatcher.resolve(&case.utterance),
            "casing changed the route for {:?}",
            case.utterance
        );
    }
}

mod common;

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use nova::error::{FollowupError, OutputError};
use nova::followup::{FollowupEngine, FollowupRequest, PromptDelivery};
use nova::lang::Lang;
use nova::lexicon::keys;
use nova::messages;
use nova::outputs::{Listener, Outputs, Speaker};
use nova::DispatchOutcome;

use common::{RecordingDisplay, RecordingSpeaker, ScriptedListener};

fn engine() -> (FollowupEngine, Arc<RecordingSpeaker>, Arc<RecordingDisplay>) {
    let (outputs, speaker, display) = common::recording_outputs();
    (FollowupEngine::new(outputs, common::quick_config().followup), speaker, display)
}

fn voice_engine(listener: Arc<ScriptedListener>, speaker: Arc<RecordingSpeaker>) -> FollowupEngine {
    let outputs = Outputs::new(speaker, Arc::new(RecordingDisplay::default())).with_listener(listener);
    FollowupEngine::new(outputs, common::quick_config().followup)
}

#[tokio::test]
async fn test_timeout_returns_none_on_time() {
    let (engine, _, _) = engine();
    let timeout = Duration::from_millis(150);

    let started = Instant::now();
    let reply = engine.await_reply(FollowupRequest::new("Which city?", timeout)).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(reply, None);
    assert!(elapsed >= timeout, "returned early after {elapsed:?}");
    assert!(elapsed < timeout + Duration::from_millis(500), "took {elapsed:?}");
}

#[tokio::test]
async fn test_slot_is_free_after_every_exit() {
    let (engine, _, _) = engine();

    // 1. Timeout
    let _ = engine
        .await_reply(FollowupRequest::new("first?", Duration::from_millis(20)))
        .await
        .unwrap();
    assert!(!engine.is_active());

    // 2. Typed answer
    let (reply, _) = tokio::join!(
        engine.await_reply(FollowupRequest::new("second?", Duration::from_secs(5))),
        common::answer_when_asked(&engine, "Paris")
    );
    assert_eq!(reply.unwrap().as_deref(), Some("Paris"));
    assert!(!engine.is_active());

    // 3. Dropped mid-wait
    let waiting = engine.await_reply(FollowupRequest::new("third?", Duration::from_secs(5)));
    let _ = tokio::time::timeout(Duration::from_millis(20), waiting).await;
    assert!(!engine.is_active(), "a dropped wait must release the slot");

    // 4. A new session proceeds
    let reply = engine
        .await_reply(FollowupRequest::new("fourth?", Duration::from_millis(20)))
        .await;
    assert!(matches!(reply, Ok(None)));
}

#[tokio::test]
async fn test_second_request_is_rejected_while_waiting() {
    let (engine, _, _) = engine();
    let first = engine.clone();
    let waiting = tokio::spawn(async move {
        first
            .await_reply(FollowupRequest::new("Which city?", Duration::from_secs(5)))
            .await
    });

    while !engine.is_active() {
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    assert_eq!(engine.active_prompt().as_deref(), Some("Which city?"));

    let second = engine
        .await_reply(FollowupRequest::new("Which language?", Duration::from_secs(5)))
        .await;
    assert!(matches!(second, Err(FollowupError::Busy)));
    assert_eq!(engine.active_prompt().as_deref(), Some("Which city?"), "first session must survive");

    assert!(engine.cancel());
    assert_eq!(waiting.await.unwrap().unwrap(), None);
    assert!(!engine.is_active());
    assert!(!engine.cancel());
}

#[tokio::test]
async fn test_typed_submission_rules() {
    let (engine, _, _) = engine();
    assert!(!engine.submit_typed("nobody is asking"), "no session, nothing to accept");

    let (reply, _) = tokio::join!(engine.await_reply(FollowupRequest::new("Name?", Duration::from_secs(5))), async {
        while !engine.accepts_typed() {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        assert!(!engine.submit_typed("   "), "blank replies are ignored");
        assert!(engine.submit_typed("Asha"));
        assert!(!engine.submit_typed("Second"), "only the first reply counts");
    });
    assert_eq!(reply.unwrap().as_deref(), Some("Asha"));
}

#[tokio::test]
async fn test_voice_reply_interrupts_speech() {
    let speaker = Arc::new(RecordingSpeaker::default());
    let listener = Arc::new(ScriptedListener::new(vec![None, Some("Berlin")], Duration::from_millis(5)));
    let engine = voice_engine(listener.clone(), speaker.clone());

    let reply = engine
        .await_reply(FollowupRequest::new("Which city?", Duration::from_secs(2)).typed(false))
        .await
        .unwrap();

    assert_eq!(reply.as_deref(), Some("Berlin"));
    assert_eq!(listener.calls(), 2, "an empty result is followed by another listen");
    assert!(speaker.stops() >= 2, "speech stopped before listening and on voice onset");
    assert_eq!(speaker.lines(), vec!["Which city?".to_string()]);
}

/// Records speech and interruptions in the order they happen.
#[derive(Default)]
struct TimelineSpeaker {
    events: Mutex<Vec<String>>,
}

impl TimelineSpeaker {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl Speaker for TimelineSpeaker {
    fn speak(&self, text: &str) {
        self.events.lock().unwrap().push(format!("speak:{text}"));
    }

    async fn speak_and_wait(&self, text: &str) {
        self.speak(text);
        tokio::time::sleep(Duration::from_millis(40)).await;
        self.events.lock().unwrap().push(format!("done:{text}"));
    }

    fn stop_speaking(&self) -> Result<(), OutputError> {
        self.events.lock().unwrap().push("stop".to_string());
        Ok(())
    }
}

#[tokio::test]
async fn test_prompt_finishes_before_listening_starts() {
    let speaker = Arc::new(TimelineSpeaker::default());
    let listener = Arc::new(ScriptedListener::new(vec![], Duration::from_millis(5)));
    let outputs = Outputs::new(speaker.clone(), Arc::new(RecordingDisplay::default())).with_listener(listener);
    let engine = FollowupEngine::new(outputs, common::quick_config().followup);

    let reply = engine
        .await_reply(FollowupRequest::new("Which city should I check?", Duration::from_millis(150)).typed(false))
        .await
        .unwrap();

    assert_eq!(reply, None);
    let events = speaker.events();
    assert_eq!(events[..2], ["speak:Which city should I check?", "done:Which city should I check?"]);
    let first_stop = events.iter().position(|e| e == "stop").expect("stopped before listening");
    assert!(first_stop > 1, "prompt cut off: {events:?}");
}

#[tokio::test]
async fn test_stop_speaking_failure_is_ignored() {
    let speaker = Arc::new(RecordingSpeaker::failing_stop());
    let listener = Arc::new(ScriptedListener::new(vec![Some("oui")], Duration::from_millis(5)));
    let engine = voice_engine(listener, speaker.clone());

    let answer = engine
        .confirm_did_you_mean("météo", Lang::Fr, Duration::from_secs(2))
        .await
        .unwrap();

    assert_eq!(answer, Some(true));
    assert!(speaker.stops() >= 1);
    assert_eq!(speaker.lines(), vec!["Vouliez-vous dire « météo » ?".to_string()]);
}

#[tokio::test]
async fn test_not_accepting_without_any_input_path() {
    let (engine, speaker, _) = engine();

    let result = engine
        .await_reply(FollowupRequest::new("Which city?", Duration::from_secs(1)).typed(false))
        .await;

    assert!(matches!(result, Err(FollowupError::NotAccepting)));
    assert!(speaker.lines().is_empty(), "nothing is prompted when no reply can arrive");
}

#[tokio::test]
async fn test_prompt_delivery_modes() {
    let (engine, speaker, display) = engine();

    let show_only = FollowupRequest::new("shown", Duration::from_millis(10)).delivery(PromptDelivery::ShowOnly);
    engine.await_reply(show_only).await.unwrap();
    let silent = FollowupRequest::new("silent", Duration::from_millis(10)).delivery(PromptDelivery::Silent);
    engine.await_reply(silent).await.unwrap();

    assert!(speaker.lines().is_empty());
    assert_eq!(display.shown(), vec![(messages::TITLE.to_string(), "shown".to_string())]);
}

#[tokio::test]
async fn test_yes_no_classification_through_engine() {
    let (engine, _, _) = engine();
    let prompt = messages::did_you_mean("news");

    let (answer, _) = tokio::join!(
        engine.confirm_yes_no(&prompt, Lang::De, Duration::from_secs(2)),
        common::answer_when_asked(&engine, "nein danke")
    );
    assert_eq!(answer.unwrap(), Some(false));

    let (answer, _) = tokio::join!(
        engine.confirm_yes_no(&prompt, Lang::En, Duration::from_secs(2)),
        common::answer_when_asked(&engine, "hmm maybe")
    );
    assert_eq!(answer.unwrap(), None, "unclear answers are not a yes");
}

#[tokio::test(start_paused = true)]
async fn test_weather_without_city_gives_up_after_default_timeout() {
    let h = common::harness_with(nova::NovaConfig::default(), None);

    let started = tokio::time::Instant::now();
    let outcome = h.dispatcher.dispatch("what's the weather").await;

    assert_eq!(outcome, DispatchOutcome::Handled { key: keys::GET_WEATHER });
    assert!(started.elapsed() >= Duration::from_secs(18));
    assert_eq!(
        h.spoken(),
        vec!["Which city should I check?".to_string(), "I couldn't get that.".to_string()]
    );
    assert!(!h.followup().is_active());
}

#[tokio::test]
async fn test_weather_city_from_typed_reply() {
    let h = common::harness();
    let followup = h.followup();

    let (outcome, _) = tokio::join!(
        h.dispatcher.dispatch("what's the weather"),
        common::answer_when_asked(&followup, "Mumbai")
    );

    assert_eq!(outcome, DispatchOutcome::Handled { key: keys::GET_WEATHER });
    assert_eq!(h.last_spoken().as_deref(), Some("Checking the weather in Mumbai."));
}

#[tokio::test]
async fn test_weather_city_from_utterance() {
    let h = common::harness();

    h.dispatcher.dispatch("what's the wether in Paris today").await;

    assert_eq!(h.spoken(), vec!["Checking the weather in Paris.".to_string()]);
}

#[tokio::test]
async fn test_weather_reply_without_a_city_fails_the_handler() {
    let listener: Arc<dyn Listener> = Arc::new(ScriptedListener::new(vec![Some("...")], Duration::from_millis(5)));
    let h = common::harness_with(common::quick_config(), Some(listener));

    let outcome = h.dispatcher.dispatch("what's the weather").await;

    match outcome {
        DispatchOutcome::Failed { key, reason } => {
            assert_eq!(key, keys::GET_WEATHER);
            assert!(reason.contains("city"), "reason {reason:?}");
        }
        other => panic!("expected a missing-city failure, got {other:?}"),
    }
    assert_eq!(h.last_spoken().as_deref(), Some("Sorry, something went wrong while doing that."));
    assert!(!h.followup().is_active());
}

#[tokio::test]
async fn test_weather_reply_is_stripped_of_punctuation() {
    let listener: Arc<dyn Listener> = Arc::new(ScriptedListener::new(vec![Some("Pune.")], Duration::from_millis(5)));
    let h = common::harness_with(common::quick_config(), Some(listener));

    h.dispatcher.dispatch("what's the weather").await;

    assert_eq!(h.last_spoken().as_deref(), Some("Checking the weather in Pune."));
}

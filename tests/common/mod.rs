#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use nova::error::OutputError;
use nova::followup::FollowupEngine;
use nova::handlers::HandlerContext;
use nova::outputs::{BargeIn, Display, Listener, Outputs, Speaker};
use nova::state::AssistantState;
use nova::{Dispatcher, NovaConfig};

/// Captures everything spoken; counts stop-speaking calls.
#[derive(Default)]
pub struct RecordingSpeaker {
    lines: Mutex<Vec<String>>,
    stops: AtomicUsize,
    fail_stop: bool,
}

impl RecordingSpeaker {
    pub fn failing_stop() -> Self {
        Self {
            fail_stop: true,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.lines.lock().unwrap().last().cloned()
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }

    fn stop_speaking(&self) -> Result<(), OutputError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        if self.fail_stop {
            Err(OutputError::Device("speaker gone".into()))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
pub struct RecordingDisplay {
    shown: Mutex<Vec<(String, String)>>,
}

impl RecordingDisplay {
    pub fn shown(&self) -> Vec<(String, String)> {
        self.shown.lock().unwrap().clone()
    }
}

impl Display for RecordingDisplay {
    fn show_message(&self, title: &str, text: &str) {
        self.shown.lock().unwrap().push((title.to_string(), text.to_string()));
    }
}

/// Plays back canned voice results, one per `listen` call, after `delay`.
/// Once the script runs out it hears nothing until the timeout.
pub struct ScriptedListener {
    script: Mutex<VecDeque<Option<String>>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedListener {
    pub fn new(script: Vec<Option<&str>>, delay: Duration) -> Self {
        Self {
            script: Mutex::new(script.into_iter().map(|s| s.map(str::to_string)).collect()),
            delay,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Listener for ScriptedListener {
    async fn listen(&self, timeout: Duration, barge_in: &BargeIn) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(heard) => {
                tokio::time::sleep(self.delay.min(timeout)).await;
                if heard.is_some() {
                    barge_in.speech_started();
                }
                heard
            }
            None => {
                tokio::time::sleep(timeout).await;
                None
            }
        }
    }
}

pub struct Harness {
    pub dispatcher: Dispatcher,
    pub speaker: Arc<RecordingSpeaker>,
    pub display: Arc<RecordingDisplay>,
}

impl Harness {
    pub fn spoken(&self) -> Vec<String> {
        self.speaker.lines()
    }

    pub fn last_spoken(&self) -> Option<String> {
        self.speaker.last()
    }

    pub fn followup(&self) -> FollowupEngine {
        self.dispatcher.followup().clone()
    }

    pub fn state(&self) -> Arc<AssistantState> {
        self.dispatcher.context().state.clone()
    }
}

/// Follow-up timeouts short enough for real-time tests.
pub fn quick_config() -> NovaConfig {
    let mut config = NovaConfig::default();
    config.followup.reply_timeout_ms = 300;
    config.followup.confirm_timeout_ms = 300;
    config.followup.poll_interval_ms = 10;
    config.followup.min_listen_ms = 10;
    config
}

pub fn recording_outputs() -> (Outputs, Arc<RecordingSpeaker>, Arc<RecordingDisplay>) {
    let speaker = Arc::new(RecordingSpeaker::default());
    let display = Arc::new(RecordingDisplay::default());
    (Outputs::new(speaker.clone(), display.clone()), speaker, display)
}

pub fn harness_with(config: NovaConfig, listener: Option<Arc<dyn Listener>>) -> Harness {
    let (mut outputs, speaker, display) = recording_outputs();
    if let Some(listener) = listener {
        outputs = outputs.with_listener(listener);
    }
    let dispatcher = Dispatcher::from_config(config, outputs).expect("default dispatcher builds");
    Harness {
        dispatcher,
        speaker,
        display,
    }
}

pub fn harness() -> Harness {
    harness_with(quick_config(), None)
}

/// A bare handler context over recording outputs, for custom registries.
pub fn context(config: NovaConfig) -> (HandlerContext, Arc<RecordingSpeaker>) {
    let (outputs, speaker, _) = recording_outputs();
    let cx = HandlerContext {
        state: Arc::new(AssistantState::new(config.language)),
        followup: FollowupEngine::new(outputs.clone(), config.followup.clone()),
        outputs,
        config: Arc::new(config),
    };
    (cx, speaker)
}

/// Wait until a follow-up is open, then type `reply` into it.
pub async fn answer_when_asked(followup: &FollowupEngine, reply: &str) {
    for _ in 0..500 {
        if followup.accepts_typed() {
            assert!(followup.submit_typed(reply), "typed reply should be accepted");
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("no follow-up was opened");
}

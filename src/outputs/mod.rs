//! Boundary to the presentation layer: speech out, message boxes, speech in.
//!
//! The router never renders anything itself; it calls these traits. Engines
//! (TTS, STT, GUI) live outside this crate.

pub mod console;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::error::OutputError;

#[async_trait]
pub trait Speaker: Send + Sync {
    /// Fire-and-forget.
    fn speak(&self, text: &str);

    /// Speak and resolve once the line has finished playing.
    ///
    /// Engines without completion reporting keep the default, which returns
    /// as soon as the line is queued.
    async fn speak_and_wait(&self, text: &str) {
        self.speak(text);
    }

    /// Interrupt any in-progress speech.
    fn stop_speaking(&self) -> Result<(), OutputError>;
}

pub trait Display: Send + Sync {
    fn show_message(&self, title: &str, text: &str);
}

#[async_trait]
pub trait Listener: Send + Sync {
    /// Listen for one spoken reply, giving up after `timeout`.
    ///
    /// Implementations call `barge_in.speech_started()` on voice onset. Empty
    /// or unrecognized audio yields `None`.
    async fn listen(&self, timeout: Duration, barge_in: &BargeIn) -> Option<String>;
}

/// Stops speech output when the user starts talking over it. Best effort.
#[derive(Clone)]
pub struct BargeIn {
    speaker: Arc<dyn Speaker>,
}

impl BargeIn {
    pub fn new(speaker: Arc<dyn Speaker>) -> Self {
        Self { speaker }
    }

    pub fn speech_started(&self) {
        if let Err(e) = self.speaker.stop_speaking() {
            tracing::warn!(error = %e, "stop speaking failed; continuing to listen");
        }
    }
}

impl std::fmt::Debug for BargeIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BargeIn").finish_non_exhaustive()
    }
}

/// The set of output/input devices handed to handlers and the follow-up engine.
#[derive(Clone)]
pub struct Outputs {
    pub speaker: Arc<dyn Speaker>,
    pub display: Arc<dyn Display>,
    pub listener: Option<Arc<dyn Listener>>,
}

impl Outputs {
    pub fn new(speaker: Arc<dyn Speaker>, display: Arc<dyn Display>) -> Self {
        Self {
            speaker,
            display,
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn Listener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn barge_in(&self) -> BargeIn {
        BargeIn::new(self.speaker.clone())
    }

    /// Speak, then show the same line.
    pub fn say(&self, title: &str, text: &str) {
        self.speaker.speak(text);
        self.display.show_message(title, text);
    }
}

impl std::fmt::Debug for Outputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outputs")
            .field("listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

use async_trait::async_trait;
use std::sync::Arc;

use super::{Display, Outputs, Speaker};
use crate::error::OutputError;

/// Prints spoken lines to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSpeaker;

#[async_trait]
impl Speaker for ConsoleSpeaker {
    fn speak(&self, text: &str) {
        println!("nova> {}", text);
    }

    fn stop_speaking(&self) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Message boxes become debug log lines; the speaker already printed the text.
#[derive(Debug, Default)]
pub struct ConsoleDisplay;

impl Display for ConsoleDisplay {
    fn show_message(&self, title: &str, text: &str) {
        tracing::debug!(title, text, "show message");
    }
}

/// Console speaker + display, no voice input.
pub fn outputs() -> Outputs {
    Outputs::new(Arc::new(ConsoleSpeaker), Arc::new(ConsoleDisplay))
}

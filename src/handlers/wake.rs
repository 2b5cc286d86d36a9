use async_trait::async_trait;

use super::{Handler, HandlerContext, HandlerOutcome};
use crate::error::HandlerError;
use crate::messages;

#[derive(Debug, Clone, Copy)]
pub struct WakeModeHandler {
    on: bool,
}

impl WakeModeHandler {
    pub fn new(on: bool) -> Self {
        Self { on }
    }
}

#[async_trait]
impl Handler for WakeModeHandler {
    async fn handle(&self, cx: &HandlerContext, _utterance: &str) -> Result<HandlerOutcome, HandlerError> {
        cx.state.set_wake_mode(self.on);
        tracing::info!(on = self.on, "wake mode");
        cx.say(&if self.on { messages::wake_on() } else { messages::wake_off() });
        Ok(HandlerOutcome::Done)
    }
}

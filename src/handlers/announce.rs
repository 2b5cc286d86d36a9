use async_trait::async_trait;

use super::{Handler, HandlerContext, HandlerOutcome};
use crate::error::HandlerError;
use crate::lexicon::IntentKey;
use crate::messages;

/// Acknowledges the routed intent. Stands in for actions that live outside the router
/// (system calls, web, solvers).
#[derive(Debug, Clone)]
pub struct Announce {
    key: IntentKey,
}

impl Announce {
    pub fn new(key: IntentKey) -> Self {
        Self { key }
    }
}

#[async_trait]
impl Handler for Announce {
    async fn handle(&self, cx: &HandlerContext, _utterance: &str) -> Result<HandlerOutcome, HandlerError> {
        tracing::debug!(intent = %self.key, "announce");
        cx.say(&messages::acknowledged(self.key.as_str()));
        Ok(HandlerOutcome::Done)
    }
}

//! What runs once the router has picked an intent.
//!
//! Handlers own every side effect. Expected failures come back as
//! `HandlerError`; the dispatcher contains both errors and panics.

pub mod announce;
pub mod language;
pub mod physics;
pub mod wake;
pub mod weather;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::NovaConfig;
use crate::error::HandlerError;
use crate::followup::FollowupEngine;
use crate::intent::registry::RegistryBuilder;
use crate::lang::{Lang, Localized};
use crate::lexicon::keys;
use crate::messages;
use crate::outputs::Outputs;
use crate::state::AssistantState;

pub use announce::Announce;
pub use language::ChangeLanguageHandler;
pub use physics::{GraphFollowupHandler, PhysicsHandler};
pub use wake::WakeModeHandler;
pub use weather::WeatherHandler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    Done,
    /// Matched, but this handler can't act on it; the scan continues.
    NotApplicable,
}

/// Everything a handler may touch.
#[derive(Clone, Debug)]
pub struct HandlerContext {
    pub state: Arc<AssistantState>,
    pub outputs: Outputs,
    pub followup: FollowupEngine,
    pub config: Arc<NovaConfig>,
}

impl HandlerContext {
    pub fn lang(&self) -> Lang {
        self.state.lang()
    }

    /// Speak then show one localized line in the current language.
    pub fn say(&self, line: &Localized) {
        self.outputs.say(messages::TITLE, line.pick(self.lang()));
    }
}

#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, cx: &HandlerContext, utterance: &str) -> Result<HandlerOutcome, HandlerError>;
}

/// Adapts a plain closure into a [`Handler`].
pub struct FnHandler<F>(pub F);

#[async_trait]
impl<F> Handler for FnHandler<F>
where
    F: Fn(&HandlerContext, &str) -> Result<HandlerOutcome, HandlerError> + Send + Sync,
{
    async fn handle(&self, cx: &HandlerContext, utterance: &str) -> Result<HandlerOutcome, HandlerError> {
        (self.0)(cx, utterance)
    }
}

/// Register the built-in handlers; every other route gets its own [`Announce`].
pub fn install_builtin(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .handler(keys::WAKE_ON, Arc::new(WakeModeHandler::new(true)))
        .handler(keys::WAKE_OFF, Arc::new(WakeModeHandler::new(false)))
        .handler(keys::CHANGE_LANGUAGE, Arc::new(ChangeLanguageHandler))
        .handler(keys::GET_WEATHER, Arc::new(WeatherHandler))
        .handler(keys::PHYSICS_QUERY, Arc::new(PhysicsHandler))
        .handler(keys::PHYSICS_GRAPH_CONFIRM, Arc::new(GraphFollowupHandler))
        .fallback_handler(|key| -> Arc<dyn Handler> { Arc::new(Announce::new(key.clone())) })
}

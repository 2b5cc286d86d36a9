use async_trait::async_trait;
use tracing::info;

use super::{Handler, HandlerContext, HandlerOutcome};
use crate::error::HandlerError;
use crate::messages;

/// Records physics equations so a later "plot it" has something to draw.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhysicsHandler;

#[async_trait]
impl Handler for PhysicsHandler {
    async fn handle(&self, cx: &HandlerContext, utterance: &str) -> Result<HandlerOutcome, HandlerError> {
        let text = utterance.trim();
        if text.contains('=') {
            info!(equation = text, "physics equation recorded");
            cx.state.set_last_equation(text);
        }
        cx.say(&messages::physics_noted());
        Ok(HandlerOutcome::Done)
    }
}

/// Short confirmations ("plot it", "yes") after a physics answer.
///
/// The remembered equation is plotted once. Without one it declines, so the
/// utterance keeps scanning toward the general plot route.
#[derive(Debug, Default, Clone, Copy)]
pub struct GraphFollowupHandler;

#[async_trait]
impl Handler for GraphFollowupHandler {
    async fn handle(&self, cx: &HandlerContext, _utterance: &str) -> Result<HandlerOutcome, HandlerError> {
        let Some(equation) = cx.state.last_equation() else {
            return Ok(HandlerOutcome::NotApplicable);
        };
        cx.state.clear_last_equation();
        cx.say(&messages::plotting_last_equation(&equation));
        Ok(HandlerOutcome::Done)
    }
}

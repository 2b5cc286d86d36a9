use async_trait::async_trait;
use tracing::info;

use super::{Handler, HandlerContext, HandlerOutcome};
use crate::error::HandlerError;
use crate::followup::FollowupRequest;
use crate::lang::Lang;
use crate::messages;

const GUESS_THRESHOLD: f64 = 0.72;

/// Switches the UI language; asks which one when the request names none.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChangeLanguageHandler;

#[async_trait]
impl Handler for ChangeLanguageHandler {
    async fn handle(&self, cx: &HandlerContext, utterance: &str) -> Result<HandlerOutcome, HandlerError> {
        let target = match Lang::guess(utterance, GUESS_THRESHOLD) {
            Some(lang) => Some(lang),
            None => {
                let req = FollowupRequest::new(
                    messages::which_language().pick(cx.lang()),
                    cx.followup.config().reply_timeout(),
                );
                cx.followup
                    .await_reply(req)
                    .await?
                    .and_then(|reply| Lang::guess(&reply, GUESS_THRESHOLD))
            }
        };

        let Some(target) = target else {
            cx.say(&messages::no_reply());
            return Ok(HandlerOutcome::Done);
        };

        if target == cx.lang() {
            cx.say(&messages::language_already(target));
            return Ok(HandlerOutcome::Done);
        }

        cx.state.set_lang(target);
        info!(lang = %target, "language changed");
        cx.say(&messages::language_changed(target));
        Ok(HandlerOutcome::Done)
    }
}

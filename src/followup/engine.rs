use std::future::pending;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{sleep, sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use super::session::{lock, ActiveSession, SessionGuard, Slot};
use crate::config::FollowupConfig;
use crate::error::FollowupError;
use crate::lang::{Lang, Localized};
use crate::messages;
use crate::outputs::Outputs;
use crate::text::yesno::{self, Answer};

/// How the engine presents the prompt before waiting.
///
/// Callers that already spoke or showed the prompt themselves pick `ShowOnly`
/// or `Silent` so the user hears it exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptDelivery {
    #[default]
    SpeakThenShow,
    ShowOnly,
    Silent,
}

#[derive(Debug, Clone)]
pub struct FollowupRequest {
    pub prompt: String,
    pub allow_typed: bool,
    pub allow_voice: bool,
    pub timeout: Duration,
    pub delivery: PromptDelivery,
}

impl FollowupRequest {
    /// Typed and voice replies accepted, prompt spoken then shown.
    pub fn new(prompt: impl Into<String>, timeout: Duration) -> Self {
        Self {
            prompt: prompt.into(),
            allow_typed: true,
            allow_voice: true,
            timeout,
            delivery: PromptDelivery::SpeakThenShow,
        }
    }

    pub fn typed(mut self, allow: bool) -> Self {
        self.allow_typed = allow;
        self
    }

    pub fn voice(mut self, allow: bool) -> Self {
        self.allow_voice = allow;
        self
    }

    pub fn delivery(mut self, delivery: PromptDelivery) -> Self {
        self.delivery = delivery;
        self
    }
}

#[derive(Debug)]
enum Ended {
    Typed(String),
    Voice(String),
    TimedOut,
    Cancelled,
}

/// Single-slot clarification engine. Cheap to clone; clones share the slot.
#[derive(Clone)]
pub struct FollowupEngine {
    slot: Slot,
    outputs: Outputs,
    config: FollowupConfig,
}

impl FollowupEngine {
    pub fn new(outputs: Outputs, config: FollowupConfig) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            outputs,
            config,
        }
    }

    pub fn config(&self) -> &FollowupConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        lock(&self.slot).is_some()
    }

    pub fn active_prompt(&self) -> Option<String> {
        lock(&self.slot).as_ref().map(|s| s.prompt.clone())
    }

    /// True while a session is waiting and still takes a typed reply.
    pub fn accepts_typed(&self) -> bool {
        lock(&self.slot)
            .as_ref()
            .map_or(false, |s| s.allow_typed && s.reply_tx.is_some())
    }

    /// Deliver a typed reply to the waiting session.
    ///
    /// Returns false when nothing is waiting, typed replies are not allowed,
    /// a reply was already delivered, or `text` is blank.
    pub fn submit_typed(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let mut active = lock(&self.slot);
        let Some(session) = active.as_mut() else {
            return false;
        };
        if !session.allow_typed {
            return false;
        }
        match session.reply_tx.take() {
            Some(tx) => tx.send(text.to_string()).is_ok(),
            None => false,
        }
    }

    /// End the active session early; its waiting call returns `None`.
    pub fn cancel(&self) -> bool {
        match lock(&self.slot).as_ref() {
            Some(session) => {
                session.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Prompt once, then wait for the first typed or spoken reply.
    ///
    /// Returns `Ok(None)` on timeout or cancellation. Fails fast with
    /// [`FollowupError::Busy`] if another session is already waiting.
    pub async fn await_reply(&self, req: FollowupRequest) -> Result<Option<String>, FollowupError> {
        let listener = if req.allow_voice {
            self.outputs.listener.clone()
        } else {
            None
        };
        if !req.allow_typed && listener.is_none() {
            return Err(FollowupError::NotAccepting);
        }

        let (tx, rx) = oneshot::channel::<String>();
        let cancel = CancellationToken::new();
        let id = Uuid::new_v4();
        {
            let mut active = lock(&self.slot);
            if active.is_some() {
                return Err(FollowupError::Busy);
            }
            *active = Some(ActiveSession {
                id,
                prompt: req.prompt.clone(),
                allow_typed: req.allow_typed,
                reply_tx: req.allow_typed.then_some(tx),
                cancel: cancel.clone(),
            });
        }
        let _guard = SessionGuard::new(self.slot.clone(), id);

        info!(
            session = %id,
            typed = req.allow_typed,
            voice = listener.is_some(),
            timeout_ms = req.timeout.as_millis() as u64,
            "follow-up started"
        );
        self.deliver(&req.prompt, req.delivery).await;

        let deadline = Instant::now() + req.timeout;

        let typed = async move {
            match rx.await {
                Ok(text) => text,
                // Sender dropped without a reply (typed not allowed): never resolves.
                Err(_) => pending::<String>().await,
            }
        };

        let poll = self.config.poll_interval();
        let min_listen = self.config.min_listen();
        let barge_in = self.outputs.barge_in();
        let voice = async move {
            let Some(listener) = listener else {
                return pending::<String>().await;
            };
            barge_in.speech_started();
            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return pending::<String>().await;
                }
                match listener.listen(remaining.max(min_listen), &barge_in).await {
                    Some(text) if !text.trim().is_empty() => return text,
                    _ => {
                        debug!(session = %id, "no speech; listening again");
                        sleep(poll).await;
                    }
                }
            }
        };

        let ended = tokio::select! {
            text = typed => Ended::Typed(text),
            text = voice => Ended::Voice(text),
            _ = sleep_until(deadline) => Ended::TimedOut,
            _ = cancel.cancelled() => Ended::Cancelled,
        };

        match ended {
            Ended::Typed(text) => {
                info!(session = %id, source = "typed", "follow-up answered");
                Ok(Some(text))
            }
            Ended::Voice(text) => {
                info!(session = %id, source = "voice", "follow-up answered");
                Ok(Some(text))
            }
            Ended::TimedOut => {
                info!(session = %id, "follow-up timed out");
                Ok(None)
            }
            Ended::Cancelled => {
                info!(session = %id, "follow-up cancelled");
                Ok(None)
            }
        }
    }

    /// Ask a yes/no question. `None` on timeout or an unclear answer.
    pub async fn confirm_yes_no(
        &self,
        prompt: &Localized,
        lang: Lang,
        timeout: Duration,
    ) -> Result<Option<bool>, FollowupError> {
        let reply = self.await_reply(FollowupRequest::new(prompt.pick(lang), timeout)).await?;
        let Some(reply) = reply else {
            return Ok(None);
        };
        let answer = yesno::classify(&reply, lang);
        debug!(?answer, "yes/no classified");
        Ok(match answer {
            Answer::Yes => Some(true),
            Answer::No => Some(false),
            Answer::Unclear => None,
        })
    }

    /// "Did you mean '{candidate}'?"
    pub async fn confirm_did_you_mean(
        &self,
        candidate: &str,
        lang: Lang,
        timeout: Duration,
    ) -> Result<Option<bool>, FollowupError> {
        self.confirm_yes_no(&messages::did_you_mean(candidate), lang, timeout)
            .await
    }

    /// The prompt is heard in full before the microphone opens.
    async fn deliver(&self, prompt: &str, delivery: PromptDelivery) {
        match delivery {
            PromptDelivery::SpeakThenShow => {
                self.outputs.speaker.speak_and_wait(prompt).await;
                self.outputs.display.show_message(messages::TITLE, prompt);
            }
            PromptDelivery::ShowOnly => self.outputs.display.show_message(messages::TITLE, prompt),
            PromptDelivery::Silent => {}
        }
    }
}

impl std::fmt::Debug for FollowupEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FollowupEngine")
            .field("active", &self.is_active())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

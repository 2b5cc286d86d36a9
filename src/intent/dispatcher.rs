use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::registry::{Registry, Route};
use crate::config::NovaConfig;
use crate::error::SetupError;
use crate::followup::FollowupEngine;
use crate::handlers::{self, HandlerContext, HandlerOutcome};
use crate::lexicon::{is_destructive, is_free_text, IntentKey, Lexicon};
use crate::messages;
use crate::outputs::Outputs;
use crate::state::AssistantState;
use crate::text::fuzzy::{best_command_key, Cutoffs};
use crate::text::Normalizer;

static CHAIN_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+(?:and|और|et|y|und)\s+").expect("valid chain regex"));

/// How a "did you mean" suggestion was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionResolution {
    /// Close enough to run without asking.
    Direct,
    Confirmed,
    Declined,
    NoAnswer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Blank input.
    Ignored,
    Handled {
        key: IntentKey,
    },
    Failed {
        key: IntentKey,
        reason: String,
    },
    Suggested {
        key: IntentKey,
        phrase: String,
        score: f64,
        resolution: SuggestionResolution,
    },
    Unrecognized,
    Chained(Vec<DispatchOutcome>),
}

impl DispatchOutcome {
    /// The intent whose handler ran to completion, if any.
    pub fn handled_key(&self) -> Option<&IntentKey> {
        match self {
            DispatchOutcome::Handled { key } => Some(key),
            DispatchOutcome::Suggested {
                key,
                resolution: SuggestionResolution::Direct | SuggestionResolution::Confirmed,
                ..
            } => Some(key),
            _ => None,
        }
    }
}

enum Invocation {
    Done,
    NotApplicable,
    Failed(String),
}

/// Routes one utterance to at most one handler (per chained part).
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    cx: HandlerContext,
    normalizer: Option<Normalizer>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>, cx: HandlerContext) -> Self {
        let normalizer = cx
            .config
            .dispatch
            .normalize_hinglish
            .then(|| Normalizer::hinglish().clone());
        Self {
            registry,
            cx,
            normalizer,
        }
    }

    /// Wire the lexicon, built-in handlers and follow-up engine from one config.
    pub fn from_config(config: NovaConfig, outputs: Outputs) -> Result<Self, SetupError> {
        let lexicon = match &config.lexicon_path {
            Some(path) => Lexicon::load(path)?,
            None => Lexicon::builtin()?,
        };
        let cutoffs = Cutoffs::from(&config.matching);
        let registry = handlers::install_builtin(Registry::builder(Arc::new(lexicon), cutoffs)).build()?;

        let cx = HandlerContext {
            state: Arc::new(AssistantState::new(config.language)),
            followup: FollowupEngine::new(outputs.clone(), config.followup.clone()),
            outputs,
            config: Arc::new(config),
        };
        Ok(Self::new(Arc::new(registry), cx))
    }

    /// Swap the normalizer (None disables normalization).
    pub fn with_normalizer(mut self, normalizer: Option<Normalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn context(&self) -> &HandlerContext {
        &self.cx
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn followup(&self) -> &FollowupEngine {
        &self.cx.followup
    }

    /// Lowercased utterance, plus its normalized form when that differs.
    fn forms(&self, text: &str) -> Vec<String> {
        let lower = text.trim().to_lowercase();
        let mut forms = vec![lower];
        if let Some(normalizer) = &self.normalizer {
            let normalized = normalizer.normalize(&forms[0]);
            if normalized != forms[0] {
                forms.push(normalized);
            }
        }
        forms
    }

    /// Which intent a full scan would try first, without running anything.
    pub fn resolve(&self, text: &str) -> Option<IntentKey> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.registry
            .first_match(&self.forms(text))
            .map(|route| route.key.clone())
    }

    /// Split "A and B" into parts, but only when every part routes on its own
    /// and no part before the last is a free-text intent that would lose its tail.
    fn split_chain(&self, text: &str) -> Option<Vec<String>> {
        let parts: Vec<String> = CHAIN_SPLIT
            .split(text)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() < 2 {
            return None;
        }
        let keys = parts.iter().map(|p| self.resolve(p)).collect::<Option<Vec<_>>>()?;
        if keys[..keys.len() - 1].iter().any(is_free_text) {
            debug!(first = %keys[0], "not splitting inside free text");
            return None;
        }
        Some(parts)
    }

    pub async fn dispatch(&self, utterance: &str) -> DispatchOutcome {
        let text = utterance.trim();
        if text.is_empty() {
            return DispatchOutcome::Ignored;
        }

        if self.cx.config.dispatch.chaining {
            if let Some(parts) = self.split_chain(text) {
                info!(parts = parts.len(), "chained command");
                let mut outcomes = Vec::with_capacity(parts.len());
                for part in &parts {
                    outcomes.push(self.dispatch_one(part).await);
                }
                return DispatchOutcome::Chained(outcomes);
            }
        }

        self.dispatch_one(text).await
    }

    async fn dispatch_one(&self, text: &str) -> DispatchOutcome {
        let forms = self.forms(text);
        let mut declined: Vec<IntentKey> = Vec::new();

        for route in self.registry.routes() {
            if !route.matches(&forms) {
                continue;
            }
            debug!(intent = %route.key, kind = ?route.matcher.kind(), "route matched");
            match self.invoke(route, text).await {
                Invocation::Done => return DispatchOutcome::Handled { key: route.key.clone() },
                Invocation::NotApplicable => declined.push(route.key.clone()),
                Invocation::Failed(reason) => {
                    return DispatchOutcome::Failed {
                        key: route.key.clone(),
                        reason,
                    }
                }
            }
        }

        self.suggest(text, &declined).await
    }

    /// Run a handler on its own task so a panic stays contained.
    async fn invoke(&self, route: &Route, text: &str) -> Invocation {
        let handler = route.handler.clone();
        let cx = self.cx.clone();
        let utterance = text.to_string();
        let joined = tokio::spawn(async move { handler.handle(&cx, &utterance).await }).await;

        match joined {
            Ok(Ok(HandlerOutcome::Done)) => {
                info!(intent = %route.key, "handled");
                Invocation::Done
            }
            Ok(Ok(HandlerOutcome::NotApplicable)) => {
                debug!(intent = %route.key, "handler declined; continuing scan");
                Invocation::NotApplicable
            }
            Ok(Err(e)) => {
                error!(intent = %route.key, error = %e, "handler failed");
                self.cx.say(&messages::handler_failed());
                Invocation::Failed(e.to_string())
            }
            Err(join) => {
                let reason = if join.is_panic() {
                    "handler panicked"
                } else {
                    "handler task cancelled"
                };
                error!(intent = %route.key, reason, "handler aborted");
                self.cx.say(&messages::handler_failed());
                Invocation::Failed(reason.to_string())
            }
        }
    }

    async fn suggest(&self, text: &str, declined: &[IntentKey]) -> DispatchOutcome {
        let cfg = &self.cx.config.suggest;
        if !cfg.enabled {
            return self.unrecognized(text);
        }
        let Some(best) = best_command_key(text, self.registry.lexicon()) else {
            return self.unrecognized(text);
        };
        debug!(intent = %best.key, phrase = %best.phrase, score = best.score, "closest phrase");

        if best.score < cfg.confirm_cutoff || declined.contains(&best.key) {
            return self.unrecognized(text);
        }
        let Some(route) = self.registry.route(&best.key) else {
            return self.unrecognized(text);
        };

        let resolution = if !is_destructive(&best.key) && best.score >= cfg.direct_cutoff {
            SuggestionResolution::Direct
        } else {
            let lang = self.cx.lang();
            let timeout = self.cx.followup.config().confirm_timeout();
            match self.cx.followup.confirm_did_you_mean(&best.phrase, lang, timeout).await {
                Ok(Some(true)) => SuggestionResolution::Confirmed,
                Ok(Some(false)) => {
                    self.cx.say(&messages::cancelled());
                    SuggestionResolution::Declined
                }
                Ok(None) => {
                    self.cx.say(&messages::no_reply());
                    SuggestionResolution::NoAnswer
                }
                Err(e) => {
                    warn!(error = %e, "could not ask for confirmation");
                    return self.unrecognized(text);
                }
            }
        };

        if matches!(resolution, SuggestionResolution::Direct | SuggestionResolution::Confirmed) {
            match self.invoke(route, text).await {
                Invocation::Done => {}
                Invocation::NotApplicable => return self.unrecognized(text),
                Invocation::Failed(reason) => {
                    return DispatchOutcome::Failed {
                        key: best.key,
                        reason,
                    }
                }
            }
        }

        info!(intent = %best.key, score = best.score, ?resolution, "suggestion resolved");
        DispatchOutcome::Suggested {
            key: best.key,
            phrase: best.phrase,
            score: best.score,
            resolution,
        }
    }

    fn unrecognized(&self, text: &str) -> DispatchOutcome {
        info!(chars = text.chars().count(), "no intent matched");
        self.cx.say(&messages::not_understood());
        DispatchOutcome::Unrecognized
    }
}

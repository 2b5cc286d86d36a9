use std::path::PathBuf;
use thiserror::Error;

use crate::lexicon::IntentKey;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("lexicon is not a valid intent -> phrases object: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("lexicon contains an empty intent key")]
    EmptyKey,
    #[error("intent `{key}` has an empty trigger phrase at position {index}")]
    EmptyPhrase { key: IntentKey, index: usize },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("route `{0}` has no handler registered")]
    MissingHandler(IntentKey),
    #[error("route `{0}` expects phrases but the lexicon has no such intent")]
    UnknownIntent(IntentKey),
    #[error("handler for `{0}` registered twice")]
    DuplicateHandler(IntentKey),
}

#[derive(Debug, Error)]
pub enum FollowupError {
    /// Only one clarification may be outstanding; a second request is rejected.
    #[error("a follow-up is already waiting for a reply")]
    Busy,
    #[error("follow-up accepts neither typed nor voice replies")]
    NotAccepting,
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("handler failed: {0}")]
    Failed(String),
    #[error("could not obtain required slot `{0}`")]
    MissingSlot(&'static str),
    #[error(transparent)]
    Followup(#[from] FollowupError),
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output device error: {0}")]
    Device(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown language code `{0}`")]
    UnknownLanguage(String),
}

/// Anything that can stop a dispatcher from being assembled.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

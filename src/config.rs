use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::lang::Lang;

pub const CONFIG_ENV: &str = "NOVA_CONFIG";
pub const LANG_ENV: &str = "NOVA_LANG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NovaConfig {
    pub language: Lang,
    pub matching: MatchConfig,
    pub suggest: SuggestConfig,
    pub followup: FollowupConfig,
    pub dispatch: DispatchConfig,
    /// Replaces the built-in lexicon when set.
    pub lexicon_path: Option<PathBuf>,
}

/// Fuzzy cutoffs. Tuned against `tests/fixtures/routing_corpus.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub cutoff: f64,
    pub compact_cutoff: f64,
    pub short_len: usize,
    pub short_relax: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            cutoff: 0.82,
            compact_cutoff: 0.90,
            short_len: 10,
            short_relax: 0.06,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    pub enabled: bool,
    /// At or above: run the suggested (non-destructive) intent without asking.
    pub direct_cutoff: f64,
    /// At or above: ask "did you mean ...?" first.
    pub confirm_cutoff: f64,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            direct_cutoff: 0.86,
            confirm_cutoff: 0.70,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowupConfig {
    pub reply_timeout_ms: u64,
    pub confirm_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub min_listen_ms: u64,
}

impl Default for FollowupConfig {
    fn default() -> Self {
        Self {
            reply_timeout_ms: 18_000,
            confirm_timeout_ms: 12_000,
            poll_interval_ms: 200,
            min_listen_ms: 500,
        }
    }
}

impl FollowupConfig {
    pub fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.reply_timeout_ms)
    }

    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_millis(self.confirm_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn min_listen(&self) -> Duration {
        Duration::from_millis(self.min_listen_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub chaining: bool,
    pub normalize_hinglish: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            chaining: true,
            normalize_hinglish: true,
        }
    }
}

impl NovaConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Resolve the effective config: explicit path, else `NOVA_CONFIG`, else defaults;
    /// then `NOVA_LANG` overrides the language.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading config");
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        if let Ok(code) = std::env::var(LANG_ENV) {
            if !code.trim().is_empty() {
                config.language = code.parse()?;
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = NovaConfig::from_json_str(r#"{"language": "hi", "suggest": {"enabled": false}}"#).unwrap();
        assert_eq!(cfg.language, Lang::Hi);
        assert!(!cfg.suggest.enabled);
        assert_eq!(cfg.suggest.direct_cutoff, 0.86);
        assert_eq!(cfg.followup.reply_timeout(), Duration::from_secs(18));
        assert_eq!(cfg.matching, MatchConfig::default());
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(NovaConfig::from_json_str(r#"{"language": "xx"}"#).is_err());
    }
}

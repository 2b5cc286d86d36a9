//! Intent keys and their trigger phrases.
//!
//! The lexicon is loaded once at startup (built-in JSON or a file named in the
//! config) and never mutated afterwards; share it behind an `Arc`.

pub mod keys;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::LexiconError;

const BUILTIN: &str = include_str!("../../config/lexicon.json");

/// Names a category of user request. Handlers are wired to these by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentKey(Cow<'static, str>);

impl IntentKey {
    pub const fn from_static(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }

    pub fn new(key: impl Into<String>) -> Self {
        Self(Cow::Owned(key.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IntentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IntentKey {
    fn from(s: &str) -> Self {
        IntentKey::new(s)
    }
}

/// One wording of an intent in one language. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerPhrase(String);

impl TriggerPhrase {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TriggerPhrase {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhraseSet(Vec<TriggerPhrase>);

impl PhraseSet {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(phrases.into_iter().map(|p| TriggerPhrase(p.into())).collect())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TriggerPhrase> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[TriggerPhrase] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn extend_unique(&mut self, other: &PhraseSet) {
        for phrase in other.iter() {
            if !self.0.contains(phrase) {
                self.0.push(phrase.clone());
            }
        }
    }
}

impl<'a> IntoIterator for &'a PhraseSet {
    type Item = &'a TriggerPhrase;
    type IntoIter = std::slice::Iter<'a, TriggerPhrase>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Intent key -> trigger phrases, iterated in key order.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: BTreeMap<IntentKey, PhraseSet>,
}

impl Lexicon {
    /// The lexicon compiled into the binary.
    pub fn builtin() -> Result<Self, LexiconError> {
        Self::from_json_str(BUILTIN)
    }

    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), intents = lexicon.len(), "lexicon loaded");
        Ok(lexicon)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, LexiconError> {
        let entries: BTreeMap<IntentKey, PhraseSet> = serde_json::from_str(raw)?;
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: BTreeMap<IntentKey, PhraseSet>) -> Result<Self, LexiconError> {
        for (key, phrases) in &entries {
            if key.as_str().trim().is_empty() {
                return Err(LexiconError::EmptyKey);
            }
            if let Some(index) = phrases.iter().position(|p| p.as_str().trim().is_empty()) {
                return Err(LexiconError::EmptyPhrase {
                    key: key.clone(),
                    index,
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn phrases(&self, key: &IntentKey) -> Option<&PhraseSet> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &IntentKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IntentKey, &PhraseSet)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Phrases of several intents merged, first occurrence kept. Unknown keys contribute nothing.
    pub fn union(&self, keys: &[IntentKey]) -> PhraseSet {
        let mut out = PhraseSet::default();
        for key in keys {
            if let Some(phrases) = self.entries.get(key) {
                out.extend_unique(phrases);
            }
        }
        out
    }

    /// Every phrase that may trigger an irreversible system action.
    pub fn destructive(&self) -> PhraseSet {
        self.union(&keys::DESTRUCTIVE)
    }
}

pub fn is_destructive(key: &IntentKey) -> bool {
    keys::DESTRUCTIVE.contains(key)
}

pub fn is_free_text(key: &IntentKey) -> bool {
    keys::FREE_TEXT.contains(key)
}

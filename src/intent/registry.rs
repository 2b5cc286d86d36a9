//! The ordered route table: which intents are checked, in which order, with
//! which matcher, and which handler runs when one wins.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use super::predicates;
use crate::error::RegistryError;
use crate::handlers::Handler;
use crate::lexicon::{keys, IntentKey, Lexicon, PhraseSet};
use crate::text::fuzzy::{fuzzy_in, Cutoffs};

/// Custom test for one utterance form.
pub type HeuristicFn = fn(&PhraseSet, &Cutoffs, &str) -> bool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Strict,
    Fuzzy,
    Heuristic,
}

#[derive(Clone, Copy)]
pub enum RouteKind {
    Strict,
    Fuzzy,
    Heuristic(HeuristicFn),
}

impl fmt::Debug for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteKind::Strict => f.write_str("Strict"),
            RouteKind::Fuzzy => f.write_str("Fuzzy"),
            RouteKind::Heuristic(_) => f.write_str("Heuristic"),
        }
    }
}

/// One row of the route table, before phrases and handlers are attached.
#[derive(Debug, Clone)]
pub struct RouteSpec {
    pub key: IntentKey,
    pub kind: RouteKind,
}

const fn strict(key: IntentKey) -> RouteSpec {
    RouteSpec { key, kind: RouteKind::Strict }
}

const fn fuzzy(key: IntentKey) -> RouteSpec {
    RouteSpec { key, kind: RouteKind::Fuzzy }
}

const fn heuristic(key: IntentKey, test: HeuristicFn) -> RouteSpec {
    RouteSpec {
        key,
        kind: RouteKind::Heuristic(test),
    }
}

/// Priority order. Earlier routes shadow later ones, so specific and
/// destructive intents come before broad catch-alls.
pub const ROUTE_TABLE: &[RouteSpec] = &[
    strict(keys::WAKE_ON),
    strict(keys::WAKE_OFF),
    strict(keys::SHUTDOWN_SYSTEM),
    strict(keys::RESTART_SYSTEM),
    strict(keys::SLEEP_SYSTEM),
    strict(keys::LOCK_SYSTEM),
    strict(keys::LOGOUT_SYSTEM),
    strict(keys::EXIT_APP),
    fuzzy(keys::ADJUST_VOLUME),
    fuzzy(keys::ADJUST_BRIGHTNESS),
    heuristic(keys::CHANGE_LANGUAGE, predicates::change_language),
    // "मेरा नाम क्या है" contains the remember trigger "मेरा नाम".
    strict(keys::RECALL_NAME),
    strict(keys::REMEMBER_NAME),
    strict(keys::STORE_PREFERENCE),
    strict(keys::UPDATE_MEMORY),
    strict(keys::CLEAR_MEMORY),
    fuzzy(keys::SAVE_NOTE),
    fuzzy(keys::READ_NOTES),
    fuzzy(keys::SEARCH_NOTES),
    fuzzy(keys::UPDATE_NOTE),
    fuzzy(keys::DELETE_NOTE),
    fuzzy(keys::SET_ALARM),
    fuzzy(keys::SET_REMINDER),
    fuzzy(keys::OPEN_YOUTUBE),
    fuzzy(keys::OPEN_CHATGPT),
    fuzzy(keys::SEARCH_GOOGLE),
    fuzzy(keys::PLAY_MUSIC),
    fuzzy(keys::GET_WEATHER),
    fuzzy(keys::GET_NEWS),
    heuristic(keys::DATE_QUERIES, predicates::date_query),
    heuristic(keys::HOLIDAY_QUERIES, predicates::holiday_query),
    strict(keys::PHYSICS_GRAPH_CONFIRM),
    fuzzy(keys::PLOT_COMMAND),
    heuristic(keys::SYMBOLIC_MATH, predicates::symbolic_math),
    heuristic(keys::MATH_QUERY, predicates::math_query),
    heuristic(keys::PHYSICS_QUERY, predicates::physics_query),
    heuristic(keys::CHEMISTRY_QUERY, predicates::chemistry_query),
    fuzzy(keys::CHEMISTRY_FACT),
    strict(keys::WIKI_SEARCH),
    fuzzy(keys::TELL_ME_SOMETHING),
    // Team edits name a pokemon and a team; they go before both lists.
    fuzzy(keys::TEAM_ADD),
    fuzzy(keys::TEAM_REMOVE),
    fuzzy(keys::TEAM_UPGRADE),
    fuzzy(keys::TEAM_AVERAGE),
    fuzzy(keys::POKEMON_GALLERY_OPEN),
    fuzzy(keys::POKEMON_IMPORT_CSV),
    // "image" and "images" are one edit apart.
    strict(keys::POKEMON_IMAGE_MULTI),
    strict(keys::POKEMON_IMAGE),
    fuzzy(keys::POKEMON_DOWNLOAD),
    fuzzy(keys::POKEMON_ADD),
    fuzzy(keys::POKEMON_UPDATE),
    fuzzy(keys::POKEMON_DELETE),
    fuzzy(keys::POKEMON_LIST_TYPE),
    fuzzy(keys::POKEMON_LIST),
    fuzzy(keys::POKEMON_SHOW),
    fuzzy(keys::POKEMON_HELP),
    fuzzy(keys::TEAM_LIST),
    fuzzy(keys::TRAINER_ME),
    strict(keys::TRAINER_UPDATE),
];

/// A route's test, with its phrases resolved from the lexicon.
#[derive(Clone)]
pub enum Matcher {
    Strict(PhraseSet),
    Fuzzy { phrases: PhraseSet, cutoffs: Cutoffs },
    Heuristic { phrases: PhraseSet, cutoffs: Cutoffs, test: HeuristicFn },
}

impl Matcher {
    pub fn kind(&self) -> MatchKind {
        match self {
            Matcher::Strict(_) => MatchKind::Strict,
            Matcher::Fuzzy { .. } => MatchKind::Fuzzy,
            Matcher::Heuristic { .. } => MatchKind::Heuristic,
        }
    }

    pub fn phrases(&self) -> &PhraseSet {
        match self {
            Matcher::Strict(phrases) => phrases,
            Matcher::Fuzzy { phrases, .. } | Matcher::Heuristic { phrases, .. } => phrases,
        }
    }

    /// Test one form of the utterance (already lowercased).
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            Matcher::Strict(phrases) => predicates::strict_phrases(phrases, text),
            Matcher::Fuzzy { phrases, cutoffs } => fuzzy_in(text, phrases.as_slice(), cutoffs),
            Matcher::Heuristic { phrases, cutoffs, test } => test(phrases, cutoffs, text),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("kind", &self.kind())
            .field("phrases", &self.phrases().len())
            .finish()
    }
}

pub struct Route {
    pub key: IntentKey,
    pub matcher: Matcher,
    pub handler: Arc<dyn Handler>,
}

impl Route {
    /// True if any form of the utterance passes the matcher.
    pub fn matches<S: AsRef<str>>(&self, forms: &[S]) -> bool {
        forms.iter().any(|form| self.matcher.accepts(form.as_ref()))
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("key", &self.key)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

/// Immutable after `build()`; shared behind an `Arc`.
#[derive(Debug)]
pub struct Registry {
    routes: Vec<Route>,
    lexicon: Arc<Lexicon>,
}

impl Registry {
    pub fn builder(lexicon: Arc<Lexicon>, cutoffs: Cutoffs) -> RegistryBuilder {
        RegistryBuilder::new(lexicon, cutoffs)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, key: &IntentKey) -> Option<&Route> {
        self.routes.iter().find(|r| &r.key == key)
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// First route, in priority order, accepting any of `forms`.
    pub fn first_match<S: AsRef<str>>(&self, forms: &[S]) -> Option<&Route> {
        self.routes.iter().find(|r| r.matches(forms))
    }
}

/// Builds the handler for a route that has none registered.
pub type FallbackFactory = Box<dyn Fn(&IntentKey) -> Arc<dyn Handler> + Send + Sync>;

pub struct RegistryBuilder {
    lexicon: Arc<Lexicon>,
    cutoffs: Cutoffs,
    table: Vec<RouteSpec>,
    handlers: Vec<(IntentKey, Arc<dyn Handler>)>,
    fallback: Option<FallbackFactory>,
}

impl RegistryBuilder {
    pub fn new(lexicon: Arc<Lexicon>, cutoffs: Cutoffs) -> Self {
        Self {
            lexicon,
            cutoffs,
            table: ROUTE_TABLE.to_vec(),
            handlers: Vec::new(),
            fallback: None,
        }
    }

    /// Replace the default route table.
    pub fn table(mut self, table: Vec<RouteSpec>) -> Self {
        self.table = table;
        self
    }

    pub fn handler(mut self, key: IntentKey, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push((key, handler));
        self
    }

    /// Called once per route without a handler of its own.
    pub fn fallback_handler<F>(mut self, factory: F) -> Self
    where
        F: Fn(&IntentKey) -> Arc<dyn Handler> + Send + Sync + 'static,
    {
        self.fallback = Some(Box::new(factory));
        self
    }

    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut seen = HashSet::new();
        for (key, _) in &self.handlers {
            if !seen.insert(key.clone()) {
                return Err(RegistryError::DuplicateHandler(key.clone()));
            }
        }

        let mut routes = Vec::with_capacity(self.table.len());
        for spec in &self.table {
            let phrases = self.lexicon.phrases(&spec.key).cloned();
            let matcher = match (spec.kind, phrases) {
                (RouteKind::Strict, Some(phrases)) => Matcher::Strict(phrases),
                (RouteKind::Fuzzy, Some(phrases)) => Matcher::Fuzzy {
                    phrases,
                    cutoffs: self.cutoffs,
                },
                (RouteKind::Heuristic(test), phrases) => Matcher::Heuristic {
                    phrases: phrases.unwrap_or_default(),
                    cutoffs: self.cutoffs,
                    test,
                },
                (_, None) => return Err(RegistryError::UnknownIntent(spec.key.clone())),
            };

            let handler = self
                .handlers
                .iter()
                .find(|(key, _)| key == &spec.key)
                .map(|(_, h)| h.clone())
                .or_else(|| self.fallback.as_ref().map(|make| make(&spec.key)))
                .ok_or_else(|| RegistryError::MissingHandler(spec.key.clone()))?;

            routes.push(Route {
                key: spec.key.clone(),
                matcher,
                handler,
            });
        }

        for (key, _) in &self.handlers {
            if !self.table.iter().any(|s| &s.key == key) {
                warn!(intent = %key, "handler registered for an intent with no route");
            }
        }

        info!(routes = routes.len(), lexicon = self.lexicon.len(), "intent registry built");
        Ok(Registry {
            routes,
            lexicon: self.lexicon,
        })
    }
}

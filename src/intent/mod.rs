//! Intent resolution: heuristic predicates, the ordered route table, and the
//! dispatcher that scans it.
//!
//! A scan is a pure function of (utterance, lexicon, table); the only side
//! effects are the handler it ends up running and the fallback reply.

pub mod dispatcher;
pub mod predicates;
pub mod registry;

pub use dispatcher::{DispatchOutcome, Dispatcher, SuggestionResolution};
pub use registry::{Matcher, MatchKind, Registry, RegistryBuilder, Route, RouteKind, RouteSpec, ROUTE_TABLE};

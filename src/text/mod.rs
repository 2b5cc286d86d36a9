pub mod fuzzy;
pub mod normalizer;
pub mod yesno;

pub use fuzzy::{best_command_key, fuzzy_in, match_phrases, strict_in, Cutoffs, MatchResult, Suggestion};
pub use normalizer::Normalizer;
pub use yesno::Answer;

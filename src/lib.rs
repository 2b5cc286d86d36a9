pub mod config;
pub mod error;
pub mod followup;
pub mod handlers;
pub mod intent;
pub mod lang;
pub mod lexicon;
pub mod messages;
pub mod outputs;
pub mod state;
pub mod text;

pub use config::NovaConfig;
pub use intent::{DispatchOutcome, Dispatcher, Registry};
pub use lang::Lang;
pub use lexicon::{IntentKey, Lexicon};

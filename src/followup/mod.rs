//! Bounded clarification dialogues: ask one question, wait for one answer.
//!
//! At most one session exists at a time. A second `await_reply` while one is
//! waiting is rejected with `FollowupError::Busy` instead of replacing it.

mod engine;
mod session;

pub use engine::{FollowupEngine, FollowupRequest, PromptDelivery};

// File: src/challenge/mod.rs
pub mod cache;
pub mod service;

pub use cache::{CacheStats, ChallengeCache};
pub use service::{AnswerOutcome, ChallengeService, ChallengeView, OptionView};

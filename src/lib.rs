// src/lib.rs

pub mod audio;
pub mod bank;
pub mod builder;
pub mod challenge;
pub mod config;
pub mod core;
pub mod dictionary;
pub mod distractor;
pub mod error;
pub mod persistence;
pub mod words;

pub use crate::bank::WordBank;
pub use crate::challenge::{ChallengeCache, ChallengeService};
pub use crate::distractor::DistractorGenerator;
pub use crate::error::{Error, Result};

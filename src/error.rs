// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Common result type for coach operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The persisted word bank is not where the accessor expects it.
    #[error("word bank not found at {}; generate it with the build_wordbank binary", path.display())]
    BankMissing { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

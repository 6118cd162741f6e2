//! Configuration loading and word-bank path resolution

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::error::{Error, Result};

/// Environment variable consulted for the word-bank location.
pub const BANK_PATH_ENV: &str = "COACH_WORDBANK";

/// External TTS program invoked by `CommandRenderer`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TtsCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Extra arguments appended when a variant is spoken slowly.
    #[serde(default)]
    pub slow_args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    pub bank_path: PathBuf,
    pub dictionary_path: PathBuf,
    pub frequency_list_path: Option<PathBuf>,
    /// Technique attempts before the distractor generator falls back.
    pub max_attempts: usize,
    pub progress_interval: usize,
    pub render_timeout_ms: u64,
    pub tts_command: Option<TtsCommand>,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            bank_path: PathBuf::from("wordbank.json"),
            dictionary_path: PathBuf::from("cmudict.dict"),
            frequency_list_path: None,
            max_attempts: 10,
            progress_interval: 50,
            render_timeout_ms: 5000,
            tts_command: None,
        }
    }
}

impl CoachConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Loads `path`, or the defaults when the file does not exist.
    /// A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout_ms)
    }

    /// Word-bank location, by priority:
    /// 1. Command-line argument
    /// 2. `COACH_WORDBANK` environment variable
    /// 3. This config's `bank_path` (TOML value or compiled default)
    pub fn resolve_bank_path(&self, cli_arg: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_arg {
            return path.to_path_buf();
        }
        if let Ok(path) = std::env::var(BANK_PATH_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }
        self.bank_path.clone()
    }
}

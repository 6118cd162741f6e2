//! Word sources that pick a quiz word for a difficulty level.

use std::collections::HashSet;
use std::path::Path;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::builder::read_words;
use crate::core::types::Difficulty;
use crate::error::Result;

pub trait WordSource: Send + Sync {
    fn word_for_difficulty(&self, difficulty: Difficulty) -> Option<String>;
}

/// Words ranked by corpus frequency, most common first.
///
/// A difficulty draws uniformly from the top `Difficulty::frequency_window`
/// words, so easy challenges use very common words and hard ones reach
/// further down the list.
pub struct FrequencyList {
    ranked: Vec<String>,
    rng: Mutex<StdRng>,
}

impl FrequencyList {
    /// Keeps the first occurrence of every purely alphabetic word.
    pub fn new(words: impl IntoIterator<Item = String>, rng: StdRng) -> Self {
        let mut seen = HashSet::new();
        let ranked = words
            .into_iter()
            .map(|w| w.to_lowercase())
            .filter(|w| !w.is_empty() && w.chars().all(char::is_alphabetic))
            .filter(|w| seen.insert(w.clone()))
            .collect();
        Self {
            ranked,
            rng: Mutex::new(rng),
        }
    }

    /// Reads a frequency file: one entry per line, the word in the first
    /// column (a count may follow).
    pub fn from_file(path: &Path) -> Result<Self> {
        let lines = read_words(path)?;
        let words = lines
            .into_iter()
            .filter_map(|line| line.split_whitespace().next().map(str::to_string));
        Ok(Self::new(words, StdRng::from_entropy()))
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

impl WordSource for FrequencyList {
    fn word_for_difficulty(&self, difficulty: Difficulty) -> Option<String> {
        let window = difficulty.frequency_window().min(self.ranked.len());
        self.ranked[..window]
            .choose(&mut *self.rng.lock())
            .cloned()
    }
}

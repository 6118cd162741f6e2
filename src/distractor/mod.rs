// File: src/distractor/mod.rs
pub mod techniques;

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::core::normalize::option_key;
use crate::core::types::{Pattern, Variant, OPTION_COUNT};
use techniques::{letter_breakdown, marker_phrase, repetition, Technique, TECHNIQUES};

pub const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Builds the four options of a challenge: the word itself plus three
/// mispronunciations, no two of which compare equal under `option_key`.
pub struct DistractorGenerator {
    techniques: Vec<Technique>,
    max_attempts: usize,
    shuffle_techniques: bool,
}

impl DistractorGenerator {
    pub fn new() -> Self {
        Self {
            techniques: TECHNIQUES.to_vec(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            shuffle_techniques: true,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Keeps the library's canonical order instead of shuffling it per call.
    pub fn with_fixed_order(mut self) -> Self {
        self.shuffle_techniques = false;
        self
    }

    pub fn with_techniques(mut self, techniques: Vec<Technique>) -> Self {
        self.techniques = techniques;
        self
    }

    /// Three distinct wrong variants of `word`, in the order they were found.
    pub fn distractors<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> Vec<Variant> {
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(option_key(word));
        let mut wrong = Vec::with_capacity(DISTRACTOR_COUNT);

        let mut order = self.techniques.clone();
        if self.shuffle_techniques {
            order.shuffle(rng);
        }

        if !order.is_empty() {
            for attempt in 0..self.max_attempts {
                if wrong.len() == DISTRACTOR_COUNT {
                    break;
                }
                let technique = order[attempt % order.len()];
                let Some(candidate) = (technique.apply)(word) else {
                    continue;
                };
                if seen.insert(option_key(&candidate)) {
                    wrong.push(Variant::wrong(word, candidate, technique.pattern));
                } else {
                    debug!(word, pattern = %technique.pattern, "duplicate candidate rejected");
                }
            }
        }

        if wrong.len() < DISTRACTOR_COUNT {
            debug!(word, found = wrong.len(), "technique budget exhausted, using fallbacks");
            let fixed = [
                (letter_breakdown(word), Pattern::LetterBreakdown),
                (repetition(word), Pattern::Repetition),
            ];
            for (candidate, pattern) in fixed {
                if wrong.len() == DISTRACTOR_COUNT {
                    break;
                }
                if seen.insert(option_key(&candidate)) {
                    wrong.push(Variant::wrong(word, candidate, pattern));
                }
            }
            // Each marker phrase is longer than the last, so at most `seen.len()`
            // of them can collide before three distractors exist.
            let mut n = 1;
            while wrong.len() < DISTRACTOR_COUNT {
                let candidate = marker_phrase(word, n);
                if seen.insert(option_key(&candidate)) {
                    wrong.push(Variant::wrong(word, candidate, Pattern::MarkerPhrase));
                }
                n += 1;
            }
        }

        wrong
    }

    /// The full option set: one correct variant and three wrong ones, shuffled.
    pub fn generate<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> Vec<Variant> {
        let mut options = Vec::with_capacity(OPTION_COUNT);
        options.push(Variant::correct(word));
        options.extend(self.distractors(word, rng));
        options.shuffle(rng);
        options
    }
}

impl Default for DistractorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

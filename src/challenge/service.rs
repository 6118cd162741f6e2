// File: src/challenge/service.rs
use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::audio::RenderOutcome;
use crate::bank::WordBank;
use crate::challenge::cache::ChallengeCache;
use crate::core::types::{option_index, option_letter, ChallengeId, Difficulty, Pattern, Variant};
use crate::distractor::DistractorGenerator;
use crate::error::{Error, Result};
use crate::words::WordSource;

pub const CHALLENGE_KIND: &str = "audio_pronunciation";
const HINT: &str = "Listen carefully to how each syllable is pronounced";

/// One option as shown to a client; the audio is fetched separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub letter: char,
    pub pattern: Pattern,
    pub audio_url: String,
}

/// The outward shape of a generated challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeView {
    pub id: ChallengeId,
    pub word: String,
    pub difficulty: Difficulty,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub xp_reward: u32,
    pub hint: String,
    pub ipa: Option<String>,
    pub options: Vec<OptionView>,
    pub correct_answer: char,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub challenge_id: ChallengeId,
    pub is_correct: bool,
    pub correct_answer: char,
    pub xp_earned: u32,
}

pub fn audio_url(id: ChallengeId, letter: char) -> String {
    format!("/api/challenge/audio/{id}/option/{letter}")
}

/// Generates challenges and answers the follow-up requests about them.
pub struct ChallengeService<S: WordSource> {
    words: S,
    generator: DistractorGenerator,
    cache: Arc<ChallengeCache>,
    bank: Option<Arc<WordBank>>,
    rng: Mutex<StdRng>,
}

impl<S: WordSource> ChallengeService<S> {
    pub fn new(words: S, generator: DistractorGenerator, cache: Arc<ChallengeCache>) -> Self {
        Self {
            words,
            generator,
            cache,
            bank: None,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Adds IPA to generated challenges when the word is in `bank`.
    pub fn with_word_bank(mut self, bank: Arc<WordBank>) -> Self {
        self.bank = Some(bank);
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn cache(&self) -> &ChallengeCache {
        &self.cache
    }

    pub fn generate(&self, difficulty: Difficulty) -> Result<ChallengeView> {
        let word = self
            .words
            .word_for_difficulty(difficulty)
            .ok_or_else(|| Error::NotFound(format!("no word available for {difficulty}")))?;
        self.generate_for(&word, difficulty)
    }

    /// Builds and caches a challenge for a caller-chosen word.
    pub fn generate_for(&self, word: &str, difficulty: Difficulty) -> Result<ChallengeView> {
        let variants = self.generator.generate(word, &mut *self.rng.lock());
        let patterns: Vec<Pattern> = variants.iter().map(|v| v.pattern).collect();
        let correct_answer = variants
            .iter()
            .position(Variant::is_correct)
            .map(option_letter)
            .ok_or_else(|| Error::InvalidInput(format!("no correct option for '{word}'")))?;

        let id = self.cache.create(word, difficulty, variants)?;

        let options = patterns
            .into_iter()
            .enumerate()
            .map(|(i, pattern)| {
                let letter = option_letter(i);
                OptionView {
                    letter,
                    pattern,
                    audio_url: audio_url(id, letter),
                }
            })
            .collect();

        info!(challenge_id = id, word, %difficulty, "challenge generated");
        Ok(ChallengeView {
            id,
            word: word.to_string(),
            difficulty,
            content: format!("Which pronunciation of '{word}' is correct?"),
            kind: CHALLENGE_KIND,
            xp_reward: difficulty.xp_reward(),
            hint: HINT.to_string(),
            ipa: self.ipa_for(word),
            options,
            correct_answer,
        })
    }

    fn ipa_for(&self, word: &str) -> Option<String> {
        let bank = self.bank.as_ref()?;
        match bank.get_ipa(word) {
            Ok(ipa) => ipa,
            Err(e) => {
                warn!(word, error = %e, "word bank unavailable, omitting IPA");
                None
            }
        }
    }

    /// Checks an answer letter. `None` when the challenge is unknown.
    pub fn submit(&self, id: ChallengeId, answer: &str) -> Option<AnswerOutcome> {
        let challenge = self.cache.get(id)?;
        let is_correct = option_index(answer).map(option_letter) == Some(challenge.correct_letter);
        let xp_earned = if is_correct {
            challenge.difficulty.xp_reward()
        } else {
            0
        };
        Some(AnswerOutcome {
            challenge_id: id,
            is_correct,
            correct_answer: challenge.correct_letter,
            xp_earned,
        })
    }

    pub fn audio(&self, id: ChallengeId, letter: &str) -> Option<RenderOutcome> {
        self.cache.get_audio(id, letter)
    }
}

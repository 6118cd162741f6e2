// File: src/challenge/cache.rs
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::audio::{render_or_empty, AudioRenderer, RenderOutcome};
use crate::core::types::{
    option_index, option_letter, Challenge, ChallengeId, Difficulty, Variant, OPTION_COUNT,
};
use crate::error::{Error, Result};

pub const ID_RANGE: std::ops::RangeInclusive<ChallengeId> = 10_000..=99_999;
const ID_REDRAWS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub challenges_cached: usize,
    pub audio_files_cached: usize,
    pub total_audio_bytes: usize,
}

/// Keeps challenges between their generation and later answer or audio
/// requests, plus the audio rendered for each option.
///
/// Both maps are unbounded: entries stay until [`ChallengeCache::clear`].
/// Hosts that run for a long time should clear on a schedule of their own.
pub struct ChallengeCache {
    challenges: RwLock<HashMap<ChallengeId, Arc<Challenge>>>,
    audio: RwLock<HashMap<(ChallengeId, char), Arc<[u8]>>>,
    renderer: Arc<dyn AudioRenderer>,
    rng: Mutex<StdRng>,
}

impl ChallengeCache {
    pub fn new(renderer: Arc<dyn AudioRenderer>) -> Self {
        Self::with_rng(renderer, StdRng::from_entropy())
    }

    pub fn with_rng(renderer: Arc<dyn AudioRenderer>, rng: StdRng) -> Self {
        Self {
            challenges: RwLock::new(HashMap::new()),
            audio: RwLock::new(HashMap::new()),
            renderer,
            rng: Mutex::new(rng),
        }
    }

    /// Stores a new challenge and returns its id.
    ///
    /// Ids are random, so a draw can land on a live challenge. The id is
    /// redrawn a few times; if every draw is taken the record under that id
    /// is replaced and its audio dropped.
    pub fn create(
        &self,
        word: &str,
        difficulty: Difficulty,
        variants: Vec<Variant>,
    ) -> Result<ChallengeId> {
        let correct: Vec<usize> = variants
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_correct())
            .map(|(i, _)| i)
            .collect();
        let [index] = correct[..] else {
            return Err(Error::InvalidInput(format!(
                "expected exactly one correct variant, found {}",
                correct.len()
            )));
        };
        if variants.len() != OPTION_COUNT {
            return Err(Error::InvalidInput(format!(
                "expected {} variants, found {}",
                OPTION_COUNT,
                variants.len()
            )));
        }

        let mut challenges = self.challenges.write();
        let mut id = self.rng.lock().gen_range(ID_RANGE);
        for _ in 0..ID_REDRAWS {
            if !challenges.contains_key(&id) {
                break;
            }
            id = self.rng.lock().gen_range(ID_RANGE);
        }
        if challenges.contains_key(&id) {
            warn!(challenge_id = id, "challenge id collision, overwriting");
            self.audio.write().retain(|(cid, _), _| *cid != id);
        }

        let challenge = Challenge {
            id,
            word: word.to_string(),
            difficulty,
            correct_letter: option_letter(index),
            variants,
        };
        debug!(challenge_id = id, word, correct = %challenge.correct_letter, "challenge cached");
        challenges.insert(id, Arc::new(challenge));
        Ok(id)
    }

    pub fn get(&self, id: ChallengeId) -> Option<Arc<Challenge>> {
        self.challenges.read().get(&id).cloned()
    }

    /// Audio for one option, rendered on first request.
    ///
    /// `None` when the challenge is unknown or the letter names no option.
    /// A failed render comes back as `RenderOutcome::Empty` and is not cached,
    /// so the next request tries again.
    pub fn get_audio(&self, id: ChallengeId, letter: &str) -> Option<RenderOutcome> {
        let index = option_index(letter)?;
        let key = (id, option_letter(index));

        if let Some(bytes) = self.audio.read().get(&key) {
            return Some(RenderOutcome::Audio(bytes.to_vec()));
        }

        let challenge = self.get(id)?;
        let variant = challenge.variants.get(index)?;
        let outcome = render_or_empty(
            self.renderer.as_ref(),
            &variant.spoken_text,
            variant.pattern.is_slow(),
        );

        if let RenderOutcome::Audio(bytes) = &outcome {
            // Skip the insert if the challenge was replaced while rendering.
            // The challenges lock is held through the insert, taken before the
            // audio lock as in `create` and `clear`.
            let challenges = self.challenges.read();
            if challenges.get(&id).is_some_and(|current| Arc::ptr_eq(current, &challenge)) {
                self.audio.write().insert(key, Arc::from(bytes.as_slice()));
            }
            debug!(challenge_id = id, letter = %key.1, bytes = bytes.len(), "audio rendered");
        }
        Some(outcome)
    }

    /// Stores pre-rendered audio for an option of a live challenge.
    pub fn put_audio(&self, id: ChallengeId, letter: &str, bytes: Vec<u8>) -> Result<()> {
        let index = option_index(letter)
            .ok_or_else(|| Error::InvalidInput(format!("no option {letter:?}")))?;
        let challenges = self.challenges.read();
        if !challenges.contains_key(&id) {
            return Err(Error::NotFound(format!("challenge {id}")));
        }
        self.audio.write().insert((id, option_letter(index)), Arc::from(bytes));
        Ok(())
    }

    pub fn clear(&self) {
        let mut challenges = self.challenges.write();
        let mut audio = self.audio.write();
        info!(
            challenges = challenges.len(),
            audio_files = audio.len(),
            "clearing challenge cache"
        );
        challenges.clear();
        audio.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let challenges = self.challenges.read();
        let audio = self.audio.read();
        CacheStats {
            challenges_cached: challenges.len(),
            audio_files_cached: audio.len(),
            total_audio_bytes: audio.values().map(|bytes| bytes.len()).sum(),
        }
    }
}

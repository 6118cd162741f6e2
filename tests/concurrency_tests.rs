//! Shared caches under concurrent use.

use std::sync::Arc;
use std::thread;

use coach_core::audio::{AudioRenderer, RenderError};
use coach_core::core::types::{Difficulty, WordBankEntry};
use coach_core::persistence::{save_bank, BankMap};
use coach_core::{ChallengeCache, DistractorGenerator, WordBank};
use rand::rngs::StdRng;
use rand::SeedableRng;

struct Echo;

impl AudioRenderer for Echo {
    fn render(&self, text: &str, _slow: bool) -> Result<Vec<u8>, RenderError> {
        Ok(text.as_bytes().to_vec())
    }
}

#[test]
fn parallel_creates_and_audio_fetches() {
    let cache = Arc::new(ChallengeCache::with_rng(Arc::new(Echo), StdRng::seed_from_u64(21)));
    let words = ["hello", "cat", "string", "beautiful", "a", "knife", "rhythm", "go"];

    let handles: Vec<_> = words
        .iter()
        .enumerate()
        .map(|(t, word)| {
            let cache = Arc::clone(&cache);
            let word = word.to_string();
            thread::spawn(move || {
                let generator = DistractorGenerator::new();
                let mut rng = StdRng::seed_from_u64(t as u64);
                let mut ids = Vec::new();
                for _ in 0..25 {
                    let variants = generator.generate(&word, &mut rng);
                    let id = cache.create(&word, Difficulty::Medium, variants).unwrap();
                    for letter in ["A", "B", "C", "D"] {
                        assert!(cache.get_audio(id, letter).unwrap().is_audio());
                    }
                    ids.push(id);
                }
                ids
            })
        })
        .collect();

    let mut total = 0;
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(cache.get(id).is_some());
            total += 1;
        }
    }
    let stats = cache.stats();
    assert_eq!(stats.challenges_cached, total);
    assert_eq!(stats.audio_files_cached, total * 4);
}

#[test]
fn concurrent_first_use_loads_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wordbank.json");
    let mut map = BankMap::new();
    map.insert(
        "hello".into(),
        WordBankEntry {
            ipa: "/həloʊ/".into(),
            syllables: vec!["hə".into(), "loʊ".into()],
            source: "cmudict-offline".into(),
        },
    );
    save_bank(&map, &path).unwrap();

    let bank = Arc::new(WordBank::new(&path));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let bank = Arc::clone(&bank);
            thread::spawn(move || bank.get_ipa("Hello").unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("/həloʊ/"));
    }
}

//! End-to-end tests: offline build, bank lookups, challenge round-trips.

use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use coach_core::audio::{AudioRenderer, RenderError, RenderOutcome};
use coach_core::builder::WordBankBuilder;
use coach_core::core::normalize::option_key;
use coach_core::core::types::{Difficulty, VariantKind};
use coach_core::dictionary::CmuDictionary;
use coach_core::words::FrequencyList;
use coach_core::{ChallengeCache, ChallengeService, DistractorGenerator, Error, WordBank};
use rand::rngs::StdRng;
use rand::SeedableRng;

const CMU: &str = ";;; test fixture
HELLO  HH AH0 L OW1
HELLO(2)  HH EH0 L OW1
CAT  K AE1 T
BEAUTIFUL  B Y UW1 T AH0 F AH0 L
STRING  S T R IH1 NG
";

struct Echo;

impl AudioRenderer for Echo {
    fn render(&self, text: &str, _slow: bool) -> Result<Vec<u8>, RenderError> {
        Ok(text.as_bytes().to_vec())
    }
}

fn build_bank(dir: &std::path::Path) -> std::path::PathBuf {
    let words = dir.join("words.txt");
    let output = dir.join("bank").join("wordbank.json");
    fs::write(&words, "Hello\ncat\n\nbeautiful!\nstring\nzzxq\n").unwrap();

    let builder = WordBankBuilder::new(CmuDictionary::parse(CMU));
    let report = builder.run(&words, &output).unwrap();
    assert_eq!(report.total, 5);
    assert_eq!(report.hits, 4);
    assert_eq!(report.misses, 1);
    output
}

#[test]
fn built_bank_is_readable_by_accessor() {
    let dir = tempfile::tempdir().unwrap();
    let path = build_bank(dir.path());

    let bank = WordBank::new(&path);
    assert_eq!(bank.get_ipa("hello").unwrap().as_deref(), Some("/həloʊ/"));
    assert_eq!(bank.get_ipa("  Hello!  ").unwrap(), bank.get_ipa("hello").unwrap());
    assert_eq!(
        bank.get_syllables("beautiful").unwrap().unwrap(),
        vec!["bju", "tə", "fəl"]
    );
    assert!(!bank.has("zzxq").unwrap());
    assert_eq!(bank.len().unwrap(), 4);
}

#[test]
fn rebuild_then_reload_picks_up_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = build_bank(dir.path());
    let bank = WordBank::new(&path);
    assert!(bank.has("cat").unwrap());

    let words = dir.path().join("fewer.txt");
    fs::write(&words, "hello\n").unwrap();
    WordBankBuilder::new(CmuDictionary::parse(CMU)).run(&words, &path).unwrap();

    assert!(bank.has("cat").unwrap());
    bank.reload().unwrap();
    assert!(!bank.has("cat").unwrap());
    assert!(bank.has("hello").unwrap());
}

#[test]
fn missing_bank_is_actionable() {
    let dir = tempfile::tempdir().unwrap();
    let bank = WordBank::new(dir.path().join("nowhere.json"));
    let err = bank.get_ipa("hello").unwrap_err();
    assert!(matches!(err, Error::BankMissing { .. }));
    assert!(err.to_string().contains("nowhere.json"));
}

fn service(words: &[&str], seed: u64) -> ChallengeService<FrequencyList> {
    let list = FrequencyList::new(
        words.iter().map(|w| w.to_string()),
        StdRng::seed_from_u64(seed),
    );
    let cache = Arc::new(ChallengeCache::with_rng(Arc::new(Echo), StdRng::seed_from_u64(seed)));
    ChallengeService::new(list, DistractorGenerator::new(), cache).with_rng(StdRng::seed_from_u64(seed))
}

#[test]
fn generated_challenge_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let bank = Arc::new(WordBank::new(build_bank(dir.path())));
    let service = service(&["hello"], 17).with_word_bank(bank);

    let view = service.generate(Difficulty::Easy).unwrap();
    assert_eq!(view.word, "hello");
    assert_eq!(view.ipa.as_deref(), Some("/həloʊ/"));
    assert_eq!(view.xp_reward, 10);
    assert_eq!(view.options.len(), 4);
    assert_eq!(view.content, "Which pronunciation of 'hello' is correct?");
    let letters: Vec<char> = view.options.iter().map(|o| o.letter).collect();
    assert_eq!(letters, vec!['A', 'B', 'C', 'D']);
    assert_eq!(
        view.options[0].audio_url,
        format!("/api/challenge/audio/{}/option/A", view.id)
    );

    let record = service.cache().get(view.id).unwrap();
    assert_eq!(record.correct_letter, view.correct_answer);
    assert_eq!(record.variants.iter().filter(|v| v.kind == VariantKind::Correct).count(), 1);
    let keys: HashSet<String> = record.variants.iter().map(|v| option_key(&v.spoken_text)).collect();
    assert_eq!(keys.len(), 4);

    let right = service.submit(view.id, &view.correct_answer.to_ascii_lowercase().to_string()).unwrap();
    assert!(right.is_correct);
    assert_eq!(right.xp_earned, 10);

    let wrong_letter = view.options.iter().map(|o| o.letter).find(|l| *l != view.correct_answer).unwrap();
    let wrong = service.submit(view.id, &wrong_letter.to_string()).unwrap();
    assert!(!wrong.is_correct);
    assert_eq!(wrong.xp_earned, 0);
    assert!(service.submit(view.id + 1_000_000, "A").is_none());
}

#[test]
fn audio_matches_the_option_spoken_text() {
    let service = service(&["beautiful"], 3);
    let view = service.generate(Difficulty::Medium).unwrap();
    let record = service.cache().get(view.id).unwrap();

    for (i, option) in view.options.iter().enumerate() {
        let audio = service.audio(view.id, &option.letter.to_string()).unwrap();
        assert_eq!(audio, RenderOutcome::Audio(record.variants[i].spoken_text.as_bytes().to_vec()));
    }
    assert!(service.audio(view.id, "Z").is_none());
    assert_eq!(service.cache().stats().audio_files_cached, 4);
}

#[test]
fn cache_scenario_cat() {
    let cache = ChallengeCache::with_rng(Arc::new(Echo), StdRng::seed_from_u64(1));
    let variants = DistractorGenerator::new().generate("cat", &mut StdRng::seed_from_u64(1));
    let id = cache.create("cat", Difficulty::Easy, variants).unwrap();
    assert_eq!(cache.get(id).unwrap().word, "cat");
    assert!(cache.get_audio(id, "Z").is_none());
}

#[test]
fn same_seed_same_challenge() {
    let first = service(&["string"], 8).generate(Difficulty::Hard).unwrap();
    let second = service(&["string"], 8).generate(Difficulty::Hard).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_word_source_is_not_found() {
    let service = service(&[], 1);
    assert!(matches!(service.generate(Difficulty::Easy), Err(Error::NotFound(_))));
}

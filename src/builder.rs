//! Offline word-bank builder.
//!
//! Reads a word list, looks every word up in a phonetic dictionary and writes
//! the resulting `{ipa, syllables, source}` entries as one key-sorted JSON file.
//! Words the dictionary does not know are counted as misses and skipped.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::core::converter::{tokenize, IpaMapper};
use crate::core::normalize::normalize;
use crate::core::syllable::ipa_syllables;
use crate::core::types::WordBankEntry;
use crate::dictionary::PhoneticDictionary;
use crate::error::Result;
use crate::persistence::{save_bank, BankMap};

pub const SOURCE_TAG: &str = "cmudict-offline";
pub const DEFAULT_PROGRESS_INTERVAL: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub total: usize,
    pub hits: usize,
    pub misses: usize,
    /// Distinct keys written; lower than `hits` when the list repeats words.
    pub written: usize,
}

pub struct WordBankBuilder<D: PhoneticDictionary> {
    dictionary: D,
    mapper: IpaMapper,
    progress_interval: usize,
}

impl<D: PhoneticDictionary> WordBankBuilder<D> {
    pub fn new(dictionary: D) -> Self {
        Self {
            dictionary,
            mapper: IpaMapper::new(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Entry for an already-normalized word, using its first listed pronunciation.
    pub fn build_entry(&self, word: &str) -> Option<WordBankEntry> {
        let pronunciations = self.dictionary.lookup(word);
        let first = pronunciations.first()?;
        let tokens = tokenize(first);
        if tokens.is_empty() {
            return None;
        }
        Some(WordBankEntry {
            ipa: self.mapper.transcribe(&tokens).display(),
            syllables: ipa_syllables(&self.mapper, &tokens),
            source: SOURCE_TAG.to_string(),
        })
    }

    /// Converts `words` into bank entries, logging progress as it goes.
    pub fn build(&self, words: &[String]) -> (BankMap, BuildReport) {
        let mut bank = BankMap::new();
        let mut report = BuildReport {
            total: words.len(),
            ..Default::default()
        };

        for (i, raw) in words.iter().enumerate() {
            let processed = i + 1;
            let word = normalize(raw);
            if !word.is_empty() {
                match self.build_entry(&word) {
                    Some(entry) => {
                        bank.insert(word, entry);
                        report.hits += 1;
                    }
                    None => {
                        debug!(word = %word, "no pronunciation, skipping");
                        report.misses += 1;
                    }
                }
            }
            if processed % self.progress_interval == 0 || processed == report.total {
                info!(
                    processed,
                    total = report.total,
                    hits = report.hits,
                    misses = report.misses,
                    "building word bank"
                );
            }
        }

        report.written = bank.len();
        (bank, report)
    }

    /// Full run: read the word list, build, overwrite `output`.
    /// Unreadable input or unwritable output aborts the run.
    pub fn run(&self, input: &Path, output: &Path) -> Result<BuildReport> {
        info!(input = %input.display(), output = %output.display(), "offline builder starting");
        let words = read_words(input)?;
        let (bank, report) = self.build(&words);
        save_bank(&bank, output)?;
        info!(entries = report.written, output = %output.display(), "wrote word bank");
        Ok(report)
    }
}

/// Reads a word list, one word per line, trying a ladder of encodings.
/// Blank lines are dropped; words are returned normalized.
pub fn read_words(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path)?;
    let text = decode_text(&bytes);
    Ok(text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(normalize)
        .collect())
}

/// UTF-16 by BOM, then BOM-less UTF-16 when the bytes carry NULs, then
/// UTF-8 (with or without BOM), and finally lossy UTF-8.
///
/// Word lists never contain NUL, so NUL bytes mark UTF-16; the side they
/// fall on picks the byte order.
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(b"\xFF\xFE") {
        if let Some(text) = decode_utf16(rest, u16::from_le_bytes) {
            return text;
        }
    }
    if let Some(rest) = bytes.strip_prefix(b"\xFE\xFF") {
        if let Some(text) = decode_utf16(rest, u16::from_be_bytes) {
            return text;
        }
    }
    if bytes.contains(&0) {
        let even_nuls = bytes.iter().step_by(2).filter(|b| **b == 0).count();
        let odd_nuls = bytes.iter().skip(1).step_by(2).filter(|b| **b == 0).count();
        let (first, second): (fn([u8; 2]) -> u16, fn([u8; 2]) -> u16) = if odd_nuls >= even_nuls {
            (u16::from_le_bytes, u16::from_be_bytes)
        } else {
            (u16::from_be_bytes, u16::from_le_bytes)
        };
        if let Some(text) = decode_utf16(bytes, first).or_else(|| decode_utf16(bytes, second)) {
            return text;
        }
    }

    let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(body) {
        return text.to_string();
    }

    debug!("falling back to lossy UTF-8 decoding");
    String::from_utf8_lossy(body).into_owned()
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

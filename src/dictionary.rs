//! Phonetic dictionary collaborators used by the offline builder.
//!
//! The builder only needs `lookup`: a word's pronunciations in the
//! dictionary's preferred order, or an empty list when it is unknown.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;

pub trait PhoneticDictionary {
    /// Pronunciations for `word`, each a whitespace-separated phoneme string.
    fn lookup(&self, word: &str) -> Vec<String>;
}

/// The CMU Pronouncing Dictionary, parsed from its plain-text format.
///
/// Lines look like `HELLO  HH AH0 L OW1`; alternates are written `HELLO(2)`
/// and lines starting with `;;;` are comments. Keys are matched case-insensitively
/// and alternates keep their file order.
#[derive(Debug, Default)]
pub struct CmuDictionary {
    entries: HashMap<String, Vec<String>>,
}

impl CmuDictionary {
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        let dict = Self::parse(&text);
        info!(path = %path.display(), words = dict.len(), "loaded phonetic dictionary");
        Ok(dict)
    }

    pub fn parse(text: &str) -> Self {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }
            let Some((head, phones)) = line.split_once(char::is_whitespace) else {
                continue;
            };
            // Newer releases append "# comment" to some lines.
            let phones = phones.split('#').next().unwrap_or_default().trim();
            if phones.is_empty() {
                continue;
            }
            let word = match head.find('(') {
                Some(idx) if head.ends_with(')') => &head[..idx],
                _ => head,
            };
            entries
                .entry(word.to_lowercase())
                .or_default()
                .push(phones.to_string());
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PhoneticDictionary for CmuDictionary {
    fn lookup(&self, word: &str) -> Vec<String> {
        self.entries
            .get(&word.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

/// In-memory dictionary, handy for tests and small fixtures.
#[derive(Debug, Default, Clone)]
pub struct MemoryDictionary {
    entries: HashMap<String, Vec<String>>,
}

impl MemoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, word: &str, phones: &str) -> Self {
        self.entries
            .entry(word.to_lowercase())
            .or_default()
            .push(phones.to_string());
        self
    }
}

impl PhoneticDictionary for MemoryDictionary {
    fn lookup(&self, word: &str) -> Vec<String> {
        self.entries
            .get(&word.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = ";;; # CMUdict  --  Major Version: 0.07
HELLO  HH AH0 L OW1
HELLO(2)  HH EH0 L OW1
cat K AE1 T
READ  R IY1 D # present tense
BROKEN
";

    #[test]
    fn parses_alternates_in_order() {
        let dict = CmuDictionary::parse(SAMPLE);
        assert_eq!(dict.lookup("hello"), vec!["HH AH0 L OW1", "HH EH0 L OW1"]);
        assert_eq!(dict.lookup("Hello").len(), 2);
    }

    #[test]
    fn strips_trailing_comments_and_skips_junk() {
        let dict = CmuDictionary::parse(SAMPLE);
        assert_eq!(dict.lookup("read"), vec!["R IY1 D"]);
        assert_eq!(dict.lookup("cat"), vec!["K AE1 T"]);
        assert!(dict.lookup("broken").is_empty());
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn unknown_word_is_empty() {
        let dict = MemoryDictionary::new().with("cat", "K AE1 T");
        assert!(dict.lookup("dog").is_empty());
        assert_eq!(dict.lookup("CAT"), vec!["K AE1 T"]);
    }
}

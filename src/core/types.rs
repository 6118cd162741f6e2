// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A stress-free phoneme symbol from the dictionary's inventory, e.g. "HH" or "OW".
pub type Phoneme = String;

/// One pronunciation of a word as a sequence of IPA glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcription {
    symbols: Vec<String>,
}

impl Transcription {
    pub fn new(symbols: Vec<String>) -> Self {
        Self { symbols }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// The glyphs concatenated without separators.
    pub fn flat(&self) -> String {
        self.symbols.concat()
    }

    /// The bracketed display form, e.g. `/həloʊ/`.
    pub fn display(&self) -> String {
        format!("/{}/", self.flat())
    }
}

impl fmt::Display for Transcription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.flat())
    }
}

/// The persisted value for one normalized word.
/// Entries are never mutated after the builder writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBankEntry {
    /// Display transcription including the surrounding slashes.
    pub ipa: String,
    /// IPA rendering of each syllable, in order.
    pub syllables: Vec<String>,
    /// Provenance tag, e.g. "cmudict-offline".
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn xp_reward(&self) -> u32 {
        match self {
            Self::Easy => 10,
            Self::Medium => 15,
            Self::Hard => 20,
        }
    }

    /// How many of the most frequent words a challenge of this level draws from.
    pub fn frequency_window(&self) -> usize {
        match self {
            Self::Easy => 100,
            Self::Medium => 1000,
            Self::Hard => 5000,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(Error::InvalidInput(format!("unknown difficulty '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    Correct,
    Wrong,
}

/// Which technique produced a variant's spoken text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Correct,
    InteriorScramble,
    StressShift,
    VowelSubstitution,
    ConsonantCluster,
    SchwaInsertion,
    SilentLetter,
    LetterBreakdown,
    Repetition,
    MarkerPhrase,
}

impl Pattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::InteriorScramble => "interior_scramble",
            Self::StressShift => "stress_shift",
            Self::VowelSubstitution => "vowel_substitution",
            Self::ConsonantCluster => "consonant_cluster",
            Self::SchwaInsertion => "schwa_insertion",
            Self::SilentLetter => "silent_letter",
            Self::LetterBreakdown => "letter_breakdown",
            Self::Repetition => "repetition",
            Self::MarkerPhrase => "marker_phrase",
        }
    }

    /// Emphasis patterns are voiced at the renderer's slow pace.
    pub fn is_slow(&self) -> bool {
        matches!(self, Self::StressShift | Self::SchwaInsertion)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One quiz option: the text handed to the speech renderer plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub word: String,
    pub spoken_text: String,
    pub kind: VariantKind,
    pub pattern: Pattern,
}

impl Variant {
    pub fn correct(word: &str) -> Self {
        Self {
            word: word.to_string(),
            spoken_text: word.to_string(),
            kind: VariantKind::Correct,
            pattern: Pattern::Correct,
        }
    }

    pub fn wrong(word: &str, spoken_text: String, pattern: Pattern) -> Self {
        Self {
            word: word.to_string(),
            spoken_text,
            kind: VariantKind::Wrong,
            pattern,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.kind == VariantKind::Correct
    }
}

/// Random integer drawn at creation time; see `ChallengeCache::create`.
pub type ChallengeId = u32;

/// Number of options in every challenge.
pub const OPTION_COUNT: usize = 4;

/// The letter ('A'..) naming the option at `index`.
pub fn option_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// Maps an option letter back to its position. Case-insensitive; anything
/// outside the option range is `None`.
pub fn option_index(letter: &str) -> Option<usize> {
    let mut chars = letter.trim().chars();
    let c = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !c.is_ascii_uppercase() {
        return None;
    }
    let index = (c as u8 - b'A') as usize;
    (index < OPTION_COUNT).then_some(index)
}

/// A generated question. Immutable once stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: ChallengeId,
    pub word: String,
    pub difficulty: Difficulty,
    pub correct_letter: char,
    pub variants: Vec<Variant>,
}

impl Challenge {
    pub fn variant(&self, letter: &str) -> Option<&Variant> {
        option_index(letter).and_then(|i| self.variants.get(i))
    }
}

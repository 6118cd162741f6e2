// src/core/converter.rs
use crate::core::types::{Phoneme, Transcription};

/// Splits a dictionary pronunciation into bare phoneme symbols.
///
/// Stress digits are stripped from the end of each token ("OW1" -> "OW").
/// Malformed tokens pass through unchanged.
pub fn tokenize(phones: &str) -> Vec<Phoneme> {
    phones
        .split_whitespace()
        .map(|token| token.trim_end_matches(|c: char| c.is_ascii_digit()).to_string())
        .collect()
}

pub fn is_vowel(phoneme: &str) -> bool {
    matches!(
        phoneme,
        "AA" | "AE" | "AH" | "AO" | "AW" | "AY" | "EH" | "ER" | "EY" | "IH" | "IY" | "OW" | "OY"
            | "UH" | "UW"
    )
}

/// Maps dictionary phoneme symbols to IPA glyphs.
pub struct IpaMapper;

impl IpaMapper {
    pub fn new() -> Self {
        Self
    }

    /// IPA for a single symbol. Unknown symbols come back lowercased.
    pub fn map(&self, phoneme: &str) -> String {
        match self.get_glyph(phoneme) {
            Some(glyph) => glyph.to_string(),
            None => phoneme.to_lowercase(),
        }
    }

    pub fn transcribe(&self, phonemes: &[Phoneme]) -> Transcription {
        Transcription::new(phonemes.iter().map(|p| self.map(p)).collect())
    }

    /// Flat IPA string for a run of phonemes, without brackets.
    pub fn to_ipa(&self, phonemes: &[Phoneme]) -> String {
        phonemes.iter().map(|p| self.map(p)).collect()
    }

    fn get_glyph(&self, s: &str) -> Option<&'static str> {
        match s {
            // Vowels
            "AA" => Some("ɑ"), "AE" => Some("æ"), "AH" => Some("ə"),
            "AO" => Some("ɔ"), "AW" => Some("aʊ"), "AY" => Some("aɪ"),
            "EH" => Some("ɛ"), "ER" => Some("ɝ"), "EY" => Some("eɪ"),
            "IH" => Some("ɪ"), "IY" => Some("i"), "OW" => Some("oʊ"),
            "OY" => Some("ɔɪ"), "UH" => Some("ʊ"), "UW" => Some("u"),
            // Consonants
            "P" => Some("p"), "B" => Some("b"), "T" => Some("t"),
            "D" => Some("d"), "K" => Some("k"), "G" => Some("ɡ"),
            "CH" => Some("tʃ"), "JH" => Some("dʒ"), "F" => Some("f"),
            "V" => Some("v"), "TH" => Some("θ"), "DH" => Some("ð"),
            "S" => Some("s"), "Z" => Some("z"), "SH" => Some("ʃ"),
            "ZH" => Some("ʒ"), "HH" => Some("h"), "M" => Some("m"),
            "N" => Some("n"), "NG" => Some("ŋ"), "L" => Some("l"),
            "R" => Some("ɹ"), "Y" => Some("j"), "W" => Some("w"),
            _ => None,
        }
    }
}

impl Default for IpaMapper {
    fn default() -> Self {
        Self::new()
    }
}

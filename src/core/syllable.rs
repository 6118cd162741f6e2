// src/core/syllable.rs
use crate::core::converter::{is_vowel, IpaMapper};
use crate::core::types::Phoneme;

/// Groups phonemes into syllables, one per vowel nucleus.
///
/// Leading consonants attach to the first vowel. Each later vowel closes the
/// open syllable and takes the consonants seen since the previous vowel as its
/// onset; trailing consonants stay with the last syllable. A vowel-less
/// sequence is a single syllable.
pub fn syllabify(phonemes: &[Phoneme]) -> Vec<Vec<Phoneme>> {
    let mut syllables = Vec::new();
    let mut current: Vec<Phoneme> = Vec::new();
    let mut onset: Vec<Phoneme> = Vec::new();
    let mut has_nucleus = false;

    for phoneme in phonemes {
        if is_vowel(phoneme) {
            if has_nucleus {
                syllables.push(std::mem::take(&mut current));
            }
            current.append(&mut onset);
            current.push(phoneme.clone());
            has_nucleus = true;
        } else if has_nucleus {
            onset.push(phoneme.clone());
        } else {
            current.push(phoneme.clone());
        }
    }
    current.append(&mut onset);
    if !current.is_empty() {
        syllables.push(current);
    }
    syllables
}

/// Syllables rendered to IPA, one string per syllable.
pub fn ipa_syllables(mapper: &IpaMapper, phonemes: &[Phoneme]) -> Vec<String> {
    syllabify(phonemes)
        .iter()
        .map(|syllable| mapper.to_ipa(syllable))
        .collect()
}

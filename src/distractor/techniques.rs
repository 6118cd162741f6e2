// File: src/distractor/techniques.rs
//! Orthographic mispronunciation techniques.
//!
//! Each technique is a plain `fn(&str) -> Option<String>`: the same word always
//! yields the same candidate, and `None` means the technique has nothing to
//! offer for that word.

use crate::core::types::Pattern;

pub type TechniqueFn = fn(&str) -> Option<String>;

/// A named mutation.
#[derive(Clone, Copy)]
pub struct Technique {
    pub pattern: Pattern,
    pub apply: TechniqueFn,
}

/// The technique library, in its canonical order.
pub const TECHNIQUES: [Technique; 6] = [
    Technique { pattern: Pattern::StressShift, apply: stress_shift },
    Technique { pattern: Pattern::VowelSubstitution, apply: vowel_substitution },
    Technique { pattern: Pattern::ConsonantCluster, apply: consonant_cluster },
    Technique { pattern: Pattern::SchwaInsertion, apply: schwa_insertion },
    Technique { pattern: Pattern::InteriorScramble, apply: interior_scramble },
    Technique { pattern: Pattern::SilentLetter, apply: silent_letter },
];

const VOWELS: &str = "aeiou";

fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

/// Splits on vowel groups: each syllable is a consonant run plus the vowel
/// run that follows it. "beautiful" -> ["beau", "ti", "fu", "l"].
pub fn orthographic_syllables(word: &str) -> Vec<String> {
    let lower = word.to_lowercase();
    let mut syllables = Vec::new();
    let mut current = String::new();
    let mut in_vowels = false;

    for c in lower.chars() {
        if is_vowel(c) {
            in_vowels = true;
        } else if in_vowels {
            syllables.push(std::mem::take(&mut current));
            in_vowels = false;
        }
        current.push(c);
    }
    if !current.is_empty() {
        syllables.push(current);
    }
    syllables
}

/// Swaps the first pair of differing interior letters, keeping the first and
/// last letter in place. "destiny" -> "dsetiny".
pub fn interior_scramble(word: &str) -> Option<String> {
    let mut chars: Vec<char> = word.to_lowercase().chars().collect();
    if chars.len() < 4 {
        return None;
    }
    let last_interior = chars.len() - 2;
    let i = (1..last_interior).find(|&i| chars[i] != chars[i + 1])?;
    chars.swap(i, i + 1);
    Some(chars.into_iter().collect())
}

/// Repeats the second syllable, as if it carried the stress.
/// "beautiful" -> "beau ti ti fu l".
pub fn stress_shift(word: &str) -> Option<String> {
    let mut syllables = orthographic_syllables(word);
    if syllables.len() < 2 {
        let lower = word.to_lowercase();
        let chars: Vec<char> = lower.chars().collect();
        if chars.len() > 3 {
            let head: String = chars[..2].iter().collect();
            let tail: String = chars[2..].iter().collect();
            return Some(format!("{head} {head} {tail}"));
        }
        return None;
    }
    let repeated = syllables[1].clone();
    syllables.insert(1, repeated);
    Some(syllables.join(" "))
}

const VOWEL_SUBSTITUTIONS: [(&str, &str); 8] = [
    ("ea", "ay"),
    ("oo", "oe"),
    ("ou", "ow"),
    ("igh", "eye"),
    ("ai", "eye"),
    ("ei", "ee"),
    ("ie", "eye ee"),
    ("tion", "tee on"),
];

/// Swaps a vowel spelling for one that sounds different. Falls back to
/// splitting the word around its first vowel pair.
pub fn vowel_substitution(word: &str) -> Option<String> {
    let lower = word.to_lowercase();
    for (pattern, replacement) in VOWEL_SUBSTITUTIONS {
        if lower.contains(pattern) {
            return Some(lower.replacen(pattern, replacement, 1));
        }
    }

    let chars: Vec<char> = lower.chars().collect();
    let pos = chars.iter().position(|&c| is_vowel(c))?;
    let end = (pos + 2).min(chars.len());
    let head: String = chars[..pos].iter().collect();
    let nucleus: String = chars[pos..end].iter().collect();
    let tail: String = chars[end..].iter().collect();
    // Re-voice the nucleus with a schwa so the split is audible.
    Some(format!("{head} {nucleus}uh {tail}").trim().to_string())
}

const INITIAL_CLUSTERS: [&str; 16] = [
    "str", "spr", "thr", "chr", "sch", "spl", "scr", "squ", "tw", "tr", "dr", "cr", "br", "fr",
    "gr", "pr",
];

/// Breaks a consonant cluster apart with a schwa. "string" -> "suh tring".
pub fn consonant_cluster(word: &str) -> Option<String> {
    let lower = word.to_lowercase();
    for cluster in INITIAL_CLUSTERS {
        if let Some(rest) = lower.strip_prefix(cluster) {
            let (first, tail) = cluster.split_at(1);
            return Some(format!("{first}uh {tail}{rest}"));
        }
    }

    let chars: Vec<char> = lower.chars().collect();
    if chars.len() > 4 {
        let found = (0..chars.len() - 1).find(|&i| {
            chars[i].is_alphabetic()
                && chars[i + 1].is_alphabetic()
                && !is_vowel(chars[i])
                && !is_vowel(chars[i + 1])
        });
        if let Some(i) = found {
            let head: String = chars[..=i].iter().collect();
            let tail: String = chars[i + 1..].iter().collect();
            return Some(format!("{head} uh {tail}"));
        }
    }

    if lower.is_empty() {
        return None;
    }
    Some(format!("{lower} uh"))
}

/// Puts a schwa between every pair of syllables. "comfortable" ->
/// "co uh mfo uh rta uh ble"; single-syllable words get one in the middle.
pub fn schwa_insertion(word: &str) -> Option<String> {
    let syllables = orthographic_syllables(word);
    if syllables.len() >= 2 {
        return Some(syllables.join(" uh "));
    }
    let chars: Vec<char> = word.to_lowercase().chars().collect();
    if chars.len() < 2 {
        return None;
    }
    let mid = chars.len() / 2;
    let head: String = chars[..mid].iter().collect();
    let tail: String = chars[mid..].iter().collect();
    Some(format!("{head} uh {tail}"))
}

/// Voices a letter that is normally silent. "knife" -> "kuh nife".
pub fn silent_letter(word: &str) -> Option<String> {
    let lower = word.to_lowercase();
    for prefix in ["kn", "ps", "gn", "wr"] {
        if lower.starts_with(prefix) {
            let (first, rest) = lower.split_at(1);
            return Some(format!("{first}uh {rest}"));
        }
    }
    if lower.contains("mb") {
        return Some(lower.replacen("mb", "m buh", 1));
    }
    if lower.contains("gh") && !lower.ends_with("gh") {
        return Some(lower.replacen("gh", "g huh", 1));
    }
    None
}

/// Letters joined by schwas. Novel for any word of two or more letters.
pub fn letter_breakdown(word: &str) -> String {
    let letters: Vec<String> = word.to_lowercase().chars().map(String::from).collect();
    letters.join(" uh ")
}

/// The word said twice.
pub fn repetition(word: &str) -> String {
    let lower = word.to_lowercase();
    format!("{lower} {lower}")
}

/// The word followed by `n` trailing schwas. Distinct for every `n`.
pub fn marker_phrase(word: &str, n: usize) -> String {
    let mut text = word.to_lowercase();
    for _ in 0..n {
        text.push_str(" uh");
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize::option_key;

    #[test]
    fn syllables_follow_vowel_groups() {
        assert_eq!(orthographic_syllables("beautiful"), vec!["beau", "ti", "fu", "l"]);
        assert_eq!(orthographic_syllables("cat"), vec!["ca", "t"]);
        assert_eq!(orthographic_syllables("rhythm"), vec!["rhythm"]);
        assert!(orthographic_syllables("").is_empty());
    }

    #[test]
    fn scramble_keeps_edges() {
        assert_eq!(interior_scramble("destiny").as_deref(), Some("dsetiny"));
        assert_eq!(interior_scramble("boot").as_deref(), None);
        assert_eq!(interior_scramble("cat"), None);
    }

    #[test]
    fn stress_shift_repeats_second_syllable() {
        assert_eq!(stress_shift("beautiful").as_deref(), Some("beau ti ti fu l"));
        assert_eq!(stress_shift("go"), None);
    }

    #[test]
    fn vowel_substitution_uses_table_then_split() {
        assert_eq!(vowel_substitution("bread").as_deref(), Some("brayd"));
        assert_eq!(vowel_substitution("nation").as_deref(), Some("natee on"));
        assert_eq!(vowel_substitution("cat").as_deref(), Some("c atuh"));
        assert_eq!(vowel_substitution("rhythm"), None);
    }

    #[test]
    fn cluster_break() {
        assert_eq!(consonant_cluster("string").as_deref(), Some("suh tring"));
        assert_eq!(consonant_cluster("basket").as_deref(), Some("bas uh ket"));
        assert_eq!(consonant_cluster("go").as_deref(), Some("go uh"));
    }

    #[test]
    fn silent_letters_are_voiced() {
        assert_eq!(silent_letter("knife").as_deref(), Some("kuh nife"));
        assert_eq!(silent_letter("lamb").as_deref(), Some("lam buh"));
        assert_eq!(silent_letter("night").as_deref(), Some("nig huht"));
        assert_eq!(silent_letter("cat"), None);
    }

    #[test]
    fn every_applicable_technique_changes_the_word() {
        for word in ["beautiful", "string", "knife", "comfortable", "said", "cat", "hello"] {
            for technique in TECHNIQUES {
                if let Some(candidate) = (technique.apply)(word) {
                    assert_ne!(
                        option_key(&candidate),
                        option_key(word),
                        "{} on {word}",
                        technique.pattern
                    );
                }
            }
        }
    }

    #[test]
    fn fallbacks_are_novel() {
        assert_ne!(option_key(&letter_breakdown("at")), "at");
        assert_ne!(option_key(&repetition("a")), "a");
        assert_ne!(option_key(&marker_phrase("a", 1)), option_key(&marker_phrase("a", 2)));
        assert_eq!(marker_phrase("", 1), "uh");
    }
}

// src/core/normalize.rs

fn is_core_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\'' || c == '-'
}

/// Word-bank key for `word`: lowercased, trimmed, with leading and trailing
/// punctuation removed. Interior hyphens and apostrophes survive.
pub fn normalize(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .trim_matches(|c: char| !is_core_char(c))
        .to_string()
}

/// Comparison key for spoken option texts. Ignores case, whitespace and
/// punctuation other than apostrophes.
pub fn option_key(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'')
        .flat_map(char::to_lowercase)
        .collect()
}

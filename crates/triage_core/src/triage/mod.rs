//! Rule-based symptom triage.
//!
//! # Responsibility
//! - Route free text to a department via keyword tables.
//! - Extract symptoms, severity, urgency and related cues from free text.
//! - Score risk from the extracted cues.
//!
//! # Invariants
//! - All matching runs on `normalize_text` output (lowercase, straight
//!   apostrophes) with plain substring semantics.
//! - Every function here is pure; no I/O and no logging of input text.

pub mod analysis;
pub mod diagnosis;
pub mod matcher;
pub mod risk;

/// Lowercases text and folds typographic apostrophes so `can’t` matches
/// `can't` in the keyword tables.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

/// Returns whether any keyword is a substring of already-normalized text.
pub(crate) fn contains_any(normalized: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| normalized.contains(keyword))
}

/// Strips everything except ASCII word characters, mirroring a `\W` filter.
pub(crate) fn strip_non_word(token: &str) -> String {
    token
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{contains_any, normalize_text, strip_non_word};

    #[test]
    fn normalize_folds_case_and_curly_apostrophes() {
        assert_eq!(normalize_text("I Can\u{2019}t Breathe"), "i can't breathe");
    }

    #[test]
    fn contains_any_uses_substring_semantics() {
        assert!(contains_any("i will be fine", &["ill"]));
        assert!(!contains_any("all good", &["pain", "ache"]));
    }

    #[test]
    fn strip_non_word_keeps_ascii_word_chars() {
        assert_eq!(strip_non_word("worse!!"), "worse");
        assert_eq!(strip_non_word("(ill)"), "ill");
        assert_eq!(strip_non_word("can't"), "cant");
    }
}

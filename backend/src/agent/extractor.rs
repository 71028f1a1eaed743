//! Resume Field Extractor
//!
//! Pure pattern matching over raw resume text. Every function here is
//! total: arbitrary input (including empty text) produces a value, and a
//! field that cannot be found falls back to its default instead of failing.

use super::types::{ResumeRecord, UNKNOWN_NAME};
use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================
// PATTERN TABLES
// ============================================================

/// Known skills, in the order they are reported
pub const SKILL_VOCABULARY: &[&str] = &[
    "JavaScript",
    "React",
    "Python",
    "SQL",
    "Java",
    "C++",
    "AWS",
    "Azure",
];

/// Two capitalized words at the very start of the text
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Za-z]*[ \t]+[A-Z][A-Za-z]*").expect("name pattern is valid")
});

/// ASCII-only: word boundaries and letter classes ignore non-ASCII text
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b").expect("email pattern is valid")
});

/// `<N>` optionally followed by `+`, then `year(s)` or `yr(s)`
static EXPERIENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]+)\+?\s*(?:years?|yrs?)").expect("experience pattern is valid")
});

// ============================================================
// FIELD EXTRACTION
// ============================================================

/// Leading "First Last" of the text, or [`UNKNOWN_NAME`]
pub fn extract_name(text: &str) -> String {
    NAME_PATTERN
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

/// First email-shaped substring, or an empty string
pub fn extract_email(text: &str) -> String {
    EMAIL_PATTERN
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Number from the first "<N> years" / "<N>+ yrs" occurrence, or 0.
///
/// A number that does not fit in a `u32` counts as no match.
pub fn extract_experience_years(text: &str) -> u32 {
    EXPERIENCE_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Vocabulary entries mentioned anywhere in the text (case-insensitive)
pub fn extract_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}

/// Run all four extractors over the same text
pub fn extract_record(text: &str) -> ResumeRecord {
    ResumeRecord {
        name: extract_name(text),
        email: extract_email(text),
        experience_years: extract_experience_years(text),
        skills: extract_skills(text),
    }
}

//! Job Application Agent Types
//!
//! Core data structures shared by the extractor, storage and orchestrator.

use serde::{Deserialize, Serialize};

/// Placeholder name used when no leading two-word name is found
pub const UNKNOWN_NAME: &str = "Unknown";

// ============================================================
// RESUME RECORD
// ============================================================

/// Fields extracted from a resume.
///
/// Every field is derived from the source text alone; there is no
/// cross-field dependency and no identity beyond "the current record".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    /// Empty when no email address was found
    pub email: String,
    /// Stored under `experience` to match the persisted layout
    #[serde(rename = "experience")]
    pub experience_years: u32,
    /// Subset of the skill vocabulary, in vocabulary order
    pub skills: Vec<String>,
}

impl ResumeRecord {
    pub fn new(name: &str, email: &str, experience_years: u32, skills: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            experience_years,
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for ResumeRecord {
    fn default() -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            email: String::new(),
            experience_years: 0,
            skills: Vec::new(),
        }
    }
}

// ============================================================
// STATUS MESSAGE
// ============================================================

/// Outcome banner shown after the latest agent action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMessage {
    Parsed,
    Submitted,
    SubmitFailed,
}

impl StatusMessage {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusMessage::Parsed => "Resume parsed successfully!",
            StatusMessage::Submitted => "Application submitted successfully!",
            StatusMessage::SubmitFailed => "Error submitting application",
        }
    }

    /// Failures are shown with a different banner style
    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::SubmitFailed)
    }
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

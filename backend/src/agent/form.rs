//! Form Display
//!
//! Read-only view of the extracted record plus the submit control.

use super::types::ResumeRecord;
use serde::{Deserialize, Serialize};

pub const SUBMIT_LABEL: &str = "Submit Application";
pub const SUBMITTING_LABEL: &str = "Submitting...";

/// One labelled line of the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub label: String,
    pub value: String,
}

impl FormField {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// What the page renders for the current record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormView {
    pub fields: Vec<FormField>,
    pub submit_label: String,
    pub submit_disabled: bool,
}

impl FormView {
    pub fn new(record: &ResumeRecord, is_processing: bool) -> Self {
        let fields = vec![
            FormField::new("Name", record.name.clone()),
            FormField::new("Email", record.email.clone()),
            FormField::new("Experience", format!("{} years", record.experience_years)),
            FormField::new("Skills", record.skills.join(", ")),
        ];

        let submit_label = if is_processing {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        };

        Self {
            fields,
            submit_label: submit_label.to_string(),
            submit_disabled: is_processing,
        }
    }

    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

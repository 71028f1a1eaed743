//! Resume Uploader
//!
//! Turns a picked or dropped file into a [`ResumeRecord`]. Only the first
//! file is used; anything that does not decode as text is dropped silently.

use super::extractor::extract_record;
use super::types::ResumeRecord;
use encoding_rs::{Encoding, UTF_8};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Extensions offered by the file picker. Advisory only: content is never
/// checked against this list.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to read resume file: {0}")]
    Io(#[from] std::io::Error),
}

/// How the file reached the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadSource {
    #[default]
    Picker,
    Drop,
}

/// A file handed to the uploader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.to_string(),
            bytes: bytes.into(),
        }
    }

    /// Lowercased extension of the file name, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }
}

/// Value for the picker's `accept` attribute
pub fn accept_attribute() -> String {
    ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn is_advertised_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode file content as text.
///
/// A byte-order mark selects the encoding; without one the content must be
/// valid UTF-8. Malformed input yields `None` rather than replacement chars.
pub fn decode_text(bytes: &[u8]) -> Option<String> {
    let (encoding, bom_len): (&'static Encoding, usize) =
        Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));

    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .map(|text| text.into_owned())
}

/// Read the file as text and extract its record
pub fn process_file(file: &ResumeFile) -> Option<ResumeRecord> {
    if !is_advertised_extension(&file.name) {
        warn!(
            "{} is not one of the offered file types ({}); processing anyway",
            file.name,
            accept_attribute()
        );
    }

    match decode_text(&file.bytes) {
        Some(text) => {
            let record = extract_record(&text);
            info!(
                "Parsed {} ({} bytes): {} skills, {} years",
                file.name,
                file.bytes.len(),
                record.skills.len(),
                record.experience_years
            );
            Some(record)
        }
        None => {
            debug!("Ignoring {}: content is not text", file.name);
            None
        }
    }
}

/// Process the first of the supplied files; extras are ignored
pub fn process_files(files: &[ResumeFile], source: UploadSource) -> Option<ResumeRecord> {
    let Some(first) = files.first() else {
        debug!("No file supplied via {:?}", source);
        return None;
    };

    if files.len() > 1 {
        debug!(
            "{} files supplied via {:?}; using {} only",
            files.len(),
            source,
            first.name
        );
    }

    process_file(first)
}

/// Load a resume file from disk
pub async fn read_resume_file<P: AsRef<Path>>(path: P) -> Result<ResumeFile, UploadError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(ResumeFile { name, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    const JANE: &str = "Jane Doe\njane@x.com\n3 years experience with React and Python";

    #[test]
    fn test_accept_attribute() {
        assert_eq!(accept_attribute(), ".pdf,.doc,.docx,.txt");
    }

    #[test]
    fn test_advertised_extension() {
        assert!(is_advertised_extension("resume.txt"));
        assert!(is_advertised_extension("Resume.PDF"));
        assert!(is_advertised_extension("cv.docx"));
        assert!(!is_advertised_extension("resume.md"));
        assert!(!is_advertised_extension("resume"));
    }

    #[test]
    fn test_extension_filter_is_advisory() {
        let file = ResumeFile::new("resume.md", JANE);
        let record = process_file(&file).unwrap();
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(file.extension().as_deref(), Some("md"));
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text(b"plain").as_deref(), Some("plain"));
        assert_eq!(decode_text(b"\xEF\xBB\xBFwith bom").as_deref(), Some("with bom"));
        assert_eq!(decode_text(b"\xFF\xFEh\x00i\x00").as_deref(), Some("hi"));
        assert_eq!(decode_text(b"").as_deref(), Some(""));
        assert_eq!(decode_text(&[0x80, 0x81, 0xC3]), None);
    }

    #[test]
    fn test_process_file_rejects_binary() {
        let file = ResumeFile::new("resume.pdf", vec![0x25u8, 0x50, 0x44, 0x46, 0xE2, 0xE3, 0xCF, 0xD3]);
        assert_eq!(process_file(&file), None);
    }

    #[test]
    fn test_process_files_empty() {
        assert_eq!(process_files(&[], UploadSource::Drop), None);
    }

    #[test]
    fn test_process_files_uses_first_only() {
        let files = vec![
            ResumeFile::new("jane.txt", JANE),
            ResumeFile::new("john.txt", "John Smith\njohn@y.org\n9 years SQL"),
        ];

        let record = process_files(&files, UploadSource::Drop).unwrap();
        assert_eq!(record, ResumeRecord::new("Jane Doe", "jane@x.com", 3, &["React", "Python"]));

        let record = process_files(&files, UploadSource::Picker).unwrap();
        assert_eq!(record.name, "Jane Doe");
    }

    #[test]
    fn test_process_files_first_unreadable_does_not_fall_through() {
        let files = vec![
            ResumeFile::new("broken.txt", vec![0xC3u8, 0x28]),
            ResumeFile::new("jane.txt", JANE),
        ];
        assert_eq!(process_files(&files, UploadSource::Drop), None);
    }

    #[tokio::test]
    async fn test_read_resume_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jane.txt");
        std::fs::write(&path, JANE).unwrap();

        let file = read_resume_file(&path).await.unwrap();
        assert_eq!(file.name, "jane.txt");
        assert_eq!(file.bytes, JANE.as_bytes());
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_resume_file(dir.path().join("missing.txt")).await;
        assert!(matches!(result, Err(UploadError::Io(_))));
    }
}

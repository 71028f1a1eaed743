//! Agent Module - Core of the Job Application Agent
//!
//! Data flows one way:
//! file bytes → text → extractor → record → agent state → form view → submit → status.
//!
//! Architecture:
//! - Extractor: pure pattern-matching over resume text
//! - Storage: save/load/clear of the single record slot
//! - Uploader: first-file selection and text decoding
//! - Form: read-only view of the current record
//! - Orchestrator: state machine and simulated submission

pub mod extractor;
pub mod form;
pub mod orchestrator;
pub mod storage;
pub mod types;
pub mod uploader;

pub use extractor::*;
pub use form::*;
pub use orchestrator::*;
pub use storage::*;
pub use types::*;
pub use uploader::*;

//! Job Application Agent
//!
//! Drop in a resume, get the fields that matter pulled out of it:
//! - Extractor: name, email, years of experience, known skills
//! - Storage: a single persisted record slot
//! - Agent: Idle → Reviewing → Submitting → Reviewing
//! - API: the single page and its actions

pub mod agent;
pub mod api;
pub mod config;

pub use agent::*;
pub use config::AgentConfig;

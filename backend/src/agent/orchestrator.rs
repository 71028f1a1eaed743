//! Agent Orchestrator
//!
//! Holds the page state (current record, processing flag, status banner)
//! and advances it through an explicit transition function:
//!
//! ```text
//! Idle --record--> Reviewing --submit--> Submitting --done/failed--> Reviewing
//! ```
//!
//! Submission goes through the [`Submitter`] trait. The default
//! [`SimulatedSubmitter`] only waits and always succeeds.

use super::form::FormView;
use super::storage::{ResumeStorage, StorageResult};
use super::types::{ResumeRecord, StatusMessage};
use super::uploader::{process_files, ResumeFile, UploadSource};
use crate::config::AgentConfig;
use async_trait::async_trait;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

// ============================================================
// STATE MACHINE
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentPhase {
    Idle,
    Reviewing,
    Submitting,
}

/// Plain page state owned by the agent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentState {
    pub record: Option<ResumeRecord>,
    pub is_processing: bool,
    pub status: Option<StatusMessage>,
}

impl AgentState {
    /// State restored from a persisted record: reviewing, no banner
    pub fn restored(record: ResumeRecord) -> Self {
        Self {
            record: Some(record),
            is_processing: false,
            status: None,
        }
    }

    pub fn phase(&self) -> AgentPhase {
        match (&self.record, self.is_processing) {
            (None, _) => AgentPhase::Idle,
            (Some(_), false) => AgentPhase::Reviewing,
            (Some(_), true) => AgentPhase::Submitting,
        }
    }

    /// Form for the current record; hidden while idle
    pub fn form(&self) -> Option<FormView> {
        self.record
            .as_ref()
            .map(|record| FormView::new(record, self.is_processing))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    RecordReceived(ResumeRecord),
    SubmitRequested,
    SubmissionCompleted,
    SubmissionFailed,
    Cleared,
}

/// Apply one event. Events that do not fit the current phase leave the
/// state untouched.
pub fn transition(state: AgentState, event: AgentEvent) -> AgentState {
    let phase = state.phase();

    match event {
        AgentEvent::RecordReceived(record) => AgentState {
            record: Some(record),
            status: Some(StatusMessage::Parsed),
            ..state
        },
        AgentEvent::SubmitRequested if phase == AgentPhase::Reviewing => AgentState {
            is_processing: true,
            ..state
        },
        AgentEvent::SubmissionCompleted if phase == AgentPhase::Submitting => AgentState {
            is_processing: false,
            status: Some(StatusMessage::Submitted),
            ..state
        },
        AgentEvent::SubmissionFailed if phase == AgentPhase::Submitting => AgentState {
            is_processing: false,
            status: Some(StatusMessage::SubmitFailed),
            ..state
        },
        AgentEvent::Cleared if phase != AgentPhase::Submitting => AgentState::default(),
        _ => state,
    }
}

// ============================================================
// SUBMISSION
// ============================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Application rejected: {0}")]
    Rejected(String),

    #[error("Submission transport failed: {0}")]
    Transport(String),
}

/// Sends an application for a record
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, record: &ResumeRecord) -> Result<(), SubmissionError>;
}

/// Waits a fixed delay, then reports success
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, record: &ResumeRecord) -> Result<(), SubmissionError> {
        tokio::time::sleep(self.delay).await;
        info!("Simulated application submitted for {}", record.name);
        Ok(())
    }
}

// ============================================================
// SNAPSHOT
// ============================================================

/// Serializable view of the agent for the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub phase: AgentPhase,
    pub record: Option<ResumeRecord>,
    pub is_processing: bool,
    pub status: Option<String>,
    pub status_is_error: bool,
    pub form: Option<FormView>,
}

impl From<&AgentState> for AgentSnapshot {
    fn from(state: &AgentState) -> Self {
        Self {
            phase: state.phase(),
            record: state.record.clone(),
            is_processing: state.is_processing,
            status: state.status.map(|s| s.as_str().to_string()),
            status_is_error: state.status.map(|s| s.is_error()).unwrap_or(false),
            form: state.form(),
        }
    }
}

// ============================================================
// AGENT
// ============================================================

/// Wires uploader → state → submitter and keeps the stored slot in sync
#[derive(Clone)]
pub struct Agent {
    state: Arc<Mutex<AgentState>>,
    storage: ResumeStorage,
    submitter: Arc<dyn Submitter>,
    persist_on_parse: bool,
}

impl Agent {
    /// Create an agent, restoring the stored record if there is one
    pub fn new(storage: ResumeStorage, submitter: Arc<dyn Submitter>) -> Self {
        let state = match storage.load() {
            Some(record) => {
                info!("Restored stored resume record for {}", record.name);
                AgentState::restored(record)
            }
            None => AgentState::default(),
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            storage,
            submitter,
            persist_on_parse: true,
        }
    }

    pub fn from_config(config: &AgentConfig) -> StorageResult<Self> {
        let storage = match &config.db_path {
            Some(path) => ResumeStorage::open(path)?,
            None => ResumeStorage::in_memory()?,
        };
        let submitter = Arc::new(SimulatedSubmitter::new(config.submit_delay));

        Ok(Self::new(storage, submitter).with_persist_on_parse(config.persist_on_parse))
    }

    pub fn with_persist_on_parse(mut self, persist: bool) -> Self {
        self.persist_on_parse = persist;
        self
    }

    fn lock(&self) -> MutexGuard<'_, AgentState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn apply(&self, event: AgentEvent) -> AgentState {
        let mut state = self.lock();
        *state = transition(state.clone(), event);
        state.clone()
    }

    pub fn state(&self) -> AgentState {
        self.lock().clone()
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot::from(&self.state())
    }

    pub fn phase(&self) -> AgentPhase {
        self.lock().phase()
    }

    /// Uploader callback: take the new record as current.
    ///
    /// The slot is written under the state lock so it never disagrees
    /// with the in-memory record.
    pub fn receive_record(&self, record: ResumeRecord) -> AgentState {
        let mut state = self.lock();
        if self.persist_on_parse {
            if let Err(e) = self.storage.save(&record) {
                error!("Failed to persist resume record: {}", e);
            }
        }
        *state = transition(state.clone(), AgentEvent::RecordReceived(record));
        state.clone()
    }

    /// Process picked or dropped files. No usable file leaves the state as is.
    pub fn upload(&self, files: &[ResumeFile], source: UploadSource) -> AgentState {
        match process_files(files, source) {
            Some(record) => self.receive_record(record),
            None => self.state(),
        }
    }

    /// Enter `Submitting` if reviewing; returns the record to send
    fn begin_submit(&self) -> Option<ResumeRecord> {
        let mut state = self.lock();
        if state.phase() != AgentPhase::Reviewing {
            warn!("Submit ignored while {:?}", state.phase());
            return None;
        }
        *state = transition(state.clone(), AgentEvent::SubmitRequested);
        state.record.clone()
    }

    async fn run_submission(&self, record: ResumeRecord) -> AgentState {
        info!("Submitting application for {}", record.name);
        match self.submitter.submit(&record).await {
            Ok(()) => self.apply(AgentEvent::SubmissionCompleted),
            Err(e) => {
                warn!("Application submission failed: {}", e);
                self.apply(AgentEvent::SubmissionFailed)
            }
        }
    }

    /// Submit and wait for the outcome
    pub async fn submit(&self) -> AgentState {
        match self.begin_submit() {
            Some(record) => self.run_submission(record).await,
            None => self.state(),
        }
    }

    /// Submit in the background; returns the `Submitting` state right away
    pub fn start_submit(&self) -> AgentState {
        if let Some(record) = self.begin_submit() {
            let agent = self.clone();
            tokio::spawn(async move {
                agent.run_submission(record).await;
            });
        }
        self.state()
    }

    /// Drop the current record and empty the stored slot
    pub fn clear(&self) -> StorageResult<AgentState> {
        let mut state = self.lock();
        if state.phase() == AgentPhase::Submitting {
            warn!("Clear ignored while a submission is in flight");
            return Ok(state.clone());
        }
        self.storage.clear()?;
        *state = transition(state.clone(), AgentEvent::Cleared);
        Ok(state.clone())
    }
}

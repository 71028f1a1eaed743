//! Resume Storage Module
//!
//! Persists the single current resume record in a process-local
//! key-value store. The store is SQLite-backed: in-memory by default,
//! file-backed when a path is configured.

use super::types::ResumeRecord;
use log::{debug, info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Key of the slot holding the current record
pub const RESUME_SLOT_KEY: &str = "resumeData";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

// ============================================================
// KEY-VALUE STORE (SQLite-backed)
// ============================================================

/// String key-value store, one row per key
#[derive(Clone)]
pub struct KeyValueStore {
    conn: Arc<Mutex<Connection>>,
}

impl KeyValueStore {
    /// Open (or create) a file-backed store
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        debug!("Opened key-value store at {}", path.as_ref().display());
        Self::with_connection(conn)
    }

    /// Create a store that lives only as long as the process
    pub fn in_memory() -> StorageResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.lock();
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or replace the value under `key`
    pub fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove `key`; removing a missing key is a no-op
    pub fn remove(&self, key: &str) -> StorageResult<()> {
        let conn = self.lock();
        conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
        Ok(())
    }
}

// ============================================================
// RESUME STORAGE
// ============================================================

/// Save/load/clear of the resume slot
#[derive(Clone)]
pub struct ResumeStorage {
    store: KeyValueStore,
}

impl ResumeStorage {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    pub fn in_memory() -> StorageResult<Self> {
        Ok(Self::new(KeyValueStore::in_memory()?))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Ok(Self::new(KeyValueStore::open(path)?))
    }

    /// Serialize the record into the slot, replacing any previous one
    pub fn save(&self, record: &ResumeRecord) -> StorageResult<()> {
        let json = serde_json::to_string(record)?;
        self.store.set(RESUME_SLOT_KEY, &json)?;
        info!("Saved resume record for {}", record.name);
        Ok(())
    }

    /// The stored record, or `None` if the slot is empty or unreadable
    pub fn load(&self) -> Option<ResumeRecord> {
        let raw = match self.store.get(RESUME_SLOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read resume slot: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Stored resume record is not readable: {}", e);
                None
            }
        }
    }

    /// Empty the slot; idempotent
    pub fn clear(&self) -> StorageResult<()> {
        self.store.remove(RESUME_SLOT_KEY)?;
        info!("Cleared stored resume record");
        Ok(())
    }
}

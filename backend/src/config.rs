//! Runtime configuration
//!
//! Defaults suit a local single-user session; every value can be
//! overridden from the environment.

use log::warn;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub host: String,
    pub port: u16,
    /// File for the resume slot; `None` keeps it in memory
    pub db_path: Option<PathBuf>,
    /// Simulated submission delay
    pub submit_delay: Duration,
    /// Save each parsed record into the slot
    pub persist_on_parse: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            db_path: None,
            submit_delay: Duration::from_millis(2000),
            persist_on_parse: true,
        }
    }
}

impl AgentConfig {
    /// Read `HOST`, `PORT`, `RESUME_DB_PATH`, `SUBMIT_DELAY_MS` and
    /// `PERSIST_ON_PARSE` from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values keep their default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let delay_ms = parse_or(
            &lookup,
            "SUBMIT_DELAY_MS",
            defaults.submit_delay.as_millis() as u64,
        );

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            db_path: lookup("RESUME_DB_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            submit_delay: Duration::from_millis(delay_ms),
            persist_on_parse: parse_or(&lookup, "PERSIST_ON_PARSE", defaults.persist_on_parse),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Debug,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {}={:?}, using {:?}", key, raw, default);
            default
        }),
        None => default,
    }
}

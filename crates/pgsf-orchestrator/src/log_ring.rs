//! Structured NDJSON log ring.
//!
//! Every run keeps its own append-only ring of [`LogEvent`]s, flushed
//! to `run_log.ndjson` on finalize. This is a first-class run artifact
//! and distinct from the `log` crate facade the rest of the engine
//! uses for process-local diagnostics (spec SPEC_FULL.md ambient
//! stack section) -- events pushed here also go through the facade,
//! but the reverse isn't true.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use pgsf_core::redact::redact;
use pgsf_core::PgsfResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub ts: chrono::DateTime<chrono::Utc>,
    pub run_id: Uuid,
    pub level: LogLevel,
    pub category: String,
    pub message: String,
    #[serde(flatten)]
    pub kv: HashMap<String, Value>,
}

pub struct LogRing {
    run_id: Uuid,
    events: Mutex<Vec<LogEvent>>,
}

impl LogRing {
    pub fn new(run_id: Uuid) -> Self {
        LogRing {
            run_id,
            events: Mutex::new(Vec::new()),
        }
    }

    fn push(&self, level: LogLevel, category: &str, message: &str, kv: HashMap<String, Value>) {
        let redacted_message = redact(message);
        match level {
            LogLevel::Debug => log::debug!("[{category}] {redacted_message}"),
            LogLevel::Info => log::info!("[{category}] {redacted_message}"),
            LogLevel::Warning => log::warn!("[{category}] {redacted_message}"),
            LogLevel::Error => log::error!("[{category}] {redacted_message}"),
        }
        let event = LogEvent {
            ts: chrono::Utc::now(),
            run_id: self.run_id,
            level,
            category: category.to_string(),
            message: redacted_message,
            kv,
        };
        self.events.lock().unwrap().push(event);
    }

    pub fn debug(&self, category: &str, message: &str) {
        self.push(LogLevel::Debug, category, message, HashMap::new());
    }

    pub fn info(&self, category: &str, message: &str) {
        self.push(LogLevel::Info, category, message, HashMap::new());
    }

    pub fn warn(&self, category: &str, message: &str) {
        self.push(LogLevel::Warning, category, message, HashMap::new());
    }

    pub fn error(&self, category: &str, message: &str) {
        self.push(LogLevel::Error, category, message, HashMap::new());
    }

    pub fn snapshot(&self) -> Vec<LogEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Append every buffered event to `path` as one JSON object per
    /// line. Called once, on finalize.
    pub fn flush_ndjson(&self, path: &Path) -> PgsfResult<()> {
        let events = self.events.lock().unwrap();
        let mut out = String::new();
        for event in events.iter() {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        std::fs::write(path, out)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "log_ring_test.rs"]
mod tests;

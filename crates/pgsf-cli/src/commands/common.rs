//! Shared helpers for command implementations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use pgsf_core::config::MigrationRequest;

/// A structured, non-error exit (e.g. "awaiting confirmation"): carried
/// through `main` via `anyhow::Error::downcast_ref` instead of printing
/// a misleading "Error: ..." line for a non-failure outcome.
pub struct ExitCode(pub i32);

impl std::fmt::Debug for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "exit({})", self.0)
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "exit({})", self.0)
    }
}

impl std::error::Error for ExitCode {}

/// Load a `MigrationRequest` from a YAML or JSON file, dispatching on
/// the file extension.
pub fn load_request(path: &str) -> Result<MigrationRequest> {
    let path = PathBuf::from(path);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config file {}", path.display()))?;

    let request = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => MigrationRequest::from_json(&text),
        _ => MigrationRequest::from_yaml(&text),
    };

    request.with_context(|| format!("parsing config file {}", path.display()))
}

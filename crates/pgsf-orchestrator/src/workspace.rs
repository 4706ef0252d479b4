//! Per-run workspace.
//!
//! A run gets one directory tree: `<root>/<run_id>/artifacts` for the
//! nine named artifacts, and `<root>/<run_id>/scratch` for extractor
//! chunk files. Both are created at orchestrator construction and
//! retained on terminal states; deletion only happens on an explicit
//! `delete` request.

use std::path::{Path, PathBuf};

use pgsf_core::PgsfResult;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RunWorkspace {
    pub run_id: Uuid,
    pub root: PathBuf,
    pub artifacts_dir: PathBuf,
    pub scratch_dir: PathBuf,
}

impl RunWorkspace {
    /// Create the workspace directories for `run_id` under `base`.
    pub fn create(base: &Path, run_id: Uuid) -> PgsfResult<Self> {
        let root = base.join(run_id.to_string());
        let artifacts_dir = root.join("artifacts");
        let scratch_dir = root.join("scratch");
        std::fs::create_dir_all(&artifacts_dir)?;
        std::fs::create_dir_all(&scratch_dir)?;
        Ok(RunWorkspace {
            run_id,
            root,
            artifacts_dir,
            scratch_dir,
        })
    }

    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.artifacts_dir.join(name)
    }

    /// Remove the entire workspace tree. Callers MUST only do this
    /// once the run has reached a terminal phase: `delete` is
    /// permitted only when state is COMPLETED/FAILED/CANCELLED.
    pub fn delete(&self) -> PgsfResult<()> {
        if self.root.exists() {
            std::fs::remove_dir_all(&self.root)?;
        }
        Ok(())
    }

    pub fn list_artifacts(&self) -> PgsfResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.artifacts_dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn read_artifact(&self, name: &str) -> PgsfResult<String> {
        Ok(std::fs::read_to_string(self.artifact_path(name))?)
    }
}

#[cfg(test)]
#[path = "workspace_test.rs"]
mod tests;

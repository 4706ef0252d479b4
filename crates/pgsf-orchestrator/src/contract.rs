//! Operational surface contract.
//!
//! This is the boundary the out-of-scope HTTP/MCP wrapper is built
//! against. Nothing in this crate implements HTTP, background tasks,
//! or auth; [`RunRegistry`] is the one in-process implementation,
//! sufficient to drive the contract from a synchronous CLI or a test.

use std::sync::Arc;

use pgsf_core::run_store::{InMemoryRunStore, RunStore};
use pgsf_core::{PgsfError, PgsfResult};
use uuid::Uuid;

use crate::orchestrator::Orchestrator;
use crate::Progress;

/// The contract a thin external surface (HTTP handler, MCP tool,
/// background worker) is built against. §6 names five operations;
/// this trait is their Rust shape.
pub trait MigrationEngineContract {
    fn start_migration(&self, orchestrator: Orchestrator) -> Uuid;
    fn get_progress(&self, run_id: Uuid) -> Option<Progress>;
    fn cancel(&self, run_id: Uuid);
    fn delete(&self, run_id: Uuid) -> PgsfResult<()>;
    fn list_artifacts(&self, run_id: Uuid) -> PgsfResult<Vec<String>>;
    fn read_artifact(&self, run_id: Uuid, name: &str) -> PgsfResult<String>;
}

/// Process-wide `run_id -> Orchestrator` registry, modeled as an
/// injected run store rather than a bare global singleton.
#[derive(Default)]
pub struct RunRegistry {
    store: InMemoryRunStore<Arc<Orchestrator>>,
}

impl RunRegistry {
    pub fn new() -> Self {
        RunRegistry::default()
    }

    /// Fetch the shared handle for a registered run, so a caller (the
    /// CLI, a test) can drive [`Orchestrator::run`] after registering
    /// it. Not part of [`MigrationEngineContract`]: that trait only
    /// exposes the five read/control operations an external surface
    /// needs, not the ability to drive the phase machine directly.
    pub fn get(&self, run_id: Uuid) -> Option<Arc<Orchestrator>> {
        self.store.get(&run_id)
    }
}

impl MigrationEngineContract for RunRegistry {
    fn start_migration(&self, orchestrator: Orchestrator) -> Uuid {
        let run_id = orchestrator.run_id();
        self.store.put(run_id, Arc::new(orchestrator));
        run_id
    }

    fn get_progress(&self, run_id: Uuid) -> Option<Progress> {
        self.store.get(&run_id).map(|o| o.progress())
    }

    fn cancel(&self, run_id: Uuid) {
        if let Some(o) = self.store.get(&run_id) {
            o.request_cancel();
        }
    }

    fn delete(&self, run_id: Uuid) -> PgsfResult<()> {
        let orchestrator = self
            .store
            .get(&run_id)
            .ok_or_else(|| PgsfError::Config(format!("unknown run {run_id}")))?;
        if !orchestrator.progress().phase.is_terminal() {
            return Err(PgsfError::Config(format!(
                "run {run_id} is not in a terminal state; refusing to delete"
            )));
        }
        orchestrator.workspace().delete()?;
        self.store.remove(&run_id);
        Ok(())
    }

    fn list_artifacts(&self, run_id: Uuid) -> PgsfResult<Vec<String>> {
        let orchestrator = self
            .store
            .get(&run_id)
            .ok_or_else(|| PgsfError::Config(format!("unknown run {run_id}")))?;
        orchestrator.workspace().list_artifacts()
    }

    fn read_artifact(&self, run_id: Uuid, name: &str) -> PgsfResult<String> {
        let orchestrator = self
            .store
            .get(&run_id)
            .ok_or_else(|| PgsfError::Config(format!("unknown run {run_id}")))?;
        orchestrator.workspace().read_artifact(name)
    }
}

#[cfg(test)]
#[path = "contract_test.rs"]
mod tests;

//! Phase state machine, run workspace, structured log ring, artifact
//! rendering, and operational-surface contract for the migration
//! engine.
//!
//! This crate wires together every domain crate
//! (`pgsf-introspect`/`pgsf-mapper`/`pgsf-emitter`/`pgsf-extract`/
//! `pgsf-load`/`pgsf-validate`) into the one end-to-end run driver.

pub mod artifacts;
pub mod contract;
pub mod log_ring;
pub mod orchestrator;
pub mod workspace;

pub use contract::{MigrationEngineContract, RunRegistry};
pub use log_ring::{LogEvent, LogLevel, LogRing};
pub use orchestrator::{Orchestrator, RunOutcome};
pub use pgsf_core::phase::{Phase, Progress, TableProgress, TableProgressState};
pub use workspace::RunWorkspace;

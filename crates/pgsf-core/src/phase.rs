//! Orchestrator phase state machine.
//!
//! ```text
//! PENDING → ANALYZING → PLANNING → AWAITING_CONFIRMATION
//!                                          │  (confirm=true, dry_run=false)
//!                                          ▼
//!                                      EXECUTING → VALIDATING → COMPLETED
//!                  any phase → FAILED | CANCELLED
//! ```
//!
//! `COMPLETED`, `FAILED`, and `CANCELLED` are absorbing: once entered,
//! no further transition is permitted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Pending,
    Analyzing,
    Planning,
    AwaitingConfirmation,
    Executing,
    Validating,
    Completed,
    Failed,
    Cancelled,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Completed | Phase::Failed | Phase::Cancelled)
    }

    /// Whether `self -> next` is a permitted transition. Terminal
    /// phases never transition; `Failed`/`Cancelled` are reachable
    /// from any non-terminal phase; the happy path only moves
    /// forward one step at a time.
    pub fn can_transition_to(self, next: Phase) -> bool {
        if self.is_terminal() {
            return false;
        }
        if matches!(next, Phase::Failed | Phase::Cancelled) {
            return true;
        }
        matches!(
            (self, next),
            (Phase::Pending, Phase::Analyzing)
                | (Phase::Analyzing, Phase::Planning)
                | (Phase::Planning, Phase::AwaitingConfirmation)
                | (Phase::Planning, Phase::Completed) // dry run
                | (Phase::AwaitingConfirmation, Phase::Executing)
                | (Phase::Executing, Phase::Validating)
                | (Phase::Validating, Phase::Completed)
        )
    }

    pub fn base_percent(self, tables_completed: usize, tables_total: usize) -> f32 {
        match self {
            Phase::Pending => 0.0,
            Phase::Analyzing => 10.0,
            Phase::Planning => 20.0,
            Phase::AwaitingConfirmation => 25.0,
            Phase::Executing => {
                let fraction = if tables_total == 0 {
                    1.0
                } else {
                    tables_completed as f32 / tables_total as f32
                };
                30.0 + 60.0 * fraction
            }
            Phase::Validating => 90.0,
            Phase::Completed => 100.0,
            Phase::Failed | Phase::Cancelled => 100.0,
        }
    }
}

/// Live progress snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    pub phase: Phase,
    pub percent: f32,
    pub tables_completed: usize,
    pub tables_total: usize,
    pub per_table: Vec<TableProgress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableProgress {
    pub schema: String,
    pub table: String,
    pub state: TableProgressState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableProgressState {
    Pending,
    Extracting,
    Loading,
    Done,
    Failed,
}

#[cfg(test)]
#[path = "phase_test.rs"]
mod tests;

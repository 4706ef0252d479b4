//! Run registry abstraction.
//!
//! The HTTP/MCP layer that owns many concurrent runs needs a
//! process-wide `runId -> handle` map. Rather than bake a global
//! singleton into the core, that need is modeled as an injected trait;
//! nothing downstream of the orchestrator depends on a particular
//! implementation. A single in-memory implementation is adequate for
//! this core.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

/// Registry of run handles keyed by run id. Implementations must be
/// safe to share across threads.
pub trait RunStore<T>: Send + Sync
where
    T: Clone + Send + Sync,
{
    fn put(&self, run_id: Uuid, value: T);
    fn get(&self, run_id: &Uuid) -> Option<T>;
    fn list(&self) -> Vec<Uuid>;
    fn remove(&self, run_id: &Uuid) -> Option<T>;
}

/// Single in-memory `RunStore`, adequate for one process.
#[derive(Default)]
pub struct InMemoryRunStore<T> {
    inner: Mutex<HashMap<Uuid, T>>,
}

impl<T> InMemoryRunStore<T> {
    pub fn new() -> Self {
        InMemoryRunStore {
            inner: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> RunStore<T> for InMemoryRunStore<T>
where
    T: Clone + Send + Sync,
{
    fn put(&self, run_id: Uuid, value: T) {
        self.inner.lock().unwrap().insert(run_id, value);
    }

    fn get(&self, run_id: &Uuid) -> Option<T> {
        self.inner.lock().unwrap().get(run_id).cloned()
    }

    fn list(&self) -> Vec<Uuid> {
        self.inner.lock().unwrap().keys().cloned().collect()
    }

    fn remove(&self, run_id: &Uuid) -> Option<T> {
        self.inner.lock().unwrap().remove(run_id)
    }
}

/// Convenience alias for the common `Arc<T>` handle case.
pub type SharedRunStore<T> = Arc<InMemoryRunStore<Arc<T>>>;

#[cfg(test)]
#[path = "run_store_test.rs"]
mod tests;

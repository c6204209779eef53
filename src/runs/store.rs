//! In-memory registry of the latest snapshot of every run.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use super::snapshot::RunSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("job name and run id must not be empty")]
    InvalidKey,
}

/// Anything that can hand out the current snapshots of a job's runs.
pub trait RunSource: Send + Sync {
    /// Current snapshots of every run of `job`, in no particular order.
    /// `None` if the job is unknown.
    fn snapshots(&self, job: &str) -> Option<Vec<RunSnapshot>>;

    /// Known job names, sorted.
    fn jobs(&self) -> Vec<String>;
}

/// Thread-safe store of run snapshots keyed by job and run id.
///
/// Cloning is cheap and yields a handle to the same store.
#[derive(Debug, Clone, Default)]
pub struct RunStore {
    inner: Arc<RwLock<HashMap<String, HashMap<String, RunSnapshot>>>>,
}

impl RunStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest snapshot of a run, returning the one it replaced.
    pub fn publish(
        &self,
        job: &str,
        snapshot: RunSnapshot,
    ) -> Result<Option<RunSnapshot>, StoreError> {
        if job.is_empty() || snapshot.id().is_empty() {
            return Err(StoreError::InvalidKey);
        }
        let mut guard = self.inner.write().unwrap();
        let runs = guard.entry(job.to_string()).or_default();
        Ok(runs.insert(snapshot.id().to_string(), snapshot))
    }

    #[must_use]
    pub fn get(&self, job: &str, run_id: &str) -> Option<RunSnapshot> {
        let guard = self.inner.read().unwrap();
        guard.get(job).and_then(|runs| runs.get(run_id)).cloned()
    }

    /// Forget a run. A job with no runs left stays known.
    pub fn remove(&self, job: &str, run_id: &str) -> Option<RunSnapshot> {
        let mut guard = self.inner.write().unwrap();
        guard.get_mut(job).and_then(|runs| runs.remove(run_id))
    }

    /// Total number of runs across all jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RunSource for RunStore {
    fn snapshots(&self, job: &str) -> Option<Vec<RunSnapshot>> {
        let guard = self.inner.read().unwrap();
        guard.get(job).map(|runs| runs.values().cloned().collect())
    }

    fn jobs(&self) -> Vec<String> {
        let mut jobs: Vec<String> = self.inner.read().unwrap().keys().cloned().collect();
        jobs.sort();
        jobs
    }
}

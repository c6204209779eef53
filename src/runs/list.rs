//! Assembly of a job's run list in display order, together with its etag.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::etag::{EtagAccumulator, EtagError};
use super::snapshot::RunSnapshot;
use super::store::RunSource;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunListError {
    #[error("unknown job: {0}")]
    UnknownJob(String),

    #[error(transparent)]
    Etag(#[from] EtagError),
}

/// The runs of one job as shown to the user, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunList {
    pub job: String,
    pub runs: Vec<RunSnapshot>,
    /// `None` while any listed run is in progress.
    #[serde(skip)]
    pub etag: Option<String>,
}

impl RunList {
    /// Read the job's runs from `source`, keep the newest `limit`, and tag them.
    pub fn collect<S>(source: &S, job: &str, limit: usize) -> Result<Self, RunListError>
    where
        S: RunSource + ?Sized,
    {
        let mut runs = source
            .snapshots(job)
            .ok_or_else(|| RunListError::UnknownJob(job.to_string()))?;

        runs.sort_by(|a, b| {
            b.start_time_millis()
                .cmp(&a.start_time_millis())
                .then_with(|| a.id().cmp(b.id()))
        });
        runs.truncate(limit);

        let mut acc = EtagAccumulator::new();
        for run in &runs {
            acc.add(run)?;
        }
        let etag = acc.etag()?;

        debug!(
            job = %job,
            runs = runs.len(),
            cacheable = etag.is_some(),
            "Run list assembled"
        );

        Ok(Self {
            job: job.to_string(),
            runs,
            etag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runs::snapshot::RunState;
    use crate::runs::store::RunStore;

    fn seeded() -> RunStore {
        let store = RunStore::new();
        for (id, start) in [("1", 100), ("3", 300), ("2", 200)] {
            store
                .publish(
                    "app",
                    RunSnapshot::new(id, format!("#{id}"), start, 10, 0, RunState::Success),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn test_newest_first() {
        let list = RunList::collect(&seeded(), "app", 10).unwrap();
        let ids: Vec<_> = list.runs.iter().map(RunSnapshot::id).collect();
        assert_eq!(ids, ["3", "2", "1"]);
        assert!(list.etag.is_some());
    }

    #[test]
    fn test_ties_ordered_by_id() {
        let store = RunStore::new();
        for id in ["b", "a"] {
            store
                .publish("app", RunSnapshot::new(id, id, 5, 0, 0, RunState::Success))
                .unwrap();
        }
        let list = RunList::collect(&store, "app", 10).unwrap();
        let ids: Vec<_> = list.runs.iter().map(RunSnapshot::id).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_limit_applies_before_tagging() {
        let store = seeded();
        let full = RunList::collect(&store, "app", 10).unwrap();
        let limited = RunList::collect(&store, "app", 2).unwrap();

        assert_eq!(limited.runs.len(), 2);
        assert_ne!(full.etag, limited.etag);

        // An in-progress run beyond the limit is not listed and does not block caching.
        store
            .publish("app", RunSnapshot::new("0", "#0", 0, 0, 0, RunState::Running))
            .unwrap();
        let again = RunList::collect(&store, "app", 2).unwrap();
        assert_eq!(again.etag, limited.etag);
    }

    #[test]
    fn test_in_progress_run_withholds_tag() {
        let store = seeded();
        store
            .publish("app", RunSnapshot::new("4", "#4", 400, 0, 0, RunState::Queued))
            .unwrap();
        let list = RunList::collect(&store, "app", 10).unwrap();
        assert_eq!(list.runs.len(), 4);
        assert_eq!(list.etag, None);
    }

    #[test]
    fn test_unknown_job() {
        assert_eq!(
            RunList::collect(&seeded(), "missing", 10),
            Err(RunListError::UnknownJob("missing".to_string()))
        );
    }

    #[test]
    fn test_through_trait_object() {
        let store = seeded();
        let source: &dyn RunSource = &store;
        assert_eq!(RunList::collect(source, "app", 1).unwrap().runs.len(), 1);
    }
}

//! Cache-validation tags for run lists.
//!
//! An [`EtagAccumulator`] folds the snapshots of a run list, in display
//! order, into a single tag. The tag is withheld when any run is still in
//! progress, since its duration and change count may still move.
//!
//! # Canonical encoding
//!
//! Each snapshot appends, in order:
//!
//! 1. `id` as a big-endian `u64` byte length followed by its UTF-8 bytes
//! 2. `display_name`, framed the same way
//! 3. `start_time_millis` as big-endian `i64`
//! 4. `duration_millis` as big-endian `i64`
//! 5. `change_count` as big-endian `u64`
//! 6. the state's wire name (e.g. `SUCCESS`), framed like `id`
//!
//! The tag is the lowercase hex SHA-256 of the concatenation. An empty list
//! hashes the empty input.
//!
//! # Example
//!
//! ```rust
//! use pipeline_runs_view::runs::{EtagAccumulator, RunSnapshot, RunState};
//!
//! let mut acc = EtagAccumulator::new();
//! acc.add(&RunSnapshot::new("2", "#2", 2_000, 30, 0, RunState::Success))?
//!     .add(&RunSnapshot::new("1", "#1", 1_000, 45, 1, RunState::Failure))?;
//! let tag = acc.etag()?;
//! assert_eq!(tag.map(|t| t.len()), Some(64));
//! # Ok::<(), pipeline_runs_view::runs::EtagError>(())
//! ```

use sha2::{Digest, Sha256};
use thiserror::Error;

use super::snapshot::RunSnapshot;

/// Misuse of a single-use accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EtagError {
    #[error("cannot add a run snapshot after the etag was computed")]
    AlreadyFinalized,

    #[error("etag was already computed for this accumulator")]
    DoubleFinalize,
}

#[derive(Debug)]
enum Phase {
    Open { hasher: Sha256, in_progress: bool },
    Finalized,
}

/// Write-once builder folding run snapshots into an etag.
#[derive(Debug)]
pub struct EtagAccumulator {
    phase: Phase,
}

impl Default for EtagAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl EtagAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Open {
                hasher: Sha256::new(),
                in_progress: false,
            },
        }
    }

    /// Fold one snapshot into the tag. Order of calls is significant.
    pub fn add(&mut self, snapshot: &RunSnapshot) -> Result<&mut Self, EtagError> {
        let Phase::Open {
            hasher,
            in_progress,
        } = &mut self.phase
        else {
            return Err(EtagError::AlreadyFinalized);
        };

        put_str(hasher, snapshot.id());
        put_str(hasher, snapshot.display_name());
        hasher.update(snapshot.start_time_millis().to_be_bytes());
        hasher.update(snapshot.duration_millis().to_be_bytes());
        hasher.update(snapshot.change_count().to_be_bytes());
        put_str(hasher, snapshot.state().as_str());

        *in_progress |= snapshot.is_in_progress();
        Ok(self)
    }

    /// Finalize and return the tag, or `None` if any folded run was in
    /// progress and the list must not be cached.
    pub fn etag(&mut self) -> Result<Option<String>, EtagError> {
        match std::mem::replace(&mut self.phase, Phase::Finalized) {
            Phase::Open {
                hasher,
                in_progress,
            } => Ok((!in_progress).then(|| hex::encode(hasher.finalize()))),
            Phase::Finalized => Err(EtagError::DoubleFinalize),
        }
    }

    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        matches!(self.phase, Phase::Finalized)
    }
}

fn put_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_be_bytes());
    hasher.update(value.as_bytes());
}

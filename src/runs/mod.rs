//! Run snapshots and the cache-validation tags derived from them.
//!
//! # Architecture
//!
//! - [`RunSnapshot`]: immutable point-in-time summary of one run
//! - [`EtagAccumulator`]: single-use fold of snapshots into an etag
//! - [`RunStore`]: thread-safe in-memory [`RunSource`]
//! - [`RunList`]: a job's runs in display order plus their etag

mod etag;
mod list;
mod snapshot;
mod store;

pub use etag::{EtagAccumulator, EtagError};
pub use list::{RunList, RunListError};
pub use snapshot::{RunSnapshot, RunState};
pub use store::{RunSource, RunStore, StoreError};

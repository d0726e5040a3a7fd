//! Persistence Module
//!
//! Snapshot load/commit for the store's flat-file format.

mod snapshot;

pub use snapshot::{claim_unused_path, commit, load, LoadReport, SnapshotRecord};

//! # Repository Module
//!
//! Repositories wrap SQL behind a small API over the shared pool.
//!
//! - [`SnapshotRepository`](snapshot::SnapshotRepository) - key/value snapshots

pub mod snapshot;

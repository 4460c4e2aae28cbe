//! State persistence: snapshot model and file-backed store.

pub mod file;
pub mod snapshot;

pub use file::{FileSnapshotStore, SnapshotError, SnapshotStore};
pub use snapshot::Snapshot;

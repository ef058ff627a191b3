use std::sync::LazyLock;

pub mod retention;
pub mod snapshot;

pub use retention::{RetentionMode, keep_count, select_for_deletion};
pub use snapshot::{Snapshot, SnapshotStatus, Volume, eligible_snapshots};

pub static VERSION: LazyLock<String> = LazyLock::new(|| env!("CARGO_PKG_VERSION").to_string());

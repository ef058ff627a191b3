use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotStatus {
    Pending,
    Completed,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub volume_id: String,
    pub started_at: DateTime<Utc>,
    pub status: SnapshotStatus,
}

impl Snapshot {
    pub fn is_completed(&self) -> bool {
        self.status == SnapshotStatus::Completed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub id: String,
}

/// Completed snapshots owned by `volume_id`, in their original order.
pub fn eligible_snapshots(snapshots: &[Snapshot], volume_id: &str) -> Vec<Snapshot> {
    snapshots
        .iter()
        .filter(|snapshot| snapshot.is_completed() && snapshot.volume_id == volume_id)
        .cloned()
        .collect()
}

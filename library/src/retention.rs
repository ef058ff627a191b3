use crate::snapshot::Snapshot;

/// Where the delete slice begins once snapshots are ordered newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetentionMode {
    /// Historical boundary: the slice starts at `keep - 1`, so only
    /// `keep - 1` snapshots survive. With `keep == 0` only the oldest
    /// snapshot is deleted.
    #[default]
    Compatible,
    /// The slice starts at `keep`; exactly `keep` snapshots survive.
    Exact,
}

/// Number of snapshots to keep for a volume holding `eligible` completed
/// snapshots.
pub fn keep_count(keep_percentage: f64, eligible: usize) -> usize {
    // Float to int casts saturate, so a negative product yields 0.
    (keep_percentage * eligible as f64).floor() as usize
}

/// Picks the snapshots to delete, newest first ordering with ties left in
/// input order. The input is never reordered.
pub fn select_for_deletion(snapshots: &[Snapshot], keep: usize, mode: RetentionMode) -> Vec<Snapshot> {
    if snapshots.len() <= keep {
        return vec![];
    }

    let mut ordered = snapshots.to_vec();
    ordered.sort_by(|a, b| b.started_at.cmp(&a.started_at));

    let start = match mode {
        RetentionMode::Compatible => keep.checked_sub(1).unwrap_or(ordered.len() - 1),
        RetentionMode::Exact => keep,
    };

    ordered.split_off(start)
}

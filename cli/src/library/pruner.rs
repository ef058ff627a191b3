use std::io::Write;

use snapprune_library::{Snapshot, Volume, eligible_snapshots, keep_count, select_for_deletion};
use tracing::{debug, warn};

use crate::library::{api::StorageApi, config::Settings, error::PruneError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoVolumes,
    /// Pruning only starts once the total snapshot count equals the ceiling.
    CeilingNotMet { current: usize, ceiling: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneSummary {
    pub volumes: usize,
    /// Volumes without a completed snapshot.
    pub volumes_skipped: Vec<String>,
    /// Snapshot ids in the order they were deleted.
    pub deleted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped(SkipReason),
    Pruned(PruneSummary),
}

/// Runs a single pruning pass, narrating to `out`.
///
/// Calls are issued one at a time and the first failure ends the pass.
/// Snapshots deleted before the failure stay deleted.
pub async fn prune<A, W>(api: &A, settings: &Settings, out: &mut W) -> Result<Outcome, PruneError>
where
    A: StorageApi + ?Sized,
    W: Write,
{
    let volumes = api.list_volumes().await?;
    let snapshots = api.list_snapshots().await?;

    debug!(
        volumes = volumes.len(),
        snapshots = snapshots.len(),
        "Fetched inventory"
    );

    if let Some(reason) = check_gate(&volumes, &snapshots, settings.max_snapshots, out)? {
        return Ok(Outcome::Skipped(reason));
    }

    writeln!(out, "Total Number of volumes is: {}", volumes.len())?;
    writeln!(
        out,
        "Keeping {:?}% of snapshots per volume",
        settings.keep_percentage * 100.0
    )?;

    let mut summary = PruneSummary {
        volumes: volumes.len(),
        ..Default::default()
    };

    for volume in &volumes {
        let eligible = eligible_snapshots(&snapshots, &volume.id);

        if eligible.is_empty() {
            writeln!(out, "Skipping volume [{}] as it has no snapshots.", volume.id)?;
            summary.volumes_skipped.push(volume.id.clone());
            continue;
        }

        let keep = keep_count(settings.keep_percentage, eligible.len());
        writeln!(out, "Keeping {} snapshots for volume [{}]", keep, volume.id)?;

        let to_delete = select_for_deletion(&eligible, keep, settings.retention_mode);

        if to_delete.is_empty() {
            continue;
        }

        writeln!(out, "Deleting {} snapshots...", to_delete.len())?;

        for snapshot in to_delete {
            writeln!(
                out,
                "Deleting snapshot [{}] for volume [{}] with creation date: {}",
                snapshot.id, snapshot.volume_id, snapshot.started_at
            )?;
            out.flush()?;

            api.delete_snapshot(&snapshot.id).await.inspect_err(|error| {
                warn!(snapshot = %snapshot.id, %error, "Aborting run, delete failed");
            })?;

            summary.deleted.push(snapshot.id);
        }
    }

    Ok(Outcome::Pruned(summary))
}

fn check_gate<W: Write>(
    volumes: &[Volume],
    snapshots: &[Snapshot],
    ceiling: usize,
    out: &mut W,
) -> Result<Option<SkipReason>, PruneError> {
    let current = snapshots.len();

    if !volumes.is_empty() && current == ceiling {
        return Ok(None);
    }

    if volumes.is_empty() {
        writeln!(out, "Not doing anything as no volumes were found.")?;
    }

    if current < ceiling {
        writeln!(
            out,
            "Not doing anything as max number of snapshots [{}] has not been reached.  There are currently {} snapshots.",
            ceiling, current
        )?;
    } else if current > ceiling {
        writeln!(
            out,
            "Not doing anything as the snapshot count {} does not match the ceiling [{}].",
            current, ceiling
        )?;
    }

    match volumes.is_empty() {
        true => Ok(Some(SkipReason::NoVolumes)),
        false => Ok(Some(SkipReason::CeilingNotMet { current, ceiling })),
    }
}

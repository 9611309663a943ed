use anyhow::{Context, Result};
use tracing::debug;

use super::{ApplyJobSummary, CommandResult, CommandSummary, context::JobContext};
use crate::cli::args::ApplyJobCommand;
use crate::job::{apply_job_files, prune_store};

/// Apply every locale's job file to the store and save it once.
///
/// The reference is loaded before any job file is applied, so a store-derived
/// reference reflects the store as it was on disk. Pruning only runs when every
/// locale applied cleanly.
pub fn apply_job(cmd: ApplyJobCommand) -> Result<CommandResult> {
    let ctx = JobContext::new(&cmd.common)?;
    let mut store = ctx.load_store()?;
    let reference = ctx.load_reference(&store)?;

    let mode = cmd.mode.unwrap_or(ctx.apply_mode);
    debug!(?mode, "applying job files");

    let report = apply_job_files(&ctx.job_dir, &mut store, &reference, &ctx.locales, mode);

    let pruned = if (cmd.prune || ctx.prune) && report.failures.is_empty() {
        prune_store(&mut store, &reference)
    } else {
        Vec::new()
    };

    let saved = report.has_changes() || !pruned.is_empty();
    if saved {
        store.save().with_context(|| {
            format!("Failed to save locale store: {}", store.path().display())
        })?;
    }

    Ok(CommandResult::new(CommandSummary::ApplyJob(
        ApplyJobSummary {
            job_dir: ctx.job_dir,
            store_path: ctx.store_path,
            applied: report.applied,
            skipped: report.skipped,
            failures: report.failures,
            pruned,
            saved,
        },
    )))
}

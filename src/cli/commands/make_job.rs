use anyhow::Result;
use tracing::debug;

use super::{CommandResult, CommandSummary, MakeJobSummary, context::JobContext};
use crate::cli::args::MakeJobCommand;
use crate::job::generate_job_files;

/// Write one job file per configured locale.
///
/// A corrupt store or reference aborts the command before any file is written.
/// A locale that fails to write is reported and the others are still generated.
pub fn make_job(cmd: MakeJobCommand) -> Result<CommandResult> {
    let ctx = JobContext::new(&cmd.common)?;
    let store = ctx.load_store()?;
    let reference = ctx.load_reference(&store)?;

    debug!(
        keys = reference.len(),
        locales = ctx.locales.len(),
        "generating job files"
    );

    let mut generated = Vec::new();
    let mut failures = Vec::new();
    for result in generate_job_files(
        &ctx.job_dir,
        &reference,
        &store,
        &ctx.locales,
        &ctx.reference_locale,
    ) {
        match result {
            Ok(job) => generated.push(job),
            Err(failure) => failures.push(failure),
        }
    }

    Ok(CommandResult::new(CommandSummary::MakeJob(MakeJobSummary {
        job_dir: ctx.job_dir,
        key_count: reference.len(),
        generated,
        failures,
    })))
}

use std::path::PathBuf;

use crate::cli::ExitStatus;
use crate::job::{GeneratedJob, LocaleApplied, LocaleFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    MakeJob,
    ApplyJob,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    MakeJob(MakeJobSummary),
    ApplyJob(ApplyJobSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct MakeJobSummary {
    pub job_dir: PathBuf,
    pub key_count: usize,
    pub generated: Vec<GeneratedJob>,
    pub failures: Vec<LocaleFailure>,
}

#[derive(Debug)]
pub struct ApplyJobSummary {
    pub job_dir: PathBuf,
    pub store_path: PathBuf,
    pub applied: Vec<LocaleApplied>,
    /// Locales without a job file.
    pub skipped: Vec<String>,
    pub failures: Vec<LocaleFailure>,
    /// Keys removed because the reference no longer has them.
    pub pruned: Vec<String>,
    /// True if the store file was rewritten.
    pub saved: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running a babeljob command
#[derive(Debug)]
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    /// Number of locales that could not be generated or applied.
    pub failure_count: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        let (kind, failure_count) = match &summary {
            CommandSummary::MakeJob(s) => (CommandKind::MakeJob, s.failures.len()),
            CommandSummary::ApplyJob(s) => (CommandKind::ApplyJob, s.failures.len()),
            CommandSummary::Init(_) => (CommandKind::Init, 0),
        };
        Self {
            kind,
            summary,
            failure_count,
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.failure_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

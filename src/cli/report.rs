//! Report formatting and printing for command results.
//!
//! Kept apart from the job pipelines so babeljob can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    ApplyJobSummary, CommandResult, CommandSummary, InitSummary, MakeJobSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::job::{LocaleFailure, job_file_path};
use crate::utils::plural;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a command result to stdout.
pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

/// Print a command result to a custom writer.
pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::MakeJob(summary) => print_make_job(summary, writer),
        CommandSummary::ApplyJob(summary) => print_apply_job(summary, verbose, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

fn print_make_job<W: Write>(summary: &MakeJobSummary, writer: &mut W) {
    for job in &summary.generated {
        let mut detail = format!("{} {}", job.leaf_count, plural(job.leaf_count, "line"));
        if job.blank_count > 0 {
            detail.push_str(&format!(", {} to translate", job.blank_count));
        }
        let _ = writeln!(
            writer,
            "{} {} {} ({})",
            SUCCESS_MARK.green(),
            job.locale.bold(),
            job.path.display(),
            detail
        );
    }

    for failure in &summary.failures {
        print_failure(failure, None, writer);
    }

    let count = summary.generated.len();
    let _ = writeln!(
        writer,
        "{} {} job {} for {} {} in {}.",
        "Wrote".green().bold(),
        count,
        plural(count, "file"),
        summary.key_count,
        plural(summary.key_count, "key"),
        summary.job_dir.display()
    );
}

fn print_apply_job<W: Write>(summary: &ApplyJobSummary, verbose: bool, writer: &mut W) {
    for applied in &summary.applied {
        let _ = writeln!(
            writer,
            "{} {} {} added, {} updated, {} unchanged",
            SUCCESS_MARK.green(),
            applied.locale.bold(),
            applied.added,
            applied.updated,
            applied.unchanged
        );
        for key in &applied.unknown_keys {
            let _ = writeln!(
                writer,
                "{} key \"{}\" in {} is not in the reference, skipped",
                "warning:".bold().yellow(),
                key,
                job_file_path(&summary.job_dir, &applied.locale).display()
            );
        }
    }

    for locale in &summary.skipped {
        let _ = writeln!(
            writer,
            "{} {} skipped, no job file at {}",
            "warning:".bold().yellow(),
            locale.bold(),
            job_file_path(&summary.job_dir, locale).display()
        );
    }

    for failure in &summary.failures {
        let path = job_file_path(&summary.job_dir, &failure.locale);
        print_failure(failure, Some(&path.display().to_string()), writer);
    }

    if !summary.pruned.is_empty() {
        let count = summary.pruned.len();
        let _ = writeln!(
            writer,
            "{} {} stale {} from the store.",
            "Pruned".green().bold(),
            count,
            plural(count, "key")
        );
        if verbose {
            for key in &summary.pruned {
                let _ = writeln!(writer, "  - {}", key);
            }
        }
    }

    if summary.saved {
        let _ = writeln!(
            writer,
            "{} {}.",
            "Saved".green().bold(),
            summary.store_path.display()
        );
    } else {
        let _ = writeln!(
            writer,
            "No changes, {} left as is.",
            summary.store_path.display()
        );
    }
}

/// Print one locale failure, pointing at the job file line when known.
fn print_failure<W: Write>(failure: &LocaleFailure, job_file: Option<&str>, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}: {}",
        FAILURE_MARK.red(),
        failure.locale.bold(),
        failure.error
    );

    let (Some(job_file), Some(line)) = (job_file, failure.line) else {
        if let Some(key) = &failure.key {
            let _ = writeln!(writer, "   {} key: {}", "=".blue(), key);
        }
        return;
    };

    let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), job_file, line);
    if let Some(raw) = &failure.raw {
        let number = line.to_string();
        let gutter = " ".repeat(number.len());
        let _ = writeln!(writer, " {} {}", gutter, "|".blue());
        let _ = writeln!(writer, " {} {} {}", number.blue(), "|".blue(), raw);
        let _ = writeln!(writer, " {} {}", gutter, "|".blue());
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} Created {}",
        SUCCESS_MARK.green(),
        summary.path.display()
    );
    let _ = writeln!(
        writer,
        "Set 'locales' in {} before running make-job.",
        CONFIG_FILE_NAME
    );
}

//! Job pipelines: generate per-locale job files and apply them back.
//!
//! Both pipelines work one locale at a time. A locale that fails is reported as
//! a [`LocaleFailure`] and never affects the outcome of another locale.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::error::Error;

pub mod apply;
pub mod generate;

pub use apply::{
    ApplyMode, ApplyReport, LocaleApplied, apply_job_files, apply_job_text,
    prune_store,
};
pub use generate::{GeneratedJob, JobFile, generate_job_files, render_job};

/// File extension of job files.
pub const JOB_FILE_EXTENSION: &str = "txt";

/// `<job_dir>/<locale>.txt`
pub fn job_file_path(job_dir: &Path, locale: &str) -> PathBuf {
    job_dir.join(format!("{}.{}", locale, JOB_FILE_EXTENSION))
}

/// Why one locale could not be generated or applied.
#[derive(Debug)]
pub struct LocaleFailure {
    pub locale: String,
    /// Translation key being processed, when known.
    pub key: Option<String>,
    /// 1-based line number in the job file.
    pub line: Option<usize>,
    /// The job file line as written.
    pub raw: Option<String>,
    pub error: Error,
}

impl LocaleFailure {
    pub fn new(locale: &str, error: Error) -> Self {
        Self {
            locale: locale.to_string(),
            key: None,
            line: None,
            raw: None,
            error,
        }
    }

    pub fn at_line(mut self, line: usize, raw: &str) -> Self {
        self.line = Some(line);
        self.raw = Some(raw.to_string());
        self
    }

    pub fn for_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }
}

impl fmt::Display for LocaleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "locale {}", self.locale)?;
        if let Some(key) = &self.key {
            write!(f, ", key {}", key)?;
        }
        if let Some(line) = self.line {
            write!(f, ", line {}", line)?;
        }
        write!(f, ": {}", self.error)
    }
}

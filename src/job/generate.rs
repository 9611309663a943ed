//! Job generation: reference tree + store -> one flat text file per locale.

use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use tracing::debug;

use super::{LocaleFailure, job_file_path};
use crate::core::{flatten_leaves, format_line, merge_shape};
use crate::reference::Reference;
use crate::store::LocaleStore;
use crate::utils::write_atomically;

/// Rendered job file for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFile {
    pub locale: String,
    /// Flattened lines without terminators, in reference leaf order.
    pub lines: Vec<String>,
    pub blank_count: usize,
}

impl JobFile {
    /// File contents: every line terminated by `\n`.
    pub fn content(&self) -> String {
        let mut content = String::new();
        for line in &self.lines {
            content.push_str(line);
            content.push('\n');
        }
        content
    }

    pub fn leaf_count(&self) -> usize {
        self.lines.len()
    }
}

/// Render the job file for `locale`.
///
/// The reference locale is its own translation and is rendered straight from
/// the reference trees. Every other locale merges its stored tree into the
/// reference shape, so missing or mismatched leaves come out blank.
pub fn render_job(
    reference: &Reference,
    store: &LocaleStore,
    locale: &str,
    reference_locale: &str,
) -> JobFile {
    let mut lines = Vec::new();
    let mut blank_count = 0;

    for (key, reference_tree) in reference.iter() {
        let tree = if locale == reference_locale {
            Cow::Borrowed(reference_tree)
        } else {
            let stored = store.get(key, locale);
            Cow::Owned(merge_shape(reference_tree, stored.as_ref()))
        };

        for (path, value) in flatten_leaves(&tree) {
            if value.is_blank() {
                blank_count += 1;
            }
            lines.push(format_line(key, &path, &value));
        }
    }

    JobFile {
        locale: locale.to_string(),
        lines,
        blank_count,
    }
}

/// A job file written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedJob {
    pub locale: String,
    pub path: PathBuf,
    pub leaf_count: usize,
    pub blank_count: usize,
}

/// Render and write one job file per locale into `job_dir`.
///
/// Locales are processed in parallel; results come back in `locales` order.
/// Each file is written independently, so one failing locale leaves the other
/// files untouched.
pub fn generate_job_files(
    job_dir: &Path,
    reference: &Reference,
    store: &LocaleStore,
    locales: &[String],
    reference_locale: &str,
) -> Vec<Result<GeneratedJob, LocaleFailure>> {
    locales
        .par_iter()
        .map(|locale| -> Result<GeneratedJob, LocaleFailure> {
            let job = render_job(reference, store, locale, reference_locale);
            let path = job_file_path(job_dir, locale);
            write_atomically(&path, &job.content())
                .map_err(|error| LocaleFailure::new(locale, error))?;

            debug!(
                locale = %locale,
                path = %path.display(),
                leaves = job.leaf_count(),
                blanks = job.blank_count,
                "wrote job file"
            );

            Ok(GeneratedJob {
                locale: locale.clone(),
                path,
                leaf_count: job.leaf_count(),
                blank_count: job.blank_count,
            })
        })
        .collect()
}

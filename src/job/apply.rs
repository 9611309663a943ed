//! Job application: edited job files -> updated locale store.

use std::{fs, io, path::Path};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LocaleFailure, job_file_path};
use crate::core::{
    Leaf, Scalar, ValueTree, conform_rebuilt, overlay, parse_line, rebuild_tree,
    restore_scalar_types,
};
use crate::error::Error;
use crate::reference::Reference;
use crate::store::{EntryAction, LocaleStore};

/// How an applied tree is combined with what the store already holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum ApplyMode {
    /// Conform the job's tree to the reference shape and replace the stored tree.
    #[default]
    Replace,
    /// Write the job's leaves onto the stored tree, keeping leaves it does not mention.
    Overlay,
}

/// Outcome of applying one locale's job file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleApplied {
    pub locale: String,
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Keys in the job file that the reference does not know, in file order.
    pub unknown_keys: Vec<String>,
}

/// One key's lines, in file order.
struct KeyLines<'a> {
    key: String,
    lines: Vec<(usize, &'a str, Leaf)>,
}

/// Apply the text of one locale's job file to `store`.
///
/// The whole locale is staged before anything is written: a malformed line or a
/// shape conflict returns a [`LocaleFailure`] and leaves the store untouched.
/// Keys absent from the job file keep their stored value; lines for keys the
/// reference does not contain are skipped and listed in `unknown_keys`.
pub fn apply_job_text(
    store: &mut LocaleStore,
    reference: &Reference,
    locale: &str,
    text: &str,
    mode: ApplyMode,
) -> Result<LocaleApplied, LocaleFailure> {
    let mut applied = LocaleApplied {
        locale: locale.to_string(),
        ..Default::default()
    };
    let mut groups: Vec<KeyLines<'_>> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        let parsed = parse_line(raw)
            .map_err(|error| LocaleFailure::new(locale, error).at_line(line_number, raw))?;

        if !reference.contains(&parsed.key) {
            if !applied.unknown_keys.contains(&parsed.key) {
                applied.unknown_keys.push(parsed.key);
            }
            continue;
        }

        let leaf = (parsed.path, Scalar::Text(parsed.value));
        match groups.iter_mut().find(|group| group.key == parsed.key) {
            Some(group) => group.lines.push((line_number, raw, leaf)),
            None => groups.push(KeyLines {
                key: parsed.key,
                lines: vec![(line_number, raw, leaf)],
            }),
        }
    }

    let mut staged: Vec<(String, ValueTree)> = Vec::with_capacity(groups.len());
    for group in groups {
        let Some(reference_tree) = reference.get(&group.key) else {
            continue;
        };
        let rebuilt = rebuild_key(locale, &group)?;

        let tree = match mode {
            ApplyMode::Replace => conform_rebuilt(reference_tree, &rebuilt),
            ApplyMode::Overlay => match store.get(&group.key, locale) {
                Some(existing) => overlay(&existing, &rebuilt),
                None => rebuilt,
            },
        };
        staged.push((group.key, restore_scalar_types(tree, reference_tree)));
    }

    for (key, tree) in &staged {
        match store.set(key, locale, tree) {
            EntryAction::Added => applied.added += 1,
            EntryAction::Updated => applied.updated += 1,
            EntryAction::Unchanged => applied.unchanged += 1,
        }
    }

    debug!(
        locale = %locale,
        added = applied.added,
        updated = applied.updated,
        unchanged = applied.unchanged,
        "applied job"
    );

    Ok(applied)
}

fn rebuild_key(locale: &str, group: &KeyLines<'_>) -> Result<ValueTree, LocaleFailure> {
    let leaves: Vec<Leaf> = group.lines.iter().map(|(_, _, leaf)| leaf.clone()).collect();

    rebuild_tree(&leaves).map_err(|error| {
        let error = match error {
            Error::ShapeConflict { path, reason } => Error::ShapeConflict {
                path: format!("{}{}", group.key, path),
                reason,
            },
            other => other,
        };
        let mut failure = LocaleFailure::new(locale, error).for_key(&group.key);

        // Conflicts only grow as leaves are added, so the shortest failing
        // prefix ends at the line that introduced the conflict.
        if let Some(n) = (1..=leaves.len()).find(|&n| rebuild_tree(&leaves[..n]).is_err()) {
            let (line_number, raw, _) = &group.lines[n - 1];
            failure = failure.at_line(*line_number, raw);
        }
        failure
    })
}

/// Outcome of applying a set of job files.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub applied: Vec<LocaleApplied>,
    /// Locales without a job file.
    pub skipped: Vec<String>,
    pub failures: Vec<LocaleFailure>,
}

impl ApplyReport {
    pub fn has_changes(&self) -> bool {
        self.applied.iter().any(|a| a.added + a.updated > 0)
    }
}

/// Apply `<job_dir>/<locale>.txt` for every locale, in order.
///
/// A missing job file skips its locale; a failing locale is recorded and the
/// remaining locales are still applied.
pub fn apply_job_files(
    job_dir: &Path,
    store: &mut LocaleStore,
    reference: &Reference,
    locales: &[String],
    mode: ApplyMode,
) -> ApplyReport {
    let mut report = ApplyReport::default();

    for locale in locales {
        let path = job_file_path(job_dir, locale);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(
                    locale = %locale,
                    path = %path.display(),
                    "no job file, skipping locale"
                );
                report.skipped.push(locale.clone());
                continue;
            }
            Err(e) => {
                report
                    .failures
                    .push(LocaleFailure::new(locale, Error::io(&path, e)));
                continue;
            }
        };

        match apply_job_text(store, reference, locale, &text, mode) {
            Ok(applied) => {
                for key in &applied.unknown_keys {
                    debug!(
                        locale = %locale,
                        key = %key,
                        "job file key is not in the reference, skipped"
                    );
                }
                report.applied.push(applied);
            }
            Err(failure) => {
                debug!(locale = %locale, error = %failure.error, "job file rejected");
                report.failures.push(failure);
            }
        }
    }

    report
}

/// Remove store keys that the reference no longer contains.
pub fn prune_store(store: &mut LocaleStore, reference: &Reference) -> Vec<String> {
    let stale: Vec<String> = store
        .keys()
        .filter(|key| !reference.contains(key))
        .map(str::to_string)
        .collect();
    for key in &stale {
        store.remove_key(key);
        debug!(key = %key, "pruned key absent from reference");
    }
    stale
}

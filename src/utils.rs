//! Common utility functions shared across the codebase.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Write `content` to `path` through a sibling temp file and a rename.
///
/// Parent directories are created when missing. A failed write leaves the
/// previous file at `path` intact and removes the temp file.
pub fn write_atomically(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let tmp_path = tmp_sibling(path);
    fs::write(&tmp_path, content).map_err(|e| {
        // A partial write may still have created the file.
        let _ = fs::remove_file(&tmp_path);
        Error::io(&tmp_path, e)
    })?;
    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        Error::io(path, e)
    })
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Pluralize a noun for summary output.
///
/// ```
/// use babeljob::utils::plural;
///
/// assert_eq!(plural(1, "file"), "file");
/// assert_eq!(plural(3, "file"), "files");
/// ```
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    }
}

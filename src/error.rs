//! Error taxonomy shared by the codec, the store and the job pipelines.

use std::{io, path::PathBuf};

/// Errors raised by the library layer.
///
/// Command handlers wrap these in `anyhow` with extra context; per-locale
/// application failures keep the typed error so the report can show it verbatim.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A job file line whose key cannot be decoded into a translation key and path.
    #[error("malformed key `{raw}`: {reason}")]
    MalformedKey { raw: String, reason: &'static str },

    /// Leaves for one translation key imply incompatible list/map/scalar shapes.
    #[error("shape conflict at `{path}`: {reason}")]
    ShapeConflict { path: String, reason: String },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("locale store {} is corrupt: {reason}", path.display())]
    CorruptStore { path: PathBuf, reason: String },

    #[error("reference file {} is invalid: {reason}", path.display())]
    CorruptReference { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(raw: &str, reason: &'static str) -> Self {
        Self::MalformedKey {
            raw: raw.to_string(),
            reason,
        }
    }

    pub(crate) fn conflict(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ShapeConflict {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

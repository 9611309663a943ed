//! The locale store: one JSON document holding every locale's value tree.
//!
//! ```json
//! {
//!   "arrayvalue": {
//!     "en": [5, "items", "in", "an", "array"],
//!     "da": [5, "elementer", "i", "et", "array"]
//!   }
//! }
//! ```
//!
//! Key and locale order are preserved as read; new entries are appended.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::core::ValueTree;
use crate::error::{Error, Result};
use crate::utils::write_atomically;

/// Action taken on a `[key][locale]` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    Added,
    Updated,
    Unchanged,
}

/// Handle on a locale store document, loaded fully into memory.
#[derive(Debug, Clone)]
pub struct LocaleStore {
    path: PathBuf,
    data: Map<String, Value>,
}

impl LocaleStore {
    /// An empty store that will be written to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: Map::new(),
        }
    }

    /// Load the store at `path`. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(path, &content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::empty(path)),
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Parse store contents; every top-level value must be a locale object.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let path = path.into();
        let corrupt = |reason: String| Error::CorruptStore {
            path: path.clone(),
            reason,
        };

        let value: Value = serde_json::from_str(content).map_err(|e| corrupt(e.to_string()))?;
        let Value::Object(data) = value else {
            return Err(corrupt("root must be an object".to_string()));
        };
        if let Some((key, _)) = data.iter().find(|(_, locales)| !locales.is_object()) {
            return Err(corrupt(format!(
                "entry \"{}\" must map locales to values",
                key
            )));
        }

        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str, locale: &str) -> Option<ValueTree> {
        self.data
            .get(key)
            .and_then(|locales| locales.get(locale))
            .map(ValueTree::from)
    }

    /// Store `tree` at `[key][locale]`, replacing any previous value.
    pub fn set(&mut self, key: &str, locale: &str, tree: &ValueTree) -> EntryAction {
        let value = Value::from(tree);
        let locales = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !locales.is_object() {
            *locales = Value::Object(Map::new());
        }
        let Value::Object(locales) = locales else {
            return EntryAction::Unchanged;
        };

        match locales.get(locale) {
            Some(existing) if *existing == value => EntryAction::Unchanged,
            Some(_) => {
                locales.insert(locale.to_string(), value);
                EntryAction::Updated
            }
            None => {
                locales.insert(locale.to_string(), value);
                EntryAction::Added
            }
        }
    }

    /// Drop a key with all of its locales.
    pub fn remove_key(&mut self, key: &str) -> bool {
        // shift_remove keeps the order of the remaining keys
        self.data.shift_remove(key).is_some()
    }

    /// Every key that has a value for `locale`, in store order.
    pub fn entries_for_locale(&self, locale: &str) -> Vec<(String, ValueTree)> {
        self.data
            .iter()
            .filter_map(|(key, locales)| {
                locales
                    .get(locale)
                    .map(|value| (key.clone(), ValueTree::from(value)))
            })
            .collect()
    }

    /// Pretty JSON with 2-space indentation and a trailing newline.
    pub fn to_json_string(&self) -> String {
        format!("{:#}\n", Value::Object(self.data.clone()))
    }

    pub fn save(&self) -> Result<()> {
        write_atomically(&self.path, &self.to_json_string())
    }
}

//! The reference extraction: translation keys and their source-locale trees.
//!
//! Discovering translatable strings is done elsewhere; this module only reads
//! its result, an ordered JSON object such as
//!
//! ```json
//! { "stringvalue": "value", "arrayvalue": [5, "items"] }
//! ```
//!
//! or derives it from the reference locale's entries in the store.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::core::ValueTree;
use crate::error::{Error, Result};
use crate::store::LocaleStore;

/// Ordered `(translation key, reference tree)` pairs.
#[derive(Debug, Clone, Default)]
pub struct Reference {
    entries: Vec<(String, ValueTree)>,
    index: HashMap<String, usize>,
}

impl Reference {
    /// Build from ordered pairs. A repeated key keeps its first position and
    /// its last value.
    pub fn new(pairs: impl IntoIterator<Item = (String, ValueTree)>) -> Self {
        let mut reference = Self::default();
        for (key, tree) in pairs {
            match reference.index.get(&key) {
                Some(&i) => reference.entries[i].1 = tree,
                None => {
                    reference.index.insert(key.clone(), reference.entries.len());
                    reference.entries.push((key, tree));
                }
            }
        }
        reference
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(path, &content)
    }

    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let path = path.into();
        let value: Value = serde_json::from_str(content).map_err(|e| Error::CorruptReference {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        match value {
            Value::Object(map) => Ok(Self::new(
                map.iter().map(|(key, v)| (key.clone(), ValueTree::from(v))),
            )),
            _ => Err(Error::CorruptReference {
                path,
                reason: "root must be an object of translation keys".to_string(),
            }),
        }
    }

    /// The reference locale's entries in the store, in store order.
    pub fn from_store(store: &LocaleStore, reference_locale: &str) -> Self {
        Self::new(store.entries_for_locale(reference_locale))
    }

    pub fn get(&self, key: &str) -> Option<&ValueTree> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValueTree)> {
        self.entries.iter().map(|(key, tree)| (key.as_str(), tree))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

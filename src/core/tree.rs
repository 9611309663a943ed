//! The value tree model: scalars, ordered lists and ordered maps.
//!
//! A [`ValueTree`] holds one locale's content for a translation key. Maps keep
//! their entries in insertion order so that flattening is reproducible, and
//! scalars keep their JSON type so the store round-trips numbers and booleans.

use std::{borrow::Cow, fmt};

use serde_json::{Map, Number, Value};

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl Scalar {
    pub fn blank() -> Self {
        Scalar::Text(String::new())
    }

    pub fn text(value: impl Into<String>) -> Self {
        Scalar::Text(value.into())
    }

    /// Text shown for this scalar in a job file.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Scalar::Text(s) => Cow::Borrowed(s),
            Scalar::Number(n) => Cow::Owned(n.to_string()),
            Scalar::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Scalar::Null => Cow::Borrowed(""),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.render().is_empty()
    }
}

/// One step of a [`LeafPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Position inside a list.
    Index(usize),
    /// Subkey inside a map.
    Key(String),
}

impl Segment {
    pub fn key(key: impl Into<String>) -> Self {
        Segment::Key(key.into())
    }

    /// Classify decoded segment text.
    ///
    /// Only canonical decimals (`0`, or digits without a leading zero) become
    /// indices, so `007` stays a map subkey and encodes back unchanged.
    pub fn parse(text: &str) -> Self {
        let canonical = !text.is_empty()
            && text.bytes().all(|b| b.is_ascii_digit())
            && (text == "0" || !text.starts_with('0'));
        match canonical.then(|| text.parse::<usize>().ok()).flatten() {
            Some(index) => Segment::Index(index),
            None => Segment::Key(text.to_string()),
        }
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Segment::Index(i) => Cow::Owned(i.to_string()),
            Segment::Key(k) => Cow::Borrowed(k),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Location of a scalar below a translation key. Empty means the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LeafPath(Vec<Segment>);

impl LeafPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// A new path one level deeper.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }
}

impl From<Vec<Segment>> for LeafPath {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

/// Renders as `[a][0][b]`; used in diagnostics, not in job files.
impl fmt::Display for LeafPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "[{}]", segment)?;
        }
        Ok(())
    }
}

/// Nested content for one translation key in one locale.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueTree {
    Scalar(Scalar),
    List(Vec<ValueTree>),
    /// Entries in discovery order; subkeys are unique.
    Map(Vec<(String, ValueTree)>),
}

impl ValueTree {
    pub fn empty_map() -> Self {
        ValueTree::Map(Vec::new())
    }

    pub fn text(value: impl Into<String>) -> Self {
        ValueTree::Scalar(Scalar::text(value))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ValueTree::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Child reached by one segment.
    ///
    /// Index segments only match lists and key segments only match maps.
    pub fn child(&self, segment: &Segment) -> Option<&ValueTree> {
        match (self, segment) {
            (ValueTree::List(items), Segment::Index(i)) => items.get(*i),
            (ValueTree::Map(entries), Segment::Key(k)) => {
                entries.iter().find(|(key, _)| key == k).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Child whose segment text equals `segment`'s text, whatever its kind.
    ///
    /// `Index(2)` finds the map entry `"2"` and `Key("2")` finds list item 2.
    pub fn child_by_text(&self, segment: &Segment) -> Option<&ValueTree> {
        let text = segment.as_text();
        match self {
            ValueTree::List(items) => match Segment::parse(&text) {
                Segment::Index(i) => items.get(i),
                Segment::Key(_) => None,
            },
            ValueTree::Map(entries) => entries
                .iter()
                .find(|(key, _)| *key == text)
                .map(|(_, v)| v),
            ValueTree::Scalar(_) => None,
        }
    }

    pub fn lookup(&self, path: &LeafPath) -> Option<&ValueTree> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Scalar stored at exactly `path`, if any.
    pub fn scalar_at(&self, path: &LeafPath) -> Option<&Scalar> {
        self.lookup(path).and_then(ValueTree::as_scalar)
    }
}

impl From<&Value> for ValueTree {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => ValueTree::Scalar(Scalar::Text(s.clone())),
            Value::Number(n) => ValueTree::Scalar(Scalar::Number(n.clone())),
            Value::Bool(b) => ValueTree::Scalar(Scalar::Bool(*b)),
            Value::Null => ValueTree::Scalar(Scalar::Null),
            Value::Array(items) => ValueTree::List(items.iter().map(ValueTree::from).collect()),
            Value::Object(map) => ValueTree::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), ValueTree::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&ValueTree> for Value {
    fn from(tree: &ValueTree) -> Self {
        match tree {
            ValueTree::Scalar(Scalar::Text(s)) => Value::String(s.clone()),
            ValueTree::Scalar(Scalar::Number(n)) => Value::Number(n.clone()),
            ValueTree::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            ValueTree::Scalar(Scalar::Null) => Value::Null,
            ValueTree::List(items) => Value::Array(items.iter().map(Value::from).collect()),
            ValueTree::Map(entries) => {
                let mut map = Map::new();
                for (k, v) in entries {
                    map.insert(k.clone(), Value::from(v));
                }
                Value::Object(map)
            }
        }
    }
}

//! Key path codec.
//!
//! Converts between a [`ValueTree`] and its ordered `(path, scalar)` leaves, and
//! between a `(translation key, path)` pair and the flattened key used in job files:
//!
//! ```text
//! objectvalue[key1]=value1
//! arrayvalue[0]=5
//! stringvalue=value
//! ```
//!
//! ## Escaping
//!
//! Inside encoded keys `\`, `[`, `]` and `=` are escaped with a backslash and
//! line breaks become `\n` / `\r`. Values only escape `\` and line breaks; a line
//! is split on its first unescaped `=`, so `=` and brackets in values need no
//! escaping.
//!
//! A segment reading as a canonical decimal (`0`, `12`) decodes as a list index.
//! Map subkeys with that shape are written with their first digit escaped
//! (`plural[\0]`), which always decodes as a subkey.

use crate::core::tree::{LeafPath, Scalar, Segment, ValueTree};
use crate::error::{Error, Result};

/// A scalar together with where it sits below its translation key.
pub type Leaf = (LeafPath, Scalar);

/// Depth-first leaves of `tree`: lists by ascending index, maps in stored order.
///
/// Empty lists and maps contribute no leaves.
pub fn flatten_leaves(tree: &ValueTree) -> Vec<Leaf> {
    let mut leaves = Vec::new();
    collect_leaves(tree, LeafPath::root(), &mut leaves);
    leaves
}

fn collect_leaves(tree: &ValueTree, path: LeafPath, out: &mut Vec<Leaf>) {
    match tree {
        ValueTree::Scalar(scalar) => out.push((path, scalar.clone())),
        ValueTree::List(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_leaves(item, path.child(Segment::Index(index)), out);
            }
        }
        ValueTree::Map(entries) => {
            for (key, value) in entries {
                collect_leaves(value, path.child(Segment::key(key.as_str())), out);
            }
        }
    }
}

/// Flattened key for a leaf: `key[seg1][seg2]`, or just `key` at the root.
pub fn encode_key(translation_key: &str, path: &LeafPath) -> String {
    let mut encoded = String::with_capacity(translation_key.len());
    escape_key_text(translation_key, &mut encoded);
    for segment in path.segments() {
        encoded.push('[');
        if let Segment::Key(key) = segment
            && matches!(Segment::parse(key), Segment::Index(_))
        {
            // A leading escape keeps a numeric subkey from reading back as an index.
            encoded.push('\\');
        }
        escape_key_text(&segment.as_text(), &mut encoded);
        encoded.push(']');
    }
    encoded
}

fn escape_key_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '\\' | '[' | ']' | '=' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
}

/// Segment text being read between `[` and `]`.
#[derive(Default)]
struct OpenSegment {
    text: String,
    /// The first character was escaped, so the segment is a subkey even if it
    /// looks like an index.
    forced_key: bool,
}

impl OpenSegment {
    fn finish(self) -> Segment {
        if self.forced_key {
            Segment::Key(self.text)
        } else {
            Segment::parse(&self.text)
        }
    }
}

/// Inverse of [`encode_key`].
pub fn decode_key(raw: &str) -> Result<(String, LeafPath)> {
    let mut chars = raw.chars();
    let mut key = String::new();
    let mut segments = Vec::new();
    let mut open: Option<OpenSegment> = None;
    // Set right after `]`: only another `[` may follow.
    let mut after_segment = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = match chars.next() {
                    Some('n') => '\n',
                    Some('r') => '\r',
                    Some(other) => other,
                    None => return Err(Error::malformed(raw, "dangling escape at end of key")),
                };
                if after_segment {
                    return Err(Error::malformed(raw, "unexpected text after `]`"));
                }
                match open.as_mut() {
                    Some(segment) => {
                        if segment.text.is_empty() {
                            segment.forced_key = true;
                        }
                        segment.text.push(escaped);
                    }
                    None => key.push(escaped),
                }
            }
            '[' => {
                if open.is_some() {
                    return Err(Error::malformed(raw, "unbalanced `[` inside a segment"));
                }
                if key.is_empty() {
                    return Err(Error::malformed(raw, "missing translation key"));
                }
                open = Some(OpenSegment::default());
                after_segment = false;
            }
            ']' => {
                let Some(segment) = open.take() else {
                    return Err(Error::malformed(raw, "unbalanced `]`"));
                };
                segments.push(segment.finish());
                after_segment = true;
            }
            _ => {
                if after_segment {
                    return Err(Error::malformed(raw, "unexpected text after `]`"));
                }
                match open.as_mut() {
                    Some(segment) => segment.text.push(c),
                    None => key.push(c),
                }
            }
        }
    }

    if open.is_some() {
        return Err(Error::malformed(raw, "unclosed `[`"));
    }
    if key.is_empty() {
        return Err(Error::malformed(raw, "missing translation key"));
    }

    Ok((key, LeafPath::from(segments)))
}

pub fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Lenient inverse of [`escape_value`]: unknown escapes are kept verbatim.
pub fn unescape_value(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.peek() {
            Some('\\') => value.push('\\'),
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            _ => {
                value.push('\\');
                continue;
            }
        }
        chars.next();
    }
    value
}

/// One decoded job file line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub key: String,
    pub path: LeafPath,
    pub value: String,
}

/// Render a leaf as a job file line, without the line terminator.
pub fn format_line(translation_key: &str, path: &LeafPath, value: &Scalar) -> String {
    format!(
        "{}={}",
        encode_key(translation_key, path),
        escape_value(&value.render())
    )
}

pub fn parse_line(line: &str) -> Result<ParsedLine> {
    let Some((raw_key, raw_value)) = split_on_unescaped_eq(line) else {
        return Err(Error::malformed(line, "missing `=` separator"));
    };
    let (key, path) = decode_key(raw_key)?;
    Ok(ParsedLine {
        key,
        path,
        value: unescape_value(raw_value),
    })
}

fn split_on_unescaped_eq(line: &str) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' => return Some((&line[..i], &line[i + 1..])),
            _ => {}
        }
    }
    None
}

/// Inverse of [`flatten_leaves`].
///
/// At each level, index segments forming `0..n` rebuild a list (ordered by
/// index, whatever the leaf order); any other index set rebuilds a map keyed by
/// the decimal text. A level mixing indices with non-numeric subkeys, a path that
/// is both a value and a container, and a repeated path are shape conflicts.
/// No leaves at all rebuild an empty map.
pub fn rebuild_tree(leaves: &[Leaf]) -> Result<ValueTree> {
    let entries: Vec<(&[Segment], &Scalar)> = leaves
        .iter()
        .map(|(path, scalar)| (path.segments(), scalar))
        .collect();
    build_node(&entries, &LeafPath::root())
}

type Group<'a> = (&'a Segment, Vec<(&'a [Segment], &'a Scalar)>);

fn build_node(entries: &[(&[Segment], &Scalar)], at: &LeafPath) -> Result<ValueTree> {
    if entries.is_empty() {
        return Ok(ValueTree::empty_map());
    }

    if let Some((_, scalar)) = entries.iter().find(|(segments, _)| segments.is_empty()) {
        if entries.len() == 1 {
            return Ok(ValueTree::Scalar((*scalar).clone()));
        }
        let reason = if entries.iter().all(|(segments, _)| segments.is_empty()) {
            "the same leaf appears more than once"
        } else {
            "used both as a value and as a container"
        };
        return Err(Error::conflict(at.to_string(), reason));
    }

    let mut groups: Vec<Group<'_>> = Vec::new();
    for &(segments, scalar) in entries {
        let Some((head, rest)) = segments.split_first() else {
            continue;
        };
        match groups.iter_mut().find(|(segment, _)| *segment == head) {
            Some((_, members)) => members.push((rest, scalar)),
            None => groups.push((head, vec![(rest, scalar)])),
        }
    }

    let indices: Option<Vec<usize>> = groups
        .iter()
        .map(|(segment, _)| match segment {
            Segment::Index(i) => Some(*i),
            Segment::Key(_) => None,
        })
        .collect();

    match indices {
        // Group heads are unique, so all below `len` means exactly `0..len`.
        Some(indices) if indices.iter().all(|&i| i < indices.len()) => {
            groups.sort_by_key(|(segment, _)| match segment {
                Segment::Index(i) => *i,
                Segment::Key(_) => usize::MAX,
            });
            let items = groups
                .into_iter()
                .map(|(segment, members)| build_node(&members, &at.child(segment.clone())))
                .collect::<Result<Vec<_>>>()?;
            Ok(ValueTree::List(items))
        }
        Some(_) => build_map(groups, at),
        None if groups.iter().any(|(s, _)| matches!(s, Segment::Index(_))) => Err(
            Error::conflict(at.to_string(), "mixes list indices with map subkeys"),
        ),
        None => build_map(groups, at),
    }
}

fn build_map(groups: Vec<Group<'_>>, at: &LeafPath) -> Result<ValueTree> {
    let entries = groups
        .into_iter()
        .map(|(segment, members)| -> Result<(String, ValueTree)> {
            let child = build_node(&members, &at.child(segment.clone()))?;
            Ok((segment.as_text().into_owned(), child))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ValueTree::Map(entries))
}

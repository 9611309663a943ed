//! Tree merge: reconcile a stored tree against the reference tree's shape.

use crate::core::tree::{Scalar, Segment, ValueTree};

/// Tree shaped exactly like `reference`, filled from `stored`.
///
/// Each reference leaf takes the scalar found at the identical path in `stored`;
/// list indices only match stored lists and subkeys only match stored maps. Any
/// path that is absent, out of range, or not a scalar in `stored` becomes the
/// empty string. Stored branches outside the reference shape are dropped.
pub fn merge_shape(reference: &ValueTree, stored: Option<&ValueTree>) -> ValueTree {
    fill_shape(reference, stored, ValueTree::child)
}

/// Conform a tree rebuilt from job lines to the reference shape.
///
/// Like [`merge_shape`], but segments match by their text: a job file that skips
/// a list index rebuilds a map keyed `"0"`, `"2"`, ... and those entries still
/// land on list positions 0 and 2.
pub fn conform_rebuilt(reference: &ValueTree, rebuilt: &ValueTree) -> ValueTree {
    fill_shape(reference, Some(rebuilt), ValueTree::child_by_text)
}

fn fill_shape<'a>(
    reference: &ValueTree,
    stored: Option<&'a ValueTree>,
    child: fn(&'a ValueTree, &Segment) -> Option<&'a ValueTree>,
) -> ValueTree {
    match reference {
        ValueTree::Scalar(_) => {
            let value = stored
                .and_then(ValueTree::as_scalar)
                .cloned()
                .unwrap_or_else(Scalar::blank);
            ValueTree::Scalar(value)
        }
        ValueTree::List(items) => ValueTree::List(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let counterpart = stored.and_then(|s| child(s, &Segment::Index(i)));
                    fill_shape(item, counterpart, child)
                })
                .collect(),
        ),
        ValueTree::Map(entries) => ValueTree::Map(
            entries
                .iter()
                .map(|(key, item)| {
                    let counterpart = stored.and_then(|s| child(s, &Segment::key(key.as_str())));
                    (key.clone(), fill_shape(item, counterpart, child))
                })
                .collect(),
        ),
    }
}

/// Write `update` on top of `base`.
///
/// Maps merge entry by entry (new subkeys are appended), lists merge by index
/// and keep any trailing base items, and everything else is replaced by the
/// update. Base leaves the update does not mention survive.
pub fn overlay(base: &ValueTree, update: &ValueTree) -> ValueTree {
    match (base, update) {
        (ValueTree::Map(base_entries), ValueTree::Map(update_entries)) => {
            let mut merged = base_entries.clone();
            for (key, value) in update_entries {
                match merged.iter_mut().find(|(k, _)| k == key) {
                    Some((_, existing)) => *existing = overlay(existing, value),
                    None => merged.push((key.clone(), value.clone())),
                }
            }
            ValueTree::Map(merged)
        }
        (ValueTree::List(base_items), ValueTree::List(update_items)) => {
            let mut merged: Vec<ValueTree> = update_items
                .iter()
                .enumerate()
                .map(|(i, value)| match base_items.get(i) {
                    Some(existing) => overlay(existing, value),
                    None => value.clone(),
                })
                .collect();
            merged.extend(base_items.iter().skip(update_items.len()).cloned());
            ValueTree::List(merged)
        }
        _ => update.clone(),
    }
}

/// Give text leaves back the reference's scalar type where the text matches.
///
/// Job files carry text only, so a number like `5` comes back as `"5"`. When a
/// leaf's text is exactly the rendering of a non-text reference scalar at the
/// same path, the reference scalar is used instead. Any other text, such as a
/// translated `"fem"`, stays text.
pub fn restore_scalar_types(tree: ValueTree, reference: &ValueTree) -> ValueTree {
    match tree {
        ValueTree::Scalar(Scalar::Text(text)) => match reference.as_scalar() {
            Some(scalar) if !matches!(scalar, Scalar::Text(_)) && scalar.render() == text => {
                ValueTree::Scalar(scalar.clone())
            }
            _ => ValueTree::Scalar(Scalar::Text(text)),
        },
        ValueTree::List(items) => ValueTree::List(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match reference.child(&Segment::Index(i)) {
                    Some(counterpart) => restore_scalar_types(item, counterpart),
                    None => item,
                })
                .collect(),
        ),
        ValueTree::Map(entries) => ValueTree::Map(
            entries
                .into_iter()
                .map(|(key, item)| {
                    let item = match reference.child(&Segment::key(key.as_str())) {
                        Some(counterpart) => restore_scalar_types(item, counterpart),
                        None => item,
                    };
                    (key, item)
                })
                .collect(),
        ),
        other => other,
    }
}

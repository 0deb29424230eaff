//! Container diffs: slices, maps, containment and length.

use super::CollectionDiffResult;
use crate::value::{Category, Value, ValueKind};

/// First difference between two sequences: length, then index.
///
/// ```rust
/// use assertkit::diff::slice_diff;
/// use assertkit::value::Diffable;
///
/// let got: Vec<_> = [1, 2].iter().map(Diffable::to_value).collect();
/// let want: Vec<_> = [1, 2, 3].iter().map(Diffable::to_value).collect();
/// assert_eq!(
///     slice_diff(&got, &want).to_string(),
///     "slices differ in length\n  got: 2\n  want: 3"
/// );
/// ```
#[must_use]
pub fn slice_diff(got: &[Value], want: &[Value]) -> CollectionDiffResult {
    if got.len() != want.len() {
        return CollectionDiffResult::new(
            "slices differ in length",
            format!("  got: {}\n  want: {}", got.len(), want.len()),
        );
    }
    match got.iter().zip(want).position(|(g, w)| g != w) {
        Some(i) => CollectionDiffResult::new(
            format!("slices differ at index {i}"),
            format!("  got: {}\n  want: {}", got[i], want[i]),
        ),
        None => CollectionDiffResult::none(),
    }
}

/// First difference between two maps.
///
/// `want` is walked in its entry order and the first key that is missing
/// from `got` or holds a different value is reported. Only when every
/// expected key matches is `got` walked for an unexpected key.
#[must_use]
pub fn map_diff(got: &[(Value, Value)], want: &[(Value, Value)]) -> CollectionDiffResult {
    for (key, want_value) in want {
        match lookup(got, key) {
            None => {
                return CollectionDiffResult::new(
                    format!("maps differ: missing key {}", key.quoted()),
                    format!("  expected value: {want_value}"),
                );
            }
            Some(got_value) if got_value != want_value => {
                return CollectionDiffResult::new(
                    format!("maps differ at key {}", key.quoted()),
                    format!("  got: {got_value}\n  want: {want_value}"),
                );
            }
            Some(_) => {}
        }
    }
    for (key, got_value) in got {
        if lookup(want, key).is_none() {
            return CollectionDiffResult::new(
                format!("maps differ: unexpected key {}", key.quoted()),
                format!("  got value: {got_value}"),
            );
        }
    }
    CollectionDiffResult::none()
}

fn lookup<'a>(entries: &'a [(Value, Value)], key: &Value) -> Option<&'a Value> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

/// Check that `container` holds `item`.
///
/// Strings are searched for a substring (or `char`), sequences for an
/// equal element and maps for an equal key. A `None` container and
/// non-container values are shape errors.
#[must_use]
pub fn contains_values(container: &Value, item: &Value, max_items: usize) -> CollectionDiffResult {
    match container.kind() {
        ValueKind::Str(text) => {
            let found = match item.kind() {
                ValueKind::Str(needle) => text.contains(needle.as_str()),
                ValueKind::Scalar(crate::value::Scalar::Char(c)) => text.contains(*c),
                _ => {
                    return CollectionDiffResult::shape(
                        format!("cannot search a string for {}", item.short_type_name()),
                        format!("  item: {}", item.quoted()),
                    );
                }
            };
            if found {
                CollectionDiffResult::none()
            } else {
                CollectionDiffResult::new(
                    format!("string does not contain {}", item.quoted()),
                    format!("  string: {}", container.quoted()),
                )
            }
        }
        ValueKind::Seq(items) => {
            if items.iter().any(|v| v == item) {
                return CollectionDiffResult::none();
            }
            let detail = if items.is_empty() {
                "  collection is empty".to_string()
            } else {
                format!("  elements: {}", listing(items.iter().map(Value::quoted), items.len(), max_items))
            };
            CollectionDiffResult::new(
                format!("collection does not contain {}", item.quoted()),
                detail,
            )
        }
        ValueKind::Map(entries) => {
            if lookup(entries, item).is_some() {
                return CollectionDiffResult::none();
            }
            let detail = if entries.is_empty() {
                "  map is empty".to_string()
            } else {
                format!(
                    "  available keys: {}",
                    listing(entries.iter().map(|(k, _)| k.quoted()), entries.len(), max_items)
                )
            };
            CollectionDiffResult::new(format!("map does not contain key {}", item.quoted()), detail)
        }
        _ => unsupported(container, "check containment in"),
    }
}

/// Check that `container` has `expected` elements (bytes for strings).
#[must_use]
pub fn len_values(container: &Value, expected: usize, max_items: usize) -> CollectionDiffResult {
    let Some(actual) = container.len() else {
        return unsupported(container, "take the length of");
    };
    if actual == expected {
        return CollectionDiffResult::none();
    }
    let mut detail = format!("  got: {actual}\n  want: {expected}");
    if actual > 0 {
        detail.push_str("\n  content: ");
        detail.push_str(&content(container, max_items));
    }
    CollectionDiffResult::new("lengths differ", detail)
}

fn unsupported(container: &Value, operation: &str) -> CollectionDiffResult {
    if container.category() == Category::Nil {
        return CollectionDiffResult::shape(
            "container is None",
            format!("  type: {}", container.short_type_name()),
        );
    }
    CollectionDiffResult::shape(
        format!("cannot {operation} {}", container.short_type_name()),
        format!("  kind: {}", container.category()),
    )
}

fn content(container: &Value, max_items: usize) -> String {
    match container.kind() {
        ValueKind::Seq(items) => listing(items.iter().map(Value::quoted), items.len(), max_items),
        ValueKind::Map(entries) => listing(
            entries
                .iter()
                .map(|(k, v)| format!("{}: {}", k.quoted(), v.quoted())),
            entries.len(),
            max_items,
        ),
        _ => container.quoted(),
    }
}

/// `[a, b, c]`, or `[a, b, ...] (showing first 2 of 5)` past `max_items`.
fn listing(rendered: impl Iterator<Item = String>, total: usize, max_items: usize) -> String {
    let shown: Vec<String> = rendered.take(max_items).collect();
    if total > shown.len() {
        format!(
            "[{}, ...] (showing first {} of {total})",
            shown.join(", "),
            shown.len()
        )
    } else {
        format!("[{}]", shown.join(", "))
    }
}

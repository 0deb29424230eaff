//! Struct diffs: the first differing exported field.

use super::DiffResult;
use crate::value::Field;

/// Report the first exported field, in declaration order, whose values
/// differ. Both field lists must come from the same struct type.
///
/// Non-exported fields are never named. When they are the only source of
/// difference the report says so without revealing which one.
///
/// ```rust
/// use assertkit::diff::struct_diff;
/// use assertkit::value::{Diffable, Field};
///
/// let got = vec![Field::new("name", true, "Ann".to_value())];
/// let want = vec![Field::new("name", true, "Bob".to_value())];
/// assert_eq!(
///     struct_diff(&got, &want).to_string(),
///     "structs differ at field \"name\"\n  got: Ann\n  want: Bob"
/// );
/// ```
#[must_use]
pub fn struct_diff(got: &[Field], want: &[Field]) -> DiffResult {
    let exported = got
        .iter()
        .zip(want)
        .filter(|(g, _)| g.exported)
        .find(|(g, w)| g.value != w.value);
    if let Some((g, w)) = exported {
        return DiffResult::new(
            format!("structs differ at field {:?}", g.name),
            format!("  got: {}\n  want: {}", g.value, w.value),
        );
    }
    if got != want {
        return DiffResult::new("structs differ in unexported fields", "");
    }
    DiffResult::none()
}

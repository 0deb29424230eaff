//! Scalar comparison: the fallback for values with no inner structure.

use super::DiffResult;
use crate::value::Value;

/// Deep equality over lowered values, type names included.
///
/// Floats follow IEEE semantics, so `NaN` never equals itself.
#[must_use]
pub fn values_equal(got: &Value, want: &Value) -> bool {
    got == want
}

/// Report two values verbatim when they differ.
///
/// ```rust
/// use assertkit::diff::scalar_diff;
/// use assertkit::value::Diffable;
///
/// let r = scalar_diff(&1.5f64.to_value(), &2.0f64.to_value());
/// assert_eq!(r.to_string(), "values differ\n  got: 1.5\n  want: 2");
/// ```
#[must_use]
pub fn scalar_diff(got: &Value, want: &Value) -> DiffResult {
    if values_equal(got, want) {
        return DiffResult::none();
    }
    DiffResult::new("values differ", format!("  got: {got}\n  want: {want}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Diffable;

    #[test]
    fn test_equal_scalars() {
        assert!(!scalar_diff(&7u8.to_value(), &7u8.to_value()).has_diff);
    }

    #[test]
    fn test_bool_diff() {
        let r = scalar_diff(&true.to_value(), &false.to_value());
        assert_eq!(r.message(), "values differ\n  got: true\n  want: false");
    }

    #[test]
    fn test_nan_is_never_equal() {
        assert!(!values_equal(&f64::NAN.to_value(), &f64::NAN.to_value()));
    }

    #[test]
    fn test_none_renders_as_none() {
        let got: Option<i32> = None;
        let r = scalar_diff(&got.to_value(), &Some(3).to_value());
        assert_eq!(r.message(), "values differ\n  got: None\n  want: 3");
    }
}

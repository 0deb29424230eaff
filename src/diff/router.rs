//! Type check and category dispatch for deep diffs.

use super::{map_diff, scalar_diff, slice_diff, struct_diff, DiffConfig, DiffResult, StringDiffer};
use crate::value::{Value, ValueKind};

/// Dispatches a comparison to the differ for the operands' category.
///
/// 1. Equal values produce no diff.
/// 2. Different type names produce `types differ` and nothing else.
/// 3. Otherwise: sequences go to [`slice_diff`], maps to [`map_diff`],
///    structs to [`struct_diff`], strings to [`StringDiffer`] and
///    everything else to [`scalar_diff`].
///
/// # Example
///
/// ```rust
/// use assertkit::diff::{DeepDiffRouter, DiffConfig};
/// use assertkit::value::Diffable;
///
/// let router = DeepDiffRouter::new(DiffConfig::default());
/// let r = router.diff(&1u8.to_value(), &"1".to_value());
/// assert!(r.type_mismatch);
/// assert_eq!(r.to_string(), "types differ\n  got: u8\n  want: str");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepDiffRouter {
    config: DiffConfig,
}

impl DeepDiffRouter {
    /// Create a router.
    #[must_use]
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    /// Compare `got` against `want`.
    #[must_use]
    pub fn diff(&self, got: &Value, want: &Value) -> DiffResult {
        if got == want {
            return DiffResult::none();
        }
        if got.type_name() != want.type_name() {
            tracing::trace!(got = got.type_name(), want = want.type_name(), "type mismatch");
            let mut result = DiffResult::new(
                "types differ",
                format!("  got: {}\n  want: {}", got.type_name(), want.type_name()),
            );
            result.type_mismatch = true;
            return result;
        }
        tracing::trace!(category = %got.category(), "dispatching deep diff");
        match (got.kind(), want.kind()) {
            (ValueKind::Seq(g), ValueKind::Seq(w)) => slice_diff(g, w).into(),
            (ValueKind::Map(g), ValueKind::Map(w)) => map_diff(g, w).into(),
            (ValueKind::Struct(g), ValueKind::Struct(w)) => struct_diff(g, w),
            (ValueKind::Str(g), ValueKind::Str(w)) => StringDiffer::new(self.config).diff(g, w),
            _ => scalar_diff(got, want),
        }
    }
}

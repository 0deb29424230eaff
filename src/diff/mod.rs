//! Diff engine: explains *where* and *how* two values differ.
//!
//! - [`deep_diff`] - type check, then dispatch on the value's category
//! - [`diff_strings`] - byte, rune and line level string diffs
//! - [`contains_diff`] / [`len_diff`] - container checks with truncated
//!   listings
//! - [`Differ`] - the same operations under a [`DiffConfig`]
//!
//! Every operation is pure: the same inputs always produce byte-identical
//! results, and nothing is shared between calls.
//!
//! # Example
//!
//! ```rust
//! use assertkit::diff::deep_diff;
//!
//! let result = deep_diff(&vec![1, 2, 4], &vec![1, 2, 3]);
//! assert!(result.has_diff);
//! assert_eq!(
//!     result.to_string(),
//!     "slices differ at index 2\n  got: 4\n  want: 3"
//! );
//! ```

mod collection;
mod router;
mod scalar;
mod string;
mod structure;

use std::fmt;

use crate::value::{Diffable, Value};

pub use collection::{contains_values, len_values, map_diff, slice_diff};
pub use router::DeepDiffRouter;
pub use scalar::{scalar_diff, values_equal};
pub use string::StringDiffer;
pub use structure::struct_diff;

/// Default number of elements listed before a container is truncated.
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Default length, in bytes, above which single-line string diffs show a
/// window around the divergence instead of both strings.
pub const DEFAULT_LONG_STRING_THRESHOLD: usize = 50;

/// Presentation preference for multi-line string diffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffFormat {
    /// Context for small changes, unified when more than four lines change.
    #[default]
    Auto,
    /// Always a `-`/`+` context block.
    Context,
    /// Always a unified hunk.
    Unified,
    /// Not implemented yet; rendered as [`DiffFormat::Context`].
    SideBySide,
}

/// Settings for a [`Differ`].
///
/// ```rust
/// use assertkit::diff::{DiffConfig, DiffFormat};
///
/// let config = DiffConfig::new()
///     .with_format(DiffFormat::Unified)
///     .with_max_items(5);
/// assert_eq!(config.format, DiffFormat::Unified);
/// assert_eq!(config.max_items, 5);
/// assert_eq!(config.long_string_threshold, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffConfig {
    /// Multi-line presentation preference.
    pub format: DiffFormat,
    /// Elements listed before truncation in container diagnostics.
    pub max_items: usize,
    /// Byte length above which single-line diffs are windowed.
    pub long_string_threshold: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            format: DiffFormat::Auto,
            max_items: DEFAULT_MAX_ITEMS,
            long_string_threshold: DEFAULT_LONG_STRING_THRESHOLD,
        }
    }
}

impl DiffConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the multi-line presentation.
    #[must_use]
    pub fn with_format(mut self, format: DiffFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the truncation limit for container listings.
    #[must_use]
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Set the windowing threshold for single-line strings.
    #[must_use]
    pub fn with_long_string_threshold(mut self, threshold: usize) -> Self {
        self.long_string_threshold = threshold;
        self
    }
}

/// Outcome of comparing two values.
///
/// `summary` is the first line of the diagnostic, `context` the indented
/// or labelled lines that follow it. [`DiffResult::message`] (and
/// `Display`) joins the two.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiffResult {
    /// Whether the values differ.
    pub has_diff: bool,
    /// One-line description of the first difference.
    pub summary: String,
    /// Supporting detail: got/want lines or a context block.
    pub context: String,
    /// 1-based line of the first difference, for multi-line strings.
    pub line_number: Option<usize>,
    /// The unified rendering, when that format was selected.
    pub unified_diff: Option<String>,
    /// Whether the operands had different types.
    pub type_mismatch: bool,
}

impl DiffResult {
    /// A result reporting no difference.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A result reporting a difference.
    #[must_use]
    pub fn new(summary: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            has_diff: true,
            summary: summary.into(),
            context: context.into(),
            ..Self::default()
        }
    }

    /// The full diagnostic text; empty when there is no difference.
    #[must_use]
    pub fn message(&self) -> String {
        if self.context.is_empty() {
            self.summary.clone()
        } else {
            format!("{}\n{}", self.summary, self.context)
        }
    }
}

impl fmt::Display for DiffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Outcome of a container check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionDiffResult {
    /// Whether the check failed.
    pub has_diff: bool,
    /// One-line description.
    pub summary: String,
    /// Supporting detail (lengths, truncated content, available keys).
    pub detail: String,
    /// The container was `None` or not a container at all.
    pub shape_error: bool,
}

impl CollectionDiffResult {
    /// A passing result.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A failing result.
    #[must_use]
    pub fn new(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            has_diff: true,
            summary: summary.into(),
            detail: detail.into(),
            shape_error: false,
        }
    }

    /// A failure caused by the container's shape rather than its content.
    #[must_use]
    pub fn shape(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            shape_error: true,
            ..Self::new(summary, detail)
        }
    }

    /// The full diagnostic text.
    #[must_use]
    pub fn message(&self) -> String {
        if self.detail.is_empty() {
            self.summary.clone()
        } else {
            format!("{}\n{}", self.summary, self.detail)
        }
    }
}

impl fmt::Display for CollectionDiffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl From<CollectionDiffResult> for DiffResult {
    fn from(result: CollectionDiffResult) -> Self {
        Self {
            has_diff: result.has_diff,
            summary: result.summary,
            context: result.detail,
            ..Self::default()
        }
    }
}

/// The diff engine under a fixed [`DiffConfig`].
///
/// ```rust
/// use assertkit::diff::{DiffConfig, DiffFormat, Differ};
///
/// let differ = Differ::with_config(DiffConfig::new().with_format(DiffFormat::Unified));
/// let result = differ.diff_strings("a\nb\nc", "a\nB\nc");
/// assert!(result.unified_diff.is_some());
/// assert!(result.context.starts_with("unified diff:\n--- got\n+++ want\n@@"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Differ {
    config: DiffConfig,
}

impl Differ {
    /// Create a differ with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a differ with the given configuration.
    #[must_use]
    pub fn with_config(config: DiffConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compare two values of any [`Diffable`] types.
    pub fn deep_diff<G, W>(&self, got: &G, want: &W) -> DiffResult
    where
        G: Diffable + ?Sized,
        W: Diffable + ?Sized,
    {
        self.diff_values(&got.to_value(), &want.to_value())
    }

    /// Compare two already-lowered values.
    #[must_use]
    pub fn diff_values(&self, got: &Value, want: &Value) -> DiffResult {
        DeepDiffRouter::new(self.config).diff(got, want)
    }

    /// Compare two strings.
    #[must_use]
    pub fn diff_strings(&self, got: &str, want: &str) -> DiffResult {
        StringDiffer::new(self.config).diff(got, want)
    }

    /// Check that `container` holds `item`.
    pub fn contains_diff<C, I>(&self, container: &C, item: &I) -> CollectionDiffResult
    where
        C: Diffable + ?Sized,
        I: Diffable + ?Sized,
    {
        contains_values(&container.to_value(), &item.to_value(), self.config.max_items)
    }

    /// Check that `container` has `expected` elements.
    pub fn len_diff<C>(&self, container: &C, expected: usize) -> CollectionDiffResult
    where
        C: Diffable + ?Sized,
    {
        len_values(&container.to_value(), expected, self.config.max_items)
    }
}

/// Compare two values with the default configuration.
pub fn deep_diff<G, W>(got: &G, want: &W) -> DiffResult
where
    G: Diffable + ?Sized,
    W: Diffable + ?Sized,
{
    Differ::new().deep_diff(got, want)
}

/// Compare two strings with the default configuration.
///
/// ```rust
/// use assertkit::diff::diff_strings;
///
/// let result = diff_strings("hello world", "hello World");
/// assert_eq!(result.summary, "string values differ at position 6");
/// ```
#[must_use]
pub fn diff_strings(got: &str, want: &str) -> DiffResult {
    Differ::new().diff_strings(got, want)
}

/// Check containment with the default configuration.
pub fn contains_diff<C, I>(container: &C, item: &I) -> CollectionDiffResult
where
    C: Diffable + ?Sized,
    I: Diffable + ?Sized,
{
    Differ::new().contains_diff(container, item)
}

/// Check length with the default configuration.
pub fn len_diff<C>(container: &C, expected: usize) -> CollectionDiffResult
where
    C: Diffable + ?Sized,
{
    Differ::new().len_diff(container, expected)
}

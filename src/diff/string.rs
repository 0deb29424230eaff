//! String diffs at byte, rune and line granularity.

use std::fmt::Write as _;

use super::{DiffConfig, DiffFormat, DiffResult};

/// Characters shown on each side of the divergence in windowed output.
const WINDOW_RADIUS: usize = 20;

/// Surrounding lines in a multi-line context block.
const CONTEXT_LINES: usize = 3;

/// Surrounding lines once either side has more than [`LONG_TEXT_LINES`].
const WIDE_CONTEXT_LINES: usize = 5;

const LONG_TEXT_LINES: usize = 10;

/// Changed lines above which [`DiffFormat::Auto`] switches to unified output.
const UNIFIED_THRESHOLD: usize = 4;

/// Explains where two strings diverge.
///
/// - Single-line ASCII strings report the first differing byte.
/// - Single-line strings with any non-ASCII character report the first
///   differing `char`, since byte offsets split multi-byte sequences.
/// - Multi-line strings report the first differing line along with a
///   context block or unified hunk.
///
/// # Example
///
/// ```rust
/// use assertkit::diff::{DiffConfig, StringDiffer};
///
/// let differ = StringDiffer::new(DiffConfig::default());
///
/// let r = differ.diff("日本語", "日本誤");
/// assert_eq!(r.summary, "string values differ at rune position 2");
///
/// let r = differ.diff("one\ntwo\nthree", "one\n2\nthree");
/// assert_eq!(r.summary, "difference at line 2");
/// assert_eq!(r.line_number, Some(2));
/// assert_eq!(r.context, "context:\n  one\n- two\n+ 2\n  three");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StringDiffer {
    config: DiffConfig,
}

impl StringDiffer {
    /// Create a string differ.
    #[must_use]
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    /// Compare `got` against `want`.
    #[must_use]
    pub fn diff(&self, got: &str, want: &str) -> DiffResult {
        if got == want {
            return DiffResult::none();
        }
        if got.contains('\n') || want.contains('\n') {
            return self.diff_lines(got, want);
        }
        let long = got.len() > self.config.long_string_threshold
            || want.len() > self.config.long_string_threshold;
        if got.is_ascii() && want.is_ascii() {
            let pos = first_divergence(got.as_bytes(), want.as_bytes());
            DiffResult::new(
                format!("string values differ at position {pos}"),
                got_want(got, want, pos, long, |s, range| s[range].to_string()),
            )
        } else {
            let got_chars: Vec<char> = got.chars().collect();
            let want_chars: Vec<char> = want.chars().collect();
            let pos = first_divergence(&got_chars, &want_chars);
            DiffResult::new(
                format!("string values differ at rune position {pos}"),
                got_want(got, want, pos, long, |s, range| {
                    s.chars().skip(range.start).take(range.len()).collect()
                }),
            )
        }
    }

    fn diff_lines(&self, got: &str, want: &str) -> DiffResult {
        let got_lines: Vec<&str> = got.split('\n').collect();
        let want_lines: Vec<&str> = want.split('\n').collect();
        let total = got_lines.len().max(want_lines.len());

        let first = (0..total)
            .find(|&i| got_lines.get(i) != want_lines.get(i))
            .unwrap_or(total);

        let radius = if got_lines.len() > LONG_TEXT_LINES || want_lines.len() > LONG_TEXT_LINES {
            WIDE_CONTEXT_LINES
        } else {
            CONTEXT_LINES
        };
        let start = first.saturating_sub(radius);
        let end = (first + radius + 1).min(total);

        let (block, changed) = context_block(&got_lines, &want_lines, start, end);

        let format = match self.config.format {
            DiffFormat::Context => DiffFormat::Context,
            DiffFormat::Unified => DiffFormat::Unified,
            DiffFormat::SideBySide => {
                tracing::debug!("side-by-side diffs are not supported, using context format");
                DiffFormat::Context
            }
            DiffFormat::Auto if changed > UNIFIED_THRESHOLD => DiffFormat::Unified,
            DiffFormat::Auto => DiffFormat::Context,
        };

        let mut result = DiffResult::new(format!("difference at line {}", first + 1), "");
        result.line_number = Some(first + 1);
        if format == DiffFormat::Unified {
            let unified = unified_hunk(&got_lines, &want_lines, start, end);
            result.context = format!("unified diff:\n{unified}");
            result.unified_diff = Some(unified);
        } else {
            result.context = format!("context:\n{block}");
        }
        result
    }
}

fn first_divergence<T: PartialEq>(got: &[T], want: &[T]) -> usize {
    got.iter()
        .zip(want)
        .position(|(g, w)| g != w)
        .unwrap_or_else(|| got.len().min(want.len()))
}

/// The got/want lines of a single-line diff, windowed around `pos` when
/// either operand is long. `slice` extracts a unit range from a string.
fn got_want<F>(got: &str, want: &str, pos: usize, long: bool, slice: F) -> String
where
    F: Fn(&str, std::ops::Range<usize>) -> String,
{
    if !long {
        return format!("  got: {got:?}\n  want: {want:?}");
    }
    let window = |s: &str, len: usize| {
        let start = pos.saturating_sub(WINDOW_RADIUS);
        let end = (pos + WINDOW_RADIUS).min(len);
        let mut out = String::new();
        if start > 0 {
            out.push_str("...");
        }
        if start < end {
            out.push_str(&slice(s, start..end));
        }
        if end < len {
            out.push_str("...");
        }
        out
    };
    // Both operands are measured in the same unit as `pos`.
    let (got_len, want_len) = if got.is_ascii() && want.is_ascii() {
        (got.len(), want.len())
    } else {
        (got.chars().count(), want.chars().count())
    };
    format!(
        "  got: {}\n  want: {}",
        window(got, got_len),
        window(want, want_len)
    )
}

/// `-`/`+` block for lines `start..end`; returns the block and the number
/// of changed lines in it.
fn context_block(got: &[&str], want: &[&str], start: usize, end: usize) -> (String, usize) {
    let mut lines = Vec::with_capacity(end - start);
    let mut changed = 0;
    for i in start..end {
        match (got.get(i), want.get(i)) {
            (Some(g), Some(w)) if g == w => lines.push(format!("  {g}")),
            (g, w) => {
                if let Some(g) = g {
                    lines.push(format!("- {g}"));
                    changed += 1;
                }
                if let Some(w) = w {
                    lines.push(format!("+ {w}"));
                    changed += 1;
                }
            }
        }
    }
    (lines.join("\n"), changed)
}

/// A single unified hunk covering lines `start..end`.
fn unified_hunk(got: &[&str], want: &[&str], start: usize, end: usize) -> String {
    let got_count = end.min(got.len()).saturating_sub(start);
    let want_count = end.min(want.len()).saturating_sub(start);
    let hunk_start = |count: usize| if count == 0 { start } else { start + 1 };

    let mut out = String::from("--- got\n+++ want\n");
    let _ = write!(
        out,
        "@@ -{},{} +{},{} @@",
        hunk_start(got_count),
        got_count,
        hunk_start(want_count),
        want_count
    );

    let mut removed: Vec<&str> = Vec::new();
    let mut added: Vec<&str> = Vec::new();
    let flush = |out: &mut String, removed: &mut Vec<&str>, added: &mut Vec<&str>| {
        for line in removed.drain(..) {
            let _ = write!(out, "\n-{line}");
        }
        for line in added.drain(..) {
            let _ = write!(out, "\n+{line}");
        }
    };

    for i in start..end {
        match (got.get(i), want.get(i)) {
            (Some(g), Some(w)) if g == w => {
                flush(&mut out, &mut removed, &mut added);
                let _ = write!(out, "\n {g}");
            }
            (g, w) => {
                removed.extend(g);
                added.extend(w);
            }
        }
    }
    flush(&mut out, &mut removed, &mut added);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn differ() -> StringDiffer {
        StringDiffer::new(DiffConfig::default())
    }

    #[test]
    fn test_equal_strings_have_no_diff() {
        let r = differ().diff("same", "same");
        assert!(!r.has_diff);
        assert!(r.summary.is_empty());
    }

    #[test]
    fn test_byte_position() {
        let r = differ().diff("hello world", "hello World");
        assert!(r.has_diff);
        assert_eq!(r.summary, "string values differ at position 6");
        assert_eq!(r.context, "  got: \"hello world\"\n  want: \"hello World\"");
    }

    #[test]
    fn test_prefix_reports_shorter_length() {
        let r = differ().diff("abc", "abcd");
        assert_eq!(r.summary, "string values differ at position 3");
    }

    #[test]
    fn test_rune_position_not_byte_position() {
        let r = differ().diff("日本語", "日本誤");
        assert_eq!(r.summary, "string values differ at rune position 2");
        assert!(!r.summary.contains("position 6"));
    }

    #[test]
    fn test_mixed_ascii_uses_runes() {
        let r = differ().diff("café au lait", "café au laid");
        assert_eq!(r.summary, "string values differ at rune position 11");
    }

    #[test]
    fn test_long_strings_are_windowed() {
        let got = format!("{}X{}", "a".repeat(60), "b".repeat(40));
        let want = format!("{}Y{}", "a".repeat(60), "b".repeat(40));
        let r = differ().diff(&got, &want);
        assert_eq!(r.summary, "string values differ at position 60");
        let expected_got = format!("...{}X{}...", "a".repeat(20), "b".repeat(19));
        let expected_want = format!("...{}Y{}...", "a".repeat(20), "b".repeat(19));
        assert_eq!(
            r.context,
            format!("  got: {expected_got}\n  want: {expected_want}")
        );
    }

    #[test]
    fn test_long_rune_strings_are_windowed() {
        let got = format!("{}語", "é".repeat(60));
        let want = format!("{}誤", "é".repeat(60));
        let r = differ().diff(&got, &want);
        assert_eq!(r.summary, "string values differ at rune position 60");
        assert!(r.context.contains(&format!("...{}語", "é".repeat(20))));
        assert!(r.context.contains(&format!("...{}誤", "é".repeat(20))));
    }

    #[test]
    fn test_short_side_of_long_diff() {
        let got = "a".repeat(55);
        let r = differ().diff(&got, "a");
        assert_eq!(r.summary, "string values differ at position 1");
        assert!(r.context.ends_with("  want: a"));
    }

    #[test]
    fn test_multiline_context_block() {
        let r = differ().diff("a\nb\nc", "a\nB\nc");
        assert_eq!(r.summary, "difference at line 2");
        assert_eq!(r.line_number, Some(2));
        assert_eq!(r.context, "context:\n  a\n- b\n+ B\n  c");
        assert!(r.unified_diff.is_none());
    }

    #[test]
    fn test_multiline_extra_line() {
        let r = differ().diff("a\nb", "a\nb\nc");
        assert_eq!(r.summary, "difference at line 3");
        assert_eq!(r.context, "context:\n  a\n  b\n+ c");
    }

    #[test]
    fn test_multiline_window_is_bounded() {
        let got: Vec<String> = (1..=9).map(|i| format!("line {i}")).collect();
        let mut want = got.clone();
        want[4] = "changed".to_string();
        let r = differ().diff(&got.join("\n"), &want.join("\n"));
        assert_eq!(r.summary, "difference at line 5");
        // three lines either side of line 5
        assert!(r.context.contains("  line 2"));
        assert!(!r.context.contains("line 1\n"));
        assert!(r.context.contains("  line 8"));
        assert!(!r.context.contains("line 9"));
    }

    #[test]
    fn test_wide_window_for_long_texts() {
        let got: Vec<String> = (1..=12).map(|i| format!("line {i}")).collect();
        let mut want = got.clone();
        want[6] = "changed".to_string();
        let r = differ().diff(&got.join("\n"), &want.join("\n"));
        assert_eq!(r.summary, "difference at line 7");
        assert!(r.context.contains("  line 2"));
        assert!(!r.context.contains("line 1\n"));
        assert!(r.context.contains("  line 12"));
    }

    #[test]
    fn test_auto_switches_to_unified() {
        let got = "1\n2\n3\n4\n5\n6";
        let want = "x1\nx2\nx3\nx4\n5\n6";
        let r = differ().diff(got, want);
        assert_eq!(r.summary, "difference at line 1");
        let unified = r.unified_diff.clone().expect("unified selected");
        assert_eq!(
            unified,
            "--- got\n+++ want\n@@ -1,4 +1,4 @@\n-1\n-2\n-3\n-4\n+x1\n+x2\n+x3\n+x4"
        );
        assert_eq!(r.context, format!("unified diff:\n{unified}"));
    }

    #[test]
    fn test_auto_keeps_context_for_few_changes() {
        let r = differ().diff("1\n2\n3", "1\nx\ny");
        assert!(r.context.starts_with("context:\n"));
        assert!(r.unified_diff.is_none());
    }

    #[test]
    fn test_explicit_context_is_honoured() {
        let differ = StringDiffer::new(DiffConfig::new().with_format(DiffFormat::Context));
        let r = differ.diff("1\n2\n3\n4", "a\nb\nc\nd");
        assert!(r.context.starts_with("context:\n- 1\n+ a"));
        assert!(r.unified_diff.is_none());
    }

    #[test]
    fn test_explicit_unified_is_honoured() {
        let differ = StringDiffer::new(DiffConfig::new().with_format(DiffFormat::Unified));
        let r = differ.diff("a\nb\nc", "a\nB\nc");
        assert_eq!(
            r.unified_diff.as_deref(),
            Some("--- got\n+++ want\n@@ -1,3 +1,3 @@\n a\n-b\n+B\n c")
        );
    }

    #[test]
    fn test_unified_hunk_with_missing_side() {
        let differ = StringDiffer::new(DiffConfig::new().with_format(DiffFormat::Unified));
        let r = differ.diff("a\nb", "a\nb\nc\nd");
        assert_eq!(
            r.unified_diff.as_deref(),
            Some("--- got\n+++ want\n@@ -1,2 +1,4 @@\n a\n b\n+c\n+d")
        );
    }

    #[test]
    fn test_side_by_side_falls_back_to_context() {
        let differ = StringDiffer::new(DiffConfig::new().with_format(DiffFormat::SideBySide));
        let r = differ.diff("a\nb", "a\nc");
        assert!(r.context.starts_with("context:\n"));
    }

    #[test]
    fn test_idempotent() {
        let got = "alpha\nbeta\ngamma\ndelta";
        let want = "alpha\nBETA\ngamma\nDELTA";
        assert_eq!(differ().diff(got, want), differ().diff(got, want));
    }
}

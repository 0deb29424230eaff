// Matcher factories are routinely built inline and passed straight on.
#![allow(clippy::must_use_candidate)]

//! Composable matchers for `assert_that!`.
//!
//! - [`Matcher`] trait for custom matchers
//! - value matchers: [`eq`], [`contains`], [`has_len`], [`satisfies`]
//! - combinators: [`all_of`], [`any_of`], [`not`]
//!
//! [`eq`] explains a mismatch with the same diff as
//! [`equal`](super::equal).
//!
//! # Example
//!
//! ```rust
//! use assertkit::assert_that;
//! use assertkit::assertions::matcher::{boxed, all_of, contains, eq, has_len, not, Matcher};
//!
//! assert_that!(vec![1, 2, 3], eq(vec![1, 2, 3]));
//! assert_that!(vec![1, 2, 3], all_of(vec![boxed(has_len(3)), boxed(contains(2))]));
//! assert_that!("hello", not(contains("bye")));
//!
//! let m = eq(vec![1, 2, 3]);
//! assert_eq!(
//!     m.describe_mismatch(&vec![1, 2, 4]),
//!     "slices differ at index 2\n  got: 4\n  want: 3"
//! );
//! ```

use std::fmt::Debug;
use std::marker::PhantomData;

use crate::diff::Differ;
use crate::value::{Diffable, Value};

/// A reusable check on a value.
///
/// # Implementing Custom Matchers
///
/// ```rust
/// use assertkit::assertions::matcher::Matcher;
///
/// struct IsEven;
///
/// impl Matcher<i32> for IsEven {
///     fn matches(&self, value: &i32) -> bool {
///         value % 2 == 0
///     }
///
///     fn describe(&self) -> String {
///         "is even".to_string()
///     }
///
///     fn describe_mismatch(&self, value: &i32) -> String {
///         format!("{value} is odd")
///     }
/// }
///
/// assert!(IsEven.matches(&4));
/// assert_eq!(IsEven.describe_mismatch(&3), "3 is odd");
/// ```
pub trait Matcher<T: ?Sized> {
    /// Whether `value` passes.
    fn matches(&self, value: &T) -> bool;

    /// What a passing value looks like.
    fn describe(&self) -> String;

    /// Why `value` fails.
    fn describe_mismatch(&self, value: &T) -> String;
}

impl<T: ?Sized> Matcher<T> for Box<dyn Matcher<T>> {
    fn matches(&self, value: &T) -> bool {
        (**self).matches(value)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn describe_mismatch(&self, value: &T) -> String {
        (**self).describe_mismatch(value)
    }
}

/// Box a matcher so matchers of different types can share a `Vec`.
pub fn boxed<T: ?Sized, M: Matcher<T> + 'static>(matcher: M) -> Box<dyn Matcher<T>> {
    Box::new(matcher)
}

/// The expectation text of `matcher`, with `T` fixed by `value`.
///
/// Matchers like [`eq`] implement [`Matcher`] for many value types, so
/// `describe` alone cannot pick one.
#[doc(hidden)]
pub fn describe_for<T: ?Sized, M: Matcher<T> + ?Sized>(matcher: &M, _value: &T) -> String {
    matcher.describe()
}

/// Panic unless a value matches a matcher.
///
/// # Panics
///
/// Panics with the matcher's mismatch description and expectation.
///
/// # Example
///
/// ```rust
/// use assertkit::{assert_that, assertions::matcher::has_len};
///
/// assert_that!(vec!['a', 'b'], has_len(2));
/// assert_that!("abc", has_len(3), "checking {}", "abc");
/// ```
#[macro_export]
macro_rules! assert_that {
    ($value:expr, $matcher:expr $(,)?) => {{
        let value = &$value;
        let matcher = &$matcher;
        if !$crate::assertions::matcher::Matcher::matches(matcher, value) {
            panic!(
                "assertion failed: {}\n  expected: {}",
                $crate::assertions::matcher::Matcher::describe_mismatch(matcher, value),
                $crate::assertions::matcher::describe_for(matcher, value),
            );
        }
    }};
    ($value:expr, $matcher:expr, $($arg:tt)+) => {{
        let value = &$value;
        let matcher = &$matcher;
        if !$crate::assertions::matcher::Matcher::matches(matcher, value) {
            panic!(
                "assertion failed: {}\n  expected: {}\n  message: {}",
                $crate::assertions::matcher::Matcher::describe_mismatch(matcher, value),
                $crate::assertions::matcher::describe_for(matcher, value),
                format_args!($($arg)+)
            );
        }
    }};
}

/// Deep equality with `want`.
pub fn eq<W: Diffable>(want: W) -> EqMatcher {
    EqMatcher {
        want: want.to_value(),
        differ: Differ::new(),
    }
}

/// Matcher returned by [`eq`].
#[derive(Debug, Clone)]
pub struct EqMatcher {
    want: Value,
    differ: Differ,
}

impl EqMatcher {
    /// Diff with `differ` instead of the default one.
    pub fn using(mut self, differ: Differ) -> Self {
        self.differ = differ;
        self
    }
}

impl<T: Diffable + ?Sized> Matcher<T> for EqMatcher {
    fn matches(&self, value: &T) -> bool {
        !self.differ.diff_values(&value.to_value(), &self.want).has_diff
    }

    fn describe(&self) -> String {
        format!("equals {}", self.want)
    }

    fn describe_mismatch(&self, value: &T) -> String {
        self.differ
            .diff_values(&value.to_value(), &self.want)
            .message()
    }
}

/// Containment of `item`: substring, element or map key.
pub fn contains<I: Diffable>(item: I) -> ContainsMatcher {
    ContainsMatcher {
        item: item.to_value(),
        differ: Differ::new(),
    }
}

/// Matcher returned by [`contains`].
#[derive(Debug, Clone)]
pub struct ContainsMatcher {
    item: Value,
    differ: Differ,
}

impl<C: Diffable + ?Sized> Matcher<C> for ContainsMatcher {
    fn matches(&self, value: &C) -> bool {
        !self.differ.contains_diff(value, &self.item).has_diff
    }

    fn describe(&self) -> String {
        format!("contains {}", self.item.quoted())
    }

    fn describe_mismatch(&self, value: &C) -> String {
        self.differ.contains_diff(value, &self.item).message()
    }
}

/// Exact length (bytes for strings).
pub fn has_len(expected: usize) -> HasLenMatcher {
    HasLenMatcher { expected }
}

/// Matcher returned by [`has_len`].
#[derive(Debug, Clone, Copy)]
pub struct HasLenMatcher {
    expected: usize,
}

impl<C: Diffable + ?Sized> Matcher<C> for HasLenMatcher {
    fn matches(&self, value: &C) -> bool {
        !Differ::new().len_diff(value, self.expected).has_diff
    }

    fn describe(&self) -> String {
        format!("has length {}", self.expected)
    }

    fn describe_mismatch(&self, value: &C) -> String {
        Differ::new().len_diff(value, self.expected).message()
    }
}

/// A predicate with a description.
///
/// ```rust
/// use assertkit::assertions::matcher::{satisfies, Matcher};
///
/// let even = satisfies(|x: &i32| x % 2 == 0, "is even");
/// assert!(even.matches(&4));
/// assert_eq!(even.describe_mismatch(&3), "3 does not satisfy: is even");
/// ```
pub fn satisfies<T, F>(predicate: F, description: &str) -> SatisfiesMatcher<T, F>
where
    T: ?Sized,
    F: Fn(&T) -> bool,
{
    SatisfiesMatcher {
        predicate,
        description: description.to_string(),
        _value: PhantomData,
    }
}

/// Matcher returned by [`satisfies`].
pub struct SatisfiesMatcher<T: ?Sized, F> {
    predicate: F,
    description: String,
    _value: PhantomData<fn(&T)>,
}

impl<T: Debug + ?Sized, F: Fn(&T) -> bool> Matcher<T> for SatisfiesMatcher<T, F> {
    fn matches(&self, value: &T) -> bool {
        (self.predicate)(value)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }

    fn describe_mismatch(&self, value: &T) -> String {
        format!("{value:?} does not satisfy: {}", self.description)
    }
}

/// Invert a matcher.
pub fn not<M>(matcher: M) -> NotMatcher<M> {
    NotMatcher { inner: matcher }
}

/// Matcher returned by [`not`].
#[derive(Debug, Clone)]
pub struct NotMatcher<M> {
    inner: M,
}

impl<T: ?Sized, M: Matcher<T>> Matcher<T> for NotMatcher<M> {
    fn matches(&self, value: &T) -> bool {
        !self.inner.matches(value)
    }

    fn describe(&self) -> String {
        format!("not {}", self.inner.describe())
    }

    fn describe_mismatch(&self, _value: &T) -> String {
        format!("unexpectedly matched: {}", self.inner.describe())
    }
}

/// Pass when every matcher passes.
pub fn all_of<T: ?Sized>(matchers: Vec<Box<dyn Matcher<T>>>) -> AllOfMatcher<T> {
    AllOfMatcher { matchers }
}

/// Matcher returned by [`all_of`].
pub struct AllOfMatcher<T: ?Sized> {
    matchers: Vec<Box<dyn Matcher<T>>>,
}

impl<T: ?Sized> Matcher<T> for AllOfMatcher<T> {
    fn matches(&self, value: &T) -> bool {
        self.matchers.iter().all(|m| m.matches(value))
    }

    fn describe(&self) -> String {
        let parts: Vec<_> = self.matchers.iter().map(|m| m.describe()).collect();
        format!("all of [{}]", parts.join(", "))
    }

    // Only the failing matchers are reported.
    fn describe_mismatch(&self, value: &T) -> String {
        let failures: Vec<_> = self
            .matchers
            .iter()
            .filter(|m| !m.matches(value))
            .map(|m| m.describe_mismatch(value))
            .collect();
        failures.join("\n")
    }
}

/// Pass when at least one matcher passes.
pub fn any_of<T: ?Sized>(matchers: Vec<Box<dyn Matcher<T>>>) -> AnyOfMatcher<T> {
    AnyOfMatcher { matchers }
}

/// Matcher returned by [`any_of`].
pub struct AnyOfMatcher<T: ?Sized> {
    matchers: Vec<Box<dyn Matcher<T>>>,
}

impl<T: ?Sized> Matcher<T> for AnyOfMatcher<T> {
    fn matches(&self, value: &T) -> bool {
        self.matchers.iter().any(|m| m.matches(value))
    }

    fn describe(&self) -> String {
        let parts: Vec<_> = self.matchers.iter().map(|m| m.describe()).collect();
        format!("any of [{}]", parts.join(", "))
    }

    fn describe_mismatch(&self, value: &T) -> String {
        let parts: Vec<_> = self
            .matchers
            .iter()
            .map(|m| m.describe_mismatch(value))
            .collect();
        format!("no matcher passed\n{}", parts.join("\n"))
    }
}

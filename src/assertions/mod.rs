//! Assertions built on the diff engine and the poller.
//!
//! Every check returns [`Result<()>`](crate::Result), so checks compose
//! with `?` inside a test that returns a `Result`:
//!
//! - value checks: [`equal`], [`not_equal`], [`deep_equal`], [`is_true`],
//!   [`is_false`], [`is_some`], [`is_none`], [`is_ok`], [`is_err`]
//! - container checks: [`contains`], [`not_contains`], [`has_len`],
//!   [`is_empty`], [`not_empty`]
//! - filesystem checks: [`file_exists`], [`dir_exists`], [`path_missing`]
//! - HTTP status checks: [`status_success`], [`status_redirect`],
//!   [`status_client_error`], [`status_server_error`], [`status_is`]
//! - polling: [`eventually`], [`never`]
//!
//! [`Assert`] chains the same checks and keeps only the first failure.
//! [`matcher`] has composable matchers for `assert_that!`, and the
//! panicking macros (`assert_diff_eq!`, `assert_contains!`,
//! `assert_len!`, `assert_eventually!`, `assert_never!`) print the full
//! diagnostic.
//!
//! # Example
//!
//! ```rust
//! use assertkit::assertions::{contains, equal, has_len};
//!
//! fn check() -> assertkit::Result<()> {
//!     let users = vec!["ann", "bob"];
//!     has_len(&users, 2)?;
//!     contains(&users, &"bob")?;
//!     equal(&users[0], &"ann")?;
//!     Ok(())
//! }
//!
//! check().unwrap();
//!
//! let err = equal(&vec![1, 2, 4], &vec![1, 2, 3]).unwrap_err();
//! assert_eq!(err.to_string(), "slices differ at index 2\n  got: 4\n  want: 3");
//! ```

mod chain;
mod fs;
mod http;
mod macros;
pub mod matcher;

use std::fmt::Debug;
use std::time::Duration;

pub use chain::Assert;
pub use fs::{dir_exists, file_exists, path_missing};
pub use http::{
    status_client_error, status_is, status_redirect, status_server_error, status_success,
    StatusClass,
};

use crate::diff::{CollectionDiffResult, DiffResult, Differ};
use crate::error::{Error, Result};
use crate::poll::{self, PollerConfig};
use crate::value::Diffable;

/// Check that `got` deep-equals `want`.
///
/// # Errors
///
/// [`Error::TypeMismatch`] when the types differ, [`Error::Mismatch`] with
/// the diff otherwise.
pub fn equal<G, W>(got: &G, want: &W) -> Result<()>
where
    G: Diffable + ?Sized,
    W: Diffable + ?Sized,
{
    equal_with(&Differ::new(), got, want)
}

/// Same as [`equal`].
///
/// # Errors
///
/// See [`equal`].
pub fn deep_equal<G, W>(got: &G, want: &W) -> Result<()>
where
    G: Diffable + ?Sized,
    W: Diffable + ?Sized,
{
    equal(got, want)
}

/// Check that `got` differs from `want`.
///
/// # Errors
///
/// [`Error::Mismatch`] when the two are equal.
pub fn not_equal<G, W>(got: &G, want: &W) -> Result<()>
where
    G: Diffable + ?Sized,
    W: Diffable + ?Sized,
{
    not_equal_with(&Differ::new(), got, want)
}

/// Check that `value` is `true`.
///
/// # Errors
///
/// [`Error::AssertionFailed`] otherwise.
pub fn is_true(value: bool) -> Result<()> {
    if value {
        Ok(())
    } else {
        Err(Error::assertion("expected true, got false"))
    }
}

/// Check that `value` is `false`.
///
/// # Errors
///
/// [`Error::AssertionFailed`] otherwise.
pub fn is_false(value: bool) -> Result<()> {
    if value {
        Err(Error::assertion("expected false, got true"))
    } else {
        Ok(())
    }
}

/// Check that `value` is `Some`.
///
/// # Errors
///
/// [`Error::AssertionFailed`] for `None`.
pub fn is_some<T>(value: &Option<T>) -> Result<()> {
    match value {
        Some(_) => Ok(()),
        None => Err(Error::assertion("expected Some, got None")),
    }
}

/// Check that `value` is `None`.
///
/// # Errors
///
/// [`Error::AssertionFailed`] for `Some`, showing the value.
pub fn is_none<T: Debug>(value: &Option<T>) -> Result<()> {
    match value {
        None => Ok(()),
        Some(inner) => Err(Error::assertion(format!("expected None, got Some({inner:?})"))),
    }
}

/// Check that `value` is `Ok`.
///
/// # Errors
///
/// [`Error::AssertionFailed`] for `Err`, showing the error.
pub fn is_ok<T, E: Debug>(value: &std::result::Result<T, E>) -> Result<()> {
    match value {
        Ok(_) => Ok(()),
        Err(e) => Err(Error::assertion(format!("expected Ok, got Err({e:?})"))),
    }
}

/// Check that `value` is `Err`.
///
/// # Errors
///
/// [`Error::AssertionFailed`] for `Ok`, showing the value.
pub fn is_err<T: Debug, E>(value: &std::result::Result<T, E>) -> Result<()> {
    match value {
        Err(_) => Ok(()),
        Ok(v) => Err(Error::assertion(format!("expected Err, got Ok({v:?})"))),
    }
}

/// Check that `container` holds `item`.
///
/// Strings are searched for a substring, sequences for an element and
/// maps for a key.
///
/// # Errors
///
/// [`Error::Mismatch`] when the item is absent, [`Error::Shape`] when
/// `container` is `None` or cannot hold items.
pub fn contains<C, I>(container: &C, item: &I) -> Result<()>
where
    C: Diffable + ?Sized,
    I: Diffable + ?Sized,
{
    contains_with(&Differ::new(), container, item)
}

/// Check that `container` does not hold `item`.
///
/// # Errors
///
/// [`Error::Mismatch`] when the item is present, [`Error::Shape`] as for
/// [`contains`].
pub fn not_contains<C, I>(container: &C, item: &I) -> Result<()>
where
    C: Diffable + ?Sized,
    I: Diffable + ?Sized,
{
    not_contains_with(&Differ::new(), container, item)
}

/// Check that `container` has exactly `expected` elements.
///
/// # Errors
///
/// [`Error::Mismatch`] with both lengths and the content,
/// [`Error::Shape`] for values without a length.
pub fn has_len<C>(container: &C, expected: usize) -> Result<()>
where
    C: Diffable + ?Sized,
{
    has_len_with(&Differ::new(), container, expected)
}

/// Check that `container` has no elements.
///
/// # Errors
///
/// See [`has_len`].
pub fn is_empty<C>(container: &C) -> Result<()>
where
    C: Diffable + ?Sized,
{
    is_empty_with(&Differ::new(), container)
}

/// Check that `container` has at least one element.
///
/// # Errors
///
/// [`Error::Mismatch`] for an empty container, [`Error::Shape`] for values
/// without a length.
pub fn not_empty<C>(container: &C) -> Result<()>
where
    C: Diffable + ?Sized,
{
    not_empty_with(&Differ::new(), container)
}

/// Poll `condition` until it holds.
///
/// # Errors
///
/// [`Error::ConditionNotMet`] at the deadline.
pub fn eventually<F>(condition: F, timeout: Duration, interval: Duration) -> Result<()>
where
    F: FnMut() -> bool,
{
    poll::eventually(condition, timeout, interval).map(drop)
}

/// Check that `condition` stays false for `timeout`.
///
/// # Errors
///
/// [`Error::UnexpectedlyTrue`] on the first true result.
pub fn never<F>(condition: F, timeout: Duration, interval: Duration) -> Result<()>
where
    F: FnMut() -> bool,
{
    poll::never(condition, timeout, interval).map(drop)
}

pub(crate) fn equal_with<G, W>(differ: &Differ, got: &G, want: &W) -> Result<()>
where
    G: Diffable + ?Sized,
    W: Diffable + ?Sized,
{
    let got = got.to_value();
    let want = want.to_value();
    let result = differ.diff_values(&got, &want);
    if !result.has_diff {
        return Ok(());
    }
    Err(diff_error(result, got.type_name(), want.type_name()))
}

pub(crate) fn not_equal_with<G, W>(differ: &Differ, got: &G, want: &W) -> Result<()>
where
    G: Diffable + ?Sized,
    W: Diffable + ?Sized,
{
    let got = got.to_value();
    if differ.diff_values(&got, &want.to_value()).has_diff {
        Ok(())
    } else {
        Err(Error::mismatch(format!(
            "values should differ\n  both: {got}"
        )))
    }
}

pub(crate) fn contains_with<C, I>(differ: &Differ, container: &C, item: &I) -> Result<()>
where
    C: Diffable + ?Sized,
    I: Diffable + ?Sized,
{
    let result = differ.contains_diff(container, item);
    if result.has_diff {
        Err(collection_error(result))
    } else {
        Ok(())
    }
}

pub(crate) fn not_contains_with<C, I>(differ: &Differ, container: &C, item: &I) -> Result<()>
where
    C: Diffable + ?Sized,
    I: Diffable + ?Sized,
{
    let result = differ.contains_diff(container, item);
    if result.shape_error {
        return Err(collection_error(result));
    }
    if result.has_diff {
        return Ok(());
    }
    let container = container.to_value();
    Err(Error::mismatch(format!(
        "unexpectedly contains {}\n  container: {}",
        item.to_value().quoted(),
        container.quoted()
    )))
}

pub(crate) fn has_len_with<C>(differ: &Differ, container: &C, expected: usize) -> Result<()>
where
    C: Diffable + ?Sized,
{
    let result = differ.len_diff(container, expected);
    if result.has_diff {
        Err(collection_error(result))
    } else {
        Ok(())
    }
}

pub(crate) fn is_empty_with<C>(differ: &Differ, container: &C) -> Result<()>
where
    C: Diffable + ?Sized,
{
    let result = differ.len_diff(container, 0);
    if !result.has_diff {
        return Ok(());
    }
    if result.shape_error {
        return Err(collection_error(result));
    }
    Err(Error::mismatch(format!("expected empty\n{}", result.detail)))
}

pub(crate) fn not_empty_with<C>(differ: &Differ, container: &C) -> Result<()>
where
    C: Diffable + ?Sized,
{
    let value = container.to_value();
    match value.len() {
        Some(0) => Err(Error::mismatch(format!(
            "expected non-empty {}",
            value.short_type_name()
        ))),
        Some(_) => Ok(()),
        None => Err(collection_error(differ.len_diff(container, 1))),
    }
}

pub(crate) fn poll_with(config: &PollerConfig, kind: poll::PollKind, condition: impl FnMut() -> bool) -> Result<()> {
    match kind {
        poll::PollKind::Eventually => poll::eventually_with(config, condition).map(drop),
        poll::PollKind::Never => poll::never_with(config, condition).map(drop),
    }
}

fn diff_error(result: DiffResult, got: &str, want: &str) -> Error {
    if result.type_mismatch {
        Error::TypeMismatch {
            got: got.to_string(),
            want: want.to_string(),
        }
    } else {
        Error::mismatch(result.message())
    }
}

fn collection_error(result: CollectionDiffResult) -> Error {
    if result.shape_error {
        Error::shape(result.message())
    } else {
        Error::mismatch(result.message())
    }
}

//! Chained assertions that stop at the first failure.

use std::fmt::Debug;
use std::path::Path;
use std::time::Duration;

use crate::diff::{DiffConfig, Differ};
use crate::error::{Error, Result};
use crate::poll::{PollKind, PollerConfig};
use crate::value::Diffable;

/// A sequence of checks that records the first failure.
///
/// Once a check fails every later check is skipped, so the reported
/// error is always the earliest one. Finish with [`Assert::result`] to
/// get a `Result`, or [`Assert::finish`] to panic.
///
/// # Example
///
/// ```rust
/// use assertkit::assertions::Assert;
///
/// let name = "ann";
/// let tags = vec!["admin", "ops"];
///
/// Assert::new()
///     .equal(&name, &"ann")
///     .has_len(&tags, 2)
///     .contains(&tags, &"ops")
///     .finish();
///
/// let err = Assert::new()
///     .is_true(tags.is_empty())
///     .equal(&name, &"bob")
///     .result()
///     .unwrap_err();
/// assert_eq!(err.to_string(), "expected true, got false");
/// ```
#[derive(Debug, Default)]
#[must_use = "call `result()` or `finish()` to observe failures"]
pub struct Assert {
    differ: Differ,
    poller: PollerConfig,
    first_error: Option<Error>,
    checks: usize,
}

impl Assert {
    /// Start a chain with default diff and poll settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` for every diff in this chain.
    pub fn with_diff_config(mut self, config: DiffConfig) -> Self {
        self.differ = Differ::with_config(config);
        self
    }

    /// Use `config` for [`Assert::eventually`] and [`Assert::never`].
    pub fn with_poller_config(mut self, config: PollerConfig) -> Self {
        self.poller = config;
        self
    }

    fn check(mut self, run: impl FnOnce(&Self) -> Result<()>) -> Self {
        if self.first_error.is_some() {
            return self;
        }
        self.checks += 1;
        if let Err(err) = run(&self) {
            tracing::debug!(check = self.checks, error = %err, "chained assertion failed");
            self.first_error = Some(err);
        }
        self
    }

    /// Run an arbitrary check.
    pub fn then(self, run: impl FnOnce() -> Result<()>) -> Self {
        self.check(|_| run())
    }

    /// See [`equal`](super::equal).
    pub fn equal<G, W>(self, got: &G, want: &W) -> Self
    where
        G: Diffable + ?Sized,
        W: Diffable + ?Sized,
    {
        self.check(|this| super::equal_with(&this.differ, got, want))
    }

    /// See [`deep_equal`](super::deep_equal).
    pub fn deep_equal<G, W>(self, got: &G, want: &W) -> Self
    where
        G: Diffable + ?Sized,
        W: Diffable + ?Sized,
    {
        self.equal(got, want)
    }

    /// See [`not_equal`](super::not_equal).
    pub fn not_equal<G, W>(self, got: &G, want: &W) -> Self
    where
        G: Diffable + ?Sized,
        W: Diffable + ?Sized,
    {
        self.check(|this| super::not_equal_with(&this.differ, got, want))
    }

    /// See [`is_true`](super::is_true).
    pub fn is_true(self, value: bool) -> Self {
        self.check(|_| super::is_true(value))
    }

    /// See [`is_false`](super::is_false).
    pub fn is_false(self, value: bool) -> Self {
        self.check(|_| super::is_false(value))
    }

    /// See [`is_some`](super::is_some).
    pub fn is_some<T>(self, value: &Option<T>) -> Self {
        self.check(|_| super::is_some(value))
    }

    /// See [`is_none`](super::is_none).
    pub fn is_none<T: Debug>(self, value: &Option<T>) -> Self {
        self.check(|_| super::is_none(value))
    }

    /// See [`is_ok`](super::is_ok).
    pub fn is_ok<T, E: Debug>(self, value: &std::result::Result<T, E>) -> Self {
        self.check(|_| super::is_ok(value))
    }

    /// See [`is_err`](super::is_err).
    pub fn is_err<T: Debug, E>(self, value: &std::result::Result<T, E>) -> Self {
        self.check(|_| super::is_err(value))
    }

    /// See [`contains`](super::contains).
    pub fn contains<C, I>(self, container: &C, item: &I) -> Self
    where
        C: Diffable + ?Sized,
        I: Diffable + ?Sized,
    {
        self.check(|this| super::contains_with(&this.differ, container, item))
    }

    /// See [`not_contains`](super::not_contains).
    pub fn not_contains<C, I>(self, container: &C, item: &I) -> Self
    where
        C: Diffable + ?Sized,
        I: Diffable + ?Sized,
    {
        self.check(|this| super::not_contains_with(&this.differ, container, item))
    }

    /// See [`has_len`](super::has_len).
    pub fn has_len<C>(self, container: &C, expected: usize) -> Self
    where
        C: Diffable + ?Sized,
    {
        self.check(|this| super::has_len_with(&this.differ, container, expected))
    }

    /// See [`is_empty`](super::is_empty).
    pub fn is_empty<C>(self, container: &C) -> Self
    where
        C: Diffable + ?Sized,
    {
        self.check(|this| super::is_empty_with(&this.differ, container))
    }

    /// See [`not_empty`](super::not_empty).
    pub fn not_empty<C>(self, container: &C) -> Self
    where
        C: Diffable + ?Sized,
    {
        self.check(|this| super::not_empty_with(&this.differ, container))
    }

    /// See [`file_exists`](super::file_exists).
    pub fn file_exists(self, path: impl AsRef<Path>) -> Self {
        self.check(|_| super::file_exists(path))
    }

    /// See [`dir_exists`](super::dir_exists).
    pub fn dir_exists(self, path: impl AsRef<Path>) -> Self {
        self.check(|_| super::dir_exists(path))
    }

    /// See [`path_missing`](super::path_missing).
    pub fn path_missing(self, path: impl AsRef<Path>) -> Self {
        self.check(|_| super::path_missing(path))
    }

    /// See [`status_success`](super::status_success).
    pub fn status_success(self, code: u16) -> Self {
        self.check(|_| super::status_success(code))
    }

    /// See [`status_redirect`](super::status_redirect).
    pub fn status_redirect(self, code: u16) -> Self {
        self.check(|_| super::status_redirect(code))
    }

    /// See [`status_client_error`](super::status_client_error).
    pub fn status_client_error(self, code: u16) -> Self {
        self.check(|_| super::status_client_error(code))
    }

    /// See [`status_server_error`](super::status_server_error).
    pub fn status_server_error(self, code: u16) -> Self {
        self.check(|_| super::status_server_error(code))
    }

    /// See [`status_is`](super::status_is).
    pub fn status_is(self, code: u16, expected: u16) -> Self {
        self.check(|_| super::status_is(code, expected))
    }

    /// Poll `condition` with the chain's poller settings until it holds.
    pub fn eventually(self, condition: impl FnMut() -> bool) -> Self {
        self.check(|this| super::poll_with(&this.poller, PollKind::Eventually, condition))
    }

    /// Check `condition` stays false under the chain's poller settings.
    pub fn never(self, condition: impl FnMut() -> bool) -> Self {
        self.check(|this| super::poll_with(&this.poller, PollKind::Never, condition))
    }

    /// Shorthand for a chain poll with an explicit timeout and interval.
    pub fn eventually_within(
        self,
        timeout: Duration,
        interval: Duration,
        condition: impl FnMut() -> bool,
    ) -> Self {
        let config = self.poller.with_timeout(timeout).with_interval(interval);
        self.check(|_| super::poll_with(&config, PollKind::Eventually, condition))
    }

    /// Whether a check has failed.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.first_error.is_some()
    }

    /// The first failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.first_error.as_ref()
    }

    /// Checks that actually ran (skipped ones are not counted).
    #[must_use]
    pub fn checks_run(&self) -> usize {
        self.checks
    }

    /// End the chain, returning the first failure.
    ///
    /// # Errors
    ///
    /// The error of the first failing check.
    pub fn result(self) -> Result<()> {
        match self.first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// End the chain, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics with the first failure's diagnostic.
    #[track_caller]
    pub fn finish(self) {
        if let Err(err) = self.result() {
            panic!("{err}");
        }
    }
}

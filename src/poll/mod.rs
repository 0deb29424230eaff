//! Condition polling: `eventually` and `never`
//!
//! Both run the predicate once immediately and then on a fixed or
//! exponentially growing schedule until the deadline.
//!
//! - `eventually` passes on the first true result and fails at the
//!   deadline.
//! - `never` fails on the first true result and passes at the deadline.
//!
//! The predicate runs on the calling thread and is never called
//! concurrently with itself. Polls read time through a [`Clock`], so
//! tests can drive them with [`MockClock`](crate::clock::MockClock).
//!
//! # Example
//!
//! ```rust
//! use assertkit::poll::{eventually, never};
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! eventually(
//!     || start.elapsed() > Duration::from_millis(20),
//!     Duration::from_secs(1),
//!     Duration::from_millis(5),
//! )
//! .unwrap();
//!
//! never(|| false, Duration::from_millis(30), Duration::from_millis(10)).unwrap();
//! ```

mod config;
mod poller;
mod report;
mod schedule;

#[cfg(feature = "tokio")]
mod async_poller;

use std::time::Duration;

pub use config::{PollerConfig, DEFAULT_INTERVAL, DEFAULT_TIMEOUT};
pub use poller::Poller;
pub use report::{PollKind, PollOutcome, PollReport};

#[cfg(feature = "tokio")]
pub use async_poller::{eventually_async, never_async, run_async, run_async_on};

use crate::clock::Clock;
use crate::error::Result;

/// Poll `condition` until it holds, on real time without backoff.
///
/// Zero `timeout` or `interval` fall back to [`DEFAULT_TIMEOUT`] and
/// [`DEFAULT_INTERVAL`].
///
/// # Errors
///
/// [`Error::ConditionNotMet`](crate::Error::ConditionNotMet) if the
/// condition is still false at the deadline.
pub fn eventually<F>(condition: F, timeout: Duration, interval: Duration) -> Result<PollReport>
where
    F: FnMut() -> bool,
{
    eventually_with(&PollerConfig::new(timeout, interval), condition)
}

/// Poll `condition` with a full configuration on real time.
///
/// # Errors
///
/// See [`eventually`].
pub fn eventually_with<F>(config: &PollerConfig, condition: F) -> Result<PollReport>
where
    F: FnMut() -> bool,
{
    Poller::new(*config).eventually(condition)
}

/// Check `condition` stays false for `timeout`, on real time without
/// backoff.
///
/// # Errors
///
/// [`Error::UnexpectedlyTrue`](crate::Error::UnexpectedlyTrue) on the
/// first true result.
pub fn never<F>(condition: F, timeout: Duration, interval: Duration) -> Result<PollReport>
where
    F: FnMut() -> bool,
{
    never_with(&PollerConfig::new(timeout, interval), condition)
}

/// Check `condition` stays false with a full configuration on real time.
///
/// # Errors
///
/// See [`never`].
pub fn never_with<F>(config: &PollerConfig, condition: F) -> Result<PollReport>
where
    F: FnMut() -> bool,
{
    Poller::new(*config).never(condition)
}

/// Poll with an explicit clock.
///
/// # Errors
///
/// See [`eventually`] and [`never`].
pub fn poll_on<C, F>(clock: C, kind: PollKind, config: &PollerConfig, condition: F) -> Result<PollReport>
where
    C: Clock,
    F: FnMut() -> bool,
{
    Poller::with_clock(*config, clock)
        .run(kind, condition)
        .into_result()
}

//! Tokio poll driver.
//!
//! Same schedule, timer and outcomes as [`Poller`](super::Poller), but
//! waits with `tokio::time`, so `#[tokio::test(start_paused = true)]` tests
//! run on virtual time.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use super::schedule::{Ticker, Wait};
use super::{PollKind, PollReport, PollerConfig};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;

/// Wait for an async condition to become true.
///
/// # Errors
///
/// [`Error::ConditionNotMet`](crate::Error::ConditionNotMet) when the
/// deadline passes first.
///
/// # Example
///
/// ```rust
/// use assertkit::poll::{eventually_async, PollerConfig};
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let calls = AtomicU32::new(0);
/// let config = PollerConfig::new(Duration::from_secs(1), Duration::from_millis(1));
///
/// let report = eventually_async(&config, || async {
///     calls.fetch_add(1, Ordering::SeqCst) >= 2
/// })
/// .await
/// .unwrap();
///
/// assert_eq!(report.attempts, 3);
/// # }
/// ```
pub async fn eventually_async<F, Fut>(config: &PollerConfig, condition: F) -> Result<PollReport>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    run_async(PollKind::Eventually, config, condition)
        .await
        .into_result()
}

/// Check that an async condition stays false for the whole timeout.
///
/// # Errors
///
/// [`Error::UnexpectedlyTrue`](crate::Error::UnexpectedlyTrue) as soon as
/// the condition holds.
pub async fn never_async<F, Fut>(config: &PollerConfig, condition: F) -> Result<PollReport>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    run_async(PollKind::Never, config, condition)
        .await
        .into_result()
}

/// Drive one async poll to its terminal state.
pub async fn run_async<F, Fut>(kind: PollKind, config: &PollerConfig, condition: F) -> PollReport
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    run_async_on(&SystemClock::new(), kind, config, condition).await
}

/// Like [`run_async`], reporting the poll timer to `clock`.
///
/// Time is always read and waited on through `tokio::time`; `clock` only
/// sees [`Clock::timer_started`] and [`Clock::timer_stopped`]. The timer
/// is released when the poll finishes or when its future is dropped.
pub async fn run_async_on<C, F, Fut>(
    clock: &C,
    kind: PollKind,
    config: &PollerConfig,
    mut condition: F,
) -> PollReport
where
    C: Clock,
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let config = config.resolved();
    let start = Instant::now();

    tracing::debug!(?kind, timeout = ?config.timeout, interval = ?config.interval, "async poll started");

    let mut ticker = Ticker::start(clock, &config, Duration::ZERO);

    let outcome = if let Some(outcome) = ticker.check(kind, condition().await) {
        outcome
    } else {
        loop {
            match ticker.next_wait(start.elapsed()) {
                Wait::Deadline(wait) => {
                    sleep(wait).await;
                    break kind.expire();
                }
                Wait::Tick(wait) => {
                    sleep(wait).await;
                    if let Some(outcome) = ticker.check(kind, condition().await) {
                        break outcome;
                    }
                    ticker.after_tick(start.elapsed());
                }
            }
        }
    };

    let report = ticker.finish(outcome, config.timeout, start.elapsed());
    tracing::debug!(?outcome, elapsed = ?report.elapsed, attempts = report.attempts, "async poll finished");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use crate::poll::PollOutcome;
    use std::cell::Cell;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_timeout() {
        let config = PollerConfig::new(ms(1000), ms(50));
        let report = run_async(PollKind::Eventually, &config, || async { false }).await;
        assert_eq!(report.outcome, PollOutcome::TimedOut);
        assert_eq!(report.attempts, 20);
        assert_eq!(report.elapsed, ms(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_never_immediate() {
        let config = PollerConfig::new(ms(1000), ms(50));
        let err = never_async(&config, || async { true }).await.unwrap_err();
        assert!(err.to_string().contains("  attempts: 1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_success_after_ticks() {
        let calls = Cell::new(0u32);
        let config = PollerConfig::new(ms(1000), ms(10));
        let report = eventually_async(&config, || {
            calls.set(calls.get() + 1);
            let done = calls.get() >= 4;
            async move { done }
        })
        .await
        .unwrap();
        assert_eq!(report.attempts, 4);
        assert_eq!(report.elapsed, ms(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_timer_released_after_poll() {
        let clock = MockClock::new();
        let config = PollerConfig::new(ms(200), ms(50));
        let report = run_async_on(&clock, PollKind::Eventually, &config, || async { false }).await;
        assert_eq!(report.attempts, 4);
        assert_eq!(clock.timers_started(), 1);
        assert_eq!(clock.active_timers(), 0);
        // virtual time belongs to tokio, not the clock
        assert_eq!(clock.sleep_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_timer_released_when_dropped() {
        let clock = MockClock::new();
        let config = PollerConfig::new(Duration::from_secs(10), ms(100));
        let poll = run_async_on(&clock, PollKind::Never, &config, || async { false });
        let cut_short = tokio::time::timeout(ms(350), poll).await;
        assert!(cut_short.is_err());
        assert_eq!(clock.timers_started(), 1);
        assert_eq!(clock.active_timers(), 0);
    }
}

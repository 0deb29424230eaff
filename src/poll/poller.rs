//! Blocking poll driver.

use std::time::Duration;

use super::schedule::{Ticker, Wait};
use super::{PollKind, PollReport, PollerConfig};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;

/// Runs `eventually` / `never` polls against a [`Clock`].
///
/// The predicate is checked once immediately (attempt 1), then on every
/// tick of the schedule until it settles the poll or the deadline passes.
/// A single predicate call is never interrupted; a slow predicate delays
/// the outcome by however long it runs.
///
/// # Example
///
/// ```rust
/// use assertkit::clock::{Clock, MockClock};
/// use assertkit::poll::{Poller, PollerConfig};
/// use std::time::Duration;
///
/// let clock = MockClock::new();
/// let config = PollerConfig::new(Duration::from_secs(1), Duration::from_millis(10));
/// let poller = Poller::with_clock(config, clock.clone());
///
/// let report = poller
///     .eventually(|| clock.now() >= Duration::from_millis(20))
///     .unwrap();
///
/// assert_eq!(report.attempts, 3);
/// ```
#[derive(Debug, Clone)]
pub struct Poller<C: Clock = SystemClock> {
    config: PollerConfig,
    clock: C,
}

impl Poller<SystemClock> {
    /// A poller on real time.
    #[must_use]
    pub fn new(config: PollerConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> Poller<C> {
    /// A poller on the given clock.
    #[must_use]
    pub fn with_clock(config: PollerConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// The configuration as given, before correction.
    #[must_use]
    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// The clock this poller waits on.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Wait for `condition` to become true.
    ///
    /// # Errors
    ///
    /// [`Error::ConditionNotMet`](crate::Error::ConditionNotMet) when the
    /// deadline passes first.
    pub fn eventually<F>(&self, condition: F) -> Result<PollReport>
    where
        F: FnMut() -> bool,
    {
        self.run(PollKind::Eventually, condition).into_result()
    }

    /// Check that `condition` stays false for the whole timeout.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedlyTrue`](crate::Error::UnexpectedlyTrue) as soon
    /// as the condition holds, the immediate check included.
    pub fn never<F>(&self, condition: F) -> Result<PollReport>
    where
        F: FnMut() -> bool,
    {
        self.run(PollKind::Never, condition).into_result()
    }

    /// Drive one poll to its terminal state.
    pub fn run<F>(&self, kind: PollKind, mut condition: F) -> PollReport
    where
        F: FnMut() -> bool,
    {
        let config = self.config.resolved();
        let start = self.clock.now();
        let elapsed = || self.clock.now().saturating_sub(start);

        tracing::debug!(
            ?kind,
            timeout = ?config.timeout,
            interval = ?config.interval,
            backoff = config.backoff_factor,
            "poll started"
        );

        let mut ticker = Ticker::start(&self.clock, &config, Duration::ZERO);

        let outcome = if let Some(outcome) = ticker.check(kind, condition()) {
            outcome
        } else {
            loop {
                match ticker.next_wait(elapsed()) {
                    Wait::Deadline(wait) => {
                        self.clock.sleep(wait);
                        break kind.expire();
                    }
                    Wait::Tick(wait) => {
                        self.clock.sleep(wait);
                        if let Some(outcome) = ticker.check(kind, condition()) {
                            break outcome;
                        }
                        ticker.after_tick(elapsed());
                    }
                }
            }
        };

        let report = ticker.finish(outcome, config.timeout, elapsed());

        tracing::debug!(
            ?outcome,
            elapsed = ?report.elapsed,
            attempts = report.attempts,
            "poll finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use crate::poll::PollOutcome;
    use crate::Error;
    use std::cell::Cell;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn poller(timeout: u64, interval: u64) -> (Poller<MockClock>, MockClock) {
        let clock = MockClock::new();
        let poller = Poller::with_clock(PollerConfig::new(ms(timeout), ms(interval)), clock.clone());
        (poller, clock)
    }

    #[test]
    fn test_immediate_success() {
        let (poller, clock) = poller(1000, 50);
        let report = poller.eventually(|| true).unwrap();
        assert_eq!(report.attempts, 1);
        assert_eq!(report.elapsed, Duration::ZERO);
        assert_eq!(clock.sleep_count(), 0);
    }

    #[test]
    fn test_third_attempt_succeeds() {
        let (poller, _) = poller(1000, 10);
        let calls = Cell::new(0);
        let report = poller
            .eventually(|| {
                calls.set(calls.get() + 1);
                calls.get() >= 3
            })
            .unwrap();
        assert_eq!(report.attempts, 3);
        assert_eq!(report.elapsed, ms(20));
        assert_eq!(report.outcome, PollOutcome::Success);
    }

    #[test]
    fn test_timeout_counts_attempts() {
        let (poller, _) = poller(1000, 50);
        let err = poller.eventually(|| false).unwrap_err();
        match err {
            Error::ConditionNotMet {
                timeout,
                elapsed,
                attempts,
                final_interval,
            } => {
                assert_eq!(timeout, ms(1000));
                assert_eq!(elapsed, ms(1000));
                // immediate check plus ticks at 50..=950
                assert_eq!(attempts, 20);
                assert_eq!(final_interval, ms(50));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_timeout_message() {
        let (poller, _) = poller(100, 50);
        let message = poller.eventually(|| false).unwrap_err().to_string();
        assert!(message.starts_with("Eventually: condition not met within timeout"));
        assert!(message.contains("  timeout: 100ms"));
        assert!(message.contains("  attempts: 2"));
    }

    #[test]
    fn test_never_passes_at_deadline() {
        let (poller, _) = poller(500, 100);
        let report = poller.never(|| false).unwrap();
        assert_eq!(report.outcome, PollOutcome::NeverTrue);
        assert_eq!(report.elapsed, ms(500));
        assert_eq!(report.attempts, 5);
    }

    #[test]
    fn test_never_fails_on_immediate_check() {
        let (poller, clock) = poller(500, 100);
        let err = poller.never(|| true).unwrap_err();
        match err {
            Error::UnexpectedlyTrue { elapsed, attempts, .. } => {
                assert_eq!(elapsed, Duration::ZERO);
                assert_eq!(attempts, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(clock.sleep_count(), 0);
    }

    #[test]
    fn test_never_fails_mid_poll() {
        let (poller, clock) = poller(1000, 100);
        let watch = clock.clone();
        let err = poller.never(|| watch.now() >= ms(300)).unwrap_err();
        assert!(err.to_string().contains("  attempts: 4"));
    }

    #[test]
    fn test_backoff_final_interval() {
        let clock = MockClock::new();
        let config = PollerConfig::new(ms(1000), ms(100))
            .with_backoff(2.0)
            .with_max_interval(ms(300));
        let report = Poller::with_clock(config, clock).run(PollKind::Eventually, || false);
        assert_eq!(report.outcome, PollOutcome::TimedOut);
        // checks at 0, 100, 300, 600, 900
        assert_eq!(report.attempts, 5);
        assert_eq!(report.final_interval, ms(300));
        assert_eq!(report.elapsed, ms(1000));
    }

    #[test]
    fn test_zero_config_uses_defaults() {
        let clock = MockClock::new();
        let poller = Poller::with_clock(PollerConfig::new(Duration::ZERO, Duration::ZERO), clock);
        let report = poller.run(PollKind::Eventually, || false);
        assert_eq!(report.timeout, Duration::from_secs(5));
        assert_eq!(report.final_interval, ms(100));
        assert_eq!(report.attempts, 50);
    }

    #[test]
    fn test_config_not_mutated() {
        let config = PollerConfig::new(Duration::ZERO, ms(10)).with_backoff(0.5);
        let poller = Poller::with_clock(config, MockClock::new());
        let _ = poller.eventually(|| false);
        assert_eq!(*poller.config(), config);
    }

    #[test]
    fn test_slow_predicate_overruns_deadline() {
        let (poller, clock) = poller(100, 10);
        let watch = clock.clone();
        let report = poller.run(PollKind::Eventually, || {
            watch.advance(ms(250));
            false
        });
        assert_eq!(report.outcome, PollOutcome::TimedOut);
        assert_eq!(report.attempts, 1);
        assert_eq!(report.elapsed, ms(250));
    }

    #[test]
    fn test_timer_released_on_every_path() {
        let (poller, clock) = poller(100, 10);
        let _ = poller.eventually(|| true);
        let _ = poller.eventually(|| false);
        let _ = poller.never(|| true);
        let _ = poller.never(|| false);
        assert_eq!(clock.timers_started(), 4);
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn test_timer_released_on_panic() {
        let (poller, clock) = poller(100, 10);
        let calls = Cell::new(0);
        let result = catch_unwind(AssertUnwindSafe(|| {
            poller.eventually(|| {
                calls.set(calls.get() + 1);
                assert!(calls.get() < 3, "predicate blew up");
                false
            })
        }));
        assert!(result.is_err());
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn test_real_clock_poll() {
        let poller = Poller::new(PollerConfig::new(ms(200), ms(5)));
        let start = std::time::Instant::now();
        let report = poller
            .eventually(|| start.elapsed() >= ms(20))
            .unwrap();
        assert!(report.attempts > 1);
        assert!(report.elapsed < ms(200));
    }
}

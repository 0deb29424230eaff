//! Tick schedule and the scoped poll timer.

use std::time::Duration;

use super::{PollKind, PollOutcome, PollReport, PollerConfig};
use crate::clock::Clock;

/// What the poll loop should wait for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Wait {
    /// Sleep this long, then run the predicate.
    Tick(Duration),
    /// Sleep this long, then stop at the deadline.
    Deadline(Duration),
}

/// Tick times for one poll, as offsets from its start.
///
/// Ticks at or past the deadline are never scheduled, so a tick and the
/// deadline landing together resolve to the deadline.
#[derive(Debug, Clone)]
pub(crate) struct Schedule {
    timeout: Duration,
    interval: Duration,
    factor: f64,
    max_interval: Duration,
    next_tick: Duration,
}

impl Schedule {
    /// `config` must already be resolved.
    pub(crate) fn new(config: &PollerConfig, elapsed: Duration) -> Self {
        Self {
            timeout: config.timeout,
            interval: config.interval,
            factor: config.backoff_factor,
            max_interval: config.max_interval,
            next_tick: elapsed.saturating_add(config.interval),
        }
    }

    /// Interval currently in effect.
    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    pub(crate) fn next_wait(&self, elapsed: Duration) -> Wait {
        let due = self.next_tick.max(elapsed);
        if due >= self.timeout {
            Wait::Deadline(self.timeout.saturating_sub(elapsed))
        } else {
            Wait::Tick(due - elapsed)
        }
    }

    /// Schedule the tick after a failed check that finished at `elapsed`.
    ///
    /// With backoff the interval grows and the next tick is one full new
    /// interval after the check. Without backoff ticks stay on the fixed
    /// grid; ticks missed while the predicate ran are dropped.
    pub(crate) fn after_tick(&mut self, elapsed: Duration) {
        if self.factor > 1.0 {
            self.interval = self.grown_interval();
            self.next_tick = elapsed.saturating_add(self.interval);
            tracing::trace!(interval = ?self.interval, "poll interval grew");
        } else {
            self.next_tick = self.next_tick.saturating_add(self.interval).max(elapsed);
        }
    }

    fn grown_interval(&self) -> Duration {
        let grown = Duration::try_from_secs_f64(self.interval.as_secs_f64() * self.factor)
            .unwrap_or(Duration::MAX)
            .max(self.interval);
        if self.max_interval.is_zero() {
            grown
        } else {
            grown.min(self.max_interval)
        }
    }
}

/// A poll's timer, held for as long as the poll runs.
///
/// Acquiring it notifies the clock through [`Clock::timer_started`] and
/// dropping it through [`Clock::timer_stopped`], so the timer is released
/// on every way out of the poll loop, unwinding and a dropped async poll
/// included. It also counts the predicate checks and owns the
/// [`Schedule`], which keeps the blocking and async drivers in step.
pub(crate) struct Ticker<'c, C: Clock> {
    clock: &'c C,
    schedule: Schedule,
    attempts: u32,
}

impl<'c, C: Clock> Ticker<'c, C> {
    pub(crate) fn start(clock: &'c C, config: &PollerConfig, elapsed: Duration) -> Self {
        clock.timer_started();
        Self {
            clock,
            schedule: Schedule::new(config, elapsed),
            attempts: 0,
        }
    }

    /// Record one predicate result; `Some` once it settles the poll.
    pub(crate) fn check(&mut self, kind: PollKind, value: bool) -> Option<PollOutcome> {
        self.attempts = self.attempts.saturating_add(1);
        tracing::trace!(attempt = self.attempts, value, "poll check");
        kind.settle(value)
    }

    pub(crate) fn next_wait(&self, elapsed: Duration) -> Wait {
        self.schedule.next_wait(elapsed)
    }

    pub(crate) fn after_tick(&mut self, elapsed: Duration) {
        self.schedule.after_tick(elapsed);
    }

    /// Release the timer and describe the finished poll.
    pub(crate) fn finish(self, outcome: PollOutcome, timeout: Duration, elapsed: Duration) -> PollReport {
        PollReport {
            outcome,
            timeout,
            elapsed,
            attempts: self.attempts,
            final_interval: self.schedule.interval(),
        }
    }
}

impl<C: Clock> Drop for Ticker<'_, C> {
    fn drop(&mut self) {
        self.clock.timer_stopped();
    }
}

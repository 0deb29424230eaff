//! `MockClock` implementation for virtual time control.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use super::Clock;

/// A clock whose time only moves when told to.
///
/// Sleeping advances virtual time by the requested duration and returns
/// immediately, so a poll with a 5 second timeout finishes in
/// microseconds and always takes the same path. The clock also counts
/// sleeps and live poll timers, which tests use to check that every
/// timer is released.
///
/// # Thread Safety
///
/// Clones share the same underlying time, so a predicate running inside
/// a poll can read the clock it is being polled with.
///
/// # Example
///
/// ```rust
/// use assertkit::clock::{Clock, MockClock};
/// use std::time::Duration;
///
/// let clock = MockClock::new();
/// let observer = clock.clone();
///
/// clock.advance(Duration::from_millis(250));
/// clock.sleep(Duration::from_millis(250));
///
/// assert_eq!(observer.now(), Duration::from_millis(500));
/// assert_eq!(observer.sleep_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    inner: Arc<Mutex<ClockState>>,
}

#[derive(Debug)]
struct ClockState {
    /// Current time as duration since clock creation
    current_time: Duration,
    sleeps: usize,
    active_timers: usize,
    timers_started: usize,
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClock {
    /// Creates a new `MockClock` starting at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::with_start_time(Duration::ZERO)
    }

    /// Creates a new `MockClock` starting at the specified time.
    ///
    /// ```rust
    /// use assertkit::clock::{Clock, MockClock};
    /// use std::time::Duration;
    ///
    /// let clock = MockClock::with_start_time(Duration::from_secs(100));
    /// assert_eq!(clock.now(), Duration::from_secs(100));
    /// ```
    #[must_use]
    pub fn with_start_time(start: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ClockState {
                current_time: start,
                sleeps: 0,
                active_timers: 0,
                timers_started: 0,
            })),
        }
    }

    /// Advances the clock by the specified duration.
    pub fn advance(&self, duration: Duration) {
        self.inner.lock().current_time += duration;
    }

    /// Advances the clock to a specific time.
    ///
    /// Only moves forward; an earlier `time` is a no-op.
    pub fn advance_to(&self, time: Duration) {
        let mut state = self.inner.lock();
        if time > state.current_time {
            state.current_time = time;
        }
    }

    /// Number of [`Clock::sleep`] calls made so far.
    #[must_use]
    pub fn sleep_count(&self) -> usize {
        self.inner.lock().sleeps
    }

    /// Poll timers currently alive.
    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.inner.lock().active_timers
    }

    /// Poll timers acquired over the clock's lifetime.
    #[must_use]
    pub fn timers_started(&self) -> usize {
        self.inner.lock().timers_started
    }
}

impl Clock for MockClock {
    fn now(&self) -> Duration {
        self.inner.lock().current_time
    }

    fn sleep(&self, duration: Duration) {
        let mut state = self.inner.lock();
        state.sleeps += 1;
        state.current_time += duration;
    }

    fn timer_started(&self) {
        let mut state = self.inner.lock();
        state.active_timers += 1;
        state.timers_started += 1;
    }

    fn timer_stopped(&self) {
        let mut state = self.inner.lock();
        state.active_timers = state.active_timers.saturating_sub(1);
    }
}

//! Time sources for the condition poller
//!
//! The poller never reads the system time directly. It asks a [`Clock`]
//! for the current time and to wait, which lets tests swap in
//! [`MockClock`] and run multi-second polls instantly and reproducibly.
//!
//! # Example
//!
//! ```rust
//! use assertkit::clock::{Clock, MockClock};
//! use std::time::Duration;
//!
//! let clock = MockClock::new();
//! assert_eq!(clock.now(), Duration::ZERO);
//!
//! // Sleeping on a mock clock just moves virtual time forward.
//! clock.sleep(Duration::from_secs(10));
//! assert_eq!(clock.now(), Duration::from_secs(10));
//! ```

mod mock_clock;

use std::time::{Duration, Instant};

pub use mock_clock::MockClock;

/// A source of time for blocking polls.
///
/// Times are durations since an arbitrary, fixed epoch chosen by the
/// implementation. The timer hooks let a clock observe how many poll
/// timers are alive; the poller calls [`Clock::timer_started`] when its
/// ticker is acquired and [`Clock::timer_stopped`] exactly once when it is
/// released.
pub trait Clock {
    /// Current time since the clock's epoch.
    fn now(&self) -> Duration;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);

    /// A poll timer was acquired.
    fn timer_started(&self) {}

    /// A poll timer was released.
    fn timer_stopped(&self) {}
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }

    fn timer_started(&self) {
        (**self).timer_started();
    }

    fn timer_stopped(&self) {
        (**self).timer_stopped();
    }
}

/// Real time, measured from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Create a clock whose epoch is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

//! Poller configuration.

use std::time::Duration;

/// Timeout used when the configured one is zero.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Interval used when the configured one is zero.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Timing for an `eventually` / `never` poll.
///
/// Invalid values are corrected rather than rejected; see
/// [`PollerConfig::resolved`].
///
/// # Example
///
/// ```rust
/// use assertkit::poll::PollerConfig;
/// use std::time::Duration;
///
/// let config = PollerConfig::new(Duration::from_secs(2), Duration::from_millis(10))
///     .with_backoff(2.0)
///     .with_max_interval(Duration::from_millis(200));
///
/// assert!(config.backoff_enabled());
/// assert_eq!(config.max_interval, Duration::from_millis(200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollerConfig {
    /// Total time allowed for the poll.
    pub timeout: Duration,
    /// Delay between checks (the starting delay when backing off).
    pub interval: Duration,
    /// Multiplier applied to the interval after each failed check.
    /// `1.0` disables backoff.
    pub backoff_factor: f64,
    /// Upper bound for a growing interval; zero means unbounded.
    pub max_interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
            backoff_factor: 1.0,
            max_interval: Duration::ZERO,
        }
    }
}

impl PollerConfig {
    /// Create a configuration without backoff.
    #[must_use]
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self {
            timeout,
            interval,
            ..Self::default()
        }
    }

    /// Set the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the (starting) interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the backoff factor.
    #[must_use]
    pub fn with_backoff(mut self, factor: f64) -> Self {
        self.backoff_factor = factor;
        self
    }

    /// Set the interval cap.
    #[must_use]
    pub fn with_max_interval(mut self, max_interval: Duration) -> Self {
        self.max_interval = max_interval;
        self
    }

    /// Whether the interval grows between checks.
    #[must_use]
    pub fn backoff_enabled(&self) -> bool {
        self.backoff_factor > 1.0
    }

    /// The configuration a poll actually runs with.
    ///
    /// - a zero timeout becomes [`DEFAULT_TIMEOUT`]
    /// - a zero interval becomes [`DEFAULT_INTERVAL`]
    /// - a factor below `1.0`, `NaN` or infinite becomes `1.0`
    /// - a non-zero cap below the interval is raised to the interval
    ///
    /// `self` is left untouched.
    ///
    /// ```rust
    /// use assertkit::poll::PollerConfig;
    /// use std::time::Duration;
    ///
    /// let given = PollerConfig::new(Duration::ZERO, Duration::from_millis(50)).with_backoff(0.5);
    /// let used = given.resolved();
    ///
    /// assert_eq!(used.timeout, Duration::from_secs(5));
    /// assert_eq!(used.backoff_factor, 1.0);
    /// assert_eq!(given.timeout, Duration::ZERO);
    /// ```
    #[must_use]
    pub fn resolved(&self) -> Self {
        let timeout = if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        };
        let interval = if self.interval.is_zero() {
            DEFAULT_INTERVAL
        } else {
            self.interval
        };
        let backoff_factor = if self.backoff_factor.is_finite() && self.backoff_factor >= 1.0 {
            self.backoff_factor
        } else {
            1.0
        };
        let max_interval = if self.max_interval.is_zero() {
            Duration::ZERO
        } else {
            self.max_interval.max(interval)
        };
        Self {
            timeout,
            interval,
            backoff_factor,
            max_interval,
        }
    }
}

//! Poll outcomes and their conversion into errors.

use std::time::Duration;

use crate::error::{Error, Result};

/// Which assertion a poll is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollKind {
    /// Pass as soon as the condition holds; fail at the deadline.
    Eventually,
    /// Fail as soon as the condition holds; pass at the deadline.
    Never,
}

impl PollKind {
    /// Terminal outcome for a predicate result, if it ends the poll.
    pub(crate) fn settle(self, value: bool) -> Option<PollOutcome> {
        match (self, value) {
            (Self::Eventually, true) => Some(PollOutcome::Success),
            (Self::Never, true) => Some(PollOutcome::BecameTrue),
            (_, false) => None,
        }
    }

    /// Terminal outcome when the deadline is reached.
    pub(crate) fn expire(self) -> PollOutcome {
        match self {
            Self::Eventually => PollOutcome::TimedOut,
            Self::Never => PollOutcome::NeverTrue,
        }
    }
}

/// How a poll ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// `eventually`: the condition held.
    Success,
    /// `eventually`: the deadline passed first.
    TimedOut,
    /// `never`: the condition held.
    BecameTrue,
    /// `never`: the deadline passed with the condition false throughout.
    NeverTrue,
}

impl PollOutcome {
    /// Whether the assertion passed.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success | Self::NeverTrue)
    }
}

/// Timing record of one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollReport {
    /// How the poll ended.
    pub outcome: PollOutcome,
    /// Effective timeout.
    pub timeout: Duration,
    /// Time from start to the terminal state.
    pub elapsed: Duration,
    /// Predicate invocations, the initial check included.
    pub attempts: u32,
    /// Interval in effect when the poll ended.
    pub final_interval: Duration,
}

impl PollReport {
    /// `Ok(self)` on success, the matching [`Error`] otherwise.
    ///
    /// # Errors
    ///
    /// [`Error::ConditionNotMet`] for a timed-out `eventually` and
    /// [`Error::UnexpectedlyTrue`] for a failed `never`.
    pub fn into_result(self) -> Result<Self> {
        match self.outcome {
            PollOutcome::Success | PollOutcome::NeverTrue => Ok(self),
            PollOutcome::TimedOut => Err(Error::ConditionNotMet {
                timeout: self.timeout,
                elapsed: self.elapsed,
                attempts: self.attempts,
                final_interval: self.final_interval,
            }),
            PollOutcome::BecameTrue => Err(Error::UnexpectedlyTrue {
                elapsed: self.elapsed,
                attempts: self.attempts,
                final_interval: self.final_interval,
            }),
        }
    }

    /// The failure diagnostic, if the poll failed.
    #[must_use]
    pub fn failure_message(&self) -> Option<String> {
        self.into_result().err().map(|e| e.to_string())
    }
}

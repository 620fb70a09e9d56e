use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one action. Exactly one value is returned per invocation.
///
/// Anything other than [`Success`](ActionStatus::Success) is an ordinary
/// outcome, not an error: the motion was attempted and did not converge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// The measurement reached its tolerance.
    Success,
    /// The attempt cap ran out before the measurement reached its tolerance.
    TooManyAttempts,
    /// The chassis drove past its linear target.
    OvershotMove,
    /// Turning stopped making progress or oscillated around the target.
    Unaligned,
    /// The reach target lies outside the arm's envelope.
    TooFarToReach,
    /// The arm stopped moving before its magnet reached the target.
    FailedToBend,
}

impl ActionStatus {
    pub fn is_success(self) -> bool {
        self == ActionStatus::Success
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::Success => "success",
            ActionStatus::TooManyAttempts => "too_many_attempts",
            ActionStatus::OvershotMove => "overshot_move",
            ActionStatus::Unaligned => "unaligned",
            ActionStatus::TooFarToReach => "too_far_to_reach",
            ActionStatus::FailedToBend => "failed_to_bend",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

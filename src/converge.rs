//! The bounded actuate → step → measure loop shared by every primitive.

use crate::command::{Command, CommandChannel};
use crate::error::SessionError;
use crate::session::Session;
use crate::snapshot::StateSnapshot;
use crate::status::ActionStatus;
use tracing::{debug, trace};

/// Termination bounds for one loop.
#[derive(Clone, Copy, Debug)]
pub struct Limits {
    /// Success once `|error|` is at or below this.
    pub tolerance: f32,
    /// Maximum number of frames to advance.
    pub max_attempts: u32,
    /// Status returned when the cap runs out.
    pub exhausted: ActionStatus,
}

impl Limits {
    pub fn new(tolerance: f32, max_attempts: u32) -> Self {
        Self {
            tolerance,
            max_attempts,
            exhausted: ActionStatus::TooManyAttempts,
        }
    }
}

/// Per-primitive behaviour plugged into [`converge`].
pub trait Monitor {
    /// Signed remaining error for `state`.
    fn measure(&mut self, state: &StateSnapshot) -> f32;

    /// Commands for the iteration numbered `attempt`, given the error measured
    /// on the previous frame. An empty list just advances the frame.
    fn actuate(&mut self, attempt: u32, error: f32) -> Vec<Command>;

    /// Failure detected on the frame just measured, if any. Runs after the
    /// success check and before the attempt cap.
    fn inspect(&mut self, _error: f32, _state: &StateSnapshot) -> Option<ActionStatus> {
        None
    }
}

/// Drives `monitor` until its error is within tolerance, it reports a
/// failure, or the attempt cap is reached.
///
/// A target that is already within tolerance succeeds without advancing a frame.
pub fn converge<C, M>(
    session: &mut Session<C>,
    limits: Limits,
    monitor: &mut M,
) -> Result<ActionStatus, SessionError>
where
    C: CommandChannel,
    M: Monitor,
{
    let mut error = monitor.measure(session.state());
    if error.abs() <= limits.tolerance {
        debug!(error, "already within tolerance");
        return Ok(ActionStatus::Success);
    }

    for attempt in 0..limits.max_attempts {
        let commands = monitor.actuate(attempt, error);
        let state = session.step(commands)?;
        error = monitor.measure(state);
        trace!(attempt, error, "converging");

        if error.abs() <= limits.tolerance {
            debug!(attempts = attempt + 1, error, "converged");
            return Ok(ActionStatus::Success);
        }
        if let Some(status) = monitor.inspect(error, state) {
            debug!(attempts = attempt + 1, error, %status, "stopped early");
            return Ok(status);
        }
    }

    debug!(attempts = limits.max_attempts, error, status = %limits.exhausted, "attempt cap reached");
    Ok(limits.exhausted)
}

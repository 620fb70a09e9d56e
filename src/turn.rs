//! In-place rotation of the chassis.

use crate::command::{Command, CommandChannel, WheelPair};
use crate::config::MotionConfig;
use crate::converge::{Limits, Monitor, converge};
use crate::error::SessionError;
use crate::pose::wrap_degrees;
use crate::primitive::Converge;
use crate::session::Session;
use crate::snapshot::StateSnapshot;
use crate::status::ActionStatus;
use std::collections::VecDeque;
use tracing::debug;

/// Heading errors this close to a half turn keep the requested direction.
const HALF_TURN_SLACK: f32 = 1e-3;

/// Rotate the chassis in place by `angle` degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Turn {
    /// Requested rotation; positive turns toward positive headings.
    pub angle: f32,
    pub aligned_at: f32,
}

impl Converge for Turn {
    fn converge<C: CommandChannel>(
        &self,
        session: &mut Session<C>,
    ) -> Result<ActionStatus, SessionError> {
        let config = session.config().clone();
        let limits = Limits::new(self.aligned_at, config.turn_attempts.cap(self.angle));
        let target_heading = wrap_degrees(session.pose().heading() + self.angle);
        debug!(angle = self.angle, target_heading, "turning");

        let mut monitor = TurnMonitor::new(target_heading, self.angle, config);
        let status = converge(session, limits, &mut monitor)?;
        session.defer(Command::SetWheels(WheelPair::STOP));
        Ok(status)
    }
}

struct TurnMonitor {
    target_heading: f32,
    /// Requested rotation; breaks the tie when the target is directly behind.
    requested: f32,
    config: MotionConfig,
    /// Post-frame errors, oldest first, capped at the unaligned window.
    history: VecDeque<f32>,
}

impl TurnMonitor {
    fn new(target_heading: f32, requested: f32, config: MotionConfig) -> Self {
        Self {
            target_heading,
            requested,
            history: VecDeque::with_capacity(config.unaligned_window + 1),
            config,
        }
    }

    fn reversals(&self) -> usize {
        self.history
            .iter()
            .zip(self.history.iter().skip(1))
            .filter(|(a, b)| a.signum() != b.signum())
            .count()
    }
}

impl Monitor for TurnMonitor {
    fn measure(&mut self, state: &StateSnapshot) -> f32 {
        let error = wrap_degrees(self.target_heading - state.pose.heading());
        if (error.abs() - 180.0).abs() < HALF_TURN_SLACK {
            180.0f32.copysign(self.requested)
        } else {
            error
        }
    }

    fn actuate(&mut self, _attempt: u32, error: f32) -> Vec<Command> {
        let speed = self
            .config
            .ramp(self.config.turn_speed, error, self.config.turn_slowdown_angle);
        vec![Command::SetWheels(WheelPair::spin(speed.copysign(error)))]
    }

    fn inspect(&mut self, error: f32, _state: &StateSnapshot) -> Option<ActionStatus> {
        let window = self.config.unaligned_window;
        if window == 0 {
            return None;
        }
        self.history.push_back(error);
        if self.history.len() > window {
            self.history.pop_front();
        }
        if self.history.len() < window {
            return None;
        }

        let oldest = self.history.front().copied().unwrap_or(error);
        let progress = oldest.abs() - error.abs();
        let reversals = self.reversals();
        let max_reversals = self.config.unaligned_max_reversals;
        if progress < self.config.unaligned_min_progress
            || (max_reversals > 0 && reversals >= max_reversals)
        {
            debug!(error, progress, reversals, "turn stopped converging");
            return Some(ActionStatus::Unaligned);
        }
        None
    }
}

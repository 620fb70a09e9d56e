//! Straight-line driving, optionally preceded by a turn to face a target.

use crate::command::{Command, CommandChannel, WheelPair};
use crate::config::MotionConfig;
use crate::converge::{Limits, Monitor, converge};
use crate::error::SessionError;
use crate::primitive::Converge;
use crate::session::Session;
use crate::snapshot::StateSnapshot;
use crate::status::ActionStatus;
use crate::turn::Turn;
use glam::Vec3;
use tracing::debug;

/// Face a world position before driving to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Approach {
    /// Resolved world position of the target.
    pub target: Vec3,
    pub turn: Turn,
    /// Drive even when the turn does not succeed.
    pub move_on_turn_fail: bool,
}

/// Drive forward (positive) or backward (negative) by `distance` metres,
/// or toward an [`Approach`] target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Move {
    /// Left at `0.0` when `approach` is set; the distance is measured after turning.
    pub distance: f32,
    pub arrived_at: f32,
    pub approach: Option<Approach>,
}

impl Converge for Move {
    fn converge<C: CommandChannel>(
        &self,
        session: &mut Session<C>,
    ) -> Result<ActionStatus, SessionError> {
        let distance = match self.approach {
            None => self.distance,
            Some(approach) => {
                let status = approach.turn.converge(session)?;
                if !status.is_success() && !approach.move_on_turn_fail {
                    debug!(%status, "turn before move failed");
                    return Ok(status);
                }
                session.pose().planar_distance(approach.target)
            }
        };
        drive(session, distance, self.arrived_at)
    }
}

fn drive<C: CommandChannel>(
    session: &mut Session<C>,
    distance: f32,
    arrived_at: f32,
) -> Result<ActionStatus, SessionError> {
    let config = session.config().clone();
    let limits = Limits::new(arrived_at, config.move_attempts.cap(distance));
    let pose = *session.pose();
    let direction = if distance < 0.0 {
        -pose.planar_forward()
    } else {
        pose.planar_forward()
    };
    debug!(distance, "driving");

    let mut monitor = DriveMonitor {
        origin: pose.position,
        direction,
        distance: distance.abs(),
        sign: if distance < 0.0 { -1.0 } else { 1.0 },
        arrived_at,
        config,
    };
    let status = converge(session, limits, &mut monitor)?;
    session.defer(Command::SetWheels(WheelPair::STOP));
    Ok(status)
}

struct DriveMonitor {
    origin: Vec3,
    /// Unit ground-plane direction of travel.
    direction: Vec3,
    distance: f32,
    sign: f32,
    arrived_at: f32,
    config: MotionConfig,
}

impl Monitor for DriveMonitor {
    /// Distance still to go along the direction of travel; negative once past the target.
    fn measure(&mut self, state: &StateSnapshot) -> f32 {
        let travelled = (state.pose.position - self.origin).dot(self.direction);
        self.distance - travelled
    }

    fn actuate(&mut self, _attempt: u32, error: f32) -> Vec<Command> {
        let speed = self.config.ramp(
            self.config.move_speed,
            error.max(0.0),
            self.config.move_slowdown_distance,
        );
        vec![Command::SetWheels(WheelPair::straight(self.sign * speed))]
    }

    fn inspect(&mut self, error: f32, _state: &StateSnapshot) -> Option<ActionStatus> {
        if error < -self.arrived_at {
            debug!(overshoot = -error, "drove past the target");
            return Some(ActionStatus::OvershotMove);
        }
        None
    }
}

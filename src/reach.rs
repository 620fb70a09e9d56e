//! Moving a magnet to a target through the engine's articulation solver.

use crate::command::{Command, CommandChannel};
use crate::converge::{Limits, Monitor, converge};
use crate::envelope::ReachEnvelope;
use crate::error::SessionError;
use crate::primitive::Converge;
use crate::session::Session;
use crate::snapshot::{Arm, JointChain, StateSnapshot};
use crate::status::ActionStatus;
use glam::Vec3;
use tracing::debug;

/// Bring `arm`'s magnet to a world-space `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reach {
    /// World-space target, already resolved from chassis-relative input.
    pub target: Vec3,
    pub arm: Arm,
    pub arrived_at: f32,
    /// Test the target against the arm's envelope before moving.
    pub check_if_possible: bool,
}

impl Reach {
    /// Maps a reach target given in the chassis frame (`absolute == false`) or
    /// world frame into world space.
    pub fn resolve_target<C>(session: &Session<C>, target: Vec3, absolute: bool) -> Vec3 {
        if absolute {
            target
        } else {
            session.pose().relative_to_world(target)
        }
    }
}

impl Converge for Reach {
    fn converge<C: CommandChannel>(
        &self,
        session: &mut Session<C>,
    ) -> Result<ActionStatus, SessionError> {
        let config = session.config().clone();

        if self.check_if_possible {
            let load = session.load(self.arm);
            let reachable =
                ReachEnvelope::for_arm(session.pose(), &config.arm, self.arm, load)
                    .is_some_and(|envelope| envelope.contains(self.target));
            if !reachable {
                debug!(arm = ?self.arm, target = ?self.target, load, "target outside reach envelope");
                return Ok(ActionStatus::TooFarToReach);
            }
        }

        let mut monitor = ReachMonitor {
            arm: self.arm,
            target: self.target,
            previous: session.arm(self.arm).joints.clone(),
            still_frames: 0,
            stall_joint_speed: config.stall_joint_speed,
            stall_frames: config.stall_frames,
        };
        let limits = Limits::new(self.arrived_at, config.reach_max_attempts);
        converge(session, limits, &mut monitor)
    }
}

struct ReachMonitor {
    arm: Arm,
    target: Vec3,
    /// Joint angles on the previous frame.
    previous: JointChain,
    still_frames: u32,
    stall_joint_speed: f32,
    stall_frames: u32,
}

impl Monitor for ReachMonitor {
    fn measure(&mut self, state: &StateSnapshot) -> f32 {
        state.arm(self.arm).magnet.position.distance(self.target)
    }

    fn actuate(&mut self, attempt: u32, _error: f32) -> Vec<Command> {
        if attempt == 0 {
            vec![Command::SetIkTarget {
                arm: self.arm,
                target: self.target,
            }]
        } else {
            Vec::new()
        }
    }

    fn inspect(&mut self, error: f32, state: &StateSnapshot) -> Option<ActionStatus> {
        let joints = &state.arm(self.arm).joints;
        let speed = joints.max_delta(&self.previous);
        self.previous = joints.clone();

        if speed < self.stall_joint_speed {
            self.still_frames += 1;
        } else {
            self.still_frames = 0;
        }
        if self.still_frames >= self.stall_frames {
            debug!(arm = ?self.arm, distance = error, "arm stopped short of target");
            return Some(ActionStatus::FailedToBend);
        }
        None
    }
}

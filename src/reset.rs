//! Returning arms to their neutral configuration.

use crate::command::{Command, CommandChannel};
use crate::converge::{Limits, Monitor, converge};
use crate::error::SessionError;
use crate::primitive::Converge;
use crate::session::Session;
use crate::snapshot::{Arm, StateSnapshot};
use crate::status::ActionStatus;
use tracing::debug;

/// Drive the selected arms' joints to neutral. Held objects stay attached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reset {
    pub arms: &'static [Arm],
}

impl Reset {
    pub fn arm(arm: Arm) -> Self {
        Self { arms: arm.only() }
    }

    pub fn both() -> Self {
        Self { arms: &Arm::ALL }
    }
}

impl Converge for Reset {
    fn converge<C: CommandChannel>(
        &self,
        session: &mut Session<C>,
    ) -> Result<ActionStatus, SessionError> {
        let config = session.config();
        let limits = Limits::new(config.reset_aligned_at, config.reset_max_attempts);
        let targets = self
            .arms
            .iter()
            .map(|&arm| Command::SetJointTargets {
                arm,
                angles: session.arm(arm).joints.neutral(),
            })
            .collect();
        debug!(arms = ?self.arms, "resetting");

        let mut monitor = ResetMonitor {
            arms: self.arms,
            targets: Some(targets),
        };
        converge(session, limits, &mut monitor)
    }
}

struct ResetMonitor {
    arms: &'static [Arm],
    /// Sent once, on the first iteration.
    targets: Option<Vec<Command>>,
}

impl Monitor for ResetMonitor {
    fn measure(&mut self, state: &StateSnapshot) -> f32 {
        self.arms
            .iter()
            .map(|&arm| state.arm(arm).joints.distance_from_neutral().powi(2))
            .sum::<f32>()
            .sqrt()
    }

    fn actuate(&mut self, _attempt: u32, _error: f32) -> Vec<Command> {
        self.targets.take().unwrap_or_default()
    }
}

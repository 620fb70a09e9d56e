//! Public entry point: one intent in, one [`ActionStatus`] out.
//!
//! Build an [`ActionController`] from a [`CommandChannel`] whose scene is
//! already loaded, then call [`dispatch`](ActionController::dispatch) or one of
//! the convenience methods. Each call blocks until its motion reaches a
//! terminal status; `&mut self` keeps actions strictly sequential.

use crate::command::CommandChannel;
use crate::config::MotionConfig;
use crate::drive::{Approach, Move};
use crate::error::SessionError;
use crate::object::ObjectId;
use crate::pose::Pose;
use crate::primitive::{Converge, Primitive};
use crate::reach::Reach;
use crate::reset::Reset;
use crate::session::{Session, Target};
use crate::snapshot::{Arm, ArmState, StateSnapshot};
use crate::status::ActionStatus;
use crate::turn::Turn;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A high-level intent with all of its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Rotate in place by `angle` degrees.
    TurnBy { angle: f32, aligned_at: f32 },
    /// Rotate in place to face `target`.
    TurnTo { target: Target, aligned_at: f32 },
    /// Drive straight by `distance` metres; negative drives backward.
    MoveBy { distance: f32, arrived_at: f32 },
    /// Face `target`, then drive to it.
    MoveTo {
        target: Target,
        arrived_at: f32,
        aligned_at: f32,
        move_on_turn_fail: bool,
    },
    /// Bring `arm`'s magnet to `target`, given in world space when
    /// `absolute`, otherwise relative to the chassis.
    ReachFor {
        target: Vec3,
        arm: Arm,
        absolute: bool,
        arrived_at: f32,
        check_if_possible: bool,
    },
    ResetArm { arm: Arm },
    ResetArms,
}

impl Action {
    /// Resolves object ids and chassis-relative positions against the
    /// session's current frame. Advances no frames.
    pub fn resolve<C: CommandChannel>(self, session: &Session<C>) -> Result<Primitive, SessionError> {
        let primitive = match self {
            Action::TurnBy { angle, aligned_at } => Primitive::Turn(Turn { angle, aligned_at }),
            Action::TurnTo { target, aligned_at } => {
                let position = session.resolve(target)?;
                Primitive::Turn(Turn {
                    angle: session.pose().turn_toward(position, f32::EPSILON),
                    aligned_at,
                })
            }
            Action::MoveBy {
                distance,
                arrived_at,
            } => Primitive::Move(Move {
                distance,
                arrived_at,
                approach: None,
            }),
            Action::MoveTo {
                target,
                arrived_at,
                aligned_at,
                move_on_turn_fail,
            } => {
                let position = session.resolve(target)?;
                Primitive::Move(Move {
                    distance: 0.0,
                    arrived_at,
                    approach: Some(Approach {
                        target: position,
                        turn: Turn {
                            angle: session.pose().turn_toward(position, arrived_at),
                            aligned_at,
                        },
                        move_on_turn_fail,
                    }),
                })
            }
            Action::ReachFor {
                target,
                arm,
                absolute,
                arrived_at,
                check_if_possible,
            } => Primitive::Reach(Reach {
                target: Reach::resolve_target(session, target, absolute),
                arm,
                arrived_at,
                check_if_possible,
            }),
            Action::ResetArm { arm } => Primitive::Reset(Reset::arm(arm)),
            Action::ResetArms => Primitive::Reset(Reset::both()),
        };
        Ok(primitive)
    }
}

/// Executes actions one at a time against a bootstrapped session.
pub struct ActionController<C> {
    session: Session<C>,
}

impl<C: CommandChannel> ActionController<C> {
    /// Bootstraps a session over `channel`.
    pub fn connect(channel: C, config: MotionConfig) -> Result<Self, SessionError> {
        Ok(Self::new(Session::connect(channel, config)?))
    }

    pub fn new(session: Session<C>) -> Self {
        Self { session }
    }

    /// Runs `action` to a terminal status.
    ///
    /// Errors are reserved for channel failures and unknown object ids; every
    /// motion outcome, including failures, is an `Ok` status.
    #[instrument(level = "debug", skip(self))]
    pub fn dispatch(&mut self, action: Action) -> Result<ActionStatus, SessionError> {
        let primitive = action.resolve(&self.session)?;
        let start = self.session.frames();
        let status = primitive.converge(&mut self.session)?;
        debug!(%status, frames = self.session.frames() - start, "action finished");
        Ok(status)
    }

    /// Turn by `angle` degrees; positive angles turn toward positive headings.
    pub fn turn_by(&mut self, angle: f32) -> Result<ActionStatus, SessionError> {
        let aligned_at = self.session.config().aligned_at;
        self.dispatch(Action::TurnBy { angle, aligned_at })
    }

    pub fn turn_to(&mut self, target: impl Into<Target>) -> Result<ActionStatus, SessionError> {
        let aligned_at = self.session.config().aligned_at;
        self.dispatch(Action::TurnTo {
            target: target.into(),
            aligned_at,
        })
    }

    pub fn move_by(&mut self, distance: f32) -> Result<ActionStatus, SessionError> {
        let arrived_at = self.session.config().arrived_at;
        self.dispatch(Action::MoveBy {
            distance,
            arrived_at,
        })
    }

    pub fn move_to(
        &mut self,
        target: impl Into<Target>,
        move_on_turn_fail: bool,
    ) -> Result<ActionStatus, SessionError> {
        let config = self.session.config();
        let action = Action::MoveTo {
            target: target.into(),
            arrived_at: config.arrived_at,
            aligned_at: config.aligned_at,
            move_on_turn_fail,
        };
        self.dispatch(action)
    }

    pub fn reach_for(
        &mut self,
        target: Vec3,
        arm: Arm,
        absolute: bool,
        check_if_possible: bool,
    ) -> Result<ActionStatus, SessionError> {
        let arrived_at = self.session.config().reach_arrived_at;
        self.dispatch(Action::ReachFor {
            target,
            arm,
            absolute,
            arrived_at,
            check_if_possible,
        })
    }

    pub fn reset_arm(&mut self, arm: Arm) -> Result<ActionStatus, SessionError> {
        self.dispatch(Action::ResetArm { arm })
    }

    pub fn reset_arms(&mut self) -> Result<ActionStatus, SessionError> {
        self.dispatch(Action::ResetArms)
    }
}

impl<C> ActionController<C> {
    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    pub fn into_session(self) -> Session<C> {
        self.session
    }

    pub fn state(&self) -> &StateSnapshot {
        self.session.state()
    }

    pub fn pose(&self) -> &Pose {
        self.session.pose()
    }

    pub fn arm(&self, arm: Arm) -> &ArmState {
        self.session.arm(arm)
    }

    pub fn held(&self, arm: Arm) -> Option<ObjectId> {
        self.session.held(arm)
    }

    pub fn channel(&self) -> &C {
        self.session.channel()
    }

    pub fn channel_mut(&mut self) -> &mut C {
        self.session.channel_mut()
    }
}

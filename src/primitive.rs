use crate::command::CommandChannel;
use crate::drive::Move;
use crate::error::SessionError;
use crate::reach::Reach;
use crate::reset::Reset;
use crate::session::Session;
use crate::status::ActionStatus;
use crate::turn::Turn;

/// Runs a motion to a terminal [`ActionStatus`] against a session.
pub trait Converge {
    fn converge<C: CommandChannel>(
        &self,
        session: &mut Session<C>,
    ) -> Result<ActionStatus, SessionError>;
}

/// Every motion the controller can execute, with targets already resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Turn(Turn),
    Move(Move),
    Reach(Reach),
    Reset(Reset),
}

impl Converge for Primitive {
    fn converge<C: CommandChannel>(
        &self,
        session: &mut Session<C>,
    ) -> Result<ActionStatus, SessionError> {
        match self {
            Primitive::Turn(p) => p.converge(session),
            Primitive::Move(p) => p.converge(session),
            Primitive::Reach(p) => p.converge(session),
            Primitive::Reset(p) => p.converge(session),
        }
    }
}

use crate::object::ObjectId;

/// Failures of the link to the engine. Any of these ends the session.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("engine closed the command channel")]
    Closed,

    #[error("engine protocol violation: {0}")]
    Protocol(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors that abort an action without producing an [`ActionStatus`](crate::ActionStatus).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("command channel failed: {0}")]
    Channel(#[from] ChannelError),

    #[error("object {0} is not in the current frame")]
    UnknownObject(ObjectId),
}

//! # robot-actions
//!
//! A frame-stepped action engine for a simulated wheeled robot with two
//! magnet-tipped arms.
//!
//! High-level intents (turn by an angle, drive to a position, reach for a point)
//! become bounded loops of low-level commands sent over a [`CommandChannel`] to an
//! external physics engine. Every loop advances the simulation one frame per
//! iteration, remeasures against a tolerance and ends with exactly one
//! [`ActionStatus`]. The physics, IK solving and scene content all live on the
//! engine side.

pub mod command;
pub mod config;
pub mod controller;
pub mod converge;
pub mod drive;
pub mod envelope;
pub mod error;
pub mod object;
pub mod pose;
pub mod primitive;
pub mod reach;
pub mod reset;
pub mod session;
pub mod snapshot;
pub mod status;
pub mod turn;

pub use command::*;
pub use config::*;
pub use controller::*;
pub use converge::*;
pub use drive::*;
pub use envelope::*;
pub use error::*;
pub use object::*;
pub use pose::*;
pub use primitive::*;
pub use reach::*;
pub use reset::*;
pub use session::*;
pub use snapshot::*;
pub use status::*;
pub use turn::*;

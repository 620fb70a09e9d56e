//! Commands sent to the engine and the channel that carries them.

use crate::error::ChannelError;
use crate::object::ObjectStatic;
use crate::snapshot::{Arm, StateSnapshot};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Wheel angular-velocity targets in degrees per second.
///
/// Each value drives every wheel on that side of the chassis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelPair {
    pub left: f32,
    pub right: f32,
}

impl WheelPair {
    pub const STOP: WheelPair = WheelPair {
        left: 0.0,
        right: 0.0,
    };

    /// Opposite wheel directions: rotates the chassis in place. Positive
    /// `speed` turns toward positive headings.
    pub fn spin(speed: f32) -> Self {
        Self {
            left: speed,
            right: -speed,
        }
    }

    /// Both sides in the same direction: drives forward for positive `speed`.
    pub fn straight(speed: f32) -> Self {
        Self {
            left: speed,
            right: speed,
        }
    }
}

/// One low-level instruction for the engine.
///
/// Serialized with a `"$type"` discriminator so channel implementations can
/// forward commands as JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type", rename_all = "snake_case")]
pub enum Command {
    /// Set the wheel velocity targets. They persist until changed.
    SetWheels(WheelPair),

    /// Ask the engine's articulation solver to move `arm`'s magnet to a
    /// world-space `target`.
    SetIkTarget { arm: Arm, target: Vec3 },

    /// Drive `arm`'s joints toward explicit angles, in degrees.
    SetJointTargets { arm: Arm, angles: Vec<f32> },
}

/// What the engine hands back once a scene has been loaded.
#[derive(Clone, Debug, Default)]
pub struct SceneBootstrap {
    /// The first frame of the scene.
    pub snapshot: StateSnapshot,

    /// Static data for every object in the scene.
    pub objects: Vec<ObjectStatic>,
}

/// Synchronous link to the simulation engine.
pub trait CommandChannel {
    /// Returns the initial frame and static data of an already-loaded scene.
    fn bootstrap(&mut self) -> Result<SceneBootstrap, ChannelError>;

    /// Sends `commands`, advances the simulation by exactly one frame, and
    /// returns that frame's readout.
    fn communicate(&mut self, commands: &[Command]) -> Result<StateSnapshot, ChannelError>;
}

impl<C: CommandChannel + ?Sized> CommandChannel for &mut C {
    fn bootstrap(&mut self) -> Result<SceneBootstrap, ChannelError> {
        (**self).bootstrap()
    }

    fn communicate(&mut self, commands: &[Command]) -> Result<StateSnapshot, ChannelError> {
        (**self).communicate(commands)
    }
}

//! The per-frame readout produced by the engine after every simulated step.

use crate::object::ObjectId;
use crate::pose::Pose;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Selects which arm (joint chain and magnet) an action operates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arm {
    Left,
    Right,
}

impl Arm {
    pub const ALL: [Arm; 2] = [Arm::Left, Arm::Right];

    /// A one-element slice holding this arm.
    pub fn only(self) -> &'static [Arm] {
        match self {
            Arm::Left => &[Arm::Left],
            Arm::Right => &[Arm::Right],
        }
    }

    /// Maps a chassis-frame offset given for the left arm onto this arm by
    /// mirroring it across the chassis's YZ plane.
    pub fn mirror(self, left_offset: Vec3) -> Vec3 {
        match self {
            Arm::Left => left_offset,
            Arm::Right => Vec3::new(-left_offset.x, left_offset.y, left_offset.z),
        }
    }
}

/// Joint angles of one arm in degrees, ordered from the torso outward.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JointChain {
    pub angles: Vec<f32>,
}

impl JointChain {
    pub fn new(angles: Vec<f32>) -> Self {
        Self { angles }
    }

    /// The neutral configuration for a chain of this length.
    pub fn neutral(&self) -> Vec<f32> {
        vec![0.0; self.angles.len()]
    }

    /// Euclidean norm of the offsets from the neutral configuration.
    pub fn distance_from_neutral(&self) -> f32 {
        self.angles.iter().map(|a| a * a).sum::<f32>().sqrt()
    }

    /// Largest absolute per-joint change since `previous`.
    ///
    /// Joints missing from either chain are ignored.
    pub fn max_delta(&self, previous: &JointChain) -> f32 {
        self.angles
            .iter()
            .zip(&previous.angles)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}

/// End-effector state of one arm.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Magnet {
    /// World position, from forward kinematics computed by the engine.
    pub position: Vec3,

    /// The object stuck to the magnet, if any.
    pub held: Option<ObjectId>,
}

/// Everything the engine reports about one arm.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmState {
    pub joints: JointChain,
    pub magnet: Magnet,
}

/// Transform of a scene object for the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl ObjectTransform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Dynamic state of the scene for a single frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Engine frame counter.
    pub frame: u64,

    pub pose: Pose,

    pub left: ArmState,

    pub right: ArmState,

    /// Transforms of the scene's objects, by id.
    pub objects: HashMap<ObjectId, ObjectTransform>,
}

impl StateSnapshot {
    pub fn arm(&self, arm: Arm) -> &ArmState {
        match arm {
            Arm::Left => &self.left,
            Arm::Right => &self.right,
        }
    }

    pub fn held(&self, arm: Arm) -> Option<ObjectId> {
        self.arm(arm).magnet.held
    }

    pub fn object_position(&self, id: ObjectId) -> Option<Vec3> {
        self.objects.get(&id).map(|t| t.position)
    }
}

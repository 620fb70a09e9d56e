use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Attempt cap that grows with the size of the requested motion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttemptBudget {
    /// Attempts granted regardless of magnitude.
    pub base: u32,
    /// Extra attempts per unit (degree or metre) of requested motion.
    pub per_unit: f32,
}

impl AttemptBudget {
    pub fn cap(&self, magnitude: f32) -> u32 {
        self.base
            .saturating_add((magnitude.abs() * self.per_unit).ceil() as u32)
    }
}

/// Geometry and payload limits shared by both arms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmGeometry {
    /// Left shoulder anchor in the chassis frame at the lowest torso height.
    /// The right arm mirrors it across the YZ plane.
    pub shoulder: Vec3,
    /// Shoulder-to-magnet distance with the arm fully extended.
    pub reach: f32,
    /// Vertical travel of the torso above its lowest position.
    pub torso_lift: f32,
    /// Heaviest load (kg) a magnet can lift and still reach anywhere.
    pub max_payload: f32,
    /// Reach lost per kg of held load.
    pub payload_reach_loss: f32,
}

impl Default for ArmGeometry {
    fn default() -> Self {
        Self {
            shoulder: Vec3::new(-0.225, 0.565, 0.075),
            reach: 0.235 + 0.15 + 0.0625,
            torso_lift: 0.0,
            max_payload: 20.0,
            payload_reach_loss: 0.01,
        }
    }
}

/// Tuning for every motion primitive.
///
/// Angles are in degrees, distances in metres, wheel speeds in degrees per second.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Wheel speed while turning far from the target heading.
    pub turn_speed: f32,
    /// Heading error below which turn speed ramps down.
    pub turn_slowdown_angle: f32,
    /// Default turn tolerance.
    pub aligned_at: f32,
    pub turn_attempts: AttemptBudget,
    /// Number of recent iterations inspected for turn progress.
    pub unaligned_window: usize,
    /// Minimum drop in heading error across the window.
    pub unaligned_min_progress: f32,
    /// Error sign reversals within the window that count as oscillation; 0 disables.
    pub unaligned_max_reversals: usize,

    /// Wheel speed while driving far from the target.
    pub move_speed: f32,
    /// Remaining distance below which drive speed ramps down.
    pub move_slowdown_distance: f32,
    /// Default move tolerance.
    pub arrived_at: f32,
    pub move_attempts: AttemptBudget,

    /// Lower bound of the speed ramp, as a fraction of full speed.
    pub min_speed_fraction: f32,

    /// Default magnet-to-target tolerance.
    pub reach_arrived_at: f32,
    pub reach_max_attempts: u32,
    /// Joint speed (degrees per frame) below which an arm counts as still.
    pub stall_joint_speed: f32,
    /// Consecutive still frames before a reach is declared stalled.
    pub stall_frames: u32,

    /// Aggregate joint-angle distance from neutral that counts as reset.
    pub reset_aligned_at: f32,
    pub reset_max_attempts: u32,

    pub arm: ArmGeometry,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            turn_speed: 90.0,
            turn_slowdown_angle: 20.0,
            aligned_at: 3.0,
            turn_attempts: AttemptBudget {
                base: 100,
                per_unit: 5.0,
            },
            unaligned_window: 20,
            unaligned_min_progress: 0.5,
            unaligned_max_reversals: 4,
            move_speed: 180.0,
            move_slowdown_distance: 0.5,
            arrived_at: 0.1,
            move_attempts: AttemptBudget {
                base: 100,
                per_unit: 200.0,
            },
            min_speed_fraction: 0.1,
            reach_arrived_at: 0.125,
            reach_max_attempts: 200,
            stall_joint_speed: 0.01,
            stall_frames: 5,
            reset_aligned_at: 1.0,
            reset_max_attempts: 200,
            arm: ArmGeometry::default(),
        }
    }
}

impl MotionConfig {
    /// Scales `full` speed by how far `error` is from zero relative to `slowdown`.
    pub(crate) fn ramp(&self, full: f32, error: f32, slowdown: f32) -> f32 {
        let fraction = if slowdown > 0.0 {
            (error.abs() / slowdown).clamp(self.min_speed_fraction, 1.0)
        } else {
            1.0
        };
        full * fraction
    }
}

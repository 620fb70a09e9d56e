//! Pre-flight reachability test for an arm.

use crate::config::ArmGeometry;
use crate::pose::Pose;
use crate::snapshot::Arm;
use bevy_math::primitives::Capsule3d;
use glam::Vec3;

/// The region an arm's magnet can reach from the current chassis pose.
///
/// A capsule whose axis runs along the chassis up direction from the shoulder
/// at the lowest torso height to the shoulder at full torso lift.
#[derive(Clone, Copy, Debug)]
pub struct ReachEnvelope {
    /// World-space center of the capsule.
    pub center: Vec3,
    /// World-space unit axis of the capsule.
    pub axis: Vec3,
    pub capsule: Capsule3d,
}

impl ReachEnvelope {
    /// Builds the envelope of `arm` at `pose` while carrying `load` kg.
    ///
    /// Returns `None` when the load leaves the arm unable to reach anything.
    pub fn for_arm(pose: &Pose, geometry: &ArmGeometry, arm: Arm, load: f32) -> Option<Self> {
        if load > geometry.max_payload {
            return None;
        }
        let radius = geometry.reach - geometry.payload_reach_loss * load.max(0.0);
        if radius <= 0.0 {
            return None;
        }

        let lift = geometry.torso_lift.max(0.0);
        let shoulder = pose.relative_to_world(arm.mirror(geometry.shoulder));
        let axis = Vec3::Y;
        Some(Self {
            center: shoulder + axis * (lift / 2.0),
            axis,
            capsule: Capsule3d::new(radius, lift),
        })
    }

    /// Distance from `point` to the capsule's inner segment.
    pub fn axis_distance(&self, point: Vec3) -> f32 {
        let offset = point - self.center;
        let h = self.capsule.half_length;
        let along = offset.dot(self.axis).clamp(-h, h);
        (offset - self.axis * along).length()
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.axis_distance(point) <= self.capsule.radius
    }
}

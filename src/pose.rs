//! Chassis pose and the planar frame math built on it.
//!
//! Headings are yaw angles in degrees about the world up axis (+Y). A heading of
//! `0` faces +Z; a positive angle rotates the forward axis toward +X, which is
//! the right-arm side of the chassis.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Wraps an angle in degrees into `(-180, 180]`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    if a > 180.0 { a - 360.0 } else { a }
}

/// World-space position and orientation of the chassis.
///
/// The engine replaces the pose wholesale every frame; the core never edits it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Chassis root position in world space.
    pub position: Vec3,

    /// Chassis orientation in world space.
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: Vec3, heading: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(heading.to_radians()),
        }
    }

    /// Returns the chassis's local forward direction (Z-axis) in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Forward direction projected onto the ground plane.
    ///
    /// Falls back to +Z if the chassis is pitched straight up or down.
    pub fn planar_forward(&self) -> Vec3 {
        let f = self.forward();
        Vec3::new(f.x, 0.0, f.z).try_normalize().unwrap_or(Vec3::Z)
    }

    /// Current heading in degrees, in `(-180, 180]`.
    pub fn heading(&self) -> f32 {
        let f = self.planar_forward();
        f.x.atan2(f.z).to_degrees()
    }

    /// Yaw-only rotation of the chassis. Pitch and roll are discarded so that
    /// relative targets stay level with the floor.
    pub fn yaw(&self) -> Quat {
        Quat::from_rotation_y(self.heading().to_radians())
    }

    /// World heading of the straight line from the chassis to `point`.
    pub fn bearing_to(&self, point: Vec3) -> f32 {
        let d = point - self.position;
        d.x.atan2(d.z).to_degrees()
    }

    /// Signed turn, in degrees, that would make the chassis face `point`.
    pub fn angle_to(&self, point: Vec3) -> f32 {
        wrap_degrees(self.bearing_to(point) - self.heading())
    }

    /// Like [`angle_to`](Self::angle_to), but `0` when `point` lies within
    /// `within` metres of the chassis on the ground plane, where its bearing
    /// is meaningless.
    pub fn turn_toward(&self, point: Vec3, within: f32) -> f32 {
        if self.planar_distance(point) <= within {
            0.0
        } else {
            self.angle_to(point)
        }
    }

    /// Distance to `point` measured on the ground plane.
    pub fn planar_distance(&self, point: Vec3) -> f32 {
        let d = point - self.position;
        Vec3::new(d.x, 0.0, d.z).length()
    }

    /// Maps a point in the chassis frame into world space.
    pub fn relative_to_world(&self, point: Vec3) -> Vec3 {
        self.position + self.yaw() * point
    }

    /// Maps a world-space point into the chassis frame.
    pub fn world_to_relative(&self, point: Vec3) -> Vec3 {
        self.yaw().inverse() * (point - self.position)
    }

    /// Rotates the pose about the world up axis by `degrees`.
    pub fn rotate_yaw(&mut self, degrees: f32) {
        self.rotation = Quat::from_rotation_y(degrees.to_radians()) * self.rotation;
    }
}

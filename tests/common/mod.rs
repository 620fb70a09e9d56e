// tests/common/mod.rs
#![allow(dead_code)]

use glam::Vec3;
use robot_actions::{
    ActionController, Arm, ArmGeometry, ArmState, ChannelError, Command, CommandChannel,
    JointChain, Magnet, MotionConfig, ObjectId, ObjectStatic, ObjectTransform, Pose,
    SceneBootstrap, StateSnapshot, WheelPair,
};
use std::collections::HashMap;

/// Joint angle (degrees) per metre of magnet offset in the toy arm model.
pub const DEGREES_PER_METRE: f32 = 100.0;

/// One arm of the toy robot. The first three joint angles encode the magnet's
/// chassis-frame offset from the shoulder; the fourth is a free wrist joint.
#[derive(Clone, Debug)]
pub struct ToyArm {
    pub angles: Vec<f32>,
    pub held: Option<ObjectId>,
    ik_target: Option<Vec3>,
    joint_targets: Option<Vec<f32>>,
}

impl Default for ToyArm {
    fn default() -> Self {
        Self {
            angles: vec![0.0; 4],
            held: None,
            ik_target: None,
            joint_targets: None,
        }
    }
}

impl ToyArm {
    fn offset(&self) -> Vec3 {
        Vec3::new(self.angles[0], self.angles[1], self.angles[2]) / DEGREES_PER_METRE
    }

    fn set_offset(&mut self, offset: Vec3) {
        let a = offset * DEGREES_PER_METRE;
        self.angles[0] = a.x;
        self.angles[1] = a.y;
        self.angles[2] = a.z;
    }
}

/// Kinematic stand-in for the physics engine: wheel speeds map linearly to
/// yaw and forward motion, arms slide toward their targets at a fixed rate.
#[derive(Clone, Debug)]
pub struct ToyEngine {
    pub pose: Pose,
    pub wheels: WheelPair,
    /// Yaw degrees per frame per unit of differential wheel speed.
    pub yaw_gain: f32,
    /// Metres per frame per unit of common wheel speed.
    pub drive_gain: f32,
    /// Magnet travel per frame while following an IK target.
    pub arm_speed: f32,
    /// Joint travel per frame while following joint targets.
    pub joint_speed: f32,
    pub arm_reach: f32,
    pub arm_blocked: bool,
    pub shoulder: Vec3,
    pub left: ToyArm,
    pub right: ToyArm,
    pub objects: HashMap<ObjectId, Vec3>,
    pub statics: Vec<ObjectStatic>,
    /// Close the channel once this many frames have been produced.
    pub close_after: Option<u64>,
    pub frame: u64,
    /// Every command received, in order.
    pub sent: Vec<Command>,
}

impl Default for ToyEngine {
    fn default() -> Self {
        let geometry = ArmGeometry::default();
        Self {
            pose: Pose::default(),
            wheels: WheelPair::STOP,
            yaw_gain: 0.02,
            drive_gain: 0.02 / 180.0,
            arm_speed: 0.02,
            joint_speed: 5.0,
            arm_reach: geometry.reach,
            arm_blocked: false,
            shoulder: geometry.shoulder,
            left: ToyArm::default(),
            right: ToyArm::default(),
            objects: HashMap::new(),
            statics: Vec::new(),
            close_after: None,
            frame: 0,
            sent: Vec::new(),
        }
    }
}

impl ToyEngine {
    pub fn arm(&self, arm: Arm) -> &ToyArm {
        match arm {
            Arm::Left => &self.left,
            Arm::Right => &self.right,
        }
    }

    pub fn arm_mut(&mut self, arm: Arm) -> &mut ToyArm {
        match arm {
            Arm::Left => &mut self.left,
            Arm::Right => &mut self.right,
        }
    }

    fn shoulder_world(&self, arm: Arm) -> Vec3 {
        self.pose.relative_to_world(arm.mirror(self.shoulder))
    }

    fn apply(&mut self, command: &Command) {
        match command {
            Command::SetWheels(wheels) => self.wheels = *wheels,
            Command::SetIkTarget { arm, target } => {
                let toy = self.arm_mut(*arm);
                toy.ik_target = Some(*target);
                toy.joint_targets = None;
            }
            Command::SetJointTargets { arm, angles } => {
                let toy = self.arm_mut(*arm);
                toy.joint_targets = Some(angles.clone());
                toy.ik_target = None;
            }
        }
    }

    fn step_arm(&mut self, arm: Arm) {
        if self.arm_blocked {
            return;
        }
        let shoulder = self.shoulder_world(arm);
        let yaw = self.pose.yaw();
        let (reach, arm_speed, joint_speed) = (self.arm_reach, self.arm_speed, self.joint_speed);
        let toy = self.arm_mut(arm);

        if let Some(target) = toy.ik_target {
            let desired = (yaw.inverse() * (target - shoulder)).clamp_length_max(reach);
            let offset = toy.offset();
            let next = offset + (desired - offset).clamp_length_max(arm_speed);
            toy.set_offset(next);
        } else if let Some(targets) = toy.joint_targets.clone() {
            for (angle, target) in toy.angles.iter_mut().zip(targets) {
                *angle += (target - *angle).clamp(-joint_speed, joint_speed);
            }
        }
    }

    fn step(&mut self) {
        let turn = (self.wheels.left - self.wheels.right) / 2.0 * self.yaw_gain;
        let drive = (self.wheels.left + self.wheels.right) / 2.0 * self.drive_gain;
        self.pose.rotate_yaw(turn);
        self.pose.position += self.pose.planar_forward() * drive;
        self.step_arm(Arm::Left);
        self.step_arm(Arm::Right);
        self.frame += 1;
    }

    fn arm_state(&self, arm: Arm) -> ArmState {
        let toy = self.arm(arm);
        ArmState {
            joints: JointChain::new(toy.angles.clone()),
            magnet: Magnet {
                position: self.shoulder_world(arm) + self.pose.yaw() * toy.offset(),
                held: toy.held,
            },
        }
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            frame: self.frame,
            pose: self.pose,
            left: self.arm_state(Arm::Left),
            right: self.arm_state(Arm::Right),
            objects: self
                .objects
                .iter()
                .map(|(&id, &position)| (id, ObjectTransform::at(position)))
                .collect(),
        }
    }

    /// Wheel commands that would drive the chassis forward or backward.
    pub fn drive_commands(&self) -> usize {
        self.sent
            .iter()
            .filter(|c| {
                matches!(c, Command::SetWheels(w) if w.left == w.right && w.left != 0.0)
            })
            .count()
    }
}

impl CommandChannel for ToyEngine {
    fn bootstrap(&mut self) -> Result<SceneBootstrap, ChannelError> {
        Ok(SceneBootstrap {
            snapshot: self.snapshot(),
            objects: self.statics.clone(),
        })
    }

    fn communicate(&mut self, commands: &[Command]) -> Result<StateSnapshot, ChannelError> {
        if self.close_after.is_some_and(|limit| self.frame >= limit) {
            return Err(ChannelError::Closed);
        }
        for command in commands {
            self.sent.push(command.clone());
            self.apply(command);
        }
        self.step();
        Ok(self.snapshot())
    }
}

pub fn setup(engine: ToyEngine) -> ActionController<ToyEngine> {
    ActionController::connect(engine, MotionConfig::default()).unwrap()
}

/// Chassis-frame point `offset` metres in front of the left shoulder.
pub fn in_front_of_left_shoulder(offset: f32) -> Vec3 {
    ArmGeometry::default().shoulder + Vec3::new(0.0, 0.0, offset)
}

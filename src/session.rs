//! The explicit context every action runs against.

use crate::command::{Command, CommandChannel, SceneBootstrap};
use crate::config::MotionConfig;
use crate::error::SessionError;
use crate::object::{ObjectId, ObjectRegistry, ObjectStatic};
use crate::pose::Pose;
use crate::snapshot::{Arm, ArmState, StateSnapshot};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Something an action can aim at: a scene object or a literal world position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Object(ObjectId),
    Position(Vec3),
}

impl From<Vec3> for Target {
    fn from(position: Vec3) -> Self {
        Target::Position(position)
    }
}

impl From<ObjectId> for Target {
    fn from(id: ObjectId) -> Self {
        Target::Object(id)
    }
}

/// A bootstrapped connection to the engine plus the latest frame it produced.
pub struct Session<C> {
    channel: C,
    config: MotionConfig,
    state: StateSnapshot,
    objects: ObjectRegistry,
    /// Commands deferred to the next frame.
    pending: Vec<Command>,
    frames: u64,
}

impl<C: CommandChannel> Session<C> {
    /// Fetches the initial frame and static object data from `channel`.
    ///
    /// The scene must already be loaded on the engine side.
    pub fn connect(mut channel: C, config: MotionConfig) -> Result<Self, SessionError> {
        let bootstrap = channel.bootstrap()?;
        Ok(Self::from_bootstrap(channel, config, bootstrap))
    }

    pub fn from_bootstrap(channel: C, config: MotionConfig, bootstrap: SceneBootstrap) -> Self {
        Self {
            channel,
            config,
            state: bootstrap.snapshot,
            objects: bootstrap.objects.into_iter().collect(),
            pending: Vec::new(),
            frames: 0,
        }
    }

    /// Sends deferred commands followed by `commands`, advances one frame, and
    /// replaces the snapshot with the engine's readout.
    pub(crate) fn step(&mut self, commands: Vec<Command>) -> Result<&StateSnapshot, SessionError> {
        let mut batch = std::mem::take(&mut self.pending);
        batch.extend(commands);
        self.state = self.channel.communicate(&batch)?;
        self.frames += 1;
        trace!(frame = self.state.frame, commands = batch.len(), "frame advanced");
        Ok(&self.state)
    }

    /// Queues a command for the next frame without advancing the simulation.
    pub(crate) fn defer(&mut self, command: Command) {
        self.pending.push(command);
    }

    /// Resolves `target` to a world position using the current frame.
    pub fn resolve(&self, target: Target) -> Result<Vec3, SessionError> {
        match target {
            Target::Position(position) => Ok(position),
            Target::Object(id) => self
                .state
                .object_position(id)
                .ok_or(SessionError::UnknownObject(id)),
        }
    }

    /// Mass currently held by `arm`'s magnet.
    pub fn load(&self, arm: Arm) -> f32 {
        self.state
            .held(arm)
            .map_or(0.0, |id| self.objects.mass_of(id))
    }
}

impl<C> Session<C> {
    /// The most recent frame.
    pub fn state(&self) -> &StateSnapshot {
        &self.state
    }

    pub fn pose(&self) -> &Pose {
        &self.state.pose
    }

    pub fn arm(&self, arm: Arm) -> &ArmState {
        self.state.arm(arm)
    }

    pub fn held(&self, arm: Arm) -> Option<ObjectId> {
        self.state.held(arm)
    }

    pub fn object(&self, id: ObjectId) -> Option<&ObjectStatic> {
        self.objects.get(id)
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Frames advanced by this session since bootstrap.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn into_channel(self) -> C {
        self.channel
    }
}

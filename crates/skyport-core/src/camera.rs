//! Trailing follow camera.
//!
//! Position trails the ship through exponential smoothing; the look-at
//! target tracks the ship's facing instantly.

use bevy::math::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::flight::ShipPose;

/// Follow camera constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Offset from the ship in ship-aligned space (behind and above).
    pub offset: [f32; 3],
    /// Fraction of ship pitch applied to the camera.
    pub pitch_influence: f32,
    /// Lerp factor per frame toward the desired position.
    pub smoothing: f32,
    /// Distance of the look-at point ahead of the ship.
    pub look_ahead: f32,
    pub initial_position: [f32; 3],
    pub fov_degrees: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            offset: [0.0, 6.0, 13.0],
            pitch_influence: 0.35,
            smoothing: 0.1,
            look_ahead: 36.0,
            initial_position: [0.0, 6.0, 12.0],
            fov_degrees: 62.0,
        }
    }
}

impl CameraTuning {
    /// Camera orientation for a ship orientation, with dampened pitch.
    pub fn rotation(&self, yaw: f32, pitch: f32) -> Quat {
        Quat::from_euler(EulerRot::YXZ, yaw, pitch * self.pitch_influence, 0.0)
    }

    pub fn desired_position(&self, pose: &ShipPose) -> Vec3 {
        pose.position + self.rotation(pose.yaw, pose.pitch) * Vec3::from_array(self.offset)
    }

    pub fn look_target(&self, pose: &ShipPose) -> Vec3 {
        pose.position + self.rotation(pose.yaw, pose.pitch) * Vec3::NEG_Z * self.look_ahead
    }
}

/// Current camera pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowRig {
    pub position: Vec3,
    pub look_target: Vec3,
}

impl FollowRig {
    pub fn new(tuning: &CameraTuning) -> Self {
        Self {
            position: Vec3::from_array(tuning.initial_position),
            look_target: Vec3::ZERO,
        }
    }

    /// Moves the rig one frame toward the ship.
    pub fn follow(&mut self, pose: &ShipPose, tuning: &CameraTuning) {
        let desired = tuning.desired_position(pose);
        if desired.is_finite() {
            self.position = self.position.lerp(desired, tuning.smoothing);
        }
        let target = tuning.look_target(pose);
        if target.is_finite() {
            self.look_target = target;
        }
    }
}

//! Decorative drones circling the scene centre.

use bevy::math::{EulerRot, Quat, Vec3};

const BASE_SPEED: f32 = 0.18;
const SPEED_STEP: f32 = 0.04;
const BASE_RADIUS: f32 = 30.0;
const RADIUS_STEP: f32 = 16.0;
const PHASE_STEP: f32 = 0.95;
const BASE_HEIGHT: f32 = 4.4;
const BOB_AMPLITUDE: f32 = 0.46;
const ROLL_AMPLITUDE: f32 = 0.07;

/// Orbit parameters of one drone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroneOrbit {
    /// Radians per second.
    pub speed: f32,
    pub radius: f32,
    pub phase: f32,
    pub base_height: f32,
}

/// Drone transform at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DronePose {
    pub position: Vec3,
    pub yaw: f32,
    pub roll: f32,
}

impl DronePose {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, 0.0, self.roll)
    }
}

impl DroneOrbit {
    /// Orbit of the `index`-th drone. Higher indices orbit wider and faster.
    pub fn for_index(index: u32) -> Self {
        let i = index as f32;
        Self {
            speed: BASE_SPEED + SPEED_STEP * i,
            radius: BASE_RADIUS + RADIUS_STEP * i,
            phase: PHASE_STEP * i,
            base_height: BASE_HEIGHT,
        }
    }

    /// Pose at elapsed time `t` (seconds), turned to face `ship` horizontally.
    pub fn pose_at(&self, t: f32, ship: Vec3) -> DronePose {
        let angle = t * self.speed + self.phase;
        let position = Vec3::new(
            angle.cos() * self.radius,
            self.base_height + (t * 2.0 + self.phase).sin() * BOB_AMPLITUDE,
            angle.sin() * self.radius,
        );
        let to_ship = ship - position;
        // Model forward is -z, so yaw = atan2(-dx, -dz).
        let yaw = if to_ship.x == 0.0 && to_ship.z == 0.0 {
            0.0
        } else {
            (-to_ship.x).atan2(-to_ship.z)
        };
        DronePose {
            position,
            yaw,
            roll: (t * 1.2 + self.phase).sin() * ROLL_AMPLITUDE,
        }
    }
}

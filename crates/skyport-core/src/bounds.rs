//! Cylindrical flight envelope.
//!
//! Every published ship position lies inside the cylinder
//! `hypot(x, z) <= radius`, `min_y <= y <= max_y`.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Velocity attenuation applied to the horizontal components when the ship
/// is pushed back onto the cylinder wall.
pub const BOUNDARY_FRICTION: f32 = 0.25;

/// Tolerance used by [`Bounds::contains`] to absorb float rounding after a clamp.
const CONTAINS_EPSILON: f32 = 1e-3;

/// Static spatial envelope constraining all movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub radius: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            radius: 110.0,
            min_y: 0.0,
            max_y: 5.0,
        }
    }
}

impl Bounds {
    /// Creates validated bounds.
    pub fn new(radius: f32, min_y: f32, max_y: f32) -> Result<Self, ConfigError> {
        let bounds = Self {
            radius,
            min_y,
            max_y,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if !self.min_y.is_finite() || !self.max_y.is_finite() || self.max_y <= self.min_y {
            return Err(ConfigError::InvalidHeightRange {
                min_y: self.min_y,
                max_y: self.max_y,
            });
        }
        Ok(())
    }

    /// Returns true if `point` lies inside the envelope (with a small tolerance).
    pub fn contains(&self, point: Vec3) -> bool {
        point.x.hypot(point.z) <= self.radius + CONTAINS_EPSILON
            && point.y >= self.min_y - CONTAINS_EPSILON
            && point.y <= self.max_y + CONTAINS_EPSILON
    }

    /// Clamps a candidate position into the envelope.
    ///
    /// Horizontal overshoot rescales x/z onto the circle and attenuates the
    /// horizontal velocity by [`BOUNDARY_FRICTION`]. Touching either vertical
    /// bound zeroes the vertical velocity.
    pub fn clamp(&self, candidate: Vec3, velocity: &mut Vec3) -> Vec3 {
        let mut position = candidate;

        let horizontal = position.x.hypot(position.z);
        if horizontal > self.radius {
            let scale = self.radius / horizontal;
            position.x *= scale;
            position.z *= scale;
            velocity.x *= BOUNDARY_FRICTION;
            velocity.z *= BOUNDARY_FRICTION;
        }

        position.y = position.y.clamp(self.min_y, self.max_y);
        if position.y <= self.min_y || position.y >= self.max_y {
            velocity.y = 0.0;
        }

        position
    }
}

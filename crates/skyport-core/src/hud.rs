//! HUD and minimap projection.
//!
//! Map convention: +x is right, +z is up (north), so a world point at
//! `(0, -radius)` sits at the bottom edge of the minimap.

use std::f32::consts::{PI, TAU};
use std::fmt;

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

/// Distance below which guidance reports arrival.
pub const ARRIVAL_DISTANCE: f32 = 10.0;

/// Altitude difference below which guidance says "hold level".
pub const LEVEL_TOLERANCE: f32 = 1.0;

/// Normalised minimap coordinates, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub left: f32,
    pub top: f32,
}

/// Projects a world `(x, z)` onto the minimap.
pub fn to_map_coords(x: f32, z: f32, radius: f32) -> MapPoint {
    let span = radius * 2.0;
    let left = (x + radius) / span * 100.0;
    let top = (radius - z) / span * 100.0;
    MapPoint {
        left: left.clamp(0.0, 100.0),
        top: top.clamp(0.0, 100.0),
    }
}

/// The eight compass points, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Buckets an angle in degrees into 45° sectors centred on each point.
    pub fn from_degrees(degrees: f32) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let index = (normalized / 45.0).round() as usize % 8;
        Self::ALL[index]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Heading of a planar direction `(dx, dz)` in degrees, in `[0, 360)`.
pub fn heading_degrees(dx: f32, dz: f32) -> f32 {
    let degrees = dx.atan2(dz).rem_euclid(TAU) * 180.0 / PI;
    // rem_euclid can return exactly 360 for inputs a hair below zero.
    if degrees >= 360.0 { 0.0 } else { degrees }
}

/// Ship compass reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Compass {
    pub heading: CompassPoint,
    pub degrees: f32,
}

/// Compass for a ship yaw. The ship faces `(-sin yaw, -cos yaw)`.
pub fn compass(yaw: f32) -> Compass {
    let forward_x = -yaw.sin();
    let forward_z = -yaw.cos();
    let degrees = heading_degrees(forward_x, forward_z);
    Compass {
        heading: CompassPoint::from_degrees(degrees),
        degrees,
    }
}

/// What the pilot should do vertically to reach the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "meters", rename_all = "snake_case")]
pub enum AltitudeAdvice {
    HoldLevel,
    Climb(u32),
    Descend(u32),
}

impl AltitudeAdvice {
    pub fn from_difference(dy: f32) -> Self {
        if !dy.is_finite() || dy.abs() < LEVEL_TOLERANCE {
            return Self::HoldLevel;
        }
        let meters = dy.abs().round() as u32;
        if dy > 0.0 {
            Self::Climb(meters)
        } else {
            Self::Descend(meters)
        }
    }
}

impl fmt::Display for AltitudeAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HoldLevel => f.write_str("Hold level"),
            Self::Climb(m) => write!(f, "Climb {m}m"),
            Self::Descend(m) => write!(f, "Descend {m}m"),
        }
    }
}

/// Navigation guidance from the ship to a destination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guidance {
    pub heading: CompassPoint,
    pub distance: f32,
    pub altitude_diff: f32,
    pub altitude: AltitudeAdvice,
    pub arrived: bool,
}

impl Guidance {
    /// One-line GPS instruction, e.g. `"GPS: Head NE for 42m"`.
    pub fn instruction(&self) -> String {
        if self.arrived {
            "GPS: Destination reached.".to_string()
        } else {
            format!(
                "GPS: Head {} for {}m",
                self.heading,
                self.distance.round() as u32
            )
        }
    }
}

pub fn guidance(ship: Vec3, destination: Vec3) -> Guidance {
    let dx = destination.x - ship.x;
    let dz = destination.z - ship.z;
    let dy = destination.y - ship.y;
    let distance = dx.hypot(dz);
    Guidance {
        heading: CompassPoint::from_degrees(heading_degrees(dx, dz)),
        distance,
        altitude_diff: dy,
        altitude: AltitudeAdvice::from_difference(dy),
        arrived: distance < ARRIVAL_DISTANCE,
    }
}

/// Suppresses HUD republishing for sub-threshold movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudThrottle {
    pub position_threshold: f32,
    pub yaw_threshold: f32,
    last: Option<(Vec3, f32)>,
}

impl Default for HudThrottle {
    fn default() -> Self {
        Self {
            position_threshold: 0.2,
            yaw_threshold: 0.01,
            last: None,
        }
    }
}

impl HudThrottle {
    pub fn new(position_threshold: f32, yaw_threshold: f32) -> Self {
        Self {
            position_threshold,
            yaw_threshold,
            last: None,
        }
    }

    /// Returns true (and remembers the sample) when the ship moved enough to
    /// be worth a HUD refresh.
    pub fn should_publish(&mut self, position: Vec3, yaw: f32) -> bool {
        let changed = match self.last {
            None => true,
            Some((last_position, last_yaw)) => {
                let delta = (position - last_position).abs();
                delta.x >= self.position_threshold
                    || delta.y >= self.position_threshold
                    || delta.z >= self.position_threshold
                    || (yaw - last_yaw).abs() >= self.yaw_threshold
            }
        };
        if changed {
            self.last = Some((position, yaw));
        }
        changed
    }

    /// Forces the next sample to publish.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

//! Stations and proximity detection.

use std::fmt;

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

/// Unique identifier of a station (e.g. `"about"`, `"projects"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Error returned when a station id is not part of the configured list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown station: {0}")]
pub struct UnknownStation(pub StationId);

/// A named point of interest tied to a portfolio section.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub position: Vec3,
}

impl Station {
    pub fn new(id: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: StationId::new(id),
            position,
        }
    }
}

/// Horizontal/vertical thresholds that count as "at the station".
///
/// Both comparisons are strict: a ship exactly `horizontal` away is outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityRadius {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for ProximityRadius {
    fn default() -> Self {
        Self {
            horizontal: 18.0,
            vertical: 10.0,
        }
    }
}

impl ProximityRadius {
    pub fn contains(&self, ship: Vec3, station: Vec3) -> bool {
        let horizontal = (ship.x - station.x).hypot(ship.z - station.z);
        let vertical = (ship.y - station.y).abs();
        horizontal < self.horizontal && vertical < self.vertical
    }
}

/// Returns the first station (in list order) within `radius` of `position`.
pub fn find_nearby<'a>(
    position: Vec3,
    stations: &'a [Station],
    radius: &ProximityRadius,
) -> Option<&'a Station> {
    stations
        .iter()
        .find(|station| radius.contains(position, station.position))
}

/// Direction for stepping through the station list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleDirection {
    Next,
    Previous,
}

/// Returns the neighbour of `current` in list order, wrapping at both ends.
pub fn cycle<'a>(
    stations: &'a [Station],
    current: &StationId,
    direction: CycleDirection,
) -> Option<&'a StationId> {
    let len = stations.len();
    let index = stations.iter().position(|s| &s.id == current)?;
    let next = match direction {
        CycleDirection::Next => (index + 1) % len,
        CycleDirection::Previous => (index + len - 1) % len,
    };
    Some(&stations[next].id)
}

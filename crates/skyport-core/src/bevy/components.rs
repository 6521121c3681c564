//! ECS components for the skyport scene.

use bevy::prelude::*;

use crate::camera::FollowRig;
use crate::drone::DroneOrbit;
use crate::flight::ShipState;
use crate::station::StationId;

/// The pilot's ship. Its `Transform` mirrors `state` after every step.
#[derive(Component, Debug, Clone)]
pub struct Ship {
    pub state: ShipState,
    /// Cosmetic boost flame toggle.
    pub boosting: bool,
}

impl Ship {
    pub fn new(state: ShipState) -> Self {
        Self {
            state,
            boosting: false,
        }
    }
}

/// Trailing camera rig following the ship.
#[derive(Component, Debug, Clone)]
pub struct FollowCamera {
    pub rig: FollowRig,
}

/// Marker for the camera entity that renders the scene.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MainCamera;

/// Decorative drone on a fixed orbit.
#[derive(Component, Debug, Clone)]
pub struct Drone {
    pub index: u32,
    pub orbit: DroneOrbit,
}

/// Station platform entity.
#[derive(Component, Debug, Clone)]
pub struct StationMarker {
    pub id: StationId,
}

/// Anything spawned for a flight session; removed when leaving flight.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FlightEntity;

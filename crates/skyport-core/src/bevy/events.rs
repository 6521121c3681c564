//! ECS messages for the skyport scene.
//!
//! In Bevy 0.18+ buffered events use the `Message` trait.

use bevy::prelude::*;

use crate::flight::ShipPose;
use crate::overlay::SectionChange;
use crate::station::StationId;

/// Fired once per flight frame with the ship's new pose.
#[derive(Message, Debug, Clone)]
pub struct ShipPoseUpdated {
    pub pose: ShipPose,
}

/// Fired when the open station overlay changes.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct SectionChanged {
    pub previous: Option<StationId>,
    pub current: Option<StationId>,
}

impl From<SectionChange> for SectionChanged {
    fn from(change: SectionChange) -> Self {
        Self {
            previous: change.previous,
            current: change.current,
        }
    }
}

/// Fired on each transition of the boost flame.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoostingChanged {
    pub boosting: bool,
}

/// Fired when a pilot launches from the hangar.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct PilotLaunched {
    pub pilot: String,
}

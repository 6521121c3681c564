//! ECS resources for the skyport scene.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{PilotConfig, SceneConfig};
use crate::hud::HudThrottle;
use crate::input::{FlightIntent, InputAggregator};
use crate::overlay::OverlayController;
use crate::station::{CycleDirection, Station, StationId};

/// Active scene configuration plus the derived station list.
#[derive(Resource, Debug, Clone)]
pub struct SceneSettings {
    pub config: SceneConfig,
    pub stations: Vec<Station>,
}

impl SceneSettings {
    pub fn new(config: SceneConfig) -> Self {
        let stations = config.stations();
        Self { config, stations }
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

/// Held flight input, fed by [`SceneCommand::Intent`].
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState(pub InputAggregator);

/// Station overlay state machine.
#[derive(Resource, Debug, Clone)]
pub struct Overlay(pub OverlayController);

impl Overlay {
    pub fn new(stations: Vec<Station>) -> Self {
        Self(OverlayController::new(stations))
    }
}

/// Whether flight controls currently respond to input.
///
/// Mirrors [`OverlayController::controls_enabled`] once per frame so that
/// transitions can be observed with change detection.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsEnabled(pub bool);

impl Default for ControlsEnabled {
    fn default() -> Self {
        Self(true)
    }
}

/// Pilot chosen in the hangar.
#[derive(Resource, Debug, Clone, Default)]
pub struct SelectedPilot(pub Option<PilotConfig>);

/// Throttle for HUD store updates.
#[derive(Resource, Debug, Clone, Default)]
pub struct HudPublisher {
    pub throttle: HudThrottle,
    pub last_destination: Option<StationId>,
    pub last_boosting: bool,
}

impl HudPublisher {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            throttle: HudThrottle::new(config.hud.position_threshold, config.hud.yaw_threshold),
            ..Self::default()
        }
    }
}

/// Deterministic background star positions.
#[derive(Resource, Debug, Clone, Default)]
pub struct Starfield {
    pub stars: Vec<Vec3>,
}

impl Starfield {
    /// Scatters `count` stars on a spherical shell between 60% and 100% of
    /// `radius`, upper hemisphere weighted.
    pub fn generate(seed: u64, count: u32, radius: f32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| {
                let theta = rng.random_range(0.0..std::f32::consts::TAU);
                let y: f32 = rng.random_range(-0.35..1.0);
                let ring = (1.0 - y * y).max(0.0).sqrt();
                let distance = radius * rng.random_range(0.6..1.0);
                Vec3::new(theta.cos() * ring, y, theta.sin() * ring) * distance
            })
            .collect();
        Self { stars }
    }
}

/// Errors raised while decoding host commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("invalid command JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scene is shutting down")]
    ShuttingDown,
}

/// Commands sent from the host page to the Bevy app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneCommand {
    /// One input event for the flight controls.
    Intent { intent: FlightIntent },
    /// Leave the hangar with the given pilot.
    Launch { pilot: String },
    /// Return to pilot selection, tearing down the flight scene.
    ReturnToHangar,
    /// Open a station overlay explicitly and make it the destination.
    SelectStation { id: StationId },
    /// Close the open station overlay.
    CloseStation,
    /// Move the open overlay to the neighbouring station.
    CycleStation { direction: CycleDirection },
    /// Set or clear the HUD destination.
    SetDestination { id: Option<StationId> },
}

impl SceneCommand {
    pub fn from_json(json: &str) -> Result<Self, CommandError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a bare [`FlightIntent`] and wraps it.
    pub fn intent_from_json(json: &str) -> Result<Self, CommandError> {
        let intent: FlightIntent = serde_json::from_str(json)?;
        Ok(Self::Intent { intent })
    }
}

/// Thread-safe command queue for WASM interop.
///
/// DOM handlers push; `process_commands` drains once per frame.
#[derive(Resource, Clone)]
pub struct CommandQueue {
    inner: Arc<Mutex<VecDeque<SceneCommand>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn push(&self, command: SceneCommand) {
        self.inner.lock().push_back(command);
    }

    pub fn push_intent(&self, intent: FlightIntent) {
        self.push(SceneCommand::Intent { intent });
    }

    /// Drain all pending commands in arrival order.
    pub fn drain(&self) -> Vec<SceneCommand> {
        self.inner.lock().drain(..).collect()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::LogicalKey;

    #[test]
    fn test_command_json() {
        let command = SceneCommand::from_json(r#"{"type":"select_station","id":"skills"}"#).unwrap();
        assert_eq!(
            command,
            SceneCommand::SelectStation {
                id: StationId::from("skills")
            }
        );

        let command =
            SceneCommand::intent_from_json(r#"{"type":"key","key":"forward","pressed":true}"#)
                .unwrap();
        assert_eq!(
            command,
            SceneCommand::Intent {
                intent: FlightIntent::Key {
                    key: LogicalKey::Forward,
                    pressed: true,
                }
            }
        );

        let command = SceneCommand::from_json(r#"{"type":"set_destination","id":null}"#).unwrap();
        assert_eq!(command, SceneCommand::SetDestination { id: None });

        assert!(SceneCommand::from_json(r#"{"type":"warp"}"#).is_err());
    }

    #[test]
    fn test_queue_preserves_order() {
        let queue = CommandQueue::new();
        let shared = queue.clone();
        shared.push(SceneCommand::CloseStation);
        shared.push_intent(FlightIntent::Reset);

        assert_eq!(
            queue.drain(),
            vec![
                SceneCommand::CloseStation,
                SceneCommand::Intent {
                    intent: FlightIntent::Reset
                },
            ]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_starfield_is_deterministic() {
        let a = Starfield::generate(7, 64, 400.0);
        let b = Starfield::generate(7, 64, 400.0);
        let c = Starfield::generate(8, 64, 400.0);
        assert_eq!(a.stars, b.stars);
        assert_ne!(a.stars, c.stars);
        for star in &a.stars {
            let distance = star.length();
            assert!(distance <= 400.0 + 1e-3);
            assert!(distance >= 240.0 - 1e-3);
        }
    }
}

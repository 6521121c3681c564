//! Skyport Core Library
//!
//! Kinematic flight model, follow camera, station proximity and HUD projection
//! for the skyport portfolio scene.
//!
//! The plain modules (`flight`, `camera`, `station`, `hud`, `overlay`, ...) are
//! engine-free and operate on `bevy::math` types only. The `bevy` module wires
//! them into an ECS app with a command queue in and polled state stores out.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod bounds;
pub mod camera;
pub mod config;
pub mod drone;
pub mod flight;
pub mod hud;
pub mod input;
pub mod overlay;
pub mod station;

// Bevy integration
pub mod bevy;

pub use bounds::Bounds;
pub use camera::{CameraTuning, FollowRig};
pub use config::{ConfigError, PilotConfig, SceneConfig, StationConfig, StationEntry};
pub use drone::{DroneOrbit, DronePose};
pub use flight::{FlightTuning, ShipPose, ShipState};
pub use hud::{AltitudeAdvice, Compass, CompassPoint, Guidance, HudThrottle, MapPoint};
pub use input::{ControlSignal, FlightIntent, InputAggregator, JoystickVector, LogicalKey};
pub use overlay::{OverlayController, SectionChange, StationPhase};
pub use station::{CycleDirection, ProximityRadius, Station, StationId, UnknownStation};

//! Systems for the skyport scene.
//!
//! Organized by functionality:
//! - command: Command queue processing from WASM
//! - flight: Ship integration from held input
//! - station: Proximity detection and the controls gate
//! - camera: Follow camera rig
//! - drone: Decorative drone orbits
//! - setup: Camera and flight scene spawning/cleanup
//! - state_sync: Sync ECS state to shared stores for UI
//! - rendering: Gizmo rendering (windowed only)

pub mod camera;
pub mod command;
pub mod drone;
pub mod flight;
pub mod rendering;
pub mod setup;
pub mod state_sync;
pub mod station;

pub use camera::*;
pub use command::*;
pub use drone::*;
pub use flight::*;
pub use rendering::*;
pub use setup::*;
pub use state_sync::*;
pub use station::*;

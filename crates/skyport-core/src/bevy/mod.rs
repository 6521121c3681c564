//! Bevy integration for the skyport scene.
//!
//! Wraps the engine-free flight, camera, proximity and overlay logic in ECS
//! components, resources and systems. Hosts talk to the app through a
//! [`CommandQueue`] going in and polled [`StateStores`] coming out.

pub mod components;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod state_store;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_utils;

#[cfg(target_arch = "wasm32")]
pub mod wasm_entry;

#[cfg(target_arch = "wasm32")]
pub use wasm_entry::*;

pub use components::*;
pub use events::*;
pub use plugin::{AppMode, SkyportHeadlessPlugin, SkyportPlugin};
pub use resources::*;
pub use state_store::{
    HudSnapshot, HudStore, OverlaySnapshot, OverlayStore, SceneSnapshot, SceneStore, StateStores,
    StationSummary,
};

//! Bevy plugins for the skyport scene.
//!
//! Provides:
//! - `SkyportHeadlessPlugin`: Logic-only plugin (no rendering/window dependencies) for headless testing
//! - `SkyportPlugin`: Full plugin including `SkyportHeadlessPlugin` + camera and gizmo rendering

use bevy::prelude::*;

use crate::bevy::events::*;
use crate::bevy::resources::*;
use crate::bevy::state_store::StateStores;
use crate::bevy::systems;
use crate::config::SceneConfig;

/// Application mode.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppMode {
    /// Pilot selection; no ship in the world.
    #[default]
    Hangar,
    Flight,
}

// ============================================================================
// Headless Plugin (logic only, no rendering/window dependencies)
// ============================================================================

/// Headless plugin containing all scene logic without rendering or window dependencies.
///
/// Use this plugin in tests with `MinimalPlugins` to run ECS systems
/// without requiring a windowing or rendering backend.
pub struct SkyportHeadlessPlugin {
    pub config: SceneConfig,
    pub command_queue: Option<CommandQueue>,
    pub state_stores: Option<StateStores>,
}

impl Default for SkyportHeadlessPlugin {
    fn default() -> Self {
        Self {
            config: SceneConfig::default(),
            command_queue: None,
            state_stores: None,
        }
    }
}

impl Plugin for SkyportHeadlessPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // States
        // ====================================================================
        app.init_state::<AppMode>();

        // ====================================================================
        // Resources
        // ====================================================================
        let settings = SceneSettings::new(self.config.clone());
        app.insert_resource(Overlay::new(settings.stations.clone()))
            .insert_resource(HudPublisher::new(&self.config))
            .insert_resource(settings)
            .insert_resource(InputState::default())
            .insert_resource(ControlsEnabled::default())
            .insert_resource(SelectedPilot::default())
            .insert_resource(self.command_queue.clone().unwrap_or_default())
            .insert_resource(self.state_stores.clone().unwrap_or_default());

        // ====================================================================
        // Messages
        // ====================================================================
        app.add_message::<ShipPoseUpdated>()
            .add_message::<SectionChanged>()
            .add_message::<BoostingChanged>()
            .add_message::<PilotLaunched>();

        // ====================================================================
        // Startup
        // ====================================================================
        app.add_systems(Startup, systems::spawn_main_camera);

        // ====================================================================
        // Command processing (always active)
        // ====================================================================
        app.add_systems(Update, systems::process_commands);

        // WASM exit system
        #[cfg(target_arch = "wasm32")]
        app.add_systems(Update, crate::bevy::wasm_entry::check_exit_system);

        // ====================================================================
        // Flight tick (Flight only): one ordered chain per frame
        // ====================================================================
        app.add_systems(
            Update,
            (
                systems::integrate_ship,
                systems::detect_proximity,
                systems::sync_controls_enabled,
                systems::follow_ship,
                systems::animate_drones,
            )
                .chain()
                .after(systems::process_commands)
                .run_if(in_state(AppMode::Flight)),
        );

        // ====================================================================
        // State sync (PostUpdate)
        // ====================================================================
        app.add_systems(
            PostUpdate,
            (systems::sync_overlay_to_stores, systems::sync_scene_to_stores),
        );
        app.add_systems(
            PostUpdate,
            systems::sync_hud_to_stores.run_if(in_state(AppMode::Flight)),
        );

        // ====================================================================
        // Transitions
        // ====================================================================
        app.add_systems(OnEnter(AppMode::Flight), systems::spawn_flight_scene);
        app.add_systems(OnExit(AppMode::Flight), systems::cleanup_flight_scene);
    }
}

// ============================================================================
// Windowed Plugin (headless + rendering)
// ============================================================================

/// Full scene plugin.
///
/// Includes `SkyportHeadlessPlugin` for all logic, plus systems that need
/// `Gizmos` and `Camera3d`.
pub struct SkyportPlugin {
    pub config: SceneConfig,
    pub command_queue: Option<CommandQueue>,
    pub state_stores: Option<StateStores>,
}

impl SkyportPlugin {
    pub fn new(config: SceneConfig, command_queue: CommandQueue, state_stores: StateStores) -> Self {
        Self {
            config,
            command_queue: Some(command_queue),
            state_stores: Some(state_stores),
        }
    }
}

impl Plugin for SkyportPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SkyportHeadlessPlugin {
            config: self.config.clone(),
            command_queue: self.command_queue.clone(),
            state_stores: self.state_stores.clone(),
        });

        let scenery = &self.config.scenery;
        app.insert_resource(Starfield::generate(
            scenery.starfield_seed,
            scenery.star_count,
            scenery.starfield_radius,
        ))
        .insert_resource(systems::SceneGizmoConfig::default())
        .insert_resource(ClearColor(Color::srgb(0.01, 0.015, 0.04)));

        app.add_systems(Update, systems::attach_camera3d);
        app.add_systems(
            Update,
            (systems::render_starfield, systems::render_boundary),
        );
        app.add_systems(
            Update,
            (
                systems::render_stations,
                systems::render_ship,
                systems::render_drones,
            )
                .after(systems::animate_drones)
                .run_if(in_state(AppMode::Flight)),
        );
    }
}

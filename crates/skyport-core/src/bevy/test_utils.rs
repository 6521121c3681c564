//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `SkyportHeadlessPlugin` for testing scene logic
//! without a rendering or windowing backend.

use bevy::prelude::*;

use crate::bevy::plugin::{AppMode, SkyportHeadlessPlugin};
use crate::bevy::resources::{CommandQueue, InputState, Overlay, SceneCommand};
use crate::bevy::state_store::StateStores;
use crate::bevy::{
    BoostingChanged, ControlsEnabled, FollowCamera, SectionChanged, Ship, ShipPoseUpdated,
};
use crate::camera::FollowRig;
use crate::config::SceneConfig;
use crate::flight::ShipState;
use crate::input::{FlightIntent, LogicalKey};
use crate::overlay::OverlayController;

/// Messages of type `M` seen so far, collected at the end of every frame.
#[derive(Resource)]
struct Recorded<M: Message>(Vec<M>);

impl<M: Message> Default for Recorded<M> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn record_messages<M: Message + Clone>(
    mut reader: MessageReader<M>,
    mut recorded: ResMut<Recorded<M>>,
) {
    recorded.0.extend(reader.read().cloned());
}

/// A headless Bevy app wrapper for testing.
pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::state::app::StatesPlugin);
        app.add_plugins(SkyportHeadlessPlugin {
            config,
            command_queue: None,
            state_stores: None,
        });
        app.init_resource::<Recorded<SectionChanged>>()
            .init_resource::<Recorded<BoostingChanged>>()
            .init_resource::<Recorded<ShipPoseUpdated>>()
            .add_systems(
                Last,
                (
                    record_messages::<SectionChanged>,
                    record_messages::<BoostingChanged>,
                    record_messages::<ShipPoseUpdated>,
                ),
            );
        // Run one update to initialize all resources and state
        app.update();
        Self { app }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    pub fn run_frames(&mut self, n: usize) {
        for _ in 0..n {
            self.app.update();
        }
    }

    pub fn push_command(&mut self, command: SceneCommand) {
        self.app.world().resource::<CommandQueue>().push(command);
    }

    pub fn push_key(&mut self, key: LogicalKey, pressed: bool) {
        self.push_command(SceneCommand::Intent {
            intent: FlightIntent::Key { key, pressed },
        });
    }

    /// Sends a command and runs one frame.
    pub fn send(&mut self, command: SceneCommand) {
        self.push_command(command);
        self.update();
    }

    /// Launch with a pilot and run updates until the flight scene exists.
    pub fn launch(&mut self, pilot: &str) {
        self.push_command(SceneCommand::Launch {
            pilot: pilot.to_string(),
        });
        self.update();
        // Extra update to process OnEnter systems
        self.update();
    }

    pub fn mode(&self) -> AppMode {
        *self.app.world().resource::<State<AppMode>>().get()
    }

    pub fn ship(&mut self) -> Option<ShipState> {
        let world = self.app.world_mut();
        let mut query = world.query::<&Ship>();
        query.iter(world).next().map(|ship| ship.state)
    }

    /// Moves the ship to `position` at rest.
    pub fn teleport(&mut self, position: Vec3) {
        let world = self.app.world_mut();
        let mut query = world.query::<&mut Ship>();
        for mut ship in query.iter_mut(world) {
            ship.state.position = position;
            ship.state.velocity = Vec3::ZERO;
        }
    }

    pub fn camera_rig(&mut self) -> Option<FollowRig> {
        let world = self.app.world_mut();
        let mut query = world.query::<&FollowCamera>();
        query.iter(world).next().map(|camera| camera.rig)
    }

    pub fn count<C: Component>(&mut self) -> usize {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<Entity, With<C>>();
        query.iter(world).count()
    }

    pub fn overlay(&self) -> &OverlayController {
        &self.app.world().resource::<Overlay>().0
    }

    pub fn controls_enabled(&self) -> bool {
        self.app.world().resource::<ControlsEnabled>().0
    }

    pub fn input(&self) -> &InputState {
        self.app.world().resource::<InputState>()
    }

    /// Takes every recorded `M` message since the last call.
    pub fn take_messages<M: Message>(&mut self) -> Vec<M> {
        std::mem::take(&mut self.app.world_mut().resource_mut::<Recorded<M>>().0)
    }

    pub fn stores(&self) -> StateStores {
        self.app.world().resource::<StateStores>().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bevy::{Drone, MainCamera, StationMarker};
    use crate::flight::START_POSITION;
    use crate::hud::CompassPoint;
    use crate::input::KeyState;
    use crate::overlay::StationPhase;
    use crate::station::{CycleDirection, StationId};

    fn id(s: &str) -> StationId {
        StationId::from(s)
    }

    #[test]
    fn test_starts_in_hangar() {
        let mut app = TestApp::new();
        assert_eq!(app.mode(), AppMode::Hangar);
        assert!(app.ship().is_none());
        assert_eq!(app.count::<MainCamera>(), 1);

        let scene = app.stores().scene.get_snapshot();
        assert!(!scene.in_flight);
        assert_eq!(scene.pilots.len(), 3);
    }

    #[test]
    fn test_launch_spawns_flight_scene() {
        let mut app = TestApp::new();
        app.launch("nova");

        assert_eq!(app.mode(), AppMode::Flight);
        let ship = app.ship().unwrap();
        assert_eq!(ship.position, START_POSITION);
        assert_eq!(app.count::<Drone>(), 4);
        assert_eq!(app.count::<StationMarker>(), 5);

        let scene = app.stores().scene.get_snapshot();
        assert!(scene.in_flight);
        assert_eq!(scene.pilot.map(|p| p.name), Some("Teja Explorer".to_string()));
    }

    #[test]
    fn test_unknown_pilot_stays_in_hangar() {
        let mut app = TestApp::new();
        app.launch("zed");
        assert_eq!(app.mode(), AppMode::Hangar);
        assert!(app.ship().is_none());
    }

    #[test]
    fn test_forward_key_flies_and_publishes_hud() {
        let mut app = TestApp::new();
        app.launch("orion");

        app.push_key(LogicalKey::Forward, true);
        app.run_frames(10);
        let ship = app.ship().unwrap();
        assert!(ship.position.z < START_POSITION.z);
        assert!(ship.velocity.z < 0.0);

        let hud = app.stores().hud.get_snapshot().unwrap();
        assert_eq!(hud.compass.heading, CompassPoint::S);
        assert!(hud.boosting);
        assert!(hud.position[2] < START_POSITION.z);

        app.push_key(LogicalKey::Forward, false);
        app.run_frames(400);
        assert_eq!(app.ship().unwrap().velocity, Vec3::ZERO);
        assert!(!app.stores().hud.get_snapshot().unwrap().boosting);
    }

    #[test]
    fn test_intents_ignored_in_hangar() {
        let mut app = TestApp::new();
        app.push_key(LogicalKey::Forward, true);
        app.update();
        assert_eq!(app.input().0.keys(), KeyState::default());
    }

    #[test]
    fn test_station_proximity_opens_freezes_and_dismisses() {
        let mut app = TestApp::new();
        app.launch("sol");

        let inside = Vec3::new(0.0, 2.0, -5.0);
        app.teleport(inside);
        app.update();
        assert_eq!(app.overlay().active(), Some(&id("about")));
        assert!(!app.controls_enabled());

        // Controls are frozen while the overlay is open.
        app.push_key(LogicalKey::Forward, true);
        app.run_frames(5);
        assert_eq!(app.ship().unwrap().position, inside);

        app.send(SceneCommand::CloseStation);
        assert_eq!(app.overlay().active(), None);
        assert!(app.controls_enabled());
        assert_eq!(app.overlay().phase(&id("about")), Some(StationPhase::Dismissed));

        // Still inside: stays dismissed.
        app.run_frames(5);
        assert_eq!(app.overlay().active(), None);
        assert_eq!(app.overlay().phase(&id("about")), Some(StationPhase::Dismissed));

        // Leaving re-arms it.
        app.teleport(Vec3::new(0.0, 2.0, -40.0));
        app.update();
        assert_eq!(app.overlay().phase(&id("about")), Some(StationPhase::Armed));

        let overlay = app.stores().overlay.get_snapshot();
        assert!(overlay.dismissed.is_empty());
        assert!(overlay.controls_enabled);
    }

    #[test]
    fn test_section_changed_fires_only_on_active_change() {
        let mut app = TestApp::new();
        app.launch("sol");
        app.take_messages::<SectionChanged>();

        let entered = SectionChanged {
            previous: None,
            current: Some(id("about")),
        };
        let inside = Vec3::new(0.0, 2.0, -5.0);
        app.teleport(inside);
        app.update();
        assert_eq!(app.take_messages::<SectionChanged>(), vec![entered.clone()]);

        // Holding position inside keeps the same station open.
        app.run_frames(5);
        assert!(app.take_messages::<SectionChanged>().is_empty());

        app.send(SceneCommand::CloseStation);
        assert_eq!(
            app.take_messages::<SectionChanged>(),
            vec![SectionChanged {
                previous: Some(id("about")),
                current: None,
            }]
        );

        // Dismissed: lingering inside fires nothing, and a second close is a no-op.
        app.run_frames(5);
        app.send(SceneCommand::CloseStation);
        assert!(app.take_messages::<SectionChanged>().is_empty());

        // Leaving only re-arms.
        app.teleport(Vec3::new(0.0, 2.0, -40.0));
        app.run_frames(2);
        assert!(app.take_messages::<SectionChanged>().is_empty());

        app.teleport(inside);
        app.update();
        assert_eq!(app.take_messages::<SectionChanged>(), vec![entered]);
    }

    #[test]
    fn test_pose_every_frame_and_boost_per_transition() {
        let mut app = TestApp::new();
        app.launch("orion");
        app.take_messages::<ShipPoseUpdated>();
        app.take_messages::<BoostingChanged>();

        app.run_frames(3);
        assert_eq!(app.take_messages::<ShipPoseUpdated>().len(), 3);
        assert!(app.take_messages::<BoostingChanged>().is_empty());

        app.push_key(LogicalKey::Forward, true);
        app.run_frames(5);
        assert_eq!(
            app.take_messages::<BoostingChanged>(),
            vec![BoostingChanged { boosting: true }]
        );

        app.push_key(LogicalKey::Forward, false);
        app.run_frames(5);
        assert_eq!(
            app.take_messages::<BoostingChanged>(),
            vec![BoostingChanged { boosting: false }]
        );

        app.push_key(LogicalKey::Forward, true);
        app.update();
        app.push_key(LogicalKey::Forward, false);
        app.update();
        assert_eq!(
            app.take_messages::<BoostingChanged>(),
            vec![
                BoostingChanged { boosting: true },
                BoostingChanged { boosting: false },
            ]
        );
        assert_eq!(app.take_messages::<ShipPoseUpdated>().len(), 12);
    }

    #[test]
    fn test_opening_overlay_resets_held_input() {
        let mut app = TestApp::new();
        app.launch("nova");

        app.push_key(LogicalKey::StrafeLeft, true);
        app.update();
        assert!(app.input().0.keys().strafe_left);

        app.send(SceneCommand::SelectStation { id: id("projects") });
        assert_eq!(app.input().0.keys(), KeyState::default());
        assert!(!app.controls_enabled());
    }

    #[test]
    fn test_select_station_sets_destination_and_guidance() {
        let mut app = TestApp::new();
        app.launch("nova");

        app.send(SceneCommand::SelectStation { id: id("skills") });
        assert_eq!(app.overlay().active(), Some(&id("skills")));
        assert_eq!(app.overlay().destination(), Some(&id("skills")));

        let overlay = app.stores().overlay.get_snapshot();
        assert_eq!(overlay.active, Some(id("skills")));
        assert!(!overlay.controls_enabled);

        let hud = app.stores().hud.get_snapshot().unwrap();
        assert_eq!(hud.destination, Some(id("skills")));
        let text = hud.guidance_text.unwrap();
        assert!(text.starts_with("GPS: Head"), "unexpected guidance: {text}");
        assert_eq!(hud.altitude_text.as_deref(), Some("Hold level"));

        app.send(SceneCommand::SelectStation { id: id("pluto") });
        assert_eq!(app.overlay().active(), Some(&id("skills")));
    }

    #[test]
    fn test_cycle_station_wraps() {
        let mut app = TestApp::new();
        app.launch("nova");

        app.send(SceneCommand::SelectStation { id: id("contact") });
        app.send(SceneCommand::CycleStation {
            direction: CycleDirection::Next,
        });
        assert_eq!(app.overlay().active(), Some(&id("about")));

        app.send(SceneCommand::CycleStation {
            direction: CycleDirection::Previous,
        });
        assert_eq!(app.overlay().active(), Some(&id("contact")));
    }

    #[test]
    fn test_camera_trails_ship() {
        let mut app = TestApp::new();
        app.launch("nova");
        app.push_key(LogicalKey::Forward, true);
        app.run_frames(30);

        let ship = app.ship().unwrap().pose();
        let rig = app.camera_rig().unwrap();
        let tuning = crate::camera::CameraTuning::default();
        assert!((rig.look_target - tuning.look_target(&ship)).length() < 1e-3);
        // Camera lags behind the ship rather than sitting on it.
        assert!(rig.position.z > ship.position.z);
    }

    #[test]
    fn test_return_to_hangar_cleans_up() {
        let mut app = TestApp::new();
        app.launch("nova");
        app.send(SceneCommand::SelectStation { id: id("about") });

        app.send(SceneCommand::ReturnToHangar);
        app.update();

        assert_eq!(app.mode(), AppMode::Hangar);
        assert!(app.ship().is_none());
        assert_eq!(app.count::<Drone>(), 0);
        assert_eq!(app.count::<MainCamera>(), 1);
        assert_eq!(app.overlay().active(), None);

        let stores = app.stores();
        assert!(stores.hud.get_snapshot().is_none());
        assert!(!stores.scene.get_snapshot().in_flight);
        assert!(stores.scene.get_snapshot().pilot.is_none());
    }
}

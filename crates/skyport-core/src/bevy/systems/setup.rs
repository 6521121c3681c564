//! Scene setup and teardown.

use bevy::prelude::*;

use crate::bevy::{
    ControlsEnabled, Drone, FlightEntity, FollowCamera, HudPublisher, InputState, MainCamera,
    Overlay, SceneSettings, SelectedPilot, Ship, StateStores, StationMarker,
};
use crate::camera::FollowRig;
use crate::drone::DroneOrbit;
use crate::flight::ShipState;

/// Spawns the main camera once at startup.
///
/// The camera outlives flight sessions; entering flight only resets its rig.
pub fn spawn_main_camera(mut commands: Commands, settings: Res<SceneSettings>) {
    let rig = FollowRig::new(&settings.config.camera);
    commands.spawn((
        MainCamera,
        FollowCamera { rig },
        Transform::from_translation(rig.position).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    tracing::info!("[skyport] main camera spawned");
}

/// Builds the flight scene: ship at the start pose, drones and station markers.
pub fn spawn_flight_scene(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    mut input: ResMut<InputState>,
    mut overlay: ResMut<Overlay>,
    mut controls: ResMut<ControlsEnabled>,
    mut publisher: ResMut<HudPublisher>,
    mut cameras: Query<(&mut FollowCamera, &mut Transform)>,
) {
    let config = &settings.config;
    let start = ShipState::at(config.start());

    input.0.reset();
    *overlay = Overlay::new(settings.stations.clone());
    controls.0 = true;
    publisher.throttle.invalidate();

    commands.spawn((
        Ship::new(start),
        Transform::from_translation(start.position).with_rotation(start.pose().rotation()),
        FlightEntity,
    ));

    for index in 0..config.scenery.drone_count {
        let orbit = DroneOrbit::for_index(index);
        let pose = orbit.pose_at(0.0, start.position);
        commands.spawn((
            Drone { index, orbit },
            Transform::from_translation(pose.position).with_rotation(pose.rotation()),
            FlightEntity,
        ));
    }

    for station in &settings.stations {
        commands.spawn((
            StationMarker {
                id: station.id.clone(),
            },
            Transform::from_translation(station.position),
            FlightEntity,
        ));
    }

    for (mut camera, mut transform) in &mut cameras {
        camera.rig = FollowRig::new(&config.camera);
        *transform = Transform::from_translation(camera.rig.position)
            .looking_at(start.position, Vec3::Y);
    }

    tracing::info!(
        "[skyport] flight scene spawned: {} stations, {} drones",
        settings.stations.len(),
        config.scenery.drone_count
    );
}

/// Tears down the flight scene when returning to the hangar.
///
/// Camera entities are kept (see [`spawn_main_camera`]).
pub fn cleanup_flight_scene(
    mut commands: Commands,
    entities: Query<Entity, With<FlightEntity>>,
    settings: Res<SceneSettings>,
    mut input: ResMut<InputState>,
    mut overlay: ResMut<Overlay>,
    mut pilot: ResMut<SelectedPilot>,
    state_stores: Res<StateStores>,
) {
    tracing::info!("[skyport] cleanup_flight_scene");

    for entity in entities.iter() {
        commands.entity(entity).despawn();
    }

    input.0.reset();
    *overlay = Overlay::new(settings.stations.clone());
    pilot.0 = None;
    state_stores.hud.clear();
}

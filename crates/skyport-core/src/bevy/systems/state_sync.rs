//! State synchronization systems.
//!
//! Syncs Bevy ECS state to `StateStores` for Yew UI access.

use bevy::prelude::*;

use crate::bevy::{
    AppMode, HudPublisher, HudSnapshot, Overlay, OverlaySnapshot, SceneSettings, SceneSnapshot,
    SelectedPilot, Ship, StateStores,
};
use crate::hud;

/// Publishes ship telemetry, throttled to meaningful movement.
///
/// A changed destination or boost state always publishes.
pub fn sync_hud_to_stores(
    settings: Res<SceneSettings>,
    overlay: Res<Overlay>,
    mut publisher: ResMut<HudPublisher>,
    ships: Query<&Ship>,
    state_stores: Res<StateStores>,
) {
    let Ok(ship) = ships.single() else {
        return;
    };
    let state = &ship.state;
    let destination = overlay.0.destination().cloned();

    let moved = publisher.throttle.should_publish(state.position, state.yaw);
    let destination_changed = publisher.last_destination != destination;
    let boost_changed = publisher.last_boosting != ship.boosting;
    if !moved && !destination_changed && !boost_changed {
        return;
    }
    publisher.last_destination.clone_from(&destination);
    publisher.last_boosting = ship.boosting;

    let radius = settings.config.bounds.radius;
    let guidance = destination
        .as_ref()
        .and_then(|id| settings.stations.iter().find(|s| &s.id == id))
        .map(|station| hud::guidance(state.position, station.position));

    state_stores.hud.update(HudSnapshot {
        position: state.position.to_array(),
        yaw: state.yaw,
        pitch: state.pitch,
        speed: state.velocity.length(),
        map: hud::to_map_coords(state.position.x, state.position.z, radius),
        compass: hud::compass(state.yaw),
        boosting: ship.boosting,
        destination,
        guidance_text: guidance.map(|g| g.instruction()),
        altitude_text: guidance.map(|g| g.altitude.to_string()),
        guidance,
    });
}

/// Publishes the overlay state. The store ignores unchanged snapshots.
pub fn sync_overlay_to_stores(overlay: Res<Overlay>, state_stores: Res<StateStores>) {
    let controller = &overlay.0;
    state_stores.overlay.update(OverlaySnapshot {
        active: controller.active().cloned(),
        destination: controller.destination().cloned(),
        dismissed: controller.dismissed().cloned().collect(),
        controls_enabled: controller.controls_enabled(),
    });
}

/// Publishes mode, pilot and station catalogue when any of them change.
pub fn sync_scene_to_stores(
    settings: Res<SceneSettings>,
    mode: Res<State<AppMode>>,
    pilot: Res<SelectedPilot>,
    state_stores: Res<StateStores>,
) {
    if !(settings.is_changed() || mode.is_changed() || pilot.is_changed()) {
        return;
    }
    let mut snapshot = SceneSnapshot::from_config(&settings.config);
    snapshot.in_flight = *mode.get() == AppMode::Flight;
    snapshot.pilot.clone_from(&pilot.0);
    state_stores.scene.update(snapshot);
}

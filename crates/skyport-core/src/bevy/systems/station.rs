//! Station proximity and the controls gate.

use bevy::prelude::*;

use crate::bevy::{ControlsEnabled, InputState, Overlay, SceneSettings, SectionChanged, Ship};
use crate::station;

/// Feeds the nearest station to the overlay controller.
///
/// Skipped while an overlay is open: the ship is frozen and the open
/// station must not be cleared by a proximity reading.
pub fn detect_proximity(
    settings: Res<SceneSettings>,
    mut overlay: ResMut<Overlay>,
    ships: Query<&Ship>,
    mut section_events: MessageWriter<SectionChanged>,
) {
    if !overlay.0.controls_enabled() {
        return;
    }
    let Ok(ship) = ships.single() else {
        return;
    };

    let nearby = station::find_nearby(
        ship.state.position,
        &settings.stations,
        &settings.config.proximity,
    )
    .map(|s| s.id.clone());

    if let Some(change) = overlay.0.on_proximity(nearby.as_ref()) {
        tracing::info!(
            "[skyport] station in range: {:?} -> {:?}",
            change.previous,
            change.current
        );
        section_events.write(change.into());
    }
}

/// Mirrors the overlay's controls gate into [`ControlsEnabled`].
///
/// Disabling controls returns every held input to neutral.
pub fn sync_controls_enabled(
    overlay: Res<Overlay>,
    mut controls: ResMut<ControlsEnabled>,
    mut input: ResMut<InputState>,
) {
    let enabled = overlay.0.controls_enabled();
    if controls.0 == enabled {
        return;
    }
    controls.0 = enabled;
    if !enabled {
        input.0.reset();
    }
    tracing::info!("[skyport] controls enabled: {}", enabled);
}

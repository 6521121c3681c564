//! Ship integration system.

use bevy::prelude::*;

use crate::bevy::{BoostingChanged, InputState, Overlay, SceneSettings, Ship, ShipPoseUpdated};
use crate::flight;

/// Advances the ship one frame from the held input.
///
/// Mouse deltas are consumed even while controls are disabled so that
/// nothing accumulated behind an open overlay is replayed later.
pub fn integrate_ship(
    settings: Res<SceneSettings>,
    overlay: Res<Overlay>,
    mut input: ResMut<InputState>,
    mut ships: Query<(&mut Ship, &mut Transform)>,
    mut pose_events: MessageWriter<ShipPoseUpdated>,
    mut boost_events: MessageWriter<BoostingChanged>,
) {
    let Ok((mut ship, mut transform)) = ships.single_mut() else {
        return;
    };

    let config = &settings.config;
    let controls_enabled = overlay.0.controls_enabled();
    let signal = input.0.signal(&config.flight);
    let pose = flight::step(
        &mut ship.state,
        &signal,
        &config.bounds,
        &config.flight,
        controls_enabled,
    );

    transform.translation = pose.position;
    transform.rotation = pose.rotation();
    pose_events.write(ShipPoseUpdated { pose });

    if let Some(boosting) = input.0.update_boosting(controls_enabled && signal.boosting) {
        ship.boosting = boosting;
        boost_events.write(BoostingChanged { boosting });
    }
}

//! Follow camera system.

use bevy::prelude::*;

use crate::bevy::{FollowCamera, SceneSettings, Ship};

/// Moves every follow rig one frame toward the ship and aims it.
pub fn follow_ship(
    settings: Res<SceneSettings>,
    ships: Query<&Ship>,
    mut cameras: Query<(&mut FollowCamera, &mut Transform), Without<Ship>>,
) {
    let Ok(ship) = ships.single() else {
        return;
    };
    let pose = ship.state.pose();

    for (mut camera, mut transform) in &mut cameras {
        camera.rig.follow(&pose, &settings.config.camera);
        transform.translation = camera.rig.position;
        transform.look_at(camera.rig.look_target, Vec3::Y);
    }
}

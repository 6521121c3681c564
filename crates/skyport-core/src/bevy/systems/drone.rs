//! Drone animation system.

use bevy::prelude::*;

use crate::bevy::{Drone, Ship};

pub fn animate_drones(
    time: Res<Time>,
    ships: Query<&Ship>,
    mut drones: Query<(&Drone, &mut Transform), Without<Ship>>,
) {
    let ship_position = ships
        .single()
        .map(|ship| ship.state.position)
        .unwrap_or(Vec3::ZERO);
    let t = time.elapsed_secs();

    for (drone, mut transform) in &mut drones {
        let pose = drone.orbit.pose_at(t, ship_position);
        transform.translation = pose.position;
        transform.rotation = pose.rotation();
    }
}

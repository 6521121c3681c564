//! Rendering systems for the skyport scene.
//!
//! Everything is drawn with Bevy's Gizmos API: boundary rings, station
//! platforms, a wireframe ship, drones and a seeded starfield.

use std::f32::consts::FRAC_PI_2;

use bevy::math::Isometry3d;
use bevy::prelude::*;

use crate::bevy::{
    ControlsEnabled, Drone, MainCamera, Overlay, SceneSettings, SelectedPilot, Ship, Starfield,
    StationMarker,
};
use crate::config::PilotConfig;

/// Gizmo colours and sizes.
#[derive(Resource)]
pub struct SceneGizmoConfig {
    pub boundary_color: Color,
    pub station_color: Color,
    pub active_station_color: Color,
    pub destination_color: Color,
    pub drone_color: Color,
    pub flame_color: Color,
    pub star_color: Color,
    pub star_size: f32,
}

impl Default for SceneGizmoConfig {
    fn default() -> Self {
        Self {
            boundary_color: Color::srgba(0.4, 0.6, 1.0, 0.35),
            station_color: Color::srgb(0.55, 0.75, 0.95),
            active_station_color: Color::srgb(0.4, 1.0, 0.7),
            destination_color: Color::srgb(1.0, 0.8, 0.3),
            drone_color: Color::srgb(0.85, 0.85, 0.9),
            flame_color: Color::srgb(1.0, 0.55, 0.15),
            star_color: Color::srgba(0.9, 0.92, 1.0, 0.8),
            star_size: 0.6,
        }
    }
}

/// Flat circle in the XZ plane.
fn horizontal(center: Vec3) -> Isometry3d {
    Isometry3d::new(center, Quat::from_rotation_x(FRAC_PI_2))
}

/// Attaches a 3D camera to the main camera entity once it exists.
pub fn attach_camera3d(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    cameras: Query<Entity, Added<MainCamera>>,
) {
    for entity in &cameras {
        commands.entity(entity).insert((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: settings.config.camera.fov_degrees.to_radians(),
                ..default()
            }),
        ));
        tracing::info!("[skyport] Camera3d attached");
    }
}

/// Boundary rings at the floor and ceiling of the envelope.
pub fn render_boundary(
    mut gizmos: Gizmos,
    settings: Res<SceneSettings>,
    config: Res<SceneGizmoConfig>,
) {
    let bounds = &settings.config.bounds;
    for y in [bounds.min_y, bounds.max_y] {
        gizmos
            .circle(horizontal(Vec3::new(0.0, y, 0.0)), bounds.radius, config.boundary_color)
            .resolution(96);
    }
}

/// Station platforms; the open station and the destination are highlighted.
pub fn render_stations(
    mut gizmos: Gizmos,
    settings: Res<SceneSettings>,
    overlay: Res<Overlay>,
    config: Res<SceneGizmoConfig>,
    stations: Query<(&StationMarker, &Transform)>,
) {
    let radius = settings.config.proximity.horizontal;
    for (marker, transform) in &stations {
        let center = transform.translation;
        let color = if overlay.0.active() == Some(&marker.id) {
            config.active_station_color
        } else {
            config.station_color
        };
        gizmos.circle(horizontal(center), 4.0, color);
        gizmos.circle(horizontal(center), radius, color.with_alpha(0.25));
        if overlay.0.destination() == Some(&marker.id) {
            gizmos.line(center, center + Vec3::Y * 14.0, config.destination_color);
        }
    }
}

/// Wireframe ship tinted with the pilot's accent colour, plus boost flame.
pub fn render_ship(
    mut gizmos: Gizmos,
    pilot: Res<SelectedPilot>,
    controls: Res<ControlsEnabled>,
    config: Res<SceneGizmoConfig>,
    ships: Query<(&Ship, &Transform)>,
) {
    let [r, g, b] = pilot
        .0
        .as_ref()
        .map_or([1.0, 1.0, 1.0], PilotConfig::accent_rgb);
    let hull = if controls.0 {
        Color::srgb(r, g, b)
    } else {
        Color::srgba(r, g, b, 0.5)
    };

    for (ship, transform) in &ships {
        let point = |local: Vec3| transform.transform_point(local);
        let nose = point(Vec3::new(0.0, 0.0, -2.2));
        let left = point(Vec3::new(-1.4, 0.0, 1.0));
        let right = point(Vec3::new(1.4, 0.0, 1.0));
        let fin = point(Vec3::new(0.0, 0.6, 1.0));
        let tail = point(Vec3::new(0.0, 0.0, 1.0));

        gizmos.linestrip([nose, left, right, nose], hull);
        gizmos.linestrip([nose, fin, tail], hull);
        gizmos.line(left, fin, hull);
        gizmos.line(right, fin, hull);

        if ship.boosting {
            let flame = point(Vec3::new(0.0, 0.0, 2.6));
            gizmos.line(tail, flame, config.flame_color);
        }
    }
}

pub fn render_drones(
    mut gizmos: Gizmos,
    config: Res<SceneGizmoConfig>,
    drones: Query<&Transform, With<Drone>>,
) {
    for transform in &drones {
        let center = transform.translation;
        gizmos.sphere(Isometry3d::new(center, transform.rotation), 0.8, config.drone_color);
        let eye = transform.transform_point(Vec3::new(0.0, 0.0, -0.9));
        gizmos.line(center, eye, config.flame_color);
    }
}

pub fn render_starfield(mut gizmos: Gizmos, starfield: Res<Starfield>, config: Res<SceneGizmoConfig>) {
    let half = config.star_size;
    for star in &starfield.stars {
        gizmos.line(*star - Vec3::X * half, *star + Vec3::X * half, config.star_color);
        gizmos.line(*star - Vec3::Y * half, *star + Vec3::Y * half, config.star_color);
    }
}

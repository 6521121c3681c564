//! Shared state stores for Bevy-Yew communication.
//!
//! Each store holds one slice of scene state behind a `RwLock` with a
//! version counter. UI hooks poll the version and only copy the snapshot
//! out when it moved.

use std::sync::Arc;

use bevy::prelude::Resource;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::{PilotConfig, SceneConfig, StationEntry};
use crate::hud::{Compass, Guidance, MapPoint};
use crate::station::StationId;

// ============================================================================
// Data Types
// ============================================================================

/// Ship telemetry for the HUD and minimap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub map: MapPoint,
    pub compass: Compass,
    pub boosting: bool,
    pub destination: Option<StationId>,
    pub guidance: Option<Guidance>,
    /// Rendered guidance line, e.g. `"GPS: Head NE for 42m"`.
    pub guidance_text: Option<String>,
    /// Rendered altitude hint, e.g. `"Climb 3m"`.
    pub altitude_text: Option<String>,
}

/// Station overlay state for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlaySnapshot {
    pub active: Option<StationId>,
    pub destination: Option<StationId>,
    pub dismissed: Vec<StationId>,
    pub controls_enabled: bool,
}

impl Default for OverlaySnapshot {
    fn default() -> Self {
        Self {
            active: None,
            destination: None,
            dismissed: Vec::new(),
            controls_enabled: true,
        }
    }
}

/// Static per-station data the UI needs for the minimap and overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSummary {
    pub id: StationId,
    pub title: String,
    pub subtitle: String,
    pub status: String,
    pub map: MapPoint,
    pub entries: Vec<StationEntry>,
}

/// Scene-level state: mode, pilot and station catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub in_flight: bool,
    pub pilot: Option<PilotConfig>,
    pub pilots: Vec<PilotConfig>,
    pub stations: Vec<StationSummary>,
    pub bounds_radius: f32,
    pub hud_poll_interval_ms: u32,
}

impl SceneSnapshot {
    pub fn from_config(config: &SceneConfig) -> Self {
        let radius = config.bounds.radius;
        let stations = config
            .stations
            .iter()
            .map(|station| StationSummary {
                id: station.id.clone(),
                title: station.title.clone(),
                subtitle: station.subtitle.clone(),
                status: station.status.clone(),
                map: crate::hud::to_map_coords(station.position[0], station.position[2], radius),
                entries: station.entries.clone(),
            })
            .collect();
        Self {
            in_flight: false,
            pilot: None,
            pilots: config.pilots.clone(),
            stations,
            bounds_radius: radius,
            hud_poll_interval_ms: config.hud.poll_interval_ms,
        }
    }
}

impl Default for SceneSnapshot {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

// ============================================================================
// Individual Stores
// ============================================================================

/// Store for ship telemetry. Empty until the first flight frame.
#[derive(Debug, Default)]
pub struct HudStore {
    snapshot: RwLock<Option<HudSnapshot>>,
    version: RwLock<u64>,
}

impl HudStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_snapshot(&self) -> Option<HudSnapshot> {
        self.snapshot.read().clone()
    }

    pub fn get_version(&self) -> u64 {
        *self.version.read()
    }

    pub fn update(&self, snapshot: HudSnapshot) {
        *self.snapshot.write() = Some(snapshot);
        *self.version.write() += 1;
    }

    pub fn clear(&self) {
        *self.snapshot.write() = None;
        *self.version.write() += 1;
    }
}

/// Store for overlay state.
#[derive(Debug, Default)]
pub struct OverlayStore {
    snapshot: RwLock<OverlaySnapshot>,
    version: RwLock<u64>,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_snapshot(&self) -> OverlaySnapshot {
        self.snapshot.read().clone()
    }

    pub fn get_version(&self) -> u64 {
        *self.version.read()
    }

    /// Replaces the snapshot, bumping the version only if it differs.
    pub fn update(&self, snapshot: OverlaySnapshot) {
        let mut current = self.snapshot.write();
        if *current == snapshot {
            return;
        }
        *current = snapshot;
        *self.version.write() += 1;
    }
}

/// Store for scene-level state.
#[derive(Debug, Default)]
pub struct SceneStore {
    snapshot: RwLock<SceneSnapshot>,
    version: RwLock<u64>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_snapshot(&self) -> SceneSnapshot {
        self.snapshot.read().clone()
    }

    pub fn get_version(&self) -> u64 {
        *self.version.read()
    }

    pub fn update(&self, snapshot: SceneSnapshot) {
        *self.snapshot.write() = snapshot;
        *self.version.write() += 1;
    }
}

// ============================================================================
// Combined State Stores
// ============================================================================

/// All state stores combined for easy sharing.
#[derive(Debug, Clone, Resource)]
pub struct StateStores {
    pub hud: Arc<HudStore>,
    pub overlay: Arc<OverlayStore>,
    pub scene: Arc<SceneStore>,
}

impl StateStores {
    pub fn new() -> Self {
        Self {
            hud: Arc::new(HudStore::new()),
            overlay: Arc::new(OverlayStore::new()),
            scene: Arc::new(SceneStore::new()),
        }
    }
}

impl Default for StateStores {
    fn default() -> Self {
        Self::new()
    }
}

//! Scene configuration.
//!
//! Everything the scene needs that is not derived at runtime: the flight
//! envelope, station list and content, pilots, and the tuning constants of
//! every subsystem. Loaded from JSON; missing fields fall back to defaults.

use std::collections::HashSet;

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::camera::CameraTuning;
use crate::flight::{FlightTuning, START_POSITION};
use crate::station::{ProximityRadius, Station, StationId};

/// Errors produced while building or validating a [`SceneConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("bounds radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("bounds height range is empty: min_y={min_y}, max_y={max_y}")]
    InvalidHeightRange { min_y: f32, max_y: f32 },

    #[error("station id must not be empty")]
    EmptyStationId,

    #[error("duplicate station id: {0}")]
    DuplicateStation(StationId),

    #[error("station {0} has a non-finite position")]
    InvalidStationPosition(StationId),

    #[error("duplicate pilot id: {0}")]
    DuplicatePilot(String),

    #[error("unknown pilot: {0}")]
    UnknownPilot(String),

    #[error("failed to parse scene config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One item of a station's content list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationEntry {
    pub heading: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl StationEntry {
    fn new(heading: &str, detail: &str, tags: &[&str]) -> Self {
        Self {
            heading: heading.to_string(),
            detail: detail.to_string(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

/// Station as it appears in configuration, with display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    pub id: StationId,
    pub position: [f32; 3],
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub entries: Vec<StationEntry>,
}

impl StationConfig {
    pub fn station(&self) -> Station {
        Station {
            id: self.id.clone(),
            position: Vec3::from_array(self.position),
        }
    }
}

/// Selectable pilot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotConfig {
    pub id: String,
    pub name: String,
    pub role: String,
    /// CSS hex colour, e.g. `#67e8f9`.
    pub accent: String,
}

impl PilotConfig {
    fn new(id: &str, name: &str, role: &str, accent: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            accent: accent.to_string(),
        }
    }

    /// Accent as linear-ish RGB in `[0, 1]`. Malformed colours fall back to white.
    pub fn accent_rgb(&self) -> [f32; 3] {
        parse_hex_rgb(&self.accent).unwrap_or([1.0, 1.0, 1.0])
    }
}

fn parse_hex_rgb(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(digits.get(range)?, 16)
            .ok()
            .map(|v| f32::from(v) / 255.0)
    };
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// HUD publication settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// UI polling interval in milliseconds.
    pub poll_interval_ms: u32,
    pub position_threshold: f32,
    pub yaw_threshold: f32,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 90,
            position_threshold: 0.2,
            yaw_threshold: 0.01,
        }
    }
}

/// Decorative scenery settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneryConfig {
    pub drone_count: u32,
    pub star_count: u32,
    pub starfield_seed: u64,
    pub starfield_radius: f32,
}

impl Default for SceneryConfig {
    fn default() -> Self {
        Self {
            drone_count: 4,
            star_count: 600,
            starfield_seed: 0x5eed_5ca1,
            starfield_radius: 420.0,
        }
    }
}

/// Full scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub bounds: Bounds,
    pub start_position: [f32; 3],
    pub stations: Vec<StationConfig>,
    pub pilots: Vec<PilotConfig>,
    pub proximity: ProximityRadius,
    pub flight: FlightTuning,
    pub camera: CameraTuning,
    pub hud: HudConfig,
    pub scenery: SceneryConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::default_portfolio()
    }
}

impl SceneConfig {
    /// The five-section portfolio scene.
    pub fn default_portfolio() -> Self {
        let station = |id: &str, position: [f32; 3], title: &str, subtitle: &str, status: &str| {
            StationConfig {
                id: StationId::from(id),
                position,
                title: title.to_string(),
                subtitle: subtitle.to_string(),
                status: status.to_string(),
                entries: Vec::new(),
            }
        };

        let mut about = station(
            "about",
            [0.0, 2.0, 0.0],
            "About",
            "Pilot dossier",
            "Docked at origin",
        );
        about.entries = vec![StationEntry::new(
            "Profile",
            "Software engineer building interactive web experiences.",
            &["web", "3d"],
        )];

        let mut projects = station(
            "projects",
            [70.0, 2.0, 55.0],
            "Projects",
            "Mission archive",
            "Archive online",
        );
        projects.entries = vec![
            StationEntry::new("Skyport", "Flyable 3D portfolio.", &["rust", "bevy", "wasm"]),
            StationEntry::new("Telemetry", "Realtime dashboards.", &["web"]),
        ];

        let mut skills = station(
            "skills",
            [-70.0, 2.0, 55.0],
            "Skills",
            "Systems loadout",
            "All systems nominal",
        );
        skills.entries = vec![
            StationEntry::new("Languages", "", &["rust", "typescript", "python"]),
            StationEntry::new("Graphics", "", &["webgpu", "three.js"]),
        ];

        let mut experience = station(
            "experience",
            [0.0, 2.0, 85.0],
            "Experience",
            "Flight log",
            "Log synced",
        );
        experience.entries = vec![StationEntry::new(
            "Engineer",
            "Shipped user-facing products end to end.",
            &[],
        )];

        let mut contact = station(
            "contact",
            [65.0, 2.0, -65.0],
            "Contact",
            "Comms relay",
            "Channel open",
        );
        contact.entries = vec![StationEntry::new("Email", "hello@example.com", &[])];

        Self {
            bounds: Bounds::default(),
            start_position: START_POSITION.to_array(),
            stations: vec![about, projects, skills, experience, contact],
            pilots: vec![
                PilotConfig::new("nova", "Teja Explorer", "Recon Suit", "#67e8f9"),
                PilotConfig::new("orion", "Teja Vanguard", "Command Suit", "#a78bfa"),
                PilotConfig::new("sol", "Teja Navigator", "Solar Suit", "#facc15"),
            ],
            proximity: ProximityRadius::default(),
            flight: FlightTuning::default(),
            camera: CameraTuning::default(),
            hud: HudConfig::default(),
            scenery: SceneryConfig::default(),
        }
    }

    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;

        let mut seen = HashSet::new();
        for station in &self.stations {
            if station.id.as_str().is_empty() {
                return Err(ConfigError::EmptyStationId);
            }
            if !Vec3::from_array(station.position).is_finite() {
                return Err(ConfigError::InvalidStationPosition(station.id.clone()));
            }
            if !seen.insert(station.id.clone()) {
                return Err(ConfigError::DuplicateStation(station.id.clone()));
            }
        }

        let mut pilots = HashSet::new();
        for pilot in &self.pilots {
            if !pilots.insert(pilot.id.as_str()) {
                return Err(ConfigError::DuplicatePilot(pilot.id.clone()));
            }
        }
        Ok(())
    }

    /// Stations in list order, as used by proximity and cycling.
    pub fn stations(&self) -> Vec<Station> {
        self.stations.iter().map(StationConfig::station).collect()
    }

    pub fn station(&self, id: &StationId) -> Option<&StationConfig> {
        self.stations.iter().find(|s| &s.id == id)
    }

    pub fn pilot(&self, id: &str) -> Result<&PilotConfig, ConfigError> {
        self.pilots
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ConfigError::UnknownPilot(id.to_string()))
    }

    /// Start position clamped into the bounds.
    pub fn start(&self) -> Vec3 {
        let mut velocity = Vec3::ZERO;
        self.bounds
            .clamp(Vec3::from_array(self.start_position), &mut velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_portfolio_is_valid() {
        let config = SceneConfig::default_portfolio();
        assert!(config.validate().is_ok());
        let ids: Vec<_> = config.stations().into_iter().map(|s| s.id.0).collect();
        assert_eq!(ids, ["about", "projects", "skills", "experience", "contact"]);
        assert_eq!(config.pilots.len(), 3);
        assert_eq!(config.start(), START_POSITION);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SceneConfig::from_json(r#"{"bounds":{"radius":50.0,"min_y":0.0,"max_y":8.0}}"#)
            .unwrap();
        assert_eq!(config.bounds.radius, 50.0);
        assert_eq!(config.stations.len(), 5);
        assert_eq!(config.flight, FlightTuning::default());
    }

    #[test]
    fn test_rejects_duplicate_station() {
        let json = r#"{
            "stations": [
                {"id": "about", "position": [0, 2, 0], "title": "A"},
                {"id": "about", "position": [5, 2, 0], "title": "B"}
            ]
        }"#;
        let err = SceneConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateStation(id) if id.as_str() == "about"));
    }

    #[test]
    fn test_rejects_bad_bounds_and_json() {
        let err = SceneConfig::from_json(r#"{"bounds":{"radius":-1.0,"min_y":0.0,"max_y":5.0}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRadius(_)));

        let err = SceneConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_pilot_lookup_and_accent() {
        let config = SceneConfig::default_portfolio();
        let sol = config.pilot("sol").unwrap();
        assert_eq!(sol.name, "Teja Navigator");
        let [r, g, b] = sol.accent_rgb();
        assert!((r - 250.0 / 255.0).abs() < 1e-6);
        assert!((g - 204.0 / 255.0).abs() < 1e-6);
        assert!((b - 21.0 / 255.0).abs() < 1e-6);

        assert!(matches!(
            config.pilot("zed"),
            Err(ConfigError::UnknownPilot(id)) if id == "zed"
        ));
    }
}

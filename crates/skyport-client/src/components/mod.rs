//! UI components for the skyport client.

mod controls_panel;
mod flight_hud;
mod joystick;
mod loading_screen;
mod minimap;
mod pilot_select;
mod station_overlay;

pub use controls_panel::ControlsPanel;
pub use flight_hud::FlightHud;
pub use joystick::Joystick;
pub use loading_screen::LoadingScreen;
pub use minimap::Minimap;
pub use pilot_select::PilotSelect;
pub use station_overlay::StationOverlay;

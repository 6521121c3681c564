//! Bevy integration hooks for Yew.
//!
//! `SkyportProvider` owns the canvas and starts the scene; the polling hooks
//! watch one state store each and re-render only when its version moves.

use gloo::events::EventListener;
use gloo::storage::{LocalStorage, Storage};
use gloo::timers::callback::{Interval, Timeout};
use serde::de::DeserializeOwned;
use skyport_core::bevy::{
    HudSnapshot, OverlaySnapshot, SceneCommand, SceneSnapshot, get_hud_state, get_hud_version,
    get_overlay_state, get_overlay_version, get_scene_state, get_scene_version, push_intent,
    request_app_exit, reset_app_state, send_command, start_skyport_app,
};
use skyport_core::input::FlightIntent;
use skyport_core::station::{CycleDirection, StationId};
use wasm_bindgen::JsValue;
use yew::prelude::*;

/// Local storage key holding an optional scene config override (JSON).
pub const CONFIG_STORAGE_KEY: &str = "skyport.scene_config";

/// Reads the config override, or an empty string for the built-in scene.
fn load_config_json() -> String {
    LocalStorage::get::<serde_json::Value>(CONFIG_STORAGE_KEY)
        .map(|value| value.to_string())
        .unwrap_or_default()
}

// ============================================================================
// Context
// ============================================================================

/// Handle for sending commands to the scene.
#[derive(Clone, PartialEq)]
pub struct SkyportContext {
    /// Whether the scene has been started.
    pub initialized: bool,
}

impl SkyportContext {
    pub fn send(&self, command: &SceneCommand) -> Result<(), String> {
        if !self.initialized {
            return Err("Scene not initialized".to_string());
        }
        let json = serde_json::to_string(command).map_err(|e| e.to_string())?;
        send_command(&json).map_err(|e| format!("{e:?}"))
    }

    /// Sends a command, logging failures instead of returning them.
    pub fn dispatch(&self, command: SceneCommand) {
        if let Err(e) = self.send(&command) {
            tracing::warn!("Failed to send {:?}: {}", command, e);
        }
    }

    pub fn push_intent(&self, intent: &FlightIntent) {
        if !self.initialized {
            return;
        }
        let result = serde_json::to_string(intent)
            .map_err(|e| e.to_string())
            .and_then(|json| push_intent(&json).map_err(|e| format!("{e:?}")));
        if let Err(e) = result {
            tracing::warn!("Failed to push intent: {}", e);
        }
    }

    pub fn launch(&self, pilot: &str) {
        self.dispatch(SceneCommand::Launch {
            pilot: pilot.to_string(),
        });
    }

    pub fn return_to_hangar(&self) {
        self.dispatch(SceneCommand::ReturnToHangar);
    }

    pub fn select_station(&self, id: StationId) {
        self.dispatch(SceneCommand::SelectStation { id });
    }

    pub fn close_station(&self) {
        self.dispatch(SceneCommand::CloseStation);
    }

    pub fn cycle_station(&self, direction: CycleDirection) {
        self.dispatch(SceneCommand::CycleStation { direction });
    }

    pub fn set_destination(&self, id: Option<StationId>) {
        self.dispatch(SceneCommand::SetDestination { id });
    }
}

/// Props for SkyportProvider.
#[derive(Properties, PartialEq)]
pub struct SkyportProviderProps {
    pub children: Children,
    /// Canvas element ID.
    pub canvas_id: AttrValue,
}

/// Provider component that mounts the canvas and starts the Bevy app.
///
/// The app starts in hangar mode; pages send `launch` to begin flying.
#[function_component(SkyportProvider)]
pub fn skyport_provider(props: &SkyportProviderProps) -> Html {
    let initialized = use_state(|| false);

    {
        let initialized = initialized.clone();
        let canvas_id = props.canvas_id.to_string();

        use_effect_with((), move |_| {
            let beforeunload = EventListener::new(&gloo::utils::window(), "beforeunload", |_| {
                tracing::info!("beforeunload: requesting scene exit and cleaning up state");
                request_app_exit();
                reset_app_state();
            });

            // Small delay to ensure canvas is mounted
            let timeout = Timeout::new(100, move || {
                initialized.set(true);
                tracing::info!("Scene initializing on #{}", canvas_id);

                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = start_skyport_app(&canvas_id, &load_config_json()) {
                        tracing::error!("Failed to start scene: {:?}", e);
                    }
                });
            });

            move || {
                drop(beforeunload);
                drop(timeout);
            }
        });
    }

    let context = SkyportContext {
        initialized: *initialized,
    };

    html! {
        <ContextProvider<SkyportContext> context={context}>
            <canvas id={props.canvas_id.clone()} class="scene-canvas" />
            { props.children.clone() }
        </ContextProvider<SkyportContext>>
    }
}

/// Hook to get the scene context.
#[hook]
pub fn use_skyport() -> SkyportContext {
    use_context::<SkyportContext>().unwrap_or(SkyportContext { initialized: false })
}

// ============================================================================
// Polling Hooks
// ============================================================================

/// Polling interval in milliseconds for overlay and scene state.
const POLL_INTERVAL_MS: u32 = 90;

/// Polls one store, fetching its snapshot only when the version moved.
#[hook]
fn use_polled_store<T>(
    interval_ms: u32,
    get_version: fn() -> u64,
    get_state: fn() -> Result<JsValue, JsValue>,
) -> T
where
    T: DeserializeOwned + Default + Clone + 'static,
{
    let state = use_state(T::default);
    let last_version = use_mut_ref(|| 0u64);

    {
        let state = state.clone();
        use_effect_with(interval_ms.max(16), move |interval_ms| {
            let interval = Interval::new(*interval_ms, move || {
                let version = get_version();
                if version == *last_version.borrow() {
                    return;
                }
                *last_version.borrow_mut() = version;
                match get_state().map(serde_wasm_bindgen::from_value::<T>) {
                    Ok(Ok(snapshot)) => state.set(snapshot),
                    Ok(Err(e)) => tracing::warn!("Failed to decode snapshot: {}", e),
                    Err(e) => tracing::warn!("Failed to read store: {:?}", e),
                }
            });

            move || drop(interval)
        });
    }

    (*state).clone()
}

/// Hook to get ship telemetry. `None` outside of flight.
///
/// `interval_ms` comes from the scene's HUD settings.
#[hook]
pub fn use_hud(interval_ms: u32) -> Option<HudSnapshot> {
    use_polled_store(interval_ms, get_hud_version, get_hud_state)
}

/// Hook to get the station overlay state.
#[hook]
pub fn use_overlay() -> OverlaySnapshot {
    use_polled_store(POLL_INTERVAL_MS, get_overlay_version, get_overlay_state)
}

/// Hook to get scene-level state (mode, pilots, stations).
#[hook]
pub fn use_scene() -> SceneSnapshot {
    use_polled_store(POLL_INTERVAL_MS, get_scene_version, get_scene_state)
}

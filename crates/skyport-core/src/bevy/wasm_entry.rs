//! WASM entry points for the skyport scene.
//!
//! Provides JavaScript-callable functions to start the scene, feed it input
//! and poll its state stores.

use std::sync::atomic::{AtomicBool, Ordering};

use bevy::prelude::*;
use bevy::winit::{UpdateMode, WinitSettings};
use parking_lot::Mutex;
use wasm_bindgen::prelude::*;

use crate::bevy::{CommandError, CommandQueue, SceneCommand, SkyportPlugin, StateStores};
use crate::config::SceneConfig;

// ============================================================================
// Global State
// ============================================================================

/// Set by `request_app_exit`, checked every frame by [`check_exit_system`].
static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);

/// In WASM the winit event loop can only be created once per page.
static APP_STARTED: AtomicBool = AtomicBool::new(false);

/// Queue, stores and config shared between the page and the running app.
struct GlobalState {
    command_queue: CommandQueue,
    state_stores: StateStores,
    config: SceneConfig,
}

impl GlobalState {
    fn new() -> Self {
        Self {
            command_queue: CommandQueue::new(),
            state_stores: StateStores::new(),
            config: SceneConfig::default(),
        }
    }
}

static GLOBAL_STATE: Mutex<Option<GlobalState>> = Mutex::new(None);

fn with_global_state<R>(f: impl FnOnce(&mut GlobalState) -> R) -> R {
    let mut guard = GLOBAL_STATE.lock();
    let state = guard.get_or_insert_with(GlobalState::new);
    f(state)
}

fn get_command_queue() -> CommandQueue {
    with_global_state(|state| state.command_queue.clone())
}

fn get_state_stores() -> StateStores {
    with_global_state(|state| state.state_stores.clone())
}

fn is_shutdown_requested() -> bool {
    SHOULD_EXIT.load(Ordering::SeqCst)
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn enqueue(command: Result<SceneCommand, CommandError>) -> Result<(), JsValue> {
    if is_shutdown_requested() {
        return Err(JsValue::from_str(&CommandError::ShuttingDown.to_string()));
    }
    let command = command.map_err(|e| JsValue::from_str(&e.to_string()))?;
    get_command_queue().push(command);
    Ok(())
}

/// Request the app to exit. It exits on the next frame.
#[wasm_bindgen]
pub fn request_app_exit() {
    tracing::info!("[skyport] request_app_exit called - signaling app to exit");
    SHOULD_EXIT.store(true, Ordering::SeqCst);
}

/// Reset global state. Called after the app exits or before page unload.
#[wasm_bindgen]
pub fn reset_app_state() {
    tracing::info!("[skyport] reset_app_state called - clearing global state");

    SHOULD_EXIT.store(true, Ordering::SeqCst);

    let mut guard = GLOBAL_STATE.lock();
    if let Some(ref state) = *guard {
        state.command_queue.clear();
    }
    *guard = None;

    SHOULD_EXIT.store(false, Ordering::SeqCst);
}

/// Bevy system that sends `AppExit` once exit was requested.
pub fn check_exit_system(mut exit: MessageWriter<bevy::app::AppExit>) {
    if SHOULD_EXIT.load(Ordering::SeqCst) {
        tracing::info!("[skyport] check_exit_system: sending AppExit");
        exit.write(bevy::app::AppExit::Success);
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Starts the scene on `canvas_id` in hangar mode.
///
/// `config_json` may be empty to use the default portfolio.
#[wasm_bindgen]
pub fn start_skyport_app(canvas_id: &str, config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    tracing::info!("[skyport] start_skyport_app called");

    if APP_STARTED.load(Ordering::SeqCst) {
        tracing::info!("[skyport] App already running, skipping creation");
        return Ok(());
    }

    let config = if config_json.trim().is_empty() {
        SceneConfig::default()
    } else {
        SceneConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("Failed to load config: {e}")))?
    };
    with_global_state(|state| state.config = config.clone());

    let command_queue = get_command_queue();
    let state_stores = get_state_stores();

    tracing::info!(
        "[skyport] creating Bevy app for canvas #{} ({} stations)",
        canvas_id,
        config.stations.len()
    );

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    canvas: Some(format!("#{canvas_id}")),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: true,
                    ..default()
                }),
                ..default()
            })
            .disable::<bevy::log::LogPlugin>(),
    );

    app.insert_resource(WinitSettings {
        focused_mode: UpdateMode::Continuous,
        unfocused_mode: UpdateMode::Continuous,
    });

    app.add_plugins(SkyportPlugin::new(config, command_queue, state_stores));

    APP_STARTED.store(true, Ordering::SeqCst);

    tracing::info!("[skyport] calling app.run()");
    app.run();
    tracing::info!("[skyport] app.run() returned");

    Ok(())
}

#[wasm_bindgen]
pub fn is_app_running() -> bool {
    APP_STARTED.load(Ordering::SeqCst) && !is_shutdown_requested()
}

// ============================================================================
// Commands
// ============================================================================

/// Queue a scene command, e.g. `{"type":"launch","pilot":"nova"}`.
#[wasm_bindgen]
pub fn send_command(command_json: &str) -> Result<(), JsValue> {
    enqueue(SceneCommand::from_json(command_json))
}

/// Queue a flight intent, e.g. `{"type":"key","key":"forward","pressed":true}`.
#[wasm_bindgen]
pub fn push_intent(intent_json: &str) -> Result<(), JsValue> {
    enqueue(SceneCommand::intent_from_json(intent_json))
}

// ============================================================================
// State Stores
// ============================================================================

#[wasm_bindgen]
pub fn get_hud_state() -> Result<JsValue, JsValue> {
    to_js(&get_state_stores().hud.get_snapshot())
}

#[wasm_bindgen]
pub fn get_hud_version() -> u64 {
    get_state_stores().hud.get_version()
}

#[wasm_bindgen]
pub fn get_overlay_state() -> Result<JsValue, JsValue> {
    to_js(&get_state_stores().overlay.get_snapshot())
}

#[wasm_bindgen]
pub fn get_overlay_version() -> u64 {
    get_state_stores().overlay.get_version()
}

#[wasm_bindgen]
pub fn get_scene_state() -> Result<JsValue, JsValue> {
    to_js(&get_state_stores().scene.get_snapshot())
}

#[wasm_bindgen]
pub fn get_scene_version() -> u64 {
    get_state_stores().scene.get_version()
}

/// The configuration the app was started with.
#[wasm_bindgen]
pub fn get_scene_config() -> Result<JsValue, JsValue> {
    with_global_state(|state| to_js(&state.config))
}

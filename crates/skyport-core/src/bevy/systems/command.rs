//! Command processing system.
//!
//! Processes commands from the JavaScript/WASM interface.

use bevy::prelude::*;

use crate::bevy::{
    AppMode, CommandQueue, InputState, Overlay, PilotLaunched, SceneCommand, SceneSettings,
    SectionChanged, SelectedPilot,
};

/// Drains the command queue once per frame, in arrival order.
///
/// Flight intents are only applied in flight mode; everything else is
/// routed to the overlay controller or the mode state.
#[allow(clippy::too_many_arguments)]
pub fn process_commands(
    command_queue: Res<CommandQueue>,
    settings: Res<SceneSettings>,
    mode: Res<State<AppMode>>,
    mut next_mode: ResMut<NextState<AppMode>>,
    mut input: ResMut<InputState>,
    mut overlay: ResMut<Overlay>,
    mut pilot: ResMut<SelectedPilot>,
    mut section_events: MessageWriter<SectionChanged>,
    mut launch_events: MessageWriter<PilotLaunched>,
) {
    let in_flight = *mode.get() == AppMode::Flight;

    for command in command_queue.drain() {
        match command {
            SceneCommand::Intent { intent } => {
                if in_flight {
                    let enabled = overlay.0.controls_enabled();
                    input.0.apply(intent, enabled);
                }
            }
            SceneCommand::Launch { pilot: pilot_id } => {
                if in_flight {
                    tracing::warn!("[command] Launch ignored: already in flight");
                    continue;
                }
                match settings.config.pilot(&pilot_id) {
                    Ok(config) => {
                        tracing::info!("[command] Launch: {} ({})", config.name, config.id);
                        pilot.0 = Some(config.clone());
                        next_mode.set(AppMode::Flight);
                        launch_events.write(PilotLaunched { pilot: pilot_id });
                    }
                    Err(e) => tracing::warn!("[command] Launch rejected: {}", e),
                }
            }
            SceneCommand::ReturnToHangar => {
                if in_flight {
                    tracing::info!("[command] ReturnToHangar");
                    next_mode.set(AppMode::Hangar);
                }
            }
            SceneCommand::SelectStation { id } => match overlay.0.select(&id) {
                Ok(change) => {
                    tracing::info!("[command] SelectStation: {}", id);
                    if let Some(change) = change {
                        section_events.write(change.into());
                    }
                }
                Err(e) => tracing::warn!("[command] SelectStation rejected: {}", e),
            },
            SceneCommand::CloseStation => {
                if let Some(change) = overlay.0.close() {
                    tracing::info!("[command] CloseStation: {:?}", change.previous);
                    section_events.write(change.into());
                }
            }
            SceneCommand::CycleStation { direction } => {
                if let Some(change) = overlay.0.cycle(direction) {
                    tracing::info!(
                        "[command] CycleStation {:?}: {:?} -> {:?}",
                        direction,
                        change.previous,
                        change.current
                    );
                    section_events.write(change.into());
                }
            }
            SceneCommand::SetDestination { id } => {
                if let Err(e) = overlay.0.set_destination(id.as_ref()) {
                    tracing::warn!("[command] SetDestination rejected: {}", e);
                } else {
                    tracing::info!("[command] SetDestination: {:?}", id);
                }
            }
        }
    }
}

//! Main application component.

use gloo::timers::callback::Timeout;
use skyport_core::bevy::OverlaySnapshot;
use skyport_core::config::PilotConfig;
use skyport_core::input::FlightIntent;
use skyport_core::station::{CycleDirection, StationId};
use yew::prelude::*;

use crate::components::{
    ControlsPanel, FlightHud, Joystick, LoadingScreen, Minimap, PilotSelect, StationOverlay,
};
use crate::hooks::{
    SkyportProvider, use_flight_input, use_hud, use_overlay, use_phone_device, use_scene,
    use_skyport,
};

/// Canvas element the Bevy app renders into.
pub const SCENE_CANVAS_ID: &str = "skyport-canvas";

/// How long the loading screen stays up before launch.
const LAUNCH_DELAY_MS: u32 = 2_000;

#[derive(Clone, PartialEq)]
enum Stage {
    Hangar,
    /// Pilot chosen, launch pending.
    Loading(PilotConfig),
    /// Launch sent; waiting for the scene to report flight.
    Launched(PilotConfig),
}

/// Minimap and joystick give way to an open station overlay.
fn shows_flight_widgets(overlay: &OverlaySnapshot) -> bool {
    overlay.controls_enabled && overlay.active.is_none()
}

/// Everything drawn over the canvas.
#[function_component(SceneUi)]
fn scene_ui() -> Html {
    let context = use_skyport();
    let scene = use_scene();
    let overlay = use_overlay();
    let hud = use_hud(scene.hud_poll_interval_ms);
    let is_phone = use_phone_device();
    let stage = use_state(|| Stage::Hangar);

    use_flight_input(
        context.clone(),
        AttrValue::from(SCENE_CANVAS_ID),
        scene.in_flight,
    );

    // Loading screen timer
    {
        let context = context.clone();
        let stage = stage.clone();
        use_effect_with((*stage).clone(), move |current| {
            let timeout = match current {
                Stage::Loading(pilot) => {
                    let pilot = pilot.clone();
                    Some(Timeout::new(LAUNCH_DELAY_MS, move || {
                        tracing::info!("Launching with pilot {}", pilot.id);
                        context.launch(&pilot.id);
                        stage.set(Stage::Launched(pilot));
                    }))
                }
                _ => None,
            };
            move || drop(timeout)
        });
    }

    // The overlay needs a free cursor.
    use_effect_with(overlay.controls_enabled, |enabled| {
        if !*enabled {
            gloo::utils::document().exit_pointer_lock();
        }
    });

    if !scene.in_flight {
        return match &*stage {
            Stage::Loading(pilot) | Stage::Launched(pilot) => html! {
                <LoadingScreen pilot_name={pilot.name.clone()} />
            },
            Stage::Hangar => {
                let on_select = {
                    let stage = stage.clone();
                    let pilots = scene.pilots.clone();
                    Callback::from(move |id: String| {
                        if let Some(pilot) = pilots.iter().find(|p| p.id == id) {
                            stage.set(Stage::Loading(pilot.clone()));
                        }
                    })
                };
                html! { <PilotSelect pilots={scene.pilots.clone()} {on_select} /> }
            }
        };
    }

    let on_return = {
        let context = context.clone();
        let stage = stage.clone();
        Callback::from(move |()| {
            context.return_to_hangar();
            stage.set(Stage::Hangar);
        })
    };
    let on_select_station = {
        let context = context.clone();
        Callback::from(move |id: StationId| context.select_station(id))
    };
    let on_close = {
        let context = context.clone();
        Callback::from(move |()| context.close_station())
    };
    let on_cycle = {
        let context = context.clone();
        Callback::from(move |direction: CycleDirection| context.cycle_station(direction))
    };
    let on_clear_destination = {
        let context = context.clone();
        Callback::from(move |()| context.set_destination(None))
    };
    let on_intent = {
        let context = context.clone();
        Callback::from(move |intent: FlightIntent| context.push_intent(&intent))
    };

    let station_title = |id: &StationId| {
        scene
            .stations
            .iter()
            .find(|s| &s.id == id)
            .map(|s| AttrValue::from(s.title.clone()))
    };
    let destination_title = overlay.destination.as_ref().and_then(station_title);

    let active_station = overlay
        .active
        .as_ref()
        .and_then(|id| scene.stations.iter().find(|s| &s.id == id))
        .map(|station| {
            let on_navigate = {
                let context = context.clone();
                let id = station.id.clone();
                Callback::from(move |()| context.set_destination(Some(id.clone())))
            };
            let is_destination = overlay.destination.as_ref() == Some(&station.id);
            html! {
                <StationOverlay
                    station={station.clone()}
                    stations={scene.stations.clone()}
                    on_select={on_select_station.clone()}
                    {is_destination}
                    on_close={on_close.clone()}
                    on_cycle={on_cycle.clone()}
                    {on_navigate}
                />
            }
        });

    let show_widgets = shows_flight_widgets(&overlay);

    let pilot_badge = scene.pilot.as_ref().map(|pilot| {
        let style = format!("--accent: {};", pilot.accent);
        html! {
            <div class="pilot-badge" {style}>
                <span class="pilot-name">{ pilot.name.clone() }</span>
                <span class="pilot-role">{ pilot.role.clone() }</span>
            </div>
        }
    });

    html! {
        <div class="scene-ui">
            { pilot_badge }
            <FlightHud hud={hud.clone()} {destination_title} {on_clear_destination} />
            if show_widgets {
                <Minimap
                    {hud}
                    stations={scene.stations.clone()}
                    overlay={overlay.clone()}
                    on_select={on_select_station.clone()}
                />
            }
            <ControlsPanel {is_phone} {on_return} />
            if is_phone && show_widgets {
                <Joystick {on_intent} />
            }
            { active_station }
        </div>
    }
}

/// Root application component.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <SkyportProvider canvas_id={SCENE_CANVAS_ID}>
            <SceneUi />
        </SkyportProvider>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_flight_widgets_hidden_while_station_open() {
        let mut overlay = OverlaySnapshot::default();
        assert!(shows_flight_widgets(&overlay));

        overlay.active = Some(StationId::from("about"));
        overlay.controls_enabled = false;
        assert!(!shows_flight_widgets(&overlay));

        overlay.active = None;
        overlay.controls_enabled = true;
        overlay.dismissed = vec![StationId::from("about")];
        assert!(shows_flight_widgets(&overlay));
    }
}

//! Telemetry panel: compass, speed, altitude and GPS guidance.

use skyport_core::bevy::HudSnapshot;
use yew::prelude::*;
use yew_icons::{Icon, IconData};

#[derive(Properties, PartialEq)]
pub struct FlightHudProps {
    pub hud: Option<HudSnapshot>,
    /// Title of the current destination, if any.
    #[prop_or_default]
    pub destination_title: Option<AttrValue>,
    /// Clears the destination.
    pub on_clear_destination: Callback<()>,
}

#[function_component(FlightHud)]
pub fn flight_hud(props: &FlightHudProps) -> Html {
    let Some(hud) = props.hud.as_ref() else {
        return html! {};
    };

    let on_clear = {
        let cb = props.on_clear_destination.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let guidance = match (&props.destination_title, &hud.guidance_text) {
        (Some(title), Some(text)) => html! {
            <div class="hud-guidance">
                <Icon data={IconData::LUCIDE_NAVIGATION} width="14px" height="14px" />
                <span class="hud-destination">{ title.clone() }</span>
                <span>{ text.clone() }</span>
                if let Some(altitude) = &hud.altitude_text {
                    <span class="hud-altitude-hint">{ altitude.clone() }</span>
                }
                <button class="hud-clear" onclick={on_clear}>
                    <Icon data={IconData::LUCIDE_X} width="12px" height="12px" />
                </button>
            </div>
        },
        _ => html! {},
    };

    html! {
        <div class="flight-hud">
            <div class="hud-row">
                <span class="hud-compass">{ hud.compass.heading.label() }</span>
                <span class="hud-value">{ format!("{:03.0}°", hud.compass.degrees) }</span>
            </div>
            <div class="hud-row">
                <span class="hud-label">{ "SPD" }</span>
                <span class="hud-value">{ format!("{:.1}", hud.speed * 60.0) }</span>
                if hud.boosting {
                    <span class="hud-boost">{ "BOOST" }</span>
                }
            </div>
            <div class="hud-row">
                <span class="hud-label">{ "ALT" }</span>
                <span class="hud-value">{ format!("{:.1}m", hud.position[1]) }</span>
            </div>
            { guidance }
        </div>
    }
}

//! Hangar screen: pick a pilot to launch with.

use skyport_core::config::PilotConfig;
use yew::prelude::*;
use yew_icons::{Icon, IconData};

#[derive(Properties, PartialEq)]
pub struct PilotSelectProps {
    pub pilots: Vec<PilotConfig>,
    /// Emits the chosen pilot id.
    pub on_select: Callback<String>,
}

#[function_component(PilotSelect)]
pub fn pilot_select(props: &PilotSelectProps) -> Html {
    html! {
        <div class="hangar">
            <h1 class="hangar-title">{ "Choose your pilot" }</h1>
            <div class="pilot-grid">
                { for props.pilots.iter().map(|pilot| {
                    let onclick = {
                        let on_select = props.on_select.clone();
                        let id = pilot.id.clone();
                        Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
                    };
                    let style = format!("--accent: {};", pilot.accent);
                    html! {
                        <button key={pilot.id.clone()} class="pilot-card" {style} {onclick}>
                            <Icon data={IconData::LUCIDE_ROCKET} width="28px" height="28px" />
                            <span class="pilot-name">{ pilot.name.clone() }</span>
                            <span class="pilot-role">{ pilot.role.clone() }</span>
                        </button>
                    }
                }) }
            </div>
        </div>
    }
}

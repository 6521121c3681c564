//! Top-down minimap. North (+z) is up; clicking a station selects it.

use skyport_core::bevy::{HudSnapshot, OverlaySnapshot, StationSummary};
use skyport_core::hud::MapPoint;
use skyport_core::station::StationId;
use yew::prelude::*;

fn position_style(point: MapPoint) -> String {
    format!("left: {:.2}%; top: {:.2}%;", point.left, point.top)
}

#[derive(Properties, PartialEq)]
pub struct MinimapProps {
    pub hud: Option<HudSnapshot>,
    pub stations: Vec<StationSummary>,
    pub overlay: OverlaySnapshot,
    pub on_select: Callback<StationId>,
}

#[function_component(Minimap)]
pub fn minimap(props: &MinimapProps) -> Html {
    let ship = props.hud.as_ref().map(|hud| {
        // Heading degrees are clockwise from north, which is CSS rotation on an up-is-north map.
        let style = format!(
            "{} transform: translate(-50%, -50%) rotate({:.1}deg);",
            position_style(hud.map),
            hud.compass.degrees
        );
        html! { <div class="minimap-ship" {style} /> }
    });

    html! {
        <div class="minimap">
            { for props.stations.iter().map(|station| {
                let mut class = classes!("minimap-station");
                if props.overlay.active.as_ref() == Some(&station.id) {
                    class.push("active");
                }
                if props.overlay.destination.as_ref() == Some(&station.id) {
                    class.push("destination");
                }
                let onclick = {
                    let on_select = props.on_select.clone();
                    let id = station.id.clone();
                    Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
                };
                html! {
                    <button
                        key={station.id.to_string()}
                        {class}
                        style={position_style(station.map)}
                        title={station.title.clone()}
                        {onclick}
                    />
                }
            }) }
            { ship }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_position_style() {
        let style = position_style(MapPoint {
            left: 50.0,
            top: 12.5,
        });
        assert_eq!(style, "left: 50.00%; top: 12.50%;");
    }
}

//! Station content panel.
//!
//! Escape closes it, the left and right arrows move to the neighbouring
//! station. Flight controls stay frozen while it is open.

use gloo::events::EventListener;
use skyport_core::bevy::StationSummary;
use skyport_core::station::{CycleDirection, StationId};
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;
use yew_icons::{Icon, IconData};

#[derive(Properties, PartialEq)]
pub struct StationOverlayProps {
    pub station: StationSummary,
    /// Every station, in cycle order, for the sidebar list.
    pub stations: Vec<StationSummary>,
    /// Whether this station is the current GPS destination.
    pub is_destination: bool,
    pub on_close: Callback<()>,
    pub on_cycle: Callback<CycleDirection>,
    pub on_navigate: Callback<()>,
    pub on_select: Callback<StationId>,
}

fn list_entry_classes(is_active: bool) -> Classes {
    let mut class = classes!("station-list-entry");
    if is_active {
        class.push("active");
    }
    class
}

#[function_component(StationOverlay)]
pub fn station_overlay(props: &StationOverlayProps) -> Html {
    {
        let on_close = props.on_close.clone();
        let on_cycle = props.on_cycle.clone();
        use_effect_with((on_close, on_cycle), move |(on_close, on_cycle)| {
            let on_close = on_close.clone();
            let on_cycle = on_cycle.clone();
            let listener = EventListener::new(&gloo::utils::document(), "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                match event.key().as_str() {
                    "Escape" => on_close.emit(()),
                    "ArrowLeft" => on_cycle.emit(CycleDirection::Previous),
                    "ArrowRight" => on_cycle.emit(CycleDirection::Next),
                    _ => {}
                }
            });
            move || drop(listener)
        });
    }

    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_prev = {
        let cb = props.on_cycle.clone();
        Callback::from(move |_: MouseEvent| cb.emit(CycleDirection::Previous))
    };
    let on_next = {
        let cb = props.on_cycle.clone();
        Callback::from(move |_: MouseEvent| cb.emit(CycleDirection::Next))
    };
    let on_navigate = {
        let cb = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let station = &props.station;

    let station_list = props.stations.iter().map(|entry| {
        let onclick = {
            let on_select = props.on_select.clone();
            let id = entry.id.clone();
            Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
        };
        html! {
            <li key={entry.id.to_string()}>
                <button class={list_entry_classes(entry.id == station.id)} {onclick}>
                    { entry.title.clone() }
                </button>
            </li>
        }
    });

    html! {
        <div class="modal-overlay">
            <div class="station-overlay">
                <div class="station-header">
                    <button class="station-nav" onclick={on_prev}>
                        <Icon data={IconData::LUCIDE_CHEVRON_LEFT} width="18px" height="18px" />
                    </button>
                    <div class="station-heading">
                        <h2>{ station.title.clone() }</h2>
                        <span class="station-subtitle">{ station.subtitle.clone() }</span>
                    </div>
                    <button class="station-nav" onclick={on_next}>
                        <Icon data={IconData::LUCIDE_CHEVRON_RIGHT} width="18px" height="18px" />
                    </button>
                    <button class="modal-close-btn" onclick={on_close}>
                        <Icon data={IconData::LUCIDE_X} width="18px" height="18px" />
                    </button>
                </div>
                if !station.status.is_empty() {
                    <p class="station-status">{ station.status.clone() }</p>
                }
                <ul class="station-entries">
                    { for station.entries.iter().map(|entry| html! {
                        <li class="station-entry">
                            <h3>{ entry.heading.clone() }</h3>
                            if !entry.detail.is_empty() {
                                <p>{ entry.detail.clone() }</p>
                            }
                            <div class="station-tags">
                                { for entry.tags.iter().map(|tag| html! {
                                    <span class="station-tag">{ tag.clone() }</span>
                                }) }
                            </div>
                        </li>
                    }) }
                </ul>
                if !props.is_destination {
                    <button class="btn btn-navigate" onclick={on_navigate}>
                        <Icon data={IconData::LUCIDE_MAP_PIN} width="14px" height="14px" />
                        { " Set as destination" }
                    </button>
                }
                <nav class="station-list">
                    <h3>{ "Stations" }</h3>
                    <ul>{ for station_list }</ul>
                </nav>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_list_marks_only_active_station() {
        assert!(list_entry_classes(true).contains("active"));
        assert!(!list_entry_classes(false).contains("active"));
        assert!(list_entry_classes(false).contains("station-list-entry"));
    }
}

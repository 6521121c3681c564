//! Collapsible control legend with the return-to-hangar action.

use yew::prelude::*;
use yew_icons::{Icon, IconData};

const KEYBOARD_HINTS: [(&str, &str); 6] = [
    ("W / S", "Forward / back"),
    ("A / D", "Strafe"),
    ("Space", "Ascend"),
    ("Shift", "Descend"),
    ("Mouse", "Look (click to lock)"),
    ("Esc", "Close station"),
];

const TOUCH_HINTS: [(&str, &str); 3] = [
    ("Stick", "Fly and turn"),
    ("Arrows", "Ascend / descend"),
    ("Map", "Tap a station"),
];

#[derive(Properties, PartialEq)]
pub struct ControlsPanelProps {
    pub is_phone: bool,
    pub on_return: Callback<()>,
}

#[function_component(ControlsPanel)]
pub fn controls_panel(props: &ControlsPanelProps) -> Html {
    let expanded = use_state(|| !props.is_phone);

    let on_toggle = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set(!*expanded))
    };
    let on_return = {
        let cb = props.on_return.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let hints: &[(&str, &str)] = if props.is_phone {
        &TOUCH_HINTS
    } else {
        &KEYBOARD_HINTS
    };

    html! {
        <div class="controls-panel">
            <div class="controls-header">
                <button class="btn" onclick={on_toggle}>
                    { if *expanded { "Hide controls" } else { "Controls" } }
                </button>
                <button class="btn btn-return" onclick={on_return} title="Return to hangar">
                    <Icon data={IconData::LUCIDE_LOG_OUT} width="14px" height="14px" />
                </button>
            </div>
            if *expanded {
                <dl class="controls-list">
                    { for hints.iter().map(|(key, action)| html! {
                        <>
                            <dt>{ *key }</dt>
                            <dd>{ *action }</dd>
                        </>
                    }) }
                </dl>
            }
        </div>
    }
}

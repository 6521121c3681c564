//! On-screen joystick and vertical thrust buttons for touch devices.

use skyport_core::input::{FlightIntent, JoystickVector, VerticalButton};
use web_sys::{HtmlElement, PointerEvent};
use yew::prelude::*;
use yew_icons::{Icon, IconData};

/// Maximum knob travel from the base centre, in CSS pixels.
const JOYSTICK_RADIUS: f32 = 48.0;
/// Knob radius, in CSS pixels.
const KNOB_RADIUS: f32 = 22.0;

/// Keeps pointer events flowing to `base` while the knob is dragged.
/// Returns false (after logging) when the browser refuses.
fn capture_pointer(base: &HtmlElement, pointer_id: i32) -> bool {
    match base.set_pointer_capture(pointer_id) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to capture joystick pointer {}: {:?}", pointer_id, e);
            false
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct JoystickProps {
    pub on_intent: Callback<FlightIntent>,
}

#[function_component(Joystick)]
pub fn joystick(props: &JoystickProps) -> Html {
    let base_ref = use_node_ref();
    let knob = use_state(|| (0.0_f32, 0.0_f32));
    let dragging = use_mut_ref(|| false);

    let update = {
        let base_ref = base_ref.clone();
        let knob = knob.clone();
        let on_intent = props.on_intent.clone();
        move |event: &PointerEvent| {
            // A missing base element just leaves the joystick idle.
            let Some(base) = base_ref.cast::<HtmlElement>() else {
                return;
            };
            let rect = base.get_bounding_client_rect();
            #[allow(clippy::cast_possible_truncation)]
            let (dx, dy) = (
                (f64::from(event.client_x()) - (rect.left() + rect.width() / 2.0)) as f32,
                (f64::from(event.client_y()) - (rect.top() + rect.height() / 2.0)) as f32,
            );
            let (offset, (x, y)) = JoystickVector::from_offset(dx, dy, JOYSTICK_RADIUS);
            knob.set(offset);
            on_intent.emit(FlightIntent::Joystick { x, y });
        }
    };

    let on_pointer_down = {
        let dragging = dragging.clone();
        let base_ref = base_ref.clone();
        let update = update.clone();
        Callback::from(move |event: PointerEvent| {
            event.prevent_default();
            *dragging.borrow_mut() = true;
            if let Some(base) = base_ref.cast::<HtmlElement>() {
                capture_pointer(&base, event.pointer_id());
            }
            update(&event);
        })
    };

    let on_pointer_move = {
        let dragging = dragging.clone();
        Callback::from(move |event: PointerEvent| {
            if *dragging.borrow() {
                event.prevent_default();
                update(&event);
            }
        })
    };

    let on_pointer_up = {
        let knob = knob.clone();
        let on_intent = props.on_intent.clone();
        Callback::from(move |_: PointerEvent| {
            *dragging.borrow_mut() = false;
            knob.set((0.0, 0.0));
            on_intent.emit(FlightIntent::Joystick { x: 0.0, y: 0.0 });
        })
    };

    let button = |button: VerticalButton, icon: IconData, label: &'static str| {
        let press = {
            let on_intent = props.on_intent.clone();
            Callback::from(move |event: PointerEvent| {
                event.prevent_default();
                on_intent.emit(FlightIntent::JoystickButton {
                    button,
                    pressed: true,
                });
            })
        };
        let release = {
            let on_intent = props.on_intent.clone();
            Callback::from(move |_: PointerEvent| {
                on_intent.emit(FlightIntent::JoystickButton {
                    button,
                    pressed: false,
                });
            })
        };
        html! {
            <button
                class="thrust-button"
                aria-label={label}
                onpointerdown={press}
                onpointerup={release.clone()}
                onpointercancel={release.clone()}
                onpointerleave={release}
            >
                <Icon data={icon} width="20px" height="20px" />
            </button>
        }
    };

    let (knob_x, knob_y) = *knob;
    let knob_style = format!(
        "width: {size}px; height: {size}px; transform: translate(calc(-50% + {knob_x:.1}px), calc(-50% + {knob_y:.1}px));",
        size = KNOB_RADIUS * 2.0,
    );
    let base_style = format!(
        "width: {size}px; height: {size}px;",
        size = (JOYSTICK_RADIUS + KNOB_RADIUS) * 2.0
    );

    html! {
        <div class="touch-controls">
            <div
                ref={base_ref}
                class="joystick-base"
                style={base_style}
                onpointerdown={on_pointer_down}
                onpointermove={on_pointer_move}
                onpointerup={on_pointer_up.clone()}
                onpointercancel={on_pointer_up}
            >
                <div class="joystick-knob" style={knob_style} />
            </div>
            <div class="thrust-buttons">
                { button(VerticalButton::Up, IconData::LUCIDE_ARROW_UP, "Ascend") }
                { button(VerticalButton::Down, IconData::LUCIDE_ARROW_DOWN, "Descend") }
            </div>
        </div>
    }
}

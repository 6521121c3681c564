//! DOM input capture for flight.
//!
//! Translates keyboard, pointer-lock mouse motion and focus loss into
//! [`FlightIntent`]s pushed to the scene's intent queue.

use gloo::events::{EventListener, EventListenerOptions};
use skyport_core::input::{FlightIntent, LogicalKey};
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, MouseEvent};
use yew::prelude::*;

use super::use_skyport::SkyportContext;

/// Check if the event target is an input element (input, textarea, etc.)
fn is_input_element(event: &KeyboardEvent) -> bool {
    if let Some(target) = event.target() {
        if let Some(element) = target.dyn_ref::<web_sys::HtmlElement>() {
            let tag_name = element.tag_name().to_lowercase();
            return matches!(tag_name.as_str(), "input" | "textarea" | "select");
        }
    }
    false
}

fn pointer_locked() -> bool {
    gloo::utils::document().pointer_lock_element().is_some()
}

/// Attaches flight listeners while `enabled` is true.
///
/// Clicking the canvas requests pointer lock; while locked, mouse motion
/// steers the ship. Leaving the window resets every held input.
#[hook]
pub fn use_flight_input(context: SkyportContext, canvas_id: AttrValue, enabled: bool) {
    let listeners_ref = use_mut_ref(Vec::<EventListener>::new);

    use_effect_with(
        (context, canvas_id, enabled),
        move |(context, canvas_id, enabled)| {
            listeners_ref.borrow_mut().clear();

            if !*enabled || !context.initialized {
                return;
            }

            let document = gloo::utils::document();
            let window = gloo::utils::window();
            let mut listeners = Vec::new();

            for (event_type, pressed) in [("keydown", true), ("keyup", false)] {
                let context = context.clone();
                let options = EventListenerOptions::enable_prevent_default();
                listeners.push(EventListener::new_with_options(
                    &document,
                    event_type,
                    options,
                    move |event| {
                        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        if is_input_element(event) || (pressed && event.repeat()) {
                            return;
                        }
                        let Some(key) = LogicalKey::from_key_name(&event.key()) else {
                            return;
                        };
                        // Space would otherwise scroll the page.
                        if key == LogicalKey::Ascend {
                            event.prevent_default();
                        }
                        context.push_intent(&FlightIntent::Key { key, pressed });
                    },
                ));
            }

            {
                let context = context.clone();
                listeners.push(EventListener::new(&document, "mousemove", move |event| {
                    if !pointer_locked() {
                        return;
                    }
                    if let Some(event) = event.dyn_ref::<MouseEvent>() {
                        #[allow(clippy::cast_precision_loss)]
                        let (dx, dy) = (event.movement_x() as f32, event.movement_y() as f32);
                        context.push_intent(&FlightIntent::MouseLook { dx, dy });
                    }
                }));
            }

            {
                let context = context.clone();
                listeners.push(EventListener::new(
                    &document,
                    "pointerlockchange",
                    move |_| {
                        context.push_intent(&FlightIntent::PointerLock {
                            locked: pointer_locked(),
                        });
                    },
                ));
            }

            {
                let context = context.clone();
                listeners.push(EventListener::new(&window, "blur", move |_| {
                    context.push_intent(&FlightIntent::Reset);
                }));
            }

            if let Some(canvas) = document.get_element_by_id(canvas_id) {
                let target = canvas.clone();
                listeners.push(EventListener::new(&target, "click", move |_| {
                    if !pointer_locked() {
                        canvas.request_pointer_lock();
                    }
                }));
            }

            *listeners_ref.borrow_mut() = listeners;
        },
    );
}

use gloo::events::EventListener;
use yew::prelude::*;

/// Narrow screens and coarse pointers get the touch joystick.
const PHONE_QUERY: &str = "(max-width: 768px), (pointer: coarse)";

fn matches_phone() -> bool {
    gloo::utils::window()
        .match_media(PHONE_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

/// Whether the touch controls should replace keyboard and mouse hints.
///
/// Re-evaluated on resize so rotating a tablet switches layouts.
#[hook]
pub fn use_phone_device() -> bool {
    let is_phone = use_state_eq(matches_phone);

    {
        let is_phone = is_phone.clone();
        use_effect_with((), move |_| {
            let listener = EventListener::new(&gloo::utils::window(), "resize", move |_| {
                is_phone.set(matches_phone());
            });
            move || drop(listener)
        });
    }

    *is_phone
}

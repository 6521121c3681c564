use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingScreenProps {
    pub pilot_name: AttrValue,
}

/// Shown between pilot selection and launch.
#[function_component(LoadingScreen)]
pub fn loading_screen(props: &LoadingScreenProps) -> Html {
    html! {
        <div class="loading-screen">
            <div class="loading-spinner" />
            <p>{ format!("Preparing launch for {}...", props.pilot_name) }</p>
        </div>
    }
}

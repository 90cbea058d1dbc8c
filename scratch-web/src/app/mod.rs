#[cfg(target_arch = "wasm32")]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

pub mod bootstrap;
pub mod handlers;
pub mod play;
pub mod state;
pub mod toasts;
pub mod view;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::config::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppInner />
        </BrowserRouter>
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(AppInner)]
pub fn app_inner() -> Html {
    let app_state = state::use_app_state();
    let navigator = use_navigator();
    let route = use_route::<Route>();
    let handlers = handlers::AppHandlers::new(&app_state, navigator);

    bootstrap::use_bootstrap(&app_state, &handlers);
    bootstrap::use_login_gate(&app_state, &handlers, route.as_ref());

    view::render_app(&app_state, &handlers, route.as_ref())
}

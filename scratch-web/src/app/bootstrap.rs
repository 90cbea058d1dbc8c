#[cfg(target_arch = "wasm32")]
use crate::app::handlers::AppHandlers;
#[cfg(target_arch = "wasm32")]
use crate::app::state::AppState;
#[cfg(target_arch = "wasm32")]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;

/// First-render work: load the catalogue and, when a login was restored,
/// re-read the profile so the balance is current and a dead token is dropped.
#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_bootstrap(app_state: &AppState, handlers: &AppHandlers) {
    let reload_cards = handlers.reload_cards.clone();
    let refresh_balance = handlers.refresh_balance.clone();
    let restored = app_state.signed_in();
    use_effect_with((), move |()| {
        reload_cards.emit(());
        if restored {
            log::debug!("restored login, refreshing profile");
            refresh_balance.emit(());
        }
        || {}
    });
}

/// Open the login dialog when a signed-out player lands on a page that needs one.
#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_login_gate(app_state: &AppState, handlers: &AppHandlers, route: Option<&Route>) {
    let needs_login = route.is_some_and(Route::requires_login) && !app_state.signed_in();
    let open_auth = handlers.open_auth.clone();
    use_effect_with(needs_login, move |needs_login| {
        if *needs_login {
            log::debug!("page needs a login, opening the dialog");
            open_auth.emit(crate::components::ui::auth_modal::AuthTab::Login);
        }
        || {}
    });
}

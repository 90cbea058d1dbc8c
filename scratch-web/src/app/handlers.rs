use crate::api::ApiClient;
use crate::app::state::{AppState, AuthAction, AuthState, Remote};
use crate::app::toasts::{ToastAction, ToastKind, ToastQueue};
use crate::components::ui::auth_modal::{AuthSubmission, AuthTab};
use crate::i18n::{t, tr};
use crate::router::Route;
use crate::scratch::{ApiError, AuthSession};
use std::collections::BTreeMap;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Navigator;

#[derive(Clone)]
pub struct AppHandlers {
    pub notify: Callback<(ToastKind, String)>,
    pub dismiss_toast: Callback<u32>,
    pub open_auth: Callback<AuthTab>,
    pub close_auth: Callback<()>,
    pub switch_auth_tab: Callback<AuthTab>,
    pub submit_auth: Callback<AuthSubmission>,
    pub logout: Callback<()>,
    pub refresh_balance: Callback<()>,
    pub api_failed: Callback<ApiError>,
    pub reload_cards: Callback<()>,
    pub go_home: Callback<()>,
    pub go_wallet: Callback<()>,
    pub open_card: Callback<AttrValue>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState, navigator: Option<Navigator>) -> Self {
        let notify = build_notify(&state.toasts);
        let open_auth = build_open_auth(state);
        Self {
            dismiss_toast: build_dismiss(&state.toasts),
            close_auth: build_close_auth(state),
            switch_auth_tab: build_switch_tab(state),
            submit_auth: build_submit_auth(state),
            logout: build_logout(state, &notify),
            refresh_balance: build_refresh_balance(state),
            api_failed: build_api_failed(state, &open_auth),
            reload_cards: build_reload_cards(state),
            go_home: build_navigate(navigator.clone(), Route::Home),
            go_wallet: build_navigate(navigator.clone(), Route::Wallet),
            open_card: build_open_card(navigator),
            notify,
            open_auth,
        }
    }
}

fn push_toast(toasts: &UseReducerHandle<ToastQueue>, kind: ToastKind, message: String) {
    if kind == ToastKind::Error {
        log::warn!("{message}");
    }
    toasts.dispatch(ToastAction::Push(kind, message));
}

fn push_failure(toasts: &UseReducerHandle<ToastQueue>, err: &ApiError) {
    log::warn!("api call failed: {err}");
    toasts.dispatch(ToastAction::failure(err));
}

fn build_notify(toasts: &UseReducerHandle<ToastQueue>) -> Callback<(ToastKind, String)> {
    let toasts = toasts.clone();
    Callback::from(move |(kind, message): (ToastKind, String)| {
        push_toast(&toasts, kind, message);
    })
}

fn build_dismiss(toasts: &UseReducerHandle<ToastQueue>) -> Callback<u32> {
    let toasts = toasts.clone();
    Callback::from(move |id: u32| toasts.dispatch(ToastAction::Dismiss(id)))
}

fn build_open_auth(state: &AppState) -> Callback<AuthTab> {
    let show = state.show_auth.clone();
    let tab = state.auth_tab.clone();
    let error = state.auth_error.clone();
    Callback::from(move |requested: AuthTab| {
        error.set(None);
        tab.set(requested);
        show.set(true);
    })
}

fn build_close_auth(state: &AppState) -> Callback<()> {
    let show = state.show_auth.clone();
    let busy = state.auth_busy.clone();
    Callback::from(move |()| {
        if !*busy {
            show.set(false);
        }
    })
}

fn build_switch_tab(state: &AppState) -> Callback<AuthTab> {
    let tab = state.auth_tab.clone();
    let error = state.auth_error.clone();
    Callback::from(move |next: AuthTab| {
        error.set(None);
        tab.set(next);
    })
}

/// Fetch the profile for `session` and fold it into the auth state.
fn spawn_profile_refresh(
    client: ApiClient,
    auth: UseReducerHandle<AuthState>,
    toasts: UseReducerHandle<ToastQueue>,
) {
    spawn_local(async move {
        match client.profile().await {
            Ok(profile) => auth.dispatch(AuthAction::Refresh(profile)),
            Err(err) => {
                push_failure(&toasts, &err);
                auth.dispatch(AuthAction::Failed(err));
            }
        }
    });
}

fn welcome_message(session: &AuthSession) -> String {
    let mut args = BTreeMap::new();
    args.insert("name", session.user.username.as_str());
    tr("auth.welcome", Some(&args))
}

fn build_submit_auth(state: &AppState) -> Callback<AuthSubmission> {
    let auth = state.auth.clone();
    let toasts = state.toasts.clone();
    let show = state.show_auth.clone();
    let busy = state.auth_busy.clone();
    let error = state.auth_error.clone();
    Callback::from(move |submission: AuthSubmission| {
        if *busy {
            return;
        }
        busy.set(true);
        error.set(None);
        let client = ApiClient::new(crate::config::endpoints(), None);
        let (auth, toasts, show, busy, error) = (
            auth.clone(),
            toasts.clone(),
            show.clone(),
            busy.clone(),
            error.clone(),
        );
        spawn_local(async move {
            let outcome = match &submission {
                AuthSubmission::Login(request) => client.login(request).await,
                AuthSubmission::Register(request) => client.register(request).await,
            };
            busy.set(false);
            match outcome {
                Ok(session) => {
                    push_toast(&toasts, ToastKind::Success, welcome_message(&session));
                    let authed =
                        ApiClient::new(client.endpoints().clone(), Some(session.bearer()));
                    auth.dispatch(AuthAction::SignIn(session));
                    show.set(false);
                    spawn_profile_refresh(authed, auth, toasts);
                }
                Err(err) => {
                    log::info!("authentication failed: {err}");
                    error.set(Some(AttrValue::from(err.to_string())));
                }
            }
        });
    })
}

fn build_logout(state: &AppState, notify: &Callback<(ToastKind, String)>) -> Callback<()> {
    let auth = state.auth.clone();
    let notify = notify.clone();
    Callback::from(move |()| {
        auth.dispatch(AuthAction::SignOut);
        notify.emit((ToastKind::Info, t("auth.logged_out")));
    })
}

fn build_refresh_balance(state: &AppState) -> Callback<()> {
    let auth = state.auth.clone();
    let toasts = state.toasts.clone();
    Callback::from(move |()| {
        let client = ApiClient::for_auth(auth.auth());
        if !client.is_authenticated() {
            return;
        }
        spawn_profile_refresh(client, auth.clone(), toasts.clone());
    })
}

fn build_api_failed(state: &AppState, open_auth: &Callback<AuthTab>) -> Callback<ApiError> {
    let auth = state.auth.clone();
    let toasts = state.toasts.clone();
    let open_auth = open_auth.clone();
    Callback::from(move |err: ApiError| {
        push_failure(&toasts, &err);
        if err.is_unauthorized() {
            open_auth.emit(AuthTab::Login);
        }
        auth.dispatch(AuthAction::Failed(err));
    })
}

fn build_reload_cards(state: &AppState) -> Callback<()> {
    let cards = state.cards.clone();
    let auth = state.auth.clone();
    let toasts = state.toasts.clone();
    Callback::from(move |()| {
        let client = ApiClient::for_auth(auth.auth());
        let cards = cards.clone();
        let toasts = toasts.clone();
        cards.set(Remote::Loading);
        spawn_local(async move {
            match client.cards().await {
                Ok(list) => cards.set(Remote::Ready(Rc::new(list))),
                Err(err) => {
                    cards.set(Remote::Failed(AttrValue::from(err.to_string())));
                    push_failure(&toasts, &err);
                }
            }
        });
    })
}

fn build_navigate(navigator: Option<Navigator>, route: Route) -> Callback<()> {
    Callback::from(move |()| {
        if let Some(nav) = navigator.as_ref() {
            nav.push(&route);
        }
    })
}

fn build_open_card(navigator: Option<Navigator>) -> Callback<AttrValue> {
    Callback::from(move |id: AttrValue| {
        if let Some(nav) = navigator.as_ref() {
            nav.push(&Route::play(&id));
        }
    })
}

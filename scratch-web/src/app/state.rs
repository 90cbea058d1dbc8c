use crate::app::toasts::ToastQueue;
use crate::components::ui::auth_modal::AuthTab;
use crate::scratch::{ApiError, AuthSession, Profile, ScratchCard, WebAuth, WebSessionStore};
use std::rc::Rc;
use yew::prelude::*;

/// Data fetched from the API, as seen by a view.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Remote<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(AttrValue),
}

impl<T> Remote<T> {
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Login state, reduced so async completions never act on a stale copy.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    auth: WebAuth,
}

pub enum AuthAction {
    SignIn(AuthSession),
    SignOut,
    Refresh(Profile),
    Failed(ApiError),
}

impl AuthState {
    #[must_use]
    pub fn restore() -> Self {
        Self {
            auth: WebAuth::restore(WebSessionStore),
        }
    }

    #[must_use]
    pub const fn auth(&self) -> &WebAuth {
        &self.auth
    }

    #[must_use]
    pub fn username(&self) -> Option<AttrValue> {
        self.auth
            .profile()
            .map(|profile| AttrValue::from(profile.username.clone()))
    }
}

impl Reducible for AuthState {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            AuthAction::SignIn(session) => next.auth.sign_in(session),
            AuthAction::SignOut => next.auth.sign_out(),
            AuthAction::Refresh(profile) => next.auth.update_profile(profile),
            AuthAction::Failed(err) => {
                if !next.auth.observe_error(&err) {
                    return self;
                }
                log::info!("login expired, stored session cleared");
            }
        }
        Rc::new(next)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth: UseReducerHandle<AuthState>,
    pub toasts: UseReducerHandle<ToastQueue>,
    pub cards: UseStateHandle<Remote<Rc<Vec<ScratchCard>>>>,
    pub show_auth: UseStateHandle<bool>,
    pub auth_tab: UseStateHandle<AuthTab>,
    pub auth_busy: UseStateHandle<bool>,
    pub auth_error: UseStateHandle<Option<AttrValue>>,
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        auth: use_reducer(AuthState::restore),
        toasts: use_reducer(ToastQueue::default),
        cards: use_state(Remote::default),
        show_auth: use_state(|| false),
        auth_tab: use_state(AuthTab::default),
        auth_busy: use_state(|| false),
        auth_error: use_state(|| None::<AttrValue>),
    }
}

impl AppState {
    #[must_use]
    pub fn signed_in(&self) -> bool {
        self.auth.auth().is_signed_in()
    }

    #[must_use]
    pub fn balance_cents(&self) -> Option<i64> {
        self.signed_in().then(|| self.auth.auth().balance_cents())
    }
}

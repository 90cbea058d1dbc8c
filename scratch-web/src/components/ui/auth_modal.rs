//! Login and registration dialog.
//!
//! Field checks run locally before anything is sent; the server still has
//! the final word and its message is shown verbatim through `error`.
use crate::components::modal::Modal;
use crate::components::ui::field::Field;
use crate::i18n::{t, tr};
use crate::scratch::{LoginRequest, RegisterRequest};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use thiserror::Error;
use yew::prelude::*;

/// Shortest password the form accepts.
pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

/// A validated request, ready for the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSubmission {
    Login(LoginRequest),
    Register(RegisterRequest),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthFormError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("password shorter than {MIN_PASSWORD_LEN} characters")]
    ShortPassword,
    #[error("missing username")]
    MissingUsername,
}

impl AuthFormError {
    /// Localized text for the form.
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Self::InvalidEmail => t("auth.invalid_email"),
            Self::ShortPassword => {
                let min = MIN_PASSWORD_LEN.to_string();
                let mut args = BTreeMap::new();
                args.insert("min", min.as_str());
                tr("auth.short_password", Some(&args))
            }
            Self::MissingUsername => t("auth.missing_username"),
        }
    }
}

#[must_use]
pub fn is_email_valid(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(email))
}

/// # Errors
///
/// Returns the first field that fails its check.
pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, AuthFormError> {
    let email = email.trim();
    if !is_email_valid(email) {
        return Err(AuthFormError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthFormError::ShortPassword);
    }
    Ok(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// # Errors
///
/// Returns the first field that fails its check, username first.
pub fn validate_register(
    username: &str,
    email: &str,
    password: &str,
) -> Result<RegisterRequest, AuthFormError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AuthFormError::MissingUsername);
    }
    let login = validate_login(email, password)?;
    Ok(RegisterRequest {
        username: username.to_string(),
        email: login.email,
        password: login.password,
    })
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub tab: AuthTab,
    #[prop_or_default]
    pub busy: bool,
    /// Server-side failure from the last attempt.
    #[prop_or_default]
    pub error: Option<AttrValue>,
    pub on_submit: Callback<AuthSubmission>,
    pub on_switch: Callback<AuthTab>,
    pub on_close: Callback<()>,
}

fn setter(handle: &UseStateHandle<String>) -> Callback<String> {
    let handle = handle.clone();
    Callback::from(move |value: String| handle.set(value))
}

#[function_component(AuthModal)]
pub fn auth_modal(props: &Props) -> Html {
    let username = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let local_error = use_state(|| None::<AuthFormError>);

    {
        let local_error = local_error.clone();
        use_effect_with(props.tab, move |_| {
            local_error.set(None);
            || {}
        });
    }

    let registering = props.tab == AuthTab::Register;
    let onsubmit = {
        let (username, email, password) = (username.clone(), email.clone(), password.clone());
        let local_error = local_error.clone();
        let on_submit = props.on_submit.clone();
        let busy = props.busy;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if busy {
                return;
            }
            let checked = if registering {
                validate_register(&username, &email, &password).map(AuthSubmission::Register)
            } else {
                validate_login(&email, &password).map(AuthSubmission::Login)
            };
            match checked {
                Ok(submission) => {
                    local_error.set(None);
                    on_submit.emit(submission);
                }
                Err(err) => local_error.set(Some(err)),
            }
        })
    };
    let tab_button = |tab: AuthTab, key: &str, id: &'static str| {
        let on_switch = props.on_switch.clone();
        let selected = props.tab == tab;
        html! {
            <button
                id={id}
                type="button"
                role="tab"
                aria-selected={selected.to_string()}
                class={classes!("tab", selected.then_some("tab--active"))}
                onclick={Callback::from(move |_: MouseEvent| on_switch.emit(tab))}
            >
                { t(key) }
            </button>
        }
    };

    let message = (*local_error)
        .map(AuthFormError::message)
        .map(AttrValue::from)
        .or_else(|| props.error.clone());
    let (title, submit) = if registering {
        (t("auth.title_register"), t("auth.submit_register"))
    } else {
        (t("auth.title_login"), t("auth.submit_login"))
    };

    html! {
        <Modal
            id="auth-modal"
            open={props.open}
            title={title}
            on_close={props.on_close.clone()}
            return_focus_id={Some(AttrValue::from("login-btn"))}
        >
            <div class="tabs" role="tablist">
                { tab_button(AuthTab::Login, "auth.tab_login", "auth-tab-login") }
                { tab_button(AuthTab::Register, "auth.tab_register", "auth-tab-register") }
            </div>
            <form class="auth-form" onsubmit={onsubmit} novalidate=true>
                if registering {
                    <Field
                        id="auth-username"
                        label={t("auth.username")}
                        value={(*username).clone()}
                        autocomplete={Some(AttrValue::from("username"))}
                        disabled={props.busy}
                        oninput={setter(&username)}
                    />
                }
                <Field
                    id="auth-email"
                    label={t("auth.email")}
                    input_type="email"
                    value={(*email).clone()}
                    autocomplete={Some(AttrValue::from("email"))}
                    disabled={props.busy}
                    oninput={setter(&email)}
                />
                <Field
                    id="auth-password"
                    label={t("auth.password")}
                    input_type="password"
                    value={(*password).clone()}
                    autocomplete={Some(AttrValue::from(if registering { "new-password" } else { "current-password" }))}
                    disabled={props.busy}
                    oninput={setter(&password)}
                />
                if let Some(text) = message {
                    <p class="form-error" role="alert">{ text }</p>
                }
                <button type="submit" class="btn-primary" disabled={props.busy}>
                    { if props.busy { t("auth.working") } else { submit } }
                </button>
            </form>
        </Modal>
    }
}

use crate::components::ui::auth_modal::AuthTab;
use crate::i18n::{fmt_money, t, tr};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Signed-in player's name; `None` renders the login button.
    #[prop_or_default]
    pub username: Option<AttrValue>,
    #[prop_or_default]
    pub balance_cents: Option<i64>,
    pub on_home: Callback<()>,
    pub on_wallet: Callback<()>,
    pub on_login: Callback<AuthTab>,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let go_home = {
        let cb = p.on_home.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let go_wallet = {
        let cb = p.on_wallet.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let login = {
        let cb = p.on_login.clone();
        Callback::from(move |_: MouseEvent| cb.emit(AuthTab::Login))
    };
    let register = {
        let cb = p.on_login.clone();
        Callback::from(move |_: MouseEvent| cb.emit(AuthTab::Register))
    };
    let logout = {
        let cb = p.on_logout.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let account = if let Some(name) = p.username.as_ref() {
        let amount = fmt_money(p.balance_cents.unwrap_or(0));
        let mut balance_args = BTreeMap::new();
        balance_args.insert("amount", amount.as_str());
        let mut greet_args = BTreeMap::new();
        greet_args.insert("name", name.as_str());
        html! {
            <>
                <span class="header__greeting">{ tr("header.greeting", Some(&greet_args)) }</span>
                <button id="balance-badge" type="button" class="header__balance" onclick={go_wallet}>
                    { tr("header.balance", Some(&balance_args)) }
                </button>
                <button id="logout-btn" type="button" onclick={logout}>{ t("header.logout") }</button>
            </>
        }
    } else {
        html! {
            <>
                <button id="login-btn" type="button" onclick={login}>{ t("header.login") }</button>
                <button id="register-btn" type="button" class="btn-secondary" onclick={register}>
                    { t("auth.tab_register") }
                </button>
            </>
        }
    };

    html! {
        <header role="banner" class="site-header">
            <a href="#main" class="sr-only">{ t("ui.skip_to_content") }</a>
            <div class="header-content">
                <button type="button" class="header__brand" onclick={go_home}>{ t("header.brand") }</button>
                <nav class="header-right" aria-label={t("header.wallet")}>{ account }</nav>
            </div>
        </header>
    }
}

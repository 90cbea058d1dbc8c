use crate::components::ui::wallet_form::{WalletForm, WalletMode, WalletSubmission};
use crate::i18n::{fmt_money, t, tr};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct WalletPageProps {
    pub signed_in: bool,
    pub balance_cents: i64,
    #[prop_or_default]
    pub busy: bool,
    pub on_submit: Callback<WalletSubmission>,
    pub on_login: Callback<()>,
}

#[function_component(WalletPage)]
pub fn wallet_page(props: &WalletPageProps) -> Html {
    if !props.signed_in {
        let login = {
            let cb = props.on_login.clone();
            Callback::from(move |_: MouseEvent| cb.emit(()))
        };
        return html! {
            <section class="panel wallet">
                <h1>{ t("wallet.title") }</h1>
                <p>{ t("wallet.login_required") }</p>
                <button type="button" class="btn-primary" onclick={login}>{ t("header.login") }</button>
            </section>
        };
    }

    let amount = fmt_money(props.balance_cents);
    let mut args = BTreeMap::new();
    args.insert("amount", amount.as_str());
    html! {
        <section class="panel wallet" aria-busy={props.busy.to_string()}>
            <h1>{ t("wallet.title") }</h1>
            <p class="wallet__balance">{ tr("wallet.balance", Some(&args)) }</p>
            <div class="wallet__forms">
                <WalletForm
                    mode={WalletMode::Deposit}
                    balance_cents={props.balance_cents}
                    busy={props.busy}
                    on_submit={props.on_submit.clone()}
                />
                <WalletForm
                    mode={WalletMode::Withdraw}
                    balance_cents={props.balance_cents}
                    busy={props.busy}
                    on_submit={props.on_submit.clone()}
                />
            </div>
        </section>
    }
}

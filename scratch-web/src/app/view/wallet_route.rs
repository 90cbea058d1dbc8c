use crate::api::ApiClient;
use crate::app::toasts::ToastKind;
use crate::components::ui::wallet_form::WalletSubmission;
use crate::i18n::{fmt_money, tr};
use crate::pages::wallet::WalletPage;
use crate::scratch::{ApiError, parse_cents};
use std::collections::BTreeMap;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct WalletRouteProps {
    #[prop_or_default]
    pub bearer: Option<AttrValue>,
    pub balance_cents: i64,
    pub on_login: Callback<()>,
    pub notify: Callback<(ToastKind, String)>,
    pub on_api_failed: Callback<ApiError>,
    pub on_refresh_balance: Callback<()>,
}

/// Toast text for an accepted wallet operation.
#[must_use]
pub fn receipt_message(submission: &WalletSubmission) -> String {
    let amount = parse_cents(submission.amount()).map_or_else(
        |_| submission.amount().to_string(),
        fmt_money,
    );
    let key = match submission {
        WalletSubmission::Deposit(_) => "wallet.deposit_done",
        WalletSubmission::Withdraw(_) => "wallet.withdraw_done",
    };
    let mut args = BTreeMap::new();
    args.insert("amount", amount.as_str());
    tr(key, Some(&args))
}

/// Container for `/wallet`: sends deposits and withdrawals, then re-reads the balance.
#[function_component(WalletRoute)]
pub fn wallet_route(props: &WalletRouteProps) -> Html {
    let busy = use_state(|| false);

    let on_submit = {
        let busy = busy.clone();
        let props = props.clone();
        Callback::from(move |submission: WalletSubmission| {
            if *busy {
                return;
            }
            let Some(bearer) = props.bearer.as_ref() else {
                props.on_login.emit(());
                return;
            };
            busy.set(true);
            let client = ApiClient::new(crate::config::endpoints(), Some(bearer.to_string()));
            let (busy, notify, failed, refresh) = (
                busy.clone(),
                props.notify.clone(),
                props.on_api_failed.clone(),
                props.on_refresh_balance.clone(),
            );
            spawn_local(async move {
                let outcome = match &submission {
                    WalletSubmission::Deposit(request) => client.deposit(request).await,
                    WalletSubmission::Withdraw(request) => client.withdraw(request).await,
                };
                busy.set(false);
                match outcome {
                    Ok(receipt) => {
                        log::info!("wallet receipt {} ({})", receipt.id, receipt.status);
                        if let Some(url) = receipt.checkout_url.as_deref() {
                            open_checkout(url);
                        }
                        notify.emit((ToastKind::Success, receipt_message(&submission)));
                        refresh.emit(());
                    }
                    Err(err) => failed.emit(err),
                }
            });
        })
    };

    html! {
        <WalletPage
            signed_in={props.bearer.is_some()}
            balance_cents={props.balance_cents}
            busy={*busy}
            on_submit={on_submit}
            on_login={props.on_login.clone()}
        />
    }
}

/// Send the browser to an external payment page.
fn open_checkout(url: &str) {
    #[cfg(target_arch = "wasm32")]
    if let Some(win) = web_sys::window()
        && let Err(err) = win.location().set_href(url)
    {
        log::warn!("could not open checkout: {err:?}");
    }
    #[cfg(not(target_arch = "wasm32"))]
    log::debug!("checkout at {url}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch::{DepositMethod, DepositRequest, WithdrawRequest};

    #[test]
    fn receipts_name_the_amount() {
        crate::i18n::set_lang("en");
        let deposit =
            WalletSubmission::Deposit(DepositRequest::new(2_500, DepositMethod::Card));
        assert_eq!(receipt_message(&deposit), "Deposit of $25.00 received.");
        let withdraw = WalletSubmission::Withdraw(WithdrawRequest::new(123_400, "acct").unwrap());
        assert_eq!(receipt_message(&withdraw), "Withdrawal of $1,234.00 requested.");
    }
}

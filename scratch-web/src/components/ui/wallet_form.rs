use crate::components::ui::field::Field;
use crate::i18n::{fmt_money, t, tr};
use crate::scratch::{
    AmountLimits, DepositMethod, DepositRequest, WalletError, WithdrawRequest, validate_amount,
    validate_withdrawal,
};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletMode {
    Deposit,
    Withdraw,
}

impl WalletMode {
    #[must_use]
    pub const fn limits(self) -> AmountLimits {
        match self {
            Self::Deposit => AmountLimits::DEPOSIT,
            Self::Withdraw => AmountLimits::WITHDRAWAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletSubmission {
    Deposit(DepositRequest),
    Withdraw(WithdrawRequest),
}

impl WalletSubmission {
    /// Amount in cents as sent to the server.
    #[must_use]
    pub fn amount(&self) -> &str {
        match self {
            Self::Deposit(request) => &request.amount,
            Self::Withdraw(request) => &request.amount,
        }
    }
}

/// Validate the form fields for `mode`.
///
/// # Errors
///
/// Returns the [`WalletError`] to show next to the form.
pub fn check_wallet_form(
    mode: WalletMode,
    amount: &str,
    method: DepositMethod,
    destination: &str,
    balance_cents: i64,
) -> Result<WalletSubmission, WalletError> {
    let limits = mode.limits();
    match mode {
        WalletMode::Deposit => {
            let cents = validate_amount(amount, limits.min_cents, limits.max_cents)?;
            Ok(WalletSubmission::Deposit(DepositRequest::new(cents, method)))
        }
        WalletMode::Withdraw => {
            let cents = validate_withdrawal(amount, limits, balance_cents)?;
            WithdrawRequest::new(cents, destination).map(WalletSubmission::Withdraw)
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub mode: WalletMode,
    pub balance_cents: i64,
    #[prop_or_default]
    pub busy: bool,
    pub on_submit: Callback<WalletSubmission>,
}

#[function_component(WalletForm)]
pub fn wallet_form(props: &Props) -> Html {
    let amount = use_state(String::new);
    let method = use_state(DepositMethod::default);
    let destination = use_state(String::new);
    let error = use_state(|| None::<WalletError>);
    let mode = props.mode;
    let prefix = match mode {
        WalletMode::Deposit => "deposit",
        WalletMode::Withdraw => "withdraw",
    };

    let onsubmit = {
        let (amount, method, destination, error) =
            (amount.clone(), method.clone(), destination.clone(), error.clone());
        let on_submit = props.on_submit.clone();
        let (balance, busy) = (props.balance_cents, props.busy);
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if busy {
                return;
            }
            match check_wallet_form(mode, &amount, *method, &destination, balance) {
                Ok(submission) => {
                    error.set(None);
                    amount.set(String::new());
                    on_submit.emit(submission);
                }
                Err(err) => error.set(Some(err)),
            }
        })
    };
    let on_amount = {
        let amount = amount.clone();
        Callback::from(move |value: String| amount.set(value))
    };
    let on_destination = {
        let destination = destination.clone();
        Callback::from(move |value: String| destination.set(value))
    };
    let on_method = {
        let method = method.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<web_sys::HtmlSelectElement>()
                && let Some(next) = DepositMethod::from_key(&select.value())
            {
                method.set(next);
            }
        })
    };

    let limits = mode.limits();
    let (min, max) = (fmt_money(limits.min_cents), fmt_money(limits.max_cents));
    let mut limit_args = BTreeMap::new();
    limit_args.insert("min", min.as_str());
    limit_args.insert("max", max.as_str());

    html! {
        <form id={format!("{prefix}-form")} class="wallet-form" onsubmit={onsubmit} novalidate=true>
            <h3>{ t(&format!("wallet.{prefix}")) }</h3>
            <Field
                id={format!("{prefix}-amount")}
                label={t("wallet.amount")}
                value={(*amount).clone()}
                inputmode={Some(AttrValue::from("decimal"))}
                disabled={props.busy}
                oninput={on_amount}
            />
            <p class="wallet-form__hint">{ tr("wallet.limits", Some(&limit_args)) }</p>
            if mode == WalletMode::Deposit {
                <label class="field" for="deposit-method">
                    <span class="field__label">{ t("wallet.method") }</span>
                    <select id="deposit-method" onchange={on_method} disabled={props.busy}>
                        { for DepositMethod::ALL.iter().map(|option| html! {
                            <option value={option.key()} selected={*option == *method}>
                                { t(&format!("wallet.methods.{}", option.key())) }
                            </option>
                        }) }
                    </select>
                </label>
            } else {
                <Field
                    id="withdraw-destination"
                    label={t("wallet.destination")}
                    value={(*destination).clone()}
                    disabled={props.busy}
                    oninput={on_destination}
                />
            }
            if let Some(err) = error.as_ref() {
                <p class="form-error" role="alert">{ err.to_string() }</p>
            }
            <button type="submit" class="btn-primary" disabled={props.busy}>
                { t(&format!("wallet.submit_{prefix}")) }
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_ignores_balance() {
        let submission =
            check_wallet_form(WalletMode::Deposit, "20", DepositMethod::Crypto, "", 0).unwrap();
        assert_eq!(
            submission,
            WalletSubmission::Deposit(DepositRequest::new(2_000, DepositMethod::Crypto))
        );
        assert_eq!(submission.amount(), "20.00");
    }

    #[test]
    fn withdrawal_needs_funds_and_destination() {
        assert_eq!(
            check_wallet_form(WalletMode::Withdraw, "30", DepositMethod::Card, "acct", 2_000),
            Err(WalletError::InsufficientBalance(2_000))
        );
        assert_eq!(
            check_wallet_form(WalletMode::Withdraw, "15", DepositMethod::Card, " ", 2_000),
            Err(WalletError::MissingDestination)
        );
        assert!(matches!(
            check_wallet_form(WalletMode::Withdraw, "15", DepositMethod::Card, "acct", 2_000),
            Ok(WalletSubmission::Withdraw(_))
        ));
    }
}

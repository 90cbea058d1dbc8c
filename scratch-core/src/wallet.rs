//! Deposit and withdrawal requests with client-side amount validation.
use crate::money::{MoneyError, format_decimal, parse_cents};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("enter an amount")]
    Empty,
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("invalid amount: {0}")]
    Malformed(MoneyError),
    #[error("amount must be at least {}", format_decimal(*.0))]
    BelowMinimum(i64),
    #[error("amount must be at most {}", format_decimal(*.0))]
    AboveMaximum(i64),
    #[error("amount exceeds your balance of {}", format_decimal(*.0))]
    InsufficientBalance(i64),
    #[error("enter a payout destination")]
    MissingDestination,
}

/// Inclusive bounds for a single wallet operation, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountLimits {
    pub min_cents: i64,
    pub max_cents: i64,
}

impl AmountLimits {
    pub const DEPOSIT: Self = Self {
        min_cents: 500,
        max_cents: 1_000_000,
    };
    pub const WITHDRAWAL: Self = Self {
        min_cents: 1_000,
        max_cents: 500_000,
    };
}

impl Default for AmountLimits {
    fn default() -> Self {
        Self::DEPOSIT
    }
}

/// Parse user input into cents and check it against `[min, max]`.
///
/// # Errors
///
/// Returns a [`WalletError`] for empty, malformed, non-positive or
/// out-of-range input.
pub fn validate_amount(input: &str, min_cents: i64, max_cents: i64) -> Result<i64, WalletError> {
    if input.trim().is_empty() {
        return Err(WalletError::Empty);
    }
    let cents = parse_cents(input).map_err(WalletError::Malformed)?;
    if cents <= 0 {
        return Err(WalletError::NotPositive);
    }
    if cents < min_cents {
        return Err(WalletError::BelowMinimum(min_cents));
    }
    if cents > max_cents {
        return Err(WalletError::AboveMaximum(max_cents));
    }
    Ok(cents)
}

/// Withdrawal validation: [`validate_amount`] plus a balance check.
///
/// # Errors
///
/// Returns [`WalletError::InsufficientBalance`] when the amount exceeds
/// `balance_cents`, or any error from [`validate_amount`].
pub fn validate_withdrawal(
    input: &str,
    limits: AmountLimits,
    balance_cents: i64,
) -> Result<i64, WalletError> {
    let cents = validate_amount(input, limits.min_cents, limits.max_cents)?;
    if cents > balance_cents {
        return Err(WalletError::InsufficientBalance(balance_cents));
    }
    Ok(cents)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositMethod {
    #[default]
    Card,
    BankTransfer,
    Crypto,
}

impl DepositMethod {
    pub const ALL: [Self; 3] = [Self::Card, Self::BankTransfer, Self::Crypto];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::BankTransfer => "bank_transfer",
            Self::Crypto => "crypto",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.key() == key)
    }
}

/// Body of `POST /wallet/deposits`. Amounts go over the wire as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRequest {
    pub amount: String,
    pub method: DepositMethod,
}

impl DepositRequest {
    #[must_use]
    pub fn new(amount_cents: i64, method: DepositMethod) -> Self {
        Self {
            amount: format_decimal(amount_cents),
            method,
        }
    }
}

/// Body of `POST /wallet/withdrawals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub amount: String,
    pub destination: String,
}

impl WithdrawRequest {
    /// # Errors
    ///
    /// Returns [`WalletError::MissingDestination`] for a blank destination.
    pub fn new(amount_cents: i64, destination: &str) -> Result<Self, WalletError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(WalletError::MissingDestination);
        }
        Ok(Self {
            amount: format_decimal(amount_cents),
            destination: destination.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_rules() {
        assert_eq!(validate_amount("  ", 100, 1_000), Err(WalletError::Empty));
        assert_eq!(validate_amount("0", 100, 1_000), Err(WalletError::NotPositive));
        assert_eq!(validate_amount("-4", 100, 1_000), Err(WalletError::NotPositive));
        assert!(matches!(
            validate_amount("ten", 100, 1_000),
            Err(WalletError::Malformed(_))
        ));
        assert_eq!(
            validate_amount("0.50", 100, 1_000),
            Err(WalletError::BelowMinimum(100))
        );
        assert_eq!(
            validate_amount("10.01", 100, 1_000),
            Err(WalletError::AboveMaximum(1_000))
        );
        assert_eq!(validate_amount("10", 100, 1_000), Ok(1_000));
    }

    #[test]
    fn withdrawal_respects_balance() {
        let limits = AmountLimits::WITHDRAWAL;
        assert_eq!(validate_withdrawal("25", limits, 5_000), Ok(2_500));
        let err = validate_withdrawal("60", limits, 5_000).unwrap_err();
        assert_eq!(err, WalletError::InsufficientBalance(5_000));
        assert_eq!(err.to_string(), "amount exceeds your balance of 50.00");
    }

    #[test]
    fn request_bodies_serialize_amounts_as_strings() {
        let deposit = DepositRequest::new(2_050, DepositMethod::BankTransfer);
        let json = serde_json::to_value(&deposit).unwrap();
        assert_eq!(json["amount"], "20.50");
        assert_eq!(json["method"], "bank_transfer");

        assert_eq!(
            WithdrawRequest::new(100, "   "),
            Err(WalletError::MissingDestination)
        );
        let withdraw = WithdrawRequest::new(100, " IBAN123 ").unwrap();
        assert_eq!(withdraw.destination, "IBAN123");
        assert_eq!(DepositMethod::from_key("crypto"), Some(DepositMethod::Crypto));
    }
}

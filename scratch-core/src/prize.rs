//! Prize catalog and play results as delivered by the platform API.
use crate::money::{MoneyError, parse_cents, parse_cents_opt};
use serde::{Deserialize, Serialize};

/// Whether a prize pays out cash or a physical product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrizeKind {
    Money,
    Product,
}

/// One configured reward tier of a scratch card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PrizeKind,
    /// Decimal string; product prizes may omit it.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub redemption_value: Option<String>,
    #[serde(default)]
    pub image_url: String,
}

impl Prize {
    /// Shorthand for a money prize, used by fixtures and tooling.
    #[must_use]
    pub fn money(id: &str, value: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("{value} prize"),
            kind: PrizeKind::Money,
            value: Some(value.to_string()),
            product_name: None,
            redemption_value: None,
            image_url: String::new(),
        }
    }

    /// Value shown on a cell: `value` first, then `redemption_value`.
    #[must_use]
    pub fn display_cents(&self) -> Option<i64> {
        parse_cents_opt(self.value.as_deref())
            .or_else(|| parse_cents_opt(self.redemption_value.as_deref()))
    }

    /// Human label: the product name for product prizes, otherwise the prize name.
    #[must_use]
    pub fn label(&self) -> &str {
        match (self.kind, self.product_name.as_deref()) {
            (PrizeKind::Product, Some(product)) if !product.is_empty() => product,
            _ => &self.name,
        }
    }
}

/// A purchasable scratch card with its prize catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScratchCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub prizes: Vec<Prize>,
}

impl ScratchCard {
    /// Ticket price in cents.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError`] if the API sent an unparsable price.
    pub fn price_cents(&self) -> Result<i64, MoneyError> {
        parse_cents(&self.price)
    }

    /// Largest prize value in the catalog, used for the "win up to" banner.
    #[must_use]
    pub fn top_prize_cents(&self) -> Option<i64> {
        self.prizes.iter().filter_map(Prize::display_cents).max()
    }
}

/// Authoritative outcome of one play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    #[serde(rename = "isWinner")]
    pub is_winner: bool,
    #[serde(rename = "amountWon", default)]
    pub amount_won: String,
    #[serde(default)]
    pub prize: Option<Prize>,
}

impl GameResult {
    #[must_use]
    pub fn losing() -> Self {
        Self {
            is_winner: false,
            amount_won: String::from("0"),
            prize: None,
        }
    }

    #[must_use]
    pub fn winning(prize: Prize) -> Self {
        let amount_won = prize
            .value
            .clone()
            .or_else(|| prize.redemption_value.clone())
            .unwrap_or_else(|| String::from("0"));
        Self {
            is_winner: true,
            amount_won,
            prize: Some(prize),
        }
    }

    /// The prize to render as a triple, if this result is a win.
    #[must_use]
    pub fn winning_prize(&self) -> Option<&Prize> {
        self.prize.as_ref().filter(|_| self.is_winner)
    }

    /// Value the winning triple must carry.
    ///
    /// Falls back from the prize value to its redemption value, then to
    /// `amountWon`, so a win is always shown with the authoritative amount.
    #[must_use]
    pub fn winning_cents(&self) -> Option<i64> {
        self.winning_prize().map(|prize| {
            prize
                .display_cents()
                .or_else(|| parse_cents_opt(Some(&self.amount_won)))
                .unwrap_or(0)
        })
    }

    /// Amount credited to the player, zero when absent or unparsable.
    #[must_use]
    pub fn amount_won_cents(&self) -> i64 {
        parse_cents_opt(Some(&self.amount_won)).unwrap_or(0)
    }
}

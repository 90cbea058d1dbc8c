use crate::i18n::{fmt_money, t, tr};
use crate::scratch::{GameResult, PrizeKind, TripleReport};
use std::collections::BTreeMap;
use yew::prelude::*;

/// Headline for a finished round. Always taken from the server result.
#[must_use]
pub fn outcome_text(result: &GameResult) -> String {
    if !result.is_winner {
        return t("play.lose");
    }
    match result.prize.as_ref() {
        Some(prize) if prize.kind == PrizeKind::Product => {
            let mut args = BTreeMap::new();
            args.insert("prize", prize.label());
            tr("play.win_prize", Some(&args))
        }
        _ => {
            let amount = fmt_money(result.amount_won_cents());
            let mut args = BTreeMap::new();
            args.insert("amount", amount.as_str());
            tr("play.win", Some(&args))
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub result: GameResult,
    /// What the grid shows; only decides whether to celebrate.
    #[prop_or_default]
    pub celebration: Option<TripleReport>,
}

#[function_component(ResultBanner)]
pub fn result_banner(props: &Props) -> Html {
    let celebrate = props.result.is_winner && props.celebration.is_some_and(|report| report.won);
    let class = classes!(
        "result-banner",
        if props.result.is_winner { "result-banner--win" } else { "result-banner--lose" },
        celebrate.then_some("celebrate"),
    );
    html! {
        <div class={class} role="status">
            <p class="result-banner__text">{ outcome_text(&props.result) }</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch::Prize;

    #[test]
    fn product_wins_name_the_product() {
        crate::i18n::set_lang("en");
        let mut prize = Prize::money("p", "0");
        prize.kind = PrizeKind::Product;
        prize.value = None;
        prize.product_name = Some(String::from("Mountain bike"));
        prize.redemption_value = Some(String::from("450.00"));
        assert_eq!(
            outcome_text(&GameResult::winning(prize)),
            "You won Mountain bike!"
        );
    }

    #[test]
    fn money_and_losses() {
        crate::i18n::set_lang("en");
        let win = GameResult::winning(Prize::money("m", "1250"));
        assert_eq!(outcome_text(&win), "You won $1,250.00!");
        assert_eq!(
            outcome_text(&GameResult::losing()),
            "No match this time. Better luck next card!"
        );
    }
}

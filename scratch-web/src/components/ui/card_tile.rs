use crate::config::icon_src;
use crate::i18n::{fmt_money, t, tr};
use crate::scratch::ScratchCard;
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub card: Rc<ScratchCard>,
    pub on_open: Callback<AttrValue>,
}

fn money_line(key: &str, cents: i64) -> String {
    let amount = fmt_money(cents);
    let mut args = BTreeMap::new();
    args.insert("amount", amount.as_str());
    tr(key, Some(&args))
}

#[function_component(CardTile)]
pub fn card_tile(props: &Props) -> Html {
    let card = &props.card;
    let open = {
        let id = AttrValue::from(card.id.clone());
        let cb = props.on_open.clone();
        Callback::from(move |_: MouseEvent| cb.emit(id.clone()))
    };
    let price = card
        .price_cents()
        .map_or_else(|_| card.price.clone(), |cents| money_line("home.price", cents));
    html! {
        <article class="card-tile" aria-labelledby={format!("card-{}-name", card.id)}>
            if let Some(image) = card.image_url.as_deref() {
                <img class="card-tile__image" src={icon_src(image)} alt="" />
            }
            <h3 id={format!("card-{}-name", card.id)}>{ card.name.clone() }</h3>
            if let Some(text) = card.description.as_deref() {
                <p class="card-tile__description">{ text.to_string() }</p>
            }
            <p class="card-tile__price">{ price }</p>
            if let Some(top) = card.top_prize_cents() {
                <p class="card-tile__top">{ money_line("home.top_prize", top) }</p>
            }
            <button type="button" class="btn-primary" onclick={open}>{ t("home.play") }</button>
        </article>
    }
}

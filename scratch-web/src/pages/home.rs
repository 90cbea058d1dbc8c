use crate::app::state::Remote;
use crate::components::ui::card_tile::CardTile;
use crate::i18n::{t, tr};
use crate::scratch::ScratchCard;
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HomePageProps {
    pub cards: Remote<Rc<Vec<ScratchCard>>>,
    pub on_open: Callback<AttrValue>,
    pub on_retry: Callback<()>,
}

#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    let body = match &props.cards {
        Remote::Loading => html! { <p class="loading" aria-busy="true">{ t("ui.loading") }</p> },
        Remote::Failed(reason) => {
            let retry = {
                let cb = props.on_retry.clone();
                Callback::from(move |_: MouseEvent| cb.emit(()))
            };
            let mut args = BTreeMap::new();
            args.insert("reason", reason.as_str());
            html! {
                <div class="error-panel" role="alert">
                    <p>{ tr("home.error", Some(&args)) }</p>
                    <button type="button" onclick={retry}>{ t("ui.retry") }</button>
                </div>
            }
        }
        Remote::Ready(cards) if cards.is_empty() => html! { <p class="empty">{ t("home.empty") }</p> },
        Remote::Ready(cards) => html! {
            <div class="card-list">
                { for cards.iter().map(|card| html! {
                    <CardTile
                        key={card.id.clone()}
                        card={Rc::new(card.clone())}
                        on_open={props.on_open.clone()}
                    />
                }) }
            </div>
        },
    };

    html! {
        <section class="panel home" aria-labelledby="home-title">
            <h1 id="home-title">{ t("home.title") }</h1>
            <p class="home__subtitle">{ t("home.subtitle") }</p>
            { body }
        </section>
    }
}

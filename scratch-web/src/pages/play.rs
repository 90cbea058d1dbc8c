//! Play screen: buy a round, scratch the grid, see the outcome.
use crate::app::state::Remote;
use crate::components::ui::result_banner::ResultBanner;
use crate::components::ui::scratch_grid::{ScratchGrid, cell_views};
use crate::i18n::{fmt_count, fmt_money, t, tr};
use crate::scratch::{PlaySession, PlayState, ScratchCard};
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PlayPageProps {
    pub card: Remote<Rc<ScratchCard>>,
    pub session: PlaySession,
    pub signed_in: bool,
    pub on_play: Callback<()>,
    pub on_reveal: Callback<usize>,
    pub on_reveal_all: Callback<()>,
    pub on_play_again: Callback<()>,
    pub on_back: Callback<()>,
    pub on_login: Callback<()>,
    #[prop_or_default]
    pub on_retry: Callback<()>,
}

fn emit_on_click(cb: &Callback<()>) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |_: MouseEvent| cb.emit(()))
}

fn prize_list(card: &ScratchCard) -> Html {
    if card.prizes.is_empty() {
        return Html::default();
    }
    html! {
        <section class="prize-list" aria-labelledby="prizes-title">
            <h2 id="prizes-title">{ t("play.prizes") }</h2>
            <ul>
                { for card.prizes.iter().map(|prize| html! {
                    <li key={prize.id.clone()}>
                        <span class="prize__name">{ prize.label().to_string() }</span>
                        if let Some(cents) = prize.display_cents() {
                            <span class="prize__value">{ fmt_money(cents) }</span>
                        }
                    </li>
                }) }
            </ul>
        </section>
    }
}

fn round(props: &PlayPageProps, card: &ScratchCard) -> Html {
    let session = &props.session;
    if !props.signed_in {
        return html! {
            <div class="play__gate">
                <p>{ t("play.login_required") }</p>
                <button type="button" class="btn-primary" onclick={emit_on_click(&props.on_login)}>
                    { t("header.login") }
                </button>
            </div>
        };
    }
    match session.state() {
        PlayState::Idle => {
            let price = card.price_cents().map_or_else(|_| card.price.clone(), fmt_money);
            let mut args = BTreeMap::new();
            args.insert("amount", price.as_str());
            html! {
                <div class="play__start">
                    if let Some(notice) = session.notice() {
                        <p class="form-error" role="alert">{ notice.clone() }</p>
                    }
                    <button
                        id="play-btn"
                        type="button"
                        class="btn-primary"
                        disabled={!session.can_play()}
                        onclick={emit_on_click(&props.on_play)}
                    >
                        { tr("play.play", Some(&args)) }
                    </button>
                </div>
            }
        }
        PlayState::Loading => html! {
            <p class="loading" aria-busy="true">{ t("play.requesting") }</p>
        },
        PlayState::Playing | PlayState::Completed => {
            let completed = session.state() == PlayState::Completed;
            html! {
                <div class="play__round">
                    <p class="play__progress">{ fmt_count("play.progress", session.revealed_count()) }</p>
                    <ScratchGrid
                        cells={cell_views(session)}
                        on_reveal={props.on_reveal.clone()}
                        disabled={completed}
                    />
                    if completed {
                        if let Some(result) = session.result() {
                            <ResultBanner result={result.clone()} celebration={session.celebration().copied()} />
                        }
                        <button id="play-again-btn" type="button" class="btn-primary" onclick={emit_on_click(&props.on_play_again)}>
                            { t("play.play_again") }
                        </button>
                    } else {
                        <button id="reveal-all-btn" type="button" onclick={emit_on_click(&props.on_reveal_all)}>
                            { t("play.reveal_all") }
                        </button>
                    }
                </div>
            }
        }
    }
}

#[function_component(PlayPage)]
pub fn play_page(props: &PlayPageProps) -> Html {
    let body = match &props.card {
        Remote::Loading => html! { <p class="loading" aria-busy="true">{ t("play.loading_card") }</p> },
        Remote::Failed(reason) => {
            let mut args = BTreeMap::new();
            args.insert("reason", reason.as_str());
            html! {
                <div class="error-panel" role="alert">
                    <p>{ tr("play.card_error", Some(&args)) }</p>
                    <button type="button" onclick={emit_on_click(&props.on_retry)}>{ t("ui.retry") }</button>
                </div>
            }
        }
        Remote::Ready(card) => html! {
            <>
                <h1>{ card.name.clone() }</h1>
                if let Some(text) = card.description.as_deref() {
                    <p class="play__description">{ text.to_string() }</p>
                }
                { round(props, card) }
                { prize_list(card) }
            </>
        },
    };
    html! {
        <section class="panel play">
            { body }
            <button type="button" class="btn-link" onclick={emit_on_click(&props.on_back)}>{ t("play.back") }</button>
        </section>
    }
}

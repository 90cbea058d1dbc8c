use crate::a11y::announce;
use crate::api::ApiClient;
use crate::app::play::{PlayAction, PlayScreen};
use crate::app::state::Remote;
use crate::components::ui::result_banner::outcome_text;
use crate::pages::play::PlayPage;
use crate::scratch::{ApiError, PlayState, ScratchCard};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PlayRouteProps {
    pub id: AttrValue,
    #[prop_or_default]
    pub bearer: Option<AttrValue>,
    pub on_login: Callback<()>,
    pub on_back: Callback<()>,
    pub on_api_failed: Callback<ApiError>,
    pub on_refresh_balance: Callback<()>,
}

fn client(bearer: Option<&AttrValue>) -> ApiClient {
    ApiClient::new(
        crate::config::endpoints(),
        bearer.map(|b| b.as_str().to_string()),
    )
}

/// Load `id` into `card`.
fn spawn_card_fetch(
    client: ApiClient,
    id: AttrValue,
    card: UseStateHandle<Remote<Rc<ScratchCard>>>,
    on_api_failed: Callback<ApiError>,
) {
    card.set(Remote::Loading);
    spawn_local(async move {
        match client.card(&id).await {
            Ok(found) => card.set(Remote::Ready(Rc::new(found))),
            Err(err) => {
                log::warn!("card {id} failed to load: {err}");
                card.set(Remote::Failed(AttrValue::from(err.to_string())));
                on_api_failed.emit(err);
            }
        }
    });
}

struct RoundContext {
    client: ApiClient,
    card: Rc<ScratchCard>,
    screen: UseReducerHandle<PlayScreen>,
    in_flight: Rc<RefCell<bool>>,
    on_api_failed: Callback<ApiError>,
}

/// Ask the server for a result and build the grid from it.
///
/// `opening` moves the session into `Loading`; the request is only sent once
/// that transition was accepted.
fn start_round(ctx: RoundContext, opening: PlayAction) {
    if *ctx.in_flight.borrow() || !ctx.screen.session().can_play() {
        log::debug!("play ignored, a round is already running");
        return;
    }
    *ctx.in_flight.borrow_mut() = true;
    ctx.screen.dispatch(opening);
    spawn_local(async move {
        let outcome = ctx.client.play(&ctx.card.id).await;
        *ctx.in_flight.borrow_mut() = false;
        match outcome {
            Ok(result) => {
                log::info!(
                    "card {} played: winner={} amount={}",
                    ctx.card.id,
                    result.is_winner,
                    result.amount_won
                );
                ctx.screen.dispatch(PlayAction::Resolve {
                    result,
                    card: ctx.card,
                    seed: rand::random(),
                });
            }
            Err(err) => {
                ctx.screen.dispatch(PlayAction::Fail(err.to_string()));
                ctx.on_api_failed.emit(err);
            }
        }
    });
}

/// Container for `/play/:id`: owns the card fetch and the round reducer.
#[function_component(PlayRoute)]
pub fn play_route(props: &PlayRouteProps) -> Html {
    let card = use_state(Remote::<Rc<ScratchCard>>::default);
    let screen = use_reducer(PlayScreen::default);
    let in_flight = use_mut_ref(|| false);

    {
        let card = card.clone();
        let screen = screen.clone();
        let bearer = props.bearer.clone();
        let on_api_failed = props.on_api_failed.clone();
        use_effect_with(props.id.clone(), move |id| {
            screen.dispatch(PlayAction::Reset);
            spawn_card_fetch(client(bearer.as_ref()), id.clone(), card, on_api_failed);
            || {}
        });
    }
    {
        let refresh = props.on_refresh_balance.clone();
        use_effect_with(screen.refresh_ticket(), move |ticket| {
            if *ticket > 0 {
                refresh.emit(());
            }
            || {}
        });
    }
    {
        let completed = screen.session().state() == PlayState::Completed;
        let result = screen.session().result().cloned();
        use_effect_with(completed, move |done| {
            if *done && let Some(result) = result.as_ref() {
                announce(&outcome_text(result));
            }
            || {}
        });
    }

    let round_callback = |opening: fn() -> PlayAction| {
        let card = card.clone();
        let screen = screen.clone();
        let in_flight = in_flight.clone();
        let bearer = props.bearer.clone();
        let on_api_failed = props.on_api_failed.clone();
        Callback::from(move |()| {
            let Some(ready) = card.ready().cloned() else {
                return;
            };
            let ctx = RoundContext {
                client: client(bearer.as_ref()),
                card: ready,
                screen: screen.clone(),
                in_flight: in_flight.clone(),
                on_api_failed: on_api_failed.clone(),
            };
            start_round(ctx, opening());
        })
    };
    let on_play = round_callback(|| PlayAction::Request);
    let on_play_again = round_callback(|| PlayAction::PlayAgain);

    let on_reveal = {
        let screen = screen.clone();
        Callback::from(move |cell: usize| screen.dispatch(PlayAction::Reveal(cell)))
    };
    let on_reveal_all = {
        let screen = screen.clone();
        Callback::from(move |()| screen.dispatch(PlayAction::RevealAll))
    };
    let on_retry = {
        let card = card.clone();
        let id = props.id.clone();
        let bearer = props.bearer.clone();
        let on_api_failed = props.on_api_failed.clone();
        Callback::from(move |()| {
            spawn_card_fetch(
                client(bearer.as_ref()),
                id.clone(),
                card.clone(),
                on_api_failed.clone(),
            );
        })
    };

    html! {
        <PlayPage
            card={(*card).clone()}
            session={screen.session().clone()}
            signed_in={props.bearer.is_some()}
            on_play={on_play}
            on_reveal={on_reveal}
            on_reveal_all={on_reveal_all}
            on_play_again={on_play_again}
            on_back={props.on_back.clone()}
            on_login={props.on_login.clone()}
            on_retry={on_retry}
        />
    }
}

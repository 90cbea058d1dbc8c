use futures::executor::block_on;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use scratch_web::app::state::Remote;
use scratch_web::pages::{
    home::{HomePage, HomePageProps},
    not_found::{NotFound, Props as NotFoundProps},
    play::{PlayPage, PlayPageProps},
    wallet::{WalletPage, WalletPageProps},
};
use scratch_web::scratch::{GameResult, PlaySession, Prize, PrizeKind, ScratchCard};
use std::rc::Rc;
use yew::{AttrValue, Callback, LocalServerRenderer};

fn card() -> ScratchCard {
    let mut bike = Prize::money("p3", "0");
    bike.kind = PrizeKind::Product;
    bike.value = None;
    bike.product_name = Some(String::from("Mountain bike"));
    bike.redemption_value = Some(String::from("450"));
    ScratchCard {
        id: String::from("lucky-7"),
        name: String::from("Lucky Seven"),
        description: Some(String::from("Match three sevens.")),
        price: String::from("2.50"),
        image_url: None,
        prizes: vec![Prize::money("p1", "1000"), Prize::money("p2", "5"), bike],
    }
}

fn play_props(session: PlaySession, signed_in: bool) -> PlayPageProps {
    PlayPageProps {
        card: Remote::Ready(Rc::new(card())),
        session,
        signed_in,
        on_play: Callback::noop(),
        on_reveal: Callback::noop(),
        on_reveal_all: Callback::noop(),
        on_play_again: Callback::noop(),
        on_back: Callback::noop(),
        on_login: Callback::noop(),
        on_retry: Callback::noop(),
    }
}

fn render_play(props: PlayPageProps) -> String {
    block_on(LocalServerRenderer::<PlayPage>::with_props(props).render())
}

#[test]
fn home_lists_cards_with_price_and_top_prize() {
    scratch_web::i18n::set_lang("en");
    let props = HomePageProps {
        cards: Remote::Ready(Rc::new(vec![card()])),
        on_open: Callback::noop(),
        on_retry: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<HomePage>::with_props(props).render());
    assert!(html.contains("Lucky Seven"));
    assert!(html.contains("Price: $2.50"));
    assert!(html.contains("Win up to $1,000.00"));
}

#[test]
fn home_reports_loading_empty_and_failure() {
    scratch_web::i18n::set_lang("en");
    let render = |cards| {
        let props = HomePageProps {
            cards,
            on_open: Callback::noop(),
            on_retry: Callback::noop(),
        };
        block_on(LocalServerRenderer::<HomePage>::with_props(props).render())
    };
    assert!(render(Remote::Loading).contains("Loading"));
    assert!(render(Remote::Ready(Rc::new(Vec::new()))).contains("No scratch cards"));
    let failed = render(Remote::Failed(AttrValue::from("network error: offline")));
    assert!(failed.contains("Could not load scratch cards: network error: offline"));
    assert!(failed.contains("Try again"));
}

#[test]
fn play_page_gates_signed_out_players() {
    scratch_web::i18n::set_lang("en");
    let html = render_play(play_props(PlaySession::new(), false));
    assert!(html.contains("Log in to play."));
    assert!(!html.contains("play-btn"));
    assert!(html.contains("Mountain bike"));
}

#[test]
fn idle_play_page_offers_the_round_and_shows_notices() {
    scratch_web::i18n::set_lang("en");
    let html = render_play(play_props(PlaySession::new(), true));
    assert!(html.contains("Play for $2.50"));

    let mut session = PlaySession::new();
    session.request_play().unwrap();
    let loading = render_play(play_props(session.clone(), true));
    assert!(loading.contains("Requesting your card"));

    session.fail("Insufficient balance");
    let html = render_play(play_props(session, true));
    assert!(html.contains("Insufficient balance"));
    assert!(html.contains("play-btn"));
}

#[test]
fn completed_round_shows_outcome_and_play_again() {
    scratch_web::i18n::set_lang("en");
    let card = card();
    let mut session = PlaySession::new();
    session.request_play().unwrap();
    session
        .resolve(
            GameResult::winning(card.prizes[0].clone()),
            &card.prizes,
            &mut ChaCha20Rng::seed_from_u64(21),
        )
        .unwrap();
    let playing = render_play(play_props(session.clone(), true));
    assert!(playing.contains("Tap a cell to scratch it"));
    assert!(playing.contains("reveal-all-btn"));

    session.reveal_all().unwrap();
    let done = render_play(play_props(session, true));
    assert!(done.contains("9 of 9 cells revealed"));
    assert!(done.contains("You won $1,000.00!"));
    assert!(done.contains("play-again-btn"));
    assert_eq!(done.matches("cell--winning").count(), 3);
}

#[test]
fn wallet_page_renders_both_forms() {
    scratch_web::i18n::set_lang("en");
    let props = WalletPageProps {
        signed_in: true,
        balance_cents: 4_250,
        busy: false,
        on_submit: Callback::noop(),
        on_login: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<WalletPage>::with_props(props).render());
    assert!(html.contains("Current balance: $42.50"));
    assert!(html.contains("deposit-form"));
    assert!(html.contains("withdraw-form"));
    assert!(html.contains("Bank transfer"));
    assert!(html.contains("Between $5.00 and $10,000.00."));
}

#[test]
fn wallet_page_asks_for_login() {
    scratch_web::i18n::set_lang("en");
    let props = WalletPageProps {
        signed_in: false,
        balance_cents: 0,
        busy: false,
        on_submit: Callback::noop(),
        on_login: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<WalletPage>::with_props(props).render());
    assert!(html.contains("Log in to manage your wallet."));
    assert!(!html.contains("deposit-form"));
}

#[test]
fn not_found_offers_a_way_home() {
    scratch_web::i18n::set_lang("en");
    let props = NotFoundProps {
        on_go_home: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NotFound>::with_props(props).render());
    assert!(html.contains("Page not found"));
    assert!(html.contains("Back to cards"));
}

mod play_route;
mod wallet_route;

pub use play_route::PlayRoute;
pub use wallet_route::{WalletRoute, receipt_message};

use crate::app::handlers::AppHandlers;
use crate::app::state::AppState;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::toast::Toasts;
use crate::components::ui::auth_modal::{AuthModal, AuthTab};
use crate::pages::home::HomePage;
use crate::pages::not_found::NotFound;
use crate::router::Route;
use yew::prelude::*;

fn open_login(handlers: &AppHandlers) -> Callback<()> {
    let open = handlers.open_auth.clone();
    Callback::from(move |()| open.emit(AuthTab::Login))
}

fn render_main_view(state: &AppState, handlers: &AppHandlers, route: Option<&Route>) -> Html {
    let bearer = state.auth.auth().bearer().map(AttrValue::from);
    match route {
        Some(Route::Home) => html! {
            <HomePage
                cards={(*state.cards).clone()}
                on_open={handlers.open_card.clone()}
                on_retry={handlers.reload_cards.clone()}
            />
        },
        Some(Route::Play { id }) => html! {
            <PlayRoute
                id={AttrValue::from(id.clone())}
                bearer={bearer}
                on_login={open_login(handlers)}
                on_back={handlers.go_home.clone()}
                on_api_failed={handlers.api_failed.clone()}
                on_refresh_balance={handlers.refresh_balance.clone()}
            />
        },
        Some(Route::Wallet) => html! {
            <WalletRoute
                bearer={bearer}
                balance_cents={state.balance_cents().unwrap_or(0)}
                on_login={open_login(handlers)}
                notify={handlers.notify.clone()}
                on_api_failed={handlers.api_failed.clone()}
                on_refresh_balance={handlers.refresh_balance.clone()}
            />
        },
        Some(Route::NotFound) | None => html! {
            <NotFound on_go_home={handlers.go_home.clone()} />
        },
    }
}

pub fn render_app(state: &AppState, handlers: &AppHandlers, route: Option<&Route>) -> Html {
    let main_view = render_main_view(state, handlers, route);

    html! {
        <>
            <style>{ crate::a11y::visible_focus_css() }</style>
            <Header
                username={state.auth.username()}
                balance_cents={state.balance_cents()}
                on_home={handlers.go_home.clone()}
                on_wallet={handlers.go_wallet.clone()}
                on_login={handlers.open_auth.clone()}
                on_logout={handlers.logout.clone()}
            />
            <main id="main" role="main">
                { main_view }
            </main>
            <AuthModal
                open={*state.show_auth}
                tab={*state.auth_tab}
                busy={*state.auth_busy}
                error={(*state.auth_error).clone()}
                on_submit={handlers.submit_auth.clone()}
                on_switch={handlers.switch_auth_tab.clone()}
                on_close={handlers.close_auth.clone()}
            />
            <Toasts
                toasts={state.toasts.items().to_vec()}
                on_dismiss={handlers.dismiss_toast.clone()}
            />
            <div id={crate::a11y::LIVE_REGION_ID} class="sr-only" aria-live="polite"></div>
            <Footer />
        </>
    }
}

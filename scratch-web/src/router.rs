use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/play/:id")]
    Play { id: String },
    #[at("/wallet")]
    Wallet,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    /// Whether the page is useless without a login; the app opens the auth
    /// dialog when a signed-out player lands here.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Wallet)
    }

    #[must_use]
    pub fn play(id: &str) -> Self {
        Self::Play { id: id.to_string() }
    }
}

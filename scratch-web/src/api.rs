//! Async HTTP client for the platform API.
//!
//! Every call resolves to a typed value or an [`ApiError`]; decoding is done by
//! `scratch_core::api`, this module only moves bytes.
use crate::scratch::{
    ApiError, AuthSession, DepositRequest, Endpoints, GameResult, LoginRequest, Profile,
    RegisterRequest, ScratchCard, WalletReceipt, WebAuth, WithdrawRequest, decode_response,
};
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    endpoints: Endpoints,
    bearer: Option<String>,
}

fn network_error(err: &gloo::net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

impl ApiClient {
    #[must_use]
    pub const fn new(endpoints: Endpoints, bearer: Option<String>) -> Self {
        Self { endpoints, bearer }
    }

    /// Client for the configured API base, authenticated as the current login.
    #[must_use]
    pub fn for_auth(auth: &WebAuth) -> Self {
        Self::new(crate::config::endpoints(), auth.bearer())
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.bearer.is_some()
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match self.bearer.as_deref() {
            Some(bearer) => builder.header("Authorization", bearer),
            None => builder,
        }
    }

    #[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| network_error(&e))?;
        log::debug!("{} -> {status}", response.url());
        decode_response(status, &body)
    }

    #[allow(clippy::future_not_send)]
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self
            .authorize(Request::get(url))
            .send()
            .await
            .map_err(|e| network_error(&e))?;
        Self::read(response).await
    }

    #[allow(clippy::future_not_send)]
    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let builder = self.authorize(Request::post(url));
        let response = match body {
            Some(body) => builder
                .json(body)
                .map_err(|e| network_error(&e))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| network_error(&e))?;
        Self::read(response).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures, bad credentials or
    /// undecodable responses.
    #[allow(clippy::future_not_send)]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthSession, ApiError> {
        self.post(&self.endpoints.login(), Some(request)).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when registration is refused or the call fails.
    #[allow(clippy::future_not_send)]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, ApiError> {
        self.post(&self.endpoints.register(), Some(request)).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the token is no longer valid.
    #[allow(clippy::future_not_send)]
    pub async fn profile(&self) -> Result<Profile, ApiError> {
        self.get(&self.endpoints.profile()).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the catalogue cannot be fetched.
    #[allow(clippy::future_not_send)]
    pub async fn cards(&self) -> Result<Vec<ScratchCard>, ApiError> {
        self.get(&self.endpoints.cards()).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the card is unknown or the call fails.
    #[allow(clippy::future_not_send)]
    pub async fn card(&self, id: &str) -> Result<ScratchCard, ApiError> {
        self.get(&self.endpoints.card(id)).await
    }

    /// Buy and play one card. The server debits the price and decides the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] for refusals such as insufficient balance.
    #[allow(clippy::future_not_send)]
    pub async fn play(&self, id: &str) -> Result<GameResult, ApiError> {
        self.post::<(), _>(&self.endpoints.play(id), None).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the deposit is refused or the call fails.
    #[allow(clippy::future_not_send)]
    pub async fn deposit(&self, request: &DepositRequest) -> Result<WalletReceipt, ApiError> {
        self.post(&self.endpoints.deposits(), Some(request)).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the withdrawal is refused or the call fails.
    #[allow(clippy::future_not_send)]
    pub async fn withdraw(&self, request: &WithdrawRequest) -> Result<WalletReceipt, ApiError> {
        self.post(&self.endpoints.withdrawals(), Some(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_tracks_login() {
        let anonymous = ApiClient::new(Endpoints::new("/api"), None);
        assert!(!anonymous.is_authenticated());
        let signed = ApiClient::new(
            Endpoints::new("https://api.example.com"),
            Some(String::from("Bearer t")),
        );
        assert!(signed.is_authenticated());
        assert_eq!(
            signed.endpoints().play("c1"),
            "https://api.example.com/scratch-cards/c1/play"
        );
    }

    #[test]
    fn client_for_signed_out_auth_is_anonymous() {
        let auth = WebAuth::restore(crate::scratch::WebSessionStore);
        let client = ApiClient::for_auth(&auth);
        assert!(!client.is_authenticated());
        assert_eq!(client.endpoints().base(), "/api");
    }
}

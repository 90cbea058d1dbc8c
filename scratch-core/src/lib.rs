//! Scratch Card Core
//!
//! Platform-agnostic logic for the scratch-card front-end: the prize data
//! model, the outcome renderer that lays out the reveal grid, the play-session
//! state machine and the typed API boundary. Nothing here touches the browser.

pub mod api;
pub mod board;
pub mod category;
pub mod money;
pub mod prize;
pub mod session;
pub mod wallet;

// Re-export commonly used types
pub use api::{
    ApiError, AuthSession, Endpoints, LoginRequest, Profile, RegisterRequest, WalletReceipt,
    decode_envelope, decode_response,
};
pub use board::{
    BOARD_SIZE, Board, BoardMismatch, FILLER_RETRIES, MAX_PER_CATEGORY, ScratchItem,
    TripleReport, WIN_COUNT, build_board, detect_triple, verify_board,
};
pub use category::Category;
pub use money::{MoneyError, format_decimal, format_display, parse_cents};
pub use prize::{GameResult, Prize, PrizeKind, ScratchCard};
pub use session::{PlaySession, PlayState, SessionError};
pub use wallet::{
    AmountLimits, DepositMethod, DepositRequest, WalletError, WithdrawRequest, validate_amount,
    validate_withdrawal,
};

/// Trait for abstracting where the login is kept between page loads.
/// Platform-specific implementations should provide this
pub trait SessionStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the current login
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    fn save_session(&self, session: &AuthSession) -> Result<(), Self::Error>;

    /// Load a previously saved login
    ///
    /// # Errors
    ///
    /// Returns an error if the stored session cannot be read.
    fn load_session(&self) -> Result<Option<AuthSession>, Self::Error>;

    /// Forget the stored login
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be removed.
    fn clear_session(&self) -> Result<(), Self::Error>;
}

/// In-memory store, for tests and for hosts without persistent storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySessionStore {
    slot: std::rc::Rc<std::cell::RefCell<Option<AuthSession>>>,
}

impl SessionStore for MemorySessionStore {
    type Error = std::convert::Infallible;

    fn save_session(&self, session: &AuthSession) -> Result<(), Self::Error> {
        *self.slot.borrow_mut() = Some(session.clone());
        Ok(())
    }

    fn load_session(&self) -> Result<Option<AuthSession>, Self::Error> {
        Ok(self.slot.borrow().clone())
    }

    fn clear_session(&self) -> Result<(), Self::Error> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}

/// Current login backed by a [`SessionStore`].
///
/// The cached session is authoritative for the running page; the store only
/// matters across reloads, so store failures are logged rather than fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext<S>
where
    S: SessionStore,
{
    store: S,
    session: Option<AuthSession>,
}

impl<S> AuthContext<S>
where
    S: SessionStore,
{
    /// Restore whatever login the store holds.
    pub fn restore(store: S) -> Self {
        let session = store.load_session().unwrap_or_else(|err| {
            log::warn!("discarding unreadable stored session: {err}");
            None
        });
        Self { store, session }
    }

    #[must_use]
    pub const fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        self.session.as_ref().map(|session| &session.user)
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// `Authorization` header value for the current login.
    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.session.as_ref().map(AuthSession::bearer)
    }

    /// Balance of the signed-in player in cents, zero if unknown.
    #[must_use]
    pub fn balance_cents(&self) -> i64 {
        self.profile()
            .and_then(|profile| profile.balance_cents().ok())
            .unwrap_or(0)
    }

    pub fn sign_in(&mut self, session: AuthSession) {
        if let Err(err) = self.store.save_session(&session) {
            log::warn!("could not persist session: {err}");
        }
        self.session = Some(session);
    }

    pub fn sign_out(&mut self) {
        if let Err(err) = self.store.clear_session() {
            log::warn!("could not clear stored session: {err}");
        }
        self.session = None;
    }

    /// Replace the cached profile after a balance refresh.
    pub fn update_profile(&mut self, profile: Profile) {
        if let Some(session) = self.session.as_mut() {
            session.user = profile;
            let snapshot = session.clone();
            if let Err(err) = self.store.save_session(&snapshot) {
                log::warn!("could not persist refreshed profile: {err}");
            }
        }
    }

    /// React to a failed call. Returns `true` when the login was dropped.
    pub fn observe_error(&mut self, err: &ApiError) -> bool {
        if err.is_unauthorized() && self.session.is_some() {
            self.sign_out();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(balance: &str) -> AuthSession {
        AuthSession {
            token: String::from("tok-1"),
            user: Profile {
                id: String::from("u1"),
                username: String::from("ana"),
                email: String::from("ana@example.com"),
                balance: balance.to_string(),
            },
        }
    }

    #[test]
    fn auth_context_roundtrips_through_store() {
        let store = MemorySessionStore::default();
        let mut auth = AuthContext::restore(store.clone());
        assert!(!auth.is_signed_in());
        assert_eq!(auth.bearer(), None);

        auth.sign_in(session("12.00"));
        assert_eq!(auth.bearer().as_deref(), Some("Bearer tok-1"));
        assert_eq!(auth.balance_cents(), 1_200);

        let restored = AuthContext::restore(store.clone());
        assert_eq!(restored.session(), auth.session());

        auth.sign_out();
        assert_eq!(store.load_session().unwrap(), None);
    }

    #[test]
    fn profile_refresh_is_persisted() {
        let store = MemorySessionStore::default();
        let mut auth = AuthContext::restore(store.clone());
        auth.update_profile(session("1").user);
        assert!(auth.profile().is_none());

        auth.sign_in(session("1.00"));
        auth.update_profile(session("63.50").user);
        assert_eq!(auth.balance_cents(), 6_350);
        let stored = store.load_session().unwrap().unwrap();
        assert_eq!(stored.user.balance, "63.50");
    }

    #[test]
    fn unauthorized_clears_login() {
        let store = MemorySessionStore::default();
        let mut auth = AuthContext::restore(store.clone());
        auth.sign_in(session("5"));

        assert!(!auth.observe_error(&ApiError::Http { status: 500 }));
        assert!(auth.is_signed_in());
        assert!(auth.observe_error(&ApiError::Unauthorized));
        assert!(!auth.is_signed_in());
        assert!(store.load_session().unwrap().is_none());
        assert!(!auth.observe_error(&ApiError::Unauthorized));
    }
}

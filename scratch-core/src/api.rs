//! Wire types and envelope decoding for the platform REST API.
//!
//! Responses are decoded exactly once, here, into typed values or an
//! [`ApiError`]. Nothing past this module looks at raw JSON.
use crate::money::{MoneyError, parse_cents};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Failures surfaced by any API call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}")]
    Http { status: u16 },
    #[error("your session has expired, please log in again")]
    Unauthorized,
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl ApiError {
    /// Whether the stored login should be discarded.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

fn envelope_message(map: &serde_json::Map<String, Value>) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .filter(|msg| !msg.trim().is_empty())
        .map(str::to_string)
}

/// Decode a success body, accepting both `{success, data, message}` envelopes
/// and bare payloads.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] for `success: false` envelopes and
/// [`ApiError::Decode`] when the payload does not match `T`.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Object(mut map) = value else {
        return Ok(serde_json::from_value(value)?);
    };
    let Some(success) = map.get("success").and_then(Value::as_bool) else {
        return Ok(serde_json::from_value(Value::Object(map))?);
    };
    if !success {
        return Err(ApiError::Rejected(
            envelope_message(&map).unwrap_or_else(|| String::from("request was rejected")),
        ));
    }
    let data = map.remove("data").unwrap_or(Value::Null);
    Ok(serde_json::from_value(data)?)
}

/// Decode a full HTTP response.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] for 401, [`ApiError::Rejected`] when an
/// error status carries a readable message, [`ApiError::Http`] otherwise, and
/// falls through to [`decode_envelope`] for 2xx.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if status == 401 {
        return Err(ApiError::Unauthorized);
    }
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| match value {
                Value::Object(map) => envelope_message(&map),
                _ => None,
            });
        return Err(message.map_or(ApiError::Http { status }, ApiError::Rejected));
    }
    decode_envelope(body)
}

/// Route table relative to a configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    #[must_use]
    pub fn login(&self) -> String {
        self.join("auth/login")
    }

    #[must_use]
    pub fn register(&self) -> String {
        self.join("auth/register")
    }

    #[must_use]
    pub fn profile(&self) -> String {
        self.join("users/me")
    }

    #[must_use]
    pub fn cards(&self) -> String {
        self.join("scratch-cards")
    }

    #[must_use]
    pub fn card(&self, id: &str) -> String {
        self.join(&format!("scratch-cards/{}", encode_segment(id)))
    }

    #[must_use]
    pub fn play(&self, id: &str) -> String {
        self.join(&format!("scratch-cards/{}/play", encode_segment(id)))
    }

    #[must_use]
    pub fn deposits(&self) -> String {
        self.join("wallet/deposits")
    }

    #[must_use]
    pub fn withdrawals(&self) -> String {
        self.join("wallet/withdrawals")
    }
}

/// Percent-encode a path segment, leaving RFC 3986 unreserved bytes as-is.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Player account as returned by `/users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "Profile::zero_balance")]
    pub balance: String,
}

impl Profile {
    fn zero_balance() -> String {
        String::from("0")
    }

    /// Balance in cents.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError`] when the API sent an unparsable balance.
    pub fn balance_cents(&self) -> Result<i64, MoneyError> {
        parse_cents(&self.balance)
    }
}

/// Login or registration result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: Profile,
}

impl AuthSession {
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Server acknowledgement for a deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletReceipt {
    pub id: String,
    pub status: String,
    pub amount: String,
    /// Hosted payment page for deposits that need a redirect.
    #[serde(default)]
    pub checkout_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prize::{GameResult, ScratchCard};

    #[test]
    fn decodes_wrapped_and_bare_payloads() {
        let wrapped = r#"{"success": true, "data": {"isWinner": false, "amountWon": "0", "prize": null}}"#;
        let result: GameResult = decode_envelope(wrapped).unwrap();
        assert!(!result.is_winner);

        let bare = r#"[{"id": "c1", "name": "Gold Rush", "price": "5.00", "prizes": []}]"#;
        let cards: Vec<ScratchCard> = decode_envelope(bare).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].price_cents(), Ok(500));
    }

    #[test]
    fn rejected_envelope_surfaces_message() {
        let body = r#"{"success": false, "message": "Insufficient balance"}"#;
        let err = decode_envelope::<GameResult>(body).unwrap_err();
        assert_eq!(err, ApiError::Rejected(String::from("Insufficient balance")));

        let silent = r#"{"success": false}"#;
        let err = decode_envelope::<GameResult>(silent).unwrap_err();
        assert_eq!(err.to_string(), "request was rejected");
    }

    #[test]
    fn malformed_bodies_become_decode_errors() {
        assert!(matches!(
            decode_envelope::<Profile>("not json"),
            Err(ApiError::Decode(_))
        ));
        assert!(matches!(
            decode_envelope::<Profile>(r#"{"success": true, "data": {"id": 5}}"#),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn status_codes_map_to_errors() {
        assert_eq!(
            decode_response::<Profile>(401, "{}"),
            Err(ApiError::Unauthorized)
        );
        assert_eq!(
            decode_response::<Profile>(422, r#"{"error": "Amount too low"}"#),
            Err(ApiError::Rejected(String::from("Amount too low")))
        );
        assert_eq!(
            decode_response::<Profile>(502, "<html>bad gateway</html>"),
            Err(ApiError::Http { status: 502 })
        );
        assert!(decode_response::<()>(204, r#"{"success": true}"#).is_ok());
    }

    #[test]
    fn endpoints_join_and_encode() {
        let endpoints = Endpoints::new("https://api.example.com/v1/");
        assert_eq!(endpoints.base(), "https://api.example.com/v1");
        assert_eq!(endpoints.login(), "https://api.example.com/v1/auth/login");
        assert_eq!(
            endpoints.play("card 7/a"),
            "https://api.example.com/v1/scratch-cards/card%207%2Fa/play"
        );
        assert_eq!(Endpoints::new("/api").profile(), "/api/users/me");
    }

    #[test]
    fn profile_balance_parses() {
        let profile: Profile =
            serde_json::from_str(r#"{"id": "u1", "username": "ana", "balance": "42.10"}"#).unwrap();
        assert_eq!(profile.balance_cents(), Ok(4_210));
        assert!(profile.email.is_empty());
        let session = AuthSession {
            token: String::from("abc"),
            user: profile,
        };
        assert_eq!(session.bearer(), "Bearer abc");
    }
}

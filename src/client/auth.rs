//! OAuth2 token lifecycle for the Falcon API.
//!
//! The [`TokenManager`] owns the single shared access token. A token is only
//! handed out while its expiry lies more than [`TOKEN_REFRESH_MARGIN`] in the
//! future; otherwise a client-credentials exchange replaces it first.
//!
//! The token slot is an async mutex held across the exchange, so callers that
//! find an expiring token queue behind one refresh and then reuse its result.

use std::time::{Duration, Instant};

use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::error::{ClientError, ClientResult, first_error_message, status_message};

/// Buffer before the real expiry at which a token is proactively refreshed.
pub const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Longest lifetime a token is trusted for, whatever `expires_in` claims.
pub const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Path of the OAuth2 token endpoint, relative to the API base URL.
pub const TOKEN_ENDPOINT: &str = "/oauth2/token";

/// Body of a successful token exchange.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    expires_in: u64,
}

/// A bearer token together with the instant it stops being accepted.
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    /// Create a token that expires `lifetime` from now, capped at
    /// [`MAX_TOKEN_LIFETIME`].
    pub fn new(value: impl Into<String>, lifetime: Duration) -> Self {
        let now = Instant::now();
        Self {
            value: value.into(),
            expires_at: now
                .checked_add(lifetime.min(MAX_TOKEN_LIFETIME))
                .unwrap_or(now),
        }
    }

    /// The raw bearer string.
    pub fn secret(&self) -> &str {
        &self.value
    }

    /// Whether the token may still be used at `now`.
    pub fn is_valid_at(&self, now: Instant) -> bool {
        self.expires_at.saturating_duration_since(now) > TOKEN_REFRESH_MARGIN
    }

    /// Whether the token may still be used right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Instant::now())
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Owns the Falcon credentials and the cached access token.
pub struct TokenManager {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    slot: Mutex<Option<AccessToken>>,
}

impl TokenManager {
    /// Create a token manager that exchanges credentials against `base_url`.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            token_url: format!("{}{}", base_url, TOKEN_ENDPOINT),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            slot: Mutex::new(None),
        }
    }

    /// Return a bearer token that is valid beyond the refresh margin,
    /// exchanging credentials first when none is cached or it is expiring.
    pub async fn ensure_authenticated(&self) -> ClientResult<String> {
        let mut slot = self.slot.lock().await;

        if let Some(token) = slot.as_ref().filter(|token| token.is_valid()) {
            debug!("Reusing cached access token");
            return Ok(token.secret().to_string());
        }

        let token = self.exchange_credentials().await?;
        let bearer = token.secret().to_string();
        *slot = Some(token);

        Ok(bearer)
    }

    /// Perform the client-credentials grant.
    #[instrument(skip(self), fields(token_url = %self.token_url))]
    async fn exchange_credentials(&self) -> ClientResult<AccessToken> {
        info!("Requesting new Falcon access token");

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!("Token request did not complete: {}", e);
                ClientError::authentication(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::authentication(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|value| first_error_message(&value))
                .unwrap_or_else(|| status_message(status));
            warn!(status = status.as_u16(), "Token exchange rejected: {}", message);
            return Err(ClientError::authentication(message));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::authentication(format!("malformed token response: {}", e)))?;

        info!(
            token_type = token.token_type.as_deref().unwrap_or("bearer"),
            expires_in = token.expires_in,
            "Access token acquired"
        );

        Ok(AccessToken::new(
            token.access_token,
            Duration::from_secs(token.expires_in),
        ))
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

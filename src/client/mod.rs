//! CrowdStrike Falcon REST API client.
//!
//! [`FalconClient`] wraps a single authenticated request primitive,
//! [`FalconClient::request`], and builds every resource operation on top of
//! it. Operations are grouped by resource family, one file each:
//!
//! - `hosts`: device search, details and containment/visibility actions
//! - `detections`: detection search, summaries and status updates
//! - `incidents`: incidents, behaviors and the CrowdScore
//! - `iocs`: custom indicators of compromise
//! - `spotlight`: Spotlight vulnerabilities
//! - `host_groups`: host group search
//! - `sensors`: sensor installer metadata
//! - `alerts`: alert search, details and updates
//!
//! Query APIs on the platform return identifiers only, so the search
//! operations are a query call followed by a detail fetch; that two-step
//! pattern lives in `search`.

mod alerts;
mod auth;
mod detections;
mod error;
mod host_groups;
mod hosts;
mod incidents;
mod iocs;
mod search;
mod sensors;
mod spotlight;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::core::config::FalconConfig;

pub use alerts::AlertAction;
pub use auth::{AccessToken, TOKEN_ENDPOINT, TOKEN_REFRESH_MARGIN, TokenManager};
pub use detections::DetectionStatus;
pub use error::{ClientError, ClientResult};
pub use hosts::HostAction;
pub use incidents::{ActionParameter, IncidentStatus};
pub use iocs::{IocAction, IocPlatform, IocSeverity, IocType, NewIndicator};
pub use search::{DEFAULT_LIMIT, SearchQuery};

/// Ordered query-string pairs. Repeated keys encode array parameters.
pub type QueryParams = Vec<(&'static str, String)>;

/// Authenticated client for the Falcon API.
#[derive(Debug)]
pub struct FalconClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenManager,
}

impl FalconClient {
    /// Create a client from the configured credentials.
    pub fn new(config: &FalconConfig) -> Self {
        let http = reqwest::Client::new();
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let tokens = TokenManager::new(
            http.clone(),
            &base_url,
            config.client_id.clone(),
            config.client_secret.clone(),
        );

        Self {
            http,
            base_url,
            tokens,
        }
    }

    /// The API base URL all endpoints are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ensure a usable access token is cached, refreshing it if needed.
    pub async fn ensure_authenticated(&self) -> ClientResult<String> {
        self.tokens.ensure_authenticated().await
    }

    /// Issue one authenticated request and decode the JSON response.
    ///
    /// Authentication is checked first, unconditionally. Any 2xx response is
    /// returned as decoded JSON (an empty body yields `null`). Anything else
    /// becomes [`ClientError::ApiRequest`] carrying the best message the
    /// platform supplied.
    #[instrument(skip(self, method, body, query), fields(method = %method))]
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        query: &[(&'static str, String)],
    ) -> ClientResult<Value> {
        let bearer = self.tokens.ensure_authenticated().await?;
        let url = format!("{}{}", self.base_url, endpoint);

        debug!(params = query.len(), has_body = body.is_some(), "Sending request");

        let mut builder = self.http.request(method, &url).bearer_auth(bearer);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("Request to {} did not complete: {}", endpoint, e);
            ClientError::api_request(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::api_request(e.to_string()))?;

        if !status.is_success() {
            let message =
                error::api_error_message(&text).unwrap_or_else(|| error::status_message(status));
            warn!(status = status.as_u16(), "Request to {} failed: {}", endpoint, message);
            return Err(ClientError::api_request(message));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| ClientError::api_request(format!("invalid JSON response: {}", e)))
    }
}

/// Keep only optional text values that carry content.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Encode a list of identifiers as repeated `key=value` query pairs.
pub(crate) fn id_params(key: &'static str, ids: &[String]) -> QueryParams {
    ids.iter().map(|id| (key, id.clone())).collect()
}

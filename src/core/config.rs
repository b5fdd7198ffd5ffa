//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally via a `.env` file) on top of defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default Falcon API endpoint (US-1 cloud).
pub const DEFAULT_BASE_URL: &str = "https://api.crowdstrike.com";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Falcon API credentials and endpoint.
    pub falcon: FalconConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Credentials for the Falcon OAuth2 API client.
#[derive(Clone, Serialize, Deserialize)]
pub struct FalconConfig {
    /// OAuth2 API client ID.
    pub client_id: String,

    /// OAuth2 API client secret.
    #[serde(skip_serializing)]
    pub client_secret: String,

    /// Base URL of the Falcon API for the tenant's cloud.
    pub base_url: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for FalconConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FalconConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for FalconConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Falcon cloud regions, each served from its own API host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FalconCloud {
    Us1,
    Us2,
    Eu1,
    UsGov1,
}

impl FalconCloud {
    /// API base URL of this cloud.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Us1 => DEFAULT_BASE_URL,
            Self::Us2 => "https://api.us-2.crowdstrike.com",
            Self::Eu1 => "https://api.eu-1.crowdstrike.com",
            Self::UsGov1 => "https://api.laggar.gcw.crowdstrike.com",
        }
    }
}

impl std::str::FromStr for FalconCloud {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "us-1" | "us1" => Ok(Self::Us1),
            "us-2" | "us2" => Ok(Self::Us2),
            "eu-1" | "eu1" => Ok(Self::Eu1),
            "us-gov-1" | "usgov1" | "gov" => Ok(Self::UsGov1),
            other => Err(Error::config(format!(
                "unknown Falcon cloud '{}', expected one of us-1, us-2, eu-1, us-gov-1",
                other
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "falcon-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            falcon: FalconConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Falcon credentials come from `CROWDSTRIKE_CLIENT_ID` and
    /// `CROWDSTRIKE_CLIENT_SECRET`, both required. The API endpoint is taken
    /// from `CROWDSTRIKE_BASE_URL`, else from the `CROWDSTRIKE_CLOUD` region,
    /// else the US-1 default. Server settings use the `MCP_` prefix, for
    /// example `MCP_SERVER_NAME` and `MCP_LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config.falcon.client_id = required_var("CROWDSTRIKE_CLIENT_ID")?;
        config.falcon.client_secret = required_var("CROWDSTRIKE_CLIENT_SECRET")?;

        if let Some(base_url) = optional_var("CROWDSTRIKE_BASE_URL") {
            config.falcon.base_url = base_url.trim_end_matches('/').to_string();
        } else if let Some(cloud) = optional_var("CROWDSTRIKE_CLOUD") {
            config.falcon.base_url = cloud.parse::<FalconCloud>()?.base_url().to_string();
        }
        info!("Falcon API endpoint: {}", config.falcon.base_url);

        Ok(config)
    }
}

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn required_var(key: &str) -> Result<String> {
    optional_var(key).ok_or_else(|| {
        Error::config(format!(
            "CROWDSTRIKE_CLIENT_ID and CROWDSTRIKE_CLIENT_SECRET environment variables are required ({} is not set)",
            key
        ))
    })
}

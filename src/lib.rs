//! CrowdStrike Falcon MCP Server Library
//!
//! Exposes security-operations actions of the CrowdStrike Falcon API as
//! Model Context Protocol tools.
//!
//! # Architecture
//!
//! - **client**: Falcon API client with OAuth2 token management
//! - **core**: Configuration, error handling, the MCP server and its transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: The 24 `crowdstrike_*` tools and their dispatcher
//!
//! # Example
//!
//! ```rust,no_run
//! use falcon_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use client::{ClientError, FalconClient};
pub use core::{Config, Error, McpServer, Result};

//! Tools domain module.
//!
//! Exposes the Falcon API client as 24 MCP tools.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool names, parameter structs and metadata, one file per resource family
//! - `dispatch.rs` - The typed `ToolCall` enum: argument parsing and execution
//! - `registry.rs` - Central tool registry producing `CallToolResult` envelopes
//! - `router.rs` - Dynamic ToolRouter builder for the STDIO transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add the name constant, params struct and `TOOLS` entry in its family file
//! 2. Add a `ToolCall` variant with its `parse`, `name` and `execute` arms
//!
//! The router and the registry pick the tool up from the catalog.

pub mod definitions;
mod dispatch;
mod error;
mod registry;
pub mod router;

pub use dispatch::ToolCall;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;

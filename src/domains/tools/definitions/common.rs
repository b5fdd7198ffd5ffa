//! Common utilities shared across Falcon tools.
//!
//! Result envelopes, limit handling and the `ToolDefinition` metadata record
//! every family registers its tools with.

use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;
use tracing::warn;

use crate::client::{DEFAULT_LIMIT, SearchQuery};

/// Static metadata of one tool: its MCP name, description and input schema.
#[derive(Clone, Copy)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    input_schema: fn() -> Arc<JsonObject>,
}

impl ToolDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        input_schema: fn() -> Arc<JsonObject>,
    ) -> Self {
        Self {
            name,
            description,
            input_schema,
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: (self.input_schema)(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// JSON schema of a parameter struct, cached by rmcp.
pub fn schema_of<T: JsonSchema + 'static>() -> Arc<JsonObject> {
    cached_schema_for_type::<T>()
}

/// Arguments for tools that take none.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Deserialize a count argument (`limit`, `offset`) from any JSON number
/// holding a non-negative whole value, so `10.0` is read as `10`. `null`
/// reads as absent.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let count = match number.as_u64() {
        Some(n) => u32::try_from(n).ok(),
        None => number
            .as_f64()
            .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(n))
            .map(|n| n as u32),
    };

    count
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected a non-negative whole number, got {}", number)))
}

/// Treat an absent or zero limit as the default of 100.
pub fn resolve_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(limit) if limit > 0 => limit,
        _ => DEFAULT_LIMIT,
    }
}

/// Build a query from the common search arguments.
pub fn search_query(
    filter: Option<&str>,
    limit: Option<u32>,
    offset: Option<u32>,
    sort: Option<&str>,
) -> SearchQuery {
    SearchQuery {
        filter: filter.map(str::to_string),
        limit: resolve_limit(limit),
        offset,
        sort: sort.map(str::to_string),
    }
}

/// Create an error result with the `Error: ` prefix clients expect.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(format!("Error: {}", message))])
}

/// Create a success result holding the pretty-printed JSON payload.
pub fn success_result(payload: &Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    CallToolResult::success(vec![Content::text(text)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use serde_json::json;

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_resolve_limit() {
        assert_eq!(resolve_limit(None), 100);
        assert_eq!(resolve_limit(Some(0)), 100);
        assert_eq!(resolve_limit(Some(25)), 25);
    }

    #[derive(Debug, Deserialize)]
    struct Counts {
        #[serde(default, deserialize_with = "lenient_count")]
        limit: Option<u32>,
    }

    fn count(value: Value) -> Result<Option<u32>, serde_json::Error> {
        serde_json::from_value::<Counts>(value).map(|c| c.limit)
    }

    #[test]
    fn test_lenient_count_accepts_whole_numbers() {
        assert_eq!(count(json!({"limit": 10})).unwrap(), Some(10));
        assert_eq!(count(json!({"limit": 10.0})).unwrap(), Some(10));
        assert_eq!(count(json!({"limit": null})).unwrap(), None);
        assert_eq!(count(json!({})).unwrap(), None);
    }

    #[test]
    fn test_lenient_count_rejects_fractions_and_negatives() {
        assert!(count(json!({"limit": 2.5})).is_err());
        assert!(count(json!({"limit": -1})).is_err());
        assert!(count(json!({"limit": "10"})).is_err());
        assert!(count(json!({"limit": 5_000_000_000u64})).is_err());
    }

    #[test]
    fn test_error_result_prefix() {
        let result = error_result("API request failed: rate limited");
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error: API request failed: rate limited");
    }

    #[test]
    fn test_success_result_is_pretty_json() {
        let result = success_result(&json!({"resources": ["a"]}));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(text_of(&result), "{\n  \"resources\": [\n    \"a\"\n  ]\n}");
    }

    #[test]
    fn test_no_params_accepts_any_object() {
        let parsed: Result<NoParams, _> = serde_json::from_value(json!({"unexpected": 1}));
        assert!(parsed.is_ok());
    }
}

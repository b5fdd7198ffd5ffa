//! Tool Registry - central registration and dispatch for all tools.
//!
//! Both transports go through `ToolRegistry::call_tool`, which turns every
//! outcome into a `CallToolResult`: failures become error-flagged results,
//! never protocol faults.

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::definitions::{self, error_result, success_result};
use super::dispatch::ToolCall;
use super::error::ToolError;
use crate::client::FalconClient;

/// Tool registry - owns the API client the tools run against.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    client: Arc<FalconClient>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(client: Arc<FalconClient>) -> Self {
        Self { client }
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        definitions::all().map(|definition| definition.to_tool()).collect()
    }

    /// Parse and run a tool call, returning the raw JSON payload.
    pub async fn dispatch(&self, name: &str, arguments: &JsonObject) -> Result<Value, ToolError> {
        let call = ToolCall::parse(name, arguments)?;
        info!(tool = call.name(), "Tool called");
        Ok(call.execute(&self.client).await?)
    }

    /// Call a tool by name and wrap the outcome in a result envelope.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: JsonObject) -> CallToolResult {
        match self.dispatch(name, &arguments).await {
            Ok(payload) => success_result(&payload),
            Err(e) => {
                if matches!(e, ToolError::UnknownTool(_)) {
                    warn!("Unknown tool requested: {}", name);
                }
                error_result(&e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::*;
    use rmcp::model::RawContent;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            _ => panic!("Expected text content"),
        }
    }

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    async fn test_registry() -> (wiremock::MockServer, ToolRegistry) {
        let (server, client) = mock_falcon().await;
        (server, ToolRegistry::new(Arc::new(client)))
    }

    #[test]
    fn test_registry_lists_catalog() {
        let tools = ToolRegistry::get_all_tools();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names.len(), 24);
        assert!(names.contains(&"crowdstrike_search_hosts"));
        assert!(names.contains(&"crowdstrike_get_crowdscore"));
        assert!(names.contains(&"crowdstrike_update_alerts"));
    }

    #[tokio::test]
    async fn test_unknown_tool_makes_no_requests() {
        let (server, registry) = test_registry().await;

        let result = registry
            .call_tool("crowdstrike_reboot_host", JsonObject::new())
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error: Unknown tool: crowdstrike_reboot_host");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_arguments_make_no_requests() {
        let (server, registry) = test_registry().await;

        let result = registry
            .call_tool(
                "crowdstrike_update_detection",
                args(json!({"detection_ids": ["ldt:1"], "status": "done"})),
            )
            .await;

        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Error: Invalid arguments:"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_api_error_is_wrapped() {
        let (server, registry) = test_registry().await;
        Mock::given(method("GET"))
            .and(path("/devices/queries/devices/v1"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(json!({"errors": [{"code": 429, "message": "rate limited"}]})),
            )
            .mount(&server)
            .await;

        let result = registry
            .call_tool("crowdstrike_search_hosts", JsonObject::new())
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error: API request failed: rate limited");
    }

    #[tokio::test]
    async fn test_success_is_pretty_json() {
        let (server, registry) = test_registry().await;
        Mock::given(method("GET"))
            .and(path("/devices/queries/devices/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
            .mount(&server)
            .await;

        let result = registry
            .call_tool("crowdstrike_search_hosts", args(json!({"filter": "hostname:*web*"})))
            .await;

        assert_eq!(result.is_error, Some(false));
        let payload: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(payload, json!({"resources": []}));
    }

    #[tokio::test]
    async fn test_update_incident_through_dispatcher() {
        let (server, registry) = test_registry().await;
        Mock::given(method("POST"))
            .and(path("/incidents/entities/incident-actions/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = registry
            .call_tool(
                "crowdstrike_update_incident",
                args(json!({
                    "incident_ids": ["inc:1"],
                    "status": 40,
                    "assigned_to_uuid": "u-1",
                    "tags": ["t1", "t2"]
                })),
            )
            .await;
        assert_eq!(result.is_error, Some(false));

        let requests = requests_to(&server, "/incidents/entities/incident-actions/v1").await;
        assert_eq!(
            json_body(&requests[0])["action_parameters"],
            json!([
                {"name": "update_status", "value": "40"},
                {"name": "update_assigned_to_v2", "value": "u-1"},
                {"name": "add_tag", "value": "t1"},
                {"name": "add_tag", "value": "t2"}
            ])
        );
    }

    #[tokio::test]
    async fn test_create_ioc_omits_absent_fields() {
        let (server, registry) = test_registry().await;
        Mock::given(method("POST"))
            .and(path("/iocs/entities/indicators/v1"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"resources": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = registry
            .call_tool(
                "crowdstrike_create_ioc",
                args(json!({
                    "type": "sha256",
                    "value": "abc",
                    "action": "detect",
                    "platforms": ["windows"]
                })),
            )
            .await;
        assert_eq!(result.is_error, Some(false));

        let requests = requests_to(&server, "/iocs/entities/indicators/v1").await;
        let indicator = &json_body(&requests[0])["indicators"][0];
        assert_eq!(indicator["applied_globally"], json!(true));
        for key in ["description", "severity", "expiration", "tags"] {
            assert!(indicator.get(key).is_none(), "unexpected key {}", key);
        }
    }

    #[tokio::test]
    async fn test_search_limit_defaults_to_100() {
        let (server, registry) = test_registry().await;
        Mock::given(method("GET"))
            .and(path("/spotlight/combined/vulnerabilities/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
            .expect(1)
            .mount(&server)
            .await;

        registry
            .call_tool(
                "crowdstrike_search_vulnerabilities",
                args(json!({"limit": 0, "facet": ["cve", "host_info"]})),
            )
            .await;

        let requests = requests_to(&server, "/spotlight/combined/vulnerabilities/v1").await;
        assert_eq!(
            query_pairs(&requests[0]),
            vec![
                ("limit".to_string(), "100".to_string()),
                ("facet".to_string(), "cve".to_string()),
                ("facet".to_string(), "host_info".to_string()),
            ]
        );
    }
}

//! Tool Router - builds the rmcp ToolRouter from the tool catalog.
//!
//! Every route forwards to `ToolRegistry::call_tool`, so the STDIO transport
//! and the HTTP transport share one dispatch path.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::CallToolResult,
};

use super::definitions::{self, ToolDefinition};
use super::registry::ToolRegistry;

/// Create a ToolRoute that dispatches one tool through the registry.
fn create_route<S>(definition: &'static ToolDefinition, registry: Arc<ToolRegistry>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = definition.name;
    ToolRoute::new_dyn(definition.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let registry = registry.clone();
        async move { Ok::<CallToolResult, McpError>(registry.call_tool(name, args).await) }.boxed()
    })
}

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    definitions::all().fold(ToolRouter::new(), |router, definition| {
        router.with_route(create_route(definition, registry.clone()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::mock_falcon;

    struct TestServer {}

    #[tokio::test]
    async fn test_build_router() {
        let (_server, client) = mock_falcon().await;
        let registry = Arc::new(ToolRegistry::new(Arc::new(client)));

        let router: ToolRouter<TestServer> = build_tool_router(registry);
        let tools = router.list_all();
        assert_eq!(tools.len(), 24);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"crowdstrike_search_hosts"));
        assert!(names.contains(&"crowdstrike_contain_host"));
        assert!(names.contains(&"crowdstrike_update_detection"));
        assert!(names.contains(&"crowdstrike_get_behaviors"));
        assert!(names.contains(&"crowdstrike_create_ioc"));
        assert!(names.contains(&"crowdstrike_search_vulnerabilities"));
        assert!(names.contains(&"crowdstrike_get_sensor_installers"));
        assert!(names.contains(&"crowdstrike_get_alert_details"));
    }

    #[tokio::test]
    async fn test_registry_matches_router() {
        let (_server, client) = mock_falcon().await;
        let registry = Arc::new(ToolRegistry::new(Arc::new(client)));
        let registry_tools = ToolRegistry::get_all_tools();

        let router: ToolRouter<TestServer> = build_tool_router(registry);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_tools.len(), router_names.len());
        for tool in &registry_tools {
            assert!(router_names.contains(&tool.name.as_ref()));
        }
    }
}

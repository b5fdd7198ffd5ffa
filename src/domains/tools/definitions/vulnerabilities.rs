//! Spotlight vulnerability search tool.

use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{ToolDefinition, lenient_count, schema_of};

pub const SEARCH_VULNERABILITIES: &str = "crowdstrike_search_vulnerabilities";

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchVulnerabilitiesParams {
    /// FQL filter for vulnerabilities. Examples: 'cve.severity:CRITICAL', 'status:open'
    #[serde(default)]
    pub filter: Option<String>,

    /// Maximum number of vulnerabilities to return (default: 100)
    #[serde(default, deserialize_with = "lenient_count")]
    pub limit: Option<u32>,

    /// Facets to include in response for aggregations
    #[serde(default)]
    pub facet: Vec<String>,
}

pub static TOOLS: [ToolDefinition; 1] = [ToolDefinition::new(
    SEARCH_VULNERABILITIES,
    "Search for vulnerabilities discovered by CrowdStrike Spotlight. Returns vulnerability information including CVE, severity, and affected hosts.",
    schema_of::<SearchVulnerabilitiesParams>,
)];

//! Host group search tool.

use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{ToolDefinition, lenient_count, schema_of, search_query};
use crate::client::SearchQuery;

pub const SEARCH_HOST_GROUPS: &str = "crowdstrike_search_host_groups";

/// Host group search takes no sort order.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchHostGroupsParams {
    /// FQL filter for host groups. Example: 'name:*Production*'
    #[serde(default)]
    pub filter: Option<String>,

    /// Maximum number of host groups to return (default: 100)
    #[serde(default, deserialize_with = "lenient_count")]
    pub limit: Option<u32>,

    /// Offset for pagination
    #[serde(default, deserialize_with = "lenient_count")]
    pub offset: Option<u32>,
}

impl SearchHostGroupsParams {
    pub fn to_query(&self) -> SearchQuery {
        search_query(self.filter.as_deref(), self.limit, self.offset, None)
    }
}

pub static TOOLS: [ToolDefinition; 1] = [ToolDefinition::new(
    SEARCH_HOST_GROUPS,
    "Search for host groups in CrowdStrike. Host groups are used to organize and manage collections of hosts.",
    schema_of::<SearchHostGroupsParams>,
)];

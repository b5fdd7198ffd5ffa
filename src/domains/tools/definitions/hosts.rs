//! Host tools: search, details and the four device actions.

use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{ToolDefinition, lenient_count, schema_of, search_query};
use crate::client::SearchQuery;

pub const SEARCH_HOSTS: &str = "crowdstrike_search_hosts";
pub const GET_HOST_DETAILS: &str = "crowdstrike_get_host_details";
pub const CONTAIN_HOST: &str = "crowdstrike_contain_host";
pub const LIFT_CONTAINMENT: &str = "crowdstrike_lift_containment";
pub const HIDE_HOST: &str = "crowdstrike_hide_host";
pub const UNHIDE_HOST: &str = "crowdstrike_unhide_host";

/// Parameters for the host search tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchHostsParams {
    /// FQL filter for hosts. Examples: 'hostname:*web*', 'platform_name:Windows', 'last_seen:>='2024-01-01'
    #[serde(default)]
    pub filter: Option<String>,

    /// Maximum number of hosts to return (default: 100, max: 500)
    #[serde(default, deserialize_with = "lenient_count")]
    pub limit: Option<u32>,

    /// Offset for pagination
    #[serde(default, deserialize_with = "lenient_count")]
    pub offset: Option<u32>,

    /// Sort field and direction. Example: 'last_seen|desc'
    #[serde(default)]
    pub sort: Option<String>,
}

impl SearchHostsParams {
    pub fn to_query(&self) -> SearchQuery {
        search_query(
            self.filter.as_deref(),
            self.limit,
            self.offset,
            self.sort.as_deref(),
        )
    }
}

/// Parameters shared by every tool that acts on a set of hosts.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HostIdsParams {
    /// Array of host/device IDs
    pub host_ids: Vec<String>,
}

pub static TOOLS: [ToolDefinition; 6] = [
    ToolDefinition::new(
        SEARCH_HOSTS,
        "Search for hosts/devices in CrowdStrike Falcon. Use FQL (Falcon Query Language) filters to narrow results. Returns host details including hostname, OS, last seen, sensor version, and containment status.",
        schema_of::<SearchHostsParams>,
    ),
    ToolDefinition::new(
        GET_HOST_DETAILS,
        "Get detailed information about specific hosts by their device IDs.",
        schema_of::<HostIdsParams>,
    ),
    ToolDefinition::new(
        CONTAIN_HOST,
        "Network contain one or more hosts. This isolates the host from the network while maintaining connection to CrowdStrike cloud.",
        schema_of::<HostIdsParams>,
    ),
    ToolDefinition::new(
        LIFT_CONTAINMENT,
        "Lift network containment from one or more hosts, restoring normal network access.",
        schema_of::<HostIdsParams>,
    ),
    ToolDefinition::new(
        HIDE_HOST,
        "Hide hosts from the Falcon console. Useful for decommissioned systems.",
        schema_of::<HostIdsParams>,
    ),
    ToolDefinition::new(
        UNHIDE_HOST,
        "Unhide previously hidden hosts in the Falcon console.",
        schema_of::<HostIdsParams>,
    ),
];

//! Custom indicator (IOC) tools.

use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{ToolDefinition, lenient_count, schema_of, search_query};
use crate::client::{IocAction, IocPlatform, IocSeverity, IocType, NewIndicator, SearchQuery};

pub const SEARCH_IOCS: &str = "crowdstrike_search_iocs";
pub const GET_IOC_DETAILS: &str = "crowdstrike_get_ioc_details";
pub const CREATE_IOC: &str = "crowdstrike_create_ioc";
pub const DELETE_IOC: &str = "crowdstrike_delete_ioc";

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchIocsParams {
    /// FQL filter for IOCs. Examples: 'type:sha256', 'action:detect'
    #[serde(default)]
    pub filter: Option<String>,

    /// Maximum number of IOCs to return (default: 100)
    #[serde(default, deserialize_with = "lenient_count")]
    pub limit: Option<u32>,

    /// Offset for pagination
    #[serde(default, deserialize_with = "lenient_count")]
    pub offset: Option<u32>,

    /// Sort field and direction
    #[serde(default)]
    pub sort: Option<String>,
}

impl SearchIocsParams {
    pub fn to_query(&self) -> SearchQuery {
        search_query(
            self.filter.as_deref(),
            self.limit,
            self.offset,
            self.sort.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IocIdsParams {
    /// Array of IOC IDs
    pub ioc_ids: Vec<String>,
}

/// Parameters for creating a custom indicator.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateIocParams {
    /// Type of indicator
    #[serde(rename = "type")]
    pub indicator_type: IocType,

    /// The indicator value (hash, domain, or IP)
    pub value: String,

    /// Action to take when IOC is matched: detect (alert), prevent (block), or no_action
    pub action: IocAction,

    /// Platforms where this IOC applies
    pub platforms: Vec<IocPlatform>,

    /// Description of the IOC
    #[serde(default)]
    pub description: Option<String>,

    /// Severity level of the IOC
    #[serde(default)]
    pub severity: Option<IocSeverity>,

    /// Expiration date in ISO 8601 format (e.g., 2024-12-31T23:59:59Z)
    #[serde(default)]
    pub expiration: Option<String>,

    /// Tags to associate with the IOC
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl CreateIocParams {
    pub fn into_indicator(self) -> NewIndicator {
        NewIndicator::new(self.indicator_type, self.value, self.action, self.platforms)
            .with_description(self.description.as_deref())
            .with_severity(self.severity)
            .with_expiration(self.expiration.as_deref())
            .with_tags(self.tags)
    }
}

pub static TOOLS: [ToolDefinition; 4] = [
    ToolDefinition::new(
        SEARCH_IOCS,
        "Search for custom IOCs (Indicators of Compromise) configured in CrowdStrike. These are user-defined indicators for detection.",
        schema_of::<SearchIocsParams>,
    ),
    ToolDefinition::new(
        GET_IOC_DETAILS,
        "Get detailed information about specific IOCs by their IDs.",
        schema_of::<IocIdsParams>,
    ),
    ToolDefinition::new(
        CREATE_IOC,
        "Create a new custom IOC for detection or prevention. Supported types: sha256, md5, domain, ipv4, ipv6.",
        schema_of::<CreateIocParams>,
    ),
    ToolDefinition::new(
        DELETE_IOC,
        "Delete custom IOCs by their IDs.",
        schema_of::<IocIdsParams>,
    ),
];

//! Alert tools (v2 alerts API).

use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{ToolDefinition, lenient_count, schema_of, search_query};
use crate::client::{AlertAction, SearchQuery};

pub const SEARCH_ALERTS: &str = "crowdstrike_search_alerts";
pub const GET_ALERT_DETAILS: &str = "crowdstrike_get_alert_details";
pub const UPDATE_ALERTS: &str = "crowdstrike_update_alerts";

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchAlertsParams {
    /// FQL filter for alerts. Examples: 'severity:>=3', 'status:open'
    #[serde(default)]
    pub filter: Option<String>,

    /// Maximum number of alerts to return (default: 100)
    #[serde(default, deserialize_with = "lenient_count")]
    pub limit: Option<u32>,

    /// Offset for pagination
    #[serde(default, deserialize_with = "lenient_count")]
    pub offset: Option<u32>,

    /// Sort field and direction. Example: 'created_timestamp|desc'
    #[serde(default)]
    pub sort: Option<String>,
}

impl SearchAlertsParams {
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
pub struct AlertIdsParams {
    /// Array of alert composite IDs to retrieve
    pub alert_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateAlertsParams {
    /// Array of alert composite IDs to update
    pub alert_ids: Vec<String>,

    /// Action to perform on the alerts
    pub action: AlertAction,

    /// Value for the action (e.g., status value, UUID, tag name)
    #[serde(default)]
    pub value: Option<String>,
}

pub static TOOLS: [ToolDefinition; 3] = [
    ToolDefinition::new(
        SEARCH_ALERTS,
        "Search for alerts (v2 API) in CrowdStrike Falcon. Alerts provide a unified view of security events.",
        schema_of::<SearchAlertsParams>,
    ),
    ToolDefinition::new(
        GET_ALERT_DETAILS,
        "Get detailed information about specific alerts by their composite IDs.",
        schema_of::<AlertIdsParams>,
    ),
    ToolDefinition::new(
        UPDATE_ALERTS,
        "Update alert status. Actions include: update_status, assign_to_uuid, add_tag, remove_tag, show_in_ui, unassign.",
        schema_of::<UpdateAlertsParams>,
    ),
];

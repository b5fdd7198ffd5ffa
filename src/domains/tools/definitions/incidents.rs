//! Incident, behavior and CrowdScore tools.

use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{NoParams, ToolDefinition, lenient_count, schema_of, search_query};
use crate::client::{IncidentStatus, SearchQuery};

pub const SEARCH_INCIDENTS: &str = "crowdstrike_search_incidents";
pub const GET_INCIDENT_DETAILS: &str = "crowdstrike_get_incident_details";
pub const UPDATE_INCIDENT: &str = "crowdstrike_update_incident";
pub const GET_BEHAVIORS: &str = "crowdstrike_get_behaviors";
pub const GET_CROWDSCORE: &str = "crowdstrike_get_crowdscore";

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchIncidentsParams {
    /// FQL filter for incidents. Examples: 'status:20' (in_progress), 'fine_score:>=75'
    #[serde(default)]
    pub filter: Option<String>,

    /// Maximum number of incidents to return (default: 100)
    #[serde(default, deserialize_with = "lenient_count")]
    pub limit: Option<u32>,

    /// Offset for pagination
    #[serde(default, deserialize_with = "lenient_count")]
    pub offset: Option<u32>,

    /// Sort field and direction. Example: 'start|desc'
    #[serde(default)]
    pub sort: Option<String>,
}

impl SearchIncidentsParams {
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
pub struct IncidentIdsParams {
    /// Array of incident IDs to retrieve
    pub incident_ids: Vec<String>,
}

/// Parameters for the incident update tool. Every field except the IDs is
/// optional; the update is sent as a single action list.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateIncidentParams {
    /// Array of incident IDs to update
    pub incident_ids: Vec<String>,

    /// New status: 20=New, 25=Reopened, 30=In Progress, 40=Closed
    #[serde(default)]
    pub status: Option<IncidentStatus>,

    /// UUID of user to assign the incident to
    #[serde(default)]
    pub assigned_to_uuid: Option<String>,

    /// Tags to add to the incident
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BehaviorIdsParams {
    /// Array of behavior IDs to retrieve
    pub behavior_ids: Vec<String>,
}

pub static TOOLS: [ToolDefinition; 5] = [
    ToolDefinition::new(
        SEARCH_INCIDENTS,
        "Search for incidents in CrowdStrike Falcon. Incidents group related detections and behaviors.",
        schema_of::<SearchIncidentsParams>,
    ),
    ToolDefinition::new(
        GET_INCIDENT_DETAILS,
        "Get detailed information about specific incidents by their IDs.",
        schema_of::<IncidentIdsParams>,
    ),
    ToolDefinition::new(
        UPDATE_INCIDENT,
        "Update incident status, assignment, or add tags. Status values: 20=New, 25=Reopened, 30=In Progress, 40=Closed.",
        schema_of::<UpdateIncidentParams>,
    ),
    ToolDefinition::new(
        GET_BEHAVIORS,
        "Get detailed behavior information by behavior IDs. Behaviors represent individual malicious activities.",
        schema_of::<BehaviorIdsParams>,
    ),
    ToolDefinition::new(
        GET_CROWDSCORE,
        "Get the CrowdScore - an overall security posture score for your environment based on active incidents and their severity.",
        schema_of::<NoParams>,
    ),
];

//! Detection tools.

use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{ToolDefinition, lenient_count, schema_of, search_query};
use crate::client::{DetectionStatus, SearchQuery};

pub const SEARCH_DETECTIONS: &str = "crowdstrike_search_detections";
pub const GET_DETECTION_DETAILS: &str = "crowdstrike_get_detection_details";
pub const UPDATE_DETECTION: &str = "crowdstrike_update_detection";

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchDetectionsParams {
    /// FQL filter for detections. Examples: 'status:new', 'max_severity_displayname:Critical', 'behaviors.technique:T1059'
    #[serde(default)]
    pub filter: Option<String>,

    /// Maximum number of detections to return (default: 100)
    #[serde(default, deserialize_with = "lenient_count")]
    pub limit: Option<u32>,

    /// Offset for pagination
    #[serde(default, deserialize_with = "lenient_count")]
    pub offset: Option<u32>,

    /// Sort field and direction. Example: 'last_behavior|desc'
    #[serde(default)]
    pub sort: Option<String>,
}

impl SearchDetectionsParams {
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
pub struct DetectionIdsParams {
    /// Array of detection IDs to retrieve
    pub detection_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateDetectionParams {
    /// Array of detection IDs to update
    pub detection_ids: Vec<String>,

    /// New status for the detection
    pub status: DetectionStatus,

    /// UUID of user to assign the detection to
    #[serde(default)]
    pub assigned_to_uuid: Option<String>,

    /// Comment to add to the detection
    #[serde(default)]
    pub comment: Option<String>,
}

pub static TOOLS: [ToolDefinition; 3] = [
    ToolDefinition::new(
        SEARCH_DETECTIONS,
        "Search for detections in CrowdStrike Falcon. Use FQL filters to find specific detections by severity, status, technique, or other criteria.",
        schema_of::<SearchDetectionsParams>,
    ),
    ToolDefinition::new(
        GET_DETECTION_DETAILS,
        "Get detailed information about specific detections by their IDs.",
        schema_of::<DetectionIdsParams>,
    ),
    ToolDefinition::new(
        UPDATE_DETECTION,
        "Update detection status, assignment, or add comments. Valid statuses: new, in_progress, true_positive, false_positive, closed, reopened.",
        schema_of::<UpdateDetectionParams>,
    ),
];

//! Incidents, behaviors and CrowdScore API.

use std::borrow::Cow;

use reqwest::Method;
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use super::search::{DetailFetch, SearchEndpoints};
use super::{ClientResult, FalconClient, SearchQuery, present};

const INCIDENTS_QUERY_ENDPOINT: &str = "/incidents/queries/incidents/v1";
const INCIDENTS_ENTITIES_ENDPOINT: &str = "/incidents/entities/incidents/GET/v1";
const INCIDENT_ACTIONS_ENDPOINT: &str = "/incidents/entities/incident-actions/v1";
const BEHAVIORS_ENTITIES_ENDPOINT: &str = "/incidents/entities/behaviors/GET/v1";
const CROWDSCORE_ENDPOINT: &str = "/incidents/combined/crowdscores/v1";

const INCIDENTS: SearchEndpoints = SearchEndpoints {
    query: INCIDENTS_QUERY_ENDPOINT,
    details: INCIDENTS_ENTITIES_ENDPOINT,
    fetch: DetailFetch::PostBody,
};

/// Incident workflow status. The platform encodes these as numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum IncidentStatus {
    New = 20,
    Reopened = 25,
    InProgress = 30,
    Closed = 40,
}

impl IncidentStatus {
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for IncidentStatus {
    type Error = String;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            20 => Ok(Self::New),
            25 => Ok(Self::Reopened),
            30 => Ok(Self::InProgress),
            40 => Ok(Self::Closed),
            other => Err(format!(
                "invalid incident status {}, expected one of 20, 25, 30, 40",
                other
            )),
        }
    }
}

impl From<IncidentStatus> for u32 {
    fn from(status: IncidentStatus) -> Self {
        status.code()
    }
}

impl JsonSchema for IncidentStatus {
    fn schema_name() -> Cow<'static, str> {
        "IncidentStatus".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "integer",
            "enum": [20, 25, 30, 40],
            "description": "20=New, 25=Reopened, 30=In Progress, 40=Closed"
        })
    }
}

/// One named action in an `action_parameters` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionParameter {
    pub name: String,
    pub value: String,
}

impl ActionParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Build the incident action list: status first, then assignment, then one
/// `add_tag` per tag.
pub(crate) fn incident_action_parameters(
    status: Option<IncidentStatus>,
    assigned_to_uuid: Option<&str>,
    tags: &[String],
) -> Vec<ActionParameter> {
    let mut actions = Vec::with_capacity(tags.len() + 2);

    if let Some(status) = status {
        actions.push(ActionParameter::new("update_status", status.code().to_string()));
    }
    if let Some(uuid) = present(assigned_to_uuid) {
        actions.push(ActionParameter::new("update_assigned_to_v2", uuid));
    }
    actions.extend(tags.iter().map(|tag| ActionParameter::new("add_tag", tag.as_str())));

    actions
}

impl FalconClient {
    /// Search incidents with FQL and return the full incident records.
    pub async fn search_incidents(&self, query: &SearchQuery) -> ClientResult<Value> {
        self.search_then_fetch(INCIDENTS, query).await
    }

    /// Incident records for the given IDs.
    pub async fn get_incident_details(&self, incident_ids: &[String]) -> ClientResult<Value> {
        self.fetch_by_ids(INCIDENTS_ENTITIES_ENDPOINT, DetailFetch::PostBody, incident_ids)
            .await
    }

    /// Update status, assignee and tags of incidents in a single request.
    pub async fn update_incident(
        &self,
        incident_ids: &[String],
        status: Option<IncidentStatus>,
        assigned_to_uuid: Option<&str>,
        tags: &[String],
    ) -> ClientResult<Value> {
        let actions = incident_action_parameters(status, assigned_to_uuid, tags);
        info!(incidents = incident_ids.len(), actions = actions.len(), "Updating incidents");

        let body = json!({
            "ids": incident_ids,
            "action_parameters": actions,
        });
        self.request(Method::POST, INCIDENT_ACTIONS_ENDPOINT, Some(&body), &[])
            .await
    }

    /// Behavior records for the given behavior IDs.
    pub async fn get_behaviors(&self, behavior_ids: &[String]) -> ClientResult<Value> {
        self.fetch_by_ids(BEHAVIORS_ENTITIES_ENDPOINT, DetailFetch::PostBody, behavior_ids)
            .await
    }

    /// The environment-wide CrowdScore.
    pub async fn get_crowdscore(&self) -> ClientResult<Value> {
        self.request(Method::GET, CROWDSCORE_ENDPOINT, None, &[])
            .await
    }
}

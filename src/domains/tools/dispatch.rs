//! Typed tool calls.
//!
//! A `ToolCall` is parsed from the tool name and its JSON arguments before
//! any network traffic happens, so unknown tools and malformed arguments are
//! rejected without touching the Falcon API.

use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::definitions::{
    AlertIdsParams, BehaviorIdsParams, CreateIocParams, DetectionIdsParams, HostIdsParams,
    IncidentIdsParams, IocIdsParams, SearchAlertsParams, SearchDetectionsParams,
    SearchHostGroupsParams, SearchHostsParams, SearchIncidentsParams, SearchIocsParams,
    SearchVulnerabilitiesParams, SensorInstallersParams, UpdateAlertsParams,
    UpdateDetectionParams, UpdateIncidentParams, alerts, common::resolve_limit, detections,
    host_groups, hosts, incidents, iocs, sensors, vulnerabilities,
};
use super::error::ToolError;
use crate::client::{ClientResult, FalconClient};

/// One invocation of a catalog tool with its typed arguments.
#[derive(Debug, Clone)]
pub enum ToolCall {
    SearchHosts(SearchHostsParams),
    GetHostDetails(HostIdsParams),
    ContainHost(HostIdsParams),
    LiftContainment(HostIdsParams),
    HideHost(HostIdsParams),
    UnhideHost(HostIdsParams),
    SearchDetections(SearchDetectionsParams),
    GetDetectionDetails(DetectionIdsParams),
    UpdateDetection(UpdateDetectionParams),
    SearchIncidents(SearchIncidentsParams),
    GetIncidentDetails(IncidentIdsParams),
    UpdateIncident(UpdateIncidentParams),
    GetBehaviors(BehaviorIdsParams),
    GetCrowdScore,
    SearchIocs(SearchIocsParams),
    GetIocDetails(IocIdsParams),
    CreateIoc(CreateIocParams),
    DeleteIoc(IocIdsParams),
    SearchVulnerabilities(SearchVulnerabilitiesParams),
    SearchHostGroups(SearchHostGroupsParams),
    GetSensorInstallers(SensorInstallersParams),
    SearchAlerts(SearchAlertsParams),
    GetAlertDetails(AlertIdsParams),
    UpdateAlerts(UpdateAlertsParams),
}

fn from_arguments<T: DeserializeOwned>(arguments: &JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments.clone()))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

impl ToolCall {
    /// Parse a tool name and its arguments into a typed call.
    pub fn parse(name: &str, arguments: &JsonObject) -> Result<Self, ToolError> {
        let call = match name {
            hosts::SEARCH_HOSTS => Self::SearchHosts(from_arguments(arguments)?),
            hosts::GET_HOST_DETAILS => Self::GetHostDetails(from_arguments(arguments)?),
            hosts::CONTAIN_HOST => Self::ContainHost(from_arguments(arguments)?),
            hosts::LIFT_CONTAINMENT => Self::LiftContainment(from_arguments(arguments)?),
            hosts::HIDE_HOST => Self::HideHost(from_arguments(arguments)?),
            hosts::UNHIDE_HOST => Self::UnhideHost(from_arguments(arguments)?),
            detections::SEARCH_DETECTIONS => Self::SearchDetections(from_arguments(arguments)?),
            detections::GET_DETECTION_DETAILS => {
                Self::GetDetectionDetails(from_arguments(arguments)?)
            }
            detections::UPDATE_DETECTION => Self::UpdateDetection(from_arguments(arguments)?),
            incidents::SEARCH_INCIDENTS => Self::SearchIncidents(from_arguments(arguments)?),
            incidents::GET_INCIDENT_DETAILS => {
                Self::GetIncidentDetails(from_arguments(arguments)?)
            }
            incidents::UPDATE_INCIDENT => Self::UpdateIncident(from_arguments(arguments)?),
            incidents::GET_BEHAVIORS => Self::GetBehaviors(from_arguments(arguments)?),
            incidents::GET_CROWDSCORE => Self::GetCrowdScore,
            iocs::SEARCH_IOCS => Self::SearchIocs(from_arguments(arguments)?),
            iocs::GET_IOC_DETAILS => Self::GetIocDetails(from_arguments(arguments)?),
            iocs::CREATE_IOC => Self::CreateIoc(from_arguments(arguments)?),
            iocs::DELETE_IOC => Self::DeleteIoc(from_arguments(arguments)?),
            vulnerabilities::SEARCH_VULNERABILITIES => {
                Self::SearchVulnerabilities(from_arguments(arguments)?)
            }
            host_groups::SEARCH_HOST_GROUPS => Self::SearchHostGroups(from_arguments(arguments)?),
            sensors::GET_SENSOR_INSTALLERS => {
                Self::GetSensorInstallers(from_arguments(arguments)?)
            }
            alerts::SEARCH_ALERTS => Self::SearchAlerts(from_arguments(arguments)?),
            alerts::GET_ALERT_DETAILS => Self::GetAlertDetails(from_arguments(arguments)?),
            alerts::UPDATE_ALERTS => Self::UpdateAlerts(from_arguments(arguments)?),
            _ => return Err(ToolError::unknown_tool(name)),
        };
        Ok(call)
    }

    /// MCP name of the tool this call invokes.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SearchHosts(_) => hosts::SEARCH_HOSTS,
            Self::GetHostDetails(_) => hosts::GET_HOST_DETAILS,
            Self::ContainHost(_) => hosts::CONTAIN_HOST,
            Self::LiftContainment(_) => hosts::LIFT_CONTAINMENT,
            Self::HideHost(_) => hosts::HIDE_HOST,
            Self::UnhideHost(_) => hosts::UNHIDE_HOST,
            Self::SearchDetections(_) => detections::SEARCH_DETECTIONS,
            Self::GetDetectionDetails(_) => detections::GET_DETECTION_DETAILS,
            Self::UpdateDetection(_) => detections::UPDATE_DETECTION,
            Self::SearchIncidents(_) => incidents::SEARCH_INCIDENTS,
            Self::GetIncidentDetails(_) => incidents::GET_INCIDENT_DETAILS,
            Self::UpdateIncident(_) => incidents::UPDATE_INCIDENT,
            Self::GetBehaviors(_) => incidents::GET_BEHAVIORS,
            Self::GetCrowdScore => incidents::GET_CROWDSCORE,
            Self::SearchIocs(_) => iocs::SEARCH_IOCS,
            Self::GetIocDetails(_) => iocs::GET_IOC_DETAILS,
            Self::CreateIoc(_) => iocs::CREATE_IOC,
            Self::DeleteIoc(_) => iocs::DELETE_IOC,
            Self::SearchVulnerabilities(_) => vulnerabilities::SEARCH_VULNERABILITIES,
            Self::SearchHostGroups(_) => host_groups::SEARCH_HOST_GROUPS,
            Self::GetSensorInstallers(_) => sensors::GET_SENSOR_INSTALLERS,
            Self::SearchAlerts(_) => alerts::SEARCH_ALERTS,
            Self::GetAlertDetails(_) => alerts::GET_ALERT_DETAILS,
            Self::UpdateAlerts(_) => alerts::UPDATE_ALERTS,
        }
    }

    /// Run the call against the Falcon API.
    pub async fn execute(self, client: &FalconClient) -> ClientResult<Value> {
        match self {
            Self::SearchHosts(p) => client.search_hosts(&p.to_query()).await,
            Self::GetHostDetails(p) => client.get_host_details(&p.host_ids).await,
            Self::ContainHost(p) => client.contain_host(&p.host_ids).await,
            Self::LiftContainment(p) => client.lift_containment(&p.host_ids).await,
            Self::HideHost(p) => client.hide_host(&p.host_ids).await,
            Self::UnhideHost(p) => client.unhide_host(&p.host_ids).await,

            Self::SearchDetections(p) => client.search_detections(&p.to_query()).await,
            Self::GetDetectionDetails(p) => client.get_detection_details(&p.detection_ids).await,
            Self::UpdateDetection(p) => {
                client
                    .update_detection_status(
                        &p.detection_ids,
                        p.status,
                        p.assigned_to_uuid.as_deref(),
                        p.comment.as_deref(),
                    )
                    .await
            }

            Self::SearchIncidents(p) => client.search_incidents(&p.to_query()).await,
            Self::GetIncidentDetails(p) => client.get_incident_details(&p.incident_ids).await,
            Self::UpdateIncident(p) => {
                client
                    .update_incident(
                        &p.incident_ids,
                        p.status,
                        p.assigned_to_uuid.as_deref(),
                        p.tags.as_deref().unwrap_or_default(),
                    )
                    .await
            }
            Self::GetBehaviors(p) => client.get_behaviors(&p.behavior_ids).await,
            Self::GetCrowdScore => client.get_crowdscore().await,

            Self::SearchIocs(p) => client.search_iocs(&p.to_query()).await,
            Self::GetIocDetails(p) => client.get_ioc_details(&p.ioc_ids).await,
            Self::CreateIoc(p) => client.create_ioc(p.into_indicator()).await,
            Self::DeleteIoc(p) => client.delete_ioc(&p.ioc_ids).await,

            Self::SearchVulnerabilities(p) => {
                client
                    .search_vulnerabilities(p.filter.as_deref(), resolve_limit(p.limit), &p.facet)
                    .await
            }
            Self::SearchHostGroups(p) => client.search_host_groups(&p.to_query()).await,
            Self::GetSensorInstallers(p) => {
                client
                    .get_sensor_installer_details(p.filter.as_deref(), resolve_limit(p.limit))
                    .await
            }

            Self::SearchAlerts(p) => client.search_alerts(&p.to_query()).await,
            Self::GetAlertDetails(p) => client.get_alert_details(&p.alert_ids).await,
            Self::UpdateAlerts(p) => {
                client
                    .update_alerts(&p.alert_ids, p.action, p.value.as_deref())
                    .await
            }
        }
    }
}

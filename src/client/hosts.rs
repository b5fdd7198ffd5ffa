//! Hosts (devices) API.

use reqwest::Method;
use serde_json::{Value, json};
use tracing::info;

use super::search::{DetailFetch, SearchEndpoints};
use super::{ClientResult, FalconClient, SearchQuery};

const DEVICE_QUERY_ENDPOINT: &str = "/devices/queries/devices/v1";
const DEVICE_ENTITIES_ENDPOINT: &str = "/devices/entities/devices/v2";
const DEVICE_ACTIONS_ENDPOINT: &str = "/devices/entities/devices-actions/v2";

const HOSTS: SearchEndpoints = SearchEndpoints {
    query: DEVICE_QUERY_ENDPOINT,
    details: DEVICE_ENTITIES_ENDPOINT,
    fetch: DetailFetch::PostBody,
};

/// Actions accepted by the device actions endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// Network-isolate the host, keeping its channel to the cloud.
    Contain,
    LiftContainment,
    /// Hide the host from the console.
    Hide,
    Unhide,
}

impl HostAction {
    /// Value of the `action_name` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contain => "contain",
            Self::LiftContainment => "lift_containment",
            Self::Hide => "hide_host",
            Self::Unhide => "unhide_host",
        }
    }
}

impl FalconClient {
    /// Search hosts with FQL and return their full device records.
    pub async fn search_hosts(&self, query: &SearchQuery) -> ClientResult<Value> {
        self.search_then_fetch(HOSTS, query).await
    }

    /// Device records for the given host IDs.
    pub async fn get_host_details(&self, host_ids: &[String]) -> ClientResult<Value> {
        self.fetch_by_ids(DEVICE_ENTITIES_ENDPOINT, DetailFetch::PostBody, host_ids)
            .await
    }

    /// Apply a device action to every host in `host_ids`.
    pub async fn perform_host_action(
        &self,
        action: HostAction,
        host_ids: &[String],
    ) -> ClientResult<Value> {
        info!(action = action.as_str(), hosts = host_ids.len(), "Performing host action");

        let body = json!({ "ids": host_ids });
        let params = [("action_name", action.as_str().to_string())];
        self.request(Method::POST, DEVICE_ACTIONS_ENDPOINT, Some(&body), &params)
            .await
    }

    pub async fn contain_host(&self, host_ids: &[String]) -> ClientResult<Value> {
        self.perform_host_action(HostAction::Contain, host_ids).await
    }

    pub async fn lift_containment(&self, host_ids: &[String]) -> ClientResult<Value> {
        self.perform_host_action(HostAction::LiftContainment, host_ids)
            .await
    }

    pub async fn hide_host(&self, host_ids: &[String]) -> ClientResult<Value> {
        self.perform_host_action(HostAction::Hide, host_ids).await
    }

    pub async fn unhide_host(&self, host_ids: &[String]) -> ClientResult<Value> {
        self.perform_host_action(HostAction::Unhide, host_ids).await
    }
}

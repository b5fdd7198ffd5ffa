//! Detections API.

use reqwest::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::search::{DetailFetch, SearchEndpoints};
use super::{ClientResult, FalconClient, SearchQuery, present};

const DETECTS_QUERY_ENDPOINT: &str = "/detects/queries/detects/v1";
const DETECTS_SUMMARIES_ENDPOINT: &str = "/detects/entities/summaries/GET/v1";
const DETECTS_UPDATE_ENDPOINT: &str = "/detects/entities/detects/v2";

const DETECTIONS: SearchEndpoints = SearchEndpoints {
    query: DETECTS_QUERY_ENDPOINT,
    details: DETECTS_SUMMARIES_ENDPOINT,
    fetch: DetailFetch::PostBody,
};

/// Workflow status of a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStatus {
    New,
    InProgress,
    TruePositive,
    FalsePositive,
    Closed,
    Reopened,
}

impl FalconClient {
    /// Search detections with FQL and return their summaries.
    pub async fn search_detections(&self, query: &SearchQuery) -> ClientResult<Value> {
        self.search_then_fetch(DETECTIONS, query).await
    }

    /// Summaries for the given detection IDs.
    pub async fn get_detection_details(&self, detection_ids: &[String]) -> ClientResult<Value> {
        self.fetch_by_ids(DETECTS_SUMMARIES_ENDPOINT, DetailFetch::PostBody, detection_ids)
            .await
    }

    /// Set the status of detections, optionally reassigning and commenting.
    pub async fn update_detection_status(
        &self,
        detection_ids: &[String],
        status: DetectionStatus,
        assigned_to_uuid: Option<&str>,
        comment: Option<&str>,
    ) -> ClientResult<Value> {
        let mut body = Map::new();
        body.insert("ids".to_string(), json!(detection_ids));
        body.insert("status".to_string(), json!(status));
        if let Some(uuid) = present(assigned_to_uuid) {
            body.insert("assigned_to_uuid".to_string(), json!(uuid));
        }
        if let Some(comment) = present(comment) {
            body.insert("comment".to_string(), json!(comment));
        }

        self.request(
            Method::PATCH,
            DETECTS_UPDATE_ENDPOINT,
            Some(&Value::Object(body)),
            &[],
        )
        .await
    }
}

//! Alerts API.
//!
//! Alerts are addressed by composite IDs, so request bodies use
//! `composite_ids` where every other family uses `ids`.

use reqwest::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use super::incidents::ActionParameter;
use super::{ClientResult, FalconClient, SearchQuery};

const ALERTS_QUERY_ENDPOINT: &str = "/alerts/queries/alerts/v2";
const ALERTS_ENTITIES_ENDPOINT: &str = "/alerts/entities/alerts/v2";
const ALERTS_UPDATE_ENDPOINT: &str = "/alerts/entities/alerts/v3";

/// Update actions accepted by the alerts endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AlertAction {
    UpdateStatus,
    AssignToUuid,
    AddTag,
    RemoveTag,
    ShowInUi,
    Unassign,
}

impl AlertAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpdateStatus => "update_status",
            Self::AssignToUuid => "assign_to_uuid",
            Self::AddTag => "add_tag",
            Self::RemoveTag => "remove_tag",
            Self::ShowInUi => "show_in_ui",
            Self::Unassign => "unassign",
        }
    }
}

impl FalconClient {
    /// Query alert composite IDs. Unlike the other searches this returns the
    /// IDs as-is, without a detail fetch.
    pub async fn search_alerts(&self, query: &SearchQuery) -> ClientResult<Value> {
        self.request(Method::GET, ALERTS_QUERY_ENDPOINT, None, &query.to_params())
            .await
    }

    /// Alert records for the given composite IDs.
    pub async fn get_alert_details(&self, composite_ids: &[String]) -> ClientResult<Value> {
        let body = json!({ "composite_ids": composite_ids });
        self.request(Method::POST, ALERTS_ENTITIES_ENDPOINT, Some(&body), &[])
            .await
    }

    /// Apply one action to a set of alerts. A missing value is sent as an
    /// empty string, which is what value-less actions such as `unassign` take.
    pub async fn update_alerts(
        &self,
        composite_ids: &[String],
        action: AlertAction,
        value: Option<&str>,
    ) -> ClientResult<Value> {
        info!(action = action.as_str(), alerts = composite_ids.len(), "Updating alerts");

        let body = json!({
            "composite_ids": composite_ids,
            "action_parameters": [ActionParameter::new(action.as_str(), value.unwrap_or_default())],
        });
        self.request(Method::PATCH, ALERTS_UPDATE_ENDPOINT, Some(&body), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[test]
    fn test_action_wire_names_match_serde() {
        for action in [
            AlertAction::UpdateStatus,
            AlertAction::AssignToUuid,
            AlertAction::AddTag,
            AlertAction::RemoveTag,
            AlertAction::ShowInUi,
            AlertAction::Unassign,
        ] {
            assert_eq!(json!(action), json!(action.as_str()));
        }
    }

    #[tokio::test]
    async fn test_search_alerts_returns_ids_only() {
        let (server, client) = mock_falcon().await;
        Mock::given(method("GET"))
            .and(path(ALERTS_QUERY_ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": ["cid:1"]})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(ALERTS_ENTITIES_ENDPOINT))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let query = SearchQuery {
            sort: Some("created_timestamp|desc".to_string()),
            ..Default::default()
        };
        let result = client.search_alerts(&query).await.unwrap();
        assert_eq!(result, json!({"resources": ["cid:1"]}));
    }

    #[tokio::test]
    async fn test_alert_bodies_use_composite_ids() {
        let (server, client) = mock_falcon().await;
        Mock::given(method("POST"))
            .and(path(ALERTS_ENTITIES_ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path(ALERTS_UPDATE_ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
            .mount(&server)
            .await;

        let ids = vec!["cid:1".to_string()];
        client.get_alert_details(&ids).await.unwrap();
        client
            .update_alerts(&ids, AlertAction::AddTag, Some("triaged"))
            .await
            .unwrap();
        client
            .update_alerts(&ids, AlertAction::Unassign, None)
            .await
            .unwrap();

        let details = requests_to(&server, ALERTS_ENTITIES_ENDPOINT).await;
        assert_eq!(json_body(&details[0]), json!({"composite_ids": ["cid:1"]}));

        let updates = requests_to(&server, ALERTS_UPDATE_ENDPOINT).await;
        assert_eq!(
            json_body(&updates[0]),
            json!({
                "composite_ids": ["cid:1"],
                "action_parameters": [{"name": "add_tag", "value": "triaged"}]
            })
        );
        assert_eq!(
            json_body(&updates[1])["action_parameters"],
            json!([{"name": "unassign", "value": ""}])
        );
    }
}

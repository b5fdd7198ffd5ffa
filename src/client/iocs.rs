//! Custom indicators of compromise (IOC) API.
//!
//! Unlike the other families, both the query and the detail fetch are `GET`
//! calls, so identifiers travel as repeated `ids` query parameters.

use reqwest::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use super::search::{DetailFetch, SearchEndpoints};
use super::{ClientResult, FalconClient, SearchQuery, id_params, present};

const INDICATORS_QUERY_ENDPOINT: &str = "/iocs/queries/indicators/v1";
const INDICATORS_ENTITIES_ENDPOINT: &str = "/iocs/entities/indicators/v1";

const INDICATORS: SearchEndpoints = SearchEndpoints {
    query: INDICATORS_QUERY_ENDPOINT,
    details: INDICATORS_ENTITIES_ENDPOINT,
    fetch: DetailFetch::GetQuery,
};

/// Kind of value an indicator matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IocType {
    Sha256,
    Md5,
    Domain,
    Ipv4,
    Ipv6,
}

/// What the sensor does when the indicator matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IocAction {
    Detect,
    Prevent,
    NoAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IocPlatform {
    Windows,
    Mac,
    Linux,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IocSeverity {
    Informational,
    Low,
    Medium,
    High,
    Critical,
}

/// An indicator to create. Always applied globally; optional fields are left
/// out of the request entirely when not set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewIndicator {
    #[serde(rename = "type")]
    pub indicator_type: IocType,
    pub value: String,
    pub action: IocAction,
    pub platforms: Vec<IocPlatform>,
    applied_globally: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<IocSeverity>,
    /// ISO 8601 timestamp after which the indicator is retired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl NewIndicator {
    pub fn new(
        indicator_type: IocType,
        value: impl Into<String>,
        action: IocAction,
        platforms: Vec<IocPlatform>,
    ) -> Self {
        Self {
            indicator_type,
            value: value.into(),
            action,
            platforms,
            applied_globally: true,
            description: None,
            severity: None,
            expiration: None,
            tags: None,
        }
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = present(description).map(str::to_string);
        self
    }

    pub fn with_severity(mut self, severity: Option<IocSeverity>) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_expiration(mut self, expiration: Option<&str>) -> Self {
        self.expiration = present(expiration).map(str::to_string);
        self
    }

    pub fn with_tags(mut self, tags: Option<Vec<String>>) -> Self {
        self.tags = tags;
        self
    }
}

impl FalconClient {
    /// Search custom indicators with FQL and return the full records.
    pub async fn search_iocs(&self, query: &SearchQuery) -> ClientResult<Value> {
        self.search_then_fetch(INDICATORS, query).await
    }

    /// Indicator records for the given IDs.
    pub async fn get_ioc_details(&self, ioc_ids: &[String]) -> ClientResult<Value> {
        self.fetch_by_ids(INDICATORS_ENTITIES_ENDPOINT, DetailFetch::GetQuery, ioc_ids)
            .await
    }

    /// Create one custom indicator.
    pub async fn create_ioc(&self, indicator: NewIndicator) -> ClientResult<Value> {
        info!(
            indicator_type = ?indicator.indicator_type,
            action = ?indicator.action,
            "Creating custom indicator"
        );

        let body = json!({ "indicators": [indicator] });
        self.request(Method::POST, INDICATORS_ENTITIES_ENDPOINT, Some(&body), &[])
            .await
    }

    /// Delete custom indicators by ID.
    pub async fn delete_ioc(&self, ioc_ids: &[String]) -> ClientResult<Value> {
        info!(indicators = ioc_ids.len(), "Deleting custom indicators");

        self.request(
            Method::DELETE,
            INDICATORS_ENTITIES_ENDPOINT,
            None,
            &id_params("ids", ioc_ids),
        )
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
    fn test_required_fields_only() {
        let indicator = NewIndicator::new(
            IocType::Sha256,
            "a".repeat(64),
            IocAction::Detect,
            vec![IocPlatform::Windows, IocPlatform::Linux],
        )
        .with_description(None)
        .with_expiration(Some(""));

        let value = json!(indicator);
        let object = value.as_object().unwrap();
        assert_eq!(object["applied_globally"], json!(true));
        assert_eq!(object["type"], json!("sha256"));
        assert_eq!(object["platforms"], json!(["windows", "linux"]));
        for key in ["description", "severity", "expiration", "tags"] {
            assert!(!object.contains_key(key), "unexpected key {}", key);
        }
    }

    #[test]
    fn test_optional_fields_included_when_set() {
        let indicator = NewIndicator::new(IocType::Domain, "evil.example", IocAction::Prevent, vec![])
            .with_description(Some("C2 domain"))
            .with_severity(Some(IocSeverity::High))
            .with_expiration(Some("2030-12-31T23:59:59Z"))
            .with_tags(Some(vec!["apt".to_string()]));

        assert_eq!(
            json!(indicator),
            json!({
                "type": "domain",
                "value": "evil.example",
                "action": "prevent",
                "platforms": [],
                "applied_globally": true,
                "description": "C2 domain",
                "severity": "high",
                "expiration": "2030-12-31T23:59:59Z",
                "tags": ["apt"]
            })
        );
    }

    #[tokio::test]
    async fn test_search_iocs_fetches_via_query_params() {
        let (server, client) = mock_falcon().await;
        Mock::given(method("GET"))
            .and(path(INDICATORS_QUERY_ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": ["i1", "i2"]})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(INDICATORS_ENTITIES_ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": [{"id": "i1"}]})))
            .expect(1)
            .mount(&server)
            .await;

        client.search_iocs(&SearchQuery::default()).await.unwrap();

        let details = requests_to(&server, INDICATORS_ENTITIES_ENDPOINT).await;
        assert_eq!(
            query_pairs(&details[0]),
            vec![
                ("ids".to_string(), "i1".to_string()),
                ("ids".to_string(), "i2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_ioc_wraps_single_indicator() {
        let (server, client) = mock_falcon().await;
        Mock::given(method("POST"))
            .and(path(INDICATORS_ENTITIES_ENDPOINT))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"resources": [{"id": "new"}]})))
            .expect(1)
            .mount(&server)
            .await;

        let indicator =
            NewIndicator::new(IocType::Ipv4, "10.0.0.1", IocAction::NoAction, vec![IocPlatform::Mac]);
        let created = client.create_ioc(indicator).await.unwrap();
        assert_eq!(created["resources"][0]["id"], "new");

        let requests = requests_to(&server, INDICATORS_ENTITIES_ENDPOINT).await;
        assert_eq!(
            json_body(&requests[0]),
            json!({"indicators": [{
                "type": "ipv4",
                "value": "10.0.0.1",
                "action": "no_action",
                "platforms": ["mac"],
                "applied_globally": true
            }]})
        );
    }

    #[tokio::test]
    async fn test_delete_ioc_uses_query_ids() {
        let (server, client) = mock_falcon().await;
        Mock::given(method("DELETE"))
            .and(path(INDICATORS_ENTITIES_ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": ["i1"]})))
            .expect(1)
            .mount(&server)
            .await;

        client.delete_ioc(&["i1".to_string()]).await.unwrap();

        let requests = requests_to(&server, INDICATORS_ENTITIES_ENDPOINT).await;
        assert_eq!(query_pairs(&requests[0]), vec![("ids".to_string(), "i1".to_string())]);
        assert!(requests[0].body.is_empty());
    }
}

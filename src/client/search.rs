//! The query-then-fetch pattern shared by every "search" operation.
//!
//! Falcon query endpoints return identifiers only. A search therefore runs the
//! query, stops with an empty result when nothing matched, and otherwise
//! fetches the full records for exactly the returned IDs, in order.

use reqwest::Method;
use serde_json::{Value, json};
use tracing::debug;

use super::{ClientResult, FalconClient, QueryParams, id_params, present};

/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: u32 = 100;

/// Paging and filtering arguments for a query endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// FQL filter expression, passed through untouched.
    pub filter: Option<String>,
    pub limit: u32,
    pub offset: Option<u32>,
    /// Sort expression such as `last_seen|desc`.
    pub sort: Option<String>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            filter: None,
            limit: DEFAULT_LIMIT,
            offset: None,
            sort: None,
        }
    }
}

impl SearchQuery {
    /// Query parameters for this search. `limit` is always present; the rest
    /// only when they carry a value.
    pub fn to_params(&self) -> QueryParams {
        let mut params: QueryParams = vec![("limit", self.limit.to_string())];
        if let Some(filter) = present(self.filter.as_deref()) {
            params.push(("filter", filter.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(sort) = present(self.sort.as_deref()) {
            params.push(("sort", sort.to_string()));
        }
        params
    }
}

/// How a detail endpoint expects to receive the identifier list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DetailFetch {
    /// `POST` with a JSON body of `{"ids": [...]}`.
    PostBody,
    /// `GET` with one `ids` query parameter per identifier.
    GetQuery,
}

/// The pair of endpoints behind one searchable resource family.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchEndpoints {
    pub query: &'static str,
    pub details: &'static str,
    pub fetch: DetailFetch,
}

/// The result returned when a query matched nothing.
pub(crate) fn empty_resources() -> Value {
    json!({ "resources": [] })
}

impl FalconClient {
    /// Run a query endpoint and then fetch details for the IDs it returned.
    pub(crate) async fn search_then_fetch(
        &self,
        endpoints: SearchEndpoints,
        query: &SearchQuery,
    ) -> ClientResult<Value> {
        let ids = self.query_ids(endpoints.query, &query.to_params()).await?;

        if ids.is_empty() {
            debug!(endpoint = endpoints.query, "Query matched no resources");
            return Ok(empty_resources());
        }

        debug!(endpoint = endpoints.details, count = ids.len(), "Fetching details");
        self.fetch_by_ids(endpoints.details, endpoints.fetch, &ids)
            .await
    }

    /// Call a query endpoint and collect the identifiers it returned.
    pub(crate) async fn query_ids(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> ClientResult<Vec<String>> {
        let response = self.request(Method::GET, endpoint, None, params).await?;

        Ok(response
            .get("resources")
            .and_then(Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Fetch full records for `ids` from a detail endpoint.
    pub(crate) async fn fetch_by_ids(
        &self,
        endpoint: &str,
        fetch: DetailFetch,
        ids: &[String],
    ) -> ClientResult<Value> {
        match fetch {
            DetailFetch::PostBody => {
                let body = json!({ "ids": ids });
                self.request(Method::POST, endpoint, Some(&body), &[]).await
            }
            DetailFetch::GetQuery => {
                self.request(Method::GET, endpoint, None, &id_params("ids", ids))
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    const QUERY: &str = "/things/queries/things/v1";
    const DETAILS: &str = "/things/entities/things/v1";

    #[test]
    fn test_params_only_limit_by_default() {
        assert_eq!(SearchQuery::default().to_params(), vec![("limit", "100".to_string())]);
    }

    #[test]
    fn test_params_skip_empty_text() {
        let query = SearchQuery {
            filter: Some(String::new()),
            limit: 5,
            offset: Some(10),
            sort: Some("name|asc".to_string()),
        };
        assert_eq!(
            query.to_params(),
            vec![
                ("limit", "5".to_string()),
                ("offset", "10".to_string()),
                ("sort", "name|asc".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_query_skips_detail_fetch() {
        let (server, client) = mock_falcon().await;
        Mock::given(method("GET"))
            .and(path(QUERY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(DETAILS))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let endpoints = SearchEndpoints {
            query: QUERY,
            details: DETAILS,
            fetch: DetailFetch::PostBody,
        };
        let result = client
            .search_then_fetch(endpoints, &SearchQuery::default())
            .await
            .unwrap();
        assert_eq!(result, json!({"resources": []}));
    }

    #[tokio::test]
    async fn test_null_resources_treated_as_empty() {
        let (server, client) = mock_falcon().await;
        Mock::given(method("GET"))
            .and(path(QUERY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": null})))
            .mount(&server)
            .await;

        let endpoints = SearchEndpoints {
            query: QUERY,
            details: DETAILS,
            fetch: DetailFetch::GetQuery,
        };
        let result = client
            .search_then_fetch(endpoints, &SearchQuery::default())
            .await
            .unwrap();
        assert_eq!(result, empty_resources());
        assert!(requests_to(&server, DETAILS).await.is_empty());
    }

    #[tokio::test]
    async fn test_ids_forwarded_in_body_order() {
        let (server, client) = mock_falcon().await;
        Mock::given(method("GET"))
            .and(path(QUERY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": ["a", "b"]})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(DETAILS))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"resources": [{"id": "a"}, {"id": "b"}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let endpoints = SearchEndpoints {
            query: QUERY,
            details: DETAILS,
            fetch: DetailFetch::PostBody,
        };
        let result = client
            .search_then_fetch(endpoints, &SearchQuery::default())
            .await
            .unwrap();
        assert_eq!(result["resources"][1]["id"], "b");

        let details = requests_to(&server, DETAILS).await;
        assert_eq!(json_body(&details[0]), json!({"ids": ["a", "b"]}));
    }

    #[tokio::test]
    async fn test_ids_forwarded_as_repeated_query_params() {
        let (server, client) = mock_falcon().await;
        Mock::given(method("GET"))
            .and(path(QUERY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": ["a", "b"]})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(DETAILS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
            .expect(1)
            .mount(&server)
            .await;

        let endpoints = SearchEndpoints {
            query: QUERY,
            details: DETAILS,
            fetch: DetailFetch::GetQuery,
        };
        client
            .search_then_fetch(endpoints, &SearchQuery::default())
            .await
            .unwrap();

        let details = requests_to(&server, DETAILS).await;
        assert_eq!(
            query_pairs(&details[0]),
            vec![
                ("ids".to_string(), "a".to_string()),
                ("ids".to_string(), "b".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_query_failure_stops_search() {
        let (server, client) = mock_falcon().await;
        Mock::given(method("GET"))
            .and(path(QUERY))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"errors": [{"message": "invalid filter"}]})),
            )
            .mount(&server)
            .await;

        let endpoints = SearchEndpoints {
            query: QUERY,
            details: DETAILS,
            fetch: DetailFetch::PostBody,
        };
        let err = client
            .search_then_fetch(endpoints, &SearchQuery::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API request failed: invalid filter");
        assert!(requests_to(&server, DETAILS).await.is_empty());
    }
}

//! Spotlight vulnerabilities API.

use reqwest::Method;
use serde_json::Value;

use super::{ClientResult, FalconClient, QueryParams, present};

const VULNERABILITIES_ENDPOINT: &str = "/spotlight/combined/vulnerabilities/v1";

impl FalconClient {
    /// Search vulnerabilities. Each facet becomes its own `facet` parameter.
    pub async fn search_vulnerabilities(
        &self,
        filter: Option<&str>,
        limit: u32,
        facets: &[String],
    ) -> ClientResult<Value> {
        let mut params: QueryParams = vec![("limit", limit.to_string())];
        if let Some(filter) = present(filter) {
            params.push(("filter", filter.to_string()));
        }
        params.extend(facets.iter().map(|facet| ("facet", facet.clone())));

        self.request(Method::GET, VULNERABILITIES_ENDPOINT, None, &params)
            .await
    }
}

//! Host groups API.

use serde_json::Value;

use super::search::{DetailFetch, SearchEndpoints};
use super::{ClientResult, FalconClient, SearchQuery};

const HOST_GROUPS: SearchEndpoints = SearchEndpoints {
    query: "/devices/queries/host-groups/v1",
    details: "/devices/entities/host-groups/v1",
    fetch: DetailFetch::GetQuery,
};

impl FalconClient {
    /// Search host groups with FQL and return the full group records.
    pub async fn search_host_groups(&self, query: &SearchQuery) -> ClientResult<Value> {
        self.search_then_fetch(HOST_GROUPS, query).await
    }
}

//! Sensor installers API.

use reqwest::Method;
use serde_json::Value;

use super::{ClientResult, FalconClient, QueryParams, present};

const INSTALLERS_ENDPOINT: &str = "/sensors/combined/installers/v2";

impl FalconClient {
    /// Metadata for the sensor installers available to this tenant.
    pub async fn get_sensor_installer_details(
        &self,
        filter: Option<&str>,
        limit: u32,
    ) -> ClientResult<Value> {
        let mut params: QueryParams = vec![("limit", limit.to_string())];
        if let Some(filter) = present(filter) {
            params.push(("filter", filter.to_string()));
        }

        self.request(Method::GET, INSTALLERS_ENDPOINT, None, &params)
            .await
    }
}

//! Sensor installer tool.

use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{ToolDefinition, lenient_count, schema_of};

pub const GET_SENSOR_INSTALLERS: &str = "crowdstrike_get_sensor_installers";

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SensorInstallersParams {
    /// FQL filter for installers. Example: 'platform:windows'
    #[serde(default)]
    pub filter: Option<String>,

    /// Maximum number of installers to return (default: 100)
    #[serde(default, deserialize_with = "lenient_count")]
    pub limit: Option<u32>,
}

pub static TOOLS: [ToolDefinition; 1] = [ToolDefinition::new(
    GET_SENSOR_INSTALLERS,
    "Get information about available Falcon sensor installers for deployment. Includes version info and download details.",
    schema_of::<SensorInstallersParams>,
)];

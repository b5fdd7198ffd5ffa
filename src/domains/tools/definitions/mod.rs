//! Tool definitions module.
//!
//! One file per Falcon resource family. Each file declares the tool names,
//! the typed parameter structs and the `TOOLS` metadata table of its family.

pub mod alerts;
pub mod common;
pub mod detections;
pub mod host_groups;
pub mod hosts;
pub mod incidents;
pub mod iocs;
pub mod sensors;
pub mod vulnerabilities;

pub use alerts::{AlertIdsParams, SearchAlertsParams, UpdateAlertsParams};
pub use common::{NoParams, ToolDefinition, error_result, success_result};
pub use detections::{DetectionIdsParams, SearchDetectionsParams, UpdateDetectionParams};
pub use host_groups::SearchHostGroupsParams;
pub use hosts::{HostIdsParams, SearchHostsParams};
pub use incidents::{
    BehaviorIdsParams, IncidentIdsParams, SearchIncidentsParams, UpdateIncidentParams,
};
pub use iocs::{CreateIocParams, IocIdsParams, SearchIocsParams};
pub use sensors::SensorInstallersParams;
pub use vulnerabilities::SearchVulnerabilitiesParams;

/// Every tool in catalog order.
pub fn all() -> impl Iterator<Item = &'static ToolDefinition> {
    hosts::TOOLS
        .iter()
        .chain(detections::TOOLS.iter())
        .chain(incidents::TOOLS.iter())
        .chain(iocs::TOOLS.iter())
        .chain(vulnerabilities::TOOLS.iter())
        .chain(host_groups::TOOLS.iter())
        .chain(sensors::TOOLS.iter())
        .chain(alerts::TOOLS.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_24_unique_tools() {
        let names: HashSet<_> = all().map(|definition| definition.name).collect();
        assert_eq!(names.len(), 24);
        assert!(names.iter().all(|name| name.starts_with("crowdstrike_")));
    }

    #[test]
    fn test_every_schema_is_an_object() {
        for definition in all() {
            let tool = definition.to_tool();
            assert_eq!(
                tool.input_schema.get("type").and_then(|t| t.as_str()),
                Some("object"),
                "{} schema is not an object",
                definition.name
            );
        }
    }
}

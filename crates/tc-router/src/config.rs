//! Planner configuration.
//!
//! The JSON shape matches the `routing_settings` section of a base-request
//! document; everything else in the document is ignored:
//!
//! ```json
//! { "routing_settings": { "bus_wait_time": 6, "bus_velocity": 40 } }
//! ```
//!
//! A document without `routing_settings` disables routing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use tc_core::RoutingSettings;

use crate::RouterResult;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub routing_settings: Option<RoutingSettings>,
}

impl PlannerConfig {
    /// Routing enabled with the given settings.
    pub fn with_settings(settings: RoutingSettings) -> Self {
        Self { routing_settings: Some(settings) }
    }

    pub fn from_json_str(json: &str) -> RouterResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> RouterResult<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}

use serde::{Deserialize, Serialize};

use crate::waypoint::WaypointRecord;

pub const JOURNEY_VERSION: &str = "1.0";

/// On-disk journey document: `{ "version": "1.0", "waypoints": [...] }`.
///
/// Waypoint order in the document is the timeline order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JourneyDocument {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub waypoints: Vec<WaypointRecord>,
}

impl JourneyDocument {
    pub fn new(waypoints: Vec<WaypointRecord>) -> Self {
        Self {
            version: JOURNEY_VERSION.to_string(),
            name: None,
            waypoints,
        }
    }
}

use foundation::math::GeoCoord;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Presentation category. Never used for control flow beyond picking a color
/// or icon.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Intro,
    Education,
    Work,
    #[serde(alias = "awards")]
    Award,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Intro => "intro",
            Category::Education => "education",
            Category::Work => "work",
            Category::Award => "award",
        }
    }
}

/// A waypoint as it appears in a journey document, before validation.
///
/// Field aliases accept the older timeline export (`title`, `year`, `type`,
/// `technologies`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRecord {
    pub id: String,
    #[serde(alias = "title")]
    pub label: String,
    #[serde(default, alias = "year")]
    pub sub_label: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "type")]
    pub category: Category,
    /// `[latitude, longitude]` in degrees.
    pub coordinates: [f64; 2],
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, alias = "technologies")]
    pub tags: Vec<String>,
}

/// One validated stop on the journey.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub id: String,
    pub label: String,
    pub sub_label: String,
    pub location: String,
    pub description: String,
    pub category: Category,
    pub coordinate: GeoCoord,
    pub color: Rgba,
    pub tags: Vec<String>,
}

impl Waypoint {
    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }

    pub fn to_record(&self) -> WaypointRecord {
        WaypointRecord {
            id: self.id.clone(),
            label: self.label.clone(),
            sub_label: self.sub_label.clone(),
            location: self.location.clone(),
            description: self.description.clone(),
            category: self.category,
            coordinates: [self.coordinate.lat_deg, self.coordinate.lon_deg],
            color: Some(self.color.to_hex()),
            tags: self.tags.clone(),
        }
    }
}

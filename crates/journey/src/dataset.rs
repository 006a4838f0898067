use std::collections::HashSet;
use std::fs;
use std::path::Path;

use foundation::math::GeoCoord;
use tracing::warn;

use crate::color::Rgba;
use crate::document::{JOURNEY_VERSION, JourneyDocument};
use crate::error::JourneyError;
use crate::waypoint::{Category, Waypoint, WaypointRecord};

/// What to do with a coordinate outside [-90, 90] x [-180, 180].
///
/// Non-finite coordinates are rejected under both policies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CoordinatePolicy {
    #[default]
    Reject,
    Clamp,
}

/// The ordered, immutable, non-empty list of waypoints a journey view shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    name: Option<String>,
    waypoints: Vec<Waypoint>,
}

impl Journey {
    pub fn new(
        records: Vec<WaypointRecord>,
        policy: CoordinatePolicy,
    ) -> Result<Self, JourneyError> {
        if records.is_empty() {
            return Err(JourneyError::Empty);
        }

        let mut seen = HashSet::with_capacity(records.len());
        let mut waypoints = Vec::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.id.clone()) {
                return Err(JourneyError::DuplicateId(record.id));
            }
            waypoints.push(validate_record(record, policy)?);
        }

        Ok(Self {
            name: None,
            waypoints,
        })
    }

    pub fn from_document(
        doc: JourneyDocument,
        policy: CoordinatePolicy,
    ) -> Result<Self, JourneyError> {
        if doc.version != JOURNEY_VERSION {
            return Err(JourneyError::UnsupportedVersion { found: doc.version });
        }
        let mut journey = Self::new(doc.waypoints, policy)?;
        journey.name = doc.name;
        Ok(journey)
    }

    pub fn from_json_str(payload: &str, policy: CoordinatePolicy) -> Result<Self, JourneyError> {
        let doc: JourneyDocument = serde_json::from_str(payload).map_err(JourneyError::Parse)?;
        Self::from_document(doc, policy)
    }

    pub fn load(path: impl AsRef<Path>, policy: CoordinatePolicy) -> Result<Self, JourneyError> {
        let path = path.as_ref();
        let payload = fs::read_to_string(path).map_err(|source| JourneyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&payload, policy)
    }

    pub fn to_document(&self) -> JourneyDocument {
        JourneyDocument {
            version: JOURNEY_VERSION.to_string(),
            name: self.name.clone(),
            waypoints: self.waypoints.iter().map(Waypoint::to_record).collect(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always `false`; construction rejects empty journeys.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.waypoints.len() - 1
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn first(&self) -> &Waypoint {
        &self.waypoints[0]
    }

    /// The waypoint at `index`, or the first waypoint when out of range.
    pub fn get_or_first(&self, index: usize) -> &Waypoint {
        self.waypoints.get(index).unwrap_or_else(|| self.first())
    }

    /// Clamps a step index into `[0, len - 1]`.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.last_index())
    }

    /// Whether `index` is the overview entry: an intro waypoint at the head
    /// of the timeline.
    pub fn is_sentinel(&self, index: usize) -> bool {
        index == 0 && self.waypoints[0].category == Category::Intro
    }

    /// Waypoints that get a marker on the globe, with their timeline index.
    pub fn non_sentinel(&self) -> impl Iterator<Item = (usize, &Waypoint)> + '_ {
        self.waypoints
            .iter()
            .enumerate()
            .filter(move |(i, _)| !self.is_sentinel(*i))
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.waypoints.iter().position(|w| w.id == id)
    }
}

fn validate_record(
    record: WaypointRecord,
    policy: CoordinatePolicy,
) -> Result<Waypoint, JourneyError> {
    let [lat, lon] = record.coordinates;
    let coordinate = match policy {
        CoordinatePolicy::Reject => GeoCoord::validated(lat, lon),
        CoordinatePolicy::Clamp => GeoCoord::clamped(lat, lon),
    }
    .map_err(|source| JourneyError::InvalidCoordinate {
        id: record.id.clone(),
        source,
    })?;

    if coordinate.lat_deg != lat || coordinate.lon_deg != lon {
        warn!(
            id = %record.id,
            lat, lon,
            clamped_lat = coordinate.lat_deg,
            clamped_lon = coordinate.lon_deg,
            "waypoint coordinate clamped into range"
        );
    }

    let color = match record.color.as_deref() {
        None => Rgba::WHITE,
        Some(value) => Rgba::parse_hex(value).ok_or_else(|| JourneyError::InvalidColor {
            id: record.id.clone(),
            value: value.to_string(),
        })?,
    };

    Ok(Waypoint {
        id: record.id,
        label: record.label,
        sub_label: record.sub_label,
        location: record.location,
        description: record.description,
        category: record.category,
        coordinate,
        color,
        tags: record.tags,
    })
}

use std::fmt;
use std::path::PathBuf;

use foundation::math::GeoCoordError;

#[derive(Debug)]
pub enum JourneyError {
    Empty,
    DuplicateId(String),
    InvalidCoordinate {
        id: String,
        source: GeoCoordError,
    },
    InvalidColor {
        id: String,
        value: String,
    },
    UnsupportedVersion {
        found: String,
    },
    Parse(serde_json::Error),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for JourneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JourneyError::Empty => write!(f, "journey has no waypoints"),
            JourneyError::DuplicateId(id) => write!(f, "duplicate waypoint id: {id}"),
            JourneyError::InvalidCoordinate { id, source } => {
                write!(f, "waypoint {id} has an invalid coordinate: {source}")
            }
            JourneyError::InvalidColor { id, value } => {
                write!(f, "waypoint {id} has an invalid color: {value}")
            }
            JourneyError::UnsupportedVersion { found } => {
                write!(f, "unsupported journey document version: {found}")
            }
            JourneyError::Parse(err) => write!(f, "journey document parse error: {err}"),
            JourneyError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for JourneyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JourneyError::InvalidCoordinate { source, .. } => Some(source),
            JourneyError::Parse(err) => Some(err),
            JourneyError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

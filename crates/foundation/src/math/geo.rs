use std::fmt;

/// Geographic coordinate in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoCoord {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

/// Why a coordinate was rejected.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GeoCoordError {
    NotFinite,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl fmt::Display for GeoCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoCoordError::NotFinite => write!(f, "coordinate is not finite"),
            GeoCoordError::LatitudeOutOfRange(v) => {
                write!(f, "latitude {v} is outside [-90, 90]")
            }
            GeoCoordError::LongitudeOutOfRange(v) => {
                write!(f, "longitude {v} is outside [-180, 180]")
            }
        }
    }
}

impl std::error::Error for GeoCoordError {}

impl GeoCoord {
    pub const fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// Accepts the coordinate only if it already lies in the valid ranges.
    pub fn validated(lat_deg: f64, lon_deg: f64) -> Result<Self, GeoCoordError> {
        if !lat_deg.is_finite() || !lon_deg.is_finite() {
            return Err(GeoCoordError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&lat_deg) {
            return Err(GeoCoordError::LatitudeOutOfRange(lat_deg));
        }
        if !(-180.0..=180.0).contains(&lon_deg) {
            return Err(GeoCoordError::LongitudeOutOfRange(lon_deg));
        }
        Ok(Self::new(lat_deg, lon_deg))
    }

    /// Clamps latitude into [-90, 90] and wraps longitude into [-180, 180].
    ///
    /// Non-finite input has no meaningful clamp and is still rejected.
    pub fn clamped(lat_deg: f64, lon_deg: f64) -> Result<Self, GeoCoordError> {
        if !lat_deg.is_finite() || !lon_deg.is_finite() {
            return Err(GeoCoordError::NotFinite);
        }
        Ok(Self::new(lat_deg.clamp(-90.0, 90.0), wrap_lon_deg(lon_deg)))
    }
}

/// Wraps a longitude into [-180, 180], keeping +180 as +180.
pub fn wrap_lon_deg(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        return lon;
    }
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}

use serde::{Deserialize, Serialize};

/// Pursuit tuning. Gains are expressed per frame at `reference_hz` and
/// rescaled for the actual elapsed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub rotation_gain: f64,
    pub distance_gain: f64,
    /// `K` in `(1 - alignment)^2 * K`.
    pub zoom_out_gain: f64,
    /// Resting altitude above the globe surface for ordinary waypoints.
    pub focus_altitude: f64,
    /// Resting altitude for the intro/overview waypoint.
    pub overview_altitude: f64,
    pub max_altitude: f64,
    pub reference_hz: f64,
    /// Larger frame gaps (tab switch, breakpoint) are treated as this long.
    pub max_dt_s: f64,
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    pub initial_eye: [f64; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            rotation_gain: 0.03,
            distance_gain: 0.03,
            zoom_out_gain: 40.0,
            focus_altitude: 3.5,
            overview_altitude: 8.0,
            max_altitude: 12.0,
            reference_hz: 60.0,
            max_dt_s: 0.1,
            fov_y_deg: 35.0,
            near: 0.1,
            far: 1000.0,
            initial_eye: [0.0, 0.0, 10.0],
        }
    }
}

impl CameraConfig {
    pub fn min_distance(&self, radius: f64, overview: bool) -> f64 {
        let altitude = if overview {
            self.overview_altitude
        } else {
            self.focus_altitude
        };
        radius + altitude.max(0.0)
    }

    pub fn max_distance(&self, radius: f64) -> f64 {
        radius + self.max_altitude.max(self.overview_altitude).max(self.focus_altitude).max(0.0)
    }

    pub fn clamp_dt(&self, dt_s: f64) -> f64 {
        if dt_s.is_finite() {
            dt_s.clamp(0.0, self.max_dt_s.max(0.0))
        } else {
            0.0
        }
    }
}

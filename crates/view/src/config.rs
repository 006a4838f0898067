use camera::CameraConfig;
use foundation::math::{DEFAULT_LON_OFFSET_DEG, GlobeFrame};
use layers::{ArcStyle, GlobeStyle, MarkerStyle, NarrativeTiming};
use runtime::EventBus;
use serde::{Deserialize, Serialize};
use tracking::{AutoplaySource, TrackingConfig};

use crate::error::ViewError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub radius: f64,
    /// Texture calibration; see [`foundation::math::project_with_offset`].
    pub lon_offset_deg: f64,
    #[serde(flatten)]
    pub style: GlobeStyle,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: 3.5,
            lon_offset_deg: DEFAULT_LON_OFFSET_DEG,
            style: GlobeStyle::default(),
        }
    }
}

impl GlobeConfig {
    pub fn frame(&self) -> GlobeFrame {
        GlobeFrame::new(self.radius, self.lon_offset_deg)
    }
}

/// Everything tunable about a journey view. Every field has a default, so a
/// partial JSON document overrides only what it names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub globe: GlobeConfig,
    pub camera: CameraConfig,
    pub markers: MarkerStyle,
    pub arcs: ArcStyle,
    pub narrative: NarrativeTiming,
    pub tracking: TrackingConfig,
    pub event_capacity: Option<usize>,
}

impl ViewConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ViewError> {
        let config: ViewConfig = serde_json::from_str(payload)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ViewError> {
        if !(self.globe.radius.is_finite() && self.globe.radius > 0.0) {
            return Err(ViewError::InvalidConfig("globe.radius must be positive"));
        }
        if !self.globe.lon_offset_deg.is_finite() {
            return Err(ViewError::InvalidConfig("globe.lon_offset_deg must be finite"));
        }
        self.validate_camera()?;
        if self.arcs.segments == 0 {
            return Err(ViewError::InvalidConfig("arcs.segments must be at least 1"));
        }
        let interval = self.tracking.autoplay_interval_s;
        if !(interval.is_finite() && interval >= AutoplaySource::MIN_INTERVAL_S) {
            return Err(ViewError::InvalidConfig(
                "tracking.autoplay_interval_s must be at least 0.05",
            ));
        }
        Ok(())
    }

    fn validate_camera(&self) -> Result<(), ViewError> {
        let camera = &self.camera;
        if !(camera.reference_hz.is_finite() && camera.reference_hz > 0.0) {
            return Err(ViewError::InvalidConfig("camera.reference_hz must be positive"));
        }
        if !(camera.max_dt_s.is_finite() && camera.max_dt_s >= 0.0) {
            return Err(ViewError::InvalidConfig("camera.max_dt_s must not be negative"));
        }
        if !(camera.fov_y_deg.is_finite() && camera.fov_y_deg > 0.0 && camera.fov_y_deg < 180.0) {
            return Err(ViewError::InvalidConfig("camera.fov_y_deg must be inside (0, 180)"));
        }
        if !(camera.near.is_finite() && camera.near > 0.0) {
            return Err(ViewError::InvalidConfig("camera.near must be positive"));
        }
        if !(camera.far.is_finite() && camera.far > camera.near) {
            return Err(ViewError::InvalidConfig("camera.far must be beyond camera.near"));
        }
        let [x, y, z] = camera.initial_eye;
        let eye_distance = (x * x + y * y + z * z).sqrt();
        if !(eye_distance.is_finite() && eye_distance > self.globe.radius) {
            return Err(ViewError::InvalidConfig("camera.initial_eye must lie outside the globe"));
        }
        Ok(())
    }

    pub fn event_capacity(&self) -> usize {
        self.event_capacity.unwrap_or(EventBus::<()>::DEFAULT_CAPACITY)
    }
}

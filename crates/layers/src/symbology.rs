use journey::Rgba;
use serde::{Deserialize, Serialize};

/// Look of a waypoint marker in its two states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub active_scale: f32,
    pub inactive_scale: f32,
    pub active_opacity: f32,
    pub inactive_opacity: f32,
    /// Core dot radius at scale 1, in globe units.
    pub dot_radius: f32,
    pub ring_inner: f32,
    pub ring_outer: f32,
    /// Ring opacity relative to the dot.
    pub ring_opacity_factor: f32,
    pub light: PointLightStyle,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            active_scale: 1.5,
            inactive_scale: 0.8,
            active_opacity: 1.0,
            inactive_opacity: 0.4,
            dot_radius: 0.04,
            ring_inner: 0.06,
            ring_outer: 0.08,
            ring_opacity_factor: 0.5,
            light: PointLightStyle::default(),
        }
    }
}

/// Highlight light attached to the active marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLightStyle {
    pub enabled: bool,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
}

impl Default for PointLightStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: 2.0,
            distance: 2.0,
            decay: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcStyle {
    pub segments: usize,
    /// Apex lift as a fraction of the chord length.
    pub height_factor: f64,
    pub active_color: Rgba,
    pub active_opacity: f32,
    pub inactive_color: Rgba,
    pub inactive_opacity: f32,
}

impl Default for ArcStyle {
    fn default() -> Self {
        Self {
            segments: 40,
            height_factor: 0.5,
            active_color: Rgba::rgb(0x60, 0xa5, 0xfa),
            active_opacity: 0.8,
            inactive_color: Rgba::rgb(0x33, 0x33, 0x33),
            inactive_opacity: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeStyle {
    /// Cloud shell spin at 60 Hz in the original look: 0.0002 rad per frame.
    pub cloud_rotation_rad_per_s: f64,
    /// Cloud shell radius relative to the globe.
    pub cloud_scale: f64,
    pub base_color: Rgba,
    pub land_glow: Rgba,
    pub atmosphere_color: Rgba,
    pub texture_url: Option<String>,
}

impl Default for GlobeStyle {
    fn default() -> Self {
        Self {
            cloud_rotation_rad_per_s: 0.012,
            cloud_scale: 1.02,
            base_color: Rgba::rgb(0x05, 0x05, 0x10),
            land_glow: Rgba::rgb(0x20, 0x40, 0x60),
            atmosphere_color: Rgba::rgb(0x44, 0x88, 0xff),
            texture_url: None,
        }
    }
}

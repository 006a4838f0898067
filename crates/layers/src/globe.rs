use std::f64::consts::TAU;

use journey::Rgba;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::layer::{Layer, LayerId};
use crate::symbology::GlobeStyle;

/// Load state of the globe's photographic texture, reported by whatever
/// loads assets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureState {
    #[default]
    Pending,
    Ready,
    Failed,
}

/// How the globe surface should be drawn this frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Texture still loading: plain base-colour sphere.
    Placeholder,
    Textured,
    /// Texture failed for good: base colour plus atmosphere, no land glow.
    Untextured,
}

impl From<TextureState> for Surface {
    fn from(state: TextureState) -> Self {
        match state {
            TextureState::Pending => Surface::Placeholder,
            TextureState::Ready => Surface::Textured,
            TextureState::Failed => Surface::Untextured,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobeSnapshot {
    pub radius: f64,
    pub surface: Surface,
    pub base_color: Rgba,
    /// `None` unless textured.
    pub land_glow: Option<Rgba>,
    pub atmosphere_color: Rgba,
    pub cloud_radius: f64,
    /// Cloud shell yaw in `[0, 2pi)`. Decorative only.
    pub cloud_phase_rad: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobeLayer {
    id: LayerId,
    pub style: GlobeStyle,
    radius: f64,
    texture: TextureState,
    cloud_phase_rad: f64,
}

impl GlobeLayer {
    pub fn new(radius: f64, style: GlobeStyle) -> Self {
        Self {
            id: LayerId::GLOBE,
            style,
            radius,
            texture: TextureState::Pending,
            cloud_phase_rad: 0.0,
        }
    }

    pub fn texture(&self) -> TextureState {
        self.texture
    }

    /// Records a texture transition. Returns whether the state changed.
    pub fn set_texture(&mut self, state: TextureState) -> bool {
        if state == self.texture {
            return false;
        }
        match state {
            TextureState::Failed => {
                warn!(url = ?self.style.texture_url, "globe texture failed; drawing untextured")
            }
            _ => debug!(from = ?self.texture, to = ?state, "globe texture state"),
        }
        self.texture = state;
        true
    }

    /// Spins the cloud shell. Bad `dt_s` is ignored.
    pub fn advance(&mut self, dt_s: f64) {
        if !dt_s.is_finite() || dt_s <= 0.0 {
            return;
        }
        let phase = self.cloud_phase_rad + self.style.cloud_rotation_rad_per_s * dt_s;
        self.cloud_phase_rad = phase.rem_euclid(TAU);
    }

    pub fn snapshot(&self) -> GlobeSnapshot {
        let surface = Surface::from(self.texture);
        GlobeSnapshot {
            radius: self.radius,
            surface,
            base_color: self.style.base_color,
            land_glow: (surface == Surface::Textured).then_some(self.style.land_glow),
            atmosphere_color: self.style.atmosphere_color,
            cloud_radius: self.radius * self.style.cloud_scale,
            cloud_phase_rad: self.cloud_phase_rad,
        }
    }
}

impl Layer for GlobeLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &'static str {
        "globe"
    }
}

#[cfg(test)]
mod tests {
    use super::{GlobeLayer, Surface, TextureState};
    use crate::symbology::GlobeStyle;

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "expected {a} ~= {b} (eps={eps})");
    }

    #[test]
    fn texture_states_map_to_surfaces() {
        let mut globe = GlobeLayer::new(3.5, GlobeStyle::default());
        assert_eq!(globe.snapshot().surface, Surface::Placeholder);

        assert!(globe.set_texture(TextureState::Ready));
        assert!(!globe.set_texture(TextureState::Ready));
        let snap = globe.snapshot();
        assert_eq!(snap.surface, Surface::Textured);
        assert!(snap.land_glow.is_some());

        globe.set_texture(TextureState::Failed);
        let snap = globe.snapshot();
        assert_eq!(snap.surface, Surface::Untextured);
        assert_eq!(snap.land_glow, None);
    }

    #[test]
    fn clouds_turn_at_configured_rate() {
        let mut globe = GlobeLayer::new(3.5, GlobeStyle::default());
        for _ in 0..60 {
            globe.advance(1.0 / 60.0);
        }
        // 0.0002 rad per frame at 60 Hz.
        assert_close(globe.snapshot().cloud_phase_rad, 0.012, 1e-9);
        globe.advance(f64::NAN);
        globe.advance(-1.0);
        assert_close(globe.snapshot().cloud_phase_rad, 0.012, 1e-9);
    }

    #[test]
    fn phase_wraps() {
        let style = GlobeStyle {
            cloud_rotation_rad_per_s: 1.0,
            ..GlobeStyle::default()
        };
        let mut globe = GlobeLayer::new(3.5, style);
        globe.advance(7.0);
        assert_close(globe.snapshot().cloud_phase_rad, 7.0 - std::f64::consts::TAU, 1e-9);
    }

    #[test]
    fn texture_state_parses_lowercase() {
        let state: TextureState = serde_json::from_str("\"failed\"").expect("parse");
        assert_eq!(state, TextureState::Failed);
    }
}

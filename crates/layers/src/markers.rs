use foundation::math::{GlobeFrame, Vec3};
use journey::{Category, Journey, Rgba};

use crate::layer::{Layer, LayerId};
use crate::symbology::MarkerStyle;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLight {
    pub color: Rgba,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
}

/// One drawn waypoint: a dot, a halo ring facing out of the globe, and a
/// light when active.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Timeline index of the waypoint.
    pub step: usize,
    pub id: String,
    pub label: String,
    pub category: Category,
    pub position: Vec3,
    /// Outward surface normal at `position`.
    pub normal: Vec3,
    pub color: Rgba,
    pub active: bool,
    pub scale: f32,
    pub opacity: f32,
    pub dot_radius: f32,
    pub ring_inner: f32,
    pub ring_outer: f32,
    pub ring_opacity: f32,
    pub light: Option<PointLight>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MarkerLayerSnapshot {
    pub markers: Vec<Marker>,
}

impl MarkerLayerSnapshot {
    pub fn active(&self) -> Option<&Marker> {
        self.markers.iter().find(|m| m.active)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLayer {
    id: LayerId,
    pub style: MarkerStyle,
}

impl MarkerLayer {
    pub fn new(style: MarkerStyle) -> Self {
        Self {
            id: LayerId::MARKERS,
            style,
        }
    }

    /// Markers for every waypoint except the intro sentinel, in timeline
    /// order. Pure in `(journey, active_step)`.
    pub fn extract(
        &self,
        journey: &Journey,
        globe: &GlobeFrame,
        active_step: usize,
    ) -> MarkerLayerSnapshot {
        let markers = journey
            .non_sentinel()
            .map(|(step, waypoint)| {
                let active = step == active_step;
                let (scale, opacity) = if active {
                    (self.style.active_scale, self.style.active_opacity)
                } else {
                    (self.style.inactive_scale, self.style.inactive_opacity)
                };
                let position = globe.project(waypoint.coordinate);
                let light = (active && self.style.light.enabled).then(|| PointLight {
                    color: waypoint.color,
                    intensity: self.style.light.intensity,
                    distance: self.style.light.distance,
                    decay: self.style.light.decay,
                });

                Marker {
                    step,
                    id: waypoint.id.clone(),
                    label: waypoint.location.clone(),
                    category: waypoint.category,
                    position,
                    normal: position.normalize_or_zero(),
                    color: waypoint.color,
                    active,
                    scale,
                    opacity,
                    dot_radius: self.style.dot_radius * scale,
                    ring_inner: self.style.ring_inner * scale,
                    ring_outer: self.style.ring_outer * scale,
                    ring_opacity: opacity * self.style.ring_opacity_factor,
                    light,
                }
            })
            .collect();

        MarkerLayerSnapshot { markers }
    }
}

impl Default for MarkerLayer {
    fn default() -> Self {
        Self::new(MarkerStyle::default())
    }
}

impl Layer for MarkerLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &'static str {
        "markers"
    }
}

//! Flat `f32` layouts handed to the page's renderer.

use layers::{ArcLayerSnapshot, MarkerLayerSnapshot};

/// One marker instance: 16 floats.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerInstance {
    pub position: [f32; 3],
    pub dot_radius: f32,
    pub normal: [f32; 3],
    pub ring_inner: f32,
    pub color: [f32; 4],
    pub ring_outer: f32,
    pub ring_opacity: f32,
    /// 1.0 for the active marker.
    pub active: f32,
    /// 0.0 when the marker has no light.
    pub light_intensity: f32,
}

/// One arc vertex: 8 floats. Arcs are emitted as a line list, two vertices
/// per segment.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ArcVertex {
    pub position: [f32; 3],
    pub opacity: f32,
    pub color: [f32; 4],
}

pub fn marker_instances(snapshot: &MarkerLayerSnapshot) -> Vec<MarkerInstance> {
    snapshot
        .markers
        .iter()
        .map(|m| {
            let mut color = m.color.0;
            color[3] = m.opacity;
            MarkerInstance {
                position: m.position.as_f32_array(),
                dot_radius: m.dot_radius,
                normal: m.normal.as_f32_array(),
                ring_inner: m.ring_inner,
                color,
                ring_outer: m.ring_outer,
                ring_opacity: m.ring_opacity,
                active: if m.active { 1.0 } else { 0.0 },
                light_intensity: m.light.map_or(0.0, |l| l.intensity),
            }
        })
        .collect()
}

pub fn arc_line_list(snapshot: &ArcLayerSnapshot) -> Vec<ArcVertex> {
    let mut out = Vec::with_capacity(snapshot.segment_count() * 2);
    for arc in &snapshot.arcs {
        let vertex = |p: foundation::math::Vec3| ArcVertex {
            position: p.as_f32_array(),
            opacity: arc.opacity,
            color: arc.color.0,
        };
        for pair in arc.points.windows(2) {
            out.push(vertex(pair[0]));
            out.push(vertex(pair[1]));
        }
    }
    out
}

pub fn as_floats<T: bytemuck::Pod>(items: &[T]) -> &[f32] {
    bytemuck::cast_slice(items)
}

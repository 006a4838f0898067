use layers::{NarrativeView, Surface};
use serde::Serialize;
use view::FrameSnapshot;

/// JSON shape of one frame for the page's overlay and renderer.
#[derive(Debug, Clone, Serialize)]
pub struct FrameDto {
    pub frame: u64,
    pub time_s: f64,
    pub active_step: usize,
    pub camera: CameraDto,
    pub globe: GlobeDto,
    pub markers: Vec<MarkerDto>,
    pub arc_count: usize,
    pub narrative: NarrativeView,
}

#[derive(Debug, Clone, Serialize)]
pub struct CameraDto {
    pub eye: [f64; 3],
    pub distance: f64,
    pub target_step: usize,
    pub fov_y_deg: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobeDto {
    pub radius: f64,
    pub surface: Surface,
    pub cloud_phase_rad: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerDto {
    pub id: String,
    pub step: usize,
    pub label: String,
    pub active: bool,
    pub position: [f64; 3],
}

impl FrameDto {
    pub fn from_snapshot(snap: &FrameSnapshot, fov_y_deg: f64) -> Self {
        Self {
            frame: snap.frame.index,
            time_s: snap.frame.time.seconds(),
            active_step: snap.active_step,
            camera: CameraDto {
                eye: snap.camera.eye().as_array(),
                distance: snap.camera.distance,
                target_step: snap.camera_target.step,
                fov_y_deg,
            },
            globe: GlobeDto {
                radius: snap.globe.radius,
                surface: snap.globe.surface,
                cloud_phase_rad: snap.globe.cloud_phase_rad,
            },
            markers: snap
                .markers
                .markers
                .iter()
                .map(|m| MarkerDto {
                    id: m.id.clone(),
                    step: m.step,
                    label: m.label.clone(),
                    active: m.active,
                    position: m.position.as_array(),
                })
                .collect(),
            arc_count: snap.arcs.arcs.len(),
            narrative: snap.narrative.clone(),
        }
    }
}

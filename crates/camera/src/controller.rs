use foundation::math::{GlobeFrame, Vec3};
use journey::Journey;
use tracing::debug;

use crate::config::CameraConfig;
use crate::matrix::Mat4;
use crate::pursuit::{CameraState, CameraTarget, pursue};

/// Sole writer of [`CameraState`]. Called once per rendered frame, whether or
/// not the active step changed.
#[derive(Debug, Clone)]
pub struct CameraController {
    config: CameraConfig,
    globe: GlobeFrame,
    state: CameraState,
    target: Option<CameraTarget>,
}

impl CameraController {
    pub fn new(config: CameraConfig, globe: GlobeFrame) -> Self {
        let state = initial_state(&config);
        Self {
            config,
            globe,
            state,
            target: None,
        }
    }

    pub fn update(&mut self, journey: &Journey, active_step: usize, dt_s: f64) -> CameraState {
        let target = CameraTarget::for_step(journey, active_step, &self.globe, &self.config);
        if self.target.map(|t| t.step) != Some(target.step) {
            debug!(step = target.step, min_distance = target.min_distance, "camera retargeted");
        }
        self.state = pursue(&self.state, &target, dt_s, &self.config);
        self.target = Some(target);
        self.state
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn target(&self) -> Option<&CameraTarget> {
        self.target.as_ref()
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn view_proj(&self, aspect: f64) -> Mat4 {
        self.state.view_proj(aspect, &self.config)
    }

    /// Back to the configured starting eye, e.g. on remount.
    pub fn reset(&mut self) {
        self.state = initial_state(&self.config);
        self.target = None;
    }
}

fn initial_state(config: &CameraConfig) -> CameraState {
    let [x, y, z] = config.initial_eye;
    CameraState::from_eye(Vec3::new(x, y, z))
}

use foundation::math::{GlobeFrame, Vec3};
use journey::Journey;
use tracing::warn;

use crate::config::CameraConfig;
use crate::matrix::{self, Mat4};

/// Below this dot product the bearing and the target are treated as
/// antipodal: a straight lerp would pass through the sphere centre.
const ANTIPODAL_DOT: f64 = -0.9999;

/// Upper bound on a per-frame gain so a single frame can never reach the
/// target outright.
const MAX_GAIN: f64 = 0.99;

/// Where the camera is. Written only by [`pursue`] and its controller.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraState {
    /// Unit bearing from the sphere centre.
    pub direction: Vec3,
    pub distance: f64,
}

impl CameraState {
    pub fn from_eye(eye: Vec3) -> Self {
        Self {
            direction: eye.try_normalize().unwrap_or(Vec3::Z),
            distance: eye.length(),
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.direction * self.distance
    }

    /// Looks at the sphere centre with `+Y` up.
    pub fn view_matrix(&self) -> Mat4 {
        matrix::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f64, config: &CameraConfig) -> Mat4 {
        matrix::perspective_rh_z0(config.fov_y_deg.to_radians(), aspect, config.near, config.far)
    }

    pub fn view_proj(&self, aspect: f64, config: &CameraConfig) -> Mat4 {
        matrix::mul(self.projection_matrix(aspect, config), self.view_matrix())
    }
}

/// What the camera is chasing this frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraTarget {
    /// Index of the waypoint actually targeted (after out-of-range fallback).
    pub step: usize,
    pub direction: Vec3,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl CameraTarget {
    /// Target for `step`. An out-of-range step targets the first waypoint.
    pub fn for_step(
        journey: &Journey,
        step: usize,
        globe: &GlobeFrame,
        config: &CameraConfig,
    ) -> Self {
        let step = if step < journey.len() {
            step
        } else {
            warn!(step, len = journey.len(), "camera target out of range; using first waypoint");
            0
        };
        let waypoint = journey.get_or_first(step);
        let direction = globe
            .project(waypoint.coordinate)
            .try_normalize()
            .unwrap_or(Vec3::Z);
        let overview = journey.is_sentinel(step);

        Self {
            step,
            direction,
            min_distance: config.min_distance(globe.radius, overview),
            max_distance: config.max_distance(globe.radius),
        }
    }
}

/// Per-frame gain rescaled to `dt_s`: `1 - (1 - gain)^(dt_s * reference_hz)`.
///
/// At exactly one reference frame this is `gain`, so the motion matches a
/// fixed per-frame lerp at that rate and stays the same at any other rate.
pub fn smoothing_alpha(gain: f64, dt_s: f64, reference_hz: f64) -> f64 {
    let gain = if gain.is_finite() { gain.clamp(0.0, MAX_GAIN) } else { 0.0 };
    let frames = dt_s * reference_hz;
    if !frames.is_finite() || frames <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - gain).powf(frames)
}

/// Extra distance while still travelling: `(1 - alignment)^2 * k`.
pub fn zoom_out_amount(alignment: f64, k: f64) -> f64 {
    let miss = 1.0 - alignment.clamp(-1.0, 1.0);
    miss * miss * k
}

/// One pursuit step. Pure: the result depends only on the arguments.
pub fn pursue(
    prev: &CameraState,
    target: &CameraTarget,
    dt_s: f64,
    config: &CameraConfig,
) -> CameraState {
    let dt_s = config.clamp_dt(dt_s);
    let rotation_alpha = smoothing_alpha(config.rotation_gain, dt_s, config.reference_hz);
    let distance_alpha = smoothing_alpha(config.distance_gain, dt_s, config.reference_hz);

    // Heading straight for the antipode, first swing off-axis.
    let toward = if prev.direction.dot(target.direction) < ANTIPODAL_DOT {
        prev.direction.any_orthogonal()
    } else {
        target.direction
    };
    let direction = prev
        .direction
        .lerp(toward, rotation_alpha)
        .try_normalize()
        .unwrap_or(prev.direction);

    let alignment = direction.dot(target.direction);
    let target_distance = (target.min_distance + zoom_out_amount(alignment, config.zoom_out_gain))
        .min(target.max_distance);
    let distance = prev.distance + (target_distance - prev.distance) * distance_alpha;

    CameraState {
        direction,
        distance,
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraState, CameraTarget, pursue, smoothing_alpha, zoom_out_amount};
    use crate::config::CameraConfig;
    use foundation::math::{GlobeFrame, Vec3, project};
    use journey::{Category, CoordinatePolicy, Journey, WaypointRecord};

    const DT: f64 = 1.0 / 60.0;

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "expected {a} ~= {b} (eps={eps})");
    }

    fn record(id: &str, category: Category, lat: f64, lon: f64) -> WaypointRecord {
        WaypointRecord {
            id: id.to_string(),
            label: id.to_string(),
            sub_label: String::new(),
            location: String::new(),
            description: String::new(),
            category,
            coordinates: [lat, lon],
            color: None,
            tags: Vec::new(),
        }
    }

    fn scenario() -> Journey {
        Journey::new(
            vec![
                record("intro", Category::Intro, 20.0, 79.0),
                record("a", Category::Education, 30.0, 77.0),
                record("b", Category::Work, 13.0, 78.0),
            ],
            CoordinatePolicy::Reject,
        )
        .expect("valid journey")
    }

    fn initial(config: &CameraConfig) -> CameraState {
        let [x, y, z] = config.initial_eye;
        CameraState::from_eye(Vec3::new(x, y, z))
    }

    #[test]
    fn alpha_matches_gain_at_reference_rate() {
        assert_close(smoothing_alpha(0.03, DT, 60.0), 0.03, 1e-12);
        assert_eq!(smoothing_alpha(0.03, 0.0, 60.0), 0.0);
        // Two 30 Hz frames cover the same ground as four 60 Hz frames.
        let a30 = smoothing_alpha(0.03, 2.0 * DT, 60.0);
        let a60 = smoothing_alpha(0.03, DT, 60.0);
        assert_close(1.0 - (1.0 - a30).powi(2), 1.0 - (1.0 - a60).powi(4), 1e-12);
    }

    #[test]
    fn alpha_never_reaches_one() {
        assert!(smoothing_alpha(1.0, DT, 60.0) < 1.0);
    }

    #[test]
    fn arrival_has_no_zoom_out() {
        assert_eq!(zoom_out_amount(1.0, 40.0), 0.0);
        assert_close(zoom_out_amount(0.0, 40.0), 40.0, 1e-12);
        assert_close(zoom_out_amount(-1.0, 40.0), 160.0, 1e-12);
    }

    #[test]
    fn aligned_camera_settles_on_min_distance() {
        let config = CameraConfig::default();
        let journey = scenario();
        let globe = GlobeFrame::default();
        let target = CameraTarget::for_step(&journey, 1, &globe, &config);
        let mut state = CameraState {
            direction: target.direction,
            distance: target.min_distance,
        };
        state = pursue(&state, &target, DT, &config);
        assert_close(state.distance, target.min_distance, 1e-12);
    }

    #[test]
    fn one_frame_never_teleports() {
        let config = CameraConfig::default();
        let journey = scenario();
        let globe = GlobeFrame::default();
        let prev = initial(&config);

        for step in 0..journey.len() {
            let target = CameraTarget::for_step(&journey, step, &globe, &config);
            let next = pursue(&prev, &target, DT, &config);
            assert_ne!(next.direction, target.direction);
            // Rotated toward the target, but not past it.
            let before = prev.direction.dot(target.direction);
            let after = next.direction.dot(target.direction);
            assert!(after > before && after < 1.0, "step {step}: {before} -> {after}");
            // A huge frame gap is capped, so it cannot teleport either.
            let jump = pursue(&prev, &target, 30.0, &config);
            assert!(jump.direction.dot(target.direction) < 1.0 - 1e-6);
        }
    }

    #[test]
    fn antipodal_target_still_makes_progress() {
        let config = CameraConfig::default();
        let target = CameraTarget {
            step: 0,
            direction: Vec3::new(0.0, 0.0, -1.0),
            min_distance: 7.0,
            max_distance: 15.5,
        };
        let mut state = CameraState::from_eye(Vec3::new(0.0, 0.0, 10.0));
        for _ in 0..600 {
            state = pursue(&state, &target, DT, &config);
            assert!(state.direction.is_finite());
        }
        assert!(state.direction.dot(target.direction) > 0.99);
    }

    #[test]
    fn concrete_scenario_converges_on_b() {
        let config = CameraConfig::default();
        let journey = scenario();
        let globe = GlobeFrame::default();

        let target = CameraTarget::for_step(&journey, 2, &globe, &config);
        let expected = project(13.0, 78.0, globe.radius).normalize_or_zero();
        assert_eq!(target.direction, expected);
        assert_eq!(target.min_distance, globe.radius + 3.5);

        let mut state = initial(&config);
        let mut last_gap = f64::INFINITY;
        for frame in 0..3000 {
            state = pursue(&state, &target, DT, &config);
            assert!(state.distance <= target.max_distance + 1e-9);
            assert!(state.distance > globe.radius);
            if frame > 600 {
                let gap = (state.distance - target.min_distance).abs();
                assert!(gap <= last_gap + 1e-12);
                last_gap = gap;
            }
        }
        assert_close(state.distance, target.min_distance, 1e-6);
        assert_close(state.direction.dot(target.direction), 1.0, 1e-9);
    }

    #[test]
    fn intro_uses_overview_distance() {
        let config = CameraConfig::default();
        let globe = GlobeFrame::default();
        let target = CameraTarget::for_step(&scenario(), 0, &globe, &config);
        assert_eq!(target.min_distance, globe.radius + 8.0);
    }

    #[test]
    fn out_of_range_falls_back_to_first() {
        let config = CameraConfig::default();
        let globe = GlobeFrame::default();
        let journey = scenario();
        let target = CameraTarget::for_step(&journey, 99, &globe, &config);
        assert_eq!(target, CameraTarget::for_step(&journey, 0, &globe, &config));
    }

    #[test]
    fn eye_is_direction_times_distance() {
        let state = CameraState::from_eye(Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(state.direction, Vec3::Z);
        assert_eq!(state.eye(), Vec3::new(0.0, 0.0, 10.0));
    }
}

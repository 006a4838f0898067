use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use journey::Journey;
use runtime::ListenerKind;
use serde::Serialize;
use tracing::debug;
use tracking::{ScrollMetrics, TrackingMode};
use view::{JourneyView, Release, ViewConfig, ViewError, ViewHost};

/// Host without a page: counts live registrations so a run can prove it left
/// nothing attached.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    live: Rc<Cell<usize>>,
}

impl HeadlessHost {
    pub fn live(&self) -> usize {
        self.live.get()
    }
}

impl ViewHost for HeadlessHost {
    fn attach(&mut self, _kind: ListenerKind) -> Release {
        self.live.set(self.live.get() + 1);
        let live = Rc::clone(&self.live);
        Box::new(move || live.set(live.get().saturating_sub(1)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOptions {
    pub frames: usize,
    pub dt_s: f64,
    pub viewport_px: f64,
    /// Track height; `None` gives one viewport per waypoint plus one.
    pub track_px: Option<f64>,
    /// Let the autoplay source drive instead of a scroll sweep.
    pub autoplay: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            frames: 240,
            dt_s: 1.0 / 60.0,
            viewport_px: 800.0,
            track_px: None,
            autoplay: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSample {
    pub frame: u64,
    pub offset_px: f64,
    pub active_step: usize,
    pub camera_distance: f64,
    pub target_min_distance: f64,
    pub alignment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    pub source: &'static str,
    pub samples: Vec<FrameSample>,
    /// Active steps in the order they were entered, starting with 0.
    pub visited: Vec<usize>,
    pub max_distance: f64,
    pub released: usize,
    pub leaked: usize,
}

impl Simulation {
    pub fn final_step(&self) -> usize {
        self.visited.last().copied().unwrap_or(0)
    }

    /// True when no frame put the camera beyond the configured far bound.
    pub fn within_bounds(&self) -> bool {
        self.samples
            .iter()
            .all(|s| s.camera_distance <= self.max_distance + 1e-9)
    }
}

impl fmt::Display for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "source: {}, {} frames", self.source, self.samples.len())?;
        let mut previous = None;
        for s in &self.samples {
            if previous != Some(s.active_step) {
                writeln!(
                    f,
                    "  frame {:>5} offset {:>8.1}px -> step {} (distance {:.3}, aligned {:.3})",
                    s.frame, s.offset_px, s.active_step, s.camera_distance, s.alignment
                )?;
                previous = Some(s.active_step);
            }
        }
        if let Some(last) = self.samples.last() {
            writeln!(
                f,
                "  end: step {} distance {:.3} (target {:.3}, max {:.3})",
                last.active_step, last.camera_distance, last.target_min_distance, self.max_distance
            )?;
        }
        write!(
            f,
            "visited {:?}; released {} listeners, {} leaked",
            self.visited, self.released, self.leaked
        )
    }
}

/// Mounts a view on a [`HeadlessHost`], drives it for `options.frames`
/// frames, then unmounts.
///
/// Without autoplay the scroll offset sweeps linearly from the top of the
/// track to its end, one scroll event per frame.
pub fn simulate(
    journey: Journey,
    config: ViewConfig,
    options: &SimulationOptions,
) -> Result<Simulation, ViewError> {
    let max_distance = config.camera.max_distance(config.globe.radius);
    let step_count = journey.len();
    let mut view = JourneyView::new(journey, config)?;
    if options.autoplay {
        view.use_mode(TrackingMode::Autoplay);
    }

    let mut host = HeadlessHost::default();
    view.mount(&mut host)?;

    let viewport = options.viewport_px.max(1.0);
    let track = options
        .track_px
        .unwrap_or(viewport * (step_count as f64 + 1.0));
    let scrollable = (track - viewport).max(0.0);
    let last_frame = options.frames.saturating_sub(1).max(1) as f64;

    let mut samples = Vec::with_capacity(options.frames);
    let mut visited = vec![view.active_step()];
    for i in 0..options.frames {
        let offset_px = if options.autoplay {
            0.0
        } else {
            scrollable * i as f64 / last_frame
        };
        if !options.autoplay {
            view.scroll(ScrollMetrics::new(offset_px, viewport, track))?;
        }
        let snap = view.frame(options.dt_s)?;
        if visited.last() != Some(&snap.active_step) {
            visited.push(snap.active_step);
        }
        samples.push(FrameSample {
            frame: snap.frame.index,
            offset_px,
            active_step: snap.active_step,
            camera_distance: snap.camera.distance,
            target_min_distance: snap.camera_target.min_distance,
            alignment: snap.camera.direction.dot(snap.camera_target.direction),
        });
    }

    let source = view.source_name();
    let released = view.unmount()?;
    debug!(frames = options.frames, released, "simulation finished");
    Ok(Simulation {
        source,
        samples,
        visited,
        max_distance,
        released,
        leaked: host.live(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use journey::CoordinatePolicy;
    use pretty_assertions::assert_eq;

    fn sweep() -> Simulation {
        simulate(journey(), ViewConfig::default(), &SimulationOptions::default()).unwrap()
    }

    fn journey() -> Journey {
        Journey::from_json_str(
            r#"{
                "version": "1.0",
                "waypoints": [
                    { "id": "intro", "label": "Hi", "category": "intro", "coordinates": [20, 79] },
                    { "id": "a", "label": "A", "category": "education", "coordinates": [30, 77] },
                    { "id": "b", "label": "B", "category": "work", "coordinates": [13, 78] }
                ]
            }"#,
            CoordinatePolicy::Reject,
        )
        .unwrap()
    }

    #[test]
    fn sweep_visits_every_step_in_order() {
        let sim = sweep();

        assert_eq!(sim.source, "scroll");
        assert_eq!(sim.visited, vec![0, 1, 2]);
        assert_eq!(sim.final_step(), 2);
        assert!(sim.within_bounds());
        assert_eq!(sim.released, 3);
        assert_eq!(sim.leaked, 0);
    }

    #[test]
    fn steps_never_go_backwards_during_a_sweep() {
        let sim = sweep();
        assert!(sim.samples.windows(2).all(|w| w[0].active_step <= w[1].active_step));
    }

    #[test]
    fn camera_settles_toward_the_last_waypoint() {
        let options = SimulationOptions {
            frames: 900,
            ..SimulationOptions::default()
        };
        let sim = simulate(journey(), ViewConfig::default(), &options).unwrap();
        let last = sim.samples.last().unwrap();

        assert!(last.alignment > 0.999);
        assert!((last.camera_distance - last.target_min_distance).abs() < 0.05);
    }

    #[test]
    fn autoplay_run_advances_without_scrolling() {
        let options = SimulationOptions {
            frames: 600,
            autoplay: true,
            ..SimulationOptions::default()
        };
        let sim = simulate(journey(), ViewConfig::default(), &options).unwrap();

        assert_eq!(sim.source, "autoplay");
        assert_eq!(sim.visited, vec![0, 1, 2]);
        assert!(sim.samples.iter().all(|s| s.offset_px == 0.0));
        assert_eq!(sim.leaked, 0);
    }

    #[test]
    fn summary_names_each_step_change() {
        let sim = sweep();
        let text = sim.to_string();
        assert!(text.contains("-> step 1"));
        assert!(text.contains("-> step 2"));
        assert!(text.ends_with("released 3 listeners, 0 leaked"));
    }
}

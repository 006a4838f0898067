use camera::{CameraController, CameraState, CameraTarget};
use foundation::math::GlobeFrame;
use journey::Journey;
use layers::{
    ArcLayer, ArcLayerSnapshot, GlobeLayer, GlobeSnapshot, MarkerLayer, MarkerLayerSnapshot,
    NarrativePanel, NarrativeView, TextureState,
};
use runtime::{EventBus, Frame, ListenerRegistry, ObservableReader, Subscription};
use tracing::debug;
use tracking::{ScrollMetrics, StepChange, StepInput, StepSource, StepTracker, TrackingMode};

use crate::config::ViewConfig;
use crate::error::ViewError;
use crate::event::JourneyEvent;
use crate::host::{REQUIRED_LISTENERS, ViewHost};

/// Everything a renderer and overlay need for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub frame: Frame,
    pub active_step: usize,
    pub camera: CameraState,
    pub camera_target: CameraTarget,
    pub globe: GlobeSnapshot,
    pub markers: MarkerLayerSnapshot,
    pub arcs: ArcLayerSnapshot,
    pub narrative: NarrativeView,
}

/// A journey-map session.
///
/// Inputs (scroll, ticks) go to the [`StepTracker`], the only writer of the
/// active step. Every frame the camera pursues the active waypoint and the
/// layers are rebuilt from `(journey, active step)`.
pub struct JourneyView {
    journey: Journey,
    config: ViewConfig,
    globe_frame: GlobeFrame,
    tracker: StepTracker,
    camera: CameraController,
    globe: GlobeLayer,
    markers: MarkerLayer,
    arcs: ArcLayer,
    narrative: NarrativePanel,
    listeners: ListenerRegistry,
    events: EventBus<JourneyEvent>,
    frame: Frame,
    mounted: bool,
}

impl JourneyView {
    pub fn new(journey: Journey, config: ViewConfig) -> Result<Self, ViewError> {
        config.validate()?;
        let globe_frame = config.globe.frame();
        let source = config.tracking.build_source(journey.len());

        Ok(Self {
            tracker: StepTracker::new(journey.len(), source),
            camera: CameraController::new(config.camera.clone(), globe_frame),
            globe: GlobeLayer::new(globe_frame.radius, config.globe.style.clone()),
            markers: MarkerLayer::new(config.markers.clone()),
            arcs: ArcLayer::new(config.arcs.clone()),
            narrative: NarrativePanel::new(config.narrative.clone()),
            listeners: ListenerRegistry::new(),
            events: EventBus::with_capacity(config.event_capacity()),
            frame: Frame::origin(),
            mounted: false,
            journey,
            globe_frame,
            config,
        })
    }

    /// Builder form of [`JourneyView::replace_source`].
    pub fn with_source(mut self, source: Box<dyn StepSource>) -> Self {
        self.replace_source(source);
        self
    }

    /// Installs a different step policy (scroll, regions, autoplay). The
    /// active step carries over.
    pub fn replace_source(&mut self, source: Box<dyn StepSource>) -> Box<dyn StepSource> {
        let old = self.tracker.replace_source(source);
        self.events.emit(
            self.frame,
            JourneyEvent::SourceReplaced {
                from: old.name(),
                to: self.tracker.source_name(),
            },
        );
        old
    }

    pub fn use_mode(&mut self, mode: TrackingMode) -> Box<dyn StepSource> {
        let source = self.config.tracking.build_source_for(mode, self.journey.len());
        self.replace_source(source)
    }

    /// Starts a session: active step back to 0, camera at its initial eye,
    /// and one host listener per required kind.
    pub fn mount(&mut self, host: &mut dyn ViewHost) -> Result<(), ViewError> {
        if self.mounted {
            return Err(ViewError::AlreadyMounted);
        }

        self.frame = Frame::origin();
        if let Some(change) = self.tracker.reset_to(0) {
            self.record_change(change);
        }
        self.narrative.jump_to(0);
        self.camera.reset();

        for kind in REQUIRED_LISTENERS {
            let release = host.attach(kind);
            self.listeners.register(kind, release);
        }
        self.mounted = true;

        let listeners = self.listeners.len();
        debug!(listeners, waypoints = self.journey.len(), "journey view mounted");
        self.events.emit(self.frame, JourneyEvent::Mounted { listeners });
        Ok(())
    }

    /// Ends the session and releases every host listener. Returns how many
    /// were released.
    pub fn unmount(&mut self) -> Result<usize, ViewError> {
        if !self.mounted {
            return Err(ViewError::NotMounted);
        }
        let released = self.listeners.release_all();
        self.mounted = false;
        debug!(released, "journey view unmounted");
        self.events.emit(self.frame, JourneyEvent::Unmounted { released });
        Ok(released)
    }

    pub fn input(&mut self, input: StepInput) -> Result<Option<StepChange>, ViewError> {
        if !self.mounted {
            return Err(ViewError::NotMounted);
        }
        let change = self.tracker.feed(&input);
        if let Some(change) = change {
            self.record_change(change);
        }
        Ok(change)
    }

    pub fn scroll(&mut self, metrics: ScrollMetrics) -> Result<Option<StepChange>, ViewError> {
        self.input(StepInput::Scroll(metrics))
    }

    /// Advances one display frame by `dt_s` seconds.
    pub fn frame(&mut self, dt_s: f64) -> Result<FrameSnapshot, ViewError> {
        if !self.mounted {
            return Err(ViewError::NotMounted);
        }
        self.frame = self.frame.advance(dt_s);
        let dt_s = self.frame.dt_s;

        if let Some(change) = self.tracker.feed(&StepInput::Tick { dt_s }) {
            self.record_change(change);
        }
        let active_step = self.tracker.active();

        let camera = self.camera.update(&self.journey, active_step, dt_s);
        let camera_target = self.camera.target().copied().unwrap_or_else(|| {
            let config = self.camera.config();
            CameraTarget::for_step(&self.journey, active_step, &self.globe_frame, config)
        });
        self.globe.advance(dt_s);
        self.narrative.advance(dt_s);

        Ok(FrameSnapshot {
            frame: self.frame,
            active_step,
            camera,
            camera_target,
            globe: self.globe.snapshot(),
            markers: self.markers.extract(&self.journey, &self.globe_frame, active_step),
            arcs: self.arcs.extract(&self.journey, &self.globe_frame, active_step),
            narrative: self.narrative.view(&self.journey),
        })
    }

    /// Texture loads finish whenever they finish; this works mounted or not.
    pub fn set_texture_state(&mut self, state: TextureState) {
        if self.globe.set_texture(state) {
            self.events.emit(self.frame, JourneyEvent::TextureChanged(state));
        }
    }

    pub fn active_step(&self) -> usize {
        self.tracker.active()
    }

    pub fn reader(&self) -> ObservableReader<usize> {
        self.tracker.reader()
    }

    pub fn subscribe(&self, listener: impl FnMut(&usize) + 'static) -> Subscription {
        self.tracker.subscribe(listener)
    }

    pub fn events(&self) -> &EventBus<JourneyEvent> {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus<JourneyEvent> {
        &mut self.events
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn journey(&self) -> &Journey {
        &self.journey
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn globe_frame(&self) -> GlobeFrame {
        self.globe_frame
    }

    pub fn camera_state(&self) -> CameraState {
        self.camera.state()
    }

    pub fn source_name(&self) -> &'static str {
        self.tracker.source_name()
    }

    fn record_change(&mut self, change: StepChange) {
        self.narrative.on_step(change.to);
        self.events.emit(
            self.frame,
            JourneyEvent::StepChanged {
                from: change.from,
                to: change.to,
                source: self.tracker.source_name(),
            },
        );
    }
}

impl std::fmt::Debug for JourneyView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JourneyView")
            .field("waypoints", &self.journey.len())
            .field("active_step", &self.tracker.active())
            .field("source", &self.tracker.source_name())
            .field("mounted", &self.mounted)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

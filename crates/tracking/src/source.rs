/// Scroll position of the journey track relative to the viewport, in CSS
/// pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScrollMetrics {
    /// How far the viewport top has moved past the track top. Negative while
    /// the track is still below the viewport top.
    pub offset_px: f64,
    pub viewport_px: f64,
    /// Full height of the track (all step regions).
    pub track_px: f64,
}

impl ScrollMetrics {
    pub fn new(offset_px: f64, viewport_px: f64, track_px: f64) -> Self {
        Self {
            offset_px,
            viewport_px,
            track_px,
        }
    }

    /// Distance the track can scroll before its end reaches the viewport bottom.
    pub fn scrollable_px(&self) -> f64 {
        (self.track_px - self.viewport_px).max(0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.offset_px.is_finite() && self.viewport_px.is_finite() && self.track_px.is_finite()
    }
}

/// Inputs a step source may react to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StepInput {
    Scroll(ScrollMetrics),
    /// Elapsed wall time since the previous tick.
    Tick { dt_s: f64 },
}

/// A policy that decides which step should be active.
///
/// Sources only propose; the [`crate::StepTracker`] owning the active step
/// applies the proposal. Returning `None` keeps the current step.
pub trait StepSource {
    fn name(&self) -> &'static str;

    fn observe(&mut self, input: &StepInput) -> Option<usize>;

    /// Called when the source is installed so it can continue from `step`.
    fn reset(&mut self, _step: usize) {}
}

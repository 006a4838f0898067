use crate::source::{ScrollMetrics, StepInput, StepSource};

/// Maps the continuous scroll fraction of the track onto a step index:
/// `floor(fraction * n)`, clamped to `[0, n - 1]`.
///
/// A single calculation per scroll event means no two steps can claim the
/// viewport at once, and a static scroll position always yields the same step.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollStepTracker {
    step_count: usize,
}

impl ScrollStepTracker {
    pub fn new(step_count: usize) -> Self {
        Self {
            step_count: step_count.max(1),
        }
    }

    pub fn step_for(&self, metrics: ScrollMetrics) -> Option<usize> {
        if !metrics.is_finite() {
            return None;
        }
        let last = self.step_count - 1;
        let scrollable = metrics.scrollable_px();
        if metrics.offset_px <= 0.0 {
            return Some(0);
        }
        if scrollable <= 0.0 || metrics.offset_px >= scrollable {
            return Some(last);
        }
        let fraction = metrics.offset_px / scrollable;
        let step = (fraction * self.step_count as f64).floor() as usize;
        Some(step.min(last))
    }
}

impl StepSource for ScrollStepTracker {
    fn name(&self) -> &'static str {
        "scroll"
    }

    fn observe(&mut self, input: &StepInput) -> Option<usize> {
        match input {
            StepInput::Scroll(metrics) => self.step_for(*metrics),
            StepInput::Tick { .. } => None,
        }
    }
}

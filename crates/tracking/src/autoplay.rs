use crate::source::{StepInput, StepSource};

/// Timer-driven demo source: advances one step every `interval_s`.
///
/// It replaces the scroll trackers behind [`StepSource`]; scroll input is
/// ignored while it is installed.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoplaySource {
    step_count: usize,
    interval_s: f64,
    looping: bool,
    paused: bool,
    elapsed_s: f64,
    current: usize,
}

impl AutoplaySource {
    /// Shortest accepted interval between steps.
    pub const MIN_INTERVAL_S: f64 = 0.05;

    pub fn new(step_count: usize, interval_s: f64, looping: bool) -> Self {
        Self {
            step_count: step_count.max(1),
            interval_s: if interval_s.is_finite() && interval_s > 0.0 {
                interval_s.max(Self::MIN_INTERVAL_S)
            } else {
                1.0
            },
            looping,
            paused: false,
            elapsed_s: 0.0,
            current: 0,
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a non-looping run has reached the last step.
    pub fn is_finished(&self) -> bool {
        !self.looping && self.current + 1 >= self.step_count
    }
}

impl StepSource for AutoplaySource {
    fn name(&self) -> &'static str {
        "autoplay"
    }

    fn observe(&mut self, input: &StepInput) -> Option<usize> {
        let StepInput::Tick { dt_s } = *input else {
            return None;
        };
        if self.paused || !dt_s.is_finite() || dt_s <= 0.0 || self.is_finished() {
            return None;
        }

        self.elapsed_s += dt_s;
        let whole = (self.elapsed_s / self.interval_s).floor();
        if whole < 1.0 {
            return None;
        }
        self.elapsed_s = (self.elapsed_s - whole * self.interval_s).max(0.0);

        let last = self.step_count - 1;
        if self.looping && last > 0 {
            let steps = (whole % self.step_count as f64) as usize;
            self.current = (self.current + steps) % self.step_count;
            Some(self.current)
        } else {
            let before = self.current;
            self.current = (before + whole.min(last as f64) as usize).min(last);
            (self.current != before).then_some(self.current)
        }
    }

    fn reset(&mut self, step: usize) {
        self.current = step.min(self.step_count - 1);
        self.elapsed_s = 0.0;
    }
}

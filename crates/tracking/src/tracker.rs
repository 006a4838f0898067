use runtime::{Observable, ObservableReader, Subscription};
use tracing::{debug, warn};

use crate::source::{StepInput, StepSource};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StepChange {
    pub from: usize,
    pub to: usize,
}

/// Owns the active step index. Exactly one [`StepSource`] feeds it at a time
/// and the index is only ever written here.
pub struct StepTracker {
    source: Box<dyn StepSource>,
    active: Observable<usize>,
    step_count: usize,
}

impl StepTracker {
    pub fn new(step_count: usize, mut source: Box<dyn StepSource>) -> Self {
        source.reset(0);
        Self {
            source,
            active: Observable::new(0),
            step_count: step_count.max(1),
        }
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn active(&self) -> usize {
        self.active.get()
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Routes one input through the current source and applies the result.
    pub fn feed(&mut self, input: &StepInput) -> Option<StepChange> {
        let proposed = self.source.observe(input)?;
        let last = self.step_count - 1;
        let to = if proposed > last {
            warn!(
                source = self.source.name(),
                proposed,
                last,
                "step source proposed an out-of-range step; clamping"
            );
            last
        } else {
            proposed
        };

        let from = self.active.get();
        if !self.active.set(to) {
            return None;
        }
        debug!(source = self.source.name(), from, to, "active step changed");
        Some(StepChange { from, to })
    }

    /// Forces the active step, e.g. back to 0 when a view remounts. The
    /// source continues from there.
    pub fn reset_to(&mut self, step: usize) -> Option<StepChange> {
        let to = step.min(self.step_count - 1);
        self.source.reset(to);
        let from = self.active.get();
        self.active.set(to).then_some(StepChange { from, to })
    }

    /// Swaps the driving policy. The new source continues from the current
    /// active step.
    pub fn replace_source(&mut self, mut source: Box<dyn StepSource>) -> Box<dyn StepSource> {
        source.reset(self.active.get());
        debug!(from = self.source.name(), to = source.name(), "step source replaced");
        std::mem::replace(&mut self.source, source)
    }

    pub fn reader(&self) -> ObservableReader<usize> {
        self.active.reader()
    }

    pub fn subscribe(&self, listener: impl FnMut(&usize) + 'static) -> Subscription {
        self.active.subscribe(listener)
    }
}

impl std::fmt::Debug for StepTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepTracker")
            .field("source", &self.source.name())
            .field("active", &self.active.get())
            .field("step_count", &self.step_count)
            .finish()
    }
}

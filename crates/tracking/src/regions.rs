//! Region band tracking.
//!
//! The track is laid out as stacked regions, one per step. A region triggers
//! once at least `threshold` of its height lies inside the viewport shrunk by
//! `band_margin` at the top and bottom. This mirrors per-region visibility
//! observers, but evaluates all regions in one pass so the outcome is a single
//! owner per scroll position.

use crate::source::{ScrollMetrics, StepInput, StepSource};

/// Region heights along the track.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionLayout {
    /// `count` regions, each `fraction` of the viewport height.
    Uniform { count: usize, viewport_fraction: f64 },
    /// Explicit heights in pixels, e.g. a short intro sentinel followed by
    /// full-size regions.
    Pixels(Vec<f64>),
}

impl RegionLayout {
    pub fn count(&self) -> usize {
        match self {
            RegionLayout::Uniform { count, .. } => *count,
            RegionLayout::Pixels(heights) => heights.len(),
        }
    }

    fn heights(&self, viewport_px: f64) -> Vec<f64> {
        match self {
            RegionLayout::Uniform {
                count,
                viewport_fraction,
            } => vec![(viewport_fraction * viewport_px).max(0.0); *count],
            RegionLayout::Pixels(heights) => heights.iter().map(|h| h.max(0.0)).collect(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BandRule {
    /// Fraction of the viewport excluded at the top and at the bottom.
    pub band_margin: f64,
    /// Minimum fraction of a region that must lie inside the band.
    pub threshold: f64,
}

impl Default for BandRule {
    fn default() -> Self {
        Self {
            band_margin: 0.2,
            threshold: 0.5,
        }
    }
}

/// How one region relates to the trigger band at a scroll position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RegionHit {
    pub index: usize,
    pub ratio: f64,
    /// Distance between the region centre and the band centre (pixels).
    pub centre_distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionStepTracker {
    layout: RegionLayout,
    rule: BandRule,
}

impl RegionStepTracker {
    pub fn new(layout: RegionLayout, rule: BandRule) -> Self {
        Self { layout, rule }
    }

    pub fn uniform(count: usize, viewport_fraction: f64) -> Self {
        Self::new(
            RegionLayout::Uniform {
                count,
                viewport_fraction,
            },
            BandRule::default(),
        )
    }

    pub fn layout(&self) -> &RegionLayout {
        &self.layout
    }

    /// Every region that currently satisfies the trigger rule.
    pub fn triggering(&self, metrics: ScrollMetrics) -> Vec<RegionHit> {
        let heights = self.layout.heights(metrics.viewport_px);
        let margin = self.rule.band_margin.clamp(0.0, 0.5) * metrics.viewport_px;
        let band_top = metrics.offset_px + margin;
        let band_bottom = metrics.offset_px + metrics.viewport_px - margin;
        let band_centre = 0.5 * (band_top + band_bottom);

        let mut hits = Vec::new();
        let mut top = 0.0;
        for (index, height) in heights.into_iter().enumerate() {
            let bottom = top + height;
            if height > 0.0 {
                let overlap = (bottom.min(band_bottom) - top.max(band_top)).max(0.0);
                let ratio = overlap / height;
                if ratio >= self.rule.threshold {
                    hits.push(RegionHit {
                        index,
                        ratio,
                        centre_distance: (0.5 * (top + bottom) - band_centre).abs(),
                    });
                }
            }
            top = bottom;
        }
        hits
    }

    pub fn step_for(&self, metrics: ScrollMetrics) -> Option<usize> {
        let count = self.layout.count();
        if count == 0 || !metrics.is_finite() {
            return None;
        }
        let last = count - 1;
        let track_end: f64 = self.layout.heights(metrics.viewport_px).iter().sum();

        // The intro region may be too short to ever satisfy the band rule, and
        // nothing lies past the last region, so both ends are pinned.
        if metrics.offset_px <= 0.0 {
            return Some(0);
        }
        if metrics.offset_px + metrics.viewport_px >= track_end {
            return Some(last);
        }

        self.triggering(metrics)
            .into_iter()
            .min_by(|a, b| {
                b.ratio
                    .total_cmp(&a.ratio)
                    .then_with(|| a.centre_distance.total_cmp(&b.centre_distance))
                    .then_with(|| a.index.cmp(&b.index))
            })
            .map(|hit| hit.index)
    }
}

impl StepSource for RegionStepTracker {
    fn name(&self) -> &'static str {
        "regions"
    }

    fn observe(&mut self, input: &StepInput) -> Option<usize> {
        match input {
            StepInput::Scroll(metrics) => self.step_for(*metrics),
            StepInput::Tick { .. } => None,
        }
    }
}

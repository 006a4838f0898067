use serde::{Deserialize, Serialize};

use crate::autoplay::AutoplaySource;
use crate::regions::{BandRule, RegionLayout, RegionStepTracker};
use crate::scroll::ScrollStepTracker;
use crate::source::StepSource;

/// Which policy drives the active step.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingMode {
    #[default]
    ScrollFraction,
    Regions,
    Autoplay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub mode: TrackingMode,
    pub band_margin: f64,
    pub threshold: f64,
    /// Height of one step region as a fraction of the viewport.
    pub region_viewport_fraction: f64,
    pub autoplay_interval_s: f64,
    pub autoplay_loop: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            mode: TrackingMode::ScrollFraction,
            band_margin: 0.2,
            threshold: 0.5,
            region_viewport_fraction: 0.4,
            autoplay_interval_s: 4.0,
            autoplay_loop: true,
        }
    }
}

impl TrackingConfig {
    pub fn build_source(&self, step_count: usize) -> Box<dyn StepSource> {
        self.build_source_for(self.mode, step_count)
    }

    pub fn build_source_for(&self, mode: TrackingMode, step_count: usize) -> Box<dyn StepSource> {
        match mode {
            TrackingMode::ScrollFraction => Box::new(ScrollStepTracker::new(step_count)),
            TrackingMode::Regions => Box::new(RegionStepTracker::new(
                RegionLayout::Uniform {
                    count: step_count,
                    viewport_fraction: self.region_viewport_fraction,
                },
                BandRule {
                    band_margin: self.band_margin,
                    threshold: self.threshold,
                },
            )),
            TrackingMode::Autoplay => Box::new(AutoplaySource::new(
                step_count,
                self.autoplay_interval_s,
                self.autoplay_loop,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TrackingConfig, TrackingMode};

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: TrackingConfig =
            serde_json::from_str(r#"{"mode":"autoplay","autoplay_interval_s":2.5}"#)
                .expect("parse config");
        assert_eq!(cfg.mode, TrackingMode::Autoplay);
        assert_eq!(cfg.autoplay_interval_s, 2.5);
        assert_eq!(cfg.band_margin, 0.2);
    }

    #[test]
    fn builds_named_sources() {
        let cfg = TrackingConfig::default();
        assert_eq!(cfg.build_source(3).name(), "scroll");
        assert_eq!(cfg.build_source_for(TrackingMode::Regions, 3).name(), "regions");
        assert_eq!(cfg.build_source_for(TrackingMode::Autoplay, 3).name(), "autoplay");
    }
}

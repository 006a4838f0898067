//! Text overlay for the active waypoint.
//!
//! On a step change the old card fades out (rising and blurring), the content
//! swaps, and the new card fades in from below. The panel only tracks timing;
//! the host applies opacity, offset, and blur.

use journey::{Category, Journey, Rgba};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeTiming {
    pub exit_s: f64,
    pub enter_s: f64,
    /// Vertical travel during a transition, in CSS pixels.
    pub travel_px: f64,
    pub blur_px: f64,
}

impl Default for NarrativeTiming {
    fn default() -> Self {
        Self {
            exit_s: 0.5,
            enter_s: 0.5,
            travel_px: 30.0,
            blur_px: 10.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPhase {
    Idle,
    Exiting,
    Entering,
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Phase {
    Idle,
    Exiting { elapsed_s: f64 },
    Entering { elapsed_s: f64 },
}

/// What the overlay should show this frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeView {
    /// Step whose text is on screen (lags the active step while exiting).
    pub step: usize,
    pub id: String,
    pub label: String,
    pub sub_label: String,
    pub location: String,
    pub description: String,
    pub category: Category,
    pub color: Rgba,
    /// Absent when the waypoint has no tags, so no empty tag row is drawn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// `active / (n - 1)`, or 0 for a single waypoint.
    pub progress: f64,
    pub phase: TransitionPhase,
    pub opacity: f64,
    /// Positive is below the resting position.
    pub offset_y_px: f64,
    pub blur_px: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NarrativePanel {
    timing: NarrativeTiming,
    shown: usize,
    target: usize,
    phase: Phase,
}

impl NarrativePanel {
    pub fn new(timing: NarrativeTiming) -> Self {
        Self {
            timing,
            shown: 0,
            target: 0,
            phase: Phase::Idle,
        }
    }

    /// Shows `step` immediately with no transition.
    pub fn jump_to(&mut self, step: usize) {
        self.shown = step;
        self.target = step;
        self.phase = Phase::Idle;
    }

    pub fn on_step(&mut self, step: usize) {
        if step == self.target {
            return;
        }
        self.target = step;
        self.phase = match self.phase {
            Phase::Idle => Phase::Exiting { elapsed_s: 0.0 },
            // Still fading out the old card; the new content replaces the
            // pending one without restarting the fade.
            exiting @ Phase::Exiting { .. } => exiting,
            Phase::Entering { elapsed_s } => {
                let visible = ease_out(fraction(elapsed_s, self.timing.enter_s));
                Phase::Exiting {
                    elapsed_s: exit_time_for_visibility(visible) * self.timing.exit_s,
                }
            }
        };
    }

    pub fn advance(&mut self, dt_s: f64) {
        if !dt_s.is_finite() || dt_s <= 0.0 {
            return;
        }
        self.phase = match self.phase {
            Phase::Idle => Phase::Idle,
            Phase::Exiting { elapsed_s } => {
                let elapsed_s = elapsed_s + dt_s;
                if elapsed_s < self.timing.exit_s {
                    Phase::Exiting { elapsed_s }
                } else {
                    self.shown = self.target;
                    let carried = elapsed_s - self.timing.exit_s;
                    if carried < self.timing.enter_s {
                        Phase::Entering { elapsed_s: carried }
                    } else {
                        Phase::Idle
                    }
                }
            }
            Phase::Entering { elapsed_s } => {
                let elapsed_s = elapsed_s + dt_s;
                if elapsed_s < self.timing.enter_s {
                    Phase::Entering { elapsed_s }
                } else {
                    Phase::Idle
                }
            }
        };
    }

    pub fn shown_step(&self) -> usize {
        self.shown
    }

    pub fn phase(&self) -> TransitionPhase {
        match self.phase {
            Phase::Idle => TransitionPhase::Idle,
            Phase::Exiting { .. } => TransitionPhase::Exiting,
            Phase::Entering { .. } => TransitionPhase::Entering,
        }
    }

    pub fn view(&self, journey: &Journey) -> NarrativeView {
        let step = journey.clamp_index(self.shown);
        let waypoint = journey.get_or_first(step);
        let progress = if journey.len() > 1 {
            journey.clamp_index(self.target) as f64 / journey.last_index() as f64
        } else {
            0.0
        };

        let t = &self.timing;
        let (opacity, offset_y_px, blur_px) = match self.phase {
            Phase::Idle => (1.0, 0.0, 0.0),
            Phase::Exiting { elapsed_s } => {
                let p = ease_out(fraction(elapsed_s, t.exit_s));
                (1.0 - p, -t.travel_px * p, t.blur_px * p)
            }
            Phase::Entering { elapsed_s } => {
                let p = ease_out(fraction(elapsed_s, t.enter_s));
                (p, t.travel_px * (1.0 - p), t.blur_px * (1.0 - p))
            }
        };

        NarrativeView {
            step,
            id: waypoint.id.clone(),
            label: waypoint.label.clone(),
            sub_label: waypoint.sub_label.clone(),
            location: waypoint.location.clone(),
            description: waypoint.description.clone(),
            category: waypoint.category,
            color: waypoint.color,
            tags: waypoint.has_tags().then(|| waypoint.tags.clone()),
            progress,
            phase: self.phase(),
            opacity,
            offset_y_px,
            blur_px,
        }
    }
}

impl Default for NarrativePanel {
    fn default() -> Self {
        Self::new(NarrativeTiming::default())
    }
}

fn fraction(elapsed_s: f64, duration_s: f64) -> f64 {
    if duration_s <= 0.0 {
        1.0
    } else {
        (elapsed_s / duration_s).clamp(0.0, 1.0)
    }
}

/// Cubic ease-out.
fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Normalized exit time at which the fading card is exactly `visible` opaque.
fn exit_time_for_visibility(visible: f64) -> f64 {
    1.0 - visible.clamp(0.0, 1.0).cbrt()
}

#[cfg(test)]
mod tests {
    use super::{NarrativePanel, TransitionPhase};
    use journey::{Category, CoordinatePolicy, Journey, WaypointRecord};

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "expected {a} ~= {b} (eps={eps})");
    }

    fn journey() -> Journey {
        let records = ["intro", "a", "b", "c"]
            .into_iter()
            .enumerate()
            .map(|(i, id)| WaypointRecord {
                id: id.to_string(),
                label: format!("Label {id}"),
                sub_label: format!("20{i:02}"),
                location: String::new(),
                description: format!("About {id}"),
                category: if i == 0 { Category::Intro } else { Category::Work },
                coordinates: [i as f64, i as f64],
                color: None,
                tags: if id == "b" { vec!["Rust".to_string()] } else { Vec::new() },
            })
            .collect();
        Journey::new(records, CoordinatePolicy::Reject).expect("valid journey")
    }

    #[test]
    fn exit_then_enter_then_settle() {
        let journey = journey();
        let mut panel = NarrativePanel::default();
        panel.on_step(2);
        assert_eq!(panel.phase(), TransitionPhase::Exiting);
        // Old text stays up while it fades.
        assert_eq!(panel.view(&journey).id, "intro");

        panel.advance(0.25);
        let mid = panel.view(&journey);
        assert!(mid.opacity < 1.0 && mid.opacity > 0.0);
        assert!(mid.offset_y_px < 0.0);

        panel.advance(0.3);
        let entering = panel.view(&journey);
        assert_eq!(entering.phase, TransitionPhase::Entering);
        assert_eq!(entering.id, "b");
        assert!(entering.offset_y_px > 0.0);

        panel.advance(1.0);
        let idle = panel.view(&journey);
        assert_eq!(idle.phase, TransitionPhase::Idle);
        assert_eq!((idle.opacity, idle.offset_y_px, idle.blur_px), (1.0, 0.0, 0.0));
    }

    #[test]
    fn retarget_during_exit_keeps_fade() {
        let journey = journey();
        let mut panel = NarrativePanel::default();
        panel.on_step(1);
        panel.advance(0.3);
        let before = panel.view(&journey).opacity;
        panel.on_step(3);
        assert_close(panel.view(&journey).opacity, before, 1e-12);

        panel.advance(0.25);
        assert_eq!(panel.view(&journey).id, "c");
    }

    #[test]
    fn change_while_entering_exits_from_current_opacity() {
        let journey = journey();
        let mut panel = NarrativePanel::default();
        panel.on_step(1);
        panel.advance(0.6);
        let before = panel.view(&journey).opacity;
        panel.on_step(2);
        let after = panel.view(&journey);
        assert_eq!(after.phase, TransitionPhase::Exiting);
        assert_close(after.opacity, before, 1e-9);
    }

    #[test]
    fn no_stale_text_after_settling() {
        let journey = journey();
        let mut panel = NarrativePanel::default();
        for step in [1, 2, 3, 1] {
            panel.on_step(step);
            panel.advance(0.1);
        }
        panel.advance(2.0);
        let view = panel.view(&journey);
        assert_eq!(view.step, 1);
        assert_eq!(view.label, "Label a");
        assert_eq!(view.description, "About a");
    }

    #[test]
    fn tags_omitted_when_empty() {
        let journey = journey();
        let mut panel = NarrativePanel::default();
        panel.jump_to(1);
        assert_eq!(panel.view(&journey).tags, None);
        let json = serde_json::to_value(panel.view(&journey)).expect("serialize");
        assert!(json.get("tags").is_none());

        panel.jump_to(2);
        assert_eq!(panel.view(&journey).tags, Some(vec!["Rust".to_string()]));
    }

    #[test]
    fn progress_follows_active_step() {
        let journey = journey();
        let mut panel = NarrativePanel::default();
        assert_eq!(panel.view(&journey).progress, 0.0);
        panel.on_step(3);
        assert_eq!(panel.view(&journey).progress, 1.0);
        panel.jump_to(1);
        assert_close(panel.view(&journey).progress, 1.0 / 3.0, 1e-12);
    }
}

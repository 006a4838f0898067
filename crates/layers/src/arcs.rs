use foundation::math::{GlobeFrame, Vec3};
use journey::{Journey, Rgba};

use crate::layer::{Layer, LayerId};
use crate::symbology::ArcStyle;

/// A curved hop between two consecutive drawn waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    /// Timeline index of the start waypoint.
    pub from: usize,
    /// Timeline index of the end waypoint.
    pub to: usize,
    pub points: Vec<Vec3>,
    pub active: bool,
    pub color: Rgba,
    pub opacity: f32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ArcLayerSnapshot {
    pub arcs: Vec<Arc>,
}

impl ArcLayerSnapshot {
    pub fn segment_count(&self) -> usize {
        self.arcs.iter().map(|a| a.points.len().saturating_sub(1)).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArcLayer {
    id: LayerId,
    pub style: ArcStyle,
}

impl ArcLayer {
    pub fn new(style: ArcStyle) -> Self {
        Self {
            id: LayerId::ARCS,
            style,
        }
    }

    /// Arcs between consecutive non-sentinel waypoints. Pairs that project to
    /// the same globe point produce nothing. An arc is lit once the journey
    /// has reached its end waypoint.
    pub fn extract(
        &self,
        journey: &Journey,
        globe: &GlobeFrame,
        active_step: usize,
    ) -> ArcLayerSnapshot {
        let stops: Vec<_> = journey.non_sentinel().collect();
        let mut arcs = Vec::with_capacity(stops.len().saturating_sub(1));

        for pair in stops.windows(2) {
            let [(from, a), (to, b)] = [pair[0], pair[1]];
            if globe.coincident(a.coordinate, b.coordinate) {
                continue;
            }
            let start = globe.project(a.coordinate);
            let end = globe.project(b.coordinate);
            let control = control_point(start, end, globe.radius, self.style.height_factor);
            let active = to <= active_step;
            let (color, opacity) = if active {
                (self.style.active_color, self.style.active_opacity)
            } else {
                (self.style.inactive_color, self.style.inactive_opacity)
            };

            arcs.push(Arc {
                from,
                to,
                points: sample_quadratic_bezier(start, control, end, self.style.segments),
                active,
                color,
                opacity,
            });
        }

        ArcLayerSnapshot { arcs }
    }
}

impl Default for ArcLayer {
    fn default() -> Self {
        Self::new(ArcStyle::default())
    }
}

impl Layer for ArcLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &'static str {
        "arcs"
    }
}

/// Control point above the chord midpoint, lifted to
/// `radius + |end - start| * height_factor` so longer hops arc higher.
pub fn control_point(start: Vec3, end: Vec3, radius: f64, height_factor: f64) -> Vec3 {
    let lift = radius + start.distance(end) * height_factor;
    // Antipodal endpoints have a zero midpoint; any direction orthogonal to
    // both works.
    let up = ((start + end) * 0.5)
        .try_normalize()
        .unwrap_or_else(|| start.any_orthogonal());
    up * lift
}

/// `segments + 1` evenly spaced (in parameter) points on the quadratic Bezier
/// `p0 -> p1 -> p2`, endpoints included.
pub fn sample_quadratic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            let u = 1.0 - t;
            p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ArcLayer, control_point, sample_quadratic_bezier};
    use foundation::math::{GlobeFrame, Vec3, project};
    use journey::{Category, CoordinatePolicy, Journey, WaypointRecord};

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "expected {a} ~= {b} (eps={eps})");
    }

    fn journey(points: &[(f64, f64)]) -> Journey {
        let mut records = vec![record("intro", Category::Intro, 20.0, 79.0)];
        for (i, (lat, lon)) in points.iter().enumerate() {
            records.push(record(&format!("w{i}"), Category::Work, *lat, *lon));
        }
        Journey::new(records, CoordinatePolicy::Reject).expect("valid journey")
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

    #[test]
    fn endpoints_and_sample_count() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let c = Vec3::new(1.0, 1.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let pts = sample_quadratic_bezier(a, c, b, 40);
        assert_eq!(pts.len(), 41);
        assert_eq!(pts[0], a);
        assert_eq!(pts[40], b);
        // Midpoint of a quadratic is (p0 + 2 p1 + p2) / 4.
        assert_close(pts[20].x, 0.75, 1e-12);
        assert_close(pts[20].y, 0.75, 1e-12);
    }

    #[test]
    fn longer_hops_arc_higher() {
        let r = 3.5;
        let near = control_point(project(0.0, 0.0, r), project(0.0, 10.0, r), r, 0.5);
        let far = control_point(project(0.0, 0.0, r), project(0.0, 90.0, r), r, 0.5);
        assert!(far.length() > near.length());
        assert!(near.length() > r);
    }

    #[test]
    fn antipodal_control_point_is_finite() {
        let r = 3.5;
        let c = control_point(project(0.0, 0.0, r), project(0.0, 180.0, r), r, 0.5);
        assert!(c.is_finite());
        assert_close(c.length(), r + 2.0 * r * 0.5, 1e-9);
    }

    #[test]
    fn one_arc_per_consecutive_pair() {
        let journey = journey(&[(30.0, 77.0), (13.0, 78.0), (19.0, 73.0)]);
        let snap = ArcLayer::default().extract(&journey, &GlobeFrame::default(), 0);
        let pairs: Vec<_> = snap.arcs.iter().map(|a| (a.from, a.to)).collect();
        assert_eq!(pairs, vec![(1, 2), (2, 3)]);
        assert_eq!(snap.segment_count(), 80);
    }

    #[test]
    fn degenerate_pair_has_no_segments() {
        let twin = journey(&[(12.97, 77.59), (12.97, 77.59)]);
        let snap = ArcLayer::default().extract(&twin, &GlobeFrame::default(), 2);
        assert!(snap.arcs.is_empty());
        assert_eq!(snap.segment_count(), 0);

        // A repeated stop in the middle only drops that one hop.
        let repeated = journey(&[(30.0, 77.0), (13.0, 78.0), (13.0, 78.0), (19.0, 73.0)]);
        let snap = ArcLayer::default().extract(&repeated, &GlobeFrame::default(), 0);
        let pairs: Vec<_> = snap.arcs.iter().map(|a| (a.from, a.to)).collect();
        assert_eq!(pairs, vec![(1, 2), (3, 4)]);
    }

    #[test]
    fn pairs_meeting_on_the_globe_are_skipped() {
        let globe = GlobeFrame::default();

        let antimeridian = journey(&[(10.0, -180.0), (10.0, 180.0)]);
        let snap = ArcLayer::default().extract(&antimeridian, &globe, 2);
        assert!(snap.arcs.is_empty());
        assert_eq!(snap.segment_count(), 0);

        let pole = journey(&[(90.0, 0.0), (90.0, 45.0)]);
        let snap = ArcLayer::default().extract(&pole, &globe, 2);
        assert!(snap.arcs.is_empty());
        assert_eq!(snap.segment_count(), 0);

        // Nearby but distinct stops still get their hop.
        let close = journey(&[(89.0, 0.0), (89.0, 180.0)]);
        assert_eq!(ArcLayer::default().extract(&close, &globe, 2).arcs.len(), 1);
    }

    #[test]
    fn arcs_light_up_to_active_step() {
        let journey = journey(&[(30.0, 77.0), (13.0, 78.0), (19.0, 73.0)]);
        let layer = ArcLayer::default();
        let globe = GlobeFrame::default();

        let lit = |step| -> Vec<bool> {
            layer
                .extract(&journey, &globe, step)
                .arcs
                .iter()
                .map(|a| a.active)
                .collect()
        };
        assert_eq!(lit(0), vec![false, false]);
        assert_eq!(lit(1), vec![false, false]);
        assert_eq!(lit(2), vec![true, false]);
        assert_eq!(lit(3), vec![true, true]);

        let snap = layer.extract(&journey, &globe, 2);
        assert_eq!(snap.arcs[0].opacity, 0.8);
        assert_eq!(snap.arcs[1].opacity, 0.2);
    }

    #[test]
    fn arc_points_end_on_markers() {
        let journey = journey(&[(30.0, 77.0), (13.0, 78.0)]);
        let globe = GlobeFrame::default();
        let snap = ArcLayer::default().extract(&journey, &globe, 0);
        let arc = &snap.arcs[0];
        assert_eq!(arc.points[0], project(30.0, 77.0, globe.radius));
        assert_eq!(arc.points[40], project(13.0, 78.0, globe.radius));
    }
}

use std::fmt;

use foundation::math::{GeoCoord, GlobeFrame};
use journey::Journey;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaypointLine {
    pub index: usize,
    pub id: String,
    pub category: &'static str,
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub marker: bool,
}

/// What `journey validate` prints for a dataset that loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    pub name: Option<String>,
    pub waypoints: Vec<WaypointLine>,
    /// Consecutive drawn stops that meet on the globe; they get no arc.
    pub degenerate_pairs: Vec<(usize, usize)>,
}

impl DatasetReport {
    pub fn new(journey: &Journey, frame: &GlobeFrame) -> Self {
        let waypoints = journey
            .waypoints()
            .iter()
            .enumerate()
            .map(|(index, w)| WaypointLine {
                index,
                id: w.id.clone(),
                category: w.category.as_str(),
                lat_deg: w.coordinate.lat_deg,
                lon_deg: w.coordinate.lon_deg,
                marker: !journey.is_sentinel(index),
            })
            .collect();
        let stops: Vec<_> = journey.non_sentinel().collect();
        let degenerate_pairs = stops
            .windows(2)
            .filter(|pair| frame.coincident(pair[0].1.coordinate, pair[1].1.coordinate))
            .map(|pair| (pair[0].0, pair[1].0))
            .collect();
        Self {
            name: journey.name().map(str::to_string),
            waypoints,
            degenerate_pairs,
        }
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} waypoints",
            self.name.as_deref().unwrap_or("journey"),
            self.waypoints.len()
        )?;
        for w in &self.waypoints {
            writeln!(
                f,
                "  {:>3} {:<24} {:<10} {:>9.4} {:>10.4}{}",
                w.index,
                w.id,
                w.category,
                w.lat_deg,
                w.lon_deg,
                if w.marker { "" } else { "  (no marker)" }
            )?;
        }
        for (a, b) in &self.degenerate_pairs {
            writeln!(f, "  arc {a} -> {b} skipped: same place on the globe")?;
        }
        Ok(())
    }
}

/// One projector calibration check: forward projection plus the round trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionReport {
    /// `[lat, lon]` in degrees.
    pub input: [f64; 2],
    pub radius: f64,
    pub lon_offset_deg: f64,
    pub position: [f64; 3],
    pub round_trip: Option<[f64; 2]>,
}

impl ProjectionReport {
    pub fn new(coord: GeoCoord, frame: GlobeFrame) -> Self {
        let position = frame.project(coord);
        Self {
            input: [coord.lat_deg, coord.lon_deg],
            radius: frame.radius,
            lon_offset_deg: frame.lon_offset_deg,
            position: position.as_array(),
            round_trip: frame.unproject(position).map(|back| [back.lat_deg, back.lon_deg]),
        }
    }

    /// Largest per-axis angular error of the round trip, in degrees.
    pub fn round_trip_error_deg(&self) -> Option<f64> {
        self.round_trip.map(|[lat, lon]| {
            let dlat = (lat - self.input[0]).abs();
            let dlon = (lon - self.input[1]).rem_euclid(360.0);
            dlat.max(dlon.min(360.0 - dlon))
        })
    }
}

impl fmt::Display for ProjectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.position;
        writeln!(
            f,
            "({:.4}, {:.4}) r={} offset={} -> ({x:.6}, {y:.6}, {z:.6})",
            self.input[0], self.input[1], self.radius, self.lon_offset_deg
        )?;
        match (self.round_trip, self.round_trip_error_deg()) {
            (Some([lat, lon]), Some(err)) => {
                writeln!(f, "round trip: ({lat:.4}, {lon:.4}), error {err:.2e} deg")
            }
            _ => writeln!(f, "round trip: undefined"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journey::CoordinatePolicy;
    use pretty_assertions::assert_eq;

    const DATASET: &str = r#"{
        "version": "1.0",
        "name": "sample",
        "waypoints": [
            { "id": "intro", "label": "Start", "category": "intro", "coordinates": [20, 79] },
            { "id": "a", "label": "A", "category": "education", "coordinates": [30, 77] },
            { "id": "a2", "label": "A again", "category": "work", "coordinates": [30, 77] },
            { "id": "b", "label": "B", "category": "work", "coordinates": [13, 78] }
        ]
    }"#;

    #[test]
    fn dataset_report_flags_sentinel_and_repeated_places() {
        let journey = Journey::from_json_str(DATASET, CoordinatePolicy::Reject).unwrap();
        let report = DatasetReport::new(&journey, &GlobeFrame::default());

        assert_eq!(report.name.as_deref(), Some("sample"));
        let markers: Vec<bool> = report.waypoints.iter().map(|w| w.marker).collect();
        assert_eq!(markers, vec![false, true, true, true]);
        assert_eq!(report.degenerate_pairs, vec![(1, 2)]);

        let text = report.to_string();
        assert!(text.starts_with("sample: 4 waypoints"));
        assert!(text.contains("arc 1 -> 2 skipped"));
    }

    #[test]
    fn dataset_report_flags_pairs_meeting_across_the_dateline_and_poles() {
        let payload = r#"{
            "version": "1.0",
            "waypoints": [
                { "id": "intro", "label": "Start", "category": "intro", "coordinates": [0, 0] },
                { "id": "west", "label": "W", "category": "work", "coordinates": [10, -180] },
                { "id": "east", "label": "E", "category": "work", "coordinates": [10, 180] },
                { "id": "pole", "label": "P", "category": "work", "coordinates": [90, 0] },
                { "id": "pole2", "label": "P2", "category": "award", "coordinates": [90, 45] }
            ]
        }"#;
        let journey = Journey::from_json_str(payload, CoordinatePolicy::Reject).unwrap();
        let report = DatasetReport::new(&journey, &GlobeFrame::default());
        assert_eq!(report.degenerate_pairs, vec![(1, 2), (3, 4)]);
    }

    #[test]
    fn projection_report_round_trips() {
        let report = ProjectionReport::new(GeoCoord::new(13.0, 78.0), GlobeFrame::new(3.5, 180.0));
        let [x, y, z] = report.position;
        assert!(((x * x + y * y + z * z).sqrt() - 3.5).abs() < 1e-9);
        assert!(report.round_trip_error_deg().unwrap() < 1e-9);
    }

    #[test]
    fn round_trip_error_ignores_the_dateline_wrap() {
        let report = ProjectionReport::new(GeoCoord::new(0.0, 180.0), GlobeFrame::new(1.0, 0.0));
        assert!(report.round_trip_error_deg().unwrap() < 1e-9);
    }
}

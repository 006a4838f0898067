//! Geographic to sphere-surface projection.
//!
//! Every layer that places something on the globe (markers, arc endpoints,
//! camera targets) goes through [`GlobeFrame::project`] or [`project`] so the
//! placements agree bit for bit.
//!
//! Axis convention (right-handed, Y up):
//! - `+Y` is the north pole.
//! - With the default 180 degree longitude offset, (0N, 0E) maps to `+X` and
//!   (0N, 90E) maps to `-Z`. This matches an equirectangular texture whose left
//!   edge (u = 0) is the antimeridian wrapped onto a sphere mesh whose seam lies
//!   on `-X`.

use super::{GeoCoord, Vec3, wrap_lon_deg};

/// Longitude calibration for an unrotated equirectangular globe texture.
pub const DEFAULT_LON_OFFSET_DEG: f64 = 180.0;

/// Chord length, as a fraction of the radius, at or below which two projected
/// points are the same place on the globe.
pub const COINCIDENT_EPS: f64 = 1e-9;

/// Projects a latitude/longitude (degrees) onto a sphere of `radius` using the
/// default longitude offset.
#[inline]
pub fn project(lat_deg: f64, lon_deg: f64, radius: f64) -> Vec3 {
    project_with_offset(lat_deg, lon_deg, radius, DEFAULT_LON_OFFSET_DEG)
}

/// Projects a latitude/longitude (degrees) onto a sphere of `radius`.
///
/// `lon_offset_deg` rotates the azimuth so the texture's prime meridian lines
/// up with geographic reality.
pub fn project_with_offset(lat_deg: f64, lon_deg: f64, radius: f64, lon_offset_deg: f64) -> Vec3 {
    let phi = (90.0 - lat_deg).to_radians();
    let theta = (lon_deg + lon_offset_deg).to_radians();

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    Vec3::new(
        -radius * sin_phi * cos_theta,
        radius * cos_phi,
        radius * sin_phi * sin_theta,
    )
}

/// Recovers the geographic coordinate of a point on (or off) the sphere.
///
/// Longitude is undefined at the poles; it comes back as whatever `atan2`
/// yields there.
pub fn unproject(point: Vec3, lon_offset_deg: f64) -> Option<GeoCoord> {
    let r = point.length();
    if r <= 1e-12 || !r.is_finite() {
        return None;
    }
    let phi = (point.y / r).clamp(-1.0, 1.0).acos();
    let theta = point.z.atan2(-point.x);
    let lat = 90.0 - phi.to_degrees();
    let lon = wrap_lon_deg(theta.to_degrees() - lon_offset_deg);
    Some(GeoCoord::new(lat, lon))
}

/// The globe the journey is drawn on: a sphere radius plus the texture
/// calibration. Owned by the view and handed to every layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlobeFrame {
    pub radius: f64,
    pub lon_offset_deg: f64,
}

impl GlobeFrame {
    pub const fn new(radius: f64, lon_offset_deg: f64) -> Self {
        Self {
            radius,
            lon_offset_deg,
        }
    }

    pub fn project(&self, coord: GeoCoord) -> Vec3 {
        project_with_offset(coord.lat_deg, coord.lon_deg, self.radius, self.lon_offset_deg)
    }

    /// Unit vector from the sphere centre toward `coord`.
    pub fn direction(&self, coord: GeoCoord) -> Vec3 {
        project_with_offset(coord.lat_deg, coord.lon_deg, 1.0, self.lon_offset_deg)
    }

    pub fn unproject(&self, point: Vec3) -> Option<GeoCoord> {
        unproject(point, self.lon_offset_deg)
    }

    /// True when both coordinates land on the same point of the sphere. This
    /// covers +180/-180 longitude pairs and any two longitudes at a pole.
    pub fn coincident(&self, a: GeoCoord, b: GeoCoord) -> bool {
        self.project(a).distance(self.project(b)) <= COINCIDENT_EPS * self.radius
    }
}

impl Default for GlobeFrame {
    fn default() -> Self {
        Self::new(3.5, DEFAULT_LON_OFFSET_DEG)
    }
}

#[cfg(test)]
mod tests {
    use super::{GlobeFrame, project, project_with_offset, unproject};
    use crate::math::{GeoCoord, Vec3};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
        assert_close(a.x, b.x, eps);
        assert_close(a.y, b.y, eps);
        assert_close(a.z, b.z, eps);
    }

    #[test]
    fn equator_prime_meridian_is_positive_x() {
        assert_vec_close(project(0.0, 0.0, 2.0), Vec3::new(2.0, 0.0, 0.0), 1e-12);
    }

    #[test]
    fn equator_90e_is_negative_z() {
        assert_vec_close(project(0.0, 90.0, 1.0), Vec3::new(0.0, 0.0, -1.0), 1e-12);
    }

    #[test]
    fn north_pole_is_positive_y() {
        assert_vec_close(project(90.0, 45.0, 3.5), Vec3::new(0.0, 3.5, 0.0), 1e-12);
    }

    #[test]
    fn projection_is_deterministic_and_on_sphere() {
        for lat in [-90.0, -45.5, 0.0, 13.0, 20.0, 30.0, 89.9] {
            for lon in [-180.0, -77.0, 0.0, 78.0, 79.0, 180.0] {
                for radius in [0.5, 3.0, 3.5, 100.0] {
                    let a = project(lat, lon, radius);
                    let b = project(lat, lon, radius);
                    assert_eq!(a, b);
                    assert_close(a.length(), radius, 1e-9 * radius);
                }
            }
        }
    }

    #[test]
    fn offsets_differ_by_a_quarter_turn_about_y() {
        // A 90 degree offset is the 180 degree frame rotated a quarter turn
        // around the pole axis: (x, z) -> (-z, x) for the same coordinate.
        let a = project_with_offset(13.0, 78.0, 1.0, 180.0);
        let b = project_with_offset(13.0, 78.0, 1.0, 90.0);
        assert_vec_close(b, Vec3::new(-a.z, a.y, a.x), 1e-12);
    }

    #[test]
    fn unproject_recovers_coordinates() {
        let frame = GlobeFrame::default();
        for (lat, lon) in [(13.0, 78.0), (30.36, 76.85), (-33.9, 151.2), (51.5, -0.12)] {
            let p = frame.project(GeoCoord::new(lat, lon));
            let back = frame.unproject(p).expect("non-zero point");
            assert_close(back.lat_deg, lat, 1e-9);
            assert_close(back.lon_deg, lon, 1e-9);
        }
        assert!(unproject(Vec3::ZERO, 180.0).is_none());
    }

    #[test]
    fn coincident_compares_projected_points() {
        let frame = GlobeFrame::default();
        assert!(frame.coincident(GeoCoord::new(10.0, -180.0), GeoCoord::new(10.0, 180.0)));
        assert!(frame.coincident(GeoCoord::new(90.0, 0.0), GeoCoord::new(90.0, 45.0)));
        assert!(frame.coincident(GeoCoord::new(-90.0, -30.0), GeoCoord::new(-90.0, 120.0)));
        assert!(frame.coincident(GeoCoord::new(12.97, 77.59), GeoCoord::new(12.97, 77.59)));
        assert!(!frame.coincident(GeoCoord::new(12.97, 77.59), GeoCoord::new(12.97, 77.6)));
        assert!(!frame.coincident(GeoCoord::new(89.0, 0.0), GeoCoord::new(89.0, 180.0)));
    }

    #[test]
    fn direction_is_unit_projection() {
        let frame = GlobeFrame::new(3.5, 180.0);
        let c = GeoCoord::new(13.0, 78.0);
        let d = frame.direction(c);
        assert_close(d.length(), 1.0, 1e-12);
        assert_vec_close(d * 3.5, frame.project(c), 1e-12);
    }
}

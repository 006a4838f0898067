//! Column-major 4x4 helpers for the camera. Matrices are `[[f32; 4]; 4]`
//! with `m[col][row]`, ready for a uniform buffer.

use foundation::math::Vec3;

pub type Mat4 = [[f32; 4]; 4];

pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut c = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            c[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    c
}

/// Right-handed perspective with depth mapped to `[0, 1]`.
pub fn perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> Mat4 {
    let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
    let f = 1.0 / (0.5 * fov_y_rad).tan();
    let range = near - far;

    [
        [(f / aspect) as f32, 0.0, 0.0, 0.0],
        [0.0, f as f32, 0.0, 0.0],
        [0.0, 0.0, (far / range) as f32, -1.0],
        [0.0, 0.0, ((near * far) / range) as f32, 0.0],
    ]
}

/// Right-handed view matrix looking from `eye` toward `target`.
///
/// Falls back to `+Z` as the up hint when `up` is parallel to the view
/// direction, which happens when the camera sits over a pole.
pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let Some(f) = (target - eye).try_normalize() else {
        return IDENTITY;
    };
    let s = f
        .cross(up)
        .try_normalize()
        .or_else(|| f.cross(Vec3::Z).try_normalize())
        .unwrap_or(Vec3::X);
    let u = s.cross(f);

    let ex = -s.dot(eye);
    let ey = -u.dot(eye);
    let ez = f.dot(eye);

    [
        [s.x as f32, u.x as f32, -f.x as f32, 0.0],
        [s.y as f32, u.y as f32, -f.y as f32, 0.0],
        [s.z as f32, u.z as f32, -f.z as f32, 0.0],
        [ex as f32, ey as f32, ez as f32, 1.0],
    ]
}

/// Applies `m` to a point and divides by `w`.
pub fn transform_point(m: Mat4, p: Vec3) -> Option<Vec3> {
    let v = [p.x as f32, p.y as f32, p.z as f32, 1.0];
    let mut out = [0.0f32; 4];
    for (row, slot) in out.iter_mut().enumerate() {
        *slot = m[0][row] * v[0] + m[1][row] * v[1] + m[2][row] * v[2] + m[3][row] * v[3];
    }
    if out[3].abs() <= f32::EPSILON {
        return None;
    }
    Some(Vec3::new(
        (out[0] / out[3]) as f64,
        (out[1] / out[3]) as f64,
        (out[2] / out[3]) as f64,
    ))
}

#[cfg(test)]
mod tests {
    use super::{IDENTITY, look_at_rh, mul, perspective_rh_z0, transform_point};
    use foundation::math::Vec3;

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "expected {a} ~= {b} (eps={eps})");
    }

    #[test]
    fn identity_is_neutral() {
        let p = perspective_rh_z0(35f64.to_radians(), 1.5, 0.1, 100.0);
        assert_eq!(mul(IDENTITY, p), p);
        assert_eq!(mul(p, IDENTITY), p);
    }

    #[test]
    fn look_at_puts_target_on_negative_z() {
        let view = look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        let origin = transform_point(view, Vec3::ZERO).expect("finite");
        assert_close(origin.x, 0.0, 1e-6);
        assert_close(origin.y, 0.0, 1e-6);
        assert_close(origin.z, -10.0, 1e-5);
    }

    #[test]
    fn look_at_over_pole_stays_finite() {
        let view = look_at_rh(Vec3::new(0.0, 7.0, 0.0), Vec3::ZERO, Vec3::Y);
        assert!(view.iter().flatten().all(|v| v.is_finite()));
        let origin = transform_point(view, Vec3::ZERO).expect("finite");
        assert_close(origin.z, -7.0, 1e-5);
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth() {
        let p = perspective_rh_z0(35f64.to_radians(), 1.0, 1.0, 100.0);
        let near = transform_point(p, Vec3::new(0.0, 0.0, -1.0)).expect("near");
        let far = transform_point(p, Vec3::new(0.0, 0.0, -100.0)).expect("far");
        assert_close(near.z, 0.0, 1e-5);
        assert_close(far.z, 1.0, 1e-5);
    }
}

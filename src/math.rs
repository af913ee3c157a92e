//! Math type aliases and helper functions.
//!
//! Thin layer over `nalgebra` providing the f32 types used throughout the
//! crate plus the handful of matrix/vector helpers the importer needs.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Unit quaternion (f32) used for node rotations.
pub type Quat = nalgebra::UnitQuaternion<f32>;

/// Build a translation-only 4x4 matrix.
pub fn mat4_from_translation(t: Vec3) -> Mat4 {
    Mat4::new_translation(&t)
}

/// Build a 4x4 TRS matrix from scale, rotation, and translation.
pub fn mat4_from_scale_rotation_translation(scale: Vec3, rotation: Quat, translation: Vec3) -> Mat4 {
    let m = rotation.to_rotation_matrix();
    let rm = m.matrix();
    #[rustfmt::skip]
    let result = Mat4::new(
        rm[(0, 0)] * scale.x, rm[(0, 1)] * scale.y, rm[(0, 2)] * scale.z, translation.x,
        rm[(1, 0)] * scale.x, rm[(1, 1)] * scale.y, rm[(1, 2)] * scale.z, translation.y,
        rm[(2, 0)] * scale.x, rm[(2, 1)] * scale.y, rm[(2, 2)] * scale.z, translation.z,
        0.0,                  0.0,                  0.0,                  1.0,
    );
    result
}

/// Create a unit quaternion from an axis and an angle in radians.
///
/// A zero-length axis yields the identity rotation.
pub fn quat_from_axis_angle(axis: Vec3, angle: f32) -> Quat {
    match nalgebra::Unit::try_new(axis, 1e-10) {
        Some(unit_axis) => Quat::from_axis_angle(&unit_axis, angle),
        None => Quat::identity(),
    }
}

/// Geometric normal of the triangle (a, b, c): `normalize(cross(b - a, c - a))`.
///
/// A degenerate (zero-area) triangle produces a NaN vector; callers that
/// cannot tolerate NaN must filter their input.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(&(c - a)).normalize()
}

//! Math helpers shared by the animation crates.
//!
//! All matrices are glam [`Mat4`] in column-vector convention: `a * b`
//! applies `b` first, then `a`.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Default tolerance used by the approximate comparisons below.
pub const EPSILON: f32 = 1e-5;

/// Determinants below this magnitude are treated as singular.
const SINGULAR_DETERMINANT: f32 = 1e-12;

/// Builds a quaternion from Euler angles in radians.
///
/// The rotation is composed yaw (Z), then pitch (Y), then roll (X), which is
/// the order model importers such as MilkShape store joint rotations in.
#[inline]
#[must_use]
pub fn quat_from_euler_zyx(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_euler(EulerRot::ZYX, z, y, x)
}

/// Builds a rigid transform that rotates first and then translates.
#[inline]
#[must_use]
pub fn rigid_transform(rotation: Quat, translation: Vec3) -> Mat4 {
    Mat4::from_rotation_translation(rotation, translation)
}

/// Same as [`rigid_transform`] with the rotation given as ZYX Euler angles.
#[inline]
#[must_use]
pub fn rigid_transform_euler(euler: Vec3, translation: Vec3) -> Mat4 {
    rigid_transform(quat_from_euler_zyx(euler.x, euler.y, euler.z), translation)
}

/// Adds `matrix * weight` into `acc`, entry by entry.
///
/// This is a plain linear combination of all sixteen entries. Summing
/// weighted rigid transforms this way does not keep the rotation block
/// orthonormal; callers that blend poses rely on the weights summing to one
/// so that the homogeneous row stays `(0, 0, 0, 1)`.
#[inline]
pub fn accumulate_weighted(acc: &mut Mat4, matrix: &Mat4, weight: f32) {
    *acc += *matrix * weight;
}

/// Inverts `matrix`, returning `None` when it is singular or not finite.
#[must_use]
pub fn try_inverse(matrix: &Mat4) -> Option<Mat4> {
    let det = matrix.determinant();
    if !det.is_finite() || det.abs() < SINGULAR_DETERMINANT {
        return None;
    }
    Some(matrix.inverse())
}

#[inline]
#[must_use]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[inline]
#[must_use]
pub fn mat4_approx_eq(a: &Mat4, b: &Mat4) -> bool {
    a.abs_diff_eq(*b, EPSILON)
}

use glam::{Quat, Vec3};

/// A keyframe value that can be interpolated between two samples.
pub trait Interpolatable: Copy + Sized {
    /// Value a channel with no samples evaluates to.
    const REST: Self;

    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    const REST: Self = 0.0;

    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    const REST: Self = Vec3::ZERO;

    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self {
        start.lerp(*end, t)
    }
}

/// Rotations interpolate along the shortest arc.
impl Interpolatable for Quat {
    const REST: Self = Quat::IDENTITY;

    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self {
        start.slerp(*end, t)
    }
}

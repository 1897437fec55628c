use glam::{Quat, Vec3};

/// Values that can be blended between two samples.
///
/// `t` is expected in `[0, 1]`. Implementations return `start` for `t == 0`
/// and `end` for `t == 1` up to floating-point precision; callers that need
/// bit-exact endpoints short-circuit before calling.
pub trait Interpolatable: Copy + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    /// Shortest-path spherical interpolation.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }
}

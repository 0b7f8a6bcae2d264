//! Built-in interpolation functions.
//!
//! A tween needs a type-specific interpolation function `(T, T, f32) -> T`.
//! [`TweenValue`] supplies one for the common value types; anything else can
//! be tweened by passing an explicit function to
//! [`Tween::with_interpolator`](crate::Tween::with_interpolator).

use interpolation::lerp;

/// Value types with a built-in interpolation function.
///
/// All interpolations are unclamped: an easing curve that overshoots `[0, 1]`
/// (Back, Elastic, Bounce) produces values beyond the start/end range, which
/// is exactly what those curves are for.
pub trait TweenValue: Copy + 'static {
    /// Compute the value `t` of the way from `a` to `b`.
    fn interpolate(a: Self, b: Self, t: f32) -> Self;
}

impl TweenValue for f32 {
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        lerp(&a, &b, &t)
    }
}

impl TweenValue for f64 {
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        lerp(&a, &b, &f64::from(t))
    }
}

/// RGBA color channels, blended per channel.
impl TweenValue for [f32; 4] {
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        [
            lerp(&a[0], &b[0], &t),
            lerp(&a[1], &b[1], &t),
            lerp(&a[2], &b[2], &t),
            lerp(&a[3], &b[3], &t),
        ]
    }
}

#[cfg(feature = "glam")]
mod glam_impls {
    use super::TweenValue;
    use glam::{Quat, Vec2, Vec3, Vec4};

    impl TweenValue for Vec2 {
        fn interpolate(a: Self, b: Self, t: f32) -> Self {
            a.lerp(b, t)
        }
    }

    impl TweenValue for Vec3 {
        fn interpolate(a: Self, b: Self, t: f32) -> Self {
            a.lerp(b, t)
        }
    }

    impl TweenValue for Vec4 {
        fn interpolate(a: Self, b: Self, t: f32) -> Self {
            a.lerp(b, t)
        }
    }

    /// Shortest-path spherical interpolation, not a componentwise blend.
    impl TweenValue for Quat {
        fn interpolate(a: Self, b: Self, t: f32) -> Self {
            a.slerp(b, t)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_lerp_is_unclamped() {
        assert_eq!(f32::interpolate(0.0, 10.0, 0.5), 5.0);
        assert_eq!(f32::interpolate(0.0, 10.0, 1.5), 15.0);
        assert_eq!(f64::interpolate(1.0, 3.0, 0.25), 1.5);
    }

    #[test]
    fn rgba_blends_per_channel() {
        let black = [0.0, 0.0, 0.0, 1.0];
        let white = [1.0, 1.0, 1.0, 1.0];
        assert_eq!(
            <[f32; 4]>::interpolate(black, white, 0.5),
            [0.5, 0.5, 0.5, 1.0]
        );
    }

    #[cfg(feature = "glam")]
    #[test]
    fn quat_takes_the_shortest_path() {
        use glam::Quat;
        use std::f32::consts::FRAC_PI_2;

        let start = Quat::IDENTITY;
        let end = Quat::from_rotation_z(FRAC_PI_2);
        let halfway = Quat::interpolate(start, end, 0.5);
        let expected = Quat::from_rotation_z(FRAC_PI_2 / 2.0);
        assert!(halfway.abs_diff_eq(expected, 1e-5));
    }

    #[cfg(feature = "glam")]
    #[test]
    fn vec3_lerp_is_unclamped() {
        use glam::Vec3;
        assert_eq!(Vec3::interpolate(Vec3::ZERO, Vec3::X, 2.0), Vec3::X * 2.0);
    }
}

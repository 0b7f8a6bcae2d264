//! Catalog of easing curves.
//!
//! Every curve is a pure `fn(f32) -> f32` mapping normalized progress to
//! manipulated progress. Monotonic families stay within `[0, 1]`; the Back,
//! Elastic and Bounce families intentionally overshoot mid-curve but still
//! hit 0 at `t = 0` and 1 at `t = 1`. Visualisations at <https://easings.net/>.

use std::f32::consts::PI;
use std::rc::Rc;

const C1: f32 = 1.701_58;
const C2: f32 = C1 * 1.525;
const C3: f32 = C1 + 1.0;
const C4: f32 = 2.0 * PI / 3.0;
const C5: f32 = 2.0 * PI / 4.5;

/// Linearly reach the destination state.
pub fn linear(t: f32) -> f32 {
    t
}

/// Ease in (^2).
pub fn quad_in(t: f32) -> f32 {
    t * t
}

/// Ease out (^2).
pub fn quad_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Ease in and out (^2).
pub fn quad_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Ease in (^3).
pub fn cubic_in(t: f32) -> f32 {
    t * t * t
}

/// Ease out (^3).
pub fn cubic_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Ease in and out (^3).
pub fn cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Ease in (^4).
pub fn quart_in(t: f32) -> f32 {
    t * t * t * t
}

/// Ease out (^4).
pub fn quart_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(4)
}

/// Ease in and out (^4).
pub fn quart_in_out(t: f32) -> f32 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

/// Ease in using a sine wave.
pub fn sine_in(t: f32) -> f32 {
    1.0 - (t * PI / 2.0).cos()
}

/// Ease out using a sine wave.
pub fn sine_out(t: f32) -> f32 {
    (t * PI / 2.0).sin()
}

/// Ease in and out using a sine wave.
pub fn sine_in_out(t: f32) -> f32 {
    -((PI * t).cos() - 1.0) / 2.0
}

/// Ease in exponentially. Exact at the `t = 0` boundary.
pub fn expo_in(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else {
        2f32.powf(10.0 * t - 10.0)
    }
}

/// Ease out exponentially. Exact at the `t = 1` boundary.
pub fn expo_out(t: f32) -> f32 {
    if (t - 1.0).abs() < f32::EPSILON {
        1.0
    } else {
        1.0 - 2f32.powf(-10.0 * t)
    }
}

/// Ease in and out exponentially. Exact at both boundaries.
pub fn expo_in_out(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if (t - 1.0).abs() < f32::EPSILON {
        1.0
    } else if t < 0.5 {
        2f32.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
    }
}

/// Ease in cyclically.
pub fn circ_in(t: f32) -> f32 {
    1.0 - (1.0 - t * t).sqrt()
}

/// Ease out cyclically.
pub fn circ_out(t: f32) -> f32 {
    (1.0 - (t - 1.0) * (t - 1.0)).sqrt()
}

/// Ease in and out cyclically.
pub fn circ_in_out(t: f32) -> f32 {
    if t < 0.5 {
        (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
    } else {
        ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
    }
}

/// Ease in, slightly overshooting.
pub fn back_in(t: f32) -> f32 {
    C3 * t * t * t - C1 * t * t
}

/// Ease out, slightly overshooting.
pub fn back_out(t: f32) -> f32 {
    1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
}

/// Ease in and out, slightly overshooting.
pub fn back_in_out(t: f32) -> f32 {
    if t < 0.5 {
        (2.0 * t).powi(2) * ((C2 + 1.0) * 2.0 * t - C2) / 2.0
    } else {
        ((2.0 * t - 2.0).powi(2) * ((C2 + 1.0) * (t * 2.0 - 2.0) + C2) + 2.0) / 2.0
    }
}

/// Ease in elastically. Exact at both boundaries.
pub fn elastic_in(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if (t - 1.0).abs() < f32::EPSILON {
        1.0
    } else {
        -(2f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * C4).sin()
    }
}

/// Ease out elastically. Exact at both boundaries.
pub fn elastic_out(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if (t - 1.0).abs() < f32::EPSILON {
        1.0
    } else {
        2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
    }
}

/// Ease in and out elastically. Exact at both boundaries.
pub fn elastic_in_out(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if (t - 1.0).abs() < f32::EPSILON {
        1.0
    } else if t < 0.5 {
        -(2f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * C5).sin()) / 2.0
    } else {
        2f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * C5).sin() / 2.0 + 1.0
    }
}

/// Ease in with a bounce.
pub fn bounce_in(t: f32) -> f32 {
    1.0 - bounce_out(1.0 - t)
}

/// Ease out with a bounce.
pub fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Ease in and out with a bounce. Deliberately symmetric: the second half
/// is [`bounce_out`], the mirror image of the first half's [`bounce_in`].
pub fn bounce_in_out(t: f32) -> f32 {
    if t < 0.5 {
        bounce_in(t * 2.0) * 0.5
    } else {
        bounce_out(t * 2.0 - 1.0) * 0.5 + 0.5
    }
}

/// Mirrored animation - reaches the destination state then returns back to
/// the original state.
pub fn spike(t: f32) -> f32 {
    if t <= 0.5 {
        quad_in(t / 0.5)
    } else {
        quad_in((1.0 - t) / 0.5)
    }
}

/// Lookup key for the built-in curve catalog.
///
/// An enum rather than a bare function so a curve choice stays serializable
/// and inspectable; use [`EaseKind::function`] or [`EaseKind::evaluate`] to
/// get at the curve itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EaseKind {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    SineIn,
    SineOut,
    SineInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    CircIn,
    CircOut,
    CircInOut,
    BackIn,
    BackOut,
    BackInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
    Spike,
}

impl EaseKind {
    /// Every catalog entry, in declaration order.
    pub const ALL: [EaseKind; 29] = [
        EaseKind::Linear,
        EaseKind::QuadIn,
        EaseKind::QuadOut,
        EaseKind::QuadInOut,
        EaseKind::CubicIn,
        EaseKind::CubicOut,
        EaseKind::CubicInOut,
        EaseKind::QuartIn,
        EaseKind::QuartOut,
        EaseKind::QuartInOut,
        EaseKind::SineIn,
        EaseKind::SineOut,
        EaseKind::SineInOut,
        EaseKind::ExpoIn,
        EaseKind::ExpoOut,
        EaseKind::ExpoInOut,
        EaseKind::CircIn,
        EaseKind::CircOut,
        EaseKind::CircInOut,
        EaseKind::BackIn,
        EaseKind::BackOut,
        EaseKind::BackInOut,
        EaseKind::ElasticIn,
        EaseKind::ElasticOut,
        EaseKind::ElasticInOut,
        EaseKind::BounceIn,
        EaseKind::BounceOut,
        EaseKind::BounceInOut,
        EaseKind::Spike,
    ];

    /// The curve function behind this catalog entry.
    pub fn function(self) -> fn(f32) -> f32 {
        match self {
            EaseKind::Linear => linear,
            EaseKind::QuadIn => quad_in,
            EaseKind::QuadOut => quad_out,
            EaseKind::QuadInOut => quad_in_out,
            EaseKind::CubicIn => cubic_in,
            EaseKind::CubicOut => cubic_out,
            EaseKind::CubicInOut => cubic_in_out,
            EaseKind::QuartIn => quart_in,
            EaseKind::QuartOut => quart_out,
            EaseKind::QuartInOut => quart_in_out,
            EaseKind::SineIn => sine_in,
            EaseKind::SineOut => sine_out,
            EaseKind::SineInOut => sine_in_out,
            EaseKind::ExpoIn => expo_in,
            EaseKind::ExpoOut => expo_out,
            EaseKind::ExpoInOut => expo_in_out,
            EaseKind::CircIn => circ_in,
            EaseKind::CircOut => circ_out,
            EaseKind::CircInOut => circ_in_out,
            EaseKind::BackIn => back_in,
            EaseKind::BackOut => back_out,
            EaseKind::BackInOut => back_in_out,
            EaseKind::ElasticIn => elastic_in,
            EaseKind::ElasticOut => elastic_out,
            EaseKind::ElasticInOut => elastic_in_out,
            EaseKind::BounceIn => bounce_in,
            EaseKind::BounceOut => bounce_out,
            EaseKind::BounceInOut => bounce_in_out,
            EaseKind::Spike => spike,
        }
    }

    /// Evaluate this curve at `t`.
    pub fn evaluate(self, t: f32) -> f32 {
        (self.function())(t)
    }

    /// Reverse lookup by function identity. Returns `None` for anything that
    /// is not a catalog builtin (custom or inverted easings).
    #[allow(unpredictable_function_pointer_comparisons)]
    pub fn from_function(f: fn(f32) -> f32) -> Option<EaseKind> {
        EaseKind::ALL.iter().copied().find(|kind| kind.function() == f)
    }
}

/// An easing curve as held by a tween: a catalog entry or a caller-supplied
/// function.
#[derive(Clone)]
pub enum Easing {
    Builtin(EaseKind),
    Custom(Rc<dyn Fn(f32) -> f32>),
}

impl Easing {
    /// Wrap a caller-supplied curve.
    pub fn custom(f: impl Fn(f32) -> f32 + 'static) -> Self {
        Easing::Custom(Rc::new(f))
    }

    /// Apply the curve to normalized progress `t`.
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Builtin(kind) => kind.evaluate(t),
            Easing::Custom(f) => f(t),
        }
    }

    /// The catalog entry this easing came from, or `None` for custom and
    /// inverted curves.
    pub fn kind(&self) -> Option<EaseKind> {
        match self {
            Easing::Builtin(kind) => Some(*kind),
            Easing::Custom(_) => None,
        }
    }

    /// Flip the curve: the result computes `1 - f(t)`. Inverting twice
    /// reproduces the original curve (up to floating point).
    pub fn inverted(&self) -> Easing {
        let inner = self.clone();
        Easing::custom(move |t| 1.0 - inner.apply(t))
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Builtin(EaseKind::Linear)
    }
}

impl From<EaseKind> for Easing {
    fn from(kind: EaseKind) -> Self {
        Easing::Builtin(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f32; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];
    const TOLERANCE: f32 = 1e-5;

    fn assert_close(a: f32, b: f32, context: &str) {
        assert!(
            (a - b).abs() < TOLERANCE,
            "{context}: {a} vs {b}"
        );
    }

    #[test]
    fn every_curve_hits_both_boundaries() {
        for kind in EaseKind::ALL {
            if kind == EaseKind::Spike {
                continue;
            }
            assert_close(kind.evaluate(0.0), 0.0, &format!("{kind:?} at 0"));
            assert_close(kind.evaluate(1.0), 1.0, &format!("{kind:?} at 1"));
        }
        // Spike returns to where it started.
        assert_close(spike(0.0), 0.0, "spike at 0");
        assert_close(spike(1.0), 0.0, "spike at 1");
        assert_close(spike(0.5), 1.0, "spike at peak");
    }

    #[test]
    fn expo_and_elastic_boundaries_are_exact() {
        assert_eq!(expo_in(0.0), 0.0);
        assert_eq!(expo_out(1.0), 1.0);
        assert_eq!(expo_in_out(0.0), 0.0);
        assert_eq!(expo_in_out(1.0), 1.0);
        assert_eq!(elastic_in(0.0), 0.0);
        assert_eq!(elastic_in(1.0), 1.0);
        assert_eq!(elastic_out(0.0), 0.0);
        assert_eq!(elastic_out(1.0), 1.0);
        assert_eq!(elastic_in_out(0.0), 0.0);
        assert_eq!(elastic_in_out(1.0), 1.0);
    }

    #[test]
    fn out_mirrors_in_for_polynomial_and_circ_families() {
        let pairs: [(fn(f32) -> f32, fn(f32) -> f32); 4] = [
            (quad_in, quad_out),
            (cubic_in, cubic_out),
            (quart_in, quart_out),
            (circ_in, circ_out),
        ];
        for (ease_in, ease_out) in pairs {
            for t in SAMPLES {
                assert_close(ease_out(t), 1.0 - ease_in(1.0 - t), "out(t) == 1 - in(1 - t)");
            }
        }
    }

    #[test]
    fn double_inversion_is_identity() {
        for kind in EaseKind::ALL {
            let original = Easing::from(kind);
            let twice = original.inverted().inverted();
            for t in SAMPLES {
                assert_close(twice.apply(t), original.apply(t), &format!("{kind:?}"));
            }
        }
    }

    #[test]
    fn inversion_flips_the_curve() {
        let flipped = Easing::from(EaseKind::QuadIn).inverted();
        for t in SAMPLES {
            assert_close(flipped.apply(t), 1.0 - quad_in(t), "inverted quad_in");
        }
    }

    #[test]
    fn reverse_lookup_finds_builtins_only() {
        for kind in EaseKind::ALL {
            assert_eq!(EaseKind::from_function(kind.function()), Some(kind));
        }
        fn not_in_catalog(t: f32) -> f32 {
            t * 0.5
        }
        assert_eq!(EaseKind::from_function(not_in_catalog), None);
        assert_eq!(Easing::custom(|t| t).kind(), None);
        assert_eq!(Easing::from(EaseKind::BackIn).inverted().kind(), None);
        assert_eq!(Easing::from(EaseKind::BackIn).kind(), Some(EaseKind::BackIn));
    }

    #[test]
    fn bounce_in_out_is_symmetric() {
        // Second half is the mirror image of the first.
        for t in [0.0, 0.1, 0.2, 0.3, 0.4, 0.5] {
            assert_close(
                bounce_in_out(t),
                1.0 - bounce_in_out(1.0 - t),
                "bounce_in_out symmetry",
            );
        }
    }

    #[test]
    fn linear_is_the_default() {
        assert_eq!(EaseKind::default(), EaseKind::Linear);
        for t in SAMPLES {
            assert_eq!(Easing::default().apply(t), t);
        }
    }
}

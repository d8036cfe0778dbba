#![forbid(unsafe_code)]

//! Easing curves.
//!
//! The keyword curves use the CSS definitions so a host that hands timing
//! to the browser (`transition-timing-function`) and one that samples
//! frames itself produce the same motion.

/// A timing curve mapping linear progress to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Expo-like ease-out used by the entrance variants.
    pub const EASE_OUT_EXPO: Self = Self::CubicBezier(0.22, 1.0, 0.36, 1.0);

    /// Evaluate at `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match *self {
            Self::Linear => t,
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// CSS `transition-timing-function` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        match *self {
            Self::Linear => "linear".to_string(),
            Self::EaseIn => "ease-in".to_string(),
            Self::EaseOut => "ease-out".to_string(),
            Self::EaseInOut => "ease-in-out".to_string(),
            Self::CubicBezier(x1, y1, x2, y2) => format!("cubic-bezier({x1}, {y1}, {x2}, {y2})"),
        }
    }
}

/// Solve the curve's x for `x == t` with Newton steps, falling back to
/// bisection when the slope flattens, then evaluate y.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }
    let mut guess = t;
    for _ in 0..8 {
        let err = component(x1, x2, guess) - t;
        if err.abs() < 1e-5 {
            return component(y1, y2, guess);
        }
        let slope = derivative(x1, x2, guess);
        if slope.abs() < 1e-6 {
            break;
        }
        guess -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    guess = t;
    for _ in 0..32 {
        let x = component(x1, x2, guess);
        if (x - t).abs() < 1e-5 {
            break;
        }
        if x < t {
            lo = guess;
        } else {
            hi = guess;
        }
        guess = (lo + hi) * 0.5;
    }
    component(y1, y2, guess)
}

fn component(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

fn derivative(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EASE_OUT_EXPO,
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Easing::EaseOut.apply(-3.0), 0.0);
        assert_eq!(Easing::EaseOut.apply(7.0), 1.0);
        assert_eq!(Easing::Linear.apply(f32::NAN), 0.0);
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let a = Easing::EaseInOut.apply(0.3);
        let b = Easing::EaseInOut.apply(0.7);
        assert!((a + b - 1.0).abs() < 1e-3);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn expo_out_front_loads_progress() {
        assert!(Easing::EASE_OUT_EXPO.apply(0.25) > 0.6);
        assert!(Easing::EaseIn.apply(0.25) < 0.25);
    }

    #[test]
    fn css_names() {
        assert_eq!(Easing::EaseInOut.to_css(), "ease-in-out");
        assert_eq!(
            Easing::EASE_OUT_EXPO.to_css(),
            "cubic-bezier(0.22, 1, 0.36, 1)"
        );
    }

    proptest! {
        #[test]
        fn keyword_curves_are_monotonic(a in 0.0f32..1.0, b in 0.0f32..1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let curves = [
                Easing::EaseIn,
                Easing::EaseOut,
                Easing::EaseInOut,
                Easing::EASE_OUT_EXPO,
            ];
            for easing in curves {
                prop_assert!(easing.apply(lo) <= easing.apply(hi) + 1e-4);
            }
        }
    }
}

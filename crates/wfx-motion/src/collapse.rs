#![forbid(unsafe_code)]

//! Reduced-motion collapse.
//!
//! [`collapse`] is the single place motion is turned off. It is a pure
//! function over variant data, so no call site needs its own
//! reduced-motion branch.
//!
//! # Invariants
//!
//! 1. Total: every timed state leaves with duration at most
//!    [`REDUCED_MOTION_DURATION`] (or a shorter configured ceiling), zero
//!    delay, linear easing, no repeat.
//! 2. Every keyframe sequence becomes its resting value; loops render
//!    still rather than looping fast.
//! 3. Stagger constants become zero.
//! 4. Static property targets are untouched, so the final visual state is
//!    the same as with motion.
//! 5. Idempotent.

use crate::easing::Easing;
use crate::transition::{PropValue, Repeat, Stagger, Timing, TransitionVariant};

/// Duration every collapsed transition runs for, in seconds.
pub const REDUCED_MOTION_DURATION: f32 = 0.01;

/// The instantaneous form of `timing`.
#[must_use]
pub fn collapse_timing(timing: &Timing) -> Timing {
    collapse_timing_to(timing, REDUCED_MOTION_DURATION)
}

/// [`collapse_timing`] with a caller-chosen ceiling. `seconds` is clamped
/// to `[0, REDUCED_MOTION_DURATION]`; NaN falls back to the default.
#[must_use]
pub fn collapse_timing_to(timing: &Timing, seconds: f32) -> Timing {
    Timing {
        duration: timing.duration.min(collapsed_ceiling(seconds)),
        delay: 0.0,
        easing: Easing::Linear,
        repeat: Repeat::Once,
        stagger: timing.stagger.map(|_| Stagger::new(0.0, 0.0)),
    }
}

/// The reduced-motion form of `variant`.
#[must_use]
pub fn collapse(variant: &TransitionVariant) -> TransitionVariant {
    collapse_to(variant, REDUCED_MOTION_DURATION)
}

/// [`collapse`] with a caller-chosen duration ceiling (see
/// [`collapse_timing_to`]).
#[must_use]
pub fn collapse_to(variant: &TransitionVariant, seconds: f32) -> TransitionVariant {
    let mut out = variant.clone();
    for state in out.states_mut() {
        state.props.for_each_mut(|value| {
            if value.is_keyframes() {
                *value = PropValue::Static(value.resting());
            }
        });
        if let Some(timing) = state.timing.as_mut() {
            *timing = collapse_timing_to(timing, seconds);
        }
    }
    out
}

pub(crate) fn collapsed_ceiling(seconds: f32) -> f32 {
    if seconds.is_nan() {
        REDUCED_MOTION_DURATION
    } else {
        seconds.clamp(0.0, REDUCED_MOTION_DURATION)
    }
}

/// Whether `variant` satisfies every collapse invariant.
#[must_use]
pub fn is_collapsed(variant: &TransitionVariant) -> bool {
    variant.states().all(|state| {
        let timing_ok = state.timing.as_ref().is_none_or(|t| {
            t.duration <= REDUCED_MOTION_DURATION
                && t.delay == 0.0
                && t.easing == Easing::Linear
                && t.repeat == Repeat::Once
                && t
                    .stagger
                    .is_none_or(|s| s.stagger_children == 0.0 && s.delay_children == 0.0)
        });
        timing_ok && !state.props.has_keyframes()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::{VariantState, VisualProps};

    fn shake() -> TransitionVariant {
        TransitionVariant::new(
            VariantState::new(VisualProps::new().x(0.0)),
            VariantState::new(VisualProps::new().x(PropValue::keyframes(&[
                0.0, -5.0, 5.0, -5.0, 5.0, 0.0,
            ])))
            .with_timing(Timing::new(0.5).looping(3.0)),
        )
    }

    #[test]
    fn loops_render_still() {
        let collapsed = collapse(&shake());
        assert_eq!(collapsed.animate.props.x, Some(PropValue::Static(0.0)));
        let timing = collapsed.animate.timing.unwrap();
        assert_eq!(timing.repeat, Repeat::Once);
        assert_eq!(timing.duration, REDUCED_MOTION_DURATION);
        assert!(is_collapsed(&collapsed));
        assert!(!is_collapsed(&shake()));
    }

    #[test]
    fn static_targets_survive() {
        let v = TransitionVariant::new(
            VariantState::new(VisualProps::new().opacity(0.0).y(60.0)),
            VariantState::new(VisualProps::new().opacity(1.0).y(0.0)).with_timing(
                Timing::new(0.6).delay(0.3).easing(Easing::EASE_OUT_EXPO),
            ),
        );
        let collapsed = collapse(&v);
        assert_eq!(collapsed.initial.props, v.initial.props);
        assert_eq!(collapsed.animate.props, v.animate.props);
        let timing = collapsed.animate.timing.unwrap();
        assert_eq!(timing.delay, 0.0);
        assert_eq!(timing.easing, Easing::Linear);
    }

    #[test]
    fn stagger_zeroed() {
        let v = TransitionVariant::new(
            VariantState::new(VisualProps::new().opacity(0.0)),
            VariantState::new(VisualProps::new().opacity(1.0))
                .with_timing(Timing::new(0.5).stagger(Stagger::new(0.1, 0.2))),
        );
        let stagger = collapse(&v).animate.timing.unwrap().stagger.unwrap();
        assert_eq!(stagger, Stagger::new(0.0, 0.0));
    }

    #[test]
    fn zero_duration_is_not_lengthened() {
        let t = collapse_timing(&Timing::new(0.0));
        assert_eq!(t.duration, 0.0);
    }

    #[test]
    fn shorter_ceiling_is_honored_and_long_one_capped() {
        let fast = collapse_to(&shake(), 0.004);
        assert_eq!(fast.animate.timing.unwrap().duration, 0.004);
        assert!(is_collapsed(&fast));

        let capped = collapse_to(&shake(), 2.0);
        assert_eq!(capped.animate.timing.unwrap().duration, REDUCED_MOTION_DURATION);
        let fallback = collapse_timing_to(&Timing::new(0.5), f32::NAN);
        assert_eq!(fallback.duration, REDUCED_MOTION_DURATION);
    }

    #[test]
    fn idempotent() {
        let once = collapse(&shake());
        assert_eq!(collapse(&once), once);
    }
}

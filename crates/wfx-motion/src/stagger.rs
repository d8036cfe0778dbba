#![forbid(unsafe_code)]

//! Stagger schedules for container variants.
//!
//! Child `i` of a container starts `delay_children + i * stagger_children`
//! seconds after the container's own enter transition. Variants without a
//! stagger schedule start every child at once.

use crate::transition::TransitionVariant;

/// Start delay, in seconds, of each of `count` children.
#[must_use]
pub fn child_delays(variant: &TransitionVariant, count: usize) -> Vec<f32> {
    match variant.animate.timing.and_then(|t| t.stagger) {
        Some(stagger) => (0..count).map(|i| stagger.child_delay(i)).collect(),
        None => vec![0.0; count],
    }
}

/// Seconds until the last of `count` children starts.
#[must_use]
pub fn total_stagger(variant: &TransitionVariant, count: usize) -> f32 {
    child_delays(variant, count).last().copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MotionCatalog, VariantName, stagger_container};

    #[test]
    fn delays_follow_schedule() {
        let delays = child_delays(&stagger_container(0.1, 0.2), 4);
        let expected = [0.2, 0.3, 0.4, 0.5];
        for (got, want) in delays.iter().zip(expected) {
            assert!((got - want).abs() < 1e-6, "{got} vs {want}");
        }
    }

    #[test]
    fn collapsed_container_starts_all_children_together() {
        let reduced = MotionCatalog::new().resolve(VariantName::StaggerContainer, true);
        assert_eq!(child_delays(&reduced, 5), vec![0.0; 5]);
        assert_eq!(total_stagger(&reduced, 5), 0.0);
    }

    #[test]
    fn non_container_has_no_stagger() {
        let fade = MotionCatalog::new().variant(VariantName::FadeIn);
        assert_eq!(child_delays(&fade, 3), vec![0.0; 3]);
    }

    #[test]
    fn zero_children() {
        assert!(child_delays(&stagger_container(0.1, 0.2), 0).is_empty());
        assert_eq!(total_stagger(&stagger_container(0.1, 0.2), 0), 0.0);
    }
}

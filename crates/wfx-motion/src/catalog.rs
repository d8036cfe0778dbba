#![forbid(unsafe_code)]

//! Named transition variants.
//!
//! | Variant | Initial | Animate | Timing |
//! |---------|---------|---------|--------|
//! | `fadeUp` | opacity 0, y 60 | opacity 1, y 0 | 0.6 s, expo out |
//! | `fadeIn` | opacity 0 | opacity 1 | 0.6 s, expo out |
//! | `fadeLeft` | opacity 0, x −60 | opacity 1, x 0 | 0.6 s, expo out |
//! | `fadeRight` | opacity 0, x 60 | opacity 1, x 0 | 0.6 s, expo out |
//! | `scaleIn` | opacity 0, scale 0.8 | opacity 1, scale 1 | 0.5 s, expo out |
//! | `slideInLeft` | opacity 0, x −100 | opacity 1, x 0 | 0.8 s, expo out |
//! | `slideInRight` | opacity 0, x 100 | opacity 1, x 0 | 0.8 s, expo out |
//! | `staggerContainer` | opacity 0 | opacity 1 | stagger 0.1 s, delay 0.2 s |
//! | `float` | y 0 | y 0 → −10 → 0 | 3 s ease-in-out, loop |
//! | `pulse` | scale 1 | scale 1 → 1.05 → 1 | 2 s ease-in-out, loop |
//! | `shake` | x 0 | x 0 → −5 → 5 → −5 → 5 → 0 | 0.5 s, loop every 3 s |
//!
//! Fades carry an `Exit` state equal to `Initial`. `scaleIn` carries a
//! `Hover` state (scale 1.05, 0.2 s).

use std::fmt;
use std::str::FromStr;

use wfx_runtime::config::{MotionPolicy, RevealPolicy};

use crate::collapse::{REDUCED_MOTION_DURATION, collapse_to, collapsed_ceiling};
use crate::easing::Easing;
use crate::transition::{PropValue, Stagger, Timing, TransitionVariant, VariantState, VisualProps};

/// Identifier of a built-in variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantName {
    FadeUp,
    FadeIn,
    FadeLeft,
    FadeRight,
    ScaleIn,
    SlideInLeft,
    SlideInRight,
    StaggerContainer,
    Float,
    Pulse,
    Shake,
}

impl VariantName {
    /// Every built-in variant.
    pub const ALL: [Self; 11] = [
        Self::FadeUp,
        Self::FadeIn,
        Self::FadeLeft,
        Self::FadeRight,
        Self::ScaleIn,
        Self::SlideInLeft,
        Self::SlideInRight,
        Self::StaggerContainer,
        Self::Float,
        Self::Pulse,
        Self::Shake,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FadeUp => "fadeUp",
            Self::FadeIn => "fadeIn",
            Self::FadeLeft => "fadeLeft",
            Self::FadeRight => "fadeRight",
            Self::ScaleIn => "scaleIn",
            Self::SlideInLeft => "slideInLeft",
            Self::SlideInRight => "slideInRight",
            Self::StaggerContainer => "staggerContainer",
            Self::Float => "float",
            Self::Pulse => "pulse",
            Self::Shake => "shake",
        }
    }

    /// Decorative variants that loop forever.
    #[must_use]
    pub const fn is_continuous(self) -> bool {
        matches!(self, Self::Float | Self::Pulse | Self::Shake)
    }
}

impl fmt::Display for VariantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unknown variant name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown motion variant '{}'", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for VariantName {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// The variant table, with a configurable stagger container and
/// reduced-motion duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionCatalog {
    stagger: Stagger,
    collapse_duration: f32,
}

impl Default for MotionCatalog {
    fn default() -> Self {
        Self {
            stagger: Stagger::new(0.1, 0.2),
            collapse_duration: REDUCED_MOTION_DURATION,
        }
    }
}

impl MotionCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog using the policy's stagger constants.
    #[must_use]
    pub fn from_policy(policy: &RevealPolicy) -> Self {
        Self::new().with_stagger(policy.stagger_children, policy.delay_children)
    }

    /// Catalog using the policy's stagger constants and collapse duration.
    #[must_use]
    pub fn from_motion_policy(policy: &MotionPolicy) -> Self {
        Self::from_policy(&policy.reveal).with_collapse_duration(policy.reduced_motion_duration)
    }

    /// Duration (seconds) reduced-motion transitions run for. Clamped to
    /// `[0, REDUCED_MOTION_DURATION]`.
    #[must_use]
    pub fn with_collapse_duration(mut self, seconds: f32) -> Self {
        self.collapse_duration = collapsed_ceiling(seconds);
        self
    }

    #[must_use]
    pub fn collapse_duration(&self) -> f32 {
        self.collapse_duration
    }

    /// Configure the `staggerContainer` constants (seconds, negatives → 0).
    #[must_use]
    pub fn with_stagger(mut self, stagger_children: f32, delay_children: f32) -> Self {
        self.stagger = Stagger::new(stagger_children.max(0.0), delay_children.max(0.0));
        self
    }

    #[must_use]
    pub fn stagger(&self) -> Stagger {
        self.stagger
    }

    /// Full-motion variant.
    #[must_use]
    pub fn variant(&self, name: VariantName) -> TransitionVariant {
        let expo = |duration: f32| Timing::new(duration).easing(Easing::EASE_OUT_EXPO);
        match name {
            VariantName::FadeUp => fade(
                VisualProps::new().y(60.0),
                VisualProps::new().y(0.0),
                expo(0.6),
            ),
            VariantName::FadeIn => fade(VisualProps::new(), VisualProps::new(), expo(0.6)),
            VariantName::FadeLeft => fade(
                VisualProps::new().x(-60.0),
                VisualProps::new().x(0.0),
                expo(0.6),
            ),
            VariantName::FadeRight => fade(
                VisualProps::new().x(60.0),
                VisualProps::new().x(0.0),
                expo(0.6),
            ),
            VariantName::ScaleIn => TransitionVariant::new(
                VariantState::new(VisualProps::new().opacity(0.0).scale(0.8)),
                VariantState::new(VisualProps::new().opacity(1.0).scale(1.0))
                    .with_timing(expo(0.5)),
            )
            .with_hover(
                VariantState::new(VisualProps::new().scale(1.05)).with_timing(Timing::new(0.2)),
            ),
            VariantName::SlideInLeft => TransitionVariant::new(
                VariantState::new(VisualProps::new().opacity(0.0).x(-100.0)),
                VariantState::new(VisualProps::new().opacity(1.0).x(0.0)).with_timing(expo(0.8)),
            ),
            VariantName::SlideInRight => TransitionVariant::new(
                VariantState::new(VisualProps::new().opacity(0.0).x(100.0)),
                VariantState::new(VisualProps::new().opacity(1.0).x(0.0)).with_timing(expo(0.8)),
            ),
            VariantName::StaggerContainer => {
                stagger_container(self.stagger.stagger_children, self.stagger.delay_children)
            }
            VariantName::Float => looping(
                VisualProps::new().y(0.0),
                VisualProps::new().y(PropValue::keyframes(&[0.0, -10.0, 0.0])),
                Timing::new(3.0).easing(Easing::EaseInOut).looping(0.0),
            ),
            VariantName::Pulse => looping(
                VisualProps::new().scale(1.0),
                VisualProps::new().scale(PropValue::keyframes(&[1.0, 1.05, 1.0])),
                Timing::new(2.0).easing(Easing::EaseInOut).looping(0.0),
            ),
            VariantName::Shake => looping(
                VisualProps::new().x(0.0),
                VisualProps::new().x(PropValue::keyframes(&[0.0, -5.0, 5.0, -5.0, 5.0, 0.0])),
                Timing::new(0.5).looping(3.0),
            ),
        }
    }

    /// The variant to render given the current motion preference.
    #[must_use]
    pub fn resolve(&self, name: VariantName, reduced: bool) -> TransitionVariant {
        let variant = self.variant(name);
        if reduced {
            collapse_to(&variant, self.collapse_duration)
        } else {
            variant
        }
    }
}

fn fade(initial: VisualProps, animate: VisualProps, timing: Timing) -> TransitionVariant {
    let hidden = VariantState::new(initial.opacity(0.0));
    TransitionVariant::new(
        hidden.clone(),
        VariantState::new(animate.opacity(1.0)).with_timing(timing),
    )
    .with_exit(hidden)
}

fn looping(rest: VisualProps, keyframes: VisualProps, timing: Timing) -> TransitionVariant {
    TransitionVariant::new(
        VariantState::new(rest),
        VariantState::new(keyframes).with_timing(timing),
    )
}

/// An ad-hoc stagger container: children start `delay_children` seconds
/// after the container, each `stagger_children` seconds after the last.
#[must_use]
pub fn stagger_container(stagger_children: f32, delay_children: f32) -> TransitionVariant {
    TransitionVariant::new(
        VariantState::new(VisualProps::new().opacity(0.0)),
        VariantState::new(VisualProps::new().opacity(1.0)).with_timing(
            Timing::new(0.5).stagger(Stagger::new(stagger_children, delay_children)),
        ),
    )
}

#![forbid(unsafe_code)]

//! Interaction engines for Wayfarer FX.
//!
//! # Role in Wayfarer FX
//! The site has a background rotator, tour image carousels, pin carousels,
//! a gallery lightbox, a video lightbox, and quick-view modals. All of them
//! are two engines here, parameterized by configuration:
//!
//! - [`carousel::CarouselEngine`]: index-based, auto-advancing, drag and
//!   keyboard navigable sequences, plus [`carousel::CarouselFocus`] which
//!   decides which carousel receives arrow keys.
//! - [`lightbox::LightboxEngine`]: modal media viewer with a focus trap,
//!   zoom/pan, and neighbor preloading.
//!
//! Both engines are headless. They consume the reduced-motion preference
//! for timing only and never depend on visibility.

use web_time::Duration;
use wfx_motion::REDUCED_MOTION_DURATION;

pub mod carousel;
pub mod lightbox;

pub use carousel::{
    CarouselConfig, CarouselControls, CarouselEngine, CarouselFocus, CarouselPhase,
};
pub use lightbox::{
    FocusTrap, LightboxConfig, LightboxEngine, LightboxHost, LightboxState, MediaKind, MediaRef,
    NoopHost, Preloader,
};

/// Edge behavior of an index-based sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Indexing wraps modulo the length.
    #[default]
    Wrap,
    /// Indexing stops at the first and last item.
    Clamp,
}

impl WrapMode {
    /// Map a signed position onto `0..len`. `len == 0` yields 0.
    #[must_use]
    pub fn resolve(self, position: isize, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let len = len as isize;
        let idx = match self {
            Self::Wrap => position.rem_euclid(len),
            Self::Clamp => position.clamp(0, len - 1),
        };
        idx as usize
    }
}

/// The collapsed transition length as a `Duration`, rounded to whole
/// microseconds.
#[must_use]
pub fn reduced_motion_duration() -> Duration {
    collapsed_duration(REDUCED_MOTION_DURATION)
}

/// A policy's collapse duration (seconds) as a `Duration`. Clamped to
/// `[0, REDUCED_MOTION_DURATION]`; NaN gives the default.
#[must_use]
pub fn collapsed_duration(seconds: f32) -> Duration {
    let seconds = if seconds.is_nan() {
        REDUCED_MOTION_DURATION
    } else {
        seconds.clamp(0.0, REDUCED_MOTION_DURATION)
    };
    Duration::from_micros((seconds * 1_000_000.0).round() as u64)
}

/// Duration of a UI transition under the current motion preference.
/// `collapsed` is the ceiling under reduced motion.
#[must_use]
pub fn motion_duration(full: Duration, reduced: bool, collapsed: Duration) -> Duration {
    if reduced { full.min(collapsed) } else { full }
}

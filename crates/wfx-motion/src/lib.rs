#![forbid(unsafe_code)]

//! Motion for Wayfarer FX.
//!
//! # Role in Wayfarer FX
//! `wfx-motion` turns the two runtime signals (visibility and the
//! reduced-motion preference) into what a page section renders: the named
//! transition variants, the pure reduced-motion collapse over them,
//! stagger schedules, and the [`Reveal`] wrapper that composes all of it.
//!
//! # Example
//!
//! ```
//! use wfx_core::ElementId;
//! use wfx_motion::{MotionCatalog, Reveal, RevealOptions, VariantName};
//! use wfx_runtime::{IntersectionEntry, MemoryStorage, ReducedMotionSignal, VisibilityObserver};
//!
//! let observer = VisibilityObserver::default();
//! let motion = ReducedMotionSignal::init(Some(false), MemoryStorage::new());
//! let element = ElementId::new();
//! let reveal = Reveal::mount(
//!     &observer,
//!     &motion,
//!     &MotionCatalog::new(),
//!     element,
//!     RevealOptions::new().variant(VariantName::FadeLeft),
//! );
//! assert!(!reveal.frame().is_revealed());
//!
//! observer.dispatch(element, IntersectionEntry::visible());
//! assert!(reveal.frame().is_revealed());
//! ```

pub mod catalog;
pub mod collapse;
pub mod easing;
pub mod reveal;
pub mod stagger;
pub mod transition;

pub use catalog::{MotionCatalog, UnknownVariant, VariantName, stagger_container};
pub use collapse::{
    REDUCED_MOTION_DURATION, collapse, collapse_timing, collapse_timing_to, collapse_to,
    is_collapsed,
};
pub use easing::Easing;
pub use reveal::{ChildFrame, Reveal, RevealFrame, RevealOptions};
pub use stagger::{child_delays, total_stagger};
pub use transition::{
    PropValue, Repeat, ResolvedProps, Stagger, StateName, Timing, TransitionVariant, VariantState,
    VisualProps,
};

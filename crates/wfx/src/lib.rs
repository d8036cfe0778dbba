#![forbid(unsafe_code)]

//! Wayfarer FX: headless motion, visibility, and interaction engines for a
//! tour operator's marketing site.
//!
//! This crate re-exports the workspace crates under short names and
//! collects the types a page section needs in [`prelude`].
//!
//! | Module | Crate |
//! |--------|-------|
//! | [`core`] | `wfx-core` |
//! | [`runtime`] | `wfx-runtime` |
//! | [`motion`] | `wfx-motion` |
//! | [`widgets`] | `wfx-widgets` |
//! | [`forms`] | `wfx-forms` (feature `forms`) |
//!
//! # Example
//!
//! ```
//! use wfx::prelude::*;
//!
//! let t0 = Instant::now();
//! let mut hero = CarouselEngine::new(vec!["dawn", "dusk"], CarouselConfig::hero(), t0);
//! hero.tick(t0 + hero.config().interval);
//! assert_eq!(hero.current(), Some(&"dusk"));
//! ```

pub use wfx_core as core;
#[cfg(feature = "forms")]
pub use wfx_forms as forms;
pub use wfx_motion as motion;
pub use wfx_runtime as runtime;
pub use wfx_widgets as widgets;

/// Common imports for hosts.
pub mod prelude {
    pub use wfx_core::{
        ElementId, KeyCode, KeyEvent, Layout, Modifiers, PlatformCapabilities, Point, Rect,
        RootMargin,
    };
    #[cfg(feature = "forms")]
    pub use wfx_forms::{FormClient, FormKind, FormPayload, FormState, SubmitError, Transport};
    pub use wfx_motion::{
        MotionCatalog, REDUCED_MOTION_DURATION, Reveal, RevealFrame, RevealOptions, StateName,
        TransitionVariant, VariantName,
    };
    pub use wfx_runtime::{
        ClientStorage, Duration, Instant, IntersectionEntry, MemoryStorage, MotionPolicy,
        ReducedMotionSignal, VisibilityObserver, VisibilityOptions,
    };
    pub use wfx_widgets::{
        CarouselConfig, CarouselEngine, CarouselFocus, LightboxConfig, LightboxEngine,
        LightboxHost, LightboxState, MediaRef, WrapMode,
    };
}

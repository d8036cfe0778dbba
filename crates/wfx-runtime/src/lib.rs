#![forbid(unsafe_code)]

//! Runtime signals for Wayfarer FX.
//!
//! # Role in Wayfarer FX
//! `wfx-runtime` holds the two independent leaf signals every animated
//! section depends on: the page-wide reduced-motion preference and
//! per-element viewport visibility. It also provides the reactive
//! primitives they are built from, client storage, the deterministic
//! interval timer used by auto-advancing widgets, and the motion policy.
//!
//! # How it fits in the system
//! `wfx-motion` composes visibility and motion preference into reveals.
//! `wfx-widgets` consumes the motion preference (for timing only) and the
//! interval timer. Nothing here renders; the host feeds platform events in
//! and reads state out.
//!
//! All state is single-threaded (`Rc<RefCell<..>>`): the whole runtime
//! lives on the UI event loop.

pub mod config;
pub mod motion;
pub mod reactive;
pub mod storage;
pub mod timer;
pub mod visibility;

pub use config::{CarouselPolicy, ConfigError, LightboxPolicy, MotionPolicy, RevealPolicy};
pub use motion::{ReducedMotionSignal, prefers_reduced_motion, set_reduced_motion_override};
pub use reactive::{Binding, BindingScope, Observable, Subscription};
#[cfg(feature = "state-persistence")]
pub use storage::FileStorage;
pub use storage::{ClientStorage, MemoryStorage, StorageError, UnavailableStorage};
pub use timer::IntervalTimer;
pub use visibility::{IntersectionEntry, VisibilityHandle, VisibilityObserver, VisibilityOptions};

pub use web_time::{Duration, Instant};

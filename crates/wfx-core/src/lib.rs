#![forbid(unsafe_code)]

//! Core primitives for Wayfarer FX.
//!
//! Everything in this crate is platform-neutral plain data: the host (web
//! glue, native shell, test harness) translates its own input and layout
//! information into these types before handing them to the runtime and
//! widget crates.

pub mod capabilities;
pub mod element;
pub mod event;
pub mod geometry;

pub use capabilities::PlatformCapabilities;
pub use element::{ElementId, Layout};
pub use event::{
    Event, HitRegion, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerEvent, PointerEventKind,
};
pub use geometry::{Length, Point, Rect, RootMargin, RootMarginError};

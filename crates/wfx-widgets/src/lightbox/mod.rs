#![forbid(unsafe_code)]

//! Modal media viewers: gallery images, video, and tour quick-view are
//! all [`LightboxEngine`] with different [`LightboxConfig`]s.

mod engine;
mod focus_trap;
mod media;
mod preload;

pub use engine::{LightboxConfig, LightboxEngine, LightboxHost, LightboxState, NoopHost};
pub use focus_trap::FocusTrap;
pub use media::{MediaKind, MediaRef};
pub use preload::{Preloader, neighbors};

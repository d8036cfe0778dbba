#![forbid(unsafe_code)]

//! Index-based carousels: the hero rotator, tour image strips, and pin
//! carousels are all [`CarouselEngine`] with different [`CarouselConfig`]s.

mod engine;
mod focus;

pub use engine::{CarouselConfig, CarouselControls, CarouselEngine, CarouselPhase};
pub use focus::CarouselFocus;

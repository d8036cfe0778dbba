#![no_main]

use libfuzzer_sys::fuzz_target;
use wfx_core::{Rect, RootMargin};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(margin) = RootMargin::parse(input) else {
        return;
    };
    let root = margin.apply(Rect::new(0.0, 0.0, 1280.0, 800.0));
    assert!(!root.x.is_nan() && !root.y.is_nan());
    assert_eq!(input.parse::<RootMargin>().ok(), Some(margin));
});

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use web_time::{Duration, Instant};
use wfx_core::{KeyCode, KeyEvent};
use wfx_widgets::{CarouselConfig, CarouselEngine, WrapMode};

#[derive(Debug, Arbitrary)]
enum Op {
    Advance(u16),
    Next,
    Prev,
    GoTo(u8),
    DragStart,
    DragMove(f32),
    DragEnd { offset: f32, velocity: f32 },
    HoverEnter,
    HoverLeave,
    Key(u8),
    SetItems(u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    len: u8,
    clamp: bool,
    item_step: f32,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let wrap = if input.clamp { WrapMode::Clamp } else { WrapMode::Wrap };
    let config = CarouselConfig::tour_images()
        .wrap(wrap)
        .item_step(input.item_step);
    let mut now = Instant::now();
    let mut carousel = CarouselEngine::new(vec![(); usize::from(input.len % 16)], config, now);

    for op in input.ops.into_iter().take(256) {
        match op {
            Op::Advance(ms) => {
                now += Duration::from_millis(u64::from(ms));
                carousel.tick(now);
            }
            Op::Next => {
                carousel.next(now);
            }
            Op::Prev => {
                carousel.prev(now);
            }
            Op::GoTo(i) => {
                carousel.go_to(usize::from(i), now);
            }
            Op::DragStart => {
                carousel.drag_start();
            }
            Op::DragMove(offset) => carousel.drag_move(offset),
            Op::DragEnd { offset, velocity } => {
                carousel.drag_end(offset, velocity, now);
            }
            Op::HoverEnter => carousel.hover_enter(),
            Op::HoverLeave => carousel.hover_leave(now),
            Op::Key(k) => {
                let code = match k % 4 {
                    0 => KeyCode::Left,
                    1 => KeyCode::Right,
                    2 => KeyCode::Home,
                    _ => KeyCode::End,
                };
                carousel.handle_key(&KeyEvent::press(code), now);
            }
            Op::SetItems(n) => carousel.set_items(vec![(); usize::from(n % 16)], now),
        }
        match carousel.index() {
            Some(i) => assert!(i < carousel.len()),
            None => assert!(carousel.is_empty()),
        }
    }
});

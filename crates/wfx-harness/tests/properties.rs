#![forbid(unsafe_code)]

//! Property tests for the workspace-level invariants.
//!
//! # Invariants
//!
//! 1. **Collapse is total**: every catalog variant resolved under reduced
//!    motion has no timing longer than the collapsed duration and no loop.
//! 2. **Trigger-once monotonicity**: once visible, always visible.
//! 3. **Carousel range**: the index stays in `0..N` under any operation
//!    sequence.
//! 4. **Drag pauses auto-advance**: a drag started before a tick swallows
//!    it, and ticking resumes a full interval after release.
//! 5. **Focus containment**: while a lightbox is open, focus never leaves
//!    its controls under any Tab/Shift+Tab sequence.
//! 6. **Empty lightbox**: opening an empty list never leaves `Closed`.
//!
//! Run: `cargo test -p wfx-harness --test properties`

use proptest::prelude::*;

use wfx_core::{ElementId, KeyCode, KeyEvent, Modifiers};
use wfx_harness::{RecordingHost, gallery};
use wfx_motion::{MotionCatalog, REDUCED_MOTION_DURATION, Repeat, VariantName, is_collapsed};
use wfx_runtime::{Duration, Instant, IntersectionEntry, VisibilityObserver, VisibilityOptions};
use wfx_widgets::{
    CarouselConfig, CarouselEngine, LightboxConfig, LightboxEngine, LightboxState, WrapMode,
};

fn variant_name() -> impl Strategy<Value = VariantName> {
    prop::sample::select(VariantName::ALL.to_vec())
}

// =============================================================================
// Motion
// =============================================================================

proptest! {
    #[test]
    fn collapse_is_total(
        name in variant_name(),
        stagger in 0.0f32..2.0,
        delay in 0.0f32..2.0,
    ) {
        let catalog = MotionCatalog::new().with_stagger(stagger, delay);
        let reduced = catalog.resolve(name, true);
        prop_assert!(is_collapsed(&reduced), "{name} not collapsed");
        for state in reduced.states() {
            if let Some(timing) = state.timing {
                prop_assert!(timing.duration <= REDUCED_MOTION_DURATION);
                prop_assert_eq!(timing.repeat, Repeat::Once);
            }
        }
    }
}

// =============================================================================
// Visibility
// =============================================================================

fn entry() -> impl Strategy<Value = IntersectionEntry> {
    (any::<bool>(), 0.0f32..=1.0).prop_map(|(hit, ratio)| IntersectionEntry::new(hit, ratio))
}

proptest! {
    #[test]
    fn trigger_once_is_monotonic(
        threshold in 0.0f32..=1.0,
        entries in prop::collection::vec(entry(), 1..40),
    ) {
        let observer = VisibilityObserver::default();
        let element = ElementId::new();
        let handle = observer.observe(
            element,
            VisibilityOptions::new().threshold(threshold).trigger_once(true),
        );
        let mut seen = false;
        for e in entries {
            observer.dispatch(element, e);
            if seen {
                prop_assert!(handle.is_visible());
                prop_assert!(!handle.is_watching());
            }
            seen |= handle.is_visible();
        }
    }

    #[test]
    fn continuous_mode_tracks_last_entry(
        entries in prop::collection::vec(entry(), 1..40),
    ) {
        let observer = VisibilityObserver::default();
        let element = ElementId::new();
        let handle = observer.observe(
            element,
            VisibilityOptions::new().threshold(0.5).trigger_once(false),
        );
        for e in entries {
            observer.dispatch(element, e);
            prop_assert_eq!(handle.is_visible(), e.is_intersecting && e.ratio >= 0.5);
        }
    }
}

// =============================================================================
// Carousel
// =============================================================================

#[derive(Debug, Clone)]
enum CarouselOp {
    Advance(u64),
    Next,
    Prev,
    GoTo(usize),
    Snap { offset: f32, velocity: f32 },
}

fn carousel_op() -> impl Strategy<Value = CarouselOp> {
    prop_oneof![
        (1u64..9_000).prop_map(CarouselOp::Advance),
        Just(CarouselOp::Next),
        Just(CarouselOp::Prev),
        (0usize..100).prop_map(CarouselOp::GoTo),
        (-2_000.0f32..2_000.0, -4.0f32..4.0)
            .prop_map(|(offset, velocity)| CarouselOp::Snap { offset, velocity }),
    ]
}

proptest! {
    #[test]
    fn carousel_index_always_in_range(
        len in 1usize..10,
        clamp in any::<bool>(),
        ops in prop::collection::vec(carousel_op(), 0..80),
    ) {
        let t0 = Instant::now();
        let wrap = if clamp { WrapMode::Clamp } else { WrapMode::Wrap };
        let config = CarouselConfig::tour_images().wrap(wrap).item_step(300.0);
        let mut carousel = CarouselEngine::new((0..len).collect::<Vec<_>>(), config, t0);
        let mut now = t0;
        for op in ops {
            match op {
                CarouselOp::Advance(ms) => {
                    now += Duration::from_millis(ms);
                    carousel.tick(now);
                }
                CarouselOp::Next => { carousel.next(now); }
                CarouselOp::Prev => { carousel.prev(now); }
                CarouselOp::GoTo(i) => { carousel.go_to(i, now); }
                CarouselOp::Snap { offset, velocity } => {
                    carousel.drag_start();
                    carousel.drag_end(offset, velocity, now);
                }
            }
            prop_assert!(carousel.index().is_some_and(|i| i < len));
        }
    }

    #[test]
    fn drag_before_tick_swallows_it(
        len in 2usize..8,
        interval_ms in 500u64..10_000,
        start_frac in 0.0f64..1.0,
        hold_ms in 0u64..20_000,
    ) {
        let t0 = Instant::now();
        let interval = Duration::from_millis(interval_ms);
        let config = CarouselConfig::tour_images().interval(interval);
        let mut carousel = CarouselEngine::new((0..len).collect::<Vec<_>>(), config, t0);

        let drag_at = t0 + interval.mul_f64(start_frac);
        carousel.drag_start();
        let release = drag_at + Duration::from_millis(hold_ms);
        prop_assert!(!carousel.tick(t0 + interval));
        prop_assert!(!carousel.tick(release));
        carousel.drag_end(0.0, 0.0, release);
        prop_assert_eq!(carousel.index(), Some(0));

        prop_assert!(!carousel.tick(release + interval - Duration::from_millis(1)));
        prop_assert!(carousel.tick(release + interval));
        prop_assert_eq!(carousel.index(), Some(1));
    }
}

// =============================================================================
// Lightbox
// =============================================================================

proptest! {
    #[test]
    fn focus_never_leaves_lightbox(
        controls in 1usize..6,
        start in 0usize..6,
        keys in prop::collection::vec(any::<bool>(), 0..60),
    ) {
        let ids: Vec<ElementId> = (0..controls).map(|_| ElementId::new()).collect();
        let media: Vec<_> = gallery().into_iter().take(6).collect();
        let mut lightbox = LightboxEngine::new(
            media,
            ids.iter().copied(),
            LightboxConfig::image(),
            RecordingHost::new(),
        );
        prop_assert!(lightbox.open_at(start));
        for reverse in keys {
            let key = if reverse {
                KeyEvent::press(KeyCode::Tab).with_modifiers(Modifiers::SHIFT)
            } else {
                KeyEvent::press(KeyCode::Tab)
            };
            prop_assert!(lightbox.handle_key(&key));
            let focused = lightbox.focused();
            prop_assert!(focused.is_some_and(|id| ids.contains(&id)));
            prop_assert_eq!(lightbox.host().focused, focused);
        }
    }

    #[test]
    fn tab_from_last_wraps_to_first(controls in 1usize..8) {
        let ids: Vec<ElementId> = (0..controls).map(|_| ElementId::new()).collect();
        let mut lightbox = LightboxEngine::new(
            gallery(),
            ids.iter().copied(),
            LightboxConfig::image(),
            RecordingHost::new(),
        );
        lightbox.open_at(0);
        for _ in 1..controls {
            lightbox.handle_key(&KeyEvent::press(KeyCode::Tab));
        }
        prop_assert_eq!(lightbox.focused(), ids.last().copied());
        lightbox.handle_key(&KeyEvent::press(KeyCode::Tab));
        prop_assert_eq!(lightbox.focused(), ids.first().copied());
        lightbox.handle_key(&KeyEvent::press(KeyCode::BackTab));
        prop_assert_eq!(lightbox.focused(), ids.last().copied());
    }

    #[test]
    fn empty_lightbox_stays_closed(index in 0usize..10, presses in 0usize..5) {
        let mut lightbox = LightboxEngine::headless(Vec::new(), LightboxConfig::image());
        prop_assert!(!lightbox.open_at(index));
        for _ in 0..presses {
            lightbox.handle_key(&KeyEvent::press(KeyCode::Right));
        }
        prop_assert_eq!(lightbox.state(), LightboxState::Closed);
    }
}

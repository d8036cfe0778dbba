#![forbid(unsafe_code)]

//! Carousel state machine.
//!
//! ```text
//!            tick (timer)                  next / prev / go_to
//!          ┌──────────────┐              ┌──────────────┐
//!          ▼              │              ▼              │
//!        ┌──────┐ ────────┘            ┌──────┐ ────────┘
//!        │ Idle │ ── drag_start ─────▶ │ Drag │
//!        └──────┘ ◀── drag_end (snap) ─ └──────┘
//!          │  ▲
//!  hover_enter  hover_leave
//!          ▼  │
//!        ┌────────┐
//!        │ Paused │
//!        └────────┘
//! ```
//!
//! # Invariants
//!
//! 1. With `N >= 1` items the index is always in `0..N`.
//! 2. The auto-advance timer is cancelled (not ignored) on drag start and
//!    hover pause, and re-armed with a full interval on release.
//! 3. Explicit navigation re-arms the timer from `now`.
//! 4. Explicit navigation during a drag is ignored; the release decides.
//! 5. Zero items: every operation is a no-op and `current()` is `None`.
//!    One item: no navigation, no controls, no auto-advance.
//! 6. `on_active_change` fires exactly once per index change.
//!
//! # Drag snap
//!
//! On release the displacement in items is `d = -offset / item_step`. The
//! target is `index + round(d)`, rounding half away from zero, which is
//! toward the drag direction. A flick (`round(d) == 0` but
//! `|velocity| >= swipe_velocity`) moves one item against the velocity's
//! sign. The target is then wrapped or clamped by [`WrapMode`].
//!
//! Auto-advance always rotates, even with [`WrapMode::Clamp`]; clamping
//! only limits user navigation.

use tracing::{debug, trace};
use web_time::{Duration, Instant};
use wfx_core::{ElementId, KeyCode, KeyEvent};
use wfx_runtime::config::{CarouselPolicy, MotionPolicy};
use wfx_runtime::timer::IntervalTimer;

use crate::{WrapMode, collapsed_duration, motion_duration, reduced_motion_duration};

/// Carousel configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Auto-advance period. Zero disables auto-advance.
    pub interval: Duration,
    pub wrap: WrapMode,
    /// Suspend auto-advance while the pointer is over the carousel.
    pub pause_on_hover: bool,
    /// Width of one item in px, used to convert drag offsets to items.
    pub item_step: f32,
    /// Release velocity (px/ms) that turns a short drag into a flick.
    pub swipe_velocity: f32,
    /// Slide/snap animation length at full motion.
    pub snap_duration: Duration,
    /// Ceiling on the slide/snap length under reduced motion.
    pub reduced_transition: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::from_policy(&CarouselPolicy::default())
    }
}

impl CarouselConfig {
    /// Configuration from the policy's carousel section.
    #[must_use]
    pub fn from_policy(policy: &CarouselPolicy) -> Self {
        Self {
            interval: Duration::from_millis(policy.interval_ms),
            wrap: WrapMode::Wrap,
            pause_on_hover: policy.pause_on_hover,
            item_step: 320.0,
            swipe_velocity: policy.swipe_velocity,
            snap_duration: Duration::from_millis(policy.snap_duration_ms),
            reduced_transition: reduced_motion_duration(),
        }
    }

    /// Configuration from the carousel section plus the policy-wide
    /// reduced-motion duration.
    #[must_use]
    pub fn from_motion_policy(policy: &MotionPolicy) -> Self {
        Self {
            reduced_transition: collapsed_duration(policy.reduced_motion_duration),
            ..Self::from_policy(&policy.carousel)
        }
    }

    /// Full-bleed background rotator: slow, never pauses.
    #[must_use]
    pub fn hero() -> Self {
        Self {
            interval: Duration::from_secs(6),
            pause_on_hover: false,
            item_step: 1280.0,
            snap_duration: Duration::from_millis(1000),
            ..Self::default()
        }
    }

    /// Image strip on a tour card: auto-advances, pauses on hover.
    #[must_use]
    pub fn tour_images() -> Self {
        Self {
            interval: Duration::from_secs(5),
            pause_on_hover: true,
            item_step: 400.0,
            ..Self::default()
        }
    }

    /// Pin carousel: manual only, stops at both ends.
    #[must_use]
    pub fn pins() -> Self {
        Self {
            interval: Duration::ZERO,
            wrap: WrapMode::Clamp,
            item_step: 280.0,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    #[must_use]
    pub fn item_step(mut self, px: f32) -> Self {
        self.item_step = px;
        self
    }
}

/// Interaction phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CarouselPhase {
    /// Auto-advancing (when enabled).
    #[default]
    Idle,
    /// A drag gesture is in progress.
    Dragging,
    /// Hover pause.
    Paused,
}

/// Which navigation chrome to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarouselControls {
    /// Previous/next arrows.
    pub arrows: bool,
    /// Number of pagination dots (0 hides them).
    pub dots: usize,
}

type ActiveChange<T> = Box<dyn FnMut(usize, &T)>;

/// A carousel over `T`.
pub struct CarouselEngine<T> {
    id: ElementId,
    items: Vec<T>,
    index: usize,
    config: CarouselConfig,
    timer: IntervalTimer,
    phase: CarouselPhase,
    drag_offset: f32,
    hovered: bool,
    on_active_change: Option<ActiveChange<T>>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for CarouselEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselEngine")
            .field("id", &self.id)
            .field("len", &self.items.len())
            .field("index", &self.index)
            .field("phase", &self.phase)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl<T> CarouselEngine<T> {
    /// Mount a carousel at index 0 and arm auto-advance from `now`.
    pub fn new(items: Vec<T>, config: CarouselConfig, now: Instant) -> Self {
        let mut engine = Self {
            id: ElementId::new(),
            items,
            index: 0,
            config,
            timer: IntervalTimer::new(config.interval),
            phase: CarouselPhase::Idle,
            drag_offset: 0.0,
            hovered: false,
            on_active_change: None,
        };
        engine.rearm(now);
        debug!(
            carousel = engine.id.get(),
            len = engine.items.len(),
            interval_ms = config.interval.as_millis() as u64,
            "carousel mounted"
        );
        engine
    }

    /// Builder: use a host-assigned element id (for focus routing).
    #[must_use]
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    /// Register the index-change callback, replacing any previous one.
    pub fn on_active_change(&mut self, callback: impl FnMut(usize, &T) + 'static) {
        self.on_active_change = Some(Box::new(callback));
    }

    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Current index, `None` when there are no items.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.index)
    }

    /// Current item, `None` when there are no items.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    #[must_use]
    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Live drag offset in px (0 outside a drag).
    #[must_use]
    pub fn drag_offset(&self) -> f32 {
        self.drag_offset
    }

    /// Whether auto-advance is suspended.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.phase != CarouselPhase::Idle
    }

    /// Whether navigation is possible at all.
    #[must_use]
    pub fn can_navigate(&self) -> bool {
        self.items.len() > 1
    }

    /// Time until the next auto-advance, if one is scheduled.
    #[must_use]
    pub fn time_until_advance(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    #[must_use]
    pub fn controls(&self) -> CarouselControls {
        if self.can_navigate() {
            CarouselControls {
                arrows: true,
                dots: self.items.len(),
            }
        } else {
            CarouselControls::default()
        }
    }

    /// Slide/snap animation length under the given motion preference.
    #[must_use]
    pub fn transition_duration(&self, reduced: bool) -> Duration {
        motion_duration(
            self.config.snap_duration,
            reduced,
            self.config.reduced_transition,
        )
    }

    /// Update the item width after layout.
    pub fn set_item_step(&mut self, px: f32) {
        self.config.item_step = px;
    }

    /// Replace the items, keeping the index when still in range.
    pub fn set_items(&mut self, items: Vec<T>, now: Instant) {
        self.items = items;
        if self.items.is_empty() {
            self.index = 0;
        } else if self.index >= self.items.len() {
            self.set_index(self.items.len() - 1, "items_replaced");
        }
        self.rearm(now);
    }

    // ── Timer ──

    /// Drive auto-advance. Returns `true` when the index advanced.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.can_navigate() || self.phase != CarouselPhase::Idle {
            return false;
        }
        if !self.timer.poll(now) {
            return false;
        }
        trace!(carousel = self.id.get(), "auto-advance");
        let next = WrapMode::Wrap.resolve(self.index as isize + 1, self.items.len());
        self.set_index(next, "auto_advance")
    }

    // ── Explicit navigation ──

    pub fn next(&mut self, now: Instant) -> bool {
        self.step(1, now)
    }

    pub fn prev(&mut self, now: Instant) -> bool {
        self.step(-1, now)
    }

    /// Jump to `index` (wrapped or clamped into range).
    pub fn go_to(&mut self, index: usize, now: Instant) -> bool {
        if !self.accepts_navigation() {
            return false;
        }
        let target = self
            .config
            .wrap
            .resolve(isize::try_from(index).unwrap_or(isize::MAX), self.items.len());
        self.navigate(target, "go_to", now)
    }

    fn step(&mut self, delta: isize, now: Instant) -> bool {
        if !self.accepts_navigation() {
            return false;
        }
        let target = self
            .config
            .wrap
            .resolve(self.index as isize + delta, self.items.len());
        self.navigate(target, if delta > 0 { "next" } else { "prev" }, now)
    }

    fn accepts_navigation(&self) -> bool {
        self.can_navigate() && self.phase != CarouselPhase::Dragging
    }

    fn navigate(&mut self, target: usize, cause: &'static str, now: Instant) -> bool {
        let changed = self.set_index(target, cause);
        self.rearm(now);
        changed
    }

    // ── Drag ──

    /// Begin a drag gesture; auto-advance is cancelled.
    pub fn drag_start(&mut self) -> bool {
        if !self.can_navigate() || self.phase == CarouselPhase::Dragging {
            return false;
        }
        self.phase = CarouselPhase::Dragging;
        self.drag_offset = 0.0;
        self.timer.cancel();
        debug!(carousel = self.id.get(), "drag started");
        true
    }

    /// Track the live offset (px, negative = dragged left).
    pub fn drag_move(&mut self, offset: f32) {
        if self.phase == CarouselPhase::Dragging && offset.is_finite() {
            self.drag_offset = offset;
        }
    }

    /// Release the drag and snap. Returns the resulting index.
    pub fn drag_end(&mut self, offset: f32, velocity: f32, now: Instant) -> Option<usize> {
        if self.phase != CarouselPhase::Dragging {
            return self.index();
        }
        let steps = snap_steps(offset, velocity, self.config.item_step, self.config.swipe_velocity);
        let target = self
            .config
            .wrap
            .resolve((self.index as isize).saturating_add(steps), self.items.len());
        debug!(
            carousel = self.id.get(),
            offset,
            velocity,
            steps,
            target,
            "drag released"
        );

        self.drag_offset = 0.0;
        self.phase = if self.hovered && self.config.pause_on_hover {
            CarouselPhase::Paused
        } else {
            CarouselPhase::Idle
        };
        self.set_index(target, "drag_snap");
        self.rearm(now);
        self.index()
    }

    // ── Hover ──

    pub fn hover_enter(&mut self) {
        self.hovered = true;
        if self.config.pause_on_hover && self.phase == CarouselPhase::Idle {
            self.phase = CarouselPhase::Paused;
            self.timer.cancel();
            debug!(carousel = self.id.get(), "paused on hover");
        }
    }

    pub fn hover_leave(&mut self, now: Instant) {
        self.hovered = false;
        if self.phase == CarouselPhase::Paused {
            self.phase = CarouselPhase::Idle;
            self.rearm(now);
            debug!(carousel = self.id.get(), "resumed after hover");
        }
    }

    // ── Keyboard ──

    /// Arrow keys navigate, Home/End jump. Returns `true` when handled.
    pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> bool {
        if !key.is_actionable() || !self.accepts_navigation() {
            return false;
        }
        match key.code {
            KeyCode::Left => {
                self.prev(now);
                true
            }
            KeyCode::Right => {
                self.next(now);
                true
            }
            KeyCode::Home => {
                self.go_to(0, now);
                true
            }
            KeyCode::End => {
                self.go_to(self.items.len() - 1, now);
                true
            }
            _ => false,
        }
    }

    // ── Internals ──

    /// Arm the timer when auto-advance may run, otherwise cancel it.
    fn rearm(&mut self, now: Instant) {
        if self.can_navigate() && self.phase == CarouselPhase::Idle {
            self.timer.start(now);
        } else {
            self.timer.cancel();
        }
    }

    fn set_index(&mut self, to: usize, cause: &'static str) -> bool {
        if to == self.index || to >= self.items.len() {
            return false;
        }
        let from = self.index;
        self.index = to;
        debug!(carousel = self.id.get(), from, to, cause, "carousel index changed");
        if let Some(callback) = self.on_active_change.as_mut() {
            callback(to, &self.items[to]);
        }
        true
    }
}

/// Signed item displacement for a drag release.
fn snap_steps(offset: f32, velocity: f32, item_step: f32, swipe_velocity: f32) -> isize {
    let rounded = if item_step > 0.0 && item_step.is_finite() && offset.is_finite() {
        (-offset / item_step).round() as isize
    } else {
        0
    };
    if rounded == 0 && velocity.is_finite() && velocity.abs() >= swipe_velocity {
        if velocity < 0.0 { 1 } else { -1 }
    } else {
        rounded
    }
}

#![forbid(unsafe_code)]

//! Lightbox state machine.
//!
//! ```text
//!            open_at(i)               toggle_zoom
//!  ┌────────┐ ───────▶ ┌──────┐ ───────────────▶ ┌────────────┐
//!  │ Closed │          │ Open │                  │ OpenZoomed │
//!  └────────┘ ◀─────── └──────┘ ◀─────────────── └────────────┘
//!      ▲      close /            toggle_zoom /          │
//!      │      Esc / backdrop     next / prev            │
//!      └────────────────── close / Esc ─────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. Scroll is locked exactly while the state is not `Closed`: one
//!    `lock_scroll` per open, one `unlock_scroll` per close.
//! 2. While open, focus stays inside the [`FocusTrap`]; Tab keys are
//!    always consumed.
//! 3. Backdrop clicks close only from `Open`, never from `OpenZoomed`.
//! 4. Navigation leaves zoom and resets the pan offset.
//! 5. An empty media list or an out-of-range index never opens.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `open_at` on empty list | Stays `Closed`, logged at debug |
//! | Media fails to load | Host calls [`LightboxEngine::mark_failed`]; [`LightboxEngine::current_source`] switches to the fallback |
//! | Zoom on non-image media | Ignored |
//!
//! Closing does not restore focus to the element that opened the
//! lightbox.

use ahash::AHashSet;
use tracing::{debug, trace};
use web_time::Duration;
use wfx_core::{ElementId, HitRegion, KeyCode, KeyEvent, Point, PointerEvent, PointerEventKind};
use wfx_runtime::config::{LightboxPolicy, MotionPolicy};

use super::focus_trap::FocusTrap;
use super::media::MediaRef;
use super::preload::Preloader;
use crate::{WrapMode, collapsed_duration, motion_duration, reduced_motion_duration};

/// Side effects the lightbox asks of its host. All default to no-ops.
pub trait LightboxHost {
    /// Suppress page scrolling behind the overlay.
    fn lock_scroll(&mut self) {}

    /// Restore page scrolling.
    fn unlock_scroll(&mut self) {}

    /// Move keyboard focus to `id`.
    fn move_focus(&mut self, id: ElementId) {
        let _ = id;
    }

    /// Start loading `media` in the background. Fire-and-forget.
    fn preload(&mut self, index: usize, media: &MediaRef) {
        let _ = (index, media);
    }
}

/// Host that ignores every side effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl LightboxHost for NoopHost {}

/// Lightbox state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightboxState {
    #[default]
    Closed,
    Open,
    OpenZoomed,
}

impl LightboxState {
    #[must_use]
    pub fn is_open(self) -> bool {
        self != Self::Closed
    }
}

/// Lightbox configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightboxConfig {
    pub allow_zoom: bool,
    pub close_on_backdrop: bool,
    /// Neighbors on each side to preload. Zero disables preloading.
    pub preload_radius: usize,
    pub wrap: WrapMode,
    /// Open/close/slide animation length at full motion.
    pub transition: Duration,
    /// Ceiling on that length under reduced motion.
    pub reduced_transition: Duration,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self::from_policy(&LightboxPolicy::default())
    }
}

impl LightboxConfig {
    #[must_use]
    pub fn from_policy(policy: &LightboxPolicy) -> Self {
        Self {
            allow_zoom: true,
            close_on_backdrop: true,
            preload_radius: policy.preload_radius,
            wrap: WrapMode::Wrap,
            transition: Duration::from_millis(policy.transition_ms),
            reduced_transition: reduced_motion_duration(),
        }
    }

    /// Configuration from the lightbox section plus the policy-wide
    /// reduced-motion duration.
    #[must_use]
    pub fn from_motion_policy(policy: &MotionPolicy) -> Self {
        Self {
            reduced_transition: collapsed_duration(policy.reduced_motion_duration),
            ..Self::from_policy(&policy.lightbox)
        }
    }

    /// Gallery image viewer.
    #[must_use]
    pub fn image() -> Self {
        Self::default()
    }

    /// Video player overlay: no zoom.
    #[must_use]
    pub fn video() -> Self {
        Self {
            allow_zoom: false,
            ..Self::default()
        }
    }

    /// Tour quick-view modal: no zoom, nothing to preload.
    #[must_use]
    pub fn quick_view() -> Self {
        Self {
            allow_zoom: false,
            preload_radius: 0,
            ..Self::default()
        }
    }
}

/// A modal media viewer.
#[derive(Debug)]
pub struct LightboxEngine<H: LightboxHost = NoopHost> {
    media: Vec<MediaRef>,
    index: usize,
    state: LightboxState,
    zoom_offset: Point,
    pan_anchor: Option<Point>,
    trap: FocusTrap,
    preloader: Preloader,
    failed: AHashSet<usize>,
    config: LightboxConfig,
    host: H,
}

impl LightboxEngine<NoopHost> {
    /// A lightbox with no host side effects.
    #[must_use]
    pub fn headless(media: Vec<MediaRef>, config: LightboxConfig) -> Self {
        Self::new(media, std::iter::empty(), config, NoopHost)
    }
}

impl<H: LightboxHost> LightboxEngine<H> {
    /// Create a closed lightbox. `focusables` are the overlay's own
    /// controls in tab order.
    pub fn new(
        media: Vec<MediaRef>,
        focusables: impl IntoIterator<Item = ElementId>,
        config: LightboxConfig,
        host: H,
    ) -> Self {
        Self {
            media,
            index: 0,
            state: LightboxState::Closed,
            zoom_offset: Point::ZERO,
            pan_anchor: None,
            trap: FocusTrap::new(focusables),
            preloader: Preloader::new(),
            failed: AHashSet::new(),
            config,
            host,
        }
    }

    // ── Accessors ──

    #[must_use]
    pub fn state(&self) -> LightboxState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.state == LightboxState::OpenZoomed
    }

    /// Index of the slide on screen, `None` while closed.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.is_open().then_some(self.index)
    }

    #[must_use]
    pub fn current(&self) -> Option<&MediaRef> {
        self.index().and_then(|i| self.media.get(i))
    }

    /// Source to render for the current slide, honoring load failures.
    #[must_use]
    pub fn current_source(&self) -> Option<&str> {
        let index = self.index()?;
        let media = self.media.get(index)?;
        Some(media.source(self.failed.contains(&index)))
    }

    #[must_use]
    pub fn media(&self) -> &[MediaRef] {
        &self.media
    }

    #[must_use]
    pub fn zoom_offset(&self) -> Point {
        self.zoom_offset
    }

    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        self.trap.focused()
    }

    #[must_use]
    pub fn focus_trap(&self) -> &FocusTrap {
        &self.trap
    }

    #[must_use]
    pub fn preloader(&self) -> &Preloader {
        &self.preloader
    }

    #[must_use]
    pub fn config(&self) -> &LightboxConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Open/close/slide animation length under the given preference.
    #[must_use]
    pub fn transition_duration(&self, reduced: bool) -> Duration {
        motion_duration(
            self.config.transition,
            reduced,
            self.config.reduced_transition,
        )
    }

    // ── Open / close ──

    /// Open at `index`. Returns `false` and stays closed for an empty list
    /// or an out-of-range index. On an open lightbox this navigates.
    pub fn open_at(&mut self, index: usize) -> bool {
        if index >= self.media.len() {
            debug!(index, len = self.media.len(), "lightbox refused to open");
            return false;
        }
        if self.is_open() {
            return self.go_to(index);
        }

        self.state = LightboxState::Open;
        self.index = index;
        self.reset_zoom();
        self.host.lock_scroll();
        if let Some(first) = self.trap.activate() {
            self.host.move_focus(first);
        }
        self.preloader.mark(index);
        self.preload_neighbors();
        debug!(index, len = self.media.len(), "lightbox opened");
        true
    }

    /// Close from any open state. Returns `false` when already closed.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.state = LightboxState::Closed;
        self.reset_zoom();
        self.trap.deactivate();
        self.host.unlock_scroll();
        debug!(index = self.index, "lightbox closed");
        true
    }

    // ── Navigation ──

    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    pub fn prev(&mut self) -> bool {
        self.step(-1)
    }

    /// Jump to `index`, wrapped or clamped into range.
    pub fn go_to(&mut self, index: usize) -> bool {
        if !self.is_open() {
            return false;
        }
        let target = self.config.wrap.resolve(
            isize::try_from(index).unwrap_or(isize::MAX),
            self.media.len(),
        );
        self.navigate(target)
    }

    fn step(&mut self, delta: isize) -> bool {
        if !self.is_open() {
            return false;
        }
        let target = self
            .config
            .wrap
            .resolve(self.index as isize + delta, self.media.len());
        self.navigate(target)
    }

    fn navigate(&mut self, target: usize) -> bool {
        if self.state == LightboxState::OpenZoomed {
            self.state = LightboxState::Open;
        }
        self.reset_zoom();
        if target == self.index {
            return false;
        }
        let from = self.index;
        self.index = target;
        self.preloader.mark(target);
        self.preload_neighbors();
        debug!(from, to = target, "lightbox navigated");
        true
    }

    fn preload_neighbors(&mut self) {
        let plan = self.preloader.plan(
            self.index,
            self.media.len(),
            self.config.preload_radius,
            self.config.wrap,
        );
        for i in plan {
            if let Some(media) = self.media.get(i) {
                trace!(index = i, src = %media.src, "preloading neighbor");
                self.host.preload(i, media);
            }
        }
    }

    // ── Zoom / pan ──

    /// Toggle between `Open` and `OpenZoomed`. Ignored when zoom is
    /// disabled or the slide is not an image.
    pub fn toggle_zoom(&mut self) -> bool {
        let zoomable =
            self.config.allow_zoom && self.current().is_some_and(|m| m.kind.is_zoomable());
        self.state = match self.state {
            LightboxState::Open if zoomable => LightboxState::OpenZoomed,
            LightboxState::OpenZoomed => LightboxState::Open,
            _ => return false,
        };
        self.reset_zoom();
        debug!(zoomed = self.is_zoomed(), "lightbox zoom toggled");
        true
    }

    /// Pan the zoomed slide. Ignored unless zoomed.
    pub fn pan(&mut self, dx: f32, dy: f32) -> bool {
        if !self.is_zoomed() || !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        self.zoom_offset = self.zoom_offset.offset(dx, dy);
        true
    }

    fn reset_zoom(&mut self) {
        self.zoom_offset = Point::ZERO;
        self.pan_anchor = None;
    }

    /// A click on the dimmed backdrop. Closes only from `Open`.
    pub fn backdrop_click(&mut self) -> bool {
        if self.state == LightboxState::Open && self.config.close_on_backdrop {
            self.close()
        } else {
            false
        }
    }

    // ── Media failures ──

    /// Record that the slide at `index` failed to load.
    pub fn mark_failed(&mut self, index: usize) {
        if index < self.media.len() {
            debug!(index, "lightbox media failed to load");
            self.failed.insert(index);
        }
    }

    /// Replace the media list. Closes when the new list is empty.
    pub fn set_media(&mut self, media: Vec<MediaRef>) {
        self.media = media;
        self.preloader.reset();
        self.failed.clear();
        if self.media.is_empty() {
            self.close();
            self.index = 0;
            return;
        }
        if self.index >= self.media.len() {
            self.index = self.media.len() - 1;
        }
        if !self.is_open() {
            return;
        }
        let zoomable = self.current().is_some_and(|m| m.kind.is_zoomable());
        if self.state == LightboxState::OpenZoomed && !zoomable {
            self.state = LightboxState::Open;
            self.reset_zoom();
            debug!(index = self.index, "lightbox left zoom after media change");
        }
        self.preloader.mark(self.index);
        self.preload_neighbors();
    }

    // ── Input ──

    /// Returns `true` when the key was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.is_open() || !key.is_actionable() {
            return false;
        }
        if key.is_tab() {
            if let Some(id) = self.trap.handle_key(key) {
                self.host.move_focus(id);
            }
            return true;
        }
        match key.code {
            KeyCode::Escape => self.close(),
            KeyCode::Left => {
                self.prev();
                true
            }
            KeyCode::Right => {
                self.next();
                true
            }
            KeyCode::Space => {
                self.toggle_zoom();
                true
            }
            _ => false,
        }
    }

    /// Returns `true` when the pointer event was consumed.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        if !self.is_open() {
            return false;
        }
        match (event.kind, event.hit) {
            (PointerEventKind::Down, HitRegion::Control(id)) => {
                if self.trap.focus(id) {
                    self.host.move_focus(id);
                }
                true
            }
            (PointerEventKind::Down, HitRegion::Backdrop | HitRegion::Content)
                if self.is_zoomed() =>
            {
                self.pan_anchor = Some(event.position);
                true
            }
            (PointerEventKind::Down, HitRegion::Backdrop) => self.backdrop_click(),
            (PointerEventKind::Move, _) => match self.pan_anchor {
                Some(anchor) => {
                    let (dx, dy) = (event.position.x - anchor.x, event.position.y - anchor.y);
                    let moved = self.pan(dx, dy);
                    if moved {
                        self.pan_anchor = Some(event.position);
                    }
                    moved
                }
                None => false,
            },
            (PointerEventKind::Up | PointerEventKind::Cancel, _) => {
                self.pan_anchor.take().is_some()
            }
            _ => false,
        }
    }
}

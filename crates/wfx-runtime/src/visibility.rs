#![forbid(unsafe_code)]

//! Per-element viewport visibility.
//!
//! A [`VisibilityObserver`] owns a registry of watches. Each call to
//! [`observe`](VisibilityObserver::observe) registers one watch and returns
//! a [`VisibilityHandle`] whose `is_visible()` flag follows the element
//! into and out of the viewport. Dropping the handle unregisters the watch.
//!
//! Intersection data arrives along one of two paths:
//!
//! - [`dispatch`](VisibilityObserver::dispatch): the host forwards raw
//!   platform entries (`IntersectionObserver` callbacks).
//! - [`process`](VisibilityObserver::process): the host hands over the
//!   viewport and element rectangles and the observer computes
//!   intersection itself, dispatching only on change.
//!
//! # Invariants
//!
//! 1. A `trigger_once` watch is removed from the registry the moment it
//!    becomes visible; its handle stays `true` for its whole lifetime.
//! 2. A continuous watch follows every intersecting change.
//! 3. Without platform intersection support every handle is visible from
//!    the start and nothing is registered.
//! 4. Entries for unknown or dropped watches are ignored.
//! 5. No registry borrow is held while handle callbacks run.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Unparsable root margin | `warn!`, zero margin |
//! | Threshold outside `[0, 1]` or NaN | Clamped (NaN → 0) |
//! | Element missing from layout | Watch untouched this pass |

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};
use wfx_core::{ElementId, Layout, PlatformCapabilities, Point, Rect, RootMargin};

use crate::config::RevealPolicy;
use crate::reactive::{Observable, Subscription};

/// Observation parameters for one watch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityOptions {
    /// Fraction of the element's area that must be inside the viewport.
    pub threshold: f32,
    /// Viewport adjustment applied before testing.
    pub root_margin: RootMargin,
    /// Stop watching after the first time the element becomes visible.
    pub trigger_once: bool,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: RootMargin::ZERO,
            trigger_once: true,
        }
    }
}

impl VisibilityOptions {
    /// Defaults: any overlap, no margin, trigger once.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options from the reveal section of a policy.
    #[must_use]
    pub fn from_policy(policy: &RevealPolicy) -> Self {
        Self::new()
            .threshold(policy.threshold)
            .root_margin_str(&policy.root_margin)
            .trigger_once(policy.trigger_once)
    }

    /// Set the threshold, clamped to `[0, 1]`.
    #[must_use]
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = clamp_threshold(threshold);
        self
    }

    #[must_use]
    pub fn root_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = margin;
        self
    }

    /// Set the root margin from CSS shorthand, falling back to zero.
    #[must_use]
    pub fn root_margin_str(mut self, margin: &str) -> Self {
        self.root_margin = RootMargin::parse(margin).unwrap_or_else(|err| {
            warn!(margin, error = %err, "invalid root margin; using 0px");
            RootMargin::ZERO
        });
        self
    }

    #[must_use]
    pub fn trigger_once(mut self, once: bool) -> Self {
        self.trigger_once = once;
        self
    }
}

fn clamp_threshold(threshold: f32) -> f32 {
    if threshold.is_nan() {
        0.0
    } else {
        threshold.clamp(0.0, 1.0)
    }
}

/// A raw intersection report from the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
    /// Visible fraction of the element, `0.0..=1.0`.
    pub ratio: f32,
}

impl IntersectionEntry {
    #[must_use]
    pub const fn new(is_intersecting: bool, ratio: f32) -> Self {
        Self {
            is_intersecting,
            ratio,
        }
    }

    /// Fully inside the viewport.
    #[must_use]
    pub const fn visible() -> Self {
        Self::new(true, 1.0)
    }

    /// Entirely outside the viewport.
    #[must_use]
    pub const fn hidden() -> Self {
        Self::new(false, 0.0)
    }
}

/// Registry key for a watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct WatchId(u64);

struct Watch {
    element: ElementId,
    options: VisibilityOptions,
    visible: Observable<bool>,
    last_intersecting: Option<bool>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    watches: BTreeMap<WatchId, Watch>,
}

/// Tracks element visibility for every mounted observer subtree.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone)]
pub struct VisibilityObserver {
    registry: Rc<RefCell<Registry>>,
    capabilities: PlatformCapabilities,
}

impl std::fmt::Debug for VisibilityObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityObserver")
            .field("observed", &self.observed_count())
            .field("supported", &self.is_supported())
            .finish()
    }
}

impl Default for VisibilityObserver {
    fn default() -> Self {
        Self::new(PlatformCapabilities::full())
    }
}

impl VisibilityObserver {
    #[must_use]
    pub fn new(capabilities: PlatformCapabilities) -> Self {
        if !capabilities.intersection_observer {
            warn!("intersection observation unsupported; all content treated as visible");
        }
        Self {
            registry: Rc::new(RefCell::new(Registry::default())),
            capabilities,
        }
    }

    /// Whether the platform can report intersections.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.capabilities.intersection_observer
    }

    /// Start watching `element`.
    pub fn observe(&self, element: ElementId, options: VisibilityOptions) -> VisibilityHandle {
        let options = VisibilityOptions {
            threshold: clamp_threshold(options.threshold),
            ..options
        };

        if !self.is_supported() {
            return VisibilityHandle {
                id: None,
                element,
                visible: Observable::new(true),
                registry: Weak::new(),
            };
        }

        let visible = Observable::new(false);
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = WatchId(reg.next_id);
            reg.next_id += 1;
            reg.watches.insert(
                id,
                Watch {
                    element,
                    options,
                    visible: visible.clone(),
                    last_intersecting: None,
                },
            );
            id
        };
        trace!(element = element.get(), threshold = options.threshold, "observe");

        VisibilityHandle {
            id: Some(id),
            element,
            visible,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver a platform intersection entry for `element`.
    ///
    /// The entry counts as intersecting when the platform says so and its
    /// ratio reaches the watch's threshold.
    pub fn dispatch(&self, element: ElementId, entry: IntersectionEntry) {
        let updates = {
            let mut reg = self.registry.borrow_mut();
            let ids: Vec<WatchId> = reg
                .watches
                .iter()
                .filter(|(_, w)| w.element == element)
                .map(|(id, _)| *id)
                .collect();
            let mut updates = Vec::with_capacity(ids.len());
            for id in ids {
                if let Some(update) = reg.apply(id, entry) {
                    updates.push(update);
                }
            }
            updates
        };
        trace!(
            element = element.get(),
            intersecting = entry.is_intersecting,
            ratio = entry.ratio,
            "dispatch"
        );
        publish(updates);
    }

    /// Compute intersections for every watch against `viewport`.
    ///
    /// Each watch is dispatched only when its intersecting state differs
    /// from the previous computation.
    pub fn process(&self, viewport: Rect, layout: &Layout) {
        let _span = tracing::trace_span!("visibility_process", watches = self.observed_count())
            .entered();
        let updates = {
            let mut reg = self.registry.borrow_mut();
            let pending: Vec<(WatchId, IntersectionEntry)> = reg
                .watches
                .iter()
                .filter_map(|(id, w)| {
                    let rect = layout.get(&w.element)?;
                    let entry = measure(*rect, viewport, &w.options);
                    let intersecting = entry.is_intersecting && entry.ratio >= w.options.threshold;
                    (w.last_intersecting != Some(intersecting)).then_some((*id, entry))
                })
                .collect();
            let mut updates = Vec::with_capacity(pending.len());
            for (id, entry) in pending {
                if let Some(update) = reg.apply(id, entry) {
                    updates.push(update);
                }
            }
            updates
        };
        publish(updates);
    }

    /// Number of live watches.
    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.registry.borrow().watches.len()
    }
}

impl Registry {
    fn apply(&mut self, id: WatchId, entry: IntersectionEntry) -> Option<(Observable<bool>, bool)> {
        let watch = self.watches.get_mut(&id)?;
        let intersecting = entry.is_intersecting && entry.ratio >= watch.options.threshold;
        watch.last_intersecting = Some(intersecting);

        if intersecting {
            let visible = watch.visible.clone();
            if watch.options.trigger_once {
                debug!(element = watch.element.get(), "revealed; watch released");
                self.watches.remove(&id);
            }
            Some((visible, true))
        } else if !watch.options.trigger_once {
            Some((watch.visible.clone(), false))
        } else {
            None
        }
    }
}

fn publish(updates: Vec<(Observable<bool>, bool)>) {
    for (visible, value) in updates {
        visible.set(value);
    }
}

fn measure(rect: Rect, viewport: Rect, options: &VisibilityOptions) -> IntersectionEntry {
    let root = options.root_margin.apply(viewport);
    // A zero-area target has no overlap area; it counts as fully visible
    // when it lies within the root, edges included.
    if rect.is_empty() {
        let inside = root.contains(Point::new(rect.x, rect.y))
            && root.contains(Point::new(rect.right(), rect.bottom()));
        return if inside {
            IntersectionEntry::new(true, 1.0)
        } else {
            IntersectionEntry::hidden()
        };
    }
    match rect.intersect(&root) {
        Some(overlap) => {
            let area = rect.area();
            let ratio = if area > 0.0 {
                (overlap.area() / area).min(1.0)
            } else {
                0.0
            };
            IntersectionEntry::new(true, ratio)
        }
        None => IntersectionEntry::hidden(),
    }
}

/// The observing subtree's view of one watch.
///
/// Dropping the handle unregisters the watch.
pub struct VisibilityHandle {
    id: Option<WatchId>,
    element: ElementId,
    visible: Observable<bool>,
    registry: Weak<RefCell<Registry>>,
}

impl std::fmt::Debug for VisibilityHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityHandle")
            .field("element", &self.element)
            .field("visible", &self.visible.get())
            .field("watching", &self.is_watching())
            .finish()
    }
}

impl VisibilityHandle {
    /// Current visibility.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// The observed element.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Whether the watch is still registered.
    #[must_use]
    pub fn is_watching(&self) -> bool {
        match (self.id, self.registry.upgrade()) {
            (Some(id), Some(reg)) => reg.borrow().watches.contains_key(&id),
            _ => false,
        }
    }

    /// Register a callback fired whenever visibility changes.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(bool) + 'static) -> Subscription {
        self.visible.subscribe(move |v| callback(*v))
    }

    /// The underlying observable, for bindings.
    #[must_use]
    pub fn signal(&self) -> &Observable<bool> {
        &self.visible
    }
}

impl Drop for VisibilityHandle {
    fn drop(&mut self) {
        if let (Some(id), Some(reg)) = (self.id, self.registry.upgrade()) {
            if reg.borrow_mut().watches.remove(&id).is_some() {
                trace!(element = self.element.get(), "watch released on unmount");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn layout_with(element: ElementId, rect: Rect) -> Layout {
        let mut layout = Layout::default();
        layout.insert(element, rect);
        layout
    }

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

    // ── Dispatch ──

    #[test]
    fn trigger_once_latches_and_unregisters() {
        let observer = VisibilityObserver::default();
        let el = ElementId::new();
        let handle = observer.observe(el, VisibilityOptions::new());
        assert!(!handle.is_visible());
        assert_eq!(observer.observed_count(), 1);

        observer.dispatch(el, IntersectionEntry::visible());
        assert!(handle.is_visible());
        assert!(!handle.is_watching());
        assert_eq!(observer.observed_count(), 0);

        observer.dispatch(el, IntersectionEntry::hidden());
        assert!(handle.is_visible());
    }

    #[test]
    fn continuous_follows_enter_and_exit() {
        let observer = VisibilityObserver::default();
        let el = ElementId::new();
        let handle = observer.observe(el, VisibilityOptions::new().trigger_once(false));

        let mut seen = Vec::new();
        for entry in [
            IntersectionEntry::visible(),
            IntersectionEntry::hidden(),
            IntersectionEntry::visible(),
        ] {
            observer.dispatch(el, entry);
            seen.push(handle.is_visible());
        }
        assert_eq!(seen, vec![true, false, true]);
        assert!(handle.is_watching());
    }

    #[test]
    fn threshold_gates_dispatched_entries() {
        let observer = VisibilityObserver::default();
        let el = ElementId::new();
        let handle = observer.observe(el, VisibilityOptions::new().threshold(0.5));

        observer.dispatch(el, IntersectionEntry::new(true, 0.3));
        assert!(!handle.is_visible());
        observer.dispatch(el, IntersectionEntry::new(true, 0.5));
        assert!(handle.is_visible());
    }

    #[test]
    fn repeated_visible_is_idempotent() {
        let observer = VisibilityObserver::default();
        let el = ElementId::new();
        let handle = observer.observe(el, VisibilityOptions::new().trigger_once(false));
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = handle.subscribe(move |_| h.set(h.get() + 1));

        observer.dispatch(el, IntersectionEntry::visible());
        observer.dispatch(el, IntersectionEntry::visible());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unknown_element_is_ignored() {
        let observer = VisibilityObserver::default();
        let el = ElementId::new();
        let handle = observer.observe(el, VisibilityOptions::new());
        observer.dispatch(ElementId::new(), IntersectionEntry::visible());
        assert!(!handle.is_visible());
    }

    // ── Teardown ──

    #[test]
    fn dropping_handle_unregisters() {
        let observer = VisibilityObserver::default();
        let el = ElementId::new();
        let handle = observer.observe(el, VisibilityOptions::new());
        assert_eq!(observer.observed_count(), 1);
        drop(handle);
        assert_eq!(observer.observed_count(), 0);
        observer.dispatch(el, IntersectionEntry::visible());
    }

    #[test]
    fn handle_may_be_dropped_from_its_own_callback() {
        let observer = VisibilityObserver::default();
        let el = ElementId::new();
        let slot: Rc<RefCell<Option<VisibilityHandle>>> = Rc::new(RefCell::new(None));
        let handle = observer.observe(el, VisibilityOptions::new().trigger_once(false));
        let s = Rc::clone(&slot);
        let sub = handle.subscribe(move |_| {
            s.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(handle);

        observer.dispatch(el, IntersectionEntry::visible());
        assert!(slot.borrow().is_none());
        assert_eq!(observer.observed_count(), 0);
        drop(sub);
    }

    #[test]
    fn handle_outlives_observer() {
        let observer = VisibilityObserver::default();
        let handle = observer.observe(ElementId::new(), VisibilityOptions::new());
        drop(observer);
        assert!(!handle.is_watching());
        drop(handle);
    }

    // ── Capability fallback ──

    #[test]
    fn unsupported_platform_fails_open() {
        let observer = VisibilityObserver::new(PlatformCapabilities::none());
        let handle = observer.observe(ElementId::new(), VisibilityOptions::new());
        assert!(handle.is_visible());
        assert!(!handle.is_watching());
        assert_eq!(observer.observed_count(), 0);
    }

    // ── Options ──

    #[test]
    fn options_clamp_and_fallback() {
        let opts = VisibilityOptions::new().threshold(1.7);
        assert_eq!(opts.threshold, 1.0);
        assert_eq!(VisibilityOptions::new().threshold(f32::NAN).threshold, 0.0);
        assert_eq!(
            VisibilityOptions::new().root_margin_str("fifty").root_margin,
            RootMargin::ZERO
        );
    }

    #[test]
    fn options_from_policy() {
        let opts = VisibilityOptions::from_policy(&RevealPolicy::default());
        assert_eq!(opts.threshold, 0.1);
        assert!(opts.trigger_once);
        assert_eq!(opts.root_margin, RootMargin::parse("0px 0px -50px 0px").unwrap());
    }

    // ── Geometry path ──

    #[test]
    fn process_computes_ratio_against_threshold() {
        let observer = VisibilityObserver::default();
        let el = ElementId::new();
        let handle = observer.observe(
            el,
            VisibilityOptions::new().threshold(0.5).trigger_once(false),
        );

        // 25% of the element is above the fold.
        observer.process(VIEWPORT, &layout_with(el, Rect::new(0.0, 700.0, 100.0, 400.0)));
        assert!(!handle.is_visible());

        // 75% inside.
        observer.process(VIEWPORT, &layout_with(el, Rect::new(0.0, 500.0, 100.0, 400.0)));
        assert!(handle.is_visible());

        observer.process(VIEWPORT, &layout_with(el, Rect::new(0.0, 900.0, 100.0, 400.0)));
        assert!(!handle.is_visible());
    }

    #[test]
    fn root_margin_triggers_early() {
        let observer = VisibilityObserver::default();
        let el = ElementId::new();
        let handle = observer.observe(
            el,
            VisibilityOptions::new().root_margin_str("0px 0px 100px 0px"),
        );
        // Just below the fold, inside the 100px extension.
        observer.process(VIEWPORT, &layout_with(el, Rect::new(0.0, 850.0, 100.0, 100.0)));
        assert!(handle.is_visible());
    }

    #[test]
    fn negative_root_margin_triggers_late() {
        let observer = VisibilityObserver::default();
        let el = ElementId::new();
        let handle = observer.observe(
            el,
            VisibilityOptions::new().root_margin_str("0px 0px -100px 0px"),
        );
        observer.process(VIEWPORT, &layout_with(el, Rect::new(0.0, 720.0, 100.0, 50.0)));
        assert!(!handle.is_visible());
        observer.process(VIEWPORT, &layout_with(el, Rect::new(0.0, 600.0, 100.0, 50.0)));
        assert!(handle.is_visible());
    }

    #[test]
    fn process_dispatches_only_on_change() {
        let observer = VisibilityObserver::default();
        let el = ElementId::new();
        let handle = observer.observe(el, VisibilityOptions::new().trigger_once(false));
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = handle.subscribe(move |_| h.set(h.get() + 1));

        let layout = layout_with(el, Rect::new(0.0, 100.0, 100.0, 100.0));
        for _ in 0..5 {
            observer.process(VIEWPORT, &layout);
        }
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn element_missing_from_layout_is_untouched() {
        let observer = VisibilityObserver::default();
        let el = ElementId::new();
        let handle = observer.observe(el, VisibilityOptions::new());
        observer.process(VIEWPORT, &Layout::default());
        assert!(!handle.is_visible());
        assert!(handle.is_watching());
    }

    #[test]
    fn zero_area_element_inside_viewport_is_revealed() {
        let observer = VisibilityObserver::default();
        let flat = ElementId::new();
        let outside = ElementId::new();
        let flat_handle = observer.observe(flat, VisibilityOptions::new().threshold(0.5));
        let outside_handle = observer.observe(outside, VisibilityOptions::new());

        let mut layout = layout_with(flat, Rect::new(0.0, 100.0, 500.0, 0.0));
        layout.insert(outside, Rect::new(0.0, 900.0, 0.0, 40.0));
        observer.process(VIEWPORT, &layout);

        assert!(flat_handle.is_visible());
        assert!(!flat_handle.is_watching());
        assert!(!outside_handle.is_visible());
    }
}

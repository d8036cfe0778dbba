#![forbid(unsafe_code)]

//! Declarative scroll reveal.
//!
//! [`Reveal`] wraps one subtree: it observes the subtree's element, reads
//! the motion preference, and resolves a catalog variant, then tells the
//! host what to render through [`Reveal::frame`].
//!
//! | Situation | State | Timing |
//! |-----------|-------|--------|
//! | Reduced motion at mount | `Animate` | none (render final state now) |
//! | Not yet visible | `Initial` | none |
//! | Visible, full motion | `Animate` | variant timing |
//! | Visible, reduced motion | `Animate` | collapsed timing |
//! | Continuous reveal left viewport | `Initial` | none |
//!
//! # Invariants
//!
//! 1. The motion preference is read on every `frame()`; nothing caches it.
//! 2. A `trigger_once` reveal never returns to `Initial`.
//! 3. Dropping the reveal releases its visibility watch and every
//!    callback registered through `on_change`.

use std::rc::Rc;

use tracing::debug;
use wfx_core::ElementId;
use wfx_runtime::config::RevealPolicy;
use wfx_runtime::motion::ReducedMotionSignal;
use wfx_runtime::reactive::BindingScope;
use wfx_runtime::visibility::{VisibilityHandle, VisibilityObserver, VisibilityOptions};

use crate::catalog::{MotionCatalog, VariantName};
use crate::stagger::child_delays;
use crate::transition::{StateName, Timing, VisualProps};

/// Reveal configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    pub variant: VariantName,
    pub visibility: VisibilityOptions,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self::from_policy(&RevealPolicy::default())
    }
}

impl RevealOptions {
    /// `fadeUp` with the shipped reveal defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_policy(policy: &RevealPolicy) -> Self {
        Self {
            variant: VariantName::FadeUp,
            visibility: VisibilityOptions::from_policy(policy),
        }
    }

    #[must_use]
    pub fn variant(mut self, variant: VariantName) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.visibility = self.visibility.threshold(threshold);
        self
    }

    #[must_use]
    pub fn root_margin(mut self, margin: &str) -> Self {
        self.visibility = self.visibility.root_margin_str(margin);
        self
    }

    #[must_use]
    pub fn trigger_once(mut self, once: bool) -> Self {
        self.visibility = self.visibility.trigger_once(once);
        self
    }
}

/// What to render for the wrapped subtree right now.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealFrame {
    pub state: StateName,
    pub props: VisualProps,
    /// Transition to the state; `None` means render it immediately.
    pub timing: Option<Timing>,
}

impl RevealFrame {
    /// Whether the subtree is in its final visual state.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.state == StateName::Animate
    }
}

/// One child of a stagger container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildFrame {
    pub index: usize,
    pub state: StateName,
    /// Start delay relative to the container, in seconds.
    pub delay: f32,
}

/// A mounted reveal wrapper.
pub struct Reveal {
    element: ElementId,
    options: RevealOptions,
    handle: VisibilityHandle,
    motion: ReducedMotionSignal,
    catalog: MotionCatalog,
    reduced_at_mount: bool,
    scope: BindingScope,
}

impl std::fmt::Debug for Reveal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reveal")
            .field("element", &self.element)
            .field("variant", &self.options.variant)
            .field("visible", &self.handle.is_visible())
            .field("reduced_at_mount", &self.reduced_at_mount)
            .finish()
    }
}

impl Reveal {
    /// Start observing `element` and capture the mount-time preference.
    pub fn mount(
        observer: &VisibilityObserver,
        motion: &ReducedMotionSignal,
        catalog: &MotionCatalog,
        element: ElementId,
        options: RevealOptions,
    ) -> Self {
        let reduced_at_mount = motion.effective();
        let handle = observer.observe(element, options.visibility);
        debug!(
            element = element.get(),
            variant = options.variant.as_str(),
            reduced_at_mount,
            "reveal mounted"
        );
        Self {
            element,
            options,
            handle,
            motion: motion.clone(),
            catalog: *catalog,
            reduced_at_mount,
            scope: BindingScope::new(),
        }
    }

    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[must_use]
    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    /// Whether the subtree should show its final state.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.reduced_at_mount || self.handle.is_visible()
    }

    /// Current frame.
    #[must_use]
    pub fn frame(&self) -> RevealFrame {
        let reduced = self.motion.effective();
        let _span = tracing::debug_span!(
            "reveal_frame",
            element = self.element.get(),
            variant = self.options.variant.as_str(),
            reduced
        )
        .entered();

        let variant = self.catalog.resolve(self.options.variant, reduced);
        if self.reduced_at_mount {
            return RevealFrame {
                state: StateName::Animate,
                props: variant.animate.props,
                timing: None,
            };
        }
        if self.handle.is_visible() {
            RevealFrame {
                state: StateName::Animate,
                props: variant.animate.props,
                timing: variant.animate.timing,
            }
        } else {
            RevealFrame {
                state: StateName::Initial,
                props: variant.initial.props,
                timing: None,
            }
        }
    }

    /// Frames for `count` children of a stagger container.
    ///
    /// Children follow the container's state; under reduced motion every
    /// delay is zero.
    #[must_use]
    pub fn child_frames(&self, count: usize) -> Vec<ChildFrame> {
        let reduced = self.motion.effective();
        let state = if self.is_revealed() {
            StateName::Animate
        } else {
            StateName::Initial
        };
        let variant = self.catalog.resolve(self.options.variant, reduced);
        child_delays(&variant, count)
            .into_iter()
            .enumerate()
            .map(|(index, delay)| ChildFrame {
                index,
                state,
                delay: if self.reduced_at_mount { 0.0 } else { delay },
            })
            .collect()
    }

    /// Register a re-render callback for visibility and motion changes.
    ///
    /// The callback lives as long as the reveal.
    pub fn on_change(&mut self, callback: impl Fn() + 'static) {
        let callback: Rc<dyn Fn()> = Rc::new(callback);
        let on_visible = Rc::clone(&callback);
        self.scope.hold(self.handle.subscribe(move |_| on_visible()));
        self.scope.hold(self.motion.subscribe(move |_| callback()));
    }

    /// Whether the visibility watch is still registered.
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.handle.is_watching()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use wfx_core::PlatformCapabilities;
    use wfx_runtime::storage::MemoryStorage;
    use wfx_runtime::visibility::IntersectionEntry;

    use crate::collapse::{REDUCED_MOTION_DURATION, is_collapsed};
    use crate::easing::Easing;
    use crate::transition::PropValue;

    struct Fixture {
        observer: VisibilityObserver,
        motion: ReducedMotionSignal,
        catalog: MotionCatalog,
    }

    fn fixture(reduced: bool) -> Fixture {
        Fixture {
            observer: VisibilityObserver::default(),
            motion: ReducedMotionSignal::init(Some(reduced), MemoryStorage::new()),
            catalog: MotionCatalog::new(),
        }
    }

    impl Fixture {
        fn mount(&self, options: RevealOptions) -> (ElementId, Reveal) {
            let el = ElementId::new();
            let reveal = Reveal::mount(&self.observer, &self.motion, &self.catalog, el, options);
            (el, reveal)
        }
    }

    // ── Full motion ──

    #[test]
    fn hidden_until_visible_then_animates() {
        let fx = fixture(false);
        let (el, reveal) = fx.mount(RevealOptions::new());

        let frame = reveal.frame();
        assert_eq!(frame.state, StateName::Initial);
        assert!(frame.timing.is_none());
        assert_eq!(frame.props.opacity, Some(PropValue::Static(0.0)));

        fx.observer.dispatch(el, IntersectionEntry::visible());
        let frame = reveal.frame();
        assert!(frame.is_revealed());
        let timing = frame.timing.unwrap();
        assert_eq!(timing.duration, 0.6);
        assert_eq!(timing.easing, Easing::EASE_OUT_EXPO);
    }

    #[test]
    fn trigger_once_never_returns_to_initial() {
        let fx = fixture(false);
        let (el, reveal) = fx.mount(RevealOptions::new());
        fx.observer.dispatch(el, IntersectionEntry::visible());
        fx.observer.dispatch(el, IntersectionEntry::hidden());
        assert!(reveal.frame().is_revealed());
        assert!(!reveal.is_watching());
    }

    #[test]
    fn continuous_reveal_hides_again() {
        let fx = fixture(false);
        let (el, reveal) = fx.mount(RevealOptions::new().trigger_once(false));
        fx.observer.dispatch(el, IntersectionEntry::visible());
        assert!(reveal.frame().is_revealed());
        fx.observer.dispatch(el, IntersectionEntry::hidden());
        assert_eq!(reveal.frame().state, StateName::Initial);
    }

    // ── Reduced motion ──

    #[test]
    fn reduced_at_mount_renders_final_state_immediately() {
        let fx = fixture(true);
        let (_, reveal) = fx.mount(RevealOptions::new().variant(VariantName::SlideInLeft));
        let frame = reveal.frame();
        assert_eq!(frame.state, StateName::Animate);
        assert!(frame.timing.is_none());
        assert_eq!(frame.props.x, Some(PropValue::Static(0.0)));
    }

    #[test]
    fn preference_change_after_mount_is_read_per_frame() {
        let fx = fixture(false);
        let (el, reveal) = fx.mount(RevealOptions::new());
        fx.motion.set_user_override(true);
        fx.observer.dispatch(el, IntersectionEntry::visible());

        let timing = reveal.frame().timing.unwrap();
        assert_eq!(timing.duration, REDUCED_MOTION_DURATION);
        assert_eq!(timing.easing, Easing::Linear);

        fx.motion.set_user_override(false);
        assert_eq!(reveal.frame().timing.unwrap().duration, 0.6);
    }

    #[test]
    fn looping_variant_stays_still_under_reduced_motion() {
        let fx = fixture(false);
        let (el, reveal) = fx.mount(RevealOptions::new().variant(VariantName::Float));
        fx.observer.dispatch(el, IntersectionEntry::visible());
        fx.motion.set_system_preference(true);
        let frame = reveal.frame();
        assert!(!frame.props.has_keyframes());
        assert!(!frame.timing.unwrap().is_looping());
        assert!(is_collapsed(&fx.catalog.resolve(VariantName::Float, true)));
    }

    // ── Stagger ──

    #[test]
    fn child_frames_stagger_with_motion() {
        let fx = fixture(false);
        let (el, reveal) = fx.mount(RevealOptions::new().variant(VariantName::StaggerContainer));
        assert!(reveal.child_frames(3).iter().all(|c| c.state == StateName::Initial));

        fx.observer.dispatch(el, IntersectionEntry::visible());
        let children = reveal.child_frames(3);
        assert!((children[2].delay - 0.4).abs() < 1e-6);
        assert!(children.iter().all(|c| c.state == StateName::Animate));
    }

    #[test]
    fn child_frames_collapse_when_reduced() {
        let fx = fixture(true);
        let (_, reveal) = fx.mount(RevealOptions::new().variant(VariantName::StaggerContainer));
        let children = reveal.child_frames(5);
        assert_eq!(children.len(), 5);
        assert!(children.iter().all(|c| c.delay == 0.0 && c.state == StateName::Animate));
    }

    // ── Lifecycle ──

    #[test]
    fn on_change_fires_for_both_sources_and_stops_on_drop() {
        let fx = fixture(false);
        let (el, mut reveal) = fx.mount(RevealOptions::new().trigger_once(false));
        let renders = Rc::new(Cell::new(0));
        let r = Rc::clone(&renders);
        reveal.on_change(move || r.set(r.get() + 1));

        fx.observer.dispatch(el, IntersectionEntry::visible());
        fx.motion.set_user_override(true);
        assert_eq!(renders.get(), 2);

        drop(reveal);
        assert_eq!(fx.observer.observed_count(), 0);
        fx.motion.set_user_override(false);
        fx.observer.dispatch(el, IntersectionEntry::hidden());
        assert_eq!(renders.get(), 2);
    }

    #[test]
    fn unsupported_platform_reveals_immediately() {
        let motion = ReducedMotionSignal::init(Some(false), MemoryStorage::new());
        let observer = VisibilityObserver::new(PlatformCapabilities::none());
        let reveal = Reveal::mount(
            &observer,
            &motion,
            &MotionCatalog::new(),
            ElementId::new(),
            RevealOptions::new(),
        );
        assert!(reveal.frame().is_revealed());
    }

    #[test]
    fn options_from_policy() {
        let options = RevealOptions::from_policy(&RevealPolicy {
            threshold: 0.3,
            trigger_once: false,
            ..RevealPolicy::default()
        });
        assert_eq!(options.variant, VariantName::FadeUp);
        assert_eq!(options.visibility.threshold, 0.3);
        assert!(!options.visibility.trigger_once);
    }
}

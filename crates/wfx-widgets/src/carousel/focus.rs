#![forbid(unsafe_code)]

//! Keyboard routing among mounted carousels.
//!
//! Several carousels can be on a page at once. Arrow keys go to exactly
//! one of them, resolved in this order:
//!
//! 1. the carousel holding keyboard focus,
//! 2. the carousel under the pointer,
//! 3. the only registered carousel, if there is exactly one.
//!
//! Otherwise the key is not routed and the page keeps its default
//! behavior.

use smallvec::SmallVec;
use tracing::trace;
use web_time::Instant;
use wfx_core::{ElementId, KeyCode, KeyEvent};

use super::engine::CarouselEngine;

/// Tracks which carousel receives navigation keys.
#[derive(Debug, Clone, Default)]
pub struct CarouselFocus {
    registered: SmallVec<[ElementId; 4]>,
    focused: Option<ElementId>,
    hovered: Option<ElementId>,
}

impl CarouselFocus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mounted carousel. Duplicate registrations are ignored.
    pub fn register(&mut self, id: ElementId) {
        if !self.registered.contains(&id) {
            self.registered.push(id);
        }
    }

    /// Forget an unmounted carousel, clearing any focus or hover it held.
    pub fn unregister(&mut self, id: ElementId) {
        self.registered.retain(|r| *r != id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
    }

    #[must_use]
    pub fn registered(&self) -> &[ElementId] {
        &self.registered
    }

    /// Keyboard focus moved onto (`Some`) or away from (`None`) a carousel.
    /// Unregistered ids are ignored.
    pub fn set_focused(&mut self, id: Option<ElementId>) {
        self.focused = id.filter(|id| self.registered.contains(id));
    }

    /// Pointer entered (`Some`) or left (`None`) a carousel.
    pub fn set_hovered(&mut self, id: Option<ElementId>) {
        self.hovered = id.filter(|id| self.registered.contains(id));
    }

    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    #[must_use]
    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    /// The carousel that would receive a navigation key right now.
    #[must_use]
    pub fn active(&self) -> Option<ElementId> {
        self.focused.or(self.hovered).or(match self.registered.as_slice() {
            [only] => Some(*only),
            _ => None,
        })
    }

    #[must_use]
    pub fn is_active(&self, id: ElementId) -> bool {
        self.active() == Some(id)
    }

    /// Target for `key`, or `None` when it is not a navigation key or no
    /// carousel qualifies.
    #[must_use]
    pub fn target_for(&self, key: &KeyEvent) -> Option<ElementId> {
        let navigation = matches!(
            key.code,
            KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End
        );
        if navigation && key.is_actionable() {
            self.active()
        } else {
            None
        }
    }

    /// Deliver `key` to the resolved carousel among `engines`. Returns
    /// `true` when some carousel handled it.
    pub fn route_key<'a, T: 'a>(
        &self,
        key: &KeyEvent,
        engines: impl IntoIterator<Item = &'a mut CarouselEngine<T>>,
        now: Instant,
    ) -> bool {
        let Some(target) = self.target_for(key) else {
            return false;
        };
        trace!(carousel = target.get(), key = ?key.code, "routing key");
        engines
            .into_iter()
            .find(|engine| engine.id() == target)
            .is_some_and(|engine| engine.handle_key(key, now))
    }
}

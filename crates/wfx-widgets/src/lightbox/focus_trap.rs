#![forbid(unsafe_code)]

//! Focus containment for modal overlays.
//!
//! # Invariants
//!
//! 1. While active, the focused element is always a member of the trap
//!    (or `None` when the trap has no members).
//! 2. Tab from the last member moves to the first; Shift+Tab (or BackTab)
//!    from the first moves to the last.
//! 3. [`FocusTrap::focus`] refuses ids outside the trap.

use smallvec::SmallVec;
use wfx_core::{ElementId, KeyEvent};

/// Ordered set of focusable elements that Tab cycles through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusTrap {
    members: SmallVec<[ElementId; 8]>,
    current: Option<usize>,
    active: bool,
}

impl FocusTrap {
    /// Create an inactive trap over `members` in tab order. Duplicates are
    /// dropped.
    #[must_use]
    pub fn new(members: impl IntoIterator<Item = ElementId>) -> Self {
        let mut unique: SmallVec<[ElementId; 8]> = SmallVec::new();
        for id in members {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self {
            members: unique,
            current: None,
            active: false,
        }
    }

    #[must_use]
    pub fn members(&self) -> &[ElementId] {
        &self.members
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.members.contains(&id)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The element holding focus, if the trap is active.
    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        if !self.active {
            return None;
        }
        self.current.and_then(|i| self.members.get(i).copied())
    }

    /// Activate and focus the first member.
    pub fn activate(&mut self) -> Option<ElementId> {
        self.active = true;
        self.current = (!self.members.is_empty()).then_some(0);
        self.focused()
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.current = None;
    }

    /// Move focus to `id`. Returns `false` (focus unchanged) when the trap
    /// is inactive or `id` is not a member.
    pub fn focus(&mut self, id: ElementId) -> bool {
        if !self.active {
            return false;
        }
        match self.members.iter().position(|m| *m == id) {
            Some(pos) => {
                self.current = Some(pos);
                true
            }
            None => false,
        }
    }

    /// Cycle forward or backward, wrapping at both ends.
    pub fn cycle(&mut self, reverse: bool) -> Option<ElementId> {
        if !self.active || self.members.is_empty() {
            return None;
        }
        let len = self.members.len();
        let next = match (self.current, reverse) {
            (None, false) => 0,
            (None, true) => len - 1,
            (Some(i), false) => (i + 1) % len,
            (Some(i), true) => (i + len - 1) % len,
        };
        self.current = Some(next);
        self.focused()
    }

    /// Handle a Tab-family key. Returns the new focus target, or `None`
    /// when the key was not a focus-cycling key.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<ElementId> {
        if !key.is_tab() || !key.is_actionable() {
            return None;
        }
        self.cycle(key.is_back_tab())
    }
}

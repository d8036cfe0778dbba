#![forbid(unsafe_code)]

//! Opaque handles for renderable nodes.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Rect;

/// Global counter for unique element IDs.
static ELEMENT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque reference to a renderable node owned by the host.
///
/// The core never dereferences an element; it only compares handles and
/// looks them up in a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocate a new process-unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(ELEMENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap a host-provided raw ID.
    ///
    /// Hosts that already number their nodes should use this instead of
    /// [`ElementId::new`], and must not mix the two schemes.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw ID value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bounding rectangles of elements, in viewport coordinates.
pub type Layout = ahash::AHashMap<ElementId, Rect>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        let a = ElementId::new();
        let b = ElementId::new();
        let c = ElementId::new();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn raw_round_trip_and_display() {
        let id = ElementId::from_raw(42);
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "#42");
    }
}

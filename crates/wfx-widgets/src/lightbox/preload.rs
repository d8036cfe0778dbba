#![forbid(unsafe_code)]

//! Neighbor preloading.
//!
//! Preloads are fire-and-forget: nothing is cancelled when the viewer
//! moves on. [`Preloader`] only deduplicates, so each index is requested
//! at most once per session.

use ahash::AHashSet;

use crate::WrapMode;

/// Indices within `radius` of `index`, nearest first, excluding `index`
/// itself and duplicates produced by wrapping on short lists.
#[must_use]
pub fn neighbors(index: usize, len: usize, radius: usize, wrap: WrapMode) -> Vec<usize> {
    if len <= 1 {
        return Vec::new();
    }
    // Every other index is within `len - 1` steps, so a larger radius
    // adds nothing.
    let radius = radius.min(len - 1);
    let mut out = Vec::with_capacity(radius.saturating_mul(2).min(len - 1));
    let center = index as isize;
    for step in 1..=radius as isize {
        for position in [center + step, center - step] {
            if wrap == WrapMode::Clamp && !(0..len as isize).contains(&position) {
                continue;
            }
            let resolved = wrap.resolve(position, len);
            if resolved != index && !out.contains(&resolved) {
                out.push(resolved);
            }
        }
    }
    out
}

/// Session-wide record of requested preloads.
#[derive(Debug, Clone, Default)]
pub struct Preloader {
    requested: AHashSet<usize>,
}

impl Preloader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices around `index` not yet requested. They are marked as
    /// requested before returning.
    pub fn plan(&mut self, index: usize, len: usize, radius: usize, wrap: WrapMode) -> Vec<usize> {
        neighbors(index, len, radius, wrap)
            .into_iter()
            .filter(|i| self.requested.insert(*i))
            .collect()
    }

    /// Mark `index` as loaded without requesting it (the slide on screen).
    pub fn mark(&mut self, index: usize) {
        self.requested.insert(index);
    }

    #[must_use]
    pub fn is_requested(&self, index: usize) -> bool {
        self.requested.contains(&index)
    }

    #[must_use]
    pub fn requested_count(&self) -> usize {
        self.requested.len()
    }

    /// Forget everything (media list replaced).
    pub fn reset(&mut self) {
        self.requested.clear();
    }
}

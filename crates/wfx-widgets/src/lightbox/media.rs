#![forbid(unsafe_code)]

//! Media references shown in a lightbox.

use std::fmt;

/// What a lightbox slide renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaKind {
    #[default]
    Image,
    Video,
    /// An arbitrary content card (quick-view modal).
    Card,
}

impl MediaKind {
    /// Whether the slide supports zoom/pan.
    #[must_use]
    pub fn is_zoomable(self) -> bool {
        matches!(self, Self::Image)
    }
}

/// A media item. The engine never loads it; hosts do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRef {
    pub src: String,
    pub alt: String,
    pub kind: MediaKind,
    /// Source to show after `src` failed to load.
    pub fallback: Option<String>,
}

impl MediaRef {
    #[must_use]
    pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            kind: MediaKind::Image,
            fallback: None,
        }
    }

    #[must_use]
    pub fn video(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            ..Self::image(src, alt)
        }
    }

    #[must_use]
    pub fn card(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Card,
            ..Self::image(id, title)
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// The source to render. After a load failure this is the fallback
    /// when one exists, otherwise the original source again.
    #[must_use]
    pub fn source(&self, failed: bool) -> &str {
        match (&self.fallback, failed) {
            (Some(fallback), true) => fallback,
            _ => &self.src,
        }
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.kind, self.src)
    }
}

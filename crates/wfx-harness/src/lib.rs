#![forbid(unsafe_code)]

//! Test harness and reference fixtures for Wayfarer FX.
//!
//! Shared by the workspace's integration tests:
//!
//! - [`init_test_logging`] installs a `tracing` subscriber that writes
//!   through the test harness (`RUST_LOG` filters it).
//! - [`log_jsonl`] emits one machine-readable check line to stderr.
//! - [`ScriptedViewport`] drives a [`VisibilityObserver`] from a fake
//!   layout and scroll position.
//! - [`RecordingHost`] records every lightbox side effect.
//! - [`FailingStorage`] and [`ScriptedTransport`] inject storage and
//!   network failures.
//! - [`tours`], [`gallery`] and [`TESTIMONIALS`] are static site data.

use std::collections::VecDeque;
use std::sync::Once;

use wfx_core::{ElementId, KeyCode, KeyEvent, Layout, Modifiers, Rect};
use wfx_forms::{HttpResponse, Transport, TransportError};
use wfx_runtime::{ClientStorage, StorageError, VisibilityObserver};
use wfx_widgets::{LightboxHost, MediaRef};

// =============================================================================
// Logging
// =============================================================================

static LOGGING: Once = Once::new();

/// Install a test-writer `tracing` subscriber once per process.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Emit a JSONL check entry (for CI artifact review).
pub fn log_jsonl(test: &str, check: &str, passed: bool, notes: &str) {
    let line = serde_json::json!({
        "test": test,
        "check": check,
        "passed": passed,
        "notes": notes,
    });
    eprintln!("{line}");
}

// =============================================================================
// Input
// =============================================================================

#[must_use]
pub fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::press(code)
}

#[must_use]
pub fn shift_tab() -> KeyEvent {
    KeyEvent::press(KeyCode::Tab).with_modifiers(Modifiers::SHIFT)
}

// =============================================================================
// Viewport
// =============================================================================

/// A fake page: elements at fixed document positions and a scrollable
/// viewport over them.
#[derive(Debug)]
pub struct ScriptedViewport {
    observer: VisibilityObserver,
    document: Layout,
    width: f32,
    height: f32,
    scroll_y: f32,
}

impl ScriptedViewport {
    #[must_use]
    pub fn new(observer: VisibilityObserver, width: f32, height: f32) -> Self {
        Self {
            observer,
            document: Layout::default(),
            width,
            height,
            scroll_y: 0.0,
        }
    }

    #[must_use]
    pub fn observer(&self) -> &VisibilityObserver {
        &self.observer
    }

    /// Place `element` at a document-space rectangle.
    pub fn place(&mut self, element: ElementId, rect: Rect) {
        self.document.insert(element, rect);
    }

    /// Remove an element from the page.
    pub fn remove(&mut self, element: ElementId) {
        self.document.remove(&element);
    }

    /// Scroll to `y` and run one intersection pass.
    pub fn scroll_to(&mut self, y: f32) {
        self.scroll_y = y;
        self.step();
    }

    /// Run one intersection pass at the current scroll position.
    pub fn step(&self) {
        let viewport = Rect::new(0.0, 0.0, self.width, self.height);
        let layout: Layout = self
            .document
            .iter()
            .map(|(id, r)| (*id, Rect::new(r.x, r.y - self.scroll_y, r.width, r.height)))
            .collect();
        tracing::debug!(
            scroll_y = self.scroll_y,
            elements = layout.len(),
            "viewport pass"
        );
        self.observer.process(viewport, &layout);
    }
}

// =============================================================================
// Lightbox host
// =============================================================================

/// A side effect requested by a lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    LockScroll,
    UnlockScroll,
    Focus(ElementId),
    Preload(usize),
}

/// Lightbox host that records every call.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
    pub scroll_locked: bool,
    pub focused: Option<ElementId>,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn preloads(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Preload(i) => Some(*i),
                _ => None,
            })
            .collect()
    }
}

impl LightboxHost for RecordingHost {
    fn lock_scroll(&mut self) {
        self.scroll_locked = true;
        self.events.push(HostEvent::LockScroll);
    }

    fn unlock_scroll(&mut self) {
        self.scroll_locked = false;
        self.events.push(HostEvent::UnlockScroll);
    }

    fn move_focus(&mut self, id: ElementId) {
        self.focused = Some(id);
        self.events.push(HostEvent::Focus(id));
    }

    fn preload(&mut self, index: usize, _media: &MediaRef) {
        self.events.push(HostEvent::Preload(index));
    }
}

// =============================================================================
// Failure injection
// =============================================================================

/// Storage whose reads succeed (empty) and whose writes always fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStorage;

impl ClientStorage for FailingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::QuotaExceeded)
    }
}

/// Transport that replays queued responses and records requests.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    queue: VecDeque<Result<HttpResponse, TransportError>>,
    pub requests: Vec<(String, serde_json::Value)>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn then(mut self, response: Result<HttpResponse, TransportError>) -> Self {
        self.queue.push_back(response);
        self
    }

    #[must_use]
    pub fn then_ok(self, body: &str) -> Self {
        self.then(Ok(HttpResponse::new(200, body)))
    }
}

impl Transport for ScriptedTransport {
    fn post_json(&mut self, path: &str, body: &str) -> Result<HttpResponse, TransportError> {
        let value = serde_json::from_str(body).unwrap_or(serde_json::Value::Null);
        self.requests.push((path.to_owned(), value));
        self.queue
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("script exhausted".to_owned())))
    }
}

// =============================================================================
// Site data
// =============================================================================

/// A tour listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tour {
    pub id: &'static str,
    pub title: &'static str,
    pub region: &'static str,
    pub days: u8,
    pub price_eur: u32,
    pub images: &'static [&'static str],
}

const TOURS: &[Tour] = &[
    Tour {
        id: "lisbon-sintra",
        title: "Lisbon & Sintra Highlights",
        region: "Lisbon",
        days: 4,
        price_eur: 890,
        images: &["/img/lisbon/1.jpg", "/img/lisbon/2.jpg", "/img/lisbon/3.jpg"],
    },
    Tour {
        id: "douro-valley",
        title: "Douro Valley Wine Route",
        region: "Porto",
        days: 5,
        price_eur: 1240,
        images: &[
            "/img/douro/1.jpg",
            "/img/douro/2.jpg",
            "/img/douro/3.jpg",
            "/img/douro/4.jpg",
        ],
    },
    Tour {
        id: "algarve-coast",
        title: "Algarve Coastal Walks",
        region: "Algarve",
        days: 6,
        price_eur: 1390,
        images: &["/img/algarve/1.jpg", "/img/algarve/2.jpg"],
    },
    Tour {
        id: "azores-volcanoes",
        title: "Azores Volcanoes & Lakes",
        region: "Azores",
        days: 7,
        price_eur: 1880,
        images: &["/img/azores/1.jpg"],
    },
];

#[must_use]
pub fn tours() -> &'static [Tour] {
    TOURS
}

/// Every tour image, in listing order, as gallery media.
#[must_use]
pub fn gallery() -> Vec<MediaRef> {
    TOURS
        .iter()
        .flat_map(|tour| {
            tour.images.iter().enumerate().map(move |(i, src)| {
                MediaRef::image(*src, format!("{} photo {}", tour.title, i + 1))
                    .with_fallback("/img/placeholder.jpg")
            })
        })
        .collect()
}

/// Testimonial quotes: `(author, text)`.
pub const TESTIMONIALS: &[(&str, &str)] = &[
    ("Marta, Madrid", "Every day was better planned than the last."),
    ("Tom, Leeds", "The Douro tastings alone were worth the trip."),
    ("Ines, Lyon", "Small groups, great guides, no rush."),
];

#![forbid(unsafe_code)]

//! Platform capability flags.
//!
//! The host checks its environment once at startup and records which
//! platform services exist. Consumers never fail closed on a missing
//! capability: content stays visible and motion stays enabled.
//!
//! | Capability | Missing means |
//! |------------|---------------|
//! | `intersection_observer` | Every observed element is treated as visible |
//! | `match_media` | The OS reduced-motion preference reads as `false` |
//! | `durable_storage` | The user override lives for the session only |

/// Which platform services are available to the core.
///
/// # Example
///
/// ```
/// use wfx_core::capabilities::PlatformCapabilities;
///
/// // Modern browser
/// let caps = PlatformCapabilities::full();
/// assert!(caps.intersection_observer);
///
/// // Locked-down embed: no storage
/// let caps = PlatformCapabilities {
///     durable_storage: false,
///     ..PlatformCapabilities::full()
/// };
/// assert!(!caps.durable_storage);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCapabilities {
    /// Viewport-intersection notifications are available.
    pub intersection_observer: bool,
    /// Media queries (and their change notifications) are available.
    pub match_media: bool,
    /// Durable key/value client storage is writable.
    pub durable_storage: bool,
}

impl PlatformCapabilities {
    /// Every capability present.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            intersection_observer: true,
            match_media: true,
            durable_storage: true,
        }
    }

    /// No capability present (the most degraded environment).
    #[must_use]
    pub const fn none() -> Self {
        Self {
            intersection_observer: false,
            match_media: false,
            durable_storage: false,
        }
    }

    /// Whether any capability is missing.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        !(self.intersection_observer && self.match_media && self.durable_storage)
    }
}

impl Default for PlatformCapabilities {
    fn default() -> Self {
        Self::full()
    }
}

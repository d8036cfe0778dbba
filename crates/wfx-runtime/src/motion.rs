#![forbid(unsafe_code)]

//! Reduced-motion preference.
//!
//! [`ReducedMotionSignal`] combines the OS-level `prefers-reduced-motion`
//! query with a user toggle that is persisted in client storage:
//!
//! ```text
//! effective = system_prefers_reduced || user_override
//! ```
//!
//! `effective()` reads through a [`Binding`] over the two inputs, so it is
//! recomputed on every call. The signal also keeps an `Observable<bool>`
//! mirror of the effective value, but only to drive change notification;
//! nothing reads through it.
//!
//! # Lifecycle
//!
//! One signal per page: the host builds it once with
//! [`ReducedMotionSignal::init`] and installs it with
//! [`ReducedMotionSignal::install_global`]. There is no teardown. Consumers
//! that only need the flag use [`prefers_reduced_motion`].
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | OS query unsupported | `system_prefers_reduced() == false` (motion on) |
//! | Stored value unreadable | Override treated as `false` |
//! | Stored value not `"true"`/`"false"` | Override treated as `false` |
//! | Storage write fails | Value kept in memory, `is_session_only() == true` |

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};
use wfx_core::PlatformCapabilities;

use crate::config::{DEFAULT_OVERRIDE_KEY, MotionPolicy};
use crate::reactive::{Binding, Observable, Subscription, bind_mapped2};
use crate::storage::{ClientStorage, MemoryStorage};

thread_local! {
    static GLOBAL_SIGNAL: RefCell<Option<ReducedMotionSignal>> = const { RefCell::new(None) };
}

/// Page-wide reduced-motion preference.
///
/// Cloning yields another handle to the same signal.
#[derive(Clone)]
pub struct ReducedMotionSignal {
    system: Observable<bool>,
    user_override: Observable<bool>,
    effective: Observable<bool>,
    reduced: Binding<bool>,
    storage: Rc<RefCell<Box<dyn ClientStorage>>>,
    key: Rc<str>,
    session_only: Rc<Cell<bool>>,
}

impl std::fmt::Debug for ReducedMotionSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReducedMotionSignal")
            .field("system", &self.system.get())
            .field("user_override", &self.user_override.get())
            .field("key", &self.key)
            .field("session_only", &self.session_only.get())
            .finish()
    }
}

impl ReducedMotionSignal {
    /// Build the signal from the OS query result and durable storage.
    ///
    /// `system` is `None` when the platform has no media-query support.
    pub fn init(system: Option<bool>, storage: impl ClientStorage + 'static) -> Self {
        Self::init_with_key(system, storage, DEFAULT_OVERRIDE_KEY)
    }

    /// Like [`init`](Self::init), reading the storage key from a policy.
    pub fn from_policy(
        policy: &MotionPolicy,
        system: Option<bool>,
        storage: impl ClientStorage + 'static,
    ) -> Self {
        Self::init_with_key(system, storage, &policy.storage_key)
    }

    /// Build the signal from the host's capability record.
    ///
    /// Without `match_media` the OS preference reads as `false`. Without
    /// `durable_storage` the override starts `false`, lives in memory, and
    /// `storage` is never touched.
    pub fn from_capabilities(
        caps: &PlatformCapabilities,
        system: bool,
        storage: impl ClientStorage + 'static,
    ) -> Self {
        let system = caps.match_media.then_some(system);
        if caps.durable_storage {
            return Self::init(system, storage);
        }
        debug!("durable storage unavailable; reduced-motion override is session only");
        let signal = Self::init(system, MemoryStorage::new());
        signal.session_only.set(true);
        signal
    }

    /// Build the signal, persisting the override under `key`.
    pub fn init_with_key(
        system: Option<bool>,
        storage: impl ClientStorage + 'static,
        key: &str,
    ) -> Self {
        let system = system.unwrap_or_else(|| {
            warn!("prefers-reduced-motion query unsupported; motion stays enabled");
            false
        });

        let mut session_only = false;
        let user_override = match storage.get(key) {
            Ok(Some(raw)) => parse_stored(key, &raw),
            Ok(None) => false,
            Err(err) => {
                warn!(key, error = %err, "reduced-motion override unreadable; session only");
                session_only = true;
                false
            }
        };

        debug!(system, user_override, "reduced-motion signal initialized");
        let system = Observable::new(system);
        let user_override = Observable::new(user_override);
        let reduced = bind_mapped2(&system, &user_override, |s, u| *s || *u);
        Self {
            effective: Observable::new(reduced.get()),
            system,
            user_override,
            reduced,
            storage: Rc::new(RefCell::new(Box::new(storage))),
            key: Rc::from(key),
            session_only: Rc::new(Cell::new(session_only)),
        }
    }

    /// Whether motion should be reduced right now.
    #[must_use]
    pub fn effective(&self) -> bool {
        self.reduced.get()
    }

    /// A detached read handle on the effective value.
    #[must_use]
    pub fn binding(&self) -> Binding<bool> {
        self.reduced.clone()
    }

    /// The OS-level preference as last reported.
    #[must_use]
    pub fn system_prefers_reduced(&self) -> bool {
        self.system.get()
    }

    /// The user's explicit toggle.
    #[must_use]
    pub fn user_override(&self) -> bool {
        self.user_override.get()
    }

    /// Whether the override lives in memory only, because storage failed
    /// or is unavailable.
    #[must_use]
    pub fn is_session_only(&self) -> bool {
        self.session_only.get()
    }

    /// Storage key the override is persisted under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Set and persist the user's override.
    ///
    /// The new value is visible to every consumer before this returns,
    /// whether or not the write succeeded.
    pub fn set_user_override(&self, value: bool) {
        self.user_override.set(value);
        let written = self
            .storage
            .borrow_mut()
            .set(&self.key, if value { "true" } else { "false" });
        if let Err(err) = written {
            warn!(
                key = %self.key,
                error = %err,
                "reduced-motion override not persisted; session only"
            );
            self.session_only.set(true);
        }
        debug!(value, "reduced-motion override set");
        self.refresh();
    }

    /// Flip the user's override.
    pub fn toggle_user_override(&self) {
        self.set_user_override(!self.user_override());
    }

    /// Platform change notification for the OS query.
    pub fn set_system_preference(&self, value: bool) {
        debug!(value, "system reduced-motion preference changed");
        self.system.set(value);
        self.refresh();
    }

    /// Register a callback fired synchronously whenever the effective value
    /// changes.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(bool) + 'static) -> Subscription {
        self.effective.subscribe(move |v| callback(*v))
    }

    /// Number of effective-change notifications sent so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.effective.version()
    }

    fn refresh(&self) {
        self.effective.set(self.effective());
    }

    /// Make `signal` the page-wide instance for this thread.
    pub fn install_global(signal: ReducedMotionSignal) {
        GLOBAL_SIGNAL.with(|slot| *slot.borrow_mut() = Some(signal));
    }

    /// The page-wide instance.
    ///
    /// When nothing was installed, a motion-enabled signal with in-memory
    /// storage is created and installed.
    #[must_use]
    pub fn global() -> Self {
        GLOBAL_SIGNAL.with(|slot| {
            slot.borrow_mut()
                .get_or_insert_with(|| Self::init(Some(false), MemoryStorage::new()))
                .clone()
        })
    }
}

fn parse_stored(key: &str, raw: &str) -> bool {
    match raw {
        "true" => true,
        "false" => false,
        other => {
            warn!(key, value = other, "unrecognized reduced-motion override; ignoring");
            false
        }
    }
}

/// Convenience: read the global effective preference.
#[must_use]
pub fn prefers_reduced_motion() -> bool {
    ReducedMotionSignal::global().effective()
}

/// Convenience: set the global user override.
pub fn set_reduced_motion_override(value: bool) {
    ReducedMotionSignal::global().set_user_override(value);
}

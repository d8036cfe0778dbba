#![forbid(unsafe_code)]

//! Motion policy: every tunable default of the orchestration layer.
//!
//! [`MotionPolicy::default()`] reproduces the site's shipped behavior. With
//! the `policy-config` feature the policy can also be loaded from TOML or
//! JSON; fields left out of the document keep their defaults.
//!
//! ```toml
//! storage_key = "wayfarer.reducedMotion"
//!
//! [reveal]
//! threshold = 0.2
//! root_margin = "0px 0px -80px 0px"
//!
//! [carousel]
//! interval_ms = 6000
//! ```
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Unreadable file | `ConfigError::Io` |
//! | Syntax error | `ConfigError::Parse` |
//! | Out-of-range value | `ConfigError::Invalid` (nothing is clamped silently) |
//! | Unknown extension | `ConfigError::UnsupportedFormat` |

use wfx_core::geometry::RootMargin;

/// Upper bound on the collapsed duration, in seconds.
pub const MAX_REDUCED_MOTION_DURATION: f32 = 0.01;

/// Largest accepted `lightbox.preload_radius`.
pub const MAX_PRELOAD_RADIUS: usize = 16;

/// Default storage key for the user's reduced-motion override.
pub const DEFAULT_OVERRIDE_KEY: &str = "wayfarer.reducedMotion";

/// Errors from policy loading and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The policy file could not be read.
    Io(String),
    /// The document did not parse.
    Parse(String),
    /// A value is outside its allowed range.
    Invalid(String),
    /// The file extension is neither `.toml` nor `.json`.
    UnsupportedFormat(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "failed to read motion policy: {msg}"),
            Self::Parse(msg) => write!(f, "failed to parse motion policy: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid motion policy: {msg}"),
            Self::UnsupportedFormat(ext) => {
                write!(f, "unsupported motion policy format '{ext}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Scroll-reveal defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RevealPolicy {
    /// Fraction of the element that must be visible, in `[0, 1]`.
    pub threshold: f32,
    /// CSS-style root margin applied to the viewport.
    pub root_margin: String,
    /// Stop observing after the first reveal.
    pub trigger_once: bool,
    /// Seconds between successive children of a stagger container.
    pub stagger_children: f32,
    /// Seconds before the first child of a stagger container starts.
    pub delay_children: f32,
}

impl Default for RevealPolicy {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            trigger_once: true,
            stagger_children: 0.1,
            delay_children: 0.2,
        }
    }
}

/// Carousel defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CarouselPolicy {
    /// Auto-advance interval; `0` disables auto-advance.
    pub interval_ms: u64,
    /// Duration of the slide/snap transition.
    pub snap_duration_ms: u64,
    /// Release velocity (px/ms) that counts as a flick.
    pub swipe_velocity: f32,
    /// Pause auto-advance while the pointer hovers the carousel.
    pub pause_on_hover: bool,
}

impl Default for CarouselPolicy {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            snap_duration_ms: 500,
            swipe_velocity: 0.5,
            pause_on_hover: true,
        }
    }
}

/// Lightbox defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LightboxPolicy {
    /// How many neighbors on each side to preload. At most
    /// [`MAX_PRELOAD_RADIUS`].
    pub preload_radius: usize,
    /// Open/close/slide transition.
    pub transition_ms: u64,
}

impl Default for LightboxPolicy {
    fn default() -> Self {
        Self {
            preload_radius: 1,
            transition_ms: 300,
        }
    }
}

/// Top-level motion policy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MotionPolicy {
    /// Storage key for the persisted override.
    pub storage_key: String,
    /// Duration (seconds) every transition collapses to under reduced
    /// motion. Must be in `(0, 0.01]`. Read by the motion catalog and the
    /// widget configs' `from_motion_policy`.
    pub reduced_motion_duration: f32,
    pub reveal: RevealPolicy,
    pub carousel: CarouselPolicy,
    pub lightbox: LightboxPolicy,
}

impl Default for MotionPolicy {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_OVERRIDE_KEY.to_string(),
            reduced_motion_duration: MAX_REDUCED_MOTION_DURATION,
            reveal: RevealPolicy::default(),
            carousel: CarouselPolicy::default(),
            lightbox: LightboxPolicy::default(),
        }
    }
}

impl MotionPolicy {
    /// Check every range constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key is empty".into()));
        }
        let d = self.reduced_motion_duration;
        if !(d > 0.0 && d <= MAX_REDUCED_MOTION_DURATION) {
            return Err(ConfigError::Invalid(format!(
                "reduced_motion_duration {d} outside (0, {MAX_REDUCED_MOTION_DURATION}]"
            )));
        }
        let t = self.reveal.threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(ConfigError::Invalid(format!(
                "reveal.threshold {t} outside [0, 1]"
            )));
        }
        RootMargin::parse(&self.reveal.root_margin)
            .map_err(|e| ConfigError::Invalid(format!("reveal.root_margin: {e}")))?;
        for (name, v) in [
            ("reveal.stagger_children", self.reveal.stagger_children),
            ("reveal.delay_children", self.reveal.delay_children),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(ConfigError::Invalid(format!("{name} {v} must be >= 0")));
            }
        }
        let v = self.carousel.swipe_velocity;
        if !(v.is_finite() && v > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "carousel.swipe_velocity {v} must be > 0"
            )));
        }
        let r = self.lightbox.preload_radius;
        if r > MAX_PRELOAD_RADIUS {
            return Err(ConfigError::Invalid(format!(
                "lightbox.preload_radius {r} above {MAX_PRELOAD_RADIUS}"
            )));
        }
        Ok(())
    }
}

#[cfg(feature = "policy-config")]
impl MotionPolicy {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let policy: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let policy: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("json") => Self::from_json_str(&text),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

#![forbid(unsafe_code)]

//! Input events delivered by the host.
//!
//! Only the subset of input the interaction engines react to is modeled:
//! navigation keys and pointer gestures. Hosts map their native events
//! (DOM `KeyboardEvent`, `PointerEvent`) onto these types.

use bitflags::bitflags;

use crate::element::ElementId;
use crate::geometry::Point;

bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const SUPER = 0b1000;
    }
}

/// Key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Tab,
    /// Shift+Tab as reported by hosts that fold the modifier into the key.
    BackTab,
    Enter,
    Escape,
    Space,
    Char(char),
}

/// Press/repeat/release phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

/// A single keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A plain key press with no modifiers.
    #[must_use]
    pub const fn press(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }

    /// Replace the modifier state.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replace the event kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Press or auto-repeat (releases are ignored by every engine).
    #[inline]
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Whether this is a reverse focus-cycling key (Shift+Tab or BackTab).
    #[must_use]
    pub fn is_back_tab(&self) -> bool {
        match self.code {
            KeyCode::BackTab => true,
            KeyCode::Tab => self.modifiers.contains(Modifiers::SHIFT),
            _ => false,
        }
    }

    /// Whether this is any focus-cycling key.
    #[must_use]
    pub fn is_tab(&self) -> bool {
        matches!(self.code, KeyCode::Tab | KeyCode::BackTab)
    }
}

/// Which part of an overlay a pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    /// Outside any overlay region.
    #[default]
    None,
    /// The dimmed backdrop behind modal content.
    Backdrop,
    /// The media/content area.
    Content,
    /// An interactive control.
    Control(ElementId),
}

/// Pointer gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
    Enter,
    Leave,
}

/// A pointer (mouse, touch, pen) event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
    pub hit: HitRegion,
}

impl PointerEvent {
    /// Create a pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, position: Point, hit: HitRegion) -> Self {
        Self {
            kind,
            position,
            hit,
        }
    }
}

/// Any input event the engines consume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Key(KeyEvent),
    Pointer(PointerEvent),
}

impl From<KeyEvent> for Event {
    fn from(key: KeyEvent) -> Self {
        Self::Key(key)
    }
}

impl From<PointerEvent> for Event {
    fn from(pointer: PointerEvent) -> Self {
        Self::Pointer(pointer)
    }
}

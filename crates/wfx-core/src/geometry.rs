#![forbid(unsafe_code)]

//! Viewport geometry: points, rectangles, and root margins.
//!
//! All coordinates are CSS pixels in viewport space (`f32`).
//!
//! # Root margins
//!
//! A [`RootMargin`] grows (positive) or shrinks (negative) the viewport
//! before an intersection test, so an element can be reported visible
//! before it scrolls on screen or only once it is well inside. The string
//! form is the CSS `margin` shorthand restricted to `px` and `%` lengths:
//!
//! | Input | Top | Right | Bottom | Left |
//! |-------|-----|-------|--------|------|
//! | `"50px"` | 50px | 50px | 50px | 50px |
//! | `"10px 5%"` | 10px | 5% | 10px | 5% |
//! | `"0px 0px -100px"` | 0 | 0 | −100px | 0 |
//! | `"1px 2px 3px 4px"` | 1px | 2px | 3px | 4px |
//!
//! Percentages resolve against the root's height (top/bottom) or width
//! (left/right).

use std::str::FromStr;

/// A point in viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Component-wise offset.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle in viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    #[must_use]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    #[must_use]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Area in square pixels (never negative).
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Whether the rectangle has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether the point lies inside (edges inclusive).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Overlapping region, or `None` when the overlap has no area.
    #[must_use]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right > x && bottom > y {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Grow each edge outward by the given amounts (negative shrinks).
    ///
    /// Width and height are clamped at zero.
    #[must_use]
    pub fn outset(&self, top: f32, right: f32, bottom: f32, left: f32) -> Rect {
        Rect::new(
            self.x - left,
            self.y - top,
            (self.width + left + right).max(0.0),
            (self.height + top + bottom).max(0.0),
        )
    }
}

/// A single margin component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute CSS pixels.
    Px(f32),
    /// Percentage of the root dimension along the same axis.
    Percent(f32),
}

impl Length {
    /// Resolve to pixels against a root dimension.
    #[must_use]
    pub fn resolve(self, basis: f32) -> f32 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => basis * pct / 100.0,
        }
    }

    fn parse(token: &str) -> Result<Self, RootMarginError> {
        let invalid = || RootMarginError::InvalidLength(token.to_string());
        if let Some(num) = token.strip_suffix("px") {
            let value = num.parse::<f32>().map_err(|_| invalid())?;
            finite(value).map(Self::Px).ok_or_else(invalid)
        } else if let Some(num) = token.strip_suffix('%') {
            let value = num.parse::<f32>().map_err(|_| invalid())?;
            finite(value).map(Self::Percent).ok_or_else(invalid)
        } else if token.parse::<f32>().is_ok_and(|v| v == 0.0) {
            // Unitless zero is the only unitless length CSS accepts.
            Ok(Self::Px(0.0))
        } else {
            Err(invalid())
        }
    }
}

fn finite(value: f32) -> Option<f32> {
    value.is_finite().then_some(value)
}

/// Errors from root-margin parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootMarginError {
    /// The margin string had no components.
    Empty,
    /// More than four components.
    TooManyComponents(usize),
    /// A component was not a `px`/`%` length.
    InvalidLength(String),
}

impl std::fmt::Display for RootMarginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "root margin is empty"),
            Self::TooManyComponents(n) => {
                write!(f, "root margin has {n} components (at most 4 allowed)")
            }
            Self::InvalidLength(token) => {
                write!(f, "invalid root margin length '{token}' (expected px or %)")
            }
        }
    }
}

impl std::error::Error for RootMarginError {}

/// Offsets applied to the viewport before an intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl RootMargin {
    /// No offset.
    pub const ZERO: Self = Self::uniform(Length::Px(0.0));

    /// The same length on every edge.
    #[must_use]
    pub const fn uniform(length: Length) -> Self {
        Self {
            top: length,
            right: length,
            bottom: length,
            left: length,
        }
    }

    /// Parse the CSS shorthand form (see the module docs).
    pub fn parse(input: &str) -> Result<Self, RootMarginError> {
        let parts = input
            .split_whitespace()
            .map(Length::parse)
            .collect::<Result<Vec<_>, _>>()?;

        match parts.as_slice() {
            [] => Err(RootMarginError::Empty),
            [all] => Ok(Self::uniform(*all)),
            [vertical, horizontal] => Ok(Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, horizontal, bottom] => Ok(Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            }),
            [top, right, bottom, left] => Ok(Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            more => Err(RootMarginError::TooManyComponents(more.len())),
        }
    }

    /// Apply the margin to a root rectangle.
    #[must_use]
    pub fn apply(&self, root: Rect) -> Rect {
        root.outset(
            self.top.resolve(root.height),
            self.right.resolve(root.width),
            self.bottom.resolve(root.height),
            self.left.resolve(root.width),
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for RootMargin {
    type Err = RootMarginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ── Rect ────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
    }

    #[test]
    fn intersect_touching_edges_is_none() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(100.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), None);
    }

    #[test]
    fn outset_clamps_negative_size() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).outset(-20.0, 0.0, 0.0, 0.0);
        assert_eq!(r.height, 0.0);
        assert!(r.is_empty());
    }

    #[test]
    fn contains_edges() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(!r.contains(Point::new(10.1, 5.0)));
    }

    // ── RootMargin parsing ──────────────────────────────────────────

    #[test]
    fn parse_single_value() {
        let m = RootMargin::parse("50px").unwrap();
        assert_eq!(m, RootMargin::uniform(Length::Px(50.0)));
    }

    #[test]
    fn parse_two_values() {
        let m = RootMargin::parse("10px 5%").unwrap();
        assert_eq!(m.top, Length::Px(10.0));
        assert_eq!(m.bottom, Length::Px(10.0));
        assert_eq!(m.left, Length::Percent(5.0));
        assert_eq!(m.right, Length::Percent(5.0));
    }

    #[test]
    fn parse_three_values() {
        let m = RootMargin::parse("0px 0px -100px").unwrap();
        assert_eq!(m.bottom, Length::Px(-100.0));
        assert_eq!(m.left, Length::Px(0.0));
    }

    #[test]
    fn parse_four_values_and_unitless_zero() {
        let m = RootMargin::parse(" 1px 2px 0 4px ").unwrap();
        assert_eq!(m.top, Length::Px(1.0));
        assert_eq!(m.right, Length::Px(2.0));
        assert_eq!(m.bottom, Length::Px(0.0));
        assert_eq!(m.left, Length::Px(4.0));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(RootMargin::parse("   "), Err(RootMarginError::Empty));
        assert_eq!(
            RootMargin::parse("1px 1px 1px 1px 1px"),
            Err(RootMarginError::TooManyComponents(5))
        );
        assert!(matches!(
            RootMargin::parse("50em"),
            Err(RootMarginError::InvalidLength(_))
        ));
        assert!(matches!(
            RootMargin::parse("12"),
            Err(RootMarginError::InvalidLength(_))
        ));
        assert!(matches!(
            RootMargin::parse("NaNpx"),
            Err(RootMarginError::InvalidLength(_))
        ));
    }

    #[test]
    fn error_display() {
        let err = RootMargin::parse("3em").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid root margin length '3em' (expected px or %)"
        );
    }

    #[test]
    fn apply_grows_and_shrinks() {
        let root = Rect::new(0.0, 0.0, 800.0, 600.0);
        let grown = RootMargin::parse("50px").unwrap().apply(root);
        assert_eq!(grown, Rect::new(-50.0, -50.0, 900.0, 700.0));

        let shrunk = RootMargin::parse("0px 0px -100px 0px").unwrap().apply(root);
        assert_eq!(shrunk, Rect::new(0.0, 0.0, 800.0, 500.0));
    }

    #[test]
    fn apply_percent_uses_axis_basis() {
        let root = Rect::new(0.0, 0.0, 1000.0, 500.0);
        let m = RootMargin::parse("10%").unwrap().apply(root);
        // 10% of height vertically, 10% of width horizontally
        assert_eq!(m, Rect::new(-100.0, -50.0, 1200.0, 600.0));
    }

    proptest! {
        #[test]
        fn parse_never_panics(input in "\\PC{0,32}") {
            let _ = RootMargin::parse(&input);
        }

        #[test]
        fn uniform_px_round_trips(v in -500i32..500) {
            let parsed = RootMargin::parse(&format!("{v}px")).unwrap();
            prop_assert_eq!(parsed, RootMargin::uniform(Length::Px(v as f32)));
        }
    }
}

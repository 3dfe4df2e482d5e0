//! Sightline Geometry
//!
//! Platform-agnostic screen geometry model and window visibility engine.
//!
//! This crate holds everything that does not touch a windowing system:
//! - Rectangles and points in the shared top-left-origin screen space
//! - Coordinate-space conversions against the global display bounding box
//! - The occlusion fold that turns a front-to-back window list into
//!   per-window visible-area ratios

use serde::{Deserialize, Serialize};

pub mod space;
pub mod visibility;

pub use space::{
    point_from_screen, point_to_screen, rect_from_screen, rect_to_screen, CoordSpace,
    GlobalBounds,
};
pub use visibility::{compute_visibility, WindowVisibility};

/// Unique identifier for a window.
/// Stable for the lifetime of the window; external trackers use it as a join key.
pub type WindowId = u64;

/// A point in pixels. The coordinate space is whatever produced it;
/// see [`space`] for conversions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle in pixels, origin at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Area in square pixels. Zero for degenerate rectangles.
    pub fn area(&self) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            self.width * self.height
        }
    }

    /// A degenerate rectangle has no extent in at least one dimension.
    /// Degenerate windows carry no area and never occlude anything.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// True when all four components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Check whether a point falls inside this rectangle.
    /// Edges are half-open: the left/top edge is inside, the right/bottom is not.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.left + self.width
            && point.y >= self.top
            && point.y < self.top + self.height
    }

    /// Check if this rectangle intersects with another.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.left + other.width
            && self.left + self.width > other.left
            && self.top < other.top + other.height
            && self.top + self.height > other.top
    }
}

/// One window as reported by a backend enumeration.
///
/// `bounds` is always present for on-screen results; all-scope results may
/// report `None` for windows with degenerate geometry. `z_index` is the
/// front-to-back position among on-screen windows (0 = frontmost); for
/// all-scope results it is just the enumeration position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    /// Backend-assigned window identifier.
    pub id: WindowId,
    /// Owning application name (e.g. "Safari", "firefox").
    pub owner: String,
    /// Window title, empty if the backend reports none.
    pub title: String,
    /// Bounds in screen space (top-left origin).
    pub bounds: Option<Rect>,
    /// Backend window level. 0 on backends without a level concept.
    pub layer: i32,
    /// Position in the enumeration this record came from.
    pub z_index: usize,
}

impl WindowRecord {
    /// Bounds usable for visibility accounting, if any.
    /// Filters out absent, non-finite, and degenerate geometry in one step.
    pub fn solid_bounds(&self) -> Option<Rect> {
        match self.bounds {
            Some(r) if r.is_finite() && !r.is_degenerate() => Some(r),
            _ => None,
        }
    }
}

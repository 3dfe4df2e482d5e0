//! Coordinate-space conversions.
//!
//! Two conventions coexist across windowing backends: the shared "screen"
//! space with the origin at the top-left of the combined display area, and
//! the Quartz-style "device" space with y growing upward from the bottom.
//! Converting between them only needs the vertical extent of the global
//! display bounding box, so every conversion here takes a [`GlobalBounds`]
//! computed no earlier than the value being converted.

use serde::{Deserialize, Serialize};

use crate::{Point, Rect};

/// Origin convention a coordinate value was produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordSpace {
    /// y = 0 at the top of the combined display area, growing downward.
    ScreenTopLeft,
    /// y = 0 at the bottom of the combined display area, growing upward.
    DeviceBottomLeft,
}

/// Minimal enclosing rectangle over all monitors, as edge coordinates.
///
/// Recomputed from a fresh monitor list on every query; displays can be
/// attached or detached at any time, so holding one across calls is wrong.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl GlobalBounds {
    /// Fold monitor rectangles into their minimal enclosing bounds.
    /// Zero monitors yield the empty bounds (see [`GlobalBounds::is_empty`]).
    pub fn from_monitors(monitors: &[Rect]) -> Self {
        let mut bounds = Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for m in monitors {
            bounds.min_x = bounds.min_x.min(m.left);
            bounds.min_y = bounds.min_y.min(m.top);
            bounds.max_x = bounds.max_x.max(m.right());
            bounds.max_y = bounds.max_y.max(m.bottom());
        }
        bounds
    }

    /// True when no monitor contributed, i.e. the edges never collapsed
    /// from their infinite starting values. Callers should treat this as
    /// a configuration problem, not a geometry result.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Convert a rectangle from `space` into screen space (top-left origin).
///
/// For device space the vertical axis flips around the global bounds:
/// `screen_top = max_y - device_y - height`. X is never altered, and
/// screen-to-screen is the identity so no-op backends can route through
/// the same call.
pub fn rect_to_screen(rect: Rect, space: CoordSpace, bounds: &GlobalBounds) -> Rect {
    match space {
        CoordSpace::ScreenTopLeft => rect,
        CoordSpace::DeviceBottomLeft => Rect {
            left: rect.left,
            top: bounds.max_y - rect.top - rect.height,
            width: rect.width,
            height: rect.height,
        },
    }
}

/// Convert a rectangle from screen space back into `space`.
/// The device flip is its own inverse, so this mirrors [`rect_to_screen`].
pub fn rect_from_screen(rect: Rect, space: CoordSpace, bounds: &GlobalBounds) -> Rect {
    rect_to_screen(rect, space, bounds)
}

/// Convert a point from `space` into screen space (top-left origin).
/// Points carry no height term: `screen_y = max_y - device_y`.
pub fn point_to_screen(point: Point, space: CoordSpace, bounds: &GlobalBounds) -> Point {
    match space {
        CoordSpace::ScreenTopLeft => point,
        CoordSpace::DeviceBottomLeft => Point {
            x: point.x,
            y: bounds.max_y - point.y,
        },
    }
}

/// Convert a point from screen space back into `space`.
pub fn point_from_screen(point: Point, space: CoordSpace, bounds: &GlobalBounds) -> Point {
    point_to_screen(point, space, bounds)
}

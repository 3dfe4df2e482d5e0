//! Geometry half of the selection-overlay contract.
//!
//! An overlay lets the user pick recording targets and hands back regions
//! in screen space, each optionally tied to a window id. Rendering and
//! input handling live with the overlay; this module only provides the
//! region type and the full-screen fallback used when the backend cannot
//! offer individual windows for selection.

use serde::{Deserialize, Serialize};
use sightline_geometry::{Rect, WindowId, WindowRecord};

use crate::{BackendError, ScreenQuery};

/// One confirmed selection region in screen space.
///
/// `window` is set when the region was picked as a window, and `None` for
/// raw rectangles and full-screen fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedRegion {
    pub bounds: Rect,
    pub window: Option<WindowId>,
}

impl SelectedRegion {
    /// A raw rectangle selection with no associated window.
    pub fn raw(bounds: Rect) -> Self {
        Self {
            bounds,
            window: None,
        }
    }

    /// A selection of a specific window. `None` when the record carries no
    /// usable bounds.
    pub fn for_window(record: &WindowRecord) -> Option<Self> {
        record.bounds.map(|bounds| Self {
            bounds,
            window: Some(record.id),
        })
    }
}

/// One full-screen region per monitor, with no window association.
///
/// This is the selection set offered on capability-constrained backends:
/// the user can still pick whole displays when individual windows cannot
/// be enumerated.
pub fn full_screen_regions(query: &ScreenQuery) -> Result<Vec<SelectedRegion>, BackendError> {
    Ok(regions_from_monitors(&query.list_monitors()?))
}

fn regions_from_monitors(monitors: &[Rect]) -> Vec<SelectedRegion> {
    monitors.iter().map(|m| SelectedRegion::raw(*m)).collect()
}

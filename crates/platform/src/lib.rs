//! Sightline Platform
//!
//! Native windowing-system backends behind one query surface.
//!
//! This crate handles:
//! - Backend selection by host capability (Quartz, X11/EWMH, Wayland display-only)
//! - Monitor and window enumeration with denylist filtering
//! - Point-in-window and ID-in-window lookups
//! - The full-screen fallback geometry for selection overlays

use serde::{Deserialize, Serialize};
use sightline_geometry::{CoordSpace, Rect, WindowRecord};
use thiserror::Error;

mod denylist;
mod query;
pub mod selection;
pub mod session;

#[cfg(target_os = "macos")]
mod quartz;
#[cfg(target_os = "linux")]
mod x11;

pub use denylist::Denylist;
pub use query::ScreenQuery;
pub use selection::{full_screen_regions, SelectedRegion};
pub use session::{detect_display_server, DisplayServer};

/// Errors from native windowing queries.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The native query subsystem itself failed. No geometry it reports is
    /// trustworthy afterward, so callers should propagate this rather than
    /// substitute a default.
    #[error("Backend query failed: {0}")]
    Unavailable(String),

    /// No backend exists for this host. Raised once, at selection time.
    #[error("Platform not supported: {0}")]
    PlatformUnsupported(String),
}

/// Which windows an enumeration should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowScope {
    /// Currently on-screen windows, front to back (index 0 = frontmost).
    OnScreenOnly,
    /// Every window the backend knows about, including minimized and
    /// off-space ones. Ordering carries no stacking meaning.
    All,
}

/// Query support level of the selected backend.
///
/// Lets callers tell an empty window list apart from "this host cannot
/// answer window queries at all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityTier {
    /// Monitors, windows, stacking order, and lookups all work.
    Full,
    /// Only display enumeration works. Window queries return conservative
    /// defaults instead of failing: empty lists, assumed existence.
    DisplayOnly,
}

impl CapabilityTier {
    /// Whether window enumeration and lookups are meaningful on this tier.
    pub fn has_window_queries(&self) -> bool {
        matches!(self, CapabilityTier::Full)
    }
}

/// One native windowing backend.
///
/// Implementations re-query live state on every call; nothing is cached.
/// Calls are synchronous and must stay on the thread that created the
/// backend (the native bindings underneath are single-threaded-affine).
pub trait ScreenBackend {
    /// Short backend name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Query support level of this backend.
    fn tier(&self) -> CapabilityTier;

    /// The coordinate space this backend's native calls report in.
    /// Records returned by [`ScreenBackend::windows`] are always already
    /// converted to screen space; this tag is for collaborators feeding
    /// native input events through the conversion functions.
    fn native_space(&self) -> CoordSpace;

    /// Window level reserved for the system menu bar, if this backend has
    /// one. Windows on this level are skipped by point lookups.
    fn system_menu_layer(&self) -> Option<i32> {
        None
    }

    /// Current physical display rectangles in screen space.
    fn monitors(&self) -> Result<Vec<Rect>, BackendError>;

    /// Enumerate windows. On-screen results are front to back with bounds
    /// present; all-scope results may carry `None` bounds for windows with
    /// degenerate geometry. Denylisted owners never appear in either scope.
    fn windows(&self, scope: WindowScope) -> Result<Vec<WindowRecord>, BackendError>;
}

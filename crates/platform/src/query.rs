//! Backend selection and the query surface.
//!
//! [`ScreenQuery::detect`] picks the one backend for this process and hands
//! back a handle exposing every geometry query: monitors, global bounds,
//! window enumeration, visibility, and the point/ID lookups. The handle is
//! neither `Send` nor `Sync`; all queries stay on the thread that created
//! it, which is also the serialization the native bindings require.

use sightline_geometry::{
    compute_visibility, CoordSpace, GlobalBounds, Point, Rect, WindowId, WindowRecord,
    WindowVisibility,
};
use tracing::{debug, info, warn};

use crate::{BackendError, CapabilityTier, Denylist, ScreenBackend, WindowScope};

/// Selected backend plus the query operations built on top of it.
pub struct ScreenQuery {
    backend: Box<dyn ScreenBackend>,
}

impl ScreenQuery {
    /// Select the backend for this host with the platform-default denylist.
    ///
    /// Returns [`BackendError::PlatformUnsupported`] on hosts with no
    /// backend, and [`BackendError::Unavailable`] when the backend exists
    /// but its display connection cannot be established.
    pub fn detect() -> Result<Self, BackendError> {
        Self::detect_with(Denylist::host_default())
    }

    /// Select the backend for this host with an explicit denylist.
    pub fn detect_with(denylist: Denylist) -> Result<Self, BackendError> {
        let backend = select_backend(denylist)?;
        info!(
            "Selected {} backend ({:?} tier)",
            backend.name(),
            backend.tier()
        );
        Ok(Self { backend })
    }

    pub(crate) fn from_backend(backend: Box<dyn ScreenBackend>) -> Self {
        Self { backend }
    }

    /// Short name of the selected backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Query support level of the selected backend.
    pub fn capability(&self) -> CapabilityTier {
        self.backend.tier()
    }

    /// Coordinate space of the backend's native reports, for collaborators
    /// routing native input events through the conversion functions.
    pub fn native_space(&self) -> CoordSpace {
        self.backend.native_space()
    }

    /// Current physical display rectangles, re-queried on every call.
    pub fn list_monitors(&self) -> Result<Vec<Rect>, BackendError> {
        let monitors = self.backend.monitors()?;
        debug!("Enumerated {} monitors", monitors.len());
        Ok(monitors)
    }

    /// Minimal bounds enclosing all displays, from a fresh monitor query.
    ///
    /// Zero reported monitors yield the empty bounds value rather than an
    /// error; a warning is logged since that points at a configuration
    /// problem on the host.
    pub fn global_bounds(&self) -> Result<GlobalBounds, BackendError> {
        let monitors = self.backend.monitors()?;
        let bounds = GlobalBounds::from_monitors(&monitors);
        if bounds.is_empty() {
            warn!("Display enumeration returned no monitors");
        }
        Ok(bounds)
    }

    /// Enumerate windows in the given scope. See [`WindowScope`] for the
    /// ordering and bounds guarantees per scope.
    pub fn list_windows(&self, scope: WindowScope) -> Result<Vec<WindowRecord>, BackendError> {
        self.backend.windows(scope)
    }

    /// Visibility ratios for the current on-screen windows, front to back.
    ///
    /// On a display-only backend this is empty; combined with
    /// [`ScreenQuery::capability`] callers can tell that apart from a
    /// genuinely empty desktop.
    pub fn visible_windows(&self) -> Result<Vec<WindowVisibility>, BackendError> {
        let windows = self.list_windows(WindowScope::OnScreenOnly)?;
        Ok(compute_visibility(&windows))
    }

    /// Whether a window with this id currently exists, in any state.
    ///
    /// On a display-only backend existence cannot be verified, and the
    /// answer is a conservative `true`: a tracker must not conclude that a
    /// window closed just because the host cannot answer.
    pub fn window_exists(&self, id: WindowId) -> Result<bool, BackendError> {
        if !self.capability().has_window_queries() {
            debug!("Window queries unavailable; assuming window {} still exists", id);
            return Ok(true);
        }
        let windows = self.backend.windows(WindowScope::All)?;
        Ok(windows.iter().any(|w| w.id == id))
    }

    /// Bounds and owner of an on-screen window, or `None` when the window
    /// is minimized, on another space, or closed. A miss is a normal
    /// outcome, not an error.
    pub fn window_bounds(&self, id: WindowId) -> Result<Option<(Rect, String)>, BackendError> {
        Ok(self
            .list_windows(WindowScope::OnScreenOnly)?
            .into_iter()
            .find(|w| w.id == id)
            .and_then(|w| w.bounds.map(|b| (b, w.owner))))
    }

    /// Frontmost window containing the given screen-space point, skipping
    /// windows on the system menu level. `None` when nothing matches.
    pub fn topmost_at(&self, point: Point) -> Result<Option<(WindowId, String)>, BackendError> {
        let menu_layer = self.backend.system_menu_layer();
        for record in self.list_windows(WindowScope::OnScreenOnly)? {
            if menu_layer == Some(record.layer) {
                continue;
            }
            let Some(bounds) = record.bounds else {
                continue;
            };
            if bounds.contains(point) {
                return Ok(Some((record.id, record.owner)));
            }
        }
        Ok(None)
    }

    /// Whether any window owned by one of `owners` is at least partially
    /// visible right now. Matching is ASCII case-insensitive.
    pub fn is_owner_visible(&self, owners: &[&str]) -> Result<bool, BackendError> {
        let visible = self.visible_windows()?;
        Ok(visible
            .iter()
            .any(|v| owners.iter().any(|o| o.eq_ignore_ascii_case(&v.window.owner))))
    }
}

#[cfg(target_os = "macos")]
fn select_backend(denylist: Denylist) -> Result<Box<dyn ScreenBackend>, BackendError> {
    Ok(Box::new(crate::quartz::QuartzBackend::new(denylist)))
}

#[cfg(target_os = "linux")]
fn select_backend(denylist: Denylist) -> Result<Box<dyn ScreenBackend>, BackendError> {
    use crate::session::{detect_display_server, DisplayServer};

    match detect_display_server() {
        DisplayServer::Wayland => Ok(Box::new(crate::x11::WaylandBackend::connect()?)),
        // An unknown session gets the X11 attempt; its connection error
        // carries more detail than a guess here would.
        DisplayServer::X11 | DisplayServer::Unknown => {
            Ok(Box::new(crate::x11::X11Backend::connect(denylist)?))
        }
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn select_backend(_denylist: Denylist) -> Result<Box<dyn ScreenBackend>, BackendError> {
    Err(BackendError::PlatformUnsupported(
        std::env::consts::OS.to_string(),
    ))
}

//! X11 and Wayland backends (Linux).
//!
//! The X11 backend reads EWMH root properties over x11rb for window
//! enumeration and RandR for the monitor layout. `_NET_CLIENT_LIST_STACKING`
//! is published bottom to top, so the list is reversed before records are
//! handed out front to back.
//!
//! Wayland compositors expose no cross-client window list. The Wayland
//! backend rides XWayland for monitor geometry and reports the display-only
//! capability tier.

use x11rb::connection::Connection;
use x11rb::protocol::randr::ConnectionExt as _;
use x11rb::protocol::xproto::{AtomEnum, ConnectionExt as _, MapState, Window};
use x11rb::rust_connection::RustConnection;

use sightline_geometry::{CoordSpace, Rect, WindowRecord};
use tracing::{debug, warn};

use crate::{BackendError, CapabilityTier, Denylist, ScreenBackend, WindowScope};

x11rb::atom_manager! {
    Atoms:
    AtomsCookie {
        _NET_CLIENT_LIST,
        _NET_CLIENT_LIST_STACKING,
        _NET_WM_NAME,
        UTF8_STRING,
    }
}

fn x_err(err: impl std::fmt::Display) -> BackendError {
    BackendError::Unavailable(err.to_string())
}

fn connect() -> Result<(RustConnection, Window), BackendError> {
    let (conn, screen_num) = x11rb::connect(None).map_err(x_err)?;
    let root = conn.setup().roots[screen_num].root;
    Ok((conn, root))
}

fn randr_monitors(conn: &RustConnection, root: Window) -> Result<Vec<Rect>, BackendError> {
    let reply = conn
        .randr_get_monitors(root, true)
        .map_err(x_err)?
        .reply()
        .map_err(x_err)?;
    Ok(reply
        .monitors
        .iter()
        .map(|m| Rect::new(m.x as f64, m.y as f64, m.width as f64, m.height as f64))
        .collect())
}

/// WM_CLASS is two NUL-terminated strings, instance then class.
fn class_from_wm_class(value: &[u8]) -> Option<String> {
    let mut parts = value.split(|&b| b == 0).filter(|part| !part.is_empty());
    let instance = parts.next()?;
    let class = parts.next().unwrap_or(instance);
    Some(String::from_utf8_lossy(class).into_owned())
}

/// Full-capability backend over an X11 server.
pub struct X11Backend {
    conn: RustConnection,
    root: Window,
    atoms: Atoms,
    denylist: Denylist,
}

impl X11Backend {
    pub fn connect(denylist: Denylist) -> Result<Self, BackendError> {
        let (conn, root) = connect()?;
        let atoms = Atoms::new(&conn).map_err(x_err)?.reply().map_err(x_err)?;
        Ok(Self {
            conn,
            root,
            atoms,
            denylist,
        })
    }

    fn client_list(&self, stacking: bool) -> Result<Vec<Window>, BackendError> {
        let property = if stacking {
            self.atoms._NET_CLIENT_LIST_STACKING
        } else {
            self.atoms._NET_CLIENT_LIST
        };
        let reply = self
            .conn
            .get_property(false, self.root, property, AtomEnum::WINDOW, 0, u32::MAX)
            .map_err(x_err)?
            .reply()
            .map_err(x_err)?;
        Ok(reply.value32().map(|it| it.collect()).unwrap_or_default())
    }

    fn window_class(&self, window: Window) -> Option<String> {
        let reply = self
            .conn
            .get_property(false, window, AtomEnum::WM_CLASS, AtomEnum::STRING, 0, 1024)
            .ok()?
            .reply()
            .ok()?;
        class_from_wm_class(&reply.value)
    }

    fn window_title(&self, window: Window) -> Option<String> {
        let reply = self
            .conn
            .get_property(
                false,
                window,
                self.atoms._NET_WM_NAME,
                self.atoms.UTF8_STRING,
                0,
                1024,
            )
            .ok()?
            .reply()
            .ok()?;
        if !reply.value.is_empty() {
            return Some(String::from_utf8_lossy(&reply.value).into_owned());
        }
        let reply = self
            .conn
            .get_property(false, window, AtomEnum::WM_NAME, AtomEnum::STRING, 0, 1024)
            .ok()?
            .reply()
            .ok()?;
        if reply.value.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&reply.value).into_owned())
        }
    }

    fn window_bounds(&self, window: Window) -> Option<Rect> {
        let geom = self.conn.get_geometry(window).ok()?.reply().ok()?;
        let origin = self
            .conn
            .translate_coordinates(window, self.root, 0, 0)
            .ok()?
            .reply()
            .ok()?;
        Some(Rect::new(
            origin.dst_x as f64,
            origin.dst_y as f64,
            geom.width as f64,
            geom.height as f64,
        ))
    }

    fn is_viewable(&self, window: Window) -> bool {
        self.conn
            .get_window_attributes(window)
            .ok()
            .and_then(|cookie| cookie.reply().ok())
            .map(|attrs| attrs.map_state == MapState::VIEWABLE)
            .unwrap_or(false)
    }
}

impl ScreenBackend for X11Backend {
    fn name(&self) -> &'static str {
        "x11"
    }

    fn tier(&self) -> CapabilityTier {
        CapabilityTier::Full
    }

    fn native_space(&self) -> CoordSpace {
        CoordSpace::ScreenTopLeft
    }

    fn monitors(&self) -> Result<Vec<Rect>, BackendError> {
        let rects = randr_monitors(&self.conn, self.root)?;
        debug!("RandR reported {} monitors", rects.len());
        Ok(rects)
    }

    fn windows(&self, scope: WindowScope) -> Result<Vec<WindowRecord>, BackendError> {
        let ids = match scope {
            WindowScope::OnScreenOnly => {
                // Stacking order arrives bottom to top.
                let mut ids = self.client_list(true)?;
                ids.reverse();
                ids
            }
            WindowScope::All => self.client_list(false)?,
        };

        let mut records = Vec::new();
        for id in ids {
            let Some(owner) = self.window_class(id) else {
                warn!("Skipping window 0x{:x} without a readable class", id);
                continue;
            };
            if self.denylist.contains(&owner) {
                continue;
            }
            if scope == WindowScope::OnScreenOnly && !self.is_viewable(id) {
                continue;
            }
            let bounds = match self.window_bounds(id) {
                Some(rect) if rect.is_finite() && !rect.is_degenerate() => Some(rect),
                _ if scope == WindowScope::OnScreenOnly => continue,
                _ => None,
            };
            records.push(WindowRecord {
                id: id as u64,
                owner,
                title: self.window_title(id).unwrap_or_default(),
                bounds,
                layer: 0,
                z_index: records.len(),
            });
        }
        debug!("Enumerated {} windows ({:?})", records.len(), scope);
        Ok(records)
    }
}

/// Display-only backend for Wayland sessions.
pub struct WaylandBackend {
    conn: RustConnection,
    root: Window,
}

impl WaylandBackend {
    pub fn connect() -> Result<Self, BackendError> {
        let (conn, root) = connect()?;
        Ok(Self { conn, root })
    }
}

impl ScreenBackend for WaylandBackend {
    fn name(&self) -> &'static str {
        "wayland"
    }

    fn tier(&self) -> CapabilityTier {
        CapabilityTier::DisplayOnly
    }

    fn native_space(&self) -> CoordSpace {
        CoordSpace::ScreenTopLeft
    }

    fn monitors(&self) -> Result<Vec<Rect>, BackendError> {
        let rects = randr_monitors(&self.conn, self.root)?;
        debug!("RandR reported {} monitors via XWayland", rects.len());
        Ok(rects)
    }

    fn windows(&self, _scope: WindowScope) -> Result<Vec<WindowRecord>, BackendError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wm_class_takes_class_component() {
        let raw = b"navigator\0Firefox\0";
        assert_eq!(class_from_wm_class(raw), Some("Firefox".to_string()));
    }

    #[test]
    fn test_wm_class_single_component_falls_back_to_instance() {
        let raw = b"polybar\0";
        assert_eq!(class_from_wm_class(raw), Some("polybar".to_string()));
    }

    #[test]
    fn test_wm_class_empty_value() {
        assert_eq!(class_from_wm_class(b""), None);
        assert_eq!(class_from_wm_class(b"\0\0"), None);
    }
}

//! Display-server session detection.
//!
//! On Linux the backend choice depends on whether the session runs X11 or
//! Wayland. Three environment variables answer that, checked in order of
//! reliability: `XDG_SESSION_TYPE`, `WAYLAND_DISPLAY`, `DISPLAY`.

/// Kind of display server serving the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    X11,
    Wayland,
    Unknown,
}

/// Detect the display server from the process environment.
pub fn detect_display_server() -> DisplayServer {
    classify(
        std::env::var("XDG_SESSION_TYPE").ok().as_deref(),
        std::env::var("WAYLAND_DISPLAY").ok().as_deref(),
        std::env::var("DISPLAY").ok().as_deref(),
    )
}

fn classify(
    session_type: Option<&str>,
    wayland_display: Option<&str>,
    display: Option<&str>,
) -> DisplayServer {
    if let Some(session_type) = session_type {
        match session_type.to_ascii_lowercase().as_str() {
            "wayland" => return DisplayServer::Wayland,
            "x11" => return DisplayServer::X11,
            _ => {}
        }
    }

    if wayland_display.is_some_and(|v| !v.is_empty()) {
        return DisplayServer::Wayland;
    }

    if display.is_some_and(|v| !v.is_empty()) {
        return DisplayServer::X11;
    }

    DisplayServer::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_type_wins() {
        assert_eq!(classify(Some("wayland"), None, Some(":0")), DisplayServer::Wayland);
        assert_eq!(classify(Some("x11"), Some("wayland-0"), None), DisplayServer::X11);
        assert_eq!(classify(Some("Wayland"), None, None), DisplayServer::Wayland);
    }

    #[test]
    fn test_wayland_display_fallback() {
        assert_eq!(classify(None, Some("wayland-0"), Some(":0")), DisplayServer::Wayland);
        assert_eq!(classify(Some("tty"), Some("wayland-1"), None), DisplayServer::Wayland);
    }

    #[test]
    fn test_display_fallback() {
        assert_eq!(classify(None, None, Some(":0")), DisplayServer::X11);
        assert_eq!(classify(Some("tty"), None, Some(":1")), DisplayServer::X11);
    }

    #[test]
    fn test_empty_values_ignored() {
        assert_eq!(classify(None, Some(""), Some("")), DisplayServer::Unknown);
        assert_eq!(classify(None, Some(""), Some(":0")), DisplayServer::X11);
    }

    #[test]
    fn test_nothing_set() {
        assert_eq!(classify(None, None, None), DisplayServer::Unknown);
    }
}

//! Owner denylist for shell and system surfaces.
//!
//! Dock, window server, notification center and their equivalents are
//! never useful as observation targets, so they are filtered out of every
//! enumeration result. The set is injectable: platform defaults come from
//! [`Denylist::host_default`], and configuration can extend or replace
//! them without touching any enumeration code.

use std::collections::HashSet;

#[cfg(target_os = "macos")]
const HOST_DENYLIST: &[&str] = &[
    "Dock",
    "WindowServer",
    "Window Server",
    "Notification Center",
    "NotificationCenter",
];

#[cfg(target_os = "linux")]
const HOST_DENYLIST: &[&str] = &[
    "gnome-shell",
    "plasmashell",
    "xfce4-panel",
    "polybar",
    "plank",
];

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
const HOST_DENYLIST: &[&str] = &[];

/// Set of owner names excluded from every enumeration result.
/// Matching is ASCII case-insensitive.
#[derive(Debug, Clone)]
pub struct Denylist {
    names: HashSet<String>,
}

impl Denylist {
    /// Build a denylist from explicit owner names, replacing any defaults.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// The built-in shell/system owners for the current host platform.
    pub fn host_default() -> Self {
        Self::new(HOST_DENYLIST.iter().copied())
    }

    /// Add further owner names on top of the current set.
    pub fn with_extra<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for n in names {
            self.names.insert(n.as_ref().to_ascii_lowercase());
        }
        self
    }

    /// Whether `owner` is denied.
    pub fn contains(&self, owner: &str) -> bool {
        self.names.contains(&owner.to_ascii_lowercase())
    }

    /// Number of denied owner names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when nothing is denied.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::host_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_case_insensitive() {
        let list = Denylist::new(["Dock", "WindowServer"]);
        assert!(list.contains("Dock"));
        assert!(list.contains("dock"));
        assert!(list.contains("DOCK"));
        assert!(list.contains("windowserver"));
        assert!(!list.contains("Safari"));
    }

    #[test]
    fn test_with_extra_extends() {
        let list = Denylist::new(["Dock"]).with_extra(["Screenlet"]);
        assert!(list.contains("dock"));
        assert!(list.contains("screenlet"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_new_replaces_defaults() {
        let list = Denylist::new(["only-this"]);
        assert_eq!(list.len(), 1);
        assert!(list.contains("ONLY-THIS"));
    }

    #[test]
    fn test_empty() {
        let list = Denylist::new(Vec::<String>::new());
        assert!(list.is_empty());
        assert!(!list.contains("anything"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_host_default_covers_shell() {
        assert!(Denylist::host_default().contains("gnome-shell"));
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_host_default_covers_shell() {
        let list = Denylist::host_default();
        assert!(list.contains("Dock"));
        assert!(list.contains("WindowServer"));
    }
}

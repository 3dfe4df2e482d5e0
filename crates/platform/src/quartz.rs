//! Quartz backend (macOS).
//!
//! Display and window queries through the CoreGraphics window services.
//! `CGWindowListCopyWindowInfo` reports on-screen windows front to back
//! with bounds in the bottom-left-origin device space; records are flipped
//! into screen space against global bounds computed in the same call, so a
//! display change between polls cannot skew a conversion.

use core_foundation::base::{CFType, TCFType};
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;
use core_graphics::display::*;

use sightline_geometry::{rect_to_screen, CoordSpace, GlobalBounds, Rect, WindowRecord};
use tracing::{debug, warn};

use crate::{BackendError, CapabilityTier, Denylist, ScreenBackend, WindowScope};

/// kCGMainMenuWindowLevel. The menu bar and its shadow sit on this level.
const MAIN_MENU_WINDOW_LEVEL: i32 = 24;

/// Full-capability backend over the Quartz window server.
pub struct QuartzBackend {
    denylist: Denylist,
}

struct RawWindow {
    id: u64,
    owner: String,
    title: String,
    bounds: Option<Rect>,
    layer: i32,
}

impl QuartzBackend {
    pub fn new(denylist: Denylist) -> Self {
        Self { denylist }
    }

    fn display_rects() -> Result<Vec<Rect>, BackendError> {
        let mut ids: [CGDirectDisplayID; 16] = [0; 16];
        let mut count: u32 = 0;
        let err = unsafe {
            CGGetActiveDisplayList(ids.len() as u32, ids.as_mut_ptr(), &mut count as *mut u32)
        };
        if err != 0 {
            return Err(BackendError::Unavailable(format!(
                "CGGetActiveDisplayList failed: {}",
                err
            )));
        }

        let mut rects = Vec::with_capacity(count as usize);
        for &id in ids.iter().take(count as usize) {
            let r = unsafe { CGDisplayBounds(id) };
            rects.push(Rect::new(
                r.origin.x,
                r.origin.y,
                r.size.width,
                r.size.height,
            ));
        }
        Ok(rects)
    }

    fn copy_window_list(options: CGWindowListOption) -> Result<Vec<RawWindow>, BackendError> {
        let list = unsafe { CGWindowListCopyWindowInfo(options, kCGNullWindowID) };
        if list.is_null() {
            return Err(BackendError::Unavailable(
                "CGWindowListCopyWindowInfo returned null".to_string(),
            ));
        }

        let dicts: Vec<CFDictionaryRef> = unsafe {
            let count = core_foundation::array::CFArrayGetCount(list as _);
            (0..count)
                .map(|i| {
                    core_foundation::array::CFArrayGetValueAtIndex(list as _, i) as CFDictionaryRef
                })
                .collect()
        };

        let mut raw = Vec::with_capacity(dicts.len());
        for dict_ref in dicts {
            let dict = unsafe {
                CFDictionary::<CFString, CFType>::wrap_under_get_rule(dict_ref)
            };

            let Some(id) = dict_i64(&dict, "kCGWindowNumber") else {
                warn!("Skipping window entry without a window number");
                continue;
            };
            raw.push(RawWindow {
                id: id as u64,
                owner: dict_string(&dict, "kCGWindowOwnerName").unwrap_or_default(),
                title: dict_string(&dict, "kCGWindowName").unwrap_or_default(),
                bounds: dict_bounds(&dict),
                layer: dict_i64(&dict, "kCGWindowLayer").unwrap_or(0) as i32,
            });
        }

        unsafe { core_foundation::base::CFRelease(list as _) };
        Ok(raw)
    }
}

impl ScreenBackend for QuartzBackend {
    fn name(&self) -> &'static str {
        "quartz"
    }

    fn tier(&self) -> CapabilityTier {
        CapabilityTier::Full
    }

    fn native_space(&self) -> CoordSpace {
        CoordSpace::DeviceBottomLeft
    }

    fn system_menu_layer(&self) -> Option<i32> {
        Some(MAIN_MENU_WINDOW_LEVEL)
    }

    fn monitors(&self) -> Result<Vec<Rect>, BackendError> {
        let rects = Self::display_rects()?;
        debug!("Quartz reported {} displays", rects.len());
        Ok(rects)
    }

    fn windows(&self, scope: WindowScope) -> Result<Vec<WindowRecord>, BackendError> {
        let bounds = GlobalBounds::from_monitors(&Self::display_rects()?);
        if bounds.is_empty() {
            return Err(BackendError::Unavailable(
                "No active displays reported".to_string(),
            ));
        }

        let options = match scope {
            WindowScope::OnScreenOnly => {
                kCGWindowListOptionOnScreenOnly | kCGWindowListExcludeDesktopElements
            }
            WindowScope::All => kCGWindowListOptionAll,
        };

        let mut records = Vec::new();
        for win in Self::copy_window_list(options)? {
            if self.denylist.contains(&win.owner) {
                continue;
            }
            let screen_bounds = match win.bounds {
                Some(device) if device.is_finite() && !device.is_degenerate() => {
                    Some(rect_to_screen(device, CoordSpace::DeviceBottomLeft, &bounds))
                }
                // Degenerate geometry cannot be on screen.
                _ if scope == WindowScope::OnScreenOnly => continue,
                _ => None,
            };
            records.push(WindowRecord {
                id: win.id,
                owner: win.owner,
                title: win.title,
                bounds: screen_bounds,
                layer: win.layer,
                z_index: records.len(),
            });
        }
        debug!("Enumerated {} windows ({:?})", records.len(), scope);
        Ok(records)
    }
}

fn dict_i64(dict: &CFDictionary<CFString, CFType>, key: &str) -> Option<i64> {
    dict.find(CFString::new(key)).and_then(|v| {
        let n: CFNumber = unsafe { CFNumber::wrap_under_get_rule(v.as_CFTypeRef() as _) };
        n.to_i64()
    })
}

fn dict_string(dict: &CFDictionary<CFString, CFType>, key: &str) -> Option<String> {
    dict.find(CFString::new(key)).map(|v| {
        let s: CFString = unsafe { CFString::wrap_under_get_rule(v.as_CFTypeRef() as _) };
        s.to_string()
    })
}

fn dict_bounds(dict: &CFDictionary<CFString, CFType>) -> Option<Rect> {
    dict.find(CFString::new("kCGWindowBounds")).map(|v| {
        let b: CFDictionary<CFString, CFNumber> =
            unsafe { CFDictionary::wrap_under_get_rule(v.as_CFTypeRef() as _) };
        Rect::new(
            bounds_field(&b, "X"),
            bounds_field(&b, "Y"),
            bounds_field(&b, "Width"),
            bounds_field(&b, "Height"),
        )
    })
}

fn bounds_field(bounds: &CFDictionary<CFString, CFNumber>, key: &str) -> f64 {
    bounds
        .find(CFString::new(key))
        .and_then(|n| n.to_f64())
        .unwrap_or(0.0)
}

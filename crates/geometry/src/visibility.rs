//! Window visibility accounting.
//!
//! Turns a front-to-back ordered window list into per-window visible-area
//! ratios in a single pass: an accumulated occlusion region starts empty and
//! grows by union as each window is processed, so every window is measured
//! against exactly the area covered by windows strictly in front of it.

use geo::{Area, BooleanOps, MultiPolygon};
use serde::{Deserialize, Serialize};

use crate::{Rect, WindowRecord};

/// A window together with the fraction of its area not covered by any
/// window in front of it. Fully occluded windows are omitted from results
/// rather than reported with ratio zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowVisibility {
    pub window: WindowRecord,
    /// Visible fraction in `[0.0, 1.0]`; always greater than zero here.
    pub ratio: f64,
}

fn rect_polygon(rect: &Rect) -> MultiPolygon<f64> {
    let poly = geo::Rect::new(
        geo::coord! { x: rect.left, y: rect.top },
        geo::coord! { x: rect.right(), y: rect.bottom() },
    )
    .to_polygon();
    MultiPolygon::new(vec![poly])
}

/// Compute visibility ratios for a front-to-back window sequence.
///
/// The input order is trusted absolutely: index 0 must be the frontmost
/// window, exactly as the on-screen enumeration reports it. The result is
/// an order-preserving subset containing every window with a visible area
/// greater than zero.
///
/// Windows without solid bounds (absent, degenerate, or non-finite) are
/// skipped; they contribute nothing and do not occlude anything behind
/// them. Every processed window joins the occlusion region whether or not
/// it was visible itself, since an occluded window still occupies screen
/// space in front of whatever is behind it.
///
/// Adjacent windows sharing an exact edge do not reduce each other's
/// visibility: a zero-width intersection has zero area.
pub fn compute_visibility(windows: &[WindowRecord]) -> Vec<WindowVisibility> {
    let mut results = Vec::new();
    let mut occluded: Option<MultiPolygon<f64>> = None;

    for window in windows {
        let Some(rect) = window.solid_bounds() else {
            continue;
        };
        let polygon = rect_polygon(&rect);
        let total = rect.area();

        let visible_area = match &occluded {
            None => total,
            Some(region) => polygon.difference(region).unsigned_area(),
        };

        let ratio = (visible_area / total).clamp(0.0, 1.0);
        if ratio > 0.0 {
            results.push(WindowVisibility {
                window: window.clone(),
                ratio,
            });
        }

        occluded = Some(match occluded {
            None => polygon,
            Some(region) => region.union(&polygon),
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win(id: u64, left: f64, top: f64, width: f64, height: f64) -> WindowRecord {
        WindowRecord {
            id,
            owner: format!("app{}", id),
            title: String::new(),
            bounds: Some(Rect::new(left, top, width, height)),
            layer: 0,
            z_index: id as usize,
        }
    }

    fn ratio_of(results: &[WindowVisibility], id: u64) -> Option<f64> {
        results.iter().find(|v| v.window.id == id).map(|v| v.ratio)
    }

    #[test]
    fn test_single_window_fully_visible() {
        let results = compute_visibility(&[win(1, 0.0, 0.0, 800.0, 600.0)]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ratio, 1.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_visibility(&[]).is_empty());
    }

    #[test]
    fn test_non_overlapping_all_fully_visible() {
        let results = compute_visibility(&[
            win(1, 0.0, 0.0, 100.0, 100.0),
            win(2, 200.0, 0.0, 100.0, 100.0),
            win(3, 0.0, 200.0, 100.0, 100.0),
        ]);
        assert_eq!(results.len(), 3);
        for v in &results {
            assert!((v.ratio - 1.0).abs() < 1e-9, "window {} ratio {}", v.window.id, v.ratio);
        }
    }

    #[test]
    fn test_equal_rects_back_excluded() {
        let results = compute_visibility(&[
            win(1, 10.0, 10.0, 300.0, 200.0),
            win(2, 10.0, 10.0, 300.0, 200.0),
        ]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].window.id, 1);
        assert_eq!(results[0].ratio, 1.0);
    }

    #[test]
    fn test_back_window_quarter_covered() {
        // B loses its 50x50 corner under A: 7500 of 10000 remains.
        let results = compute_visibility(&[
            win(1, 0.0, 0.0, 100.0, 100.0),
            win(2, 50.0, 50.0, 100.0, 100.0),
        ]);
        assert_eq!(results.len(), 2);
        assert_eq!(ratio_of(&results, 1), Some(1.0));
        let b = ratio_of(&results, 2).unwrap();
        assert!((b - 0.75).abs() < 1e-9, "expected 0.75, got {}", b);
    }

    #[test]
    fn test_fully_covered_by_larger_front_window() {
        let results = compute_visibility(&[
            win(1, 0.0, 0.0, 500.0, 500.0),
            win(2, 100.0, 100.0, 200.0, 200.0),
        ]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].window.id, 1);
        assert!(ratio_of(&results, 2).is_none());
    }

    #[test]
    fn test_occlusion_accumulates_across_front_windows() {
        // Neither front window alone covers B, but together they do.
        let results = compute_visibility(&[
            win(1, 0.0, 0.0, 60.0, 100.0),
            win(2, 60.0, 0.0, 60.0, 100.0),
            win(3, 10.0, 0.0, 100.0, 100.0),
        ]);
        assert!(ratio_of(&results, 3).is_none());
    }

    #[test]
    fn test_overlapping_front_windows_not_double_subtracted() {
        // The two front windows overlap each other; their union covers
        // exactly the top 100x100 of B, leaving the bottom half visible.
        let results = compute_visibility(&[
            win(1, 0.0, 0.0, 60.0, 100.0),
            win(2, 40.0, 0.0, 60.0, 100.0),
            win(3, 0.0, 0.0, 100.0, 200.0),
        ]);
        let b = ratio_of(&results, 3).unwrap();
        assert!((b - 0.5).abs() < 1e-9, "expected 0.5, got {}", b);
    }

    #[test]
    fn test_occluded_window_still_occludes() {
        // Window 2 is fully hidden under window 1 and emits no result,
        // yet its footprint still counts against window 3.
        let results = compute_visibility(&[
            win(1, 0.0, 0.0, 100.0, 100.0),
            win(2, 0.0, 0.0, 100.0, 100.0),
            win(3, 50.0, 0.0, 100.0, 100.0),
        ]);
        assert!(ratio_of(&results, 2).is_none());
        let c = ratio_of(&results, 3).unwrap();
        assert!((c - 0.5).abs() < 1e-9, "expected 0.5, got {}", c);
    }

    #[test]
    fn test_shared_edge_does_not_occlude() {
        let results = compute_visibility(&[
            win(1, 0.0, 0.0, 100.0, 100.0),
            win(2, 100.0, 0.0, 100.0, 100.0),
            win(3, 0.0, 100.0, 200.0, 50.0),
        ]);
        assert_eq!(results.len(), 3);
        for v in &results {
            assert!((v.ratio - 1.0).abs() < 1e-9, "window {} ratio {}", v.window.id, v.ratio);
        }
    }

    #[test]
    fn test_degenerate_window_skipped_entirely() {
        // The zero-width window neither appears nor shadows window 2.
        let results = compute_visibility(&[
            win(1, 0.0, 0.0, 0.0, 500.0),
            win(2, 0.0, 0.0, 100.0, 100.0),
        ]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].window.id, 2);
        assert_eq!(results[0].ratio, 1.0);
    }

    #[test]
    fn test_absent_and_nonfinite_bounds_skipped() {
        let mut no_bounds = win(1, 0.0, 0.0, 1.0, 1.0);
        no_bounds.bounds = None;
        let nan = win(2, f64::NAN, 0.0, 100.0, 100.0);
        let results = compute_visibility(&[no_bounds, nan, win(3, 0.0, 0.0, 50.0, 50.0)]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].window.id, 3);
    }

    #[test]
    fn test_result_order_matches_input_order() {
        let results = compute_visibility(&[
            win(5, 0.0, 0.0, 100.0, 100.0),
            win(9, 50.0, 0.0, 100.0, 100.0),
            win(2, 100.0, 0.0, 100.0, 100.0),
        ]);
        let ids: Vec<u64> = results.iter().map(|v| v.window.id).collect();
        assert_eq!(ids, vec![5, 9, 2]);
    }

    #[test]
    fn test_ratios_stay_in_unit_range() {
        let results = compute_visibility(&[
            win(1, 0.0, 0.0, 333.0, 217.0),
            win(2, 100.0, 50.0, 400.0, 400.0),
            win(3, -50.0, -50.0, 600.0, 300.0),
            win(4, 250.0, 250.0, 80.0, 80.0),
        ]);
        for v in &results {
            assert!(v.ratio > 0.0 && v.ratio <= 1.0, "window {} ratio {}", v.window.id, v.ratio);
        }
    }
}

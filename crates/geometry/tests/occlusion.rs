//! Scenario tests for the visibility engine and coordinate conversions.
//!
//! These exercise whole-desktop arrangements end to end without any
//! windowing backend. They cover:
//! - Conservation: visible areas sum to the union of all window footprints
//! - Tiled and stacked desktop layouts
//! - Coordinate round-trips against multi-monitor global bounds

use sightline_geometry::{
    compute_visibility, point_from_screen, point_to_screen, rect_from_screen, rect_to_screen,
    CoordSpace, GlobalBounds, Point, Rect, WindowRecord,
};

fn win(id: u64, owner: &str, left: f64, top: f64, width: f64, height: f64) -> WindowRecord {
    WindowRecord {
        id,
        owner: owner.to_string(),
        title: format!("{} window", owner),
        bounds: Some(Rect::new(left, top, width, height)),
        layer: 0,
        z_index: id as usize,
    }
}

const EPSILON: f64 = 1e-6;

// ============================================================================
// Conservation Properties
// ============================================================================

/// A fully tiled screen with no overlap: every window keeps ratio 1.0 and
/// the visible areas sum to the whole screen.
#[test]
fn test_tiled_screen_areas_sum_to_screen_area() {
    let screen_w = 1920.0;
    let screen_h = 1080.0;
    let windows = vec![
        win(1, "term", 0.0, 0.0, 960.0, 540.0),
        win(2, "edit", 960.0, 0.0, 960.0, 540.0),
        win(3, "web", 0.0, 540.0, 960.0, 540.0),
        win(4, "mail", 960.0, 540.0, 960.0, 540.0),
    ];

    let results = compute_visibility(&windows);
    assert_eq!(results.len(), 4);

    let mut covered = 0.0;
    for v in &results {
        assert!((v.ratio - 1.0).abs() < EPSILON);
        covered += v.ratio * v.window.bounds.unwrap().area();
    }
    assert!((covered - screen_w * screen_h).abs() < EPSILON);
}

/// With overlap, the visible areas sum to the area of the union of all
/// footprints: each screen point is attributed to exactly one window.
#[test]
fn test_overlapping_stack_conserves_union_area() {
    let windows = vec![
        win(1, "front", 0.0, 0.0, 100.0, 100.0),
        win(2, "back", 50.0, 50.0, 100.0, 100.0),
    ];
    // Union = 10000 + 10000 - 2500 overlap.
    let union_area = 17500.0;

    let results = compute_visibility(&windows);
    let attributed: f64 = results
        .iter()
        .map(|v| v.ratio * v.window.bounds.unwrap().area())
        .sum();
    assert!((attributed - union_area).abs() < EPSILON);
}

/// Three-deep pile over one spot: the middle window's hidden portion is
/// attributed to the front window, never double-counted.
#[test]
fn test_three_deep_pile_attribution() {
    let windows = vec![
        win(1, "front", 0.0, 0.0, 200.0, 200.0),
        win(2, "middle", 100.0, 0.0, 200.0, 200.0),
        win(3, "back", 200.0, 0.0, 200.0, 200.0),
    ];

    let results = compute_visibility(&windows);
    assert_eq!(results.len(), 3);
    assert!((results[0].ratio - 1.0).abs() < EPSILON);
    assert!((results[1].ratio - 0.5).abs() < EPSILON);
    assert!((results[2].ratio - 0.5).abs() < EPSILON);

    let attributed: f64 = results
        .iter()
        .map(|v| v.ratio * v.window.bounds.unwrap().area())
        .sum();
    // Union spans x in [0, 400], y in [0, 200].
    assert!((attributed - 400.0 * 200.0).abs() < EPSILON);
}

// ============================================================================
// Desktop Scenarios
// ============================================================================

/// A realistic desktop: maximized browser on the primary display, an
/// editor and an overlapping terminal on the secondary.
#[test]
fn test_dual_monitor_desktop() {
    let windows = vec![
        win(10, "term", 2100.0, 300.0, 800.0, 500.0),
        win(11, "edit", 1920.0, 0.0, 1080.0, 1000.0),
        win(12, "web", 0.0, 0.0, 1920.0, 1080.0),
    ];

    let results = compute_visibility(&windows);
    assert_eq!(results.len(), 3);

    // Terminal is frontmost and untouched.
    assert!((results[0].ratio - 1.0).abs() < EPSILON);
    // Editor loses the full terminal footprint (it encloses it).
    let editor_expected = 1.0 - (800.0 * 500.0) / (1080.0 * 1000.0);
    assert!((results[1].ratio - editor_expected).abs() < EPSILON);
    // Browser is on the other display entirely.
    assert!((results[2].ratio - 1.0).abs() < EPSILON);
}

/// Front-to-back input where a window hides behind the union of two
/// side-by-side front windows that share an edge with each other.
#[test]
fn test_hidden_behind_two_adjacent_windows() {
    let windows = vec![
        win(1, "left", 0.0, 0.0, 100.0, 100.0),
        win(2, "right", 100.0, 0.0, 100.0, 100.0),
        win(3, "behind", 20.0, 10.0, 150.0, 80.0),
    ];

    let results = compute_visibility(&windows);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|v| v.window.id != 3));
}

// ============================================================================
// Coordinate Round-Trips
// ============================================================================

/// Round-trip law across both spaces, on bounds from two mixed-orientation
/// monitors.
#[test]
fn test_round_trip_on_dual_monitor_bounds() {
    let bounds = GlobalBounds::from_monitors(&[
        Rect::new(0.0, 0.0, 1920.0, 1080.0),
        Rect::new(1920.0, 0.0, 1080.0, 1920.0),
    ]);
    assert_eq!(
        (bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y),
        (0.0, 0.0, 3000.0, 1920.0)
    );

    let rects = [
        Rect::new(0.0, 0.0, 1920.0, 1080.0),
        Rect::new(2000.0, 150.0, 640.0, 480.0),
        Rect::new(-10.0, 7.5, 20.0, 15.25),
    ];
    let points = [Point::new(0.0, 0.0), Point::new(2999.0, 1919.0), Point::new(12.5, 800.0)];

    for space in [CoordSpace::ScreenTopLeft, CoordSpace::DeviceBottomLeft] {
        for r in rects {
            assert_eq!(rect_from_screen(rect_to_screen(r, space, &bounds), space, &bounds), r);
        }
        for p in points {
            assert_eq!(
                point_from_screen(point_to_screen(p, space, &bounds), space, &bounds),
                p
            );
        }
    }
}

/// A device-space window reported near the bottom of the display lands
/// near the top in screen space, and visibility runs on the converted
/// values unchanged.
#[test]
fn test_device_reported_window_feeds_visibility() {
    let bounds = GlobalBounds::from_monitors(&[Rect::new(0.0, 0.0, 1440.0, 900.0)]);

    // Bottom-left-origin report: 200px tall window sitting on the bottom edge.
    let device = Rect::new(100.0, 0.0, 400.0, 200.0);
    let screen = rect_to_screen(device, CoordSpace::DeviceBottomLeft, &bounds);
    assert_eq!(screen.top, 700.0);

    let mut w = win(1, "dockless", 0.0, 0.0, 1.0, 1.0);
    w.bounds = Some(screen);
    let results = compute_visibility(&[w]);
    assert_eq!(results.len(), 1);
    assert!((results[0].ratio - 1.0).abs() < EPSILON);
}

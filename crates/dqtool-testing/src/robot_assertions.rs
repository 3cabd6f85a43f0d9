//! Assertion utilities for robot and slicing tests

use dqtool_ui_graphics::{Bitmap, EdgeInsets, Rect};

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that every edge of two insets is approximately equal.
pub fn assert_insets_approx_eq(actual: EdgeInsets, expected: EdgeInsets, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.left, expected.left, tolerance, &format!("{} - left", msg));
    assert_approx_eq(actual.top, expected.top, tolerance, &format!("{} - top", msg));
    assert_approx_eq(
        actual.right,
        expected.right,
        tolerance,
        &format!("{} - right", msg),
    );
    assert_approx_eq(
        actual.bottom,
        expected.bottom,
        tolerance,
        &format!("{} - bottom", msg),
    );
}

/// Assert that a rectangle is approximately equal to another.
pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{} - height", msg),
    );
}

/// Assert bitmap dimensions.
pub fn assert_bitmap_size(bitmap: &Bitmap, width: u32, height: u32, msg: &str) {
    assert_eq!(
        (bitmap.width(), bitmap.height()),
        (width, height),
        "{}: expected {}x{} bitmap, got {}x{}",
        msg,
        width,
        height,
        bitmap.width(),
        bitmap.height()
    );
}

//! Shared constants for scroll-driven refresh control.
//!
//! All values are in logical points unless stated otherwise.

use std::time::Duration;

/// Distance from the end of the scrollable content at which load-more fires.
///
/// Once the content offset passes `(content - viewport) - LOAD_MORE_THRESHOLD`
/// along the scroll axis, the attached controller asks the owner for the next
/// page.
pub const LOAD_MORE_THRESHOLD: f32 = 50.0;

/// Edge length of the default spinner indicator.
pub const SPINNER_SIZE: f32 = 30.0;

/// Time the default spinner takes for one full turn.
pub const SPINNER_PERIOD: Duration = Duration::from_millis(1250);

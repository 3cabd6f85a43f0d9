//! Pull-to-refresh and load-more control for scroll views.
//!
//! A [`RefreshController`] attaches to a [`ScrollView`](crate::ScrollView)
//! and drives a small state machine:
//!
//! - `Idle -> Refreshing -> Idle` when the owner triggers a refresh and later
//!   calls [`RefreshController::finish_refresh`];
//! - `Idle -> Loading` when the offset nears the end of the content. The owner
//!   moves the controller back to `Idle` or on to `NoMoreData` once the page
//!   has arrived; there is no automatic reset for load-more.

mod controller;
mod indicator;

pub use controller::RefreshController;
pub use indicator::{RefreshIndicator, SpinnerIndicator};

use crate::scroll_constants::LOAD_MORE_THRESHOLD;

/// Logical state of a refresh controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefreshState {
    #[default]
    Idle,
    Refreshing,
    Loading,
    /// Pagination is exhausted; load-more stays suppressed until the owner
    /// sets another state.
    NoMoreData,
}

/// Runtime tuning for a [`RefreshController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshConfig {
    /// Distance from the content end, in points, at which load-more fires.
    pub load_more_threshold: f32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            load_more_threshold: LOAD_MORE_THRESHOLD,
        }
    }
}

/// Whether an offset along the scroll axis is close enough to the end of the
/// content to request the next page.
///
/// Content that fits inside the viewport never qualifies.
pub(crate) fn crosses_load_more_threshold(
    offset: f32,
    content_extent: f32,
    viewport_extent: f32,
    threshold: f32,
) -> bool {
    let remaining = content_extent - viewport_extent;
    remaining > 0.0 && offset > remaining - threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_measured_from_scroll_end() {
        // 1000 content, 400 viewport -> end at 600, fires past 550.
        assert!(!crosses_load_more_threshold(0.0, 1000.0, 400.0, 50.0));
        assert!(!crosses_load_more_threshold(550.0, 1000.0, 400.0, 50.0));
        assert!(crosses_load_more_threshold(550.5, 1000.0, 400.0, 50.0));
        assert!(crosses_load_more_threshold(700.0, 1000.0, 400.0, 50.0));
    }

    #[test]
    fn short_content_never_fires() {
        assert!(!crosses_load_more_threshold(500.0, 300.0, 400.0, 50.0));
        assert!(!crosses_load_more_threshold(500.0, 400.0, 400.0, 50.0));
    }

    #[test]
    fn default_config_uses_shared_threshold() {
        assert_eq!(RefreshConfig::default().load_more_threshold, 50.0);
        assert_eq!(RefreshState::default(), RefreshState::Idle);
    }
}

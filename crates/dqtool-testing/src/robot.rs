//! Robot-style driver for scroll views.
//!
//! [`ScrollRobot`] performs the gestures a user would make on a scroll view
//! (drags, flings, pull-to-refresh) so refresh-controller behavior can be
//! tested end to end without a windowing system.
//!
//! # Example
//!
//! ```
//! use dqtool_testing::ScrollRobot;
//!
//! let robot = ScrollRobot::vertical(400.0, 1000.0);
//! robot.drag_by(120.0);
//! assert_eq!(robot.offset(), 120.0);
//! ```

use dqtool_foundation::{Orientation, Point, ScrollView, Size};

/// Number of offset updates a drag is split into.
const DRAG_STEPS: usize = 10;

pub struct ScrollRobot {
    view: ScrollView,
}

impl ScrollRobot {
    /// Wraps an existing view.
    pub fn new(view: ScrollView) -> Self {
        Self { view }
    }

    /// Vertical view, 320 points wide.
    pub fn vertical(viewport_height: f32, content_height: f32) -> Self {
        let view = ScrollView::new(Size::new(320.0, viewport_height));
        view.set_content_size(Size::new(320.0, content_height));
        Self { view }
    }

    /// Horizontal view, 120 points tall.
    pub fn horizontal(viewport_width: f32, content_width: f32) -> Self {
        let view = ScrollView::new(Size::new(viewport_width, 120.0));
        view.set_orientation(Orientation::Horizontal);
        view.set_content_size(Size::new(content_width, 120.0));
        Self { view }
    }

    pub fn view(&self) -> &ScrollView {
        &self.view
    }

    /// Hands the view out, e.g. to drop it while a controller is attached.
    pub fn into_view(self) -> ScrollView {
        self.view
    }

    /// Offset along the scroll axis.
    pub fn offset(&self) -> f32 {
        let offset = self.view.content_offset();
        match self.view.orientation() {
            Orientation::Horizontal => offset.x,
            Orientation::Vertical => offset.y,
        }
    }

    /// Jumps to `offset` along the scroll axis in a single update.
    pub fn scroll_to(&self, offset: f32) {
        self.view.set_content_offset(self.axis_point(offset));
    }

    /// Moves the content by `delta` in evenly spaced steps, like a finger
    /// drag. Offsets are not clamped so overscroll can be simulated.
    pub fn drag_by(&self, delta: f32) {
        let start = self.offset();
        for step in 1..=DRAG_STEPS {
            let t = step as f32 / DRAG_STEPS as f32;
            self.scroll_to(start + delta * t);
        }
    }

    /// Drags all the way to the end of the content, plus `overscroll`.
    pub fn fling_to_end(&self, overscroll: f32) {
        let end = self.view.max_scroll_extent().max(0.0) + overscroll;
        self.drag_by(end - self.offset());
    }

    /// Pulls down past the top, which fires the installed controller's
    /// manual refresh. Returns `false` when no controller is installed.
    pub fn pull_to_refresh(&self) -> bool {
        let Some(controller) = self.view.refresh_controller() else {
            return false;
        };
        self.drag_by(-self.offset() - 60.0);
        controller.trigger_manual_refresh();
        self.scroll_to(0.0);
        true
    }

    /// Grows the content along the scroll axis, as when a page is appended.
    pub fn append_content(&self, extent: f32) {
        let size = self.view.content_size();
        let grown = match self.view.orientation() {
            Orientation::Horizontal => Size::new(size.width + extent, size.height),
            Orientation::Vertical => Size::new(size.width, size.height + extent),
        };
        log::trace!("content grows to {grown:?}");
        self.view.set_content_size(grown);
    }

    fn axis_point(&self, offset: f32) -> Point {
        match self.view.orientation() {
            Orientation::Horizontal => Point::new(offset, 0.0),
            Orientation::Vertical => Point::new(0.0, offset),
        }
    }
}

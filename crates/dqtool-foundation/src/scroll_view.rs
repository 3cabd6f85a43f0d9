//! Scroll view handle.
//!
//! [`ScrollView`] models the platform scroll widget a [`RefreshController`]
//! attaches to: it holds content offset, content size, viewport size and
//! layout direction, and notifies observers on every offset change.
//!
//! The view owns its installed controller. Controllers only keep a
//! [`WeakScrollView`], so dropping the last view handle tears both down.

use crate::refresh::{RefreshController, RefreshState};
use dqtool_ui_graphics::{Point, Size};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SCROLL_VIEW_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_OBSERVER_ID: AtomicU64 = AtomicU64::new(1);

/// Layout direction of a scroll view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

/// Handle returned by [`ScrollView::add_offset_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type OffsetObserver = Rc<dyn Fn(Point)>;

/// Shared handle to a scrollable view. Cloning is cheap and clones refer to
/// the same view.
#[derive(Clone)]
pub struct ScrollView {
    inner: Rc<ScrollViewInner>,
}

/// Non-owning reference to a [`ScrollView`].
#[derive(Clone, Default)]
pub struct WeakScrollView {
    inner: Weak<ScrollViewInner>,
}

struct ScrollViewInner {
    id: u64,
    content_offset: Cell<Point>,
    content_size: Cell<Size>,
    viewport_size: Cell<Size>,
    orientation: Cell<Orientation>,
    offset_observers: RefCell<Vec<(ObserverId, OffsetObserver)>>,
    refresh_controller: RefCell<Option<RefreshController>>,
}

impl ScrollView {
    /// Creates a vertical scroll view with the given viewport and no content.
    pub fn new(viewport_size: Size) -> Self {
        Self {
            inner: Rc::new(ScrollViewInner {
                id: NEXT_SCROLL_VIEW_ID.fetch_add(1, Ordering::Relaxed),
                content_offset: Cell::new(Point::ZERO),
                content_size: Cell::new(Size::ZERO),
                viewport_size: Cell::new(viewport_size),
                orientation: Cell::new(Orientation::Vertical),
                offset_observers: RefCell::new(Vec::new()),
                refresh_controller: RefCell::new(None),
            }),
        }
    }

    /// Unique ID of this view, for debugging.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn downgrade(&self) -> WeakScrollView {
        WeakScrollView {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn ptr_eq(&self, other: &ScrollView) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn content_offset(&self) -> Point {
        self.inner.content_offset.get()
    }

    /// Moves the content and notifies every offset observer with the new
    /// offset, even when the value did not change.
    ///
    /// Observers run after the offset is stored and may re-enter the view.
    pub fn set_content_offset(&self, offset: Point) {
        self.inner.content_offset.set(offset);
        let observers: Vec<OffsetObserver> = self
            .inner
            .offset_observers
            .borrow()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in observers {
            observer(offset);
        }
    }

    pub fn content_size(&self) -> Size {
        self.inner.content_size.get()
    }

    pub fn set_content_size(&self, size: Size) {
        self.inner.content_size.set(size);
    }

    pub fn viewport_size(&self) -> Size {
        self.inner.viewport_size.get()
    }

    pub fn set_viewport_size(&self, size: Size) {
        self.inner.viewport_size.set(size);
    }

    pub fn orientation(&self) -> Orientation {
        self.inner.orientation.get()
    }

    pub fn set_orientation(&self, orientation: Orientation) {
        self.inner.orientation.set(orientation);
    }

    /// `content - viewport` along the scroll axis. Negative when the content
    /// fits inside the viewport.
    pub fn max_scroll_extent(&self) -> f32 {
        let content = self.content_size();
        let viewport = self.viewport_size();
        match self.orientation() {
            Orientation::Horizontal => content.width - viewport.width,
            Orientation::Vertical => content.height - viewport.height,
        }
    }

    /// Scrolls back to the origin.
    pub fn scroll_to_top(&self) {
        self.set_content_offset(Point::ZERO);
    }

    /// Scrolls so the last row of content is at the bottom of the viewport.
    /// Content shorter than the viewport stays at the origin.
    pub fn scroll_to_bottom(&self) {
        let bottom = (self.content_size().height - self.viewport_size().height).max(0.0);
        self.set_content_offset(Point::new(0.0, bottom));
    }

    /// Registers a callback for offset changes.
    pub fn add_offset_observer(&self, observer: impl Fn(Point) + 'static) -> ObserverId {
        let id = ObserverId(NEXT_OBSERVER_ID.fetch_add(1, Ordering::Relaxed));
        self.inner
            .offset_observers
            .borrow_mut()
            .push((id, Rc::new(observer)));
        id
    }

    /// Removes an observer. Unknown IDs are ignored.
    pub fn remove_offset_observer(&self, id: ObserverId) {
        self.inner
            .offset_observers
            .borrow_mut()
            .retain(|(observer_id, _)| *observer_id != id);
    }

    pub fn offset_observer_count(&self) -> usize {
        self.inner.offset_observers.borrow().len()
    }

    /// The controller installed by [`RefreshController::attach`], if any.
    pub fn refresh_controller(&self) -> Option<RefreshController> {
        self.inner.refresh_controller.borrow().clone()
    }

    /// Sets the installed controller's state. No-op without a controller.
    pub fn set_refresh_state(&self, state: RefreshState) {
        if let Some(controller) = self.refresh_controller() {
            controller.set_state(state);
        }
    }

    /// State of the installed controller, `None` without a controller.
    pub fn refresh_state(&self) -> Option<RefreshState> {
        self.refresh_controller().map(|controller| controller.state())
    }

    /// Signals the end of a refresh cycle to the installed controller.
    pub fn end_refreshing(&self, succeeded: bool) {
        if let Some(controller) = self.refresh_controller() {
            controller.finish_refresh(succeeded);
        }
    }

    pub(crate) fn install_refresh_controller(&self, controller: RefreshController) {
        let previous = self.inner.refresh_controller.borrow_mut().replace(controller);
        drop(previous);
    }

    /// Clears the controller slot if it still holds `controller`.
    pub(crate) fn uninstall_refresh_controller(&self, controller: &RefreshController) {
        let removed = {
            let mut slot = self.inner.refresh_controller.borrow_mut();
            match slot.as_ref() {
                Some(installed) if installed.ptr_eq(controller) => slot.take(),
                _ => None,
            }
        };
        drop(removed);
    }
}

impl std::fmt::Debug for ScrollView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollView")
            .field("id", &self.inner.id)
            .field("content_offset", &self.content_offset())
            .field("content_size", &self.content_size())
            .field("viewport_size", &self.viewport_size())
            .field("orientation", &self.orientation())
            .finish()
    }
}

impl WeakScrollView {
    pub fn upgrade(&self) -> Option<ScrollView> {
        self.inner.upgrade().map(|inner| ScrollView { inner })
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl std::fmt::Debug for WeakScrollView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakScrollView")
            .field("alive", &self.is_alive())
            .finish()
    }
}

use super::{
    crosses_load_more_threshold, RefreshConfig, RefreshIndicator, RefreshState, SpinnerIndicator,
};
use crate::scroll_view::{ObserverId, Orientation, ScrollView, WeakScrollView};
use dqtool_ui_graphics::Point;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Handler = Rc<dyn Fn()>;

/// Pull-to-refresh and load-more controller for a [`ScrollView`].
///
/// Cloning yields another handle to the same controller. All methods are
/// meant to be called from the thread that owns the view; callbacks are
/// cloned out before they run, so they may call back into the controller.
///
/// # Example
///
/// ```rust,ignore
/// let controller = RefreshController::new()
///     .with_refresh_handler(move || reload_first_page());
/// controller.set_load_more_handler(move || fetch_next_page());
/// controller.attach(&view);
///
/// // later, when the first page has arrived:
/// view.end_refreshing(true);
/// // and after each page:
/// view.set_refresh_state(if exhausted { NoMoreData } else { Idle });
/// ```
#[derive(Clone)]
pub struct RefreshController {
    inner: Rc<RefreshControllerInner>,
}

struct RefreshControllerInner {
    state: Cell<RefreshState>,
    /// Outcome passed to the last `finish_refresh`.
    succeeded: Cell<bool>,
    /// Mirrors the platform control's own refreshing flag.
    refreshing: Cell<bool>,
    config: Cell<RefreshConfig>,
    refresh_handler: RefCell<Option<Handler>>,
    load_more_handler: RefCell<Option<Handler>>,
    indicator: RefCell<Option<Box<dyn RefreshIndicator>>>,
    scroll_view: RefCell<WeakScrollView>,
    observer: Cell<Option<ObserverId>>,
}

impl Default for RefreshController {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshController {
    /// Creates a detached controller with the default spinner indicator.
    pub fn new() -> Self {
        let controller = Self::bare();
        controller.set_indicator(Some(Box::new(SpinnerIndicator::default())));
        controller
    }

    /// Creates a detached controller without any indicator.
    pub fn bare() -> Self {
        Self {
            inner: Rc::new(RefreshControllerInner {
                state: Cell::new(RefreshState::Idle),
                succeeded: Cell::new(true),
                refreshing: Cell::new(false),
                config: Cell::new(RefreshConfig::default()),
                refresh_handler: RefCell::new(None),
                load_more_handler: RefCell::new(None),
                indicator: RefCell::new(None),
                scroll_view: RefCell::new(WeakScrollView::default()),
                observer: Cell::new(None),
            }),
        }
    }

    pub fn with_indicator(self, indicator: impl RefreshIndicator + 'static) -> Self {
        self.set_indicator(Some(Box::new(indicator)));
        self
    }

    pub fn with_refresh_handler(self, handler: impl Fn() + 'static) -> Self {
        self.set_refresh_handler(handler);
        self
    }

    pub fn with_config(self, config: RefreshConfig) -> Self {
        self.set_config(config);
        self
    }

    pub fn ptr_eq(&self, other: &RefreshController) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn config(&self) -> RefreshConfig {
        self.inner.config.get()
    }

    pub fn set_config(&self, config: RefreshConfig) {
        self.inner.config.set(config);
    }

    pub fn state(&self) -> RefreshState {
        self.inner.state.get()
    }

    /// Owner-driven transition, typically `Idle` or `NoMoreData` after a
    /// page has loaded.
    pub fn set_state(&self, state: RefreshState) {
        let previous = self.inner.state.replace(state);
        if previous != state {
            log::debug!("refresh state {previous:?} -> {state:?}");
        }
    }

    /// Outcome of the last finished refresh; `true` before the first one.
    pub fn last_refresh_succeeded(&self) -> bool {
        self.inner.succeeded.get()
    }

    /// Whether the refresh control is showing its refreshing state.
    pub fn is_refreshing(&self) -> bool {
        self.inner.refreshing.get()
    }

    /// The attached view, if it is still alive.
    pub fn scroll_view(&self) -> Option<ScrollView> {
        self.inner.scroll_view.borrow().upgrade()
    }

    pub fn is_attached(&self) -> bool {
        self.inner.observer.get().is_some() && self.scroll_view().is_some()
    }

    /// Replaces the refresh callback. Last writer wins.
    pub fn set_refresh_handler(&self, handler: impl Fn() + 'static) {
        *self.inner.refresh_handler.borrow_mut() = Some(Rc::new(handler));
    }

    /// Replaces the load-more callback. Last writer wins.
    pub fn set_load_more_handler(&self, handler: impl Fn() + 'static) {
        *self.inner.load_more_handler.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn clear_load_more_handler(&self) {
        self.inner.load_more_handler.borrow_mut().take();
    }

    /// Swaps the visual indicator. The old one is removed before the new one
    /// is installed; `None` leaves the controller without an indicator.
    pub fn set_indicator(&self, indicator: Option<Box<dyn RefreshIndicator>>) {
        let previous = self.inner.indicator.borrow_mut().take();
        if let Some(mut previous) = previous {
            previous.on_remove();
        }
        if let Some(mut indicator) = indicator {
            indicator.on_install();
            *self.inner.indicator.borrow_mut() = Some(indicator);
        }
    }

    pub fn has_indicator(&self) -> bool {
        self.inner.indicator.borrow().is_some()
    }

    /// Installs this controller on `view` and starts observing its offset.
    ///
    /// Any controller already installed on `view` is detached first, as is
    /// this controller's previous attachment.
    pub fn attach(&self, view: &ScrollView) {
        self.detach();
        if let Some(previous) = view.refresh_controller() {
            previous.detach();
        }

        let weak = Rc::downgrade(&self.inner);
        let observer = view.add_offset_observer(move |offset| {
            if let Some(inner) = weak.upgrade() {
                RefreshController { inner }.handle_offset_change(offset);
            }
        });
        self.inner.observer.set(Some(observer));
        *self.inner.scroll_view.borrow_mut() = view.downgrade();
        view.install_refresh_controller(self.clone());
        log::debug!("refresh controller attached to scroll view {}", view.id());
    }

    /// Stops observing the attached view and uninstalls from it.
    pub fn detach(&self) {
        let observer = self.inner.observer.take();
        let view = std::mem::take(&mut *self.inner.scroll_view.borrow_mut()).upgrade();
        let Some(view) = view else {
            return;
        };
        if let Some(observer) = observer {
            view.remove_offset_observer(observer);
        }
        view.uninstall_refresh_controller(self);
        log::debug!("refresh controller detached from scroll view {}", view.id());
    }

    /// Starts a refresh: shows the refreshing state, begins the indicator and
    /// runs the refresh callback.
    ///
    /// Calling this while already refreshing runs both steps again; the
    /// controller does not debounce.
    pub fn trigger_manual_refresh(&self) {
        self.begin_refreshing();
        let handler = self.inner.refresh_handler.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    /// Ends the current refresh cycle and returns to `Idle`.
    ///
    /// The owner calls this exactly once per refresh; until then the
    /// indicator keeps spinning.
    pub fn finish_refresh(&self, succeeded: bool) {
        self.inner.refreshing.set(false);
        self.inner.succeeded.set(succeeded);
        if let Some(indicator) = self.inner.indicator.borrow_mut().as_mut() {
            indicator.end_refreshing(succeeded);
        }
        self.set_state(RefreshState::Idle);
    }

    /// Requests the next page.
    ///
    /// Only fires from `Idle`, with a load-more callback registered and the
    /// view still alive. The state moves to `Loading` before the callback
    /// runs and stays there until the owner changes it.
    pub fn trigger_load_more(&self) {
        if self.state() != RefreshState::Idle {
            log::trace!("load-more ignored in {:?}", self.state());
            return;
        }
        let Some(handler) = self.inner.load_more_handler.borrow().clone() else {
            return;
        };
        if self.scroll_view().is_none() {
            log::trace!("load-more ignored, scroll view is gone");
            return;
        }
        self.set_state(RefreshState::Loading);
        handler();
    }

    fn begin_refreshing(&self) {
        self.inner.refreshing.set(true);
        self.set_state(RefreshState::Refreshing);
        if let Some(indicator) = self.inner.indicator.borrow_mut().as_mut() {
            indicator.begin_refreshing();
        }
    }

    fn handle_offset_change(&self, offset: Point) {
        if self.state() != RefreshState::Idle || self.inner.load_more_handler.borrow().is_none() {
            return;
        }
        let Some(view) = self.scroll_view() else {
            return;
        };
        let content = view.content_size();
        let viewport = view.viewport_size();
        let (offset, content_extent, viewport_extent) = match view.orientation() {
            Orientation::Horizontal => (offset.x, content.width, viewport.width),
            Orientation::Vertical => (offset.y, content.height, viewport.height),
        };
        let threshold = self.config().load_more_threshold;
        if crosses_load_more_threshold(offset, content_extent, viewport_extent, threshold) {
            self.trigger_load_more();
        }
    }
}

impl std::fmt::Debug for RefreshController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshController")
            .field("state", &self.state())
            .field("refreshing", &self.is_refreshing())
            .field("succeeded", &self.last_refresh_succeeded())
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dqtool_ui_graphics::Size;

    fn feed(viewport: f32, content: f32) -> ScrollView {
        let view = ScrollView::new(Size::new(320.0, viewport));
        view.set_content_size(Size::new(320.0, content));
        view
    }

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let sink = count.clone();
        (count, move || sink.set(sink.get() + 1))
    }

    #[test]
    fn load_more_fires_once_near_the_end() {
        let view = feed(400.0, 1000.0);
        let controller = RefreshController::new();
        let (loads, on_load) = counter();
        controller.set_load_more_handler(on_load);
        controller.attach(&view);

        view.set_content_offset(Point::new(0.0, 500.0));
        assert_eq!(loads.get(), 0);
        view.set_content_offset(Point::new(0.0, 560.0));
        view.set_content_offset(Point::new(0.0, 590.0));
        assert_eq!(loads.get(), 1);
        assert_eq!(controller.state(), RefreshState::Loading);
    }

    #[test]
    fn repeated_trigger_runs_callback_once() {
        let view = feed(400.0, 1000.0);
        let controller = RefreshController::new();
        let (loads, on_load) = counter();
        controller.set_load_more_handler(on_load);
        controller.attach(&view);

        controller.trigger_load_more();
        controller.trigger_load_more();
        assert_eq!(loads.get(), 1);
    }

    #[test]
    fn offsets_outside_idle_never_load() {
        let view = feed(400.0, 1000.0);
        let controller = RefreshController::new();
        let (loads, on_load) = counter();
        controller.set_load_more_handler(on_load);
        controller.attach(&view);

        for state in [
            RefreshState::Refreshing,
            RefreshState::Loading,
            RefreshState::NoMoreData,
        ] {
            controller.set_state(state);
            view.set_content_offset(Point::new(0.0, 600.0));
        }
        assert_eq!(loads.get(), 0);
    }

    #[test]
    fn horizontal_views_use_x_axis() {
        let view = ScrollView::new(Size::new(300.0, 100.0));
        view.set_orientation(Orientation::Horizontal);
        view.set_content_size(Size::new(900.0, 100.0));
        let controller = RefreshController::new();
        let (loads, on_load) = counter();
        controller.set_load_more_handler(on_load);
        controller.attach(&view);

        view.set_content_offset(Point::new(0.0, 5_000.0));
        assert_eq!(loads.get(), 0);
        view.set_content_offset(Point::new(560.0, 0.0));
        assert_eq!(loads.get(), 1);
    }

    #[test]
    fn refresh_cycle_returns_to_idle() {
        let controller = RefreshController::new();
        let (refreshes, on_refresh) = counter();
        controller.set_refresh_handler(on_refresh);

        controller.trigger_manual_refresh();
        assert_eq!(controller.state(), RefreshState::Refreshing);
        assert!(controller.is_refreshing());
        assert_eq!(refreshes.get(), 1);

        controller.finish_refresh(false);
        assert_eq!(controller.state(), RefreshState::Idle);
        assert!(!controller.is_refreshing());
        assert!(!controller.last_refresh_succeeded());
    }

    #[test]
    fn finish_refresh_resets_any_state() {
        let controller = RefreshController::bare();
        for state in [
            RefreshState::Idle,
            RefreshState::Refreshing,
            RefreshState::Loading,
            RefreshState::NoMoreData,
        ] {
            controller.set_state(state);
            controller.finish_refresh(true);
            assert_eq!(controller.state(), RefreshState::Idle);
            assert!(controller.last_refresh_succeeded());
        }
    }

    #[test]
    fn missing_handlers_are_noops() {
        let view = feed(400.0, 1000.0);
        let controller = RefreshController::bare();
        controller.attach(&view);

        controller.trigger_manual_refresh();
        assert_eq!(controller.state(), RefreshState::Refreshing);
        controller.finish_refresh(true);

        controller.trigger_load_more();
        view.set_content_offset(Point::new(0.0, 600.0));
        assert_eq!(controller.state(), RefreshState::Idle);
    }

    #[test]
    fn cleared_load_more_handler_stops_loading() {
        let view = feed(400.0, 1000.0);
        let controller = RefreshController::bare();
        let (loads, on_load) = counter();
        controller.set_load_more_handler(on_load);
        controller.attach(&view);

        controller.clear_load_more_handler();
        view.set_content_offset(Point::new(0.0, 600.0));
        assert_eq!(loads.get(), 0);
        assert_eq!(controller.state(), RefreshState::Idle);
    }

    #[test]
    fn handler_can_replace_itself_mid_call() {
        let controller = RefreshController::bare();
        let (second, on_second) = counter();
        let on_second = Rc::new(on_second);
        let handle = controller.clone();
        controller.set_refresh_handler(move || {
            let next = on_second.clone();
            handle.set_refresh_handler(move || next());
        });

        controller.trigger_manual_refresh();
        assert_eq!(second.get(), 0);
        controller.trigger_manual_refresh();
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn dropped_view_disables_load_more() {
        let view = feed(400.0, 1000.0);
        let controller = RefreshController::new();
        let (loads, on_load) = counter();
        controller.set_load_more_handler(on_load);
        controller.attach(&view);
        drop(view);

        controller.trigger_load_more();
        assert_eq!(loads.get(), 0);
        assert_eq!(controller.state(), RefreshState::Idle);
        assert!(!controller.is_attached());
    }

    #[test]
    fn view_owns_controller_without_cycle() {
        let view = feed(400.0, 1000.0);
        let controller = RefreshController::new();
        controller.attach(&view);
        let weak_inner = Rc::downgrade(&controller.inner);
        drop(controller);
        assert!(weak_inner.upgrade().is_some());
        drop(view);
        assert!(weak_inner.upgrade().is_none());
    }

    #[test]
    fn attaching_replaces_previous_controller() {
        let view = feed(400.0, 1000.0);
        let first = RefreshController::new();
        let second = RefreshController::new();
        first.attach(&view);
        second.attach(&view);

        assert!(!first.is_attached());
        assert!(second.is_attached());
        assert_eq!(view.offset_observer_count(), 1);
        assert!(view.refresh_controller().unwrap().ptr_eq(&second));
    }

    #[test]
    fn reattaching_moves_between_views() {
        let a = feed(400.0, 1000.0);
        let b = feed(400.0, 1000.0);
        let controller = RefreshController::new();
        controller.attach(&a);
        controller.attach(&b);

        assert!(a.refresh_controller().is_none());
        assert_eq!(a.offset_observer_count(), 0);
        assert!(controller.scroll_view().unwrap().ptr_eq(&b));
    }
}

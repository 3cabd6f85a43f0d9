//! Indicator double that records every hook call.

use dqtool_foundation::RefreshIndicator;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorEvent {
    Installed,
    Began,
    Ended { succeeded: bool },
    Removed,
}

/// Shared view of the events a [`RecordingIndicator`] has seen. Stays
/// readable after the indicator itself has been handed to a controller.
#[derive(Debug, Clone, Default)]
pub struct IndicatorLog {
    events: Rc<RefCell<Vec<IndicatorEvent>>>,
}

impl IndicatorLog {
    pub fn events(&self) -> Vec<IndicatorEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: IndicatorEvent) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: IndicatorEvent) {
        self.events.borrow_mut().push(event);
    }
}

pub struct RecordingIndicator {
    log: IndicatorLog,
}

impl RecordingIndicator {
    /// Returns the indicator and a handle to its event log.
    pub fn new() -> (Self, IndicatorLog) {
        let log = IndicatorLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl RefreshIndicator for RecordingIndicator {
    fn begin_refreshing(&mut self) {
        self.log.push(IndicatorEvent::Began);
    }

    fn end_refreshing(&mut self, succeeded: bool) {
        self.log.push(IndicatorEvent::Ended { succeeded });
    }

    fn on_install(&mut self) {
        self.log.push(IndicatorEvent::Installed);
    }

    fn on_remove(&mut self) {
        self.log.push(IndicatorEvent::Removed);
    }
}

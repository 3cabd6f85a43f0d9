//! Visual refresh indicators.

use crate::scroll_constants::{SPINNER_PERIOD, SPINNER_SIZE};
use dqtool_ui_graphics::Size;
use std::f32::consts::TAU;
use std::time::Duration;
use web_time::Instant;

/// Capability a visual refresh indicator provides to a
/// [`RefreshController`](super::RefreshController).
///
/// `on_install` and `on_remove` bracket the time the indicator is mounted on
/// a controller; a replaced indicator is always removed before its successor
/// is installed.
pub trait RefreshIndicator {
    fn begin_refreshing(&mut self);

    fn end_refreshing(&mut self, succeeded: bool);

    fn on_install(&mut self) {}

    fn on_remove(&mut self) {}
}

/// Default indicator: a square spinner turning once per period while a
/// refresh is running.
#[derive(Debug, Clone)]
pub struct SpinnerIndicator {
    size: Size,
    period: Duration,
    started_at: Option<Instant>,
    installed: bool,
    last_result: Option<bool>,
}

impl Default for SpinnerIndicator {
    fn default() -> Self {
        Self::new(Size::new(SPINNER_SIZE, SPINNER_SIZE), SPINNER_PERIOD)
    }
}

impl SpinnerIndicator {
    pub fn new(size: Size, period: Duration) -> Self {
        Self {
            size,
            period,
            started_at: None,
            installed: false,
            last_result: None,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_animating(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Outcome reported by the last finished refresh.
    pub fn last_result(&self) -> Option<bool> {
        self.last_result
    }

    /// Current rotation in radians, in `[0, TAU)`.
    pub fn rotation(&self) -> f32 {
        self.rotation_at(Instant::now())
    }

    /// Rotation at `now`; zero while idle.
    pub fn rotation_at(&self, now: Instant) -> f32 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        let period = self.period.as_secs_f32();
        if period <= 0.0 {
            return 0.0;
        }
        let turns = now.saturating_duration_since(started_at).as_secs_f32() / period;
        TAU * turns.fract()
    }
}

impl RefreshIndicator for SpinnerIndicator {
    fn begin_refreshing(&mut self) {
        // Restart from zero, matching a fresh rotation animation.
        self.started_at = Some(Instant::now());
    }

    fn end_refreshing(&mut self, succeeded: bool) {
        self.started_at = None;
        self.last_result = Some(succeeded);
    }

    fn on_install(&mut self) {
        self.installed = true;
    }

    fn on_remove(&mut self) {
        self.started_at = None;
        self.installed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_defaults() {
        let spinner = SpinnerIndicator::default();
        assert_eq!(spinner.size(), Size::new(30.0, 30.0));
        assert_eq!(spinner.period(), Duration::from_millis(1250));
        assert!(!spinner.is_animating());
        assert_eq!(spinner.rotation(), 0.0);
    }

    #[test]
    fn spinner_rotation_wraps_each_period() {
        let mut spinner = SpinnerIndicator::new(Size::new(10.0, 10.0), Duration::from_secs(1));
        spinner.begin_refreshing();
        let start = spinner.started_at.unwrap();

        let quarter = spinner.rotation_at(start + Duration::from_millis(250));
        assert!((quarter - TAU / 4.0).abs() < 1e-4);

        let wrapped = spinner.rotation_at(start + Duration::from_millis(1250));
        assert!((wrapped - TAU / 4.0).abs() < 1e-4);
    }

    #[test]
    fn spinner_stops_and_records_result() {
        let mut spinner = SpinnerIndicator::default();
        spinner.on_install();
        spinner.begin_refreshing();
        assert!(spinner.is_animating());
        spinner.end_refreshing(false);
        assert!(!spinner.is_animating());
        assert_eq!(spinner.last_result(), Some(false));
        spinner.on_remove();
        assert!(!spinner.is_installed());
    }
}

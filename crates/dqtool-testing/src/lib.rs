//! Testing utilities and harness for dqtool

pub mod bitmap_builder;
pub mod indicator;
pub mod robot;
pub mod robot_assertions;

pub use bitmap_builder::NinePatchBuilder;
pub use indicator::{IndicatorEvent, IndicatorLog, RecordingIndicator};
pub use robot::ScrollRobot;

pub mod prelude {
    pub use crate::bitmap_builder::NinePatchBuilder;
    pub use crate::indicator::*;
    pub use crate::robot::*;
    pub use crate::robot_assertions;
}

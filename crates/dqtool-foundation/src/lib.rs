//! Foundation elements for dqtool: scroll views and refresh control

pub mod refresh;
pub mod scroll_constants;
pub mod scroll_view;

// Re-export commonly used items
pub use dqtool_ui_graphics::{Point, Size};
pub use refresh::{
    RefreshConfig, RefreshController, RefreshIndicator, RefreshState, SpinnerIndicator,
};
pub use scroll_view::{ObserverId, Orientation, ScrollView, WeakScrollView};

pub mod prelude {
    pub use crate::refresh::*;
    pub use crate::scroll_view::*;
}

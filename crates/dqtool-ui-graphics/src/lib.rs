//! Pure math/data for images and units in dqtool
//!
//! This crate contains geometry primitives, colors, RGBA bitmaps and the
//! nine-patch slicer that turns a marked-up bitmap into a resizable image.

mod bitmap;
mod color;
mod geometry;
pub mod nine_patch;

pub use bitmap::*;
pub use color::*;
pub use geometry::*;
pub use nine_patch::{NinePatchRegion, ResizableImage, ResizingMode, DEFAULT_NINE_PATCH_SCALE};

pub mod prelude {
    pub use crate::bitmap::Bitmap;
    pub use crate::color::Color;
    pub use crate::geometry::{EdgeInsets, PixelRect, Point, Rect, Size};
    pub use crate::nine_patch::{content_insets, slice, stretch_insets, ResizableImage};
}

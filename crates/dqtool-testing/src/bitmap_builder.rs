//! Builder for nine-patch test bitmaps.
//!
//! Marker ranges are given in absolute bitmap coordinates and are clipped to
//! the border line they belong to, so corner pixels are never marked.

use dqtool_ui_graphics::{Bitmap, Color};
use std::ops::Range;

pub struct NinePatchBuilder {
    width: u32,
    height: u32,
    stretch_x: Vec<Range<u32>>,
    stretch_y: Vec<Range<u32>>,
    content_x: Vec<Range<u32>>,
    content_y: Vec<Range<u32>>,
    interior: Color,
    marker: Color,
}

impl NinePatchBuilder {
    /// Transparent `width` x `height` bitmap without markers.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            stretch_x: Vec::new(),
            stretch_y: Vec::new(),
            content_x: Vec::new(),
            content_y: Vec::new(),
            interior: Color::TRANSPARENT,
            marker: Color::BLACK,
        }
    }

    /// Marks columns on the top line.
    pub fn stretch_x(mut self, columns: Range<u32>) -> Self {
        self.stretch_x.push(columns);
        self
    }

    /// Marks rows on the left line.
    pub fn stretch_y(mut self, rows: Range<u32>) -> Self {
        self.stretch_y.push(rows);
        self
    }

    /// Marks columns on the bottom line.
    pub fn content_x(mut self, columns: Range<u32>) -> Self {
        self.content_x.push(columns);
        self
    }

    /// Marks rows on the right line.
    pub fn content_y(mut self, rows: Range<u32>) -> Self {
        self.content_y.push(rows);
        self
    }

    /// Paints everything inside the one-pixel frame.
    pub fn fill_interior(mut self, color: Color) -> Self {
        self.interior = color;
        self
    }

    /// Color used for marker pixels; opaque black unless overridden.
    pub fn marker_color(mut self, color: Color) -> Self {
        self.marker = color;
        self
    }

    pub fn build(self) -> Bitmap {
        let mut bitmap = Bitmap::new_transparent(self.width, self.height)
            .expect("nine-patch test bitmap needs non-zero dimensions");
        let (w, h) = (self.width, self.height);

        for y in 1..h.saturating_sub(1) {
            for x in 1..w.saturating_sub(1) {
                bitmap.set_pixel(x, y, self.interior);
            }
        }

        let inner_x = |range: &Range<u32>| range.start.max(1)..range.end.min(w.saturating_sub(1));
        let inner_y = |range: &Range<u32>| range.start.max(1)..range.end.min(h.saturating_sub(1));

        for range in &self.stretch_x {
            for x in inner_x(range) {
                bitmap.set_pixel(x, 0, self.marker);
            }
        }
        for range in &self.stretch_y {
            for y in inner_y(range) {
                bitmap.set_pixel(0, y, self.marker);
            }
        }
        for range in &self.content_x {
            for x in inner_x(range) {
                bitmap.set_pixel(x, h - 1, self.marker);
            }
        }
        for range in &self.content_y {
            for y in inner_y(range) {
                bitmap.set_pixel(w - 1, y, self.marker);
            }
        }
        bitmap
    }
}

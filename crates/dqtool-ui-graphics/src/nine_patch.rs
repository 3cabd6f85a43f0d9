//! Nine-patch slicing.
//!
//! A nine-patch bitmap carries a one-pixel marker frame. Fully opaque pixels
//! on the top and left border lines mark the stretchable region; fully opaque
//! pixels on the bottom and right lines mark the content area. The frame is
//! cropped off and the markers are turned into cap insets for a
//! [`ResizableImage`].
//!
//! Only the first and last marker pixel of each line are considered, so
//! borders with several disjoint spans collapse to their outer bounds.

use crate::{Bitmap, Color, EdgeInsets, PixelRect, Rect, Size};

/// Scale assumed for nine-patch assets when the caller has no better value.
pub const DEFAULT_NINE_PATCH_SCALE: f32 = 3.0;

/// How the stretchable region fills extra space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ResizingMode {
    #[default]
    Stretch,
    Tile,
}

/// Bitmap plus the cap insets needed to draw it at arbitrary sizes.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizableImage {
    bitmap: Bitmap,
    scale: f32,
    cap_insets: Option<EdgeInsets>,
    resizing_mode: ResizingMode,
}

/// One of the nine regions produced when drawing a [`ResizableImage`].
///
/// `source` is in bitmap pixels, `destination` in points relative to the
/// target origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NinePatchRegion {
    pub source: Rect,
    pub destination: Rect,
}

impl ResizableImage {
    /// Plain image without cap insets; the whole bitmap stretches.
    pub fn unsliced(bitmap: Bitmap) -> Self {
        Self {
            bitmap,
            scale: 1.0,
            cap_insets: None,
            resizing_mode: ResizingMode::Stretch,
        }
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn into_bitmap(self) -> Bitmap {
        self.bitmap
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Cap insets in points; `None` when slicing fell back to the source bitmap.
    pub fn cap_insets(&self) -> Option<EdgeInsets> {
        self.cap_insets
    }

    pub fn resizing_mode(&self) -> ResizingMode {
        self.resizing_mode
    }

    pub fn with_resizing_mode(mut self, mode: ResizingMode) -> Self {
        self.resizing_mode = mode;
        self
    }

    /// Natural size in points.
    pub fn size(&self) -> Size {
        let px = self.bitmap.size();
        Size::new(px.width / self.scale, px.height / self.scale)
    }

    /// Splits the image into the regions needed to draw it at `target` size.
    ///
    /// Corners keep their natural size, edges stretch along one axis and the
    /// centre stretches along both. Empty regions are skipped. An image
    /// without cap insets yields a single region covering the target.
    pub fn patches(&self, target: Size) -> Vec<NinePatchRegion> {
        let source_px = self.bitmap.size();
        let Some(insets) = self.cap_insets else {
            return vec![NinePatchRegion {
                source: Rect::from_size(source_px),
                destination: Rect::from_size(target),
            }];
        };

        let s = self.scale;
        let src_cols = [
            (0.0, insets.left * s),
            (insets.left * s, source_px.width - insets.right * s),
            (source_px.width - insets.right * s, source_px.width),
        ];
        let src_rows = [
            (0.0, insets.top * s),
            (insets.top * s, source_px.height - insets.bottom * s),
            (source_px.height - insets.bottom * s, source_px.height),
        ];
        let mid_w = (target.width - insets.horizontal_sum()).max(0.0);
        let mid_h = (target.height - insets.vertical_sum()).max(0.0);
        let dst_cols = [
            (0.0, insets.left),
            (insets.left, insets.left + mid_w),
            (target.width - insets.right, target.width),
        ];
        let dst_rows = [
            (0.0, insets.top),
            (insets.top, insets.top + mid_h),
            (target.height - insets.bottom, target.height),
        ];

        let mut regions = Vec::with_capacity(9);
        for (row, (sy0, sy1)) in src_rows.iter().enumerate() {
            for (col, (sx0, sx1)) in src_cols.iter().enumerate() {
                let (dx0, dx1) = dst_cols[col];
                let (dy0, dy1) = dst_rows[row];
                let source = Rect::new(*sx0, *sy0, sx1 - sx0, sy1 - sy0);
                let destination = Rect::new(dx0, dy0, dx1 - dx0, dy1 - dy0);
                if source.is_empty() || destination.is_empty() {
                    continue;
                }
                regions.push(NinePatchRegion {
                    source,
                    destination,
                });
            }
        }
        regions
    }
}

/// Stretch-region insets read from the top and left marker lines.
///
/// Returns `None` when either line has no fully opaque pixel, when the bitmap
/// is smaller than 3x3, or when `scale` is not a positive finite number.
pub fn stretch_insets(bitmap: &Bitmap, scale: f32) -> Option<EdgeInsets> {
    if !accepts(bitmap, scale) {
        return None;
    }
    let (w, h) = (bitmap.width(), bitmap.height());
    let top = bitmap.row_span(0, 1, w - 1);
    let left = bitmap.column_span(0, 1, h - 1);
    marker_insets(&top, &left).map(|px| px / scale)
}

/// Content-area insets read from the bottom and right marker lines.
///
/// The bottom line supplies the left/right insets and the right line the
/// top/bottom ones. Same failure policy as [`stretch_insets`].
pub fn content_insets(bitmap: &Bitmap, scale: f32) -> Option<EdgeInsets> {
    if !accepts(bitmap, scale) {
        return None;
    }
    let (w, h) = (bitmap.width(), bitmap.height());
    let bottom = bitmap.row_span(h - 1, 1, w - 1);
    let right = bitmap.column_span(w - 1, 1, h - 1);
    marker_insets(&bottom, &right).map(|px| px / scale)
}

/// Crops the marker frame and attaches stretch insets.
///
/// Bitmaps that are not valid nine-patches come back untouched, without cap
/// insets.
pub fn slice(bitmap: &Bitmap, scale: f32) -> ResizableImage {
    let Some(insets) = stretch_insets(bitmap, scale) else {
        log::debug!("{bitmap:?} has no nine-patch markers, using it unsliced");
        return ResizableImage::unsliced(bitmap.clone());
    };
    let interior = PixelRect::new(1, 1, bitmap.width() - 2, bitmap.height() - 2);
    match bitmap.crop(interior) {
        Some(cropped) => ResizableImage {
            bitmap: cropped,
            scale,
            cap_insets: Some(insets),
            resizing_mode: ResizingMode::Stretch,
        },
        None => ResizableImage::unsliced(bitmap.clone()),
    }
}

fn accepts(bitmap: &Bitmap, scale: f32) -> bool {
    if !(scale.is_finite() && scale > 0.0) {
        log::warn!("nine-patch scale must be positive, got {scale}");
        return false;
    }
    bitmap.width() >= 3 && bitmap.height() >= 3
}

fn marker_insets(horizontal: &[Color], vertical: &[Color]) -> Option<EdgeInsets> {
    let (left, right) = marker_span(horizontal)?;
    let (top, bottom) = marker_span(vertical)?;
    Some(EdgeInsets::from_components(
        left as f32,
        top as f32,
        right as f32,
        bottom as f32,
    ))
}

/// Distance of the first marker from the start and of the last marker from
/// the end of `line`.
fn marker_span(line: &[Color]) -> Option<(usize, usize)> {
    let first = line.iter().position(Color::is_opaque)?;
    let last = line.iter().rposition(Color::is_opaque)?;
    Some((first, line.len() - 1 - last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(width: u32, height: u32, marks: &[(u32, u32)]) -> Bitmap {
        let mut bitmap = Bitmap::new_transparent(width, height).unwrap();
        for &(x, y) in marks {
            bitmap.set_pixel(x, y, Color::BLACK);
        }
        bitmap
    }

    #[test]
    fn span_measures_from_both_ends() {
        let t = Color::TRANSPARENT;
        let o = Color::BLACK;
        assert_eq!(marker_span(&[t, o, o, t, t]), Some((1, 2)));
        assert_eq!(marker_span(&[o]), Some((0, 0)));
        assert_eq!(marker_span(&[t, t]), None);
    }

    #[test]
    fn disjoint_markers_collapse_to_outer_bounds() {
        let t = Color::TRANSPARENT;
        let o = Color::BLACK;
        assert_eq!(marker_span(&[t, o, t, o, t, t]), Some((1, 2)));
    }

    #[test]
    fn five_by_five_single_markers() {
        let bitmap = marked(5, 5, &[(2, 0), (0, 2)]);
        let insets = stretch_insets(&bitmap, 1.0).unwrap();
        assert_eq!(insets, EdgeInsets::uniform(1.0));
    }

    #[test]
    fn near_opaque_is_not_a_marker() {
        let mut bitmap = marked(5, 5, &[(0, 2)]);
        bitmap.set_pixel(2, 0, Color::from_rgba_u8(0, 0, 0, 254));
        assert_eq!(stretch_insets(&bitmap, 1.0), None);
    }

    #[test]
    fn corner_pixels_are_not_scanned() {
        let bitmap = marked(5, 5, &[(0, 0), (4, 0), (0, 4)]);
        assert_eq!(stretch_insets(&bitmap, 1.0), None);
    }

    #[test]
    fn content_insets_use_bottom_and_right_lines() {
        let bitmap = marked(6, 6, &[(1, 5), (2, 5), (5, 3)]);
        let insets = content_insets(&bitmap, 1.0).unwrap();
        assert_eq!(insets, EdgeInsets::from_components(0.0, 2.0, 2.0, 1.0));
        assert_eq!(stretch_insets(&bitmap, 1.0), None);
    }

    #[test]
    fn degenerate_inputs_have_no_insets() {
        let tiny = marked(2, 5, &[(1, 0), (0, 1)]);
        assert_eq!(stretch_insets(&tiny, 1.0), None);
        let bitmap = marked(5, 5, &[(2, 0), (0, 2)]);
        assert_eq!(stretch_insets(&bitmap, 0.0), None);
        assert_eq!(stretch_insets(&bitmap, f32::NAN), None);
    }

    #[test]
    fn slice_crops_frame() {
        let bitmap = marked(7, 6, &[(3, 0), (0, 2), (0, 3)]);
        let image = slice(&bitmap, 1.0);
        assert_eq!(image.bitmap().width(), 5);
        assert_eq!(image.bitmap().height(), 4);
        assert_eq!(
            image.cap_insets(),
            Some(EdgeInsets::from_components(2.0, 1.0, 2.0, 1.0))
        );
        assert_eq!(image.resizing_mode(), ResizingMode::Stretch);
    }

    #[test]
    fn slice_falls_back_without_markers() {
        let bitmap = marked(5, 5, &[(2, 0)]);
        let image = slice(&bitmap, 2.0);
        assert_eq!(image.cap_insets(), None);
        assert_eq!(image.bitmap(), &bitmap);
    }

    #[test]
    fn unsliced_patches_cover_target() {
        let image = ResizableImage::unsliced(Bitmap::new_transparent(4, 4).unwrap());
        let regions = image.patches(Size::new(10.0, 20.0));
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].destination, Rect::new(0.0, 0.0, 10.0, 20.0));
        assert_eq!(regions[0].source, Rect::new(0.0, 0.0, 4.0, 4.0));
    }

    #[test]
    fn patches_keep_corners_and_stretch_centre() {
        // 7x7 with markers on inner index 2 -> 5x5 interior, insets 2/2/2/2 px.
        let bitmap = marked(7, 7, &[(3, 0), (0, 3)]);
        let image = slice(&bitmap, 2.0);
        assert_eq!(image.cap_insets(), Some(EdgeInsets::uniform(1.0)));
        assert_eq!(image.size(), Size::new(2.5, 2.5));

        let regions = image.patches(Size::new(10.0, 6.0));
        assert_eq!(regions.len(), 9);

        let top_left = regions[0];
        assert_eq!(top_left.source, Rect::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(top_left.destination, Rect::new(0.0, 0.0, 1.0, 1.0));

        let centre = regions[4];
        assert_eq!(centre.source, Rect::new(2.0, 2.0, 1.0, 1.0));
        assert_eq!(centre.destination, Rect::new(1.0, 1.0, 8.0, 4.0));

        let bottom_right = regions[8];
        assert_eq!(bottom_right.source, Rect::new(3.0, 3.0, 2.0, 2.0));
        assert_eq!(bottom_right.destination, Rect::new(9.0, 5.0, 1.0, 1.0));
    }

    #[test]
    fn zero_insets_skip_empty_columns() {
        // Markers span the whole border, so every cap inset is zero.
        let bitmap = marked(5, 5, &[(1, 0), (2, 0), (3, 0), (0, 1), (0, 2), (0, 3)]);
        let image = slice(&bitmap, 1.0);
        assert_eq!(image.cap_insets(), Some(EdgeInsets::ZERO));
        let regions = image.patches(Size::new(9.0, 9.0));
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].destination, Rect::new(0.0, 0.0, 9.0, 9.0));
    }
}

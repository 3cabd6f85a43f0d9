//! Owned RGBA8 bitmaps.

use crate::{Color, PixelRect, Size};

const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug)]
pub enum BitmapError {
    InvalidDimensions { width: u32, height: u32 },
    BufferSizeMismatch { expected: usize, actual: usize },
    #[cfg(feature = "png")]
    Decode(image::ImageError),
}

impl std::fmt::Display for BitmapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BitmapError::InvalidDimensions { width, height } => {
                write!(f, "invalid bitmap dimensions {width}x{height}")
            }
            BitmapError::BufferSizeMismatch { expected, actual } => {
                write!(f, "pixel buffer holds {actual} bytes; expected {expected}")
            }
            #[cfg(feature = "png")]
            BitmapError::Decode(err) => write!(f, "failed to decode image: {err}"),
        }
    }
}

impl std::error::Error for BitmapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "png")]
            BitmapError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "png")]
impl From<image::ImageError> for BitmapError {
    fn from(err: image::ImageError) -> Self {
        BitmapError::Decode(err)
    }
}

/// Row-major RGBA8 pixel buffer, origin at the top-left corner.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Wraps raw RGBA8 bytes. The buffer must hold exactly `width * height * 4` bytes.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(BitmapError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Fully transparent bitmap.
    pub fn new_transparent(width: u32, height: u32) -> Result<Self, BitmapError> {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::InvalidDimensions { width, height });
        }
        let rgba = color.to_rgba_u8();
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * BYTES_PER_PIXEL)
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decodes an encoded image (PNG) into RGBA8.
    #[cfg(feature = "png")]
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, BitmapError> {
        let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("decoded {width}x{height} png");
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel dimensions as a float size.
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    pub fn as_rgba8(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_rgba8(self) -> Vec<u8> {
        self.pixels
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }

    /// Normalized color of the pixel at (x, y), or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let at = self.offset(x, y)?;
        let p = &self.pixels[at..at + BYTES_PER_PIXEL];
        Some(Color::from_rgba_u8(p[0], p[1], p[2], p[3]))
    }

    /// Writes a pixel; out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(at) = self.offset(x, y) {
            self.pixels[at..at + BYTES_PER_PIXEL].copy_from_slice(&color.to_rgba_u8());
        }
    }

    /// Colors of row `y` between columns `start..end`.
    pub fn row_span(&self, y: u32, start: u32, end: u32) -> Vec<Color> {
        (start..end.min(self.width))
            .filter_map(|x| self.pixel(x, y))
            .collect()
    }

    /// Colors of column `x` between rows `start..end`.
    pub fn column_span(&self, x: u32, start: u32, end: u32) -> Vec<Color> {
        (start..end.min(self.height))
            .filter_map(|y| self.pixel(x, y))
            .collect()
    }

    /// Copies out a sub-rectangle. Returns `None` when the rectangle is empty
    /// or reaches past the bitmap bounds.
    pub fn crop(&self, rect: PixelRect) -> Option<Bitmap> {
        if rect.is_empty() || rect.max_x() > self.width || rect.max_y() > self.height {
            return None;
        }
        let row_bytes = rect.width as usize * BYTES_PER_PIXEL;
        let mut pixels = Vec::with_capacity(row_bytes * rect.height as usize);
        for y in rect.y..rect.max_y() {
            let start = self.offset(rect.x, y)?;
            pixels.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        Some(Bitmap {
            width: rect.width,
            height: rect.height,
            pixels,
        })
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer() {
        let err = Bitmap::from_rgba8(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            BitmapError::BufferSizeMismatch {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            Bitmap::new_transparent(0, 4),
            Err(BitmapError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn pixel_access_is_row_major() {
        let mut bitmap = Bitmap::new_transparent(3, 2).unwrap();
        bitmap.set_pixel(2, 1, Color::BLACK);
        assert_eq!(bitmap.pixel(2, 1), Some(Color::BLACK));
        assert_eq!(&bitmap.as_rgba8()[20..24], &[0, 0, 0, 255]);
        assert_eq!(bitmap.pixel(3, 0), None);
    }

    #[test]
    fn crop_copies_interior() {
        let mut bitmap = Bitmap::new_transparent(4, 4).unwrap();
        bitmap.set_pixel(1, 1, Color::WHITE);
        bitmap.set_pixel(2, 2, Color::BLACK);

        let cropped = bitmap.crop(PixelRect::new(1, 1, 2, 2)).unwrap();
        assert_eq!(cropped.width(), 2);
        assert_eq!(cropped.height(), 2);
        assert_eq!(cropped.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(cropped.pixel(1, 1), Some(Color::BLACK));
        assert_eq!(cropped.pixel(1, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn crop_out_of_bounds_is_none() {
        let bitmap = Bitmap::new_transparent(4, 4).unwrap();
        assert!(bitmap.crop(PixelRect::new(2, 2, 3, 1)).is_none());
        assert!(bitmap.crop(PixelRect::new(0, 0, 0, 1)).is_none());
    }

    #[test]
    fn spans_clip_to_bounds() {
        let bitmap = Bitmap::new_transparent(3, 5).unwrap();
        assert_eq!(bitmap.row_span(0, 1, 10).len(), 2);
        assert_eq!(bitmap.column_span(0, 1, 4).len(), 3);
    }
}

//! Slices a nine-patch bitmap and prints the regions it would draw.

use anyhow::Context;
use dqtool_ui_graphics::nine_patch::{content_insets, slice};
use dqtool_ui_graphics::{Bitmap, Color, Size, DEFAULT_NINE_PATCH_SCALE};
use std::path::Path;

/// Target the sliced image is laid out into, in points.
const BUTTON_SIZE: Size = Size::new(160.0, 44.0);

pub fn run(path: Option<&Path>) -> anyhow::Result<()> {
    let (bitmap, scale) = match path {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let bitmap = Bitmap::from_png_bytes(&bytes)
                .with_context(|| format!("decoding {}", path.display()))?;
            (bitmap, DEFAULT_NINE_PATCH_SCALE)
        }
        None => (rounded_button()?, 1.0),
    };
    log::info!(
        "nine-patch source {}x{} at scale {scale}",
        bitmap.width(),
        bitmap.height()
    );

    match content_insets(&bitmap, scale) {
        Some(padding) => log::info!("content padding {padding:?}"),
        None => log::info!("no content markers"),
    }

    let image = slice(&bitmap, scale);
    match image.cap_insets() {
        Some(insets) => log::info!("cap insets {insets:?}, natural size {:?}", image.size()),
        None => log::warn!("not a nine-patch, drawing it stretched"),
    }
    for region in image.patches(BUTTON_SIZE) {
        log::info!("  {:?} -> {:?}", region.source, region.destination);
    }
    Ok(())
}

/// 14x12 button with a 4 px rounded cap on every side, drawn by hand.
fn rounded_button() -> anyhow::Result<Bitmap> {
    let (w, h) = (14, 12);
    let mut bitmap = Bitmap::new_transparent(w, h)?;
    let fill = Color::from_rgba_u8(0x2f, 0x6f, 0xeb, 0xff);
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let corner = (x == 1 || x == w - 2) && (y == 1 || y == h - 2);
            if !corner {
                bitmap.set_pixel(x, y, fill);
            }
        }
    }
    for x in 5..9 {
        bitmap.set_pixel(x, 0, Color::BLACK);
    }
    for y in 5..7 {
        bitmap.set_pixel(0, y, Color::BLACK);
    }
    for x in 3..11 {
        bitmap.set_pixel(x, h - 1, Color::BLACK);
    }
    for y in 3..9 {
        bitmap.set_pixel(w - 1, y, Color::BLACK);
    }
    Ok(bitmap)
}

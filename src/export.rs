use std::io::Cursor;

use egui::Color32;
use image::{ImageFormat, RgbaImage};

use crate::error::EditorError;

/// Encode a composited frame as a PNG byte stream at its native
/// resolution. Pure function of the frame contents.
pub fn encode_png(frame: &[Color32], width: usize, height: usize) -> Result<Vec<u8>, EditorError> {
    debug_assert_eq!(frame.len(), width * height);

    let mut rgba = RgbaImage::new(width as u32, height as u32);
    for (i, px) in frame.iter().enumerate() {
        let x = (i % width) as u32;
        let y = (i / width) as u32;
        rgba.put_pixel(x, y, image::Rgba([px.r(), px.g(), px.b(), px.a()]));
    }

    let mut out = Cursor::new(Vec::new());
    rgba.write_to(&mut out, ImageFormat::Png)
        .map_err(EditorError::ExportEncode)?;
    Ok(out.into_inner())
}

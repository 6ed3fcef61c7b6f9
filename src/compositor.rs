use egui::{Color32, ColorImage, Rect};

use crate::buffer::PaintBuffer;
use crate::overlay::OverlayRegistry;
use crate::sticker::Sticker;

/// Selection outline styling.
const SELECTION_COLOR: Color32 = Color32::from_rgb(0x7b, 0xdc, 0xff);
const DASH_ON: i32 = 6;
const DASH_OFF: i32 = 4;
const OUTLINE_THICKNESS: i32 = 2;

/// Merges the paint buffer and the overlay sequence into the display
/// frame.
///
/// Every render runs the same deterministic sequence (base layer, then
/// each sticker in paint order, then the dashed outline over the
/// selected sticker), so rendering twice with no intervening state
/// change produces bit-identical frames. The compositor reads the paint
/// buffer and registry; it never mutates them.
pub struct Compositor {
    width: usize,
    height: usize,
    frame: Vec<Color32>,
}

impl Compositor {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            frame: vec![Color32::TRANSPARENT; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The most recently composited frame, row-major.
    pub fn frame(&self) -> &[Color32] {
        &self.frame
    }

    /// Read a composited pixel; `None` outside the frame.
    pub fn sample(&self, x: i32, y: i32) -> Option<Color32> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.frame[y as usize * self.width + x as usize])
    }

    /// Copy of the current frame as an egui image, ready for texture
    /// upload by a host UI.
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage {
            size: [self.width, self.height],
            pixels: self.frame.clone(),
        }
    }

    /// Composite one frame: paint buffer as the base layer, stickers on
    /// top in sequence order, dashed bounds over the selection.
    pub fn render(&mut self, paint: &PaintBuffer, overlays: &OverlayRegistry) {
        debug_assert_eq!(paint.width(), self.width);
        debug_assert_eq!(paint.height(), self.height);

        self.frame.copy_from_slice(paint.pixels());

        for sticker in overlays.iter() {
            self.blit_sticker(sticker);
        }
        if let Some(selected) = overlays.selected() {
            self.draw_dashed_rect(selected.bounds());
        }
    }

    /// Draw a sticker scaled into its bounding box, nearest-neighbor,
    /// alpha-blended over what is already in the frame. Portions outside
    /// the frame are clipped.
    fn blit_sticker(&mut self, sticker: &Sticker) {
        let bounds = sticker.bounds();
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }
        let image = sticker.image();
        if image.width() == 0 || image.height() == 0 {
            return;
        }

        let x0 = (bounds.min.x.floor() as i32).max(0);
        let y0 = (bounds.min.y.floor() as i32).max(0);
        let x1 = (bounds.max.x.ceil() as i32).min(self.width as i32);
        let y1 = (bounds.max.y.ceil() as i32).min(self.height as i32);

        for dy in y0..y1 {
            let v = (dy as f32 + 0.5 - bounds.min.y) / bounds.height();
            let sy = ((v * image.height() as f32) as usize).min(image.height() - 1);
            for dx in x0..x1 {
                let u = (dx as f32 + 0.5 - bounds.min.x) / bounds.width();
                if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                    continue;
                }
                let sx = ((u * image.width() as f32) as usize).min(image.width() - 1);
                let src = image.pixel(sx, sy);
                let i = dy as usize * self.width + dx as usize;
                self.frame[i] = blend_over(self.frame[i], src);
            }
        }
    }

    /// Dashed rectangle outline around a selection, `OUTLINE_THICKNESS`
    /// pixels drawn inward from each edge.
    fn draw_dashed_rect(&mut self, rect: Rect) {
        let x0 = rect.min.x.round() as i32;
        let y0 = rect.min.y.round() as i32;
        let x1 = rect.max.x.round() as i32;
        let y1 = rect.max.y.round() as i32;

        for x in x0..=x1 {
            if dash_on(x - x0) {
                for t in 0..OUTLINE_THICKNESS {
                    self.plot(x, y0 + t);
                    self.plot(x, y1 - t);
                }
            }
        }
        for y in y0..=y1 {
            if dash_on(y - y0) {
                for t in 0..OUTLINE_THICKNESS {
                    self.plot(x0 + t, y);
                    self.plot(x1 - t, y);
                }
            }
        }
    }

    fn plot(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.frame[y as usize * self.width + x as usize] = SELECTION_COLOR;
    }
}

fn dash_on(offset: i32) -> bool {
    offset.rem_euclid(DASH_ON + DASH_OFF) < DASH_ON
}

/// Source-over blend of premultiplied colors.
fn blend_over(dst: Color32, src: Color32) -> Color32 {
    match src.a() {
        255 => src,
        0 => dst,
        alpha => {
            let inv = 255 - alpha as u32;
            let channel = |s: u8, d: u8| -> u8 {
                (s as u32 + (d as u32 * inv + 127) / 255).min(255) as u8
            };
            Color32::from_rgba_premultiplied(
                channel(src.r(), dst.r()),
                channel(src.g(), dst.g()),
                channel(src.b(), dst.b()),
                channel(src.a(), dst.a()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_source_replaces_destination() {
        let dst = Color32::from_rgb(10, 20, 30);
        let src = Color32::from_rgb(200, 100, 50);
        assert_eq!(blend_over(dst, src), src);
    }

    #[test]
    fn transparent_source_keeps_destination() {
        let dst = Color32::from_rgb(10, 20, 30);
        assert_eq!(blend_over(dst, Color32::TRANSPARENT), dst);
    }
}

use egui::{Color32, Pos2, pos2};

/// The paint layer: a fixed-size grid of pixels that freehand strokes
/// and flood fills mutate. Dimensions are set once at creation and
/// never change; the compositor only ever reads from it.
pub struct PaintBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
}

impl PaintBuffer {
    /// Create a buffer filled with `background`.
    pub fn new(width: usize, height: usize, background: Color32) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width + x as usize
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Reset every pixel to one flat color. Used for initialization and
    /// the clear action; all prior pixel state is lost.
    pub fn fill_solid(&mut self, color: Color32) {
        self.pixels.fill(color);
    }

    /// Paint a filled, hard-edged circle centered at `(x, y)`.
    /// Out-of-bounds portions are clipped.
    pub fn draw_dot(&mut self, x: i32, y: i32, radius: f32, color: Color32) {
        let r = radius.max(0.0);
        let r_sq = r * r;
        let reach = r.ceil() as i32;
        for py in y - reach..=y + reach {
            for px in x - reach..=x + reach {
                if !self.in_bounds(px, py) {
                    continue;
                }
                let dx = (px - x) as f32;
                let dy = (py - y) as f32;
                if dx * dx + dy * dy <= r_sq {
                    let i = self.index(px, py);
                    self.pixels[i] = color;
                }
            }
        }
    }

    /// Paint a round-cap stroke of the given width between two points.
    ///
    /// Called once per pointer-move sample with the previous and current
    /// point, so discrete samples join into a continuous stroke whatever
    /// the pointer sampling rate.
    pub fn draw_segment(
        &mut self,
        ax: i32,
        ay: i32,
        bx: i32,
        by: i32,
        width: f32,
        color: Color32,
    ) {
        let half = (width / 2.0).max(0.0);
        let half_sq = half * half;
        let reach = half.ceil() as i32 + 1;

        let x0 = ax.min(bx) - reach;
        let x1 = ax.max(bx) + reach;
        let y0 = ay.min(by) - reach;
        let y1 = ay.max(by) + reach;

        let a = pos2(ax as f32, ay as f32);
        let b = pos2(bx as f32, by as f32);

        for py in y0..=y1 {
            for px in x0..=x1 {
                if !self.in_bounds(px, py) {
                    continue;
                }
                let p = pos2(px as f32, py as f32);
                if distance_sq_to_segment(p, a, b) <= half_sq {
                    let i = self.index(px, py);
                    self.pixels[i] = color;
                }
            }
        }
    }

    /// Read the color at a coordinate; `None` outside the buffer.
    pub fn sample(&self, x: i32, y: i32) -> Option<Color32> {
        if self.in_bounds(x, y) {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Replace the whole pixel grid in one step. The flood fill engine
    /// works on a snapshot and commits it here, so no reader ever sees
    /// a partially-filled buffer.
    pub(crate) fn write_pixels(&mut self, pixels: Vec<Color32>) {
        debug_assert_eq!(pixels.len(), self.pixels.len());
        self.pixels = pixels;
    }
}

/// Squared distance from `p` to the closed segment `a`..`b`.
fn distance_sq_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return (p - a).length_sq();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    (p - closest).length_sq()
}

use egui::Color32;

use crate::buffer::PaintBuffer;

/// Recolor the maximal 4-connected region of pixels matching the color
/// under the seed `(x, y)` to `new_color`.
///
/// Matching compares RGB only; recolored pixels always come out fully
/// opaque. The traversal is an explicit-stack depth-first walk (never
/// recursive), runs on a snapshot of the pixel grid, and commits the
/// snapshot back in one step. Cost is proportional to the filled region,
/// so a click on a uniform background walks the whole buffer; that is
/// accepted, not worked around.
pub fn flood_fill(buffer: &mut PaintBuffer, x: i32, y: i32, new_color: Color32) {
    let w = buffer.width() as i32;
    let h = buffer.height() as i32;
    if x < 0 || y < 0 || x >= w || y >= h {
        return;
    }

    let mut pixels = buffer.pixels().to_vec();
    let idx = |px: i32, py: i32| (py * w + px) as usize;

    let target = pixels[idx(x, y)];
    let new_color = Color32::from_rgb(new_color.r(), new_color.g(), new_color.b());

    // A same-color click would otherwise scan the whole buffer while
    // every push re-qualifies: the region is "already filled".
    if same_rgb(target, new_color) {
        return;
    }

    let mut stack = vec![(x, y)];
    while let Some((cx, cy)) = stack.pop() {
        if cx < 0 || cy < 0 || cx >= w || cy >= h {
            continue;
        }
        let i = idx(cx, cy);
        if !same_rgb(pixels[i], target) {
            continue;
        }
        pixels[i] = new_color;
        stack.push((cx + 1, cy));
        stack.push((cx - 1, cy));
        stack.push((cx, cy + 1));
        stack.push((cx, cy - 1));
    }

    buffer.write_pixels(pixels);
}

fn same_rgb(a: Color32, b: Color32) -> bool {
    a.r() == b.r() && a.g() == b.g() && a.b() == b.b()
}

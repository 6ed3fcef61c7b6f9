use egui::{Pos2, Rect};

/// Convert a viewport-space pointer position into integer buffer-space
/// coordinates.
///
/// `canvas_rect` is the rectangle the canvas currently occupies on
/// screen. It arrives with every input event and is never cached here:
/// the on-screen rectangle can be resized independently of the buffer
/// resolution. Results may fall outside the buffer during fast drags;
/// callers clamp or reject.
pub fn to_buffer(
    viewport: Pos2,
    canvas_rect: Rect,
    buffer_width: usize,
    buffer_height: usize,
) -> (i32, i32) {
    let scale_x = buffer_width as f32 / canvas_rect.width();
    let scale_y = buffer_height as f32 / canvas_rect.height();
    (
        ((viewport.x - canvas_rect.min.x) * scale_x).floor() as i32,
        ((viewport.y - canvas_rect.min.y) * scale_y).floor() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn maps_identity_when_rect_matches_buffer() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        assert_eq!(to_buffer(pos2(10.0, 20.0), rect, 100, 100), (10, 20));
    }

    #[test]
    fn scales_a_shrunken_display_rect_back_up() {
        // Canvas shown at half size: one on-screen unit is two buffer units.
        let rect = Rect::from_min_size(pos2(50.0, 10.0), vec2(50.0, 50.0));
        assert_eq!(to_buffer(pos2(50.0, 10.0), rect, 100, 100), (0, 0));
        assert_eq!(to_buffer(pos2(75.0, 35.0), rect, 100, 100), (50, 50));
    }

    #[test]
    fn out_of_rect_positions_pass_through_unclamped() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        assert_eq!(to_buffer(pos2(-5.0, 120.0), rect, 100, 100), (-5, 120));
    }
}

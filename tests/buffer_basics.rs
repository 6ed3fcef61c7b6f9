use egui::Color32;
use raster_paint::PaintBuffer;

const BG: Color32 = Color32::from_rgb(0x11, 0x17, 0x22);

fn test_buffer() -> PaintBuffer {
    PaintBuffer::new(100, 100, BG)
}

#[test]
fn new_buffer_is_background_everywhere() {
    let buffer = test_buffer();
    assert_eq!(buffer.sample(0, 0), Some(BG));
    assert_eq!(buffer.sample(99, 99), Some(BG));
    assert_eq!(buffer.sample(50, 50), Some(BG));
}

#[test]
fn dot_center_samples_back_the_drawn_color() {
    let red = Color32::from_rgb(255, 0, 0);
    let mut buffer = test_buffer();

    // Holds at every in-bounds center, including tiny radii.
    for &(x, y, r) in &[(50, 50, 5.0), (0, 0, 1.0), (99, 99, 3.0), (10, 90, 0.0)] {
        buffer.draw_dot(x, y, r, red);
        assert_eq!(buffer.sample(x, y), Some(red), "dot at ({x},{y}) r={r}");
    }
}

#[test]
fn dot_does_not_reach_past_its_radius() {
    let red = Color32::from_rgb(255, 0, 0);
    let mut buffer = test_buffer();
    buffer.draw_dot(50, 50, 5.0, red);

    assert_eq!(buffer.sample(50, 55), Some(red));
    assert_eq!(buffer.sample(50, 56), Some(BG));
    assert_eq!(buffer.sample(60, 60), Some(BG));
}

#[test]
fn out_of_bounds_dot_is_clipped_not_a_panic() {
    let red = Color32::from_rgb(255, 0, 0);
    let mut buffer = test_buffer();

    buffer.draw_dot(-10, -10, 5.0, red);
    buffer.draw_dot(200, 50, 5.0, red);
    assert_eq!(buffer.sample(0, 0), Some(BG));

    // A dot straddling the edge paints the in-bounds part.
    buffer.draw_dot(0, 50, 4.0, red);
    assert_eq!(buffer.sample(0, 50), Some(red));
    assert_eq!(buffer.sample(3, 50), Some(red));
}

#[test]
fn segment_paints_a_continuous_stroke() {
    let blue = Color32::from_rgb(0, 0, 255);
    let mut buffer = test_buffer();
    buffer.draw_segment(10, 20, 80, 20, 6.0, blue);

    // Endpoints, midpoint, and the capsule's half-width.
    assert_eq!(buffer.sample(10, 20), Some(blue));
    assert_eq!(buffer.sample(45, 20), Some(blue));
    assert_eq!(buffer.sample(80, 20), Some(blue));
    assert_eq!(buffer.sample(45, 23), Some(blue));
    assert_eq!(buffer.sample(45, 26), Some(BG));
}

#[test]
fn degenerate_segment_is_a_dot() {
    let blue = Color32::from_rgb(0, 0, 255);
    let mut buffer = test_buffer();
    buffer.draw_segment(30, 30, 30, 30, 8.0, blue);

    assert_eq!(buffer.sample(30, 30), Some(blue));
    assert_eq!(buffer.sample(34, 30), Some(blue));
    assert_eq!(buffer.sample(40, 30), Some(BG));
}

#[test]
fn fill_solid_invalidates_all_prior_state() {
    let red = Color32::from_rgb(255, 0, 0);
    let mut buffer = test_buffer();
    buffer.draw_dot(50, 50, 10.0, red);

    buffer.fill_solid(BG);
    assert!(buffer.pixels().iter().all(|&p| p == BG));
}

#[test]
fn sample_outside_the_buffer_is_none() {
    let buffer = test_buffer();
    assert_eq!(buffer.sample(-1, 0), None);
    assert_eq!(buffer.sample(0, -1), None);
    assert_eq!(buffer.sample(100, 0), None);
    assert_eq!(buffer.sample(0, 100), None);
}

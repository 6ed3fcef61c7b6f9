use std::sync::Arc;

use egui::{Color32, Rect, pos2, vec2};
use raster_paint::{Editor, EditorConfig, InputEvent, InputLocation, StickerImage, ToolKind};

const BG: Color32 = Color32::from_rgb(0x11, 0x17, 0x22);
const RED: Color32 = Color32::from_rgb(255, 0, 0);

fn test_editor() -> Editor {
    Editor::new(EditorConfig {
        width: 100,
        height: 100,
        ..Default::default()
    })
}

fn loc(x: f32, y: f32) -> InputLocation {
    InputLocation::new(
        pos2(x, y),
        Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0)),
    )
}

fn decode_pixel(png: &[u8], x: u32, y: u32) -> Color32 {
    let decoded = image::load_from_memory(png).expect("export must be decodable");
    let rgba = decoded.to_rgba8();
    let p = rgba.get_pixel(x, y);
    Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3])
}

#[test]
fn export_is_a_decodable_png_at_native_resolution() {
    let mut editor = test_editor();
    let png = editor.export_png().unwrap();

    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!(decoded.width(), 100);
    assert_eq!(decoded.height(), 100);
}

#[test]
fn clear_then_draw_round_trips_through_the_export() {
    let mut editor = test_editor();
    editor.clear();

    // A solid red block around the center, drawn as a wide stroke.
    editor.set_brush_color(RED);
    editor.set_brush_size(10.0);
    editor.handle_event(InputEvent::PointerDown { location: loc(40.0, 50.0) });
    editor.handle_event(InputEvent::PointerMove { location: loc(60.0, 50.0) });
    editor.handle_event(InputEvent::PointerUp);

    let png = editor.export_png().unwrap();
    assert_eq!(decode_pixel(&png, 50, 50), RED);
    assert_eq!(decode_pixel(&png, 5, 5), BG);
}

#[test]
fn export_includes_composited_stickers() {
    let green = Color32::from_rgb(0, 200, 0);
    let mut editor = test_editor();
    editor.add_sticker_image(Arc::new(StickerImage::from_pixels(
        [20, 20],
        vec![green; 400],
    )));

    let png = editor.export_png().unwrap();
    // Sticker sits at the buffer center, over the background.
    assert_eq!(decode_pixel(&png, 50, 50), green);
    assert_eq!(decode_pixel(&png, 5, 5), BG);
}

#[test]
fn export_does_not_disturb_editor_state() {
    let mut editor = test_editor();
    editor.set_brush_color(RED);
    editor.handle_event(InputEvent::PointerDown { location: loc(50.0, 50.0) });

    let first = editor.export_png().unwrap();
    let second = editor.export_png().unwrap();

    // Idempotent: no state changed between the two exports.
    assert_eq!(first, second);
    assert_eq!(editor.tool(), ToolKind::Draw);
    assert_eq!(editor.paint().sample(50, 50), Some(RED));
}

#[test]
fn selection_outline_shows_up_only_while_selected() {
    let white = Color32::WHITE;
    let mut editor = test_editor();
    editor.add_sticker_image(Arc::new(StickerImage::from_pixels(
        [20, 20],
        vec![white; 400],
    )));

    let unselected = editor.export_png().unwrap();
    assert_eq!(decode_pixel(&unselected, 40, 40), white);

    // Select it; the top-left bounds corner now carries the dashed
    // outline color.
    editor.handle_event(InputEvent::PointerDown { location: loc(50.0, 50.0) });
    editor.handle_event(InputEvent::PointerUp);
    let selected = editor.export_png().unwrap();
    assert_eq!(
        decode_pixel(&selected, 40, 40),
        Color32::from_rgb(0x7b, 0xdc, 0xff)
    );
}

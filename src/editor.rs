use std::sync::Arc;

use egui::{Color32, Key, Pos2, pos2};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::buffer::PaintBuffer;
use crate::compositor::Compositor;
use crate::error::EditorError;
use crate::event::{EditorEvent, EventBus, EventHandler};
use crate::export;
use crate::fill;
use crate::input::{InputEvent, InputLocation};
use crate::mapper;
use crate::overlay::OverlayRegistry;
use crate::sticker::{StickerId, StickerImage};
use crate::tool::{BrushConfig, DragState, ToolKind};

/// Fixed parameters of an editor session. Buffer dimensions never
/// change after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    pub width: usize,
    pub height: usize,
    /// Background the paint layer starts as, resets to on clear, and
    /// that the eraser paints with.
    pub background: Color32,
    /// Longest intrinsic side a sticker may keep at insert time.
    pub max_sticker_side: f32,
    /// Multiplicative step for keyboard scaling of the selection.
    pub scale_step: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            background: Color32::from_rgb(0x11, 0x17, 0x22),
            max_sticker_side: 256.0,
            scale_step: 1.1,
        }
    }
}

/// The editor context: one owned value holding the paint buffer, the
/// overlay registry, tool and drag state, brush settings, and the
/// compositor.
///
/// Nothing here is global, so independent editors can coexist and tests
/// run deterministically. All mutation happens synchronously inside
/// [`handle_event`] or the explicit methods below; the host drives
/// rendering by calling [`tick`] from its per-frame scheduler, and the
/// editor does no scheduling of its own.
///
/// [`handle_event`]: Editor::handle_event
/// [`tick`]: Editor::tick
pub struct Editor {
    config: EditorConfig,
    paint: PaintBuffer,
    overlays: OverlayRegistry,
    compositor: Compositor,
    tool: ToolKind,
    drag: DragState,
    brush: BrushConfig,
    bus: EventBus,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            paint: PaintBuffer::new(config.width, config.height, config.background),
            overlays: OverlayRegistry::new(),
            compositor: Compositor::new(config.width, config.height),
            tool: ToolKind::Draw,
            drag: DragState::Idle,
            brush: BrushConfig::default(),
            bus: EventBus::new(),
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn paint(&self) -> &PaintBuffer {
        &self.paint
    }

    pub fn overlays(&self) -> &OverlayRegistry {
        &self.overlays
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    /// Register a consumer of outbound editor notifications.
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.bus.subscribe(handler);
    }

    /// Switch the active tool, dropping any in-progress stroke or drag
    /// so stale state cannot mutate anything on a later event.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool == self.tool {
            return;
        }
        let old = self.tool;
        self.tool = tool;
        self.drag = DragState::Idle;
        info!("tool changed: {} -> {}", old.name(), tool.name());
        self.bus.emit(EditorEvent::ToolChanged { old, new: tool });
    }

    pub fn set_brush_color(&mut self, color: Color32) {
        self.brush.color = color;
    }

    /// Set the brush color from a hex literal; malformed input keeps
    /// the previous color.
    pub fn set_brush_color_hex(&mut self, literal: &str) {
        self.brush.set_color_hex(literal);
    }

    /// Update the brush size. While a sticker is selected the same
    /// control doubles as its scale slider, through a fixed size/10
    /// mapping (clamped like any other scale change).
    pub fn set_brush_size(&mut self, size: f32) {
        self.brush.size = size;
        if let Some(id) = self.overlays.selected_id() {
            self.overlays.set_scale(id, size / 10.0);
        }
    }

    /// Reset the paint layer to the background color. Stickers stay.
    pub fn clear(&mut self) {
        self.paint.fill_solid(self.config.background);
    }

    /// Route one input event to the active tool.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { location } => self.pointer_down(location),
            InputEvent::PointerMove { location } => self.pointer_move(location),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::KeyDown { key } => self.key_down(key),
            InputEvent::DroppedImage { bytes, location } => self.dropped_image(&bytes, location),
        }
    }

    fn pointer_down(&mut self, location: InputLocation) {
        let (x, y) = self.map(location);
        match self.tool {
            ToolKind::Move => {
                let point = pos2(x as f32, y as f32);
                let hit = self.overlays.hit_test(point);
                let previous = self.overlays.selected_id();
                self.overlays.select(hit);
                if previous != hit {
                    self.bus.emit(EditorEvent::SelectionChanged(hit));
                }
                self.drag = match hit.and_then(|id| self.overlays.get(id)) {
                    Some(sticker) => DragState::MovingSticker {
                        id: sticker.id(),
                        grab_offset: point - sticker.center(),
                    },
                    None => DragState::Idle,
                };
            }
            ToolKind::Fill => fill::flood_fill(&mut self.paint, x, y, self.brush.color),
            ToolKind::Sample => {
                // Force a composite so the read reflects this frame's
                // strokes, not the last rendered one.
                self.render_now();
                if let Some(sampled) = self.compositor.sample(x, y) {
                    let color = Color32::from_rgb(sampled.r(), sampled.g(), sampled.b());
                    self.brush.color = color;
                    self.bus.emit(EditorEvent::ColorPicked(color));
                }
            }
            ToolKind::Draw | ToolKind::Erase => {
                self.paint
                    .draw_dot(x, y, self.brush.size, self.stroke_color());
                self.drag = DragState::Stroking { last: (x, y) };
            }
        }
    }

    fn pointer_move(&mut self, location: InputLocation) {
        let (x, y) = self.map(location);
        match (self.tool, self.drag) {
            (ToolKind::Move, DragState::MovingSticker { id, grab_offset }) => {
                // Keep the grab point under the pointer rather than
                // snapping the center to it.
                self.overlays
                    .set_position(id, pos2(x as f32, y as f32) - grab_offset);
            }
            (ToolKind::Draw | ToolKind::Erase, DragState::Stroking { last }) => {
                self.paint.draw_segment(
                    last.0,
                    last.1,
                    x,
                    y,
                    self.brush.stroke_width(),
                    self.stroke_color(),
                );
                self.drag = DragState::Stroking { last: (x, y) };
            }
            _ => {}
        }
    }

    /// Pointer-up anywhere ends any in-progress operation, even when
    /// the pointer has left the canvas bounds.
    fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    fn key_down(&mut self, key: Key) {
        match key {
            Key::Num1 => self.set_tool(ToolKind::Draw),
            Key::Num2 => self.set_tool(ToolKind::Erase),
            Key::Num3 => self.set_tool(ToolKind::Fill),
            Key::Num4 => self.set_tool(ToolKind::Sample),
            Key::M => self.set_tool(ToolKind::Move),
            Key::Plus | Key::Equals => self.overlays.scale_selected_by(self.config.scale_step),
            Key::Minus => self.overlays.scale_selected_by(1.0 / self.config.scale_step),
            Key::Delete | Key::Backspace => self.delete_selected(),
            _ => {}
        }
    }

    /// Delete the selected sticker; silent no-op without a selection.
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.overlays.selected_id() {
            self.overlays.remove(id);
            self.bus.emit(EditorEvent::StickerRemoved(id));
            self.bus.emit(EditorEvent::SelectionChanged(None));
        }
    }

    fn dropped_image(&mut self, bytes: &[u8], location: InputLocation) {
        match StickerImage::decode(bytes) {
            Ok(image) => {
                let (x, y) = self.map(location);
                self.insert_sticker(Arc::new(image), pos2(x as f32, y as f32));
            }
            // Absorbed: a payload that fails to decode is dropped and
            // no sticker is created.
            Err(err) => warn!("dropped image payload rejected: {err}"),
        }
    }

    /// Programmatic insertion: decode an image byte stream, place it at
    /// the buffer center, and switch to the move tool so it can be
    /// positioned immediately.
    pub fn add_sticker_from_bytes(&mut self, bytes: &[u8]) -> Result<StickerId, EditorError> {
        let image = StickerImage::decode(bytes)?;
        Ok(self.add_sticker_image(Arc::new(image)))
    }

    /// Insert an already-decoded image at the buffer center and switch
    /// to the move tool.
    pub fn add_sticker_image(&mut self, image: Arc<StickerImage>) -> StickerId {
        let center = pos2(
            self.config.width as f32 / 2.0,
            self.config.height as f32 / 2.0,
        );
        self.insert_sticker(image, center)
    }

    fn insert_sticker(&mut self, image: Arc<StickerImage>, center: Pos2) -> StickerId {
        let id = self
            .overlays
            .insert(image, center, self.config.max_sticker_side);
        self.bus.emit(EditorEvent::StickerAdded(id));
        self.set_tool(ToolKind::Move);
        id
    }

    /// Continuous-mode render: the host's per-frame scheduler calls
    /// this once per display refresh.
    pub fn tick(&mut self) {
        self.render_now();
    }

    /// On-demand render: one synchronous composite of the current
    /// state. Identical sequence to [`tick`](Editor::tick), idempotent.
    pub fn render_now(&mut self) {
        self.compositor.render(&self.paint, &self.overlays);
    }

    /// Read a freshly composited pixel, rendering first so the result
    /// can never be stale.
    pub fn sample_at(&mut self, x: i32, y: i32) -> Option<Color32> {
        self.render_now();
        self.compositor.sample(x, y)
    }

    /// Export the current composite as a PNG byte stream at the
    /// buffer's native resolution. Renders first; mutates nothing else.
    pub fn export_png(&mut self) -> Result<Vec<u8>, EditorError> {
        self.render_now();
        export::encode_png(
            self.compositor.frame(),
            self.config.width,
            self.config.height,
        )
    }

    fn stroke_color(&self) -> Color32 {
        // The eraser is a drawing mode: it paints the background color
        // rather than punching true transparency.
        match self.tool {
            ToolKind::Erase => self.config.background,
            _ => self.brush.color,
        }
    }

    fn map(&self, location: InputLocation) -> (i32, i32) {
        mapper::to_buffer(
            location.position,
            location.canvas_rect,
            self.paint.width(),
            self.paint.height(),
        )
    }
}

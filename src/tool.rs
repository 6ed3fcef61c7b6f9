use egui::{Color32, Vec2};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::color;
use crate::sticker::StickerId;

/// The active tool. Switched only by explicit external command (UI
/// button or keyboard shortcut); never changes as a side effect of
/// pointer input, except that importing a sticker lands in `Move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    Draw,
    Erase,
    Fill,
    Sample,
    Move,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Erase => "erase",
            Self::Fill => "fill",
            Self::Sample => "sample",
            Self::Move => "move",
        }
    }
}

/// Transient pointer-drag state. Only meaningful while its owning tool
/// is active: switching tools resets this to `Idle` so a stale drag can
/// never mutate buffer or overlay data on a later event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// A draw/erase stroke in progress; `last` is the previous sampled
    /// buffer-space point, joined to the next sample by a segment.
    Stroking { last: (i32, i32) },
    /// A move-tool drag; `grab_offset` is pointer minus sticker center
    /// at grab time, preserved while dragging.
    MovingSticker {
        id: StickerId,
        grab_offset: Vec2,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Brush settings shared by the stroke tools. Owned by the surrounding
/// UI conceptually; the editor samples it at the moment of each
/// operation rather than caching derived values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Current draw color. Alpha is ignored; strokes paint opaquely.
    pub color: Color32,
    /// Dot radius; stroke width is twice this.
    pub size: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(0xff, 0xff, 0xff),
            size: 4.0,
        }
    }
}

impl BrushConfig {
    /// Stroke width used by segment painting.
    pub fn stroke_width(&self) -> f32 {
        self.size * 2.0
    }

    /// Set the color from a hex literal. A malformed literal keeps the
    /// last-known-valid color rather than failing the caller's handler.
    pub fn set_color_hex(&mut self, literal: &str) {
        match color::parse_hex(literal) {
            Ok(c) => self.color = c,
            Err(err) => warn!("ignoring bad color literal: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_hex_keeps_last_valid_color() {
        let mut brush = BrushConfig::default();
        brush.set_color_hex("#ff0000");
        assert_eq!(brush.color, Color32::from_rgb(255, 0, 0));

        brush.set_color_hex("not-a-color");
        assert_eq!(brush.color, Color32::from_rgb(255, 0, 0));
    }
}

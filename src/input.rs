use egui::{Key, Pos2, Rect};

/// Where a pointer event happened: the position in viewport coordinates
/// plus the rectangle the canvas currently occupies on screen. The rect
/// travels with every event because the display rectangle can change
/// size between events while the buffer resolution stays fixed.
#[derive(Debug, Clone, Copy)]
pub struct InputLocation {
    pub position: Pos2,
    pub canvas_rect: Rect,
}

impl InputLocation {
    pub fn new(position: Pos2, canvas_rect: Rect) -> Self {
        Self {
            position,
            canvas_rect,
        }
    }
}

/// Input events the host feeds into [`Editor::handle_event`]. These are
/// the whole input contract: pointer, keyboard, and image drops.
///
/// [`Editor::handle_event`]: crate::editor::Editor::handle_event
#[derive(Debug, Clone)]
pub enum InputEvent {
    PointerDown {
        location: InputLocation,
    },
    PointerMove {
        location: InputLocation,
    },
    /// Ends any in-progress stroke or drag, wherever the pointer is,
    /// including outside the canvas bounds.
    PointerUp,
    KeyDown {
        key: Key,
    },
    /// An encoded image payload dropped onto the canvas. Hosts send one
    /// event per payload.
    DroppedImage {
        bytes: Vec<u8>,
        location: InputLocation,
    },
}

use std::cell::RefCell;

use egui::Color32;

use crate::sticker::StickerId;
use crate::tool::ToolKind;

/// Notifications the editor emits toward external consumers (tool
/// palette highlighting, asset browsers). Consumers never mutate core
/// state through these; they are one-way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    /// The sample tool picked up a color; the brush already carries it.
    ColorPicked(Color32),
    SelectionChanged(Option<StickerId>),
    StickerAdded(StickerId),
    StickerRemoved(StickerId),
}

/// A registered consumer of editor events.
pub trait EventHandler {
    fn handle_event(&mut self, event: &EditorEvent);
}

impl<F: FnMut(&EditorEvent)> EventHandler for F {
    fn handle_event(&mut self, event: &EditorEvent) {
        self(event)
    }
}

/// A simple event bus broadcasting editor events to registered handlers.
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive all subsequent events.
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Emit an event to every registered handler, in subscription order.
    pub fn emit(&self, event: EditorEvent) {
        for handler in &mut *self.handlers.borrow_mut() {
            handler.handle_event(&event);
        }
    }
}

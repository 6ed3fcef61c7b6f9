#![warn(clippy::all, rust_2018_idioms)]

//! A raster editing engine: a persistent paint layer mutated by drawing
//! tools, composited each frame with independently transformable
//! sticker overlays, and exportable as a PNG. Headless: a host UI
//! feeds input events in and uploads the composited frame back out.

pub mod buffer;
pub mod color;
pub mod compositor;
pub mod editor;
pub mod error;
pub mod event;
pub mod export;
pub mod fill;
pub mod input;
pub mod mapper;
pub mod overlay;
pub mod sticker;
pub mod tool;

pub use buffer::PaintBuffer;
pub use compositor::Compositor;
pub use editor::{Editor, EditorConfig};
pub use error::EditorError;
pub use event::{EditorEvent, EventBus, EventHandler};
pub use fill::flood_fill;
pub use input::{InputEvent, InputLocation};
pub use overlay::{OverlayRegistry, SCALE_MAX, SCALE_MIN};
pub use sticker::{Sticker, StickerId, StickerImage};
pub use tool::{BrushConfig, DragState, ToolKind};

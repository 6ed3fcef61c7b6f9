use std::sync::Arc;

use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EditorError;

/// Identity of a placed sticker, stable across z-reordering and deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StickerId(Uuid);

impl StickerId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A decoded sticker bitmap, shared between the registry and the
/// compositor. Pixel data is immutable once decoded.
#[derive(Clone)]
pub struct StickerImage {
    size: [usize; 2],
    pixels: Vec<Color32>,
}

impl std::fmt::Debug for StickerImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StickerImage")
            .field("size", &self.size)
            .finish()
    }
}

impl StickerImage {
    /// Decode an encoded image payload (PNG, JPEG, ...) into RGBA
    /// pixels. A payload that fails to decode produces no sticker.
    pub fn decode(bytes: &[u8]) -> Result<Self, EditorError> {
        let decoded = image::load_from_memory(bytes).map_err(EditorError::AssetDecode)?;
        let rgba = decoded.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let pixels = rgba
            .pixels()
            .map(|p| Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
            .collect();
        Ok(Self { size, pixels })
    }

    /// Build an image from raw pixels. Panics if the pixel count does
    /// not match the size.
    pub fn from_pixels(size: [usize; 2], pixels: Vec<Color32>) -> Self {
        assert_eq!(size[0] * size[1], pixels.len());
        Self { size, pixels }
    }

    pub fn width(&self) -> usize {
        self.size[0]
    }

    pub fn height(&self) -> usize {
        self.size[1]
    }

    /// Natural (intrinsic) dimensions of the decoded source.
    pub fn natural_size(&self) -> Vec2 {
        Vec2::new(self.size[0] as f32, self.size[1] as f32)
    }

    /// Read a pixel; coordinates must be inside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Color32 {
        self.pixels[y * self.size[0] + x]
    }
}

/// An overlay object: an image placed above the paint buffer with its
/// own center position and scale. Position is in buffer space and may
/// sit partially or fully outside the buffer.
#[derive(Debug, Clone)]
pub struct Sticker {
    pub(crate) id: StickerId,
    pub(crate) image: Arc<StickerImage>,
    pub(crate) center: Pos2,
    pub(crate) base_size: Vec2,
    pub(crate) scale: f32,
    pub(crate) selected: bool,
}

impl Sticker {
    pub fn id(&self) -> StickerId {
        self.id
    }

    pub fn image(&self) -> &Arc<StickerImage> {
        &self.image
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    /// Intrinsic size after the insert-time max-side downscale; fixed
    /// for the sticker's lifetime. The mutable scale applies on top.
    pub fn base_size(&self) -> Vec2 {
        self.base_size
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Axis-aligned bounding box at the current scale: center plus and
    /// minus half the scaled extent. Used for hit-testing, compositing
    /// and the selection outline.
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, self.base_size * self.scale)
    }
}

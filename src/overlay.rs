use std::sync::Arc;

use egui::{Pos2, Vec2};
use log::info;

use crate::sticker::{Sticker, StickerId, StickerImage};

/// Lower bound for a sticker's mutable scale factor.
pub const SCALE_MIN: f32 = 0.1;
/// Upper bound for a sticker's mutable scale factor.
pub const SCALE_MAX: f32 = 8.0;

/// Ordered store of overlay objects.
///
/// Sequence order is paint order (later entries draw on top); hit-tests
/// scan the same sequence in reverse so the topmost object wins. The
/// at-most-one-selected invariant is enforced here: [`select`] is the
/// only place a selection flag is ever set.
///
/// [`select`]: OverlayRegistry::select
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    stickers: Vec<Sticker>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sticker at the top of the paint order, unselected, at
    /// scale 1.0.
    ///
    /// The intrinsic size is fixed here: if the image's longer natural
    /// side exceeds `max_side` it is shrunk to fit, preserving aspect
    /// ratio and rounding to whole units.
    pub fn insert(&mut self, image: Arc<StickerImage>, center: Pos2, max_side: f32) -> StickerId {
        let natural = image.natural_size();
        let shrink = (max_side / natural.max_elem()).min(1.0);
        let base_size = Vec2::new(
            (natural.x * shrink).round(),
            (natural.y * shrink).round(),
        );

        let id = StickerId::new();
        info!(
            "inserting sticker {id:?} at {center:?}, {}x{} -> {}x{}",
            natural.x, natural.y, base_size.x, base_size.y
        );
        self.stickers.push(Sticker {
            id,
            image,
            center,
            base_size,
            scale: 1.0,
            selected: false,
        });
        id
    }

    /// Topmost-first scan: the first sticker whose bounding box contains
    /// the point wins, so overlapping objects resolve to the most
    /// recently inserted one.
    pub fn hit_test(&self, pos: Pos2) -> Option<StickerId> {
        self.stickers
            .iter()
            .rev()
            .find(|s| s.bounds().contains(pos))
            .map(|s| s.id)
    }

    /// Select one sticker, or clear the selection with `None`.
    ///
    /// Every flag is cleared before at most one is set, which is what
    /// keeps the exactly-one-or-zero invariant true after any call
    /// sequence.
    pub fn select(&mut self, id: Option<StickerId>) {
        for sticker in &mut self.stickers {
            sticker.selected = Some(sticker.id) == id;
        }
    }

    pub fn selected(&self) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.selected)
    }

    pub fn selected_id(&self) -> Option<StickerId> {
        self.selected().map(|s| s.id)
    }

    pub fn get(&self, id: StickerId) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: StickerId) -> Option<&mut Sticker> {
        self.stickers.iter_mut().find(|s| s.id == id)
    }

    /// Move a sticker's center. Deliberately unclamped: objects may be
    /// dragged partially or fully outside the buffer.
    pub fn set_position(&mut self, id: StickerId, center: Pos2) {
        if let Some(sticker) = self.get_mut(id) {
            sticker.center = center;
        }
    }

    /// Set a sticker's scale, clamped to `[SCALE_MIN, SCALE_MAX]`.
    pub fn set_scale(&mut self, id: StickerId, scale: f32) {
        if let Some(sticker) = self.get_mut(id) {
            sticker.scale = scale.clamp(SCALE_MIN, SCALE_MAX);
        }
    }

    /// Multiply the selected sticker's scale by `factor`, clamped.
    /// Silent no-op when nothing is selected.
    pub fn scale_selected_by(&mut self, factor: f32) {
        if let Some(sticker) = self.stickers.iter_mut().find(|s| s.selected) {
            sticker.scale = (sticker.scale * factor).clamp(SCALE_MIN, SCALE_MAX);
        }
    }

    /// Remove a sticker; returns whether it was present.
    pub fn remove(&mut self, id: StickerId) -> bool {
        let before = self.stickers.len();
        self.stickers.retain(|s| s.id != id);
        before != self.stickers.len()
    }

    /// Stickers in paint order (bottom to top).
    pub fn iter(&self) -> impl Iterator<Item = &Sticker> {
        self.stickers.iter()
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }
}

// Sprite sheet slicing and on-screen placement

use super::kind::AnimationKind;
use crate::core::Rect;
use crate::engine::assets::LoadedSheet;
use crate::engine::renderer::{Sprite, TextureHandle};
use glam::Vec2;
use std::collections::HashMap;

/// The loaded sheet for each animation kind
#[derive(Debug, Clone, Default)]
pub struct SpriteSheets {
    sheets: HashMap<AnimationKind, LoadedSheet>,
}

impl SpriteSheets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: AnimationKind, sheet: LoadedSheet) {
        self.sheets.insert(kind, sheet);
    }

    pub fn get(&self, kind: AnimationKind) -> Option<&LoadedSheet> {
        self.sheets.get(&kind)
    }

    /// Every kind has a sheet
    pub fn is_complete(&self) -> bool {
        AnimationKind::ALL.iter().all(|kind| self.sheets.contains_key(kind))
    }
}

/// Source rectangle of `frame` in a horizontal strip of `columns` equal-width frames.
///
/// A zero-sized sheet yields an empty rectangle.
pub fn frame_source(sheet_size: Vec2, columns: u32, frame: usize) -> Rect {
    let sprite_width = sheet_size.x / columns.max(1) as f32;
    let sprite_height = sheet_size.y;
    Rect::new(frame as f32 * sprite_width, 0.0, sprite_width, sprite_height)
}

/// Translate-then-scale placement of the sprite on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub translation: Vec2,
    pub scale: f32,
}

impl ViewTransform {
    /// Center a sprite of `sprite_size` in the viewport at `scale`.
    ///
    /// Centering uses a size two thirds as wide and four thirds as tall as the
    /// sprite. Only the translation sees that adjustment; the drawn rectangle
    /// keeps the true sprite size.
    pub fn centered(viewport: Vec2, sprite_size: Vec2, scale: f32) -> Self {
        let adjusted = Vec2::new(
            sprite_size.x - sprite_size.x / 3.0,
            sprite_size.y + sprite_size.y / 3.0,
        );
        Self {
            translation: viewport / 2.0 - adjusted * scale / 2.0,
            scale,
        }
    }

    /// Map a rectangle from sprite space to screen space
    pub fn apply(&self, rect: Rect) -> Rect {
        let min = self.translation + rect.min() * self.scale;
        Rect::new(min.x, min.y, rect.width * self.scale, rect.height * self.scale)
    }
}

/// Everything needed to draw one frame of the character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub texture: TextureHandle,
    pub sheet_size: Vec2,
    pub source: Rect,
    pub transform: ViewTransform,
}

impl DrawCommand {
    /// Destination on screen: the sprite-sized rectangle at the origin, transformed
    pub fn dest(&self) -> Rect {
        self.transform
            .apply(Rect::new(0.0, 0.0, self.source.width, self.source.height))
    }

    pub fn to_sprite(&self) -> Sprite {
        Sprite::from_sheet(self.texture, self.sheet_size, self.source, self.dest())
    }
}

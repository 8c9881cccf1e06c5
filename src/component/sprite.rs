//! SpriteComponent: displays one sprite of a sheet, addressable by tile.

use super::image::ImageComponent;
use super::{Component, ComponentCore, TileAddressable};
use crate::geometry::{Point, Rect, Size};
use crate::render::PaintContext;
use crate::resource::SpriteSheet;
use std::sync::Arc;

/// A component that draws a single sprite from a [`SpriteSheet`].
///
/// The sprite index may be absent or past the end of the sheet; both mean
/// "draw nothing" and are intentional, recoverable states (e.g. an empty
/// inventory slot), unlike direct out-of-range sheet access which errors.
pub struct SpriteComponent {
    inner: ImageComponent,
    sheet: Arc<SpriteSheet>,
    index: Option<usize>,
    tile_offset: Point,
}

impl SpriteComponent {
    /// Create a sprite component with an explicit size.
    pub fn new(position: Point, size: Size, sheet: Arc<SpriteSheet>, index: Option<usize>) -> Self {
        let mut component = Self {
            inner: ImageComponent::new(position, size, None),
            sheet,
            index,
            tile_offset: Point::ORIGIN,
        };
        component.refresh_image();
        component
    }

    /// Create a sprite component sized to one sprite of the sheet.
    pub fn with_sprite_size(position: Point, sheet: Arc<SpriteSheet>, index: Option<usize>) -> Self {
        let size = sheet.sprite_size();
        Self::new(position, size, sheet, index)
    }

    /// The current sprite index, if any.
    #[inline]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    /// The sheet sprites are cut from.
    #[inline]
    pub fn sheet(&self) -> &Arc<SpriteSheet> {
        &self.sheet
    }

    /// Select a sprite by linear index. Out-of-range indices clear the
    /// image instead of erroring.
    pub fn set_index(&mut self, index: Option<usize>) {
        if self.index == index {
            return;
        }
        self.index = index;
        self.refresh_image();
    }

    /// Select a sprite by (column, row) sheet coordinates.
    ///
    /// Negative coordinates select nothing.
    pub fn set_sprite_tile(&mut self, tile: Point) {
        if tile.x < 0 || tile.y < 0 {
            self.set_index(None);
            return;
        }
        let index = (tile.y as usize) * (self.sheet.columns() as usize) + (tile.x as usize);
        self.set_index(Some(index));
    }

    /// Replace the sheet, keeping the current index.
    pub fn set_sheet(&mut self, sheet: Arc<SpriteSheet>) {
        if Arc::ptr_eq(&self.sheet, &sheet) {
            return;
        }
        self.sheet = sheet;
        self.refresh_image();
    }

    /// Shift the origin used for tile addressing.
    pub fn set_tile_offset(&mut self, offset: Point) {
        self.tile_offset = offset;
    }

    /// Part of the image swap: `set_image` handles dirty marking by
    /// allocation identity.
    fn refresh_image(&mut self) {
        let image = self.index.and_then(|index| self.sheet.sprite(index).ok());
        self.inner.set_image(image);
    }
}

impl Component for SpriteComponent {
    fn core(&self) -> &ComponentCore {
        self.inner.core()
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        self.inner.core_mut()
    }

    fn paint(&mut self, ctx: &mut PaintContext<'_>, section: Rect) {
        self.inner.paint(ctx, section);
    }
}

impl TileAddressable for SpriteComponent {
    fn tile_size(&self) -> Size {
        self.sheet.sprite_size()
    }

    fn tile_offset(&self) -> Point {
        self.tile_offset
    }
}

impl std::fmt::Debug for SpriteComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteComponent")
            .field("bounds", &self.bounds())
            .field("index", &self.index)
            .finish()
    }
}

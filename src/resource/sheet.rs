//! SpriteSheet: equal-size tiling of a source image.

use crate::buffer::Pixmap;
use crate::error::FrameError;
use crate::geometry::{Point, Rect, Size};
use std::sync::{Arc, Mutex, PoisonError};

/// A source image sliced into a row-major grid of equal sprites.
///
/// Sprites are cut lazily: the first request for an index copies its
/// region out of the source and caches the result, so repeated lookups
/// share one allocation. Slicing is pure arithmetic; the sheet carries no
/// damage logic.
pub struct SpriteSheet {
    image: Arc<Pixmap>,
    sprite_size: Size,
    columns: u32,
    rows: u32,
    cache: Mutex<Vec<Option<Arc<Pixmap>>>>,
}

impl SpriteSheet {
    /// Slice `image` into sprites of `sprite_width x sprite_height`.
    ///
    /// The grid covers as many whole sprites as fit; a partial right or
    /// bottom edge is ignored.
    ///
    /// # Errors
    /// Returns [`FrameError::InvalidDimensions`] when the sprite size is
    /// zero or the image is smaller than one sprite.
    pub fn new(
        image: Arc<Pixmap>,
        sprite_width: u32,
        sprite_height: u32,
    ) -> Result<Self, FrameError> {
        if sprite_width == 0 || sprite_height == 0 {
            return Err(FrameError::InvalidDimensions {
                width: sprite_width,
                height: sprite_height,
            });
        }

        let columns = image.width() / sprite_width;
        let rows = image.height() / sprite_height;
        if columns == 0 || rows == 0 {
            return Err(FrameError::InvalidDimensions {
                width: image.width(),
                height: image.height(),
            });
        }

        let count = (columns as usize) * (rows as usize);
        Ok(Self {
            image,
            sprite_size: Size::new(sprite_width, sprite_height),
            columns,
            rows,
            cache: Mutex::new(vec![None; count]),
        })
    }

    /// Size of one sprite in pixels.
    #[inline]
    pub const fn sprite_size(&self) -> Size {
        self.sprite_size
    }

    /// Number of sprite columns.
    #[inline]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of sprite rows.
    #[inline]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of sprites.
    #[inline]
    pub const fn count(&self) -> usize {
        (self.columns as usize) * (self.rows as usize)
    }

    /// The sprite at a row-major linear index.
    ///
    /// # Errors
    /// Returns [`FrameError::SpriteIndexOutOfRange`] past the end of the
    /// sheet.
    pub fn sprite(&self, index: usize) -> Result<Arc<Pixmap>, FrameError> {
        if index >= self.count() {
            return Err(FrameError::SpriteIndexOutOfRange {
                index,
                count: self.count(),
            });
        }

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sprite) = &cache[index] {
            return Ok(sprite.clone());
        }

        let column = (index as u32) % self.columns;
        let row = (index as u32) / self.columns;
        let section = Rect::new(
            (column * self.sprite_size.width) as i32,
            (row * self.sprite_size.height) as i32,
            self.sprite_size.width,
            self.sprite_size.height,
        );
        let sprite = Arc::new(self.image.sub_region(section));
        cache[index] = Some(sprite.clone());
        Ok(sprite)
    }

    /// The sprite at (column, row) sheet coordinates.
    ///
    /// # Errors
    /// Returns [`FrameError::TileOutOfRange`] for coordinates outside the
    /// sheet grid.
    pub fn sprite_at(&self, tile: Point) -> Result<Arc<Pixmap>, FrameError> {
        if tile.x < 0
            || tile.y < 0
            || tile.x as u32 >= self.columns
            || tile.y as u32 >= self.rows
        {
            return Err(FrameError::TileOutOfRange {
                x: tile.x,
                y: tile.y,
                columns: self.columns,
                rows: self.rows,
            });
        }
        self.sprite((tile.y as usize) * (self.columns as usize) + (tile.x as usize))
    }
}

impl std::fmt::Debug for SpriteSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteSheet")
            .field("sprite_size", &self.sprite_size)
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    /// A 2x2 grid of 2x2 sprites, each a distinct solid color.
    fn sheet() -> SpriteSheet {
        let mut image = Pixmap::new(4, 4);
        image.fill_rect(Rect::new(0, 0, 2, 2), Rgba::opaque(1, 0, 0));
        image.fill_rect(Rect::new(2, 0, 2, 2), Rgba::opaque(2, 0, 0));
        image.fill_rect(Rect::new(0, 2, 2, 2), Rgba::opaque(3, 0, 0));
        image.fill_rect(Rect::new(2, 2, 2, 2), Rgba::opaque(4, 0, 0));
        SpriteSheet::new(Arc::new(image), 2, 2).unwrap()
    }

    #[test]
    fn test_construction_rejects_bad_dimensions() {
        let image = Arc::new(Pixmap::new(4, 4));
        assert!(matches!(
            SpriteSheet::new(image.clone(), 0, 2),
            Err(FrameError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            SpriteSheet::new(image, 8, 8),
            Err(FrameError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_grid_dimensions() {
        let sheet = sheet();
        assert_eq!(sheet.columns(), 2);
        assert_eq!(sheet.rows(), 2);
        assert_eq!(sheet.count(), 4);
        assert_eq!(sheet.sprite_size(), Size::new(2, 2));
    }

    #[test]
    fn test_sprites_are_row_major() {
        let sheet = sheet();
        assert_eq!(sheet.sprite(0).unwrap().get(0, 0), Some(Rgba::opaque(1, 0, 0)));
        assert_eq!(sheet.sprite(1).unwrap().get(0, 0), Some(Rgba::opaque(2, 0, 0)));
        assert_eq!(sheet.sprite(2).unwrap().get(0, 0), Some(Rgba::opaque(3, 0, 0)));
        assert_eq!(sheet.sprite(3).unwrap().get(0, 0), Some(Rgba::opaque(4, 0, 0)));
    }

    #[test]
    fn test_sprite_at_matches_linear_index() {
        let sheet = sheet();
        let by_tile = sheet.sprite_at(Point::new(1, 1)).unwrap();
        let by_index = sheet.sprite(3).unwrap();
        assert!(Arc::ptr_eq(&by_tile, &by_index));
    }

    #[test]
    fn test_repeated_lookups_share_the_cut() {
        let sheet = sheet();
        let first = sheet.sprite(0).unwrap();
        let second = sheet.sprite(0).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_out_of_range_lookups_error() {
        let sheet = sheet();
        assert!(matches!(
            sheet.sprite(4),
            Err(FrameError::SpriteIndexOutOfRange { index: 4, count: 4 })
        ));
        assert!(matches!(
            sheet.sprite_at(Point::new(2, 0)),
            Err(FrameError::TileOutOfRange { .. })
        ));
        assert!(matches!(
            sheet.sprite_at(Point::new(0, -1)),
            Err(FrameError::TileOutOfRange { .. })
        ));
    }

    #[test]
    fn test_partial_edge_is_ignored() {
        // 5x4 image with 2x2 sprites: the fifth column is dead space.
        let sheet = SpriteSheet::new(Arc::new(Pixmap::new(5, 4)), 2, 2).unwrap();
        assert_eq!(sheet.columns(), 2);
        assert_eq!(sheet.count(), 4);
    }
}

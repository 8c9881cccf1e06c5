//! TileGridComponent: a composite partitioned into equally sized tiles.

use super::compound::CompoundComponent;
use super::{Component, ComponentCore, ComponentHandle};
use crate::error::FrameError;
use crate::geometry::{Point, Rect, Size};
use crate::render::PaintContext;

/// Builds the occupant of one tile slot.
///
/// Called once per tile with the tile coordinate, the tile's position in
/// grid-local pixels, and the tile size. Returning `None` leaves the slot
/// empty.
pub type TileFactory = Box<dyn FnMut(Point, Point, Size) -> Option<ComponentHandle> + Send>;

/// A composite laid out as a fixed columns x rows grid of equal tiles.
///
/// Tiles are materialized lazily: the factory runs on the first access
/// that needs them, in row-major order. Slots produced this way are not
/// marked dirty, so a freshly materialized grid contributes no damage
/// until a tile actually changes.
///
/// Tile addressing is checked: coordinates outside the grid are an error,
/// unlike sprite indices where out-of-range means "draw nothing".
pub struct TileGridComponent {
    inner: CompoundComponent,
    tiles: Size,
    tile_size: Size,
    factory: TileFactory,
    materialized: bool,
}

impl TileGridComponent {
    /// Create a grid of `tiles` columns x rows covering `size` pixels.
    ///
    /// The tile size is `size / tiles` with integer division; a remainder
    /// is silently truncated, leaving the right/bottom edge uncovered.
    ///
    /// # Errors
    /// Returns [`FrameError::InvalidDimensions`] when the grid or the
    /// derived tile size has a zero dimension.
    pub fn new(
        position: Point,
        size: Size,
        tiles: Size,
        factory: TileFactory,
    ) -> Result<Self, FrameError> {
        if tiles.is_empty() {
            return Err(FrameError::InvalidDimensions {
                width: tiles.width,
                height: tiles.height,
            });
        }
        let tile_size = Size::new(size.width / tiles.width, size.height / tiles.height);
        if tile_size.is_empty() {
            return Err(FrameError::InvalidDimensions {
                width: tile_size.width,
                height: tile_size.height,
            });
        }

        Ok(Self {
            inner: CompoundComponent::new(position, size),
            tiles,
            tile_size,
            factory,
            materialized: false,
        })
    }

    /// Grid dimensions in tiles.
    #[inline]
    pub const fn tiles(&self) -> Size {
        self.tiles
    }

    /// Size of one tile in pixels.
    #[inline]
    pub const fn tile_size(&self) -> Size {
        self.tile_size
    }

    /// The occupant of a tile slot.
    ///
    /// # Errors
    /// Returns [`FrameError::TileOutOfRange`] for coordinates outside the
    /// grid.
    pub fn tile(&mut self, tile: Point) -> Result<Option<ComponentHandle>, FrameError> {
        let index = self.index_of(tile)?;
        self.materialize();
        Ok(self.inner.slot(index))
    }

    /// Replace the occupant of a tile slot.
    ///
    /// The previous occupant is queued for removal; the new one is marked
    /// dirty.
    ///
    /// # Errors
    /// Returns [`FrameError::TileOutOfRange`] for coordinates outside the
    /// grid.
    pub fn set_tile(
        &mut self,
        tile: Point,
        slot: Option<ComponentHandle>,
    ) -> Result<(), FrameError> {
        let index = self.index_of(tile)?;
        self.materialize();
        self.inner.set_slot(index, slot);
        Ok(())
    }

    /// Mark the occupant of one tile dirty. Empty slots are left alone.
    ///
    /// # Errors
    /// Returns [`FrameError::TileOutOfRange`] for coordinates outside the
    /// grid.
    pub fn set_tile_dirty(&mut self, tile: Point) -> Result<(), FrameError> {
        if let Some(child) = self.tile(tile)? {
            child.lock().set_dirty(true);
        }
        Ok(())
    }

    /// Mark every tile in the inclusive rectangular range dirty.
    ///
    /// The corners may be given in any order; they are normalized before
    /// iteration.
    ///
    /// # Errors
    /// Returns [`FrameError::TileOutOfRange`] when either normalized
    /// corner falls outside the grid.
    pub fn set_range_dirty(&mut self, a: Point, b: Point) -> Result<(), FrameError> {
        let min = Point::new(a.x.min(b.x), a.y.min(b.y));
        let max = Point::new(a.x.max(b.x), a.y.max(b.y));
        self.index_of(min)?;
        self.index_of(max)?;

        for y in min.y..=max.y {
            for x in min.x..=max.x {
                self.set_tile_dirty(Point::new(x, y))?;
            }
        }
        Ok(())
    }

    /// Row-major slot index of a tile coordinate.
    fn index_of(&self, tile: Point) -> Result<usize, FrameError> {
        if tile.x < 0
            || tile.y < 0
            || tile.x as u32 >= self.tiles.width
            || tile.y as u32 >= self.tiles.height
        {
            return Err(FrameError::TileOutOfRange {
                x: tile.x,
                y: tile.y,
                columns: self.tiles.width,
                rows: self.tiles.height,
            });
        }
        Ok((tile.y as usize) * (self.tiles.width as usize) + (tile.x as usize))
    }

    /// Run the factory over every slot, once.
    fn materialize(&mut self) {
        if self.materialized {
            return;
        }
        self.materialized = true;

        for y in 0..self.tiles.height {
            for x in 0..self.tiles.width {
                let tile = Point::new(x as i32, y as i32);
                let position = Point::new(
                    (x * self.tile_size.width) as i32,
                    (y * self.tile_size.height) as i32,
                );
                let slot = (self.factory)(tile, position, self.tile_size);
                self.inner.add_slot(slot);
            }
        }
    }
}

impl Component for TileGridComponent {
    fn core(&self) -> &ComponentCore {
        self.inner.core()
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        self.inner.core_mut()
    }

    fn is_dirty(&self) -> bool {
        self.inner.is_dirty()
    }

    fn set_dirty(&mut self, dirty: bool) {
        self.inner.set_dirty(dirty);
    }

    fn reset_previous_bounds(&mut self) {
        self.inner.reset_previous_bounds();
    }

    fn collect_damage(&mut self, dry: bool) -> Vec<Rect> {
        self.inner.collect_damage(dry)
    }

    fn paint(&mut self, ctx: &mut PaintContext<'_>, section: Rect) {
        self.materialize();
        self.inner.paint(ctx, section);
    }
}

impl std::fmt::Debug for TileGridComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileGridComponent")
            .field("bounds", &self.bounds())
            .field("tiles", &self.tiles)
            .field("tile_size", &self.tile_size)
            .field("materialized", &self.materialized)
            .finish()
    }
}

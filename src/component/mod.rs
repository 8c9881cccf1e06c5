//! Components: the building blocks of every frame.
//!
//! Every component owns a position and size that define its bounds. It can
//! be marked dirty explicitly, or becomes dirty automatically when its
//! bounds change. Dirty components contribute damage rectangles on the
//! next collection pass and are repainted inside them.
//!
//! Components are shared behind [`ComponentHandle`] so application threads
//! can mutate them (move, recolor, swap content) between ticks while the
//! frame driver holds the only handle used during a render pass.

pub mod compound;
pub mod fill;
pub mod image;
pub mod sprite;
pub mod text;
pub mod tiled;

pub use compound::CompoundComponent;
pub use fill::FillComponent;
pub use image::ImageComponent;
pub use sprite::SpriteComponent;
pub use text::TextComponent;
pub use tiled::TileGridComponent;

use crate::geometry::{Point, Rect, Size};
use crate::render::PaintContext;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared per-component state: bounds, dirty flag, and the snapshot of the
/// bounds at the last damage collection.
#[derive(Debug, Clone)]
pub struct ComponentCore {
    position: Point,
    size: Size,
    dirty: bool,
    previous_bounds: Option<Rect>,
}

impl ComponentCore {
    /// Create component state at the given bounds, clean and without a
    /// previous-bounds snapshot.
    pub const fn new(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            dirty: false,
            previous_bounds: None,
        }
    }

    /// Current top-left position.
    #[inline]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Move the component. Movement damage is derived from the
    /// previous-bounds snapshot, so no explicit dirty marking is needed.
    #[inline]
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Current size.
    #[inline]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Resize the component.
    #[inline]
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Current bounds as a rectangle.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::at(self.position, self.size)
    }

    /// The explicit dirty flag (bounds-derived dirtiness not included).
    #[inline]
    pub const fn dirty(&self) -> bool {
        self.dirty
    }

    /// Set or clear the explicit dirty flag.
    #[inline]
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Mark dirty if `changed`; never clears. Setters of drawable content
    /// use this so an unchanged assignment stays clean.
    #[inline]
    pub fn mark_dirty_if(&mut self, changed: bool) {
        self.dirty = self.dirty || changed;
    }

    /// The bounds recorded at the last damage collection, if any.
    #[inline]
    pub const fn previous_bounds(&self) -> Option<Rect> {
        self.previous_bounds
    }

    /// Snapshot the current bounds as the previous bounds.
    #[inline]
    pub fn snapshot_bounds(&mut self) {
        self.previous_bounds = Some(self.bounds());
    }
}

/// A positioned, damage-tracked node in the component tree.
///
/// Leaf implementors provide [`Component::paint`] and inherit the damage
/// bookkeeping; composite implementors additionally override the dirty
/// and damage methods to aggregate their children.
pub trait Component: Send {
    /// Access the shared component state.
    fn core(&self) -> &ComponentCore;

    /// Mutably access the shared component state.
    fn core_mut(&mut self) -> &mut ComponentCore;

    /// Current bounds in parent-space coordinates.
    fn bounds(&self) -> Rect {
        self.core().bounds()
    }

    /// Whether this component must contribute damage on the next
    /// collection: explicitly marked, or its bounds changed since the last
    /// snapshot.
    fn is_dirty(&self) -> bool {
        let core = self.core();
        core.dirty() || core.previous_bounds().is_some_and(|previous| previous != core.bounds())
    }

    /// Set or clear the dirty flag.
    fn set_dirty(&mut self, dirty: bool) {
        self.core_mut().set_dirty(dirty);
    }

    /// Forcibly snapshot the current bounds without touching the dirty
    /// flag. Used by the driver when recovering with a full render.
    fn reset_previous_bounds(&mut self) {
        self.core_mut().snapshot_bounds();
    }

    /// The sections that changed since the last collection, in
    /// parent-space coordinates.
    ///
    /// Returns the current bounds, plus the previous bounds when the
    /// component moved and the new bounds do not fully cover the old ones
    /// (so the vacated area is repainted too). A `dry` run leaves the
    /// dirty flag and the snapshot untouched.
    fn collect_damage(&mut self, dry: bool) -> Vec<Rect> {
        if !self.is_dirty() {
            return Vec::new();
        }

        let bounds = self.bounds();
        let mut sections = vec![bounds];

        // Local copy: the snapshot may be rewritten below.
        let previous = self.core().previous_bounds();
        if let Some(previous) = previous {
            if previous != bounds && !bounds.contains_rect(&previous) {
                sections.push(previous);
            }
        }

        if !dry {
            self.core_mut().set_dirty(false);
            self.core_mut().snapshot_bounds();
        }

        sections
    }

    /// Render the intersection of `section` with this component's bounds,
    /// translating the context to the component's position.
    fn render(&mut self, ctx: &mut PaintContext<'_>, section: Rect) {
        let intersection = self.bounds().intersection(&section);
        if intersection.is_empty() {
            return;
        }

        let position = self.core().position();
        let local = intersection.translated(-position);
        let mut ctx = ctx.translated(position);
        self.paint(&mut ctx, local);
    }

    /// Paint `section`, given in this component's local coordinates.
    ///
    /// The context is already translated; implementations draw at their
    /// local origin and never outside `section`.
    fn paint(&mut self, ctx: &mut PaintContext<'_>, section: Rect);
}

/// A cloneable, thread-safe handle to a component.
///
/// Identity is pointer-based: two handles are the same component only if
/// they share the allocation, regardless of value equality. The frame
/// driver relies on this to detect root replacement.
#[derive(Clone)]
pub struct ComponentHandle(Arc<Mutex<dyn Component>>);

impl ComponentHandle {
    /// Wrap a component into a new shared handle.
    pub fn new<C: Component + 'static>(component: C) -> Self {
        Self(Arc::new(Mutex::new(component)))
    }

    /// Adopt an existing shared component.
    ///
    /// Lets callers keep a concretely typed `Arc<Mutex<C>>` for mutation
    /// while the tree holds the erased handle.
    pub fn from_arc<C: Component + 'static>(component: Arc<Mutex<C>>) -> Self {
        Self(component)
    }

    /// Lock the component for access.
    ///
    /// Poisoning is ignored: component state stays structurally valid even
    /// if a panicking thread held the lock, and rendering glitches
    /// self-correct on the next damage pass.
    pub fn lock(&self) -> MutexGuard<'_, dyn Component + 'static> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check whether two handles refer to the same component.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for ComponentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ComponentHandle({:?})", Arc::as_ptr(&self.0))
    }
}

/// Tile-coordinate addressing for components that live on a fixed grid.
///
/// Positions translate between canvas pixels and whole-tile coordinates
/// using the implementor's tile size, optionally shifted by an offset.
pub trait TileAddressable: Component {
    /// Size of one tile in canvas pixels.
    fn tile_size(&self) -> Size;

    /// Canvas-space offset of tile (0, 0).
    fn tile_offset(&self) -> Point {
        Point::ORIGIN
    }

    /// Snap the component to a tile coordinate.
    fn set_tile(&mut self, tile: Point) {
        let position = tile.untiled(self.tile_size(), self.tile_offset());
        self.core_mut().set_position(position);
    }

    /// The tile coordinate containing the component's position.
    fn tile(&self) -> Point {
        self.core().position().tiled(self.tile_size(), self.tile_offset())
    }
}

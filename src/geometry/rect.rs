//! Rect: an axis-aligned rectangle that doubles as the damage unit.
//!
//! Damage rectangles are accumulated with [`Rect::combine_into`], a greedy
//! merge that keeps the pending list short while bounding overdraw.

use super::point::{Point, Size};

/// An axis-aligned rectangle with a signed position and unsigned extent.
///
/// Used both as canvas-space component geometry and as a damage unit in
/// viewport space. Equality is by value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: i32,
    /// Y coordinate of the top-left corner.
    pub y: i32,
    /// Width in units.
    pub width: u32,
    /// Height in units.
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle at the origin covering `size`.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Create a rectangle from a position and a size.
    #[inline]
    pub const fn at(position: Point, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    /// Zero-sized rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// The top-left corner.
    #[inline]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The extent.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Covered area in units.
    #[inline]
    pub const fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }

    /// Check if the rectangle covers nothing.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The right edge (exclusive). Widened to avoid overflow near `i32::MAX`.
    #[inline]
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// The bottom edge (exclusive). Widened to avoid overflow near `i32::MAX`.
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, point: Point) -> bool {
        (point.x as i64) >= (self.x as i64)
            && (point.x as i64) < self.right()
            && (point.y as i64) >= (self.y as i64)
            && (point.y as i64) < self.bottom()
    }

    /// Check if `other` lies entirely inside this rectangle.
    pub const fn contains_rect(&self, other: &Self) -> bool {
        if other.is_empty() {
            return true;
        }
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if this rectangle overlaps another.
    #[inline]
    pub const fn intersects(&self, other: &Self) -> bool {
        (self.x as i64) < other.right()
            && self.right() > (other.x as i64)
            && (self.y as i64) < other.bottom()
            && self.bottom() > (other.y as i64)
    }

    /// The overlapping region, or [`Rect::ZERO`] if the rectangles are
    /// disjoint.
    pub fn intersection(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if i64::from(x) >= right || i64::from(y) >= bottom {
            return Self::ZERO;
        }
        Self::new(x, y, (right - i64::from(x)) as u32, (bottom - i64::from(y)) as u32)
    }

    /// The smallest rectangle covering both.
    ///
    /// An empty rectangle contributes nothing to the union.
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, (right - i64::from(x)) as u32, (bottom - i64::from(y)) as u32)
    }

    /// Move the rectangle by an offset.
    #[inline]
    #[must_use]
    pub const fn translated(&self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Scale position and extent up by per-axis integer factors
    /// (canvas space to viewport space).
    #[inline]
    #[must_use]
    pub const fn scaled(&self, scale: Size) -> Self {
        Self::new(
            self.x * scale.width as i32,
            self.y * scale.height as i32,
            self.width * scale.width,
            self.height * scale.height,
        )
    }

    /// Scale position and extent down by per-axis integer factors
    /// (viewport space to canvas space). Remainders are truncated; a
    /// rectangle thinner than one scale unit collapses to zero extent.
    #[inline]
    #[must_use]
    pub const fn unscaled(&self, scale: Size) -> Self {
        Self::new(
            self.x / scale.width as i32,
            self.y / scale.height as i32,
            self.width / scale.width,
            self.height / scale.height,
        )
    }

    /// Check if the rectangles share a full edge with a matching opposite
    /// dimension, without overlapping.
    pub const fn is_adjacent_to(&self, other: &Self) -> bool {
        (self.x == other.x
            && self.width == other.width
            && (self.bottom() == other.y as i64 || other.bottom() == self.y as i64))
            || (self.y == other.y
                && self.height == other.height
                && (self.right() == other.x as i64 || other.right() == self.x as i64))
    }

    /// Merge this rectangle into a damage list.
    ///
    /// Scans `sections` for an entry worth merging with: an exact duplicate
    /// is ignored, and the first entry whose union with `self` covers no
    /// more area than the two rectangles combined is replaced by that union,
    /// which is then re-merged against the remaining entries (the union may
    /// now absorb a neighbor it previously missed). If no entry qualifies,
    /// `self` is appended.
    ///
    /// The `<=` area test deliberately admits adjacent and misaligned
    /// overlapping pairs, trading bounded overdraw for a shorter list.
    /// The result depends on insertion order; callers that need
    /// determinism sort their input first.
    pub fn combine_into(self, sections: &mut Vec<Self>) {
        if self.is_empty() {
            return;
        }

        for i in 0..sections.len() {
            let other = sections[i];
            if other == self {
                return;
            }

            let union = self.union(&other);
            if union.area() <= self.area() + other.area() {
                sections.remove(i);
                union.combine_into(sections);
                return;
            }
        }

        sections.push(self);
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

//! Point and size primitives for canvas-space geometry.

/// A position in canvas space.
///
/// Coordinates are signed: components may be positioned partially or
/// entirely outside the canvas and are clipped at paint time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// X coordinate (column) of the point.
    pub x: i32,
    /// Y coordinate (row) of the point.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The canvas origin (0, 0).
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Convert a tile coordinate to canvas coordinates.
    ///
    /// The inverse of [`Point::tiled`].
    #[inline]
    pub const fn untiled(self, tile: Size, offset: Self) -> Self {
        Self::new(
            self.x * tile.width as i32 + offset.x,
            self.y * tile.height as i32 + offset.y,
        )
    }

    /// Convert canvas coordinates to a tile coordinate.
    ///
    /// Remainders are truncated, matching the lossy integer tiling used
    /// throughout the crate.
    #[inline]
    pub const fn tiled(self, tile: Size, offset: Self) -> Self {
        Self::new(
            (self.x - offset.x) / tile.width as i32,
            (self.y - offset.y) / tile.height as i32,
        )
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Neg for Point {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A width/height pair, in pixels or in tiles depending on context.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in units.
    pub width: u32,
    /// Height in units.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Create a square size.
    #[inline]
    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// Zero size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Check if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Total number of units covered.
    #[inline]
    pub const fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }
}

impl std::ops::Div for Size {
    type Output = Self;

    /// Per-axis integer division, remainders truncated.
    ///
    /// # Panics
    /// Panics if either dimension of `rhs` is zero. Callers validate
    /// divisors at construction time.
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self::new(self.width / rhs.width, self.height / rhs.height)
    }
}

impl std::fmt::Debug for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Size {
    #[inline]
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3, -2);
        let b = Point::new(1, 5);
        assert_eq!(a + b, Point::new(4, 3));
        assert_eq!(a - b, Point::new(2, -7));
        assert_eq!(-a, Point::new(-3, 2));
    }

    #[test]
    fn test_point_tiling_roundtrip() {
        let tile = Size::new(16, 16);
        let coord = Point::new(3, 2);
        let canvas = coord.untiled(tile, Point::ORIGIN);
        assert_eq!(canvas, Point::new(48, 32));
        assert_eq!(canvas.tiled(tile, Point::ORIGIN), coord);
    }

    #[test]
    fn test_point_tiling_with_offset() {
        let tile = Size::new(10, 10);
        let offset = Point::new(5, 5);
        let canvas = Point::new(2, 1).untiled(tile, offset);
        assert_eq!(canvas, Point::new(25, 15));
        assert_eq!(canvas.tiled(tile, offset), Point::new(2, 1));
    }

    #[test]
    fn test_size_division_truncates() {
        let size = Size::new(25, 25);
        let tiles = Size::new(4, 4);
        assert_eq!(size / tiles, Size::new(6, 6));
    }

    #[test]
    fn test_size_area_and_empty() {
        assert_eq!(Size::new(20, 10).area(), 200);
        assert!(Size::new(0, 10).is_empty());
        assert!(Size::new(10, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }
}

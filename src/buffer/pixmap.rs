//! Pixmap: a contiguous RGBA pixel buffer.
//!
//! Pixels are stored in row-major order for cache efficiency. All
//! rectangle operations clamp at the buffer edges rather than erroring.

use crate::color::Rgba;
use crate::error::FrameError;
use crate::geometry::{Rect, Size};

/// A fixed-size RGBA pixel buffer.
///
/// Access is in row-major order: `index = y * width + x`. The frame
/// driver owns its viewport pixmap exclusively during a tick; callers
/// read it between ticks to flush damaged regions downstream.
#[derive(Clone, PartialEq, Eq)]
pub struct Pixmap {
    /// Contiguous pixel storage (row-major order).
    pixels: Vec<Rgba>,
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
}

impl Pixmap {
    /// Create a new pixmap filled with transparent pixels.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Pixmap dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            pixels: vec![Rgba::TRANSPARENT; size],
            width,
            height,
        }
    }

    /// Create a pixmap from existing row-major pixel data.
    ///
    /// # Errors
    /// Returns [`FrameError::InvalidDimensions`] for zero dimensions and
    /// [`FrameError::PixelCountMismatch`] when `pixels` does not hold
    /// exactly `width * height` entries.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::InvalidDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if pixels.len() != expected {
            return Err(FrameError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { pixels, width, height })
    }

    /// Get the pixmap width.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the pixmap height.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the dimensions as a [`Size`].
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The full pixmap as a rectangle at the origin.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Get a reference to the underlying pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get the pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y), replacing whatever was there.
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) -> bool {
        if let Some(index) = self.index_of(x, y) {
            self.pixels[index] = color;
            true
        } else {
            false
        }
    }

    /// Source-over blend `color` onto the pixel at (x, y).
    ///
    /// Opaque colors replace the destination outright, transparent colors
    /// leave it untouched. Out-of-bounds coordinates are ignored.
    pub fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        let Some(index) = self.index_of(x, y) else {
            return;
        };

        if color.a == 255 {
            self.pixels[index] = color;
            return;
        }
        if color.a == 0 {
            return;
        }

        let dst = self.pixels[index];
        let src_a = u32::from(color.a);
        let inv = 255 - src_a;
        let dst_a = u32::from(dst.a) * inv / 255;
        let out_a = src_a + dst_a;

        if out_a == 0 {
            self.pixels[index] = Rgba::TRANSPARENT;
            return;
        }

        let channel = |src: u8, dst: u8| -> u8 {
            ((u32::from(src) * src_a + u32::from(dst) * dst_a) / out_a) as u8
        };

        self.pixels[index] = Rgba::new(
            channel(color.r, dst.r),
            channel(color.g, dst.g),
            channel(color.b, dst.b),
            out_a as u8,
        );
    }

    /// Fill the entire pixmap with one color.
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Replace every pixel inside `section` (clamped to bounds) with `color`.
    pub fn fill_rect(&mut self, section: Rect, color: Rgba) {
        let visible = section.intersection(&self.bounds());
        for y in visible.y..(visible.y + visible.height as i32) {
            let start = (y as usize) * (self.width as usize) + (visible.x as usize);
            self.pixels[start..start + visible.width as usize].fill(color);
        }
    }

    /// Copy a rectangular region into a new pixmap of `section.size()`.
    ///
    /// Pixels outside the source bounds come out transparent, so a section
    /// hanging off the edge still produces a full-size result.
    ///
    /// # Panics
    /// Panics if `section` is empty.
    pub fn sub_region(&self, section: Rect) -> Self {
        let mut out = Self::new(section.width, section.height);
        let visible = section.intersection(&self.bounds());

        for y in visible.y..(visible.y + visible.height as i32) {
            for x in visible.x..(visible.x + visible.width as i32) {
                if let Some(pixel) = self.get(x as u32, y as u32) {
                    out.set((x - section.x) as u32, (y - section.y) as u32, pixel);
                }
            }
        }

        out
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgba]> {
        self.pixels.chunks(self.width as usize)
    }
}

impl std::fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pixmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

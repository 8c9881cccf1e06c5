//! PaintContext: a translated, scaled view onto the viewport pixmap.
//!
//! Components paint in their own local canvas coordinates. The context
//! carries the accumulated translation down the component tree and maps
//! each canvas pixel onto its integer-scaled viewport block.

use crate::buffer::Pixmap;
use crate::color::Rgba;
use crate::geometry::{Point, Rect, Size};

/// A mutable painting surface in canvas coordinates.
///
/// All operations clip against the underlying pixmap; painting outside the
/// viewport is silently discarded.
pub struct PaintContext<'a> {
    target: &'a mut Pixmap,
    scale: Size,
    origin: Point,
}

impl<'a> PaintContext<'a> {
    /// Create a context at the canvas origin.
    ///
    /// `scale` is the per-axis canvas-to-viewport pixel ratio; every
    /// canvas pixel covers a `scale.width x scale.height` viewport block.
    pub fn new(target: &'a mut Pixmap, scale: Size) -> Self {
        Self {
            target,
            scale,
            origin: Point::ORIGIN,
        }
    }

    /// Reborrow the context with its origin shifted by `offset`.
    ///
    /// Used when descending into a child component: the child paints at
    /// its own local coordinates while the accumulated offset places it
    /// correctly on the canvas.
    pub fn translated(&mut self, offset: Point) -> PaintContext<'_> {
        PaintContext {
            target: self.target,
            scale: self.scale,
            origin: self.origin + offset,
        }
    }

    /// The canvas-to-viewport scale.
    #[inline]
    pub const fn scale(&self) -> Size {
        self.scale
    }

    /// Fill a local-space rectangle with one color, blending source-over.
    pub fn fill_rect(&mut self, section: Rect, color: Rgba) {
        if section.is_empty() || color.is_transparent() {
            return;
        }

        let dest = section.translated(self.origin).scaled(self.scale);
        let visible = dest.intersection(&self.target.bounds());

        for y in visible.y..(visible.y + visible.height as i32) {
            for x in visible.x..(visible.x + visible.width as i32) {
                self.target.blend(x as u32, y as u32, color);
            }
        }
    }

    /// Blit a local-space section of `image` onto the canvas.
    ///
    /// The image is anchored at the local origin, so `section` addresses
    /// the same coordinates in the image and on the canvas. Transparent
    /// source pixels are skipped; translucent ones blend source-over.
    pub fn blit(&mut self, image: &Pixmap, section: Rect) {
        let visible = section.intersection(&image.bounds());

        for y in visible.y..(visible.y + visible.height as i32) {
            for x in visible.x..(visible.x + visible.width as i32) {
                let Some(pixel) = image.get(x as u32, y as u32) else {
                    continue;
                };
                if pixel.is_transparent() {
                    continue;
                }
                self.fill_pixel(Point::new(x, y), pixel);
            }
        }
    }

    /// Blend one canvas pixel, expanded to its scaled viewport block.
    fn fill_pixel(&mut self, local: Point, color: Rgba) {
        let dest = Rect::at(local + self.origin, Size::new(1, 1)).scaled(self.scale);
        let visible = dest.intersection(&self.target.bounds());

        for y in visible.y..(visible.y + visible.height as i32) {
            for x in visible.x..(visible.x + visible.width as i32) {
                self.target.blend(x as u32, y as u32, color);
            }
        }
    }
}

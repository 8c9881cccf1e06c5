//! Color transformers: per-pixel conversion applied to damaged regions.

use super::rgba::Rgba;
use crate::buffer::Pixmap;
use crate::geometry::Rect;

/// Converts pixels to the colors supported by a downstream display.
///
/// The frame driver applies a transformer to every damaged viewport
/// rectangle after painting it, so implementations only ever see pixels
/// that were just redrawn.
pub trait ColorTransformer: Send {
    /// Convert a single color.
    fn convert(&mut self, color: Rgba) -> Rgba;

    /// Convert every pixel inside `section`, clamped to the pixmap bounds.
    ///
    /// Out-of-range coordinates are clipped rather than rejected.
    fn convert_region(&mut self, pixmap: &mut Pixmap, section: Rect) {
        let visible = section.intersection(&pixmap.bounds());
        if visible.is_empty() {
            return;
        }

        for y in visible.y..(visible.y + visible.height as i32) {
            for x in visible.x..(visible.x + visible.width as i32) {
                let (x, y) = (x as u32, y as u32);
                if let Some(pixel) = pixmap.get(x, y) {
                    let converted = self.convert(pixel);
                    pixmap.set(x, y, converted);
                }
            }
        }
    }
}

/// A pass-through transformer that keeps every color as is.
///
/// The default for frames whose sink can display arbitrary colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransformer;

impl ColorTransformer for IdentityTransformer {
    #[inline]
    fn convert(&mut self, color: Rgba) -> Rgba {
        color
    }

    fn convert_region(&mut self, _pixmap: &mut Pixmap, _section: Rect) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverts the red channel; enough to observe region clamping.
    struct InvertRed;

    impl ColorTransformer for InvertRed {
        fn convert(&mut self, color: Rgba) -> Rgba {
            Rgba::new(255 - color.r, color.g, color.b, color.a)
        }
    }

    #[test]
    fn test_convert_region_clamps_to_bounds() {
        let mut pixmap = Pixmap::new(4, 4);
        pixmap.fill(Rgba::opaque(10, 0, 0));

        // Section extends past every edge; only the 4x4 pixmap is touched.
        InvertRed.convert_region(&mut pixmap, Rect::new(-2, -2, 10, 10));

        assert_eq!(pixmap.get(0, 0), Some(Rgba::opaque(245, 0, 0)));
        assert_eq!(pixmap.get(3, 3), Some(Rgba::opaque(245, 0, 0)));
    }

    #[test]
    fn test_convert_region_partial_section() {
        let mut pixmap = Pixmap::new(4, 4);
        pixmap.fill(Rgba::opaque(10, 0, 0));

        InvertRed.convert_region(&mut pixmap, Rect::new(2, 2, 2, 2));

        assert_eq!(pixmap.get(1, 1), Some(Rgba::opaque(10, 0, 0)));
        assert_eq!(pixmap.get(2, 2), Some(Rgba::opaque(245, 0, 0)));
    }

    #[test]
    fn test_identity_leaves_pixels_untouched() {
        let mut pixmap = Pixmap::new(2, 2);
        pixmap.fill(Rgba::opaque(1, 2, 3));

        IdentityTransformer.convert_region(&mut pixmap, Rect::new(0, 0, 2, 2));

        assert_eq!(pixmap.get(1, 1), Some(Rgba::opaque(1, 2, 3)));
    }
}

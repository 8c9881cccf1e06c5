//! ImageComponent: blits a pixmap at the component's position.

use super::{Component, ComponentCore};
use crate::buffer::Pixmap;
use crate::geometry::{Point, Rect, Size};
use crate::render::PaintContext;
use std::sync::Arc;

/// A component that draws a shared pixmap, anchored at its top-left corner.
///
/// The image may be absent, in which case nothing is drawn. Content
/// changes are detected by allocation identity, not pixel comparison.
#[derive(Debug, Clone)]
pub struct ImageComponent {
    core: ComponentCore,
    image: Option<Arc<Pixmap>>,
}

impl ImageComponent {
    /// Create an image component at the given bounds.
    pub const fn new(position: Point, size: Size, image: Option<Arc<Pixmap>>) -> Self {
        Self {
            core: ComponentCore::new(position, size),
            image,
        }
    }

    /// The current image, if any.
    #[inline]
    pub fn image(&self) -> Option<&Arc<Pixmap>> {
        self.image.as_ref()
    }

    /// Swap the displayed image. Marks dirty only when the allocation
    /// actually changes.
    pub fn set_image(&mut self, image: Option<Arc<Pixmap>>) {
        let changed = match (&self.image, &image) {
            (Some(current), Some(next)) => !Arc::ptr_eq(current, next),
            (None, None) => false,
            _ => true,
        };
        self.core.mark_dirty_if(changed);
        self.image = image;
    }

    /// Check whether any pixel of the image inside `section`
    /// (parent-space) is not fully transparent.
    ///
    /// Returns `false` when there is no image or the intersection is
    /// empty. Useful for hit-testing sprites against a region.
    pub fn intersects_pixels(&self, section: Rect) -> bool {
        if section.is_empty() {
            return false;
        }

        let intersection = self.bounds().intersection(&section);
        if intersection.is_empty() {
            return false;
        }

        let Some(image) = self.image.as_deref() else {
            return false;
        };

        let position = self.core.position();
        for y in intersection.y..(intersection.y + intersection.height as i32) {
            for x in intersection.x..(intersection.x + intersection.width as i32) {
                let local = Point::new(x, y) - position;
                if local.x < 0 || local.y < 0 {
                    continue;
                }
                if let Some(pixel) = image.get(local.x as u32, local.y as u32) {
                    if !pixel.is_transparent() {
                        return true;
                    }
                }
            }
        }

        false
    }
}

impl Component for ImageComponent {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn paint(&mut self, ctx: &mut PaintContext<'_>, section: Rect) {
        if let Some(image) = &self.image {
            ctx.blit(image, section);
        }
    }
}

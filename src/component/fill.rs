//! FillComponent: a solid-color rectangle.

use super::{Component, ComponentCore};
use crate::color::Rgba;
use crate::geometry::{Point, Rect, Size};
use crate::render::PaintContext;

/// A component that fills its bounds with a single color.
#[derive(Debug, Clone)]
pub struct FillComponent {
    core: ComponentCore,
    color: Rgba,
}

impl FillComponent {
    /// Create a fill at the given bounds.
    pub const fn new(position: Point, size: Size, color: Rgba) -> Self {
        Self {
            core: ComponentCore::new(position, size),
            color,
        }
    }

    /// The current fill color.
    #[inline]
    pub const fn color(&self) -> Rgba {
        self.color
    }

    /// Change the fill color. Marks the component dirty only if the color
    /// actually changed.
    pub fn set_color(&mut self, color: Rgba) {
        self.core.mark_dirty_if(color != self.color);
        self.color = color;
    }
}

impl Component for FillComponent {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn paint(&mut self, ctx: &mut PaintContext<'_>, section: Rect) {
        ctx.fill_rect(section, self.color);
    }
}

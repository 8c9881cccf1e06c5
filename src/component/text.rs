//! TextComponent: alignment-anchored text, rasterized by a font collaborator.

use super::{Component, ComponentCore};
use crate::alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
use crate::buffer::Pixmap;
use crate::color::Rgba;
use crate::geometry::{Point, Rect, Size};
use crate::render::PaintContext;
use crate::resource::{FontAdapter, FontSpec};
use std::sync::Arc;

/// A component that draws a line of text.
///
/// Glyph measurement and rasterization are delegated to a [`FontAdapter`];
/// the component only handles positioning and damage. The bounds are
/// derived from the measured text extent, anchored to a fixed base
/// position according to the alignment, so changing the text can move
/// the component (and produce movement damage) as well as resize it.
pub struct TextComponent {
    core: ComponentCore,
    adapter: Arc<dyn FontAdapter>,
    font: FontSpec,
    text: String,
    color: Rgba,
    alignment: Alignment,
    base_position: Point,
    raster: Option<Pixmap>,
}

impl TextComponent {
    /// Create a text component anchored at `position`.
    pub fn new(
        position: Point,
        text: impl Into<String>,
        color: Rgba,
        adapter: Arc<dyn FontAdapter>,
        font: FontSpec,
        alignment: Alignment,
    ) -> Self {
        let mut component = Self {
            core: ComponentCore::new(position, Size::ZERO),
            adapter,
            font,
            text: text.into(),
            color,
            alignment,
            base_position: position,
            raster: None,
        };
        component.layout();
        component
    }

    /// The displayed text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. An empty string draws nothing.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text == text {
            return;
        }
        self.text = text;
        self.layout();
    }

    /// The text color.
    #[inline]
    pub const fn color(&self) -> Rgba {
        self.color
    }

    /// Change the text color.
    pub fn set_color(&mut self, color: Rgba) {
        if self.color == color {
            return;
        }
        self.color = color;
        self.layout();
    }

    /// The font used for measurement and rasterization.
    #[inline]
    pub const fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Change the font.
    pub fn set_font(&mut self, font: FontSpec) {
        if self.font == font {
            return;
        }
        self.font = font;
        self.layout();
    }

    /// The anchor alignment.
    #[inline]
    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Change the anchor alignment.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        if self.alignment == alignment {
            return;
        }
        self.alignment = alignment;
        self.layout();
    }

    /// Move the anchor point the bounds are derived from.
    pub fn set_base_position(&mut self, position: Point) {
        if self.base_position == position {
            return;
        }
        self.base_position = position;
        self.layout();
    }

    /// Recompute bounds from the measured text and the anchor alignment.
    fn layout(&mut self) {
        let size = if self.text.is_empty() {
            Size::ZERO
        } else {
            self.adapter.measure(&self.font, &self.text)
        };

        let mut position = self.base_position;
        match self.alignment.vertical() {
            VerticalAlignment::Top => {}
            VerticalAlignment::Center => position.y -= (size.height / 2) as i32,
            VerticalAlignment::Bottom => position.y -= size.height as i32,
        }
        match self.alignment.horizontal() {
            HorizontalAlignment::Left => {}
            HorizontalAlignment::Center => position.x -= (size.width / 2) as i32,
            HorizontalAlignment::Right => position.x -= size.width as i32,
        }

        self.core.set_size(size);
        self.core.set_position(position);
        self.core.set_dirty(true);
        self.raster = None;
    }
}

impl Component for TextComponent {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn paint(&mut self, ctx: &mut PaintContext<'_>, section: Rect) {
        if self.text.is_empty() {
            return;
        }

        let raster = self.raster.get_or_insert_with(|| {
            self.adapter.rasterize(&self.font, &self.text, self.color)
        });
        ctx.blit(raster, section);
    }
}

impl std::fmt::Debug for TextComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextComponent")
            .field("bounds", &self.bounds())
            .field("text", &self.text)
            .field("alignment", &self.alignment)
            .finish()
    }
}

//! Font boundary: text measurement and rasterization collaborators.

use crate::buffer::Pixmap;
use crate::color::Rgba;
use crate::geometry::Size;

/// Identifies a font face at a given size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Face name, resolved by the adapter.
    pub name: String,
    /// Nominal size in pixels.
    pub size: f32,
}

impl FontSpec {
    /// Create a font spec.
    pub fn new(name: impl Into<String>, size: f32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Measures and rasterizes text on behalf of `TextComponent`.
///
/// The crate bundles no glyph rasterizer; shaping and rendering are the
/// platform's job. Adapters are expected to cache faces by name
/// internally, so `measure` and `rasterize` stay cheap to call per frame.
pub trait FontAdapter: Send + Sync {
    /// The pixel extent `text` occupies in `font`.
    fn measure(&self, font: &FontSpec, text: &str) -> Size;

    /// Render `text` into a pixmap of exactly `measure`'s extent, glyphs
    /// in `color` on a transparent background.
    fn rasterize(&self, font: &FontSpec, text: &str, color: Rgba) -> Pixmap;
}

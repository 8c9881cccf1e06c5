//! Palette quantization: nearest-reference-color matching with memoization.

use super::rgba::Rgba;
use super::transformer::ColorTransformer;
use crate::buffer::Pixmap;
use crate::error::FrameError;
use crate::geometry::Rect;
use std::collections::HashMap;

/// Perceptually weighted squared distance between two colors.
///
/// Uses the low-cost "redmean" correction: the red and blue weights shift
/// with the mean red level of the pair while green carries a fixed higher
/// weight. Not a true Euclidean metric, but cheap and a good fit for
/// palette matching.
///
/// Colors with different alpha values are never comparable; their distance
/// is unbounded so a cross-alpha pair can never win a nearest-match scan.
pub fn distance(a: Rgba, b: Rgba) -> f64 {
    if a.a != b.a {
        return f64::INFINITY;
    }

    let red_mean = (f64::from(a.r) + f64::from(b.r)) / 2.0;

    let weight_red = 2.0 + red_mean / 256.0;
    let weight_green = 4.0;
    let weight_blue = 2.0 + (255.0 - red_mean) / 256.0;

    let red = f64::from((i32::from(a.r) - i32::from(b.r)).pow(2));
    let green = f64::from((i32::from(a.g) - i32::from(b.g)).pow(2));
    let blue = f64::from((i32::from(a.b) - i32::from(b.b)).pow(2));

    weight_red * red + weight_green * green + weight_blue * blue
}

/// Maps every color to the closest entry of a fixed reference palette.
///
/// Lookups are memoized by exact input color. The cache is purely an
/// optimization: clearing it never changes any result, only the cost of
/// the next lookup.
pub struct PaletteTransformer {
    colors: Vec<Rgba>,
    matched: HashMap<Rgba, usize>,
}

impl PaletteTransformer {
    /// Create a transformer for the given reference colors.
    ///
    /// # Errors
    /// Returns [`FrameError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: Vec<Rgba>) -> Result<Self, FrameError> {
        if colors.is_empty() {
            return Err(FrameError::EmptyPalette);
        }
        Ok(Self {
            colors,
            matched: HashMap::new(),
        })
    }

    /// The reference colors, in construction order.
    #[inline]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Index of the reference color closest to `color`.
    ///
    /// Exact palette hits win immediately. Ties keep the first-seen
    /// minimum. If every reference color has a different alpha than the
    /// input, the match falls back to index 0.
    pub fn match_index(&mut self, color: Rgba) -> usize {
        if let Some(&index) = self.matched.get(&color) {
            return index;
        }
        let index = self.compute_match(color);
        self.matched.insert(color, index);
        index
    }

    /// The reference color closest to `color`.
    pub fn match_color(&mut self, color: Rgba) -> Rgba {
        let index = self.match_index(color);
        self.colors[index]
    }

    /// Palette indices for every pixel of `section`, row-major, clamped to
    /// the pixmap bounds.
    pub fn match_region_indices(&mut self, pixmap: &Pixmap, section: Rect) -> Vec<usize> {
        let visible = section.intersection(&pixmap.bounds());
        let mut indices = Vec::with_capacity(visible.area() as usize);

        for y in visible.y..(visible.y + visible.height as i32) {
            for x in visible.x..(visible.x + visible.width as i32) {
                if let Some(pixel) = pixmap.get(x as u32, y as u32) {
                    indices.push(self.match_index(pixel));
                }
            }
        }

        indices
    }

    /// Drop all memoized matches. Results are unaffected; this only exists
    /// so long-lived transformers can shed memory.
    pub fn clear_cache(&mut self) {
        self.matched.clear();
    }

    fn compute_match(&self, color: Rgba) -> usize {
        let mut best_index = None;
        let mut best_distance = f64::INFINITY;

        for (index, &other) in self.colors.iter().enumerate() {
            if color == other {
                return index;
            }

            let candidate = distance(color, other);
            if candidate >= best_distance {
                continue;
            }

            best_index = Some(index);
            best_distance = candidate;
        }

        best_index.unwrap_or(0)
    }
}

impl ColorTransformer for PaletteTransformer {
    fn convert(&mut self, color: Rgba) -> Rgba {
        self.match_color(color)
    }
}

impl std::fmt::Debug for PaletteTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaletteTransformer")
            .field("colors", &self.colors.len())
            .field("cached", &self.matched.len())
            .finish()
    }
}

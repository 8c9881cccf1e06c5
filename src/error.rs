//! Crate-wide error type.

use crate::geometry::Size;
use thiserror::Error;

/// Errors surfaced by frame construction, resource loading, and tile
/// addressing.
///
/// Geometry operations never error: intersections with out-of-range
/// rectangles simply become empty.
#[derive(Debug, Error)]
pub enum FrameError {
    /// A palette transformer was constructed without any reference colors.
    #[error("palette requires at least one reference color")]
    EmptyPalette,

    /// A canvas, viewport, tile grid, or sprite slice had a zero dimension.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Offending width.
        width: u32,
        /// Offending height.
        height: u32,
    },

    /// The viewport is not an integer multiple of the canvas on both axes.
    #[error("viewport {viewport:?} is not an integer multiple of canvas {canvas:?}")]
    NonIntegerScale {
        /// Configured viewport resolution.
        viewport: Size,
        /// Configured canvas resolution.
        canvas: Size,
    },

    /// A sprite was requested past the end of its sheet.
    #[error("sprite index {index} out of range ({count} sprites)")]
    SpriteIndexOutOfRange {
        /// Requested linear index.
        index: usize,
        /// Number of sprites in the sheet.
        count: usize,
    },

    /// A tile coordinate fell outside its grid.
    #[error("tile ({x}, {y}) outside {columns}x{rows} grid")]
    TileOutOfRange {
        /// Requested tile column.
        x: i32,
        /// Requested tile row.
        y: i32,
        /// Grid width in tiles.
        columns: u32,
        /// Grid height in tiles.
        rows: u32,
    },

    /// Raw pixel data did not match the declared dimensions.
    #[error("expected {expected} pixels, got {actual}")]
    PixelCountMismatch {
        /// Pixel count implied by the dimensions.
        expected: usize,
        /// Pixel count actually provided.
        actual: usize,
    },

    /// An image file could not be decoded.
    #[error("failed to decode image")]
    ImageDecode(#[from] image::ImageError),

    /// An underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

//! Geometry primitives: points, sizes, and damage rectangles.

pub mod point;
pub mod rect;

pub use point::{Point, Size};
pub use rect::Rect;

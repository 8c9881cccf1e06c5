//! Pixel buffer storage.

pub mod pixmap;

pub use pixmap::Pixmap;

//! Painting primitives used by components during a render pass.

pub mod context;

pub use context::PaintContext;

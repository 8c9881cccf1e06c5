//! # Pixelframe
//!
//! A damage-tracked 2D compositor for low-color pixel displays.
//!
//! Pixelframe renders a tree of positioned components into a fixed-size
//! pixel buffer, recomputes only the rectangles that changed since the
//! last render, and quantizes the repainted pixels to a fixed palette for
//! displays that cannot show arbitrary colors.
//!
//! ## Core Concepts
//!
//! - **Damage rectangles**: dirty components contribute their bounds
//!   (old and new when they moved); a greedy merge keeps the list short
//! - **Component tree**: leaf drawables (fill, image, sprite, text) under
//!   composites and lazily materialized tile grids
//! - **Frame driver**: tick/update/render loop with pausable wall-clock
//!   semantics and a configurable update cadence
//! - **Palette quantization**: red-mean weighted nearest-color matching
//!   with memoized lookups
//!
//! ## Example
//!
//! ```rust,ignore
//! use pixelframe::{Frame, FrameConfig, Size};
//!
//! // Drive a 128x128 canvas onto a 256x256 viewport.
//! let config = FrameConfig::new(Size::new(128, 128))
//!     .with_viewport(Size::new(256, 256));
//! let mut frame = Frame::new(scene, config)?;
//!
//! frame.tick(false);
//! for section in frame.pull_damage() {
//!     // flush frame.viewport() pixels inside `section` to the display
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod alignment;
pub mod buffer;
pub mod color;
pub mod component;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod render;
pub mod resource;

// Re-exports for convenience
pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use buffer::Pixmap;
pub use color::{ColorTransformer, IdentityTransformer, PaletteTransformer, Rgba};
pub use component::{
    Component, ComponentHandle, CompoundComponent, FillComponent, ImageComponent,
    SpriteComponent, TextComponent, TileAddressable, TileGridComponent,
};
pub use error::FrameError;
pub use frame::{Frame, FrameConfig, FrameScheduler, Scene, SchedulerCommand};
pub use geometry::{Point, Rect, Size};
pub use render::PaintContext;
pub use resource::{FontAdapter, FontSpec, ImageFileAdapter, ImageProvider, SpriteSheet};

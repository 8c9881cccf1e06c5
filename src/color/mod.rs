//! Color types and palette quantization.

pub mod palette;
pub mod rgba;
pub mod transformer;

pub use palette::{distance, PaletteTransformer};
pub use rgba::Rgba;
pub use transformer::{ColorTransformer, IdentityTransformer};

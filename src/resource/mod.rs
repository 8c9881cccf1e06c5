//! Resource collaborators: images, sprite sheets, and fonts.
//!
//! These sit at the crate boundary. The engine never loads files or shapes
//! text itself; it talks to [`ImageProvider`] and [`FontAdapter`]
//! implementations supplied by the application, with [`ImageFileAdapter`]
//! as the bundled directory-backed provider.

pub mod font;
pub mod image;
pub mod sheet;

pub use font::{FontAdapter, FontSpec};
pub use image::{ImageFileAdapter, ImageProvider};
pub use sheet::SpriteSheet;

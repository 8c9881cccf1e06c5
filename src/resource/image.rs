//! Image providers: named image and sprite-sheet lookup.

use super::sheet::SpriteSheet;
use crate::buffer::Pixmap;
use crate::color::Rgba;
use crate::error::FrameError;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

/// Resolves named images and sprite sheets for the application.
///
/// Implementations cache by name (and by name plus sprite dimensions for
/// sheets), so components can re-request resources every frame without
/// touching storage.
pub trait ImageProvider: Send + Sync {
    /// The image registered under `name`.
    ///
    /// # Errors
    /// Returns a [`FrameError`] when the image cannot be resolved.
    fn image(&self, name: &str) -> Result<Arc<Pixmap>, FrameError>;

    /// The image under `name`, sliced into a sprite sheet.
    ///
    /// # Errors
    /// Returns a [`FrameError`] when the image cannot be resolved or the
    /// sprite dimensions do not fit it.
    fn sheet(
        &self,
        name: &str,
        sprite_width: u32,
        sprite_height: u32,
    ) -> Result<Arc<SpriteSheet>, FrameError>;
}

/// An [`ImageProvider`] backed by a directory of PNG files.
///
/// Names are paths relative to the root directory. Decoded images are
/// cached by name; sheets by name plus sprite dimensions, so the same
/// file can back sheets of different granularity.
pub struct ImageFileAdapter {
    root: PathBuf,
    images: Mutex<HashMap<String, Arc<Pixmap>>>,
    sheets: Mutex<HashMap<(String, u32, u32), Arc<SpriteSheet>>>,
}

impl ImageFileAdapter {
    /// Create an adapter rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images: Mutex::new(HashMap::new()),
            sheets: Mutex::new(HashMap::new()),
        }
    }

    /// The directory names are resolved against.
    #[inline]
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn decode(&self, name: &str) -> Result<Arc<Pixmap>, FrameError> {
        let path = self.root.join(name);
        log::debug!("decoding image {}", path.display());

        let decoded = image::open(&path)?.into_rgba8();
        let (width, height) = decoded.dimensions();
        let pixels = decoded
            .pixels()
            .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
            .collect();
        Ok(Arc::new(Pixmap::from_raw(width, height, pixels)?))
    }
}

impl ImageProvider for ImageFileAdapter {
    fn image(&self, name: &str) -> Result<Arc<Pixmap>, FrameError> {
        let mut images = self.images.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(image) = images.get(name) {
            return Ok(image.clone());
        }

        let image = self.decode(name)?;
        images.insert(name.to_owned(), image.clone());
        Ok(image)
    }

    fn sheet(
        &self,
        name: &str,
        sprite_width: u32,
        sprite_height: u32,
    ) -> Result<Arc<SpriteSheet>, FrameError> {
        let key = (name.to_owned(), sprite_width, sprite_height);
        {
            let sheets = self.sheets.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(sheet) = sheets.get(&key) {
                return Ok(sheet.clone());
            }
        }

        // The image cache is shared across sheet granularities.
        let image = self.image(name)?;
        let sheet = Arc::new(SpriteSheet::new(image, sprite_width, sprite_height)?);

        let mut sheets = self.sheets.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(sheets.entry(key).or_insert(sheet).clone())
    }
}

impl std::fmt::Debug for ImageFileAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFileAdapter")
            .field("root", &self.root)
            .finish()
    }
}

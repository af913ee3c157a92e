//! Texture references resolved by the importer.
//!
//! The importer binds textures by path only; decoding pixels is the
//! viewer's business and is offered as an optional helper behind the
//! `decode` feature.

use std::path::{Path, PathBuf};

/// A texture reference: the file name as written in the source material
/// plus the absolute path it resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    /// File name as it appears in the source material.
    pub name: String,
    /// Resolved path (rooted at the scene file's directory for relative
    /// names).
    pub path: PathBuf,
}

impl Texture {
    /// Create a texture reference.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// The resolved path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Decoded RGBA8 pixel data.
#[cfg(feature = "decode")]
#[derive(Debug, Clone)]
pub struct TextureData {
    /// Tightly packed RGBA8 pixels, row-major.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

#[cfg(feature = "decode")]
impl Texture {
    /// Decode the referenced file to RGBA8.
    pub fn load_rgba8(&self) -> Result<TextureData, image::ImageError> {
        let img = image::open(&self.path)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(TextureData {
            data: rgba.into_raw(),
            width,
            height,
        })
    }
}

//! Asset loading: decodes image files into RGBA textures for the scene graph.
//!
//! Assets are loaded by path with no retry or fallback. A decoded image is
//! cached so a path shared by several materials is only read once.

use axisview_scene::{Texture, TextureSource};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A decoded RGBA8 image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAsset {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageAsset {
    /// True if any pixel is not fully opaque.
    pub fn has_alpha(&self) -> bool {
        self.rgba.chunks_exact(4).any(|px| px[3] != u8::MAX)
    }
}

/// Path-keyed cache of decoded images.
#[derive(Debug, Default)]
pub struct AssetStore {
    images: BTreeMap<PathBuf, Arc<ImageAsset>>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the image at `path`, or return the cached copy.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> Result<Arc<ImageAsset>, AssetError> {
        let path = path.as_ref();
        if let Some(cached) = self.images.get(path) {
            tracing::debug!(path = %path.display(), "image cache hit");
            return Ok(Arc::clone(cached));
        }

        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|source| AssetError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        let asset = Arc::new(ImageAsset {
            width: decoded.width(),
            height: decoded.height(),
            rgba: decoded.into_raw(),
        });
        tracing::info!(
            path = %path.display(),
            width = asset.width,
            height = asset.height,
            "image loaded"
        );
        self.images.insert(path.to_path_buf(), Arc::clone(&asset));
        Ok(asset)
    }

    /// Load an image as a named scene texture.
    pub fn load_texture(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Texture, AssetError> {
        let path = path.as_ref();
        let image = self.load_image(path)?;
        Ok(Texture {
            name: name.into(),
            source: TextureSource::File(path.to_path_buf()),
            width: image.width,
            height: image.height,
            rgba: image.rgba.clone(),
            has_alpha: image.has_alpha(),
        })
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

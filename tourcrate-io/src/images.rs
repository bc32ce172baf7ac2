//! Photograph assets, one per camera pose

use std::path::{Path, PathBuf};

use image::{imageops::FilterType, GenericImageView};
use tourcrate_core::Result;

use crate::error::IoError;

/// A decoded photograph in tightly packed RGBA8
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Photo {
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Resolves pose labels to files under a fixed image directory
#[derive(Debug, Clone)]
pub struct ImageCatalog {
    dir: PathBuf,
}

impl ImageCatalog {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, label: &str) -> PathBuf {
        self.dir.join(label)
    }

    /// Decode the photograph for `label`
    pub fn load(&self, label: &str) -> Result<Photo> {
        self.load_fitted(label, u32::MAX)
    }

    /// Decode the photograph for `label`, downscaling so neither edge exceeds
    /// `max_dimension` pixels
    pub fn load_fitted(&self, label: &str, max_dimension: u32) -> Result<Photo> {
        let path = self.path_for(label);
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let mut decoded = image::open(&path).map_err(IoError::from)?;
        let (width, height) = GenericImageView::dimensions(&decoded);
        if width > max_dimension || height > max_dimension {
            decoded = decoded.resize(max_dimension, max_dimension, FilterType::Triangle);
        }
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Photo {
            label: label.to_string(),
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}

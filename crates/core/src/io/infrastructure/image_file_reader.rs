use std::path::Path;

use crate::io::domain::image_io_error::ImageIoError;
use crate::io::domain::image_reader::ImageReader;
use crate::shared::image::Image;

/// Reads image files with the `image` crate, converting to RGBA8.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Image, ImageIoError> {
        let decoded = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(source) => ImageIoError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => ImageIoError::Decode {
                path: path.to_path_buf(),
                source,
            },
        })?;
        log::debug!(
            "Read {} ({}x{})",
            path.display(),
            decoded.width(),
            decoded.height()
        );
        Ok(Image::from_rgba(decoded.to_rgba8()))
    }
}

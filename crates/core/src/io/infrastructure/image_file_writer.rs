use std::path::Path;

use image::{DynamicImage, ImageFormat};

use crate::io::domain::image_io_error::ImageIoError;
use crate::io::domain::image_writer::ImageWriter;
use crate::shared::image::Image;

/// Writes images with the `image` crate.
///
/// Formats without an alpha channel (JPEG) receive the RGB channels only.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, image: &Image) -> Result<(), ImageIoError> {
        // Ensure parent directory exists (infrastructure concern)
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ImageIoError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let rgba = DynamicImage::ImageRgba8(image.to_rgba());
        let output = match ImageFormat::from_path(path) {
            Ok(ImageFormat::Jpeg) => DynamicImage::ImageRgb8(rgba.to_rgb8()),
            _ => rgba,
        };

        output.save(path).map_err(|e| match e {
            image::ImageError::IoError(source) => ImageIoError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => ImageIoError::Encode {
                path: path.to_path_buf(),
                source,
            },
        })
    }
}

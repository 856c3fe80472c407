use std::path::Path;

use crate::shared::image::Image;

use super::image_io_error::ImageIoError;

/// Reads a still image (the first frame, for animated formats) as RGBA.
pub trait ImageReader: Send {
    fn read(&self, path: &Path) -> Result<Image, ImageIoError>;
}

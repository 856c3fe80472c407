use std::path::Path;

use crate::shared::image::Image;

use super::image_io_error::ImageIoError;

/// Writes an image to a file; the format follows the path's extension.
pub trait ImageWriter: Send {
    fn write(&self, path: &Path, image: &Image) -> Result<(), ImageIoError>;
}

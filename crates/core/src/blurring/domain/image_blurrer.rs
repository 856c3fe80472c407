use crate::shared::image::Image;

use super::blur_error::BlurError;

/// Domain interface for blurring a whole image.
///
/// Implementations never modify `image`; they return a newly allocated result.
/// `radius` has already been validated as finite and non-negative by the caller.
pub trait ImageBlurrer: Send + Sync {
    fn blur(&self, image: &Image, radius: f32) -> Result<Image, BlurError>;
}

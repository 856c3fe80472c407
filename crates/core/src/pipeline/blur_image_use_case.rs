use crate::blurring::domain::blur_error::BlurError;
use crate::blurring::domain::image_blurrer::ImageBlurrer;
use crate::blurring::domain::tint;
use crate::shared::color::Color;
use crate::shared::constants::{LIGHT_BLUR_RADIUS, LIGHT_BLUR_TINT};
use crate::shared::image::Image;

/// Blur pipeline: validate → blur → tint.
pub struct BlurImageUseCase {
    blurrer: Box<dyn ImageBlurrer>,
}

impl BlurImageUseCase {
    pub fn new(blurrer: Box<dyn ImageBlurrer>) -> Self {
        Self { blurrer }
    }

    /// Blurs `image` with the given radius and composites `tint` on top.
    ///
    /// A radius of zero skips the blur, so only the tint is applied.
    pub fn execute(
        &self,
        image: &Image,
        radius: f32,
        tint: Option<Color>,
    ) -> Result<Image, BlurError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(BlurError::InvalidRadius(radius));
        }
        if image.is_empty() {
            return Err(BlurError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }

        let blurred = if radius > 0.0 {
            self.blurrer.blur(image, radius)?
        } else {
            image.clone()
        };

        Ok(match tint {
            Some(color) => tint::apply_tint(&blurred, color),
            None => blurred,
        })
    }

    /// Light blur preset. Never fails: returns a copy of `image` if blurring does.
    pub fn execute_light(&self, image: &Image) -> Image {
        match self.execute(image, LIGHT_BLUR_RADIUS, Some(LIGHT_BLUR_TINT)) {
            Ok(blurred) => blurred,
            Err(e) => {
                log::warn!("Light blur failed, using original image: {e}");
                image.clone()
            }
        }
    }
}

use crate::blurring::domain::blur_error::BlurError;
use crate::blurring::domain::image_blurrer::ImageBlurrer;
use crate::shared::image::{Image, CHANNELS};

use super::gaussian;

/// CPU whole-image blurrer using a separable Gaussian (sigma = radius).
///
/// For large radii the image is downscaled, blurred with a proportionally
/// smaller kernel and upscaled again, which keeps the cost roughly constant.
///
/// Pixels are blurred premultiplied, so transparent regions fade out without
/// darkening the colors next to them.
pub struct CpuGaussianBlurrer {
    allow_downscale: bool,
}

impl CpuGaussianBlurrer {
    pub fn new() -> Self {
        Self {
            allow_downscale: true,
        }
    }

    /// Always convolves at full resolution, whatever the radius.
    pub fn exact() -> Self {
        Self {
            allow_downscale: false,
        }
    }
}

impl Default for CpuGaussianBlurrer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBlurrer for CpuGaussianBlurrer {
    fn blur(&self, image: &Image, radius: f32) -> Result<Image, BlurError> {
        let width = image.width() as usize;
        let height = image.height() as usize;

        let kernel = gaussian::gaussian_kernel_1d(radius);
        if kernel.len() <= 1 {
            return Ok(image.clone());
        }

        let mut data = Vec::new();
        data.try_reserve_exact(image.data().len())?;
        data.extend_from_slice(image.data());
        gaussian::premultiply(&mut data);

        let scale = if self.allow_downscale {
            gaussian::downscale_factor(kernel.len())
        } else {
            1
        };
        let small_kernel = if scale > 1 {
            gaussian::gaussian_kernel_1d(radius / scale as f32)
        } else {
            Vec::new()
        };

        let mut temp = Vec::new();
        gaussian::blur_in_place(
            &mut data,
            width,
            height,
            CHANNELS,
            &kernel,
            &small_kernel,
            scale,
            &mut temp,
        )?;
        gaussian::unpremultiply(&mut data);

        Image::new(data, image.width(), image.height())
            .ok_or_else(|| BlurError::Backend("blurred buffer has unexpected length".into()))
    }
}

//! The four image effects, wired to the default CPU backends.
//!
//! Use the pipeline use cases directly to inject a different blurring or
//! decoding backend.

use crate::animation::domain::animated_image::AnimatedImage;
use crate::animation::infrastructure::gif_animation_decoder::GifAnimationDecoder;
use crate::blurring::domain::blur_error::BlurError;
use crate::blurring::infrastructure::cpu_gaussian_blurrer::CpuGaussianBlurrer;
use crate::pipeline::blur_image_use_case::BlurImageUseCase;
use crate::pipeline::decode_animation_use_case::DecodeAnimationUseCase;
use crate::shared::color::Color;
use crate::shared::image::Image;

/// Mean color of `image`; [`Color::TRANSPARENT`] for a zero-area image.
pub fn average_color(image: &Image) -> Color {
    crate::sampling::average_color::average_color(image)
}

/// Decodes GIF bytes, or `None` if they are not a decodable GIF.
pub fn decode_animated_image(bytes: &[u8]) -> Option<AnimatedImage> {
    DecodeAnimationUseCase::new(Box::new(GifAnimationDecoder::new())).execute(bytes)
}

/// Gaussian blur with sigma `radius`, then `tint` composited on top.
pub fn blur(image: &Image, radius: f32, tint: Option<Color>) -> Result<Image, BlurError> {
    default_blur_use_case().execute(image, radius, tint)
}

/// Light blur preset; returns a copy of `image` if blurring fails.
pub fn light_blur(image: &Image) -> Image {
    default_blur_use_case().execute_light(image)
}

fn default_blur_use_case() -> BlurImageUseCase {
    BlurImageUseCase::new(Box::new(CpuGaussianBlurrer::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::infrastructure::gif_animation_decoder::tests::{
        encode_gif, truncate_in_second_frame, OVERSIZED_CANVAS_GIF,
    };
    use crate::shared::constants::LIGHT_BLUR_TINT;
    use image::codecs::gif::Repeat;

    fn halves(width: u32, height: u32, left: Color, right: Color) -> Image {
        let mut rgba = image::RgbaImage::new(width, height);
        for (x, _, p) in rgba.enumerate_pixels_mut() {
            *p = if x < width / 2 { left.into() } else { right.into() };
        }
        Image::from_rgba(rgba)
    }

    #[test]
    fn test_average_of_solid_image() {
        let c = Color::new(30, 60, 90, 255);
        assert_eq!(average_color(&Image::solid(16, 16, c)), c);
    }

    #[test]
    fn test_average_of_halves_is_midpoint() {
        let (c1, c2) = (Color::rgb(255, 255, 0), Color::rgb(0, 0, 255));
        assert_eq!(average_color(&halves(8, 8, c1, c2)), c1.midpoint(c2));
    }

    #[test]
    fn test_average_of_empty_image() {
        assert_eq!(average_color(&Image::solid(0, 0, Color::WHITE)), Color::TRANSPARENT);
    }

    #[test]
    fn test_decode_n_frames() {
        let bytes = encode_gif(10, 10, &[40, 80, 120, 160], Repeat::Infinite);
        let anim = decode_animated_image(&bytes).unwrap();
        assert_eq!(anim.frame_count(), 4);
        assert!(anim.frames().iter().all(|f| !f.delay().is_zero()));
    }

    #[test]
    fn test_decode_rejects_non_gif_and_corrupt_bytes() {
        assert!(decode_animated_image(&[]).is_none());
        assert!(decode_animated_image(b"\x89PNG\r\n\x1a\n").is_none());
        assert!(decode_animated_image(b"GIF89a").is_none());
    }

    #[test]
    fn test_decode_is_all_or_nothing_when_stream_breaks() {
        let bytes = encode_gif(10, 10, &[40, 80, 120], Repeat::Infinite);
        assert!(decode_animated_image(truncate_in_second_frame(&bytes)).is_none());
    }

    #[test]
    fn test_decode_oversized_canvas_returns_none() {
        assert!(decode_animated_image(OVERSIZED_CANVAS_GIF).is_none());
    }

    #[test]
    fn test_blur_zero_radius_without_tint_is_identity() {
        let image = halves(12, 12, Color::BLACK, Color::WHITE);
        assert_eq!(blur(&image, 0.0, None).unwrap(), image);
    }

    #[test]
    fn test_blur_negative_radius_fails() {
        let image = Image::solid(4, 4, Color::WHITE);
        assert!(matches!(
            blur(&image, -0.5, None),
            Err(BlurError::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_blur_softens_edge_and_keeps_input() {
        let image = halves(20, 4, Color::BLACK, Color::WHITE);
        let before = image.clone();
        let out = blur(&image, 2.0, None).unwrap();
        let edge = out.pixel(10, 2).unwrap();
        assert!(edge.r > 0 && edge.r < 255);
        assert_eq!(image, before);
    }

    #[test]
    fn test_light_blur_tints_solid_image() {
        let image = Image::solid(32, 32, Color::BLACK);
        let out = light_blur(&image);
        assert_eq!(out.dimensions(), (32, 32));
        let p = out.pixel(16, 16).unwrap();
        let expected = crate::blurring::domain::tint::apply_tint(&image, LIGHT_BLUR_TINT)
            .pixel(16, 16)
            .unwrap();
        assert!((p.r as i32 - expected.r as i32).abs() <= 1);
        assert_eq!(p.a, 255);
    }

    #[test]
    fn test_light_blur_on_empty_image_returns_original() {
        let image = Image::solid(0, 3, Color::BLACK);
        assert_eq!(light_blur(&image), image);
    }
}

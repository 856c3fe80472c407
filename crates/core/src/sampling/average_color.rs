use image::imageops::{self, FilterType};
use ndarray::Axis;

use crate::shared::color::Color;
use crate::shared::constants::AVERAGE_SAMPLE_DIMENSION;
use crate::shared::image::{Image, CHANNELS};

/// Mean color over all pixels of `image`, per channel, rounded to nearest.
///
/// Images larger than [`AVERAGE_SAMPLE_DIMENSION`] on either side are first
/// downsampled with a triangle filter. A zero-area image yields
/// [`Color::TRANSPARENT`].
pub fn average_color(image: &Image) -> Color {
    if image.is_empty() {
        return Color::TRANSPARENT;
    }
    match sample_dimensions(image.width(), image.height()) {
        Some((w, h)) => {
            let sample = imageops::resize(&image.to_rgba(), w, h, FilterType::Triangle);
            mean_color(&Image::from_rgba(sample))
        }
        None => mean_color(image),
    }
}

/// Target size for downsampling, or `None` if the image is already small enough.
fn sample_dimensions(width: u32, height: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if longest <= AVERAGE_SAMPLE_DIMENSION {
        return None;
    }
    let scale = AVERAGE_SAMPLE_DIMENSION as f64 / longest as f64;
    let w = ((width as f64 * scale).round() as u32).max(1);
    let h = ((height as f64 * scale).round() as u32).max(1);
    Some((w, h))
}

fn mean_color(image: &Image) -> Color {
    let pixels = image.width() as f64 * image.height() as f64;
    let sums = image
        .as_ndarray()
        .mapv(f64::from)
        .sum_axis(Axis(0))
        .sum_axis(Axis(0));
    debug_assert_eq!(sums.len(), CHANNELS);

    let channel = |c: usize| (sums[c] / pixels).round().clamp(0.0, 255.0) as u8;
    Color::new(channel(0), channel(1), channel(2), channel(3))
}

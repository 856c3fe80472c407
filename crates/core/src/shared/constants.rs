use std::time::Duration;

use super::color::Color;

/// Blur radius used by the light blur preset.
pub const LIGHT_BLUR_RADIUS: f32 = 30.0;

/// Tint used by the light blur preset: white at ~30% opacity.
pub const LIGHT_BLUR_TINT: Color = Color::new(255, 255, 255, 77);

/// Images larger than this on either side are downsampled before averaging.
pub const AVERAGE_SAMPLE_DIMENSION: u32 = 64;

/// Frame delays shorter than this are treated as unset.
pub const MIN_FRAME_DELAY: Duration = Duration::from_millis(11);

/// Delay substituted for unset or too-short GIF frame delays (browser convention).
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp", "gif"];

/// Upper bound on the RGBA bytes a single GIF may decode to, across all frames.
pub const MAX_DECODED_GIF_BYTES: u64 = 512 * 1024 * 1024;

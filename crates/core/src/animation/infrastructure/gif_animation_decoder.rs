use std::io::Cursor;
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageDecoder, ImageFormat, Limits};

use crate::animation::domain::animated_image::{AnimatedImage, AnimationFrame, LoopCount};
use crate::animation::domain::animated_image_decoder::AnimatedImageDecoder;
use crate::shared::constants::{DEFAULT_FRAME_DELAY, MAX_DECODED_GIF_BYTES, MIN_FRAME_DELAY};
use crate::shared::image::Image;

/// Decodes GIF bytes using the `image` crate for composited frames and the
/// `gif` crate for the NETSCAPE2.0 loop count.
///
/// Decoding is all-or-nothing: an error in any frame fails the whole image.
/// GIFs whose canvas or frame total would exceed [`MAX_DECODED_GIF_BYTES`]
/// are rejected before the oversized buffers are allocated.
pub struct GifAnimationDecoder;

impl GifAnimationDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GifAnimationDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimatedImageDecoder for GifAnimationDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<AnimatedImage, Box<dyn std::error::Error>> {
        match image::guess_format(bytes) {
            Ok(ImageFormat::Gif) => {}
            Ok(other) => return Err(format!("not an animated format: {other:?}").into()),
            Err(e) => return Err(e.into()),
        }

        let header = read_header(bytes)?;
        let frame_bytes = canvas_bytes(header.width, header.height)?;

        let mut decoder = GifDecoder::new(Cursor::new(bytes))?;
        decoder.set_limits(Limits::default())?;

        let mut frames = Vec::new();
        let mut total_bytes = 0u64;
        for frame in decoder.into_frames() {
            let frame = frame?;
            total_bytes = total_bytes
                .checked_add(frame_bytes)
                .filter(|&total| total <= MAX_DECODED_GIF_BYTES)
                .ok_or("GIF frames exceed the decoded size limit")?;
            let (numer, denom) = frame.delay().numer_denom_ms();
            let delay = normalize_delay(numer, denom);
            frames.push(AnimationFrame::new(
                Image::from_rgba(frame.into_buffer()),
                delay,
            ));
        }

        if frames.is_empty() {
            return Err("GIF contains no frames".into());
        }
        let count = frames.len();
        let animated = AnimatedImage::new(frames, header.loop_count)
            .ok_or("GIF frames have inconsistent dimensions")?;
        log::debug!(
            "Decoded GIF: {}x{}, {count} frames, loop count {}",
            header.width,
            header.height,
            header.loop_count
        );
        Ok(animated)
    }
}

struct GifHeader {
    width: u16,
    height: u16,
    loop_count: LoopCount,
}

/// Reads the logical screen size and the loop count, which lives in an
/// extension block before the first frame.
fn read_header(bytes: &[u8]) -> Result<GifHeader, gif::DecodingError> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(bytes)?;
    decoder.next_frame_info()?;
    let loop_count = match decoder.repeat() {
        gif::Repeat::Infinite => LoopCount::Infinite,
        // The extension counts repetitions after the first play.
        gif::Repeat::Finite(n) => LoopCount::Finite(u32::from(n) + 1),
    };
    Ok(GifHeader {
        width: decoder.width(),
        height: decoder.height(),
        loop_count,
    })
}

/// RGBA size of one composited frame, if it fits within [`MAX_DECODED_GIF_BYTES`].
fn canvas_bytes(width: u16, height: u16) -> Result<u64, String> {
    let bytes = u64::from(width) * u64::from(height) * 4;
    if bytes > MAX_DECODED_GIF_BYTES {
        return Err(format!(
            "GIF canvas {width}x{height} exceeds the decoded size limit"
        ));
    }
    Ok(bytes)
}

/// Replaces missing or too-short delays with [`DEFAULT_FRAME_DELAY`].
fn normalize_delay(numer: u32, denom: u32) -> Duration {
    if denom == 0 {
        return DEFAULT_FRAME_DELAY;
    }
    let delay = Duration::from_nanos(u64::from(numer) * 1_000_000 / u64::from(denom));
    if delay < MIN_FRAME_DELAY {
        DEFAULT_FRAME_DELAY
    } else {
        delay
    }
}

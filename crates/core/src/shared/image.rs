use ndarray::ArrayView3;

use super::color::Color;

/// Number of interleaved channels per pixel (RGBA).
pub const CHANNELS: usize = 4;

/// An immutable RGBA8 pixel buffer in row-major order.
///
/// Conversion to and from other pixel formats happens at I/O boundaries;
/// every operation in this crate reads an `Image` and returns a new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Image {
    /// Wraps raw RGBA bytes. Returns `None` if `data.len() != width * height * 4`.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) * CHANNELS {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// A `width` x `height` image filled with `color`.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let pixels = (width as usize) * (height as usize);
        let data = color.to_array().repeat(pixels);
        Self {
            data,
            width,
            height,
        }
    }

    pub fn from_rgba(image: image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            data: image.into_raw(),
            width,
            height,
        }
    }

    pub fn to_rgba(&self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .expect("Image data length must match dimensions")
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * CHANNELS;
        let p = &self.data[idx..idx + CHANNELS];
        Some(Color::new(p[0], p[1], p[2], p[3]))
    }

    /// View as a `(height, width, channels)` array.
    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(
            (self.height as usize, self.width as usize, CHANNELS),
            &self.data,
        )
        .expect("Image data length must match dimensions")
    }
}

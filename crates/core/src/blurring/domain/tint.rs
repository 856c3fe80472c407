use crate::shared::color::Color;
use crate::shared::image::{Image, CHANNELS};

/// Composites `tint` source-over on every pixel of `image`.
///
/// Colors are straight (non-premultiplied) alpha. A fully transparent tint
/// returns an identical copy.
pub fn apply_tint(image: &Image, tint: Color) -> Image {
    let mut data = image.data().to_vec();
    tint_in_place(&mut data, tint);
    Image::new(data, image.width(), image.height())
        .expect("tinting preserves buffer length")
}

pub(crate) fn tint_in_place(data: &mut [u8], tint: Color) {
    if tint.a == 0 {
        return;
    }
    let ta = tint.a as f32 / 255.0;
    let tint_rgb = [tint.r as f32, tint.g as f32, tint.b as f32];

    for px in data.chunks_exact_mut(CHANNELS) {
        let a = px[3] as f32 / 255.0;
        let out_a = ta + a * (1.0 - ta);
        for c in 0..3 {
            let v = (tint_rgb[c] * ta + px[c] as f32 * a * (1.0 - ta)) / out_a;
            px[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        px[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

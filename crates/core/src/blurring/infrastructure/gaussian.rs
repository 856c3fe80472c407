use std::collections::TryReserveError;

/// Kernels longer than this are applied on a downscaled copy.
const MAX_DIRECT_KERNEL: usize = 50;

/// Precompute a normalized 1D Gaussian kernel for the given sigma.
///
/// The kernel spans `±ceil(3σ)` taps, so its length is always odd. A sigma
/// of zero (or below) yields the identity kernel `[1.0]`.
pub fn gaussian_kernel_1d(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 || !sigma.is_finite() {
        return vec![1.0];
    }
    let sigma = sigma as f64;
    let half = (3.0 * sigma).ceil() as usize;
    let kernel_size = 2 * half + 1;
    let mut kernel_f64: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half as f64;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel_f64.iter().sum();
    for v in &mut kernel_f64 {
        *v /= sum;
    }
    kernel_f64.iter().map(|&v| v as f32).collect()
}

/// Integer downscale factor for a kernel of the given length (1 = no downscale).
pub fn downscale_factor(kernel_len: usize) -> usize {
    (kernel_len / MAX_DIRECT_KERNEL).max(1)
}

/// Apply a separable Gaussian blur using a pre-computed kernel, reusing `temp`.
///
/// Edges are clamped. Fails only if `temp` cannot grow to the image size.
pub fn separable_gaussian_blur_with_kernel(
    data: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &[f32],
    temp: &mut Vec<f32>,
) -> Result<(), TryReserveError> {
    let kernel_size = kernel.len();
    if kernel_size <= 1 || width == 0 || height == 0 {
        return Ok(());
    }
    let half = kernel_size / 2;

    let needed = width * height * channels;
    temp.try_reserve_exact(needed.saturating_sub(temp.len()))?;
    temp.resize(needed, 0.0);

    // Horizontal pass: data → temp
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    let sx = (x as isize + k as isize - half as isize)
                        .max(0)
                        .min((width - 1) as isize) as usize;
                    sum += data[(y * width + sx) * channels + c] as f32 * w;
                }
                temp[(y * width + x) * channels + c] = sum;
            }
        }
    }

    // Vertical pass: temp → data
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    let sy = (y as isize + k as isize - half as isize)
                        .max(0)
                        .min((height - 1) as isize) as usize;
                    sum += temp[(sy * width + x) * channels + c] * w;
                }
                data[(y * width + x) * channels + c] = sum.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    Ok(())
}

/// Apply Gaussian blur in place, using downscale optimization for large kernels.
#[allow(clippy::too_many_arguments)]
pub fn blur_in_place(
    data: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &[f32],
    small_kernel: &[f32],
    scale: usize,
    temp: &mut Vec<f32>,
) -> Result<(), TryReserveError> {
    if scale <= 1 || height < scale * 2 || width < scale * 2 {
        separable_gaussian_blur_with_kernel(data, width, height, channels, kernel, temp)
    } else {
        let size = width * height * channels;
        let (mut small, sw, sh) = downscale(data, width, height, channels, scale)?;
        separable_gaussian_blur_with_kernel(&mut small, sw, sh, channels, small_kernel, temp)?;
        let upscaled = upscale(&small, sw, sh, channels, width, height)?;
        data[..size].copy_from_slice(&upscaled);
        Ok(())
    }
}

/// Downscale an image by integer factor using area averaging.
pub fn downscale(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    scale: usize,
) -> Result<(Vec<u8>, usize, usize), TryReserveError> {
    let new_w = width / scale;
    let new_h = height / scale;
    let mut out = zeroed_buffer(new_w * new_h * channels)?;

    for y in 0..new_h {
        for x in 0..new_w {
            for c in 0..channels {
                let mut sum = 0u32;
                let mut count = 0u32;
                for dy in 0..scale {
                    for dx in 0..scale {
                        let sy = y * scale + dy;
                        let sx = x * scale + dx;
                        if sy < height && sx < width {
                            sum += data[(sy * width + sx) * channels + c] as u32;
                            count += 1;
                        }
                    }
                }
                out[(y * new_w + x) * channels + c] = (sum / count) as u8;
            }
        }
    }

    Ok((out, new_w, new_h))
}

/// Upscale an image to the target size using bilinear interpolation.
pub fn upscale(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    target_w: usize,
    target_h: usize,
) -> Result<Vec<u8>, TryReserveError> {
    let mut out = zeroed_buffer(target_w * target_h * channels)?;

    for y in 0..target_h {
        for x in 0..target_w {
            let src_x = x as f32 * (width as f32 - 1.0) / (target_w as f32 - 1.0).max(1.0);
            let src_y = y as f32 * (height as f32 - 1.0) / (target_h as f32 - 1.0).max(1.0);

            let x0 = (src_x.floor() as usize).min(width - 1);
            let x1 = (x0 + 1).min(width - 1);
            let y0 = (src_y.floor() as usize).min(height - 1);
            let y1 = (y0 + 1).min(height - 1);

            let fx = src_x - x0 as f32;
            let fy = src_y - y0 as f32;

            for c in 0..channels {
                let v00 = data[(y0 * width + x0) * channels + c] as f32;
                let v10 = data[(y0 * width + x1) * channels + c] as f32;
                let v01 = data[(y1 * width + x0) * channels + c] as f32;
                let v11 = data[(y1 * width + x1) * channels + c] as f32;

                let val = v00 * (1.0 - fx) * (1.0 - fy)
                    + v10 * fx * (1.0 - fy)
                    + v01 * (1.0 - fx) * fy
                    + v11 * fx * fy;
                out[(y * target_w + x) * channels + c] = val.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Ok(out)
}

/// A zero-filled buffer of `len` bytes, or an error if it cannot be allocated.
fn zeroed_buffer(len: usize) -> Result<Vec<u8>, TryReserveError> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len)?;
    buffer.resize(len, 0);
    Ok(buffer)
}

/// Scales the color channels of interleaved RGBA pixels by their alpha.
pub fn premultiply(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u32;
        for c in &mut px[..3] {
            *c = ((*c as u32 * a + 127) / 255) as u8;
        }
    }
}

/// Inverse of [`premultiply`]. Fully transparent pixels keep a zero color.
pub fn unpremultiply(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u32;
        for c in &mut px[..3] {
            *c = if a == 0 {
                0
            } else {
                ((*c as u32 * 255 + a / 2) / a).min(255) as u8
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn blur(data: &mut [u8], width: usize, height: usize, sigma: f32) {
        let kernel = gaussian_kernel_1d(sigma);
        let mut temp = Vec::new();
        separable_gaussian_blur_with_kernel(data, width, height, 4, &kernel, &mut temp).unwrap();
    }

    #[test]
    fn test_kernel_sums_to_one() {
        let k = gaussian_kernel_1d(2.0);
        let sum: f32 = k.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_kernel_length_covers_three_sigma() {
        assert_eq!(gaussian_kernel_1d(1.0).len(), 7);
        assert_eq!(gaussian_kernel_1d(2.5).len(), 17);
        assert_eq!(gaussian_kernel_1d(30.0).len(), 181);
    }

    #[test]
    fn test_kernel_is_symmetric() {
        let k = gaussian_kernel_1d(2.0);
        for i in 0..k.len() / 2 {
            assert_relative_eq!(k[i], k[k.len() - 1 - i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_kernel_center_is_largest() {
        let k = gaussian_kernel_1d(2.0);
        let center = k[k.len() / 2];
        assert!(k.iter().all(|&v| center >= v));
    }

    #[test]
    fn test_zero_and_invalid_sigma_yield_identity_kernel() {
        assert_eq!(gaussian_kernel_1d(0.0), vec![1.0]);
        assert_eq!(gaussian_kernel_1d(-3.0), vec![1.0]);
        assert_eq!(gaussian_kernel_1d(f32::NAN), vec![1.0]);
    }

    #[test]
    fn test_blur_uniform_image_unchanged() {
        let mut data = vec![128u8; 10 * 10 * 4];
        blur(&mut data, 10, 10, 1.5);
        assert!(data.iter().all(|&v| (v as i32 - 128).abs() <= 1));
    }

    #[test]
    fn test_blur_modifies_high_contrast() {
        // A single bright pixel in a dark image should be spread out
        let mut data = vec![0u8; 10 * 10 * 4];
        let cx = 5 * 10 + 5;
        data[cx * 4..cx * 4 + 3].fill(255);

        let original = data.clone();
        blur(&mut data, 10, 10, 1.0);

        assert!(data[cx * 4] < 255);
        let neighbor = (5 * 10 + 6) * 4;
        assert!(data[neighbor] > 0);
        assert_ne!(data, original);
    }

    #[test]
    fn test_identity_kernel_leaves_data_untouched() {
        let mut data: Vec<u8> = (0..5 * 5 * 4).map(|i| i as u8).collect();
        let original = data.clone();
        blur(&mut data, 5, 5, 0.0);
        assert_eq!(data, original);
    }

    #[test]
    fn test_downscale_factor() {
        assert_eq!(downscale_factor(7), 1);
        assert_eq!(downscale_factor(49), 1);
        assert_eq!(downscale_factor(181), 3);
    }

    #[test]
    fn test_downscale_upscale_roundtrip() {
        // Uniform image should survive roundtrip
        let data = vec![100u8; 8 * 8 * 4];
        let (small, sw, sh) = downscale(&data, 8, 8, 4, 2).unwrap();
        assert_eq!(sw, 4);
        assert_eq!(sh, 4);
        let big = upscale(&small, sw, sh, 4, 8, 8).unwrap();
        assert!(big.iter().all(|&v| (v as i32 - 100).abs() <= 1));
    }

    #[test]
    fn test_blur_in_place_with_downscale_keeps_uniform_image() {
        let mut data = vec![77u8; 40 * 30 * 4];
        let kernel = gaussian_kernel_1d(20.0);
        let scale = downscale_factor(kernel.len());
        let small_kernel = gaussian_kernel_1d(20.0 / scale as f32);
        let mut temp = Vec::new();
        blur_in_place(&mut data, 40, 30, 4, &kernel, &small_kernel, scale, &mut temp).unwrap();
        assert!(data.iter().all(|&v| (v as i32 - 77).abs() <= 1));
    }

    #[test]
    fn test_unallocatable_buffer_is_an_error() {
        assert!(zeroed_buffer(usize::MAX).is_err());
    }

    #[test]
    fn test_premultiply_scales_color_by_alpha() {
        let mut data = vec![255, 128, 0, 128, 10, 20, 30, 255, 200, 200, 200, 0];
        premultiply(&mut data);
        assert_eq!(data, vec![128, 64, 0, 128, 10, 20, 30, 255, 0, 0, 0, 0]);
    }

    #[test]
    fn test_unpremultiply_restores_color() {
        let mut data = vec![128, 64, 0, 128, 10, 20, 30, 255, 5, 5, 5, 0];
        unpremultiply(&mut data);
        assert_eq!(data, vec![255, 128, 0, 128, 10, 20, 30, 255, 0, 0, 0, 0]);
    }
}

//! Linear filtering and convolution.
//!
//! All filters work on 8-bit images of any channel count, treat channels
//! independently, accumulate in `f32` and write back with round-half-even
//! and saturation to `0..=255`.
//!
//! # Kernels
//!
//! - [`Kernel::sharpen`] - 3x3 cross sharpening
//! - [`gaussian_kernel_1d`] - normalized Gaussian taps for separable blur
//!
//! # Example
//!
//! ```rust
//! use visioncraft_core::Image;
//! use visioncraft_ops::border::BorderMode;
//! use visioncraft_ops::filter::{filter2d, Kernel};
//!
//! let src = Image::filled(16, 16, &[128, 64, 32]).unwrap();
//! let out = filter2d(&src, &Kernel::sharpen(1.0), BorderMode::Reflect101).unwrap();
//! assert_eq!(out.pixel(7, 7), &[128, 64, 32]);
//! ```

use crate::border::BorderMode;
use crate::params::BlurParams;
use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};
use tracing::{debug, trace};
use visioncraft_core::Image;

/// Convolution kernel for image filtering.
///
/// Weights are applied as a correlation with the anchor at the center, so
/// `data[0]` multiplies the top-left neighbor.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Kernel weights, row-major.
    pub data: Vec<f32>,
    /// Kernel width (must be odd).
    pub width: usize,
    /// Kernel height (must be odd).
    pub height: usize,
}

impl Kernel {
    /// Creates a new kernel from data.
    ///
    /// Width and height must be odd numbers.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> OpsResult<Self> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(OpsError::InvalidParameter(
                "kernel dimensions must be odd".into(),
            ));
        }
        if data.len() != width * height {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self { data, width, height })
    }

    /// Creates a sharpening kernel.
    ///
    /// `amount = 1.0` gives the classic cross:
    ///
    /// ```text
    ///  0 -1  0
    /// -1  5 -1
    ///  0 -1  0
    /// ```
    ///
    /// Weights always sum to 1, so flat regions are unchanged.
    pub fn sharpen(amount: f32) -> Self {
        let center = 1.0 + 4.0 * amount;
        Self {
            data: vec![
                0.0, -amount, 0.0,
                -amount, center, -amount,
                0.0, -amount, 0.0,
            ],
            width: 3,
            height: 3,
        }
    }

    /// Returns the kernel radius (half-size).
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }
}

/// Fixed small Gaussian tables used when sigma is derived from the size.
const SMALL_GAUSSIAN: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
];

/// Returns `ksize` normalized Gaussian taps.
///
/// With `sigma <= 0` sigma is derived as `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`
/// and sizes up to 7 use fixed binomial tables.
pub fn gaussian_kernel_1d(ksize: usize, sigma: f64) -> OpsResult<Vec<f32>> {
    if ksize == 0 || ksize % 2 == 0 {
        return Err(OpsError::InvalidParameter(format!(
            "gaussian kernel size must be odd and positive, got {ksize}"
        )));
    }
    if sigma <= 0.0 && ksize <= 7 {
        return Ok(SMALL_GAUSSIAN[ksize / 2].to_vec());
    }

    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
    };
    let scale = -0.5 / (sigma * sigma);
    let half = (ksize as f64 - 1.0) * 0.5;

    let taps: Vec<f64> = (0..ksize)
        .map(|i| {
            let x = i as f64 - half;
            (scale * x * x).exp()
        })
        .collect();
    let sum: f64 = taps.iter().sum();
    Ok(taps.into_iter().map(|w| (w / sum) as f32).collect())
}

/// Rounds half to even and clamps into `u8`.
#[inline]
pub(crate) fn saturate_u8(v: f32) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

#[inline]
fn border_fill(border: BorderMode) -> f32 {
    match border {
        BorderMode::Constant(v) => v as f32,
        _ => 0.0,
    }
}

/// Correlates every channel of `src` with `kernel`.
///
/// Output has the same shape as the input.
pub fn filter2d(src: &Image<'_>, kernel: &Kernel, border: BorderMode) -> OpsResult<Image<'static>> {
    let (rows, cols, channels) = src.dims();
    trace!(rows, cols, channels, kernel_w = kernel.width, kernel_h = kernel.height, "filter2d");

    let (rx, ry) = kernel.radius();
    let fill = border_fill(border);
    // Source column of every (x, kx) tap, resolved once for all rows.
    let col_map: Vec<Option<usize>> = (0..cols)
        .flat_map(|x| {
            (0..kernel.width).map(move |kx| border.resolve(x as isize + kx as isize - rx as isize, cols))
        })
        .collect();

    let mut out = Image::new(rows, cols, channels)?;
    for_each_row(out.data_mut(), cols * channels, |y, row| {
        let mut sums = vec![0.0f32; channels];
        for x in 0..cols {
            sums.fill(0.0);
            for ky in 0..kernel.height {
                let sy = border.resolve(y as isize + ky as isize - ry as isize, rows);
                let src_row = sy.map(|sy| src.row(sy));
                for kx in 0..kernel.width {
                    let w = kernel.data[ky * kernel.width + kx];
                    if w == 0.0 {
                        continue;
                    }
                    match (src_row, col_map[x * kernel.width + kx]) {
                        (Some(src_row), Some(sx)) => {
                            let px = &src_row[sx * channels..(sx + 1) * channels];
                            for (s, &v) in sums.iter_mut().zip(px) {
                                *s += v as f32 * w;
                            }
                        }
                        _ => sums.iter_mut().for_each(|s| *s += fill * w),
                    }
                }
            }
            for (dst, &s) in row[x * channels..(x + 1) * channels].iter_mut().zip(&sums) {
                *dst = saturate_u8(s);
            }
        }
    });

    Ok(out)
}

/// Applies a separable filter: `kx` along rows, then `ky` along columns.
///
/// The intermediate pass is kept in `f32`, so only the final result is
/// rounded.
pub fn sep_filter2d(
    src: &Image<'_>,
    kx: &[f32],
    ky: &[f32],
    border: BorderMode,
) -> OpsResult<Image<'static>> {
    if kx.len() % 2 == 0 || ky.len() % 2 == 0 {
        return Err(OpsError::InvalidParameter(
            "separable kernel lengths must be odd".into(),
        ));
    }
    let (rows, cols, channels) = src.dims();
    trace!(rows, cols, channels, kx = kx.len(), ky = ky.len(), "sep_filter2d");

    let row_len = cols * channels;
    let fill = border_fill(border);
    let (rx, ry) = (kx.len() / 2, ky.len() / 2);

    let mut tmp = vec![0.0f32; rows * row_len];
    for_each_row(&mut tmp, row_len, |y, row| {
        let src_row = src.row(y);
        for x in 0..cols {
            let dst = &mut row[x * channels..(x + 1) * channels];
            for (k, &w) in kx.iter().enumerate() {
                match border.resolve(x as isize + k as isize - rx as isize, cols) {
                    Some(sx) => {
                        let px = &src_row[sx * channels..(sx + 1) * channels];
                        for (d, &v) in dst.iter_mut().zip(px) {
                            *d += v as f32 * w;
                        }
                    }
                    None => dst.iter_mut().for_each(|d| *d += fill * w),
                }
            }
        }
    });

    // A constant row outside the image filters to `fill * sum(kx)`.
    let fill_row = fill * kx.iter().sum::<f32>();
    let mut out = Image::new(rows, cols, channels)?;
    let tmp = &tmp;
    for_each_row(out.data_mut(), row_len, |y, row| {
        let mut acc = vec![0.0f32; row_len];
        for (k, &w) in ky.iter().enumerate() {
            match border.resolve(y as isize + k as isize - ry as isize, rows) {
                Some(sy) => {
                    let t = &tmp[sy * row_len..(sy + 1) * row_len];
                    for (a, &v) in acc.iter_mut().zip(t) {
                        *a += v * w;
                    }
                }
                None => acc.iter_mut().for_each(|a| *a += fill_row * w),
            }
        }
        for (dst, &a) in row.iter_mut().zip(&acc) {
            *dst = saturate_u8(a);
        }
    });

    Ok(out)
}

/// Gaussian blur with the given parameters.
///
/// The defaults are a 15x15 kernel with sigma 2.6 and reflect-101 borders.
///
/// # Example
///
/// ```rust
/// use visioncraft_core::Image;
/// use visioncraft_ops::filter::gaussian_blur;
/// use visioncraft_ops::params::BlurParams;
///
/// let src = Image::filled(32, 32, &[200]).unwrap();
/// let out = gaussian_blur(&src, &BlurParams::default()).unwrap();
/// assert_eq!(out.pixel(0, 0), &[200]);
/// ```
pub fn gaussian_blur(src: &Image<'_>, params: &BlurParams) -> OpsResult<Image<'static>> {
    params.validate()?;
    debug!(ksize = params.ksize, sigma = params.effective_sigma(), "gaussian blur");
    let taps = gaussian_kernel_1d(params.ksize, params.sigma)?;
    sep_filter2d(src, &taps, &taps, params.border)
}

/// Sharpens with the 3x3 cross kernel and reflect-101 borders.
pub fn sharpen(src: &Image<'_>) -> OpsResult<Image<'static>> {
    filter2d(src, &Kernel::sharpen(1.0), BorderMode::Reflect101)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(rows: usize, cols: usize, channels: usize) -> Image<'static> {
        Image::from_fn(rows, cols, channels, |x, y, px| {
            for (c, v) in px.iter_mut().enumerate() {
                *v = ((x * 7 + y * 13 + c * 50) % 256) as u8;
            }
        })
        .unwrap()
    }

    #[test]
    fn test_kernel_new_validates() {
        assert!(Kernel::new(vec![1.0; 9], 3, 3).is_ok());
        assert!(Kernel::new(vec![1.0; 4], 2, 2).is_err());
        assert!(Kernel::new(vec![1.0; 8], 3, 3).is_err());
    }

    #[test]
    fn test_sharpen_kernel() {
        let k = Kernel::sharpen(1.0);
        assert_eq!(k.data, vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0]);
        assert_eq!(k.radius(), (1, 1));
    }

    #[test]
    fn test_gaussian_taps_normalized() {
        let taps = gaussian_kernel_1d(15, 0.0).unwrap();
        assert_eq!(taps.len(), 15);
        assert_relative_eq!(taps.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(taps[7], 0.15401, epsilon = 2e-5);
        assert_relative_eq!(taps[4], 0.07915, epsilon = 2e-5);
        // Symmetric, peaked at the center
        for i in 0..7 {
            assert_relative_eq!(taps[i], taps[14 - i]);
            assert!(taps[i] < taps[i + 1]);
        }
    }

    #[test]
    fn test_gaussian_small_table() {
        assert_eq!(gaussian_kernel_1d(3, 0.0).unwrap(), vec![0.25, 0.5, 0.25]);
        // Explicit sigma bypasses the table
        assert_ne!(gaussian_kernel_1d(3, 2.0).unwrap(), vec![0.25, 0.5, 0.25]);
        assert!(gaussian_kernel_1d(4, 0.0).is_err());
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate_u8(-3.0), 0);
        assert_eq!(saturate_u8(300.0), 255);
        assert_eq!(saturate_u8(2.5), 2);
        assert_eq!(saturate_u8(3.5), 4);
    }

    #[test]
    fn test_blur_preserves_flat_image() {
        let src = Image::filled(20, 20, &[10, 100, 250]).unwrap();
        let out = gaussian_blur(&src, &BlurParams::default()).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_blur_shape_and_smoothing() {
        let mut src = Image::new(21, 21, 1).unwrap();
        src.data_mut()[10 * 21 + 10] = 255;
        let out = gaussian_blur(&src, &BlurParams::default()).unwrap();
        assert_eq!(out.dims(), (21, 21, 1));
        let peak = out.pixel(10, 10)[0];
        assert!(peak > 0 && peak < 255);
        assert!(out.pixel(9, 10)[0] <= peak);
        // Symmetric response
        assert_eq!(out.pixel(8, 10), out.pixel(12, 10));
        assert_eq!(out.pixel(10, 8), out.pixel(10, 12));
        // sigma 2.6: center tap 0.15401, tap at distance 3 is 0.07915
        assert_eq!(out.pixel(10, 10), &[6]);
        assert_eq!(out.pixel(13, 10), &[3]);
        assert_eq!(out.pixel(10, 13), &[3]);
    }

    #[test]
    fn test_blur_tiny_image() {
        // Kernel far wider than the image still resolves through reflection
        let src = ramp(2, 3, 3);
        let out = gaussian_blur(&src, &BlurParams::default()).unwrap();
        assert_eq!(out.dims(), (2, 3, 3));
    }

    #[test]
    fn test_blur_rejects_even_kernel() {
        let src = ramp(8, 8, 1);
        assert!(matches!(
            gaussian_blur(&src, &BlurParams::with_ksize(6)),
            Err(OpsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_separable_matches_full_kernel() {
        let src = ramp(9, 11, 3);
        let taps = gaussian_kernel_1d(5, 1.2).unwrap();
        let full: Vec<f32> = taps
            .iter()
            .flat_map(|&a| taps.iter().map(move |&b| a * b))
            .collect();
        let k = Kernel::new(full, 5, 5).unwrap();
        let a = sep_filter2d(&src, &taps, &taps, BorderMode::Reflect101).unwrap();
        let b = filter2d(&src, &k, BorderMode::Reflect101).unwrap();
        for (x, y) in a.storage().iter().zip(b.storage().iter()) {
            assert!((*x as i32 - *y as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_sharpen_flat_unchanged() {
        let src = Image::filled(5, 7, &[42, 0, 255]).unwrap();
        assert_eq!(sharpen(&src).unwrap(), src);
    }

    #[test]
    fn test_sharpen_point() {
        let mut src = Image::filled(5, 5, &[10]).unwrap();
        src.data_mut()[2 * 5 + 2] = 60;
        let out = sharpen(&src).unwrap();
        // 5 * 60 - 4 * 10
        assert_eq!(out.pixel(2, 2), &[255]);
        // 5 * 10 - 60 - 3 * 10 = -40
        assert_eq!(out.pixel(2, 1), &[0]);
        assert_eq!(out.pixel(0, 0), &[10]);
    }

    #[test]
    fn test_filter2d_constant_border() {
        let src = Image::filled(3, 3, &[100]).unwrap();
        let k = Kernel::new(vec![1.0 / 9.0; 9], 3, 3).unwrap();
        let out = filter2d(&src, &k, BorderMode::Constant(0)).unwrap();
        // Corner sees 4 of 9 taps inside
        assert_eq!(out.pixel(0, 0), &[44]);
        assert_eq!(out.pixel(1, 1), &[100]);
    }
}

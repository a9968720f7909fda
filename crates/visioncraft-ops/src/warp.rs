//! Affine warping.
//!
//! Inverse mapping: every destination pixel computes its source coordinate
//! through the inverted forward transform and samples bilinearly. Each of
//! the four bilinear taps goes through the border mode on its own, so a
//! sample straddling the image edge blends image and border values.
//!
//! When the `parallel` feature is enabled, rows are processed with rayon.

use crate::border::BorderMode;
use crate::filter::saturate_u8;
use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};
use glam::{DAffine2, DVec2};
use tracing::trace;
use visioncraft_core::Image;

/// Bilinear sample at `(x, y)` into `out`, one value per channel.
#[inline]
fn sample_bilinear(src: &Image<'_>, border: BorderMode, x: f64, y: f64, out: &mut [f64]) {
    let (rows, cols, _) = src.dims();
    let fill = match border {
        BorderMode::Constant(v) => v as f64,
        _ => 0.0,
    };

    let x0f = x.floor();
    let y0f = y.floor();
    let fx = x - x0f;
    let fy = y - y0f;
    // Saturating casts keep far-off coordinates outside without overflow.
    let x0 = x0f as isize;
    let y0 = y0f as isize;

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0.saturating_add(1), y0, fx * (1.0 - fy)),
        (x0, y0.saturating_add(1), (1.0 - fx) * fy),
        (x0.saturating_add(1), y0.saturating_add(1), fx * fy),
    ];

    out.fill(0.0);
    for (tx, ty, w) in taps {
        if w == 0.0 {
            continue;
        }
        match (border.resolve(tx, cols), border.resolve(ty, rows)) {
            (Some(sx), Some(sy)) => {
                for (o, &v) in out.iter_mut().zip(src.pixel(sx, sy)) {
                    *o += v as f64 * w;
                }
            }
            _ => out.iter_mut().for_each(|o| *o += fill * w),
        }
    }
}

/// Warps `src` by the forward affine transform `m` into a `rows x cols`
/// image.
///
/// `m` maps source coordinates to destination coordinates, the convention
/// of [`rotation_matrix`](crate::transform::rotation_matrix).
///
/// # Errors
///
/// - [`OpsError::InvalidParameter`] if `m` is not invertible
/// - [`OpsError::Core`] if the output size is zero
pub fn warp_affine(
    src: &Image<'_>,
    m: &DAffine2,
    rows: usize,
    cols: usize,
    border: BorderMode,
) -> OpsResult<Image<'static>> {
    let det = m.matrix2.determinant();
    if det == 0.0 || !det.is_finite() || !m.translation.is_finite() {
        return Err(OpsError::InvalidParameter(format!(
            "affine transform is not invertible: {m:?}"
        )));
    }
    let inv = m.inverse();
    let channels = src.channels();
    trace!(src_rows = src.rows(), src_cols = src.cols(), rows, cols, channels, "warp_affine");

    let mut out = Image::new(rows, cols, channels)?;
    for_each_row(out.data_mut(), cols * channels, |y, row| {
        let mut acc = vec![0.0f64; channels];
        for (x, px) in row.chunks_exact_mut(channels).enumerate() {
            let s = inv.transform_point2(DVec2::new(x as f64, y as f64));
            sample_bilinear(src, border, s.x, s.y, &mut acc);
            for (d, &v) in px.iter_mut().zip(&acc) {
                *d = saturate_u8(v as f32);
            }
        }
    });

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(rows: usize, cols: usize) -> Image<'static> {
        Image::from_fn(rows, cols, 3, |x, y, px| {
            px[0] = (x * 20) as u8;
            px[1] = (y * 20) as u8;
            px[2] = 200;
        })
        .unwrap()
    }

    #[test]
    fn test_identity_is_exact() {
        let src = gradient(6, 9);
        let out = warp_affine(&src, &DAffine2::IDENTITY, 6, 9, BorderMode::Constant(0)).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_integer_translation() {
        let src = gradient(5, 5);
        let m = DAffine2::from_translation(DVec2::new(2.0, 1.0));
        let out = warp_affine(&src, &m, 5, 5, BorderMode::Constant(7)).unwrap();
        assert_eq!(out.pixel(2, 1), src.pixel(0, 0));
        assert_eq!(out.pixel(4, 4), src.pixel(2, 3));
        // Exposed area reads the constant
        assert_eq!(out.pixel(0, 0), &[7, 7, 7]);
        assert_eq!(out.pixel(1, 4), &[7, 7, 7]);
    }

    #[test]
    fn test_half_pixel_blends_with_border() {
        let src = Image::filled(2, 2, &[100]).unwrap();
        // Destination (0, 0) samples source x = -0.5: half image, half border
        let m = DAffine2::from_translation(DVec2::new(0.5, 0.0));
        let out = warp_affine(&src, &m, 2, 2, BorderMode::Constant(0)).unwrap();
        assert_eq!(out.pixel(0, 0), &[50]);
        assert_eq!(out.pixel(1, 0), &[100]);
    }

    #[test]
    fn test_output_size_follows_request() {
        let src = gradient(4, 4);
        let out = warp_affine(&src, &DAffine2::IDENTITY, 3, 7, BorderMode::Replicate).unwrap();
        assert_eq!(out.dims(), (3, 7, 3));
        assert_eq!(out.pixel(6, 0), src.pixel(3, 0));
    }

    #[test]
    fn test_singular_rejected() {
        let src = gradient(4, 4);
        let m = DAffine2::from_scale(DVec2::new(0.0, 1.0));
        assert!(matches!(
            warp_affine(&src, &m, 4, 4, BorderMode::Constant(0)),
            Err(OpsError::InvalidParameter(_))
        ));
    }
}

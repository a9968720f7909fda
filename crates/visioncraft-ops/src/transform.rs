//! Geometric transformation operations.
//!
//! # Operations
//!
//! - [`crop`] / [`crop_view`] - Extract a clipped region of interest
//! - [`rotation_matrix`] - Forward 2x3 rotation about a center
//! - [`rotate`] - Rotate about the image center, keeping the size
//!
//! # Example
//!
//! ```rust
//! use visioncraft_core::{Image, Rect};
//! use visioncraft_ops::transform::crop;
//!
//! let src = Image::new(64, 64, 3).unwrap();
//!
//! // Region partly outside is clipped to the image
//! let cropped = crop(&src, Rect::new(48, 48, 32, 32)).unwrap();
//! assert_eq!((cropped.rows(), cropped.cols()), (16, 16));
//! ```

use crate::params::RotateParams;
use crate::warp::warp_affine;
use crate::OpsResult;
use glam::{DAffine2, DMat2, DVec2};
use tracing::{debug, trace};
use visioncraft_core::{Image, Rect};

/// Borrowed view of `region` clipped to the image.
///
/// When the clipped region is empty (negative or zero size, or entirely
/// outside) the whole image is returned instead. No pixels are copied.
pub fn crop_view<'s>(src: &'s Image<'_>, region: Rect) -> OpsResult<Image<'s>> {
    trace!(?region, rows = src.rows(), cols = src.cols(), "crop");
    let clipped = match region.clip_to(src.cols(), src.rows()) {
        Some(r) => r,
        None => {
            debug!(?region, "crop region misses the image, keeping full frame");
            src.bounds()
        }
    };
    Ok(src.roi(clipped)?)
}

/// Crops `region`, clipped to the image, into a new continuous image.
///
/// An empty intersection yields an unmodified copy of the input.
pub fn crop(src: &Image<'_>, region: Rect) -> OpsResult<Image<'static>> {
    Ok(crop_view(src, region)?.to_contiguous())
}

/// Forward 2x3 transform rotating by `angle` degrees about `center` and
/// scaling by `scale`.
///
/// With `a = cos(angle) * scale` and `b = sin(angle) * scale`:
///
/// ```text
/// [  a  b  (1 - a) cx - b cy ]
/// [ -b  a  b cx + (1 - a) cy ]
/// ```
///
/// Positive angles turn the image counter-clockwise as displayed (y down).
pub fn rotation_matrix(center: DVec2, angle: f64, scale: f64) -> DAffine2 {
    let (sin, cos) = angle.to_radians().sin_cos();
    let a = cos * scale;
    let b = sin * scale;
    DAffine2 {
        // Column-major: x_axis is the first column.
        matrix2: DMat2::from_cols(DVec2::new(a, -b), DVec2::new(b, a)),
        translation: DVec2::new(
            (1.0 - a) * center.x - b * center.y,
            b * center.x + (1.0 - a) * center.y,
        ),
    }
}

/// Rotates about `(cols / 2, rows / 2)` with bilinear sampling.
///
/// The output keeps the input size; corners that rotate out are lost and
/// newly exposed areas take the border value (black by default).
///
/// # Example
///
/// ```rust
/// use visioncraft_core::Image;
/// use visioncraft_ops::params::RotateParams;
/// use visioncraft_ops::transform::rotate;
///
/// let src = Image::filled(10, 20, &[5, 6, 7]).unwrap();
/// let same = rotate(&src, &RotateParams::degrees(0.0)).unwrap();
/// assert_eq!(same, src);
/// ```
pub fn rotate(src: &Image<'_>, params: &RotateParams) -> OpsResult<Image<'static>> {
    params.validate()?;
    let (rows, cols, _) = src.dims();
    let center = DVec2::new(cols as f64 / 2.0, rows as f64 / 2.0);
    debug!(angle = params.angle, scale = params.scale, cx = center.x, cy = center.y, "rotate");
    let m = rotation_matrix(center, params.angle, params.scale);
    warp_affine(src, &m, rows, cols, params.border)
}

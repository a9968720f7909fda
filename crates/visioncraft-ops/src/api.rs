//! Array-level call surface.
//!
//! Every function takes an [`ExternalArray`] of shape `[rows, cols]` or
//! `[rows, cols, 3]`, converts it with [`to_native`], runs one operation and
//! converts the result back with [`from_native`]. Results always own their
//! memory, so they outlive the input.
//!
//! The plain functions use the fixed defaults of the `params` structs; the
//! `*_with` variants take explicit parameters.
//!
//! # Example
//!
//! ```rust
//! use visioncraft_core::ExternalArray;
//! use visioncraft_ops::api::{crop_image, to_grayscale};
//!
//! let bgr = ExternalArray::from_vec(vec![4, 4, 3], vec![128; 48]).unwrap();
//! let gray = to_grayscale(&bgr).unwrap();
//! assert_eq!(gray.shape(), &[4, 4]);
//!
//! let corner = crop_image(&bgr, 2, 2, 10, 10).unwrap();
//! assert_eq!(corner.shape(), &[2, 2, 3]);
//! ```

use crate::params::{BlurParams, CannyParams, RotateParams};
use crate::{color, edge, filter, transform, OpsResult};
use visioncraft_core::{from_native, to_native, ExternalArray, Image, Rect};

/// Runs `op` on the native view of `input` and marshals the result back.
fn run<F>(input: &ExternalArray<'_>, op: F) -> OpsResult<ExternalArray<'static>>
where
    F: FnOnce(&Image<'_>) -> OpsResult<Image<'static>>,
{
    let image = to_native(input)?;
    let result = op(&image)?;
    Ok(from_native(result)?)
}

/// Converts a B, G, R array to a `[rows, cols]` luma array.
pub fn to_grayscale(input: &ExternalArray<'_>) -> OpsResult<ExternalArray<'static>> {
    run(input, color::grayscale)
}

/// 15x15 Gaussian blur.
pub fn apply_blur(input: &ExternalArray<'_>) -> OpsResult<ExternalArray<'static>> {
    apply_blur_with(input, &BlurParams::default())
}

/// Gaussian blur with explicit parameters.
pub fn apply_blur_with(input: &ExternalArray<'_>, params: &BlurParams) -> OpsResult<ExternalArray<'static>> {
    run(input, |img| filter::gaussian_blur(img, params))
}

/// Canny edges with thresholds 100 / 200; output is `[rows, cols]` of 0 / 255.
pub fn detect_edges(input: &ExternalArray<'_>) -> OpsResult<ExternalArray<'static>> {
    detect_edges_with(input, &CannyParams::default())
}

/// Canny edges with explicit thresholds.
pub fn detect_edges_with(input: &ExternalArray<'_>, params: &CannyParams) -> OpsResult<ExternalArray<'static>> {
    run(input, |img| edge::canny(img, params))
}

/// 3x3 cross sharpening.
pub fn sharpen_image(input: &ExternalArray<'_>) -> OpsResult<ExternalArray<'static>> {
    run(input, filter::sharpen)
}

/// Crops `width x height` at `(x, y)`, clipped to the image.
///
/// A rectangle that misses the image entirely yields a copy of the input.
pub fn crop_image(
    input: &ExternalArray<'_>,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> OpsResult<ExternalArray<'static>> {
    let image = to_native(input)?;
    // The view goes straight to from_native, which copies only when the
    // clipped rows are not adjacent in memory.
    let view = transform::crop_view(&image, Rect::new(x, y, width, height))?;
    Ok(from_native(view)?.into_owned())
}

/// Rotates by `angle` degrees about the center, keeping the shape.
pub fn rotate_image(input: &ExternalArray<'_>, angle: f64) -> OpsResult<ExternalArray<'static>> {
    rotate_image_with(input, &RotateParams::degrees(angle))
}

/// Rotation with explicit parameters.
pub fn rotate_image_with(input: &ExternalArray<'_>, params: &RotateParams) -> OpsResult<ExternalArray<'static>> {
    run(input, |img| transform::rotate(img, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpsError;
    use visioncraft_core::Error;

    #[test]
    fn test_results_own_memory() {
        let data = vec![9u8; 5 * 6 * 3];
        let arr = ExternalArray::from_slice(vec![5, 6, 3], &data).unwrap();
        for out in [
            to_grayscale(&arr).unwrap(),
            apply_blur(&arr).unwrap(),
            sharpen_image(&arr).unwrap(),
            crop_image(&arr, 0, 0, 100, 100).unwrap(),
            rotate_image(&arr, 0.0).unwrap(),
        ] {
            assert!(out.storage().is_owned());
        }
    }

    #[test]
    fn test_full_crop_is_copy() {
        let data: Vec<u8> = (0..48).collect();
        let arr = ExternalArray::from_slice(vec![4, 4, 3], &data).unwrap();
        let out = crop_image(&arr, 0, 0, 4, 4).unwrap();
        assert_eq!(out.to_vec(), data);
        assert_ne!(out.as_bytes().as_ptr(), data.as_ptr());
    }

    #[test]
    fn test_bad_shape_is_core_error() {
        let arr = ExternalArray::from_vec(vec![2, 2, 4], vec![0; 16]).unwrap();
        let err = to_grayscale(&arr).unwrap_err();
        assert!(matches!(err, OpsError::Core(Error::InvalidShape { .. })));
    }

    #[test]
    fn test_with_variants_validate() {
        let arr = ExternalArray::from_vec(vec![4, 4], vec![0; 16]).unwrap();
        assert!(matches!(
            apply_blur_with(&arr, &BlurParams::with_ksize(2)),
            Err(OpsError::InvalidParameter(_))
        ));
        assert!(matches!(
            rotate_image(&arr, f64::INFINITY),
            Err(OpsError::InvalidParameter(_))
        ));
    }
}

//! Conversion between [`ExternalArray`] and [`Image`].
//!
//! - [`to_native`] views a caller's 2-D or 3-D array as an [`Image`]. The
//!   pixels stay in the caller's memory whenever the strides describe
//!   row-major pixels (optionally with padded rows).
//! - [`from_native`] exposes an [`Image`] as an [`ExternalArray`] with
//!   explicit shape and byte strides. Non-continuous images are copied first;
//!   the storage tag of the result tells which path was taken.
//!
//! # Example
//!
//! ```rust
//! use visioncraft_core::{from_native, to_native, ExternalArray};
//!
//! let pixels: Vec<u8> = (0..4 * 5 * 3).map(|v| v as u8).collect();
//! let arr = ExternalArray::from_slice(vec![4, 5, 3], &pixels).unwrap();
//!
//! let img = to_native(&arr).unwrap();
//! assert_eq!(img.dims(), (4, 5, 3));
//!
//! let back = from_native(img).unwrap();
//! assert_eq!(back.shape(), &[4, 5, 3]);
//! assert_eq!(back.strides(), &[15, 3, 1]);
//! assert!(back.storage().is_borrowed());
//! assert_eq!(back.to_vec(), pixels);
//! ```

use crate::{Error, ExternalArray, Image, PixelStorage, Result};
use tracing::{debug, trace};

/// Channel count of a 3-D external array.
pub const COLOR_CHANNELS: usize = 3;

/// Views an external array as an internal image.
///
/// `[rows, cols]` becomes a single-channel image, `[rows, cols, 3]` a
/// three-channel image. When the array's strides place the channels of a
/// pixel next to each other and the pixels of a row next to each other, the
/// image borrows the array's memory and the array must outlive it. Any other
/// stride pattern is gathered into an owned, continuous copy.
///
/// # Errors
///
/// Returns [`Error::InvalidShape`] if the array is not 2-D or 3-D, if a 3-D
/// array's trailing axis is not 3, or if any axis has zero length.
pub fn to_native<'a>(array: &'a ExternalArray<'_>) -> Result<Image<'a>> {
    let shape = array.shape();
    let (rows, cols, channels) = match *shape {
        [rows, cols] => (rows, cols, 1),
        [rows, cols, COLOR_CHANNELS] => (rows, cols, COLOR_CHANNELS),
        [_, _, c] => {
            return Err(Error::invalid_shape(
                shape,
                format!("trailing axis must be {COLOR_CHANNELS}, got {c}"),
            ));
        }
        _ => {
            return Err(Error::invalid_shape(
                shape,
                format!("expected 2 or 3 dimensions, got {}", shape.len()),
            ));
        }
    };
    if rows == 0 || cols == 0 {
        return Err(Error::invalid_shape(shape, "axes must be non-empty"));
    }
    trace!(rows, cols, channels, strides = ?array.strides(), "to_native");

    match row_step(array.strides(), rows, cols, channels) {
        Some(step) => Image::from_parts(
            PixelStorage::Borrowed(array.as_bytes()),
            0,
            rows,
            cols,
            channels,
            step,
        ),
        None => {
            debug!(strides = ?array.strides(), "gathering non row-major array into a continuous copy");
            Image::from_vec(rows, cols, channels, array.to_vec())
        }
    }
}

/// Exposes an internal image as an external array.
///
/// The result has shape `[rows, cols]` for one channel and
/// `[rows, cols, channels]` otherwise, with strides from [`byte_strides`].
/// A continuous image hands over its memory: borrowed images stay borrowed,
/// owned images keep their allocation. A non-continuous image (such as a
/// region view) is first copied into a fresh continuous allocation, so the
/// returned strides never reach outside the pixels they describe.
///
/// # Errors
///
/// Returns [`Error::UnsupportedChannelCount`] if the image has neither 1 nor
/// 3 channels.
pub fn from_native(image: Image<'_>) -> Result<ExternalArray<'_>> {
    let (rows, cols, channels) = image.dims();
    let shape = match channels {
        1 => vec![rows, cols],
        COLOR_CHANNELS => vec![rows, cols, channels],
        other => return Err(Error::unsupported_channels(other)),
    };
    trace!(rows, cols, channels, continuous = image.is_continuous(), "from_native");

    let image = if image.is_continuous() {
        image
    } else {
        debug!(rows, cols, channels, step = image.step(), "materializing continuous copy");
        image.to_contiguous()
    };

    let len = rows * cols * channels;
    let (storage, offset) = image.into_storage();
    let data = match storage {
        PixelStorage::Borrowed(s) => PixelStorage::Borrowed(&s[offset..offset + len]),
        PixelStorage::Owned(mut v) if offset == 0 => {
            v.truncate(len);
            PixelStorage::Owned(v)
        }
        PixelStorage::Owned(v) => PixelStorage::Owned(v[offset..offset + len].to_vec()),
    };

    ExternalArray::with_strides(shape, byte_strides(cols, channels), data)
}

/// Byte strides of a continuous image exposed as an external array.
///
/// - row stride: `cols * channels * itemsize`
/// - column stride: `channels * itemsize`
/// - channel stride (3-channel only): `itemsize`
pub fn byte_strides(cols: usize, channels: usize) -> Vec<usize> {
    let item = std::mem::size_of::<u8>();
    if channels == 1 {
        vec![cols * item, item]
    } else {
        vec![cols * channels * item, channels * item, item]
    }
}

/// Row step for arrays whose pixels are row-major, `None` otherwise.
///
/// Axes of length 1 impose no stride constraint.
fn row_step(strides: &[usize], rows: usize, cols: usize, channels: usize) -> Option<usize> {
    let row_bytes = cols * channels;
    let channels_packed = channels == 1 || strides[2] == 1;
    let pixels_packed = cols == 1 || strides[1] == channels;
    if !(channels_packed && pixels_packed) {
        return None;
    }
    if rows == 1 {
        Some(row_bytes)
    } else if strides[0] >= row_bytes {
        Some(strides[0])
    } else {
        None
    }
}

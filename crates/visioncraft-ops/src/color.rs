//! Color conversion.
//!
//! Three-channel images are B, G, R. Luma uses the Rec.601 weights in
//! 14-bit fixed point, so results are exact integers:
//!
//! ```text
//! Y = (1868 B + 9617 G + 4899 R + 2^13) >> 14
//! ```

use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};
use tracing::trace;
use visioncraft_core::Image;

/// Fixed-point fraction bits of the luma weights.
pub const LUMA_SHIFT: u32 = 14;
/// Blue weight, `round(0.114 * 2^14)`.
pub const LUMA_B: u32 = 1868;
/// Green weight, `round(0.587 * 2^14)`.
pub const LUMA_G: u32 = 9617;
/// Red weight, `round(0.299 * 2^14)`.
pub const LUMA_R: u32 = 4899;

/// Luma of one B, G, R pixel.
#[inline]
pub fn bgr_to_luma(b: u8, g: u8, r: u8) -> u8 {
    let y = LUMA_B * b as u32 + LUMA_G * g as u32 + LUMA_R * r as u32 + (1 << (LUMA_SHIFT - 1));
    (y >> LUMA_SHIFT) as u8
}

/// Converts a B, G, R image to single-channel luma.
///
/// # Errors
///
/// [`OpsError::UnsupportedChannels`] for any input that is not three-channel,
/// including images that are already gray.
///
/// # Example
///
/// ```rust
/// use visioncraft_core::Image;
/// use visioncraft_ops::color::grayscale;
///
/// let white = Image::filled(4, 4, &[255, 255, 255]).unwrap();
/// let gray = grayscale(&white).unwrap();
/// assert_eq!(gray.channels(), 1);
/// assert_eq!(gray.pixel(0, 0), &[255]);
/// ```
pub fn grayscale(src: &Image<'_>) -> OpsResult<Image<'static>> {
    let (rows, cols, channels) = src.dims();
    trace!(rows, cols, channels, "grayscale");

    match channels {
        3 => {
            let mut out = Image::new(rows, cols, 1)?;
            for_each_row(out.data_mut(), cols, |y, row| {
                for (dst, px) in row.iter_mut().zip(src.row(y).chunks_exact(3)) {
                    *dst = bgr_to_luma(px[0], px[1], px[2]);
                }
            });
            Ok(out)
        }
        other => Err(OpsError::unsupported_channels("grayscale", other)),
    }
}

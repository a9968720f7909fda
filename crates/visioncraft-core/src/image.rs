//! Internal image representation.
//!
//! [`Image`] is the native grid every transform consumes and produces: a
//! rectangle of `rows` x `cols` pixels, each made of `channels` interleaved
//! bytes, on top of [`PixelStorage`].
//!
//! # Memory Layout
//!
//! Pixels are stored **row-major**, top-to-bottom. Consecutive rows start
//! `step` bytes apart, beginning at `offset`:
//!
//! ```text
//! offset
//!   ▼
//!   [B G R B G R ... B G R]·pad·  ← row 0 (step bytes)
//!   [B G R B G R ... B G R]·pad·  ← row 1
//!   ...
//! ```
//!
//! An image is *continuous* when there is no padding between rows, which is
//! always the case for freshly allocated images. Views produced by
//! [`Image::roi`] keep the parent's step and are generally not continuous.
//!
//! Three-channel images are conventionally B, G, R. Nothing in this crate
//! reorders channels.
//!
//! # Usage
//!
//! ```rust
//! use visioncraft_core::{Image, Rect};
//!
//! let img = Image::filled(100, 100, &[10, 20, 30]).unwrap();
//! assert!(img.is_continuous());
//!
//! let view = img.roi(Rect::new(10, 10, 50, 50)).unwrap();
//! assert!(!view.is_continuous());
//! assert_eq!(view.pixel(0, 0), &[10, 20, 30]);
//!
//! let copy = view.to_contiguous();
//! assert!(copy.is_continuous());
//! ```

use crate::{Error, PixelStorage, Rect, Result};

/// A rectangular grid of 8-bit pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Image<'a> {
    data: PixelStorage<'a>,
    offset: usize,
    rows: usize,
    cols: usize,
    channels: usize,
    step: usize,
}

impl<'a> Image<'a> {
    /// Describes pixels laid out in `data` with an explicit row step.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if any dimension is zero or `step` is
    ///   shorter than one row of pixels
    /// - [`Error::BufferTooSmall`] if `data` does not cover the last row
    pub fn from_parts(
        data: PixelStorage<'a>,
        offset: usize,
        rows: usize,
        cols: usize,
        channels: usize,
        step: usize,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 || channels == 0 {
            return Err(Error::invalid_dimensions(rows, cols, channels, "zero-sized axis"));
        }
        let row_bytes = cols
            .checked_mul(channels)
            .ok_or_else(|| Error::invalid_dimensions(rows, cols, channels, "row size overflows"))?;
        if step < row_bytes {
            return Err(Error::invalid_dimensions(
                rows,
                cols,
                channels,
                format!("step {step} is less than row size {row_bytes}"),
            ));
        }
        let required = (rows - 1)
            .checked_mul(step)
            .and_then(|v| v.checked_add(row_bytes))
            .and_then(|v| v.checked_add(offset))
            .ok_or_else(|| Error::invalid_dimensions(rows, cols, channels, "image size overflows"))?;
        if data.len() < required {
            return Err(Error::buffer_too_small(required, data.len()));
        }
        Ok(Self {
            data,
            offset,
            rows,
            cols,
            channels,
            step,
        })
    }

    /// Wraps caller memory holding a continuous `rows` x `cols` x `channels`
    /// grid. No bytes are copied.
    pub fn borrowed(rows: usize, cols: usize, channels: usize, data: &'a [u8]) -> Result<Self> {
        Self::from_parts(PixelStorage::Borrowed(data), 0, rows, cols, channels, cols * channels)
    }

    /// Returns the number of rows (height).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns (width).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of interleaved channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the distance between row starts in bytes.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Returns the number of bytes in one row of pixels, excluding padding.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.cols * self.channels
    }

    /// Returns `(rows, cols, channels)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.rows, self.cols, self.channels)
    }

    /// Returns a rectangle covering the whole image.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.cols, self.rows)
    }

    /// Returns `true` if rows follow each other without gaps.
    #[inline]
    pub fn is_continuous(&self) -> bool {
        self.rows <= 1 || self.step == self.row_bytes()
    }

    /// Returns the backing storage.
    #[inline]
    pub fn storage(&self) -> &PixelStorage<'a> {
        &self.data
    }

    /// Returns the pixel bytes as one slice when the image is continuous.
    pub fn as_contiguous_slice(&self) -> Option<&[u8]> {
        if self.is_continuous() {
            let len = self.rows * self.row_bytes();
            Some(&self.data[self.offset..self.offset + len])
        } else {
            None
        }
    }

    /// Returns row `y` without padding.
    ///
    /// # Panics
    ///
    /// Panics if `y >= rows`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.rows, "row {y} out of bounds for {} rows", self.rows);
        let start = self.offset + y * self.step;
        &self.data[start..start + self.row_bytes()]
    }

    /// Iterates over rows top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.rows).map(move |y| self.row(y))
    }

    /// Returns the channel bytes of pixel (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        assert!(x < self.cols, "column {x} out of bounds for {} columns", self.cols);
        let start = x * self.channels;
        &self.row(y)[start..start + self.channels]
    }

    /// Returns a borrowed view of `region`. No bytes are copied; the view
    /// keeps this image's row step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if `region` is empty or not fully
    /// inside the image.
    pub fn roi(&self, region: Rect) -> Result<Image<'_>> {
        if !region.fits_within(self.cols, self.rows) {
            return Err(Error::InvalidRegion {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                cols: self.cols,
                rows: self.rows,
            });
        }
        let (x, y) = (region.x as usize, region.y as usize);
        Ok(Image {
            data: PixelStorage::Borrowed(self.data.as_slice()),
            offset: self.offset + y * self.step + x * self.channels,
            rows: region.height as usize,
            cols: region.width as usize,
            channels: self.channels,
            step: self.step,
        })
    }

    /// Copies the pixels into a fresh, continuous allocation.
    pub fn to_contiguous(&self) -> Image<'static> {
        let mut out = Vec::with_capacity(self.rows * self.row_bytes());
        for row in self.rows_iter() {
            out.extend_from_slice(row);
        }
        Image {
            data: PixelStorage::Owned(out),
            offset: 0,
            rows: self.rows,
            cols: self.cols,
            channels: self.channels,
            step: self.row_bytes(),
        }
    }

    /// Detaches from borrowed memory.
    ///
    /// Owned continuous images are returned without copying.
    pub fn into_owned(self) -> Image<'static> {
        match self.data {
            PixelStorage::Owned(data) if self.offset == 0 && self.is_continuous() => Image {
                data: PixelStorage::Owned(data),
                offset: 0,
                rows: self.rows,
                cols: self.cols,
                channels: self.channels,
                step: self.cols * self.channels,
            },
            _ => self.to_contiguous(),
        }
    }

    /// Splits the image into its storage and byte offset.
    pub(crate) fn into_storage(self) -> (PixelStorage<'a>, usize) {
        (self.data, self.offset)
    }
}

impl Image<'static> {
    /// Creates a zero-filled image.
    pub fn new(rows: usize, cols: usize, channels: usize) -> Result<Self> {
        let len = rows
            .checked_mul(cols)
            .and_then(|v| v.checked_mul(channels))
            .ok_or_else(|| Error::invalid_dimensions(rows, cols, channels, "image size overflows"))?;
        Self::from_vec(rows, cols, channels, vec![0u8; len])
    }

    /// Takes ownership of a continuous pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not exactly
    /// `rows * cols * channels`.
    pub fn from_vec(rows: usize, cols: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        let expected = rows.saturating_mul(cols).saturating_mul(channels);
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                rows,
                cols,
                channels,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Self::from_parts(PixelStorage::Owned(data), 0, rows, cols, channels, cols * channels)
    }

    /// Creates an image with every pixel set to `pixel`.
    ///
    /// The channel count is `pixel.len()`.
    pub fn filled(rows: usize, cols: usize, pixel: &[u8]) -> Result<Self> {
        let count = rows.saturating_mul(cols);
        let mut data = Vec::with_capacity(count.saturating_mul(pixel.len()));
        for _ in 0..count {
            data.extend_from_slice(pixel);
        }
        Self::from_vec(rows, cols, pixel.len(), data)
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    ///
    /// `f` writes the `channels` bytes of one pixel.
    pub fn from_fn<F>(rows: usize, cols: usize, channels: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize, &mut [u8]),
    {
        let mut img = Self::new(rows, cols, channels)?;
        for (i, px) in img.data_mut().chunks_exact_mut(channels).enumerate() {
            f(i % cols, i / cols, px);
        }
        Ok(img)
    }

    /// Returns the pixel bytes mutably, detaching from borrowed memory and
    /// dropping row padding first.
    pub fn data_mut(&mut self) -> &mut [u8] {
        if self.offset != 0 || !self.is_continuous() {
            *self = self.to_contiguous();
        }
        let len = self.rows * self.row_bytes();
        &mut self.data.to_mut()[..len]
    }
}

impl std::fmt::Debug for Image<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("channels", &self.channels)
            .field("step", &self.step)
            .field("continuous", &self.is_continuous())
            .field("owned", &self.data.is_owned())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(rows: usize, cols: usize) -> Image<'static> {
        Image::from_fn(rows, cols, 3, |x, y, px| {
            px[0] = x as u8;
            px[1] = y as u8;
            px[2] = (x + y) as u8;
        })
        .unwrap()
    }

    #[test]
    fn test_image_new() {
        let img = Image::new(10, 20, 3).unwrap();
        assert_eq!(img.dims(), (10, 20, 3));
        assert_eq!(img.step(), 60);
        assert!(img.is_continuous());
        assert!(img.storage().is_owned());
    }

    #[test]
    fn test_image_zero_size_rejected() {
        assert!(Image::new(0, 10, 1).is_err());
        assert!(Image::new(10, 0, 1).is_err());
        assert!(Image::new(10, 10, 0).is_err());
    }

    #[test]
    fn test_from_vec_wrong_size() {
        assert!(Image::from_vec(4, 4, 3, vec![0; 47]).is_err());
    }

    #[test]
    fn test_borrowed_does_not_copy() {
        let bytes = vec![5u8; 4 * 4];
        let img = Image::borrowed(4, 4, 1, &bytes).unwrap();
        assert!(img.storage().is_borrowed());
        assert_eq!(img.as_contiguous_slice().unwrap().as_ptr(), bytes.as_ptr());
    }

    #[test]
    fn test_from_parts_checks_storage() {
        let bytes = vec![0u8; 20];
        // 2 * 8 + 3 = 19 bytes fit, an offset of 2 does not
        assert!(Image::from_parts(PixelStorage::Borrowed(&bytes), 0, 3, 3, 1, 8).is_ok());
        assert!(Image::from_parts(PixelStorage::Borrowed(&bytes), 2, 3, 3, 1, 8).is_err());
        assert!(Image::from_parts(PixelStorage::Borrowed(&bytes), 0, 3, 3, 1, 2).is_err());
    }

    #[test]
    fn test_pixel_access() {
        let img = gradient(8, 8);
        assert_eq!(img.pixel(3, 5), &[3, 5, 8]);
        assert_eq!(img.row(2).len(), 24);
    }

    #[test]
    fn test_roi_view() {
        let img = gradient(100, 100);
        let view = img.roi(Rect::new(10, 20, 50, 30)).unwrap();
        assert_eq!(view.dims(), (30, 50, 3));
        assert!(!view.is_continuous());
        assert!(view.as_contiguous_slice().is_none());
        assert_eq!(view.pixel(0, 0), &[10, 20, 30]);
        assert_eq!(view.pixel(49, 29), &[59, 49, 108]);
    }

    #[test]
    fn test_roi_single_row_is_continuous() {
        let img = gradient(10, 10);
        let view = img.roi(Rect::new(2, 3, 5, 1)).unwrap();
        assert!(view.is_continuous());
        assert_eq!(view.as_contiguous_slice().unwrap(), view.row(0));
    }

    #[test]
    fn test_roi_out_of_bounds() {
        let img = gradient(10, 10);
        assert!(img.roi(Rect::new(5, 5, 10, 10)).is_err());
        assert!(img.roi(Rect::new(0, 0, 0, 5)).is_err());
    }

    #[test]
    fn test_to_contiguous_matches_view() {
        let img = gradient(20, 20);
        let view = img.roi(Rect::new(4, 4, 8, 8)).unwrap();
        let copy = view.to_contiguous();
        assert!(copy.is_continuous());
        assert!(copy.storage().is_owned());
        for y in 0..8 {
            assert_eq!(copy.row(y), view.row(y));
        }
    }

    #[test]
    fn test_into_owned_keeps_owned_buffer() {
        let img = gradient(4, 4);
        let ptr = img.storage().as_ptr();
        let owned = img.into_owned();
        assert_eq!(owned.storage().as_ptr(), ptr);
    }

    #[test]
    fn test_data_mut_detaches() {
        let mut img = Image::filled(2, 2, &[1]).unwrap();
        img.data_mut()[0] = 9;
        assert_eq!(img.pixel(0, 0), &[9]);
        assert_eq!(img.pixel(1, 1), &[1]);
    }
}

//! External array descriptor.
//!
//! [`ExternalArray`] is the caller-facing side of the marshaling layer: a
//! byte buffer plus an explicit shape and per-axis byte strides, the same
//! description a numpy array or a buffer-protocol object carries. The element
//! type is always `u8`, so element strides and byte strides coincide.
//!
//! Images use `[rows, cols]` for single-channel and `[rows, cols, channels]`
//! for multi-channel data, but the descriptor itself accepts any rank so that
//! a wrong rank can be reported by [`to_native`](crate::to_native) rather
//! than being unrepresentable.
//!
//! # Usage
//!
//! ```rust
//! use visioncraft_core::ExternalArray;
//!
//! let arr = ExternalArray::from_vec(vec![2, 3], vec![0, 1, 2, 3, 4, 5]).unwrap();
//! assert_eq!(arr.strides(), &[3, 1]);
//! assert_eq!(arr.get(&[1, 2]), Some(5));
//! ```

use crate::{Error, PixelStorage, Result};

/// A shaped, strided view over `u8` pixel memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalArray<'a> {
    shape: Vec<usize>,
    strides: Vec<usize>,
    data: PixelStorage<'a>,
}

/// Returns C-order (row-major) byte strides for `shape`.
pub fn c_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut acc = 1usize;
    for (stride, &dim) in strides.iter_mut().zip(shape).rev() {
        *stride = acc;
        acc = acc.saturating_mul(dim);
    }
    strides
}

impl<'a> ExternalArray<'a> {
    /// Describes a C-contiguous array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] if `data` is shorter than the
    /// product of `shape`.
    pub fn new(shape: Vec<usize>, data: PixelStorage<'a>) -> Result<Self> {
        let strides = c_strides(&shape);
        Self::with_strides(shape, strides, data)
    }

    /// Describes an array with explicit byte strides.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidShape`] if `strides` and `shape` differ in length
    /// - [`Error::BufferTooSmall`] if the last addressable element lies past
    ///   the end of `data`
    pub fn with_strides(shape: Vec<usize>, strides: Vec<usize>, data: PixelStorage<'a>) -> Result<Self> {
        if shape.len() != strides.len() {
            return Err(Error::invalid_shape(
                &shape,
                format!("{} strides given for {} axes", strides.len(), shape.len()),
            ));
        }
        let required = extent(&shape, &strides)
            .ok_or_else(|| Error::invalid_shape(&shape, "array extent overflows"))?;
        if data.len() < required {
            return Err(Error::buffer_too_small(required, data.len()));
        }
        Ok(Self { shape, strides, data })
    }

    /// Borrows caller memory as a C-contiguous array.
    pub fn from_slice(shape: Vec<usize>, data: &'a [u8]) -> Result<Self> {
        Self::new(shape, PixelStorage::Borrowed(data))
    }

    /// Returns the number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Returns the extent of every axis.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the byte stride of every axis.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Returns the element size in bytes. Always 1.
    #[inline]
    pub const fn itemsize(&self) -> usize {
        std::mem::size_of::<u8>()
    }

    /// Returns the number of logical elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// Returns `true` if any axis has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the backing storage.
    #[inline]
    pub fn storage(&self) -> &PixelStorage<'a> {
        &self.data
    }

    /// Returns the raw backing bytes, including any bytes skipped by strides.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Returns `true` if strides are exactly the C-order strides of the shape.
    pub fn is_c_contiguous(&self) -> bool {
        self.shape
            .iter()
            .zip(&self.strides)
            .zip(c_strides(&self.shape))
            .all(|((&dim, &stride), expected)| dim <= 1 || stride == expected)
    }

    /// Returns the element at `index`, or `None` if the index is out of bounds
    /// or of the wrong rank.
    pub fn get(&self, index: &[usize]) -> Option<u8> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0usize;
        for ((&i, &dim), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            if i >= dim {
                return None;
            }
            offset += i * stride;
        }
        self.data.get(offset).copied()
    }

    /// Collects the elements in logical C order.
    pub fn to_vec(&self) -> Vec<u8> {
        if self.is_c_contiguous() {
            return self.data[..self.len()].to_vec();
        }
        let mut out = Vec::with_capacity(self.len());
        if self.is_empty() {
            return out;
        }
        let mut index = vec![0usize; self.ndim()];
        loop {
            let offset: usize = index.iter().zip(&self.strides).map(|(i, s)| i * s).sum();
            out.push(self.data[offset]);
            // Odometer increment, last axis fastest
            let mut axis = self.ndim();
            loop {
                if axis == 0 {
                    return out;
                }
                axis -= 1;
                index[axis] += 1;
                if index[axis] < self.shape[axis] {
                    break;
                }
                index[axis] = 0;
            }
        }
    }

    /// Detaches from the caller's memory, copying if borrowed.
    pub fn into_owned(self) -> ExternalArray<'static> {
        ExternalArray {
            shape: self.shape,
            strides: self.strides,
            data: self.data.into_owned(),
        }
    }

    /// Splits the array into shape, strides and storage.
    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>, PixelStorage<'a>) {
        (self.shape, self.strides, self.data)
    }
}

impl ExternalArray<'static> {
    /// Takes ownership of a C-contiguous buffer.
    pub fn from_vec(shape: Vec<usize>, data: Vec<u8>) -> Result<Self> {
        Self::new(shape, PixelStorage::Owned(data))
    }
}

/// Number of bytes spanned from the first to one past the last element.
fn extent(shape: &[usize], strides: &[usize]) -> Option<usize> {
    if shape.iter().any(|&d| d == 0) {
        return Some(0);
    }
    let mut last = 0usize;
    for (&dim, &stride) in shape.iter().zip(strides) {
        last = last.checked_add((dim - 1).checked_mul(stride)?)?;
    }
    last.checked_add(1)
}

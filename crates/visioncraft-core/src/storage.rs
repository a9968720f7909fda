//! Ownership-tagged pixel storage.
//!
//! Both buffer descriptors ([`ExternalArray`](crate::ExternalArray) and
//! [`Image`](crate::Image)) sit on top of [`PixelStorage`], which records
//! whether the bytes belong to the caller or were allocated by this crate.
//! The tag is what makes the copy decision of
//! [`from_native`](crate::from_native) observable.

use std::ops::Deref;

/// Pixel bytes, either borrowed from the caller or owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelStorage<'a> {
    /// Memory owned by the caller. Lives as long as the caller's buffer.
    Borrowed(&'a [u8]),
    /// Freshly allocated memory owned by the holder.
    Owned(Vec<u8>),
}

impl<'a> PixelStorage<'a> {
    /// Returns the bytes as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Self::Borrowed(s) => s,
            Self::Owned(v) => v.as_slice(),
        }
    }

    /// Returns the number of bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if there are no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` for [`PixelStorage::Owned`].
    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Returns `true` for [`PixelStorage::Borrowed`].
    #[inline]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }

    /// Detaches from the caller's memory, copying if borrowed.
    pub fn into_owned(self) -> PixelStorage<'static> {
        PixelStorage::Owned(self.into_vec())
    }

    /// Returns the bytes as an owned, mutable vector, copying first if
    /// borrowed.
    pub fn to_mut(&mut self) -> &mut Vec<u8> {
        if let Self::Borrowed(s) = *self {
            *self = Self::Owned(s.to_vec());
        }
        match self {
            Self::Owned(v) => v,
            Self::Borrowed(_) => unreachable!("storage was just made owned"),
        }
    }

    /// Consumes the storage and returns an owned vector, copying if borrowed.
    pub fn into_vec(self) -> Vec<u8> {
        match self {
            Self::Borrowed(s) => s.to_vec(),
            Self::Owned(v) => v,
        }
    }
}

impl Deref for PixelStorage<'_> {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl<'a> From<&'a [u8]> for PixelStorage<'a> {
    fn from(s: &'a [u8]) -> Self {
        Self::Borrowed(s)
    }
}

impl From<Vec<u8>> for PixelStorage<'static> {
    fn from(v: Vec<u8>) -> Self {
        Self::Owned(v)
    }
}

//! Error types for buffer construction and marshaling.
//!
//! # Overview
//!
//! The [`Error`] enum covers every failure mode of the marshaling layer:
//! - Rejected external array shapes (rank, trailing axis, zero-length axes)
//! - Channel counts that cannot be exposed as an external array
//! - Storage that is too small for the described geometry
//! - Regions of interest that fall outside an image
//!
//! # Usage
//!
//! ```rust
//! use visioncraft_core::{Error, Result};
//!
//! fn check_rank(shape: &[usize]) -> Result<()> {
//!     if shape.len() != 2 && shape.len() != 3 {
//!         return Err(Error::invalid_shape(shape, "expected 2 or 3 dimensions"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_rank(&[4, 4, 3, 1]).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while describing or converting pixel buffers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The external array has a rank other than 2 or 3, a 3-D trailing axis
    /// that is not 3, or a zero-length axis.
    #[error("invalid array shape {shape:?}: {reason}")]
    InvalidShape {
        /// Offending shape
        shape: Vec<usize>,
        /// Why it was rejected
        reason: String,
    },

    /// An internal image has a channel count that has no external layout.
    #[error("unsupported channel count {channels}: expected 1 or 3")]
    UnsupportedChannelCount {
        /// Channel count found on the image
        channels: usize,
    },

    /// The backing storage does not cover the described geometry.
    #[error("buffer of {len} bytes is too small, {required} bytes required")]
    BufferTooSmall {
        /// Bytes required by shape, strides and offset
        required: usize,
        /// Bytes available
        len: usize,
    },

    /// A region of interest extends beyond image bounds.
    #[error("region ({x}, {y}, {width}x{height}) exceeds image bounds {cols}x{rows}")]
    InvalidRegion {
        /// Region X origin
        x: i32,
        /// Region Y origin
        y: i32,
        /// Region width
        width: i32,
        /// Region height
        height: i32,
        /// Image columns
        cols: usize,
        /// Image rows
        rows: usize,
    },

    /// Image geometry is unusable (zero area, zero channels, short row step).
    #[error("invalid dimensions {rows}x{cols}x{channels}: {reason}")]
    InvalidDimensions {
        /// Requested rows
        rows: usize,
        /// Requested columns
        cols: usize,
        /// Requested channels
        channels: usize,
        /// Reason why the geometry is invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidShape`] error.
    #[inline]
    pub fn invalid_shape(shape: &[usize], reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            shape: shape.to_vec(),
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::UnsupportedChannelCount`] error.
    #[inline]
    pub fn unsupported_channels(channels: usize) -> Self {
        Self::UnsupportedChannelCount { channels }
    }

    /// Creates an [`Error::BufferTooSmall`] error.
    #[inline]
    pub fn buffer_too_small(required: usize, len: usize) -> Self {
        Self::BufferTooSmall { required, len }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(
        rows: usize,
        cols: usize,
        channels: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDimensions {
            rows,
            cols,
            channels,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error was caused by the caller's array shape.
    #[inline]
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::InvalidShape { .. })
    }

    /// Returns `true` if this error was caused by an unexposable channel count.
    #[inline]
    pub fn is_channel_error(&self) -> bool {
        matches!(self, Self::UnsupportedChannelCount { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shape_message() {
        let err = Error::invalid_shape(&[4, 4, 3, 1], "expected 2 or 3 dimensions");
        let msg = err.to_string();
        assert!(msg.contains("[4, 4, 3, 1]"));
        assert!(msg.contains("expected 2 or 3"));
        assert!(err.is_shape_error());
        assert!(!err.is_channel_error());
    }

    #[test]
    fn test_unsupported_channels() {
        let err = Error::unsupported_channels(4);
        assert!(err.to_string().contains('4'));
        assert!(err.is_channel_error());
    }

    #[test]
    fn test_buffer_too_small() {
        let err = Error::buffer_too_small(300, 12);
        let msg = err.to_string();
        assert!(msg.contains("300"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn test_invalid_region() {
        let err = Error::InvalidRegion {
            x: 90,
            y: 90,
            width: 50,
            height: 50,
            cols: 100,
            rows: 100,
        };
        assert!(err.to_string().contains("100x100"));
    }
}

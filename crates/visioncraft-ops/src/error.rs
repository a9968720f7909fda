//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
///
/// Every variant is a caller or programming error; none is transient, and
/// operations never retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// Buffer construction or marshaling failed.
    #[error(transparent)]
    Core(#[from] visioncraft_core::Error),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation does not accept the image's channel count.
    #[error("{op} does not support {channels}-channel images")]
    UnsupportedChannels {
        /// Operation name
        op: &'static str,
        /// Channel count of the input
        channels: usize,
    },
}

impl OpsError {
    /// Creates an [`OpsError::UnsupportedChannels`] error.
    #[inline]
    pub fn unsupported_channels(op: &'static str, channels: usize) -> Self {
        Self::UnsupportedChannels { op, channels }
    }
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use visioncraft_core::Error;

    #[test]
    fn test_core_error_is_transparent() {
        let core = Error::unsupported_channels(4);
        let err = OpsError::from(core.clone());
        assert_eq!(err.to_string(), core.to_string());
        assert_eq!(err, OpsError::Core(core));
    }

    #[test]
    fn test_unsupported_channels_message() {
        let err = OpsError::unsupported_channels("grayscale", 1);
        assert_eq!(err.to_string(), "grayscale does not support 1-channel images");
    }
}

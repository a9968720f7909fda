//! # visioncraft-core
//!
//! Pixel buffer descriptors and the marshaling layer between caller arrays
//! and the internal image grid.
//!
//! - [`PixelStorage`] - Bytes tagged as borrowed from the caller or owned
//! - [`ExternalArray`] - Caller-side buffer with shape and byte strides
//! - [`Image`] - Internal row-major grid with rows, cols, channels and step
//! - [`Rect`] - Signed region of interest
//! - [`to_native`], [`from_native`] - The conversion pair
//!
//! ## Crate Structure
//!
//! ```text
//! visioncraft-core (this crate)
//!    ^
//!    |
//!    +-- visioncraft-ops (transforms over Image)
//!    +-- visioncraft-py (numpy bindings)
//! ```
//!
//! ## Ownership
//!
//! Conversions never take ownership of caller memory. [`to_native`] borrows
//! the array it is given; [`from_native`] returns either a borrowed view of
//! an image's continuous memory or a freshly owned copy, and the
//! [`PixelStorage`] tag of the result says which.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod array;
pub mod error;
pub mod image;
pub mod marshal;
pub mod rect;
pub mod storage;

pub use array::{c_strides, ExternalArray};
pub use error::{Error, Result};
pub use image::Image;
pub use marshal::{byte_strides, from_native, to_native, COLOR_CHANNELS};
pub use rect::Rect;
pub use storage::PixelStorage;

/// Prelude module for convenient imports.
///
/// ```
/// use visioncraft_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::array::ExternalArray;
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
    pub use crate::marshal::{from_native, to_native};
    pub use crate::rect::Rect;
    pub use crate::storage::PixelStorage;
}

//! # visioncraft-ops
//!
//! Elementary 8-bit image transforms.
//!
//! Operations work on [`visioncraft_core::Image`] views and always return a
//! new owned image; inputs are never modified. Three-channel images are in
//! B, G, R order.
//!
//! # Modules
//!
//! - [`color`] - Grayscale conversion
//! - [`filter`] - Convolution, Gaussian blur and sharpening
//! - [`edge`] - Sobel gradients and Canny edges
//! - [`transform`] - Crop and rotation
//! - [`warp`] - Affine warping with bilinear sampling
//! - [`border`] - Border extrapolation modes
//! - [`params`] - Operation parameters
//! - [`api`] - The array-level call surface
//!
//! # Example
//!
//! ```rust
//! use visioncraft_core::Image;
//! use visioncraft_ops::{edge, filter, params::{BlurParams, CannyParams}};
//!
//! let src = Image::filled(32, 32, &[40, 80, 120]).unwrap();
//! let blurred = filter::gaussian_blur(&src, &BlurParams::default()).unwrap();
//! let edges = edge::canny(&blurred, &CannyParams::default()).unwrap();
//! assert_eq!(edges.channels(), 1);
//! ```
//!
//! # Array Call Surface
//!
//! ```rust
//! use visioncraft_core::ExternalArray;
//! use visioncraft_ops::api;
//!
//! let arr = ExternalArray::from_vec(vec![8, 8, 3], vec![0; 192]).unwrap();
//! let rotated = api::rotate_image(&arr, 45.0).unwrap();
//! assert_eq!(rotated.shape(), &[8, 8, 3]);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - row-parallel processing with rayon
//! - `serde` - serialization of parameter structs

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod parallel;

pub mod api;
pub mod border;
pub mod color;
pub mod edge;
pub mod filter;
pub mod params;
pub mod transform;
pub mod warp;

pub use border::BorderMode;
pub use error::{OpsError, OpsResult};
pub use params::{BlurParams, CannyParams, RotateParams};

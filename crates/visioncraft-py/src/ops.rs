//! Image operations for Python.
//!
//! Each function accepts a `uint8` numpy array of shape `(rows, cols)` or
//! `(rows, cols, 3)` in B, G, R order and returns a new array. The input is
//! never modified. The GIL is released while the transform runs.

use numpy::{PyArrayDyn, PyReadonlyArrayDyn};
use pyo3::prelude::*;
use visioncraft_core::ExternalArray;
use visioncraft_ops::{api, BlurParams, CannyParams, OpsResult, RotateParams};

use crate::array::{to_external, to_numpy};
use crate::errors::to_py_err;

type PyImage<'py> = Bound<'py, PyArrayDyn<u8>>;

// ============================================================================
// Helper Functions
// ============================================================================

/// Runs `op` on a borrowed view of `image` with the GIL released.
fn run<'py, F>(py: Python<'py>, image: &PyReadonlyArrayDyn<'py, u8>, op: F) -> PyResult<PyImage<'py>>
where
    F: Send + FnOnce(&ExternalArray<'_>) -> OpsResult<ExternalArray<'static>>,
{
    let input = to_external(image)?;
    let output = py.allow_threads(|| op(&input)).map_err(to_py_err)?;
    to_numpy(py, output)
}

// ============================================================================
// Operations
// ============================================================================

/// Convert a B, G, R image to grayscale.
///
/// Returns shape (rows, cols). A grayscale input raises `LibraryFailure`.
///
/// # Example
/// ```python
/// gray = visioncraft.to_grayscale(img)
/// ```
#[pyfunction]
#[pyo3(signature = (image))]
fn to_grayscale<'py>(py: Python<'py>, image: PyReadonlyArrayDyn<'py, u8>) -> PyResult<PyImage<'py>> {
    run(py, &image, api::to_grayscale)
}

/// Gaussian blur. Defaults to a 15x15 kernel with sigma derived from size.
///
/// # Arguments
/// * `ksize` - Odd kernel size (default: 15)
/// * `sigma` - Standard deviation, 0 derives it from `ksize` (default: 0)
#[pyfunction]
#[pyo3(signature = (image, ksize=15, sigma=0.0))]
fn apply_blur<'py>(
    py: Python<'py>,
    image: PyReadonlyArrayDyn<'py, u8>,
    ksize: usize,
    sigma: f64,
) -> PyResult<PyImage<'py>> {
    let params = BlurParams {
        ksize,
        sigma,
        ..BlurParams::default()
    };
    run(py, &image, move |arr| api::apply_blur_with(arr, &params))
}

/// Canny edge map of shape (rows, cols) with values 0 and 255.
///
/// # Arguments
/// * `low` - Lower hysteresis threshold (default: 100)
/// * `high` - Upper hysteresis threshold (default: 200)
#[pyfunction]
#[pyo3(signature = (image, low=100.0, high=200.0))]
fn detect_edges<'py>(
    py: Python<'py>,
    image: PyReadonlyArrayDyn<'py, u8>,
    low: f64,
    high: f64,
) -> PyResult<PyImage<'py>> {
    let params = CannyParams { low, high };
    run(py, &image, move |arr| api::detect_edges_with(arr, &params))
}

/// Sharpen with the 3x3 cross kernel.
#[pyfunction]
#[pyo3(signature = (image))]
fn sharpen_image<'py>(py: Python<'py>, image: PyReadonlyArrayDyn<'py, u8>) -> PyResult<PyImage<'py>> {
    run(py, &image, api::sharpen_image)
}

/// Crop a `width` x `height` region at (`x`, `y`).
///
/// The region is clipped to the image. If nothing remains, a copy of the
/// whole input is returned.
///
/// # Example
/// ```python
/// roi = visioncraft.crop_image(img, 10, 10, 50, 50)
/// ```
#[pyfunction]
#[pyo3(signature = (image, x, y, width, height))]
fn crop_image<'py>(
    py: Python<'py>,
    image: PyReadonlyArrayDyn<'py, u8>,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> PyResult<PyImage<'py>> {
    run(py, &image, move |arr| api::crop_image(arr, x, y, width, height))
}

/// Rotate counter-clockwise by `angle` degrees about the image center.
///
/// The output keeps the input shape; exposed corners are black.
///
/// # Arguments
/// * `angle` - Degrees, positive is counter-clockwise
/// * `scale` - Isotropic scale (default: 1.0)
#[pyfunction]
#[pyo3(signature = (image, angle, scale=1.0))]
fn rotate_image<'py>(
    py: Python<'py>,
    image: PyReadonlyArrayDyn<'py, u8>,
    angle: f64,
    scale: f64,
) -> PyResult<PyImage<'py>> {
    let params = RotateParams {
        angle,
        scale,
        ..RotateParams::default()
    };
    run(py, &image, move |arr| api::rotate_image_with(arr, &params))
}

// ============================================================================
// Module Registration
// ============================================================================

/// Register all operation functions to the module.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(to_grayscale, m)?)?;
    m.add_function(wrap_pyfunction!(apply_blur, m)?)?;
    m.add_function(wrap_pyfunction!(detect_edges, m)?)?;
    m.add_function(wrap_pyfunction!(sharpen_image, m)?)?;
    m.add_function(wrap_pyfunction!(crop_image, m)?)?;
    m.add_function(wrap_pyfunction!(rotate_image, m)?)?;
    Ok(())
}

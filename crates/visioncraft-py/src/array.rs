//! numpy array interop.
//!
//! Inputs are borrowed when numpy hands us a C-contiguous `uint8` buffer;
//! any other layout is copied into logical order first. Results are always
//! fresh numpy arrays that own their data.

use numpy::ndarray::{ArrayD, IxDyn};
use numpy::{IntoPyArray, PyArrayDyn, PyReadonlyArrayDyn, PyUntypedArrayMethods};
use pyo3::prelude::*;
use tracing::debug;
use visioncraft_core::ExternalArray;

use crate::errors::{to_py_err, LibraryFailure};

/// Describes a numpy array as an [`ExternalArray`].
pub(crate) fn to_external<'a>(array: &'a PyReadonlyArrayDyn<'_, u8>) -> PyResult<ExternalArray<'a>> {
    let shape = array.shape().to_vec();
    // as_slice also accepts Fortran order, which is not row-major
    let borrowed = if array.is_c_contiguous() {
        array.as_slice().ok()
    } else {
        None
    };
    let result = match borrowed {
        Some(data) => ExternalArray::from_slice(shape, data),
        None => {
            debug!(?shape, "numpy array is not C-contiguous, copying");
            let data: Vec<u8> = array.as_array().iter().copied().collect();
            ExternalArray::from_vec(shape, data)
        }
    };
    result.map_err(|e| to_py_err(e.into()))
}

/// Moves an owned result into a new numpy array.
pub(crate) fn to_numpy<'py>(py: Python<'py>, array: ExternalArray<'static>) -> PyResult<Bound<'py, PyArrayDyn<u8>>> {
    let shape = array.shape().to_vec();
    let data = if array.is_c_contiguous() {
        let len = array.len();
        let (_, _, storage) = array.into_parts();
        let mut data = storage.into_vec();
        data.truncate(len);
        data
    } else {
        array.to_vec()
    };
    let out = ArrayD::from_shape_vec(IxDyn(&shape), data)
        .map_err(|e| LibraryFailure::new_err(format!("cannot build result array: {e}")))?;
    Ok(out.into_pyarray(py))
}

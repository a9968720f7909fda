//! Python exception types and error mapping.

use pyo3::create_exception;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use visioncraft_ops::OpsError;

create_exception!(
    visioncraft,
    InvalidShapeError,
    PyValueError,
    "Array is not (rows, cols) or (rows, cols, 3), or has an empty axis."
);
create_exception!(
    visioncraft,
    UnsupportedChannelCountError,
    PyValueError,
    "Image has a channel count the operation cannot produce or accept."
);
create_exception!(
    visioncraft,
    LibraryFailure,
    PyRuntimeError,
    "The image library rejected the input or failed while processing it."
);

/// Maps an operation error onto the module's exception types.
pub(crate) fn to_py_err(err: OpsError) -> PyErr {
    let msg = err.to_string();
    match err {
        OpsError::Core(ref e) if e.is_shape_error() => InvalidShapeError::new_err(msg),
        OpsError::Core(ref e) if e.is_channel_error() => UnsupportedChannelCountError::new_err(msg),
        _ => LibraryFailure::new_err(msg),
    }
}

/// Adds the exception classes to the module.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add("InvalidShapeError", py.get_type::<InvalidShapeError>())?;
    m.add("UnsupportedChannelCountError", py.get_type::<UnsupportedChannelCountError>())?;
    m.add("LibraryFailure", py.get_type::<LibraryFailure>())?;
    Ok(())
}

//! Python bindings for visioncraft.
//!
//! Exposes the elementary image transforms on numpy `uint8` arrays via PyO3.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use tracing_subscriber::EnvFilter;

mod array;
mod errors;
mod ops;

pub use errors::{InvalidShapeError, LibraryFailure, UnsupportedChannelCountError};

/// Send library log events to stderr.
///
/// `filter` uses `RUST_LOG` syntax, e.g. `"visioncraft_ops=debug"`. Without
/// it, `RUST_LOG` is read, falling back to `"warn"`. Only the first call
/// installs a subscriber; later calls return False.
///
/// # Example
/// ```python
/// visioncraft.enable_logging("debug")
/// ```
#[pyfunction]
#[pyo3(signature = (filter=None))]
fn enable_logging(filter: Option<&str>) -> PyResult<bool> {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| PyValueError::new_err(format!("invalid log filter {directives:?}: {e}")))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();
    Ok(installed)
}

/// visioncraft - elementary image transforms for numpy arrays
#[pymodule]
fn visioncraft(m: &Bound<'_, PyModule>) -> PyResult<()> {
    errors::register(m)?;
    ops::register(m)?;
    m.add_function(wrap_pyfunction!(enable_logging, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

//! Conversion helpers for the FFI boundary
//!
//! Python hands us arbitrary objects; seeds are validated here, before any
//! derivation happens.

use pyo3::exceptions::{PyRuntimeError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBool;

use crate::error::SeederError;
use crate::rng::seed_from_f64;

/// Extract an explicit seed from a Python int or integral float
///
/// # Errors
/// - `TypeError` for non-numbers (including `bool`)
/// - `ValueError` for fractional, non-finite or out-of-range values
pub(crate) fn extract_seed(value: &Bound<'_, PyAny>) -> PyResult<i64> {
    if value.is_instance_of::<PyBool>() {
        return Err(PyTypeError::new_err("Number expected"));
    }
    if let Ok(seed) = value.extract::<i64>() {
        return Ok(seed);
    }
    // Large ints land here too and are reported as out of range
    let float: f64 = value
        .extract()
        .map_err(|_| PyTypeError::new_err("Number expected"))?;
    seed_from_f64(float).map_err(|e| to_py_err(e.into()))
}

/// Map crate errors onto Python exceptions
pub(crate) fn to_py_err(err: SeederError) -> PyErr {
    match err {
        SeederError::InvalidSeed(_) | SeederError::InvalidConfig(_) | SeederError::Sample(_) => {
            PyValueError::new_err(err.to_string())
        }
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

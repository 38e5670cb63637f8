//! Python bindings
//!
//! - `PRNG`: per-instance generator
//! - `reseed()`: global reseed, then redirect `random.random` to the new
//!   generator
//! - `internal`: process and clock collaborators used by the test suite

mod prng;
mod types;

use pyo3::prelude::*;

use crate::core::time;
use crate::global;
use types::to_py_err;

pub use prng::PyPrng;

/// Ambient random function installed as `random.random`
#[pyfunction]
fn ambient_random() -> PyResult<f64> {
    global::try_random().map_err(to_py_err)
}

/// Reseed the process-wide generator and redirect `random.random` to it
///
/// Call this first thing in a forked child. Returns the slot generation.
#[pyfunction]
fn reseed(py: Python<'_>) -> PyResult<u64> {
    let generation = global::global_reseed().map_err(to_py_err)?;
    let random_module = PyModule::import_bound(py, "random")?;
    random_module.setattr("random", wrap_pyfunction_bound!(ambient_random, py)?)?;
    Ok(generation)
}

/// fork(2); returns the child pid in the parent and 0 in the child
#[cfg(unix)]
#[pyfunction]
fn fork() -> PyResult<i32> {
    use crate::os::ForkResult;

    match crate::os::fork().map_err(|e| to_py_err(e.into()))? {
        ForkResult::Parent { child } => Ok(child),
        ForkResult::Child => Ok(0),
    }
}

/// getpid(2)
#[cfg(unix)]
#[pyfunction]
fn getpid() -> i32 {
    crate::os::getpid()
}

/// waitpid(2); returns the raw wait status
#[cfg(unix)]
#[pyfunction]
fn waitpid(pid: i32) -> PyResult<i32> {
    crate::os::waitpid(pid).map_err(|e| to_py_err(e.into()))
}

/// Strictly increasing tick counter
#[pyfunction]
fn ticks() -> i64 {
    time::ticks()
}

pub(crate) fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPrng>()?;
    m.add_function(wrap_pyfunction!(reseed, m)?)?;
    m.add_function(wrap_pyfunction!(ambient_random, m)?)?;

    let internal = PyModule::new_bound(m.py(), "internal")?;
    internal.add_function(wrap_pyfunction!(ticks, &internal)?)?;
    #[cfg(unix)]
    {
        internal.add_function(wrap_pyfunction!(fork, &internal)?)?;
        internal.add_function(wrap_pyfunction!(getpid, &internal)?)?;
        internal.add_function(wrap_pyfunction!(waitpid, &internal)?)?;
    }
    m.add_submodule(&internal)?;
    Ok(())
}

//! PyO3 wrapper for Prng
//!
//! # Example (from Python)
//!
//! ```python
//! from reseed_core_rs import PRNG
//!
//! rng = PRNG(0)
//! assert rng.random() == 0.39339363837962904
//! rng.set_seed(1)
//! rng.reseed()          # fresh OS entropy
//! unseeded = PRNG()     # entropy-seeded
//! ```

use pyo3::prelude::*;

use super::types::{extract_seed, to_py_err};
use crate::rng::Prng;

/// Python wrapper for the xorshift128+ engine
#[pyclass(name = "PRNG")]
pub struct PyPrng {
    inner: Prng,
}

#[pymethods]
impl PyPrng {
    /// Create a generator; seeded if `seed` is given, entropy-seeded otherwise
    ///
    /// Raises TypeError/ValueError for invalid seeds and RuntimeError if the
    /// OS entropy source is unavailable.
    #[new]
    #[pyo3(signature = (seed=None))]
    fn new(seed: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        let seed = seed.map(extract_seed).transpose()?;
        let inner = Prng::construct(seed).map_err(|e| to_py_err(e.into()))?;
        Ok(PyPrng { inner })
    }

    /// Next double in [0.0, 1.0)
    fn random(&mut self) -> f64 {
        self.inner.next_f64()
    }

    /// Restart the deterministic sequence for `seed`
    fn set_seed(&mut self, seed: &Bound<'_, PyAny>) -> PyResult<()> {
        let seed = extract_seed(seed)?;
        self.inner.set_seed(seed);
        Ok(())
    }

    /// Replace the state with fresh OS entropy
    fn reseed(&mut self) -> PyResult<()> {
        self.inner.reseed().map_err(|e| to_py_err(e.into()))
    }

    /// Uniform int in [0, max)
    fn randint_below(&mut self, max: i32) -> PyResult<i32> {
        if max <= 0 {
            return Err(pyo3::exceptions::PyValueError::new_err("max must be positive"));
        }
        Ok(self.inner.next_i32_below(max))
    }

    /// `n` unique ints in [0, max), ascending
    fn sample(&mut self, max: u64, n: usize) -> PyResult<Vec<u64>> {
        self.inner
            .next_sample(max, n)
            .map_err(|e| to_py_err(e.into()))
    }

    /// Explicit seed of the current state, or None if entropy-seeded
    #[getter]
    fn initial_seed(&self) -> Option<i64> {
        self.inner.initial_seed()
    }

    fn __repr__(&self) -> String {
        match self.inner.initial_seed() {
            Some(seed) => format!("PRNG(seed={})", seed),
            None => "PRNG(<entropy>)".to_string(),
        }
    }
}

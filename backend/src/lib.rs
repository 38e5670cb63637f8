//! Reseed Core - Rust Engine
//!
//! Reproducible, fork-safe process-wide pseudorandom numbers.
//!
//! # Architecture
//!
//! - **os**: Entropy source and process primitives (fork, getpid, waitpid)
//! - **rng**: xorshift128+ engine, seed derivation, sampling
//! - **global**: Process-wide generator slot and fork-safety coordinator
//! - **events**: Reseed history of the global slot
//! - **config**: Global slot configuration
//! - **core**: Clocks
//!
//! # Critical Invariants
//!
//! 1. Same explicit seed → same output, bit for bit, on every platform
//! 2. Generator state is never all-zero
//! 3. Entropy comes only from the OS; failures are returned, never papered over
//! 4. After fork, callers reseed before drawing (`reseed_after_fork`)
//!
//! # Example
//!
//! ```
//! use reseed_core_rs::Prng;
//!
//! let mut seeded = Prng::with_seed(1);
//! assert_eq!(seeded.next_f64(), 0.7662037068107435);
//!
//! let mut unseeded = Prng::new().unwrap();
//! assert!((0.0..1.0).contains(&unseeded.next_f64()));
//! ```

// Module declarations
pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod global;
pub mod os;
pub mod rng;

// Re-exports for convenience
pub use config::{ForkPolicy, SeederConfig};
pub use error::SeederError;
#[cfg(unix)]
pub use global::fork_and_reseed;
pub use global::{
    configure, global_reseed, random, reseed_after_fork, reseed_history, try_random, Ambient,
};
pub use rng::{Prng, RandomSource, Seed};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn reseed_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    ffi::register(m)
}

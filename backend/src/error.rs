//! Crate-level error type

use thiserror::Error;

use crate::os::EntropyError;
#[cfg(unix)]
use crate::os::{ForkResult, ProcessError};
use crate::rng::{SampleError, SeedError};

/// Errors surfaced by the global slot, configuration and bindings
///
/// A degenerate (all-zero) generator state is never an error: it is
/// corrected during seed derivation.
#[derive(Debug, Error)]
pub enum SeederError {
    #[error("Entropy unavailable: {0}")]
    EntropyUnavailable(#[from] EntropyError),

    #[error("{0}")]
    InvalidSeed(#[from] SeedError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Sampling error: {0}")]
    Sample(#[from] SampleError),

    #[cfg(unix)]
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    /// `fork()` succeeded but the reseed that followed did not
    ///
    /// `side` tells the caller which process it is running in. A child that
    /// sees this must exit without drawing from the global slot.
    #[cfg(unix)]
    #[error("Reseed after fork failed ({side:?}): {source}")]
    ReseedAfterFork {
        side: ForkResult,
        #[source]
        source: Box<SeederError>,
    },
}

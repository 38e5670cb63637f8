//! Seed derivation
//!
//! A [`Seed`] is either an explicit 64-bit integer chosen by the caller or a
//! buffer of OS entropy. It is consumed exactly once by [`Seed::derive`] to
//! produce a [`GeneratorState`].
//!
//! The explicit path is fixed forever: `state0 = murmur3(seed)`,
//! `state1 = murmur3(!state0)`. Seed `0` is an ordinary seed, not a request
//! for entropy.

use thiserror::Error;

use crate::os::entropy::{self, EntropyError};
use crate::rng::xorshift::GeneratorState;

/// Number of entropy bytes needed to fill a [`GeneratorState`]
pub const ENTROPY_BYTES: usize = 16;

/// Smallest float outside the `i64` domain (2^63)
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Rejected explicit seeds
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeedError {
    #[error("Invalid seed {0}: seed must be a finite number")]
    NotFinite(f64),

    #[error("Invalid seed {0}: seed must be an integer")]
    NotInteger(f64),

    #[error("Invalid seed {0}: seed must fit in a signed 64-bit integer")]
    OutOfRange(f64),
}

/// Convert a double to an explicit seed without truncation
///
/// The value must be finite, integral and inside the `i64` range.
pub fn seed_from_f64(value: f64) -> Result<i64, SeedError> {
    if !value.is_finite() {
        return Err(SeedError::NotFinite(value));
    }
    if value.fract() != 0.0 {
        return Err(SeedError::NotInteger(value));
    }
    if !(-I64_UPPER_BOUND..I64_UPPER_BOUND).contains(&value) {
        return Err(SeedError::OutOfRange(value));
    }
    Ok(value as i64)
}

/// Source of a generator's initial state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    /// Caller-chosen seed; fully determines the output sequence
    Explicit(i64),
    /// Bytes fetched from the OS entropy source
    Entropy([u8; ENTROPY_BYTES]),
}

impl Seed {
    /// Fetch a fresh entropy seed from the OS
    ///
    /// # Errors
    /// `EntropyError::Unavailable` if the OS source cannot be reached.
    pub fn from_entropy() -> Result<Self, EntropyError> {
        Ok(Seed::Entropy(entropy::fetch::<ENTROPY_BYTES>()?))
    }

    /// Validate a seed that arrived as a floating point number
    ///
    /// Host environments often only have doubles. See [`seed_from_f64`].
    ///
    /// # Example
    /// ```
    /// use reseed_core_rs::rng::{Seed, SeedError};
    ///
    /// assert_eq!(Seed::from_f64(42.0), Ok(Seed::Explicit(42)));
    /// assert_eq!(Seed::from_f64(-0.0), Ok(Seed::Explicit(0)));
    /// assert_eq!(Seed::from_f64(1.5), Err(SeedError::NotInteger(1.5)));
    /// ```
    pub fn from_f64(value: f64) -> Result<Self, SeedError> {
        seed_from_f64(value).map(Seed::Explicit)
    }

    /// The explicit seed value, if any
    pub fn explicit(&self) -> Option<i64> {
        match self {
            Seed::Explicit(seed) => Some(*seed),
            Seed::Entropy(_) => None,
        }
    }

    /// Consume the seed and expand it into generator state
    pub fn derive(self) -> GeneratorState {
        match self {
            Seed::Explicit(seed) => GeneratorState::from_seed(seed as u64),
            Seed::Entropy(bytes) => GeneratorState::from_bytes(bytes),
        }
    }
}

impl From<i64> for Seed {
    fn from(seed: i64) -> Self {
        Seed::Explicit(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_derivation_is_stable() {
        let a = Seed::Explicit(12345).derive();
        let b = Seed::Explicit(12345).derive();
        assert_eq!(a, b);
    }

    #[test]
    fn test_negative_seed_uses_twos_complement() {
        let negative = Seed::Explicit(-1).derive();
        assert_eq!(negative, GeneratorState::from_seed(u64::MAX));
    }

    #[test]
    fn test_zero_is_explicit() {
        let seed = Seed::from_f64(0.0).unwrap();
        assert_eq!(seed.explicit(), Some(0));
    }

    #[test]
    fn test_entropy_seeds_differ() {
        let a = Seed::from_entropy().unwrap();
        let b = Seed::from_entropy().unwrap();
        assert_ne!(a, b);
        assert_eq!(a.explicit(), None);
    }

    #[test]
    fn test_from_f64_rejects_invalid() {
        assert_eq!(
            Seed::from_f64(f64::NAN).unwrap_err().to_string(),
            "Invalid seed NaN: seed must be a finite number"
        );
        assert!(matches!(Seed::from_f64(f64::INFINITY), Err(SeedError::NotFinite(_))));
        assert!(matches!(Seed::from_f64(0.25), Err(SeedError::NotInteger(_))));
        assert!(matches!(Seed::from_f64(1e19), Err(SeedError::OutOfRange(_))));
        assert!(matches!(Seed::from_f64(I64_UPPER_BOUND), Err(SeedError::OutOfRange(_))));
    }

    #[test]
    fn test_from_f64_accepts_bounds() {
        assert_eq!(Seed::from_f64(-I64_UPPER_BOUND), Ok(Seed::Explicit(i64::MIN)));
        assert_eq!(Seed::from_f64(-7.0), Ok(Seed::Explicit(-7)));
    }
}

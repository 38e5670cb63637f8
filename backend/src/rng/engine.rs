//! PRNG engine
//!
//! [`Prng`] owns exactly one [`GeneratorState`] and advances it on every
//! draw. It is created either from an explicit seed (reproducible) or from
//! OS entropy (unpredictable), and can be re-seeded in place both ways.
//!
//! Every draw advances the state by exactly one xorshift128+ step, so mixing
//! draw kinds (`next_f64`, `next_i32`, `next_bool`, ...) stays deterministic
//! for a fixed call sequence.

use crate::os::entropy::EntropyError;
use crate::rng::seed::Seed;
use crate::rng::xorshift::{to_double, GeneratorState};
use crate::rng::RandomSource;

/// Deterministic xorshift128+ generator with explicit reseeding
///
/// Instances are exclusively owned; clone one only if a duplicated stream is
/// really wanted (the clone replays the original's future outputs).
///
/// # Example
/// ```
/// use reseed_core_rs::Prng;
///
/// let mut rng = Prng::with_seed(0);
/// assert_eq!(rng.next_f64(), 0.39339363837962904);
/// assert_eq!(rng.next_f64(), 0.39339364003432853);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prng {
    state: GeneratorState,
    /// Explicit seed the current state was derived from (None for entropy)
    initial_seed: Option<i64>,
}

impl Prng {
    /// Create a generator seeded from OS entropy
    ///
    /// # Errors
    /// `EntropyError::Unavailable` if the OS source cannot be reached.
    pub fn new() -> Result<Self, EntropyError> {
        Ok(Self::from_seed(Seed::from_entropy()?))
    }

    /// Create a generator from an explicit seed
    ///
    /// Seed `0` is a regular seed with a fixed output sequence.
    pub fn with_seed(seed: i64) -> Self {
        Self::from_seed(Seed::Explicit(seed))
    }

    /// Create a generator with an optional explicit seed
    ///
    /// `Some(seed)` takes the deterministic path, `None` the entropy path.
    pub fn construct(seed: Option<i64>) -> Result<Self, EntropyError> {
        match seed {
            Some(seed) => Ok(Self::with_seed(seed)),
            None => Self::new(),
        }
    }

    /// Create a generator from an already obtained [`Seed`]
    pub fn from_seed(seed: Seed) -> Self {
        let initial_seed = seed.explicit();
        Self {
            state: seed.derive(),
            initial_seed,
        }
    }

    /// Replace the whole state with one derived from `seed`
    ///
    /// The future output is identical to `Prng::with_seed(seed)`.
    pub fn set_seed(&mut self, seed: i64) {
        *self = Self::with_seed(seed);
    }

    /// Replace the whole state with fresh OS entropy
    ///
    /// On error the current state is left untouched.
    pub fn reseed(&mut self) -> Result<(), EntropyError> {
        *self = Self::new()?;
        Ok(())
    }

    /// `set_seed` for `Some`, `reseed` for `None`
    pub fn reseed_with(&mut self, seed: Option<i64>) -> Result<(), EntropyError> {
        *self = Self::construct(seed)?;
        Ok(())
    }

    /// Explicit seed of the current state, or `None` if it came from entropy
    pub fn initial_seed(&self) -> Option<i64> {
        self.initial_seed
    }

    /// Current generator registers
    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Uniform double in [0.0, 1.0)
    ///
    /// Uses the top 52 bits of `state0` after one step.
    pub fn next_f64(&mut self) -> f64 {
        self.state.step();
        to_double(self.state.state0())
    }

    /// Top `bits` bits of the next output word, as a signed 32-bit value
    ///
    /// # Panics
    /// Panics if `bits` is not in `1..=32`.
    pub fn next_bits(&mut self, bits: u32) -> i32 {
        assert!((1..=32).contains(&bits), "bits must be in 1..=32");
        self.state.step();
        (self.state.sum() >> (64 - bits)) as u32 as i32
    }

    /// Uniform over all 2^32 `i32` values
    pub fn next_i32(&mut self) -> i32 {
        self.next_bits(32)
    }

    /// Uniform in [0, max)
    ///
    /// # Panics
    /// Panics if `max <= 0`.
    ///
    /// # Example
    /// ```
    /// use reseed_core_rs::Prng;
    ///
    /// let mut rng = Prng::with_seed(12345);
    /// let die = rng.next_i32_below(6);
    /// assert!((0..6).contains(&die));
    /// ```
    pub fn next_i32_below(&mut self, max: i32) -> i32 {
        assert!(max > 0, "max must be positive");

        if max & (max - 1) == 0 {
            return ((i64::from(max) * i64::from(self.next_bits(31))) >> 31) as i32;
        }

        // Reject draws from the final partial bucket of the 31-bit range
        loop {
            let rnd = self.next_bits(31);
            let val = rnd % max;
            if i32::MAX - (rnd - val) >= max - 1 {
                return val;
            }
        }
    }

    /// Fair coin
    pub fn next_bool(&mut self) -> bool {
        self.next_bits(1) != 0
    }

    /// Uniform over all 2^64 `i64` values
    pub fn next_i64(&mut self) -> i64 {
        self.state.step();
        self.state.sum() as i64
    }

    /// Fill `buf` with random bytes, one step per byte
    pub fn fill_bytes(&mut self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            *byte = self.next_bits(8) as u8;
        }
    }
}

impl RandomSource for Prng {
    fn next_f64(&mut self) -> f64 {
        Prng::next_f64(self)
    }
}

impl rand::RngCore for Prng {
    fn next_u32(&mut self) -> u32 {
        self.next_bits(32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_i64() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        Prng::fill_bytes(self, dest)
    }
}

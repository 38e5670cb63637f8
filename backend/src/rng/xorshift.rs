//! xorshift128+ generator state
//!
//! This is the generator behind V8's `Math.random()`: two 64-bit state words
//! advanced by xorshift128+, seeded through the MurmurHash3 64-bit finalizer.
//!
//! # Algorithm
//!
//! xorshift128+ has a period of 2^128 - 1 and passes BigCrush except for the
//! lowest bits of `state0 + state1`. Floating point output only uses the top
//! 52 bits of `state0`, so that weakness never shows up in `next_f64()`.
//!
//! # Determinism
//!
//! Same seed → same sequence, bit for bit, on every platform. All arithmetic
//! is wrapping `u64` arithmetic and the float mapping is an exact bit
//! construction, so there is no rounding mode or FPU dependence.

/// Exponent bits of an `f64` in [1.0, 2.0)
const EXPONENT_BITS: u64 = 0x3FF0_0000_0000_0000;

/// MurmurHash3 fmix64 multipliers
const MURMUR_C1: u64 = 0xFF51_AFD7_ED55_8CCD;
const MURMUR_C2: u64 = 0xC4CE_B9FE_1A85_EC53;

/// MurmurHash3 64-bit finalizer (`fmix64`)
///
/// A bijection on `u64` with `murmur3(0) == 0`.
///
/// # Example
/// ```
/// use reseed_core_rs::rng::murmur3;
///
/// assert_eq!(murmur3(0), 0);
/// assert_ne!(murmur3(1), 1);
/// ```
pub fn murmur3(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(MURMUR_C1);
    h ^= h >> 33;
    h = h.wrapping_mul(MURMUR_C2);
    h ^= h >> 33;
    h
}

/// Map a state word to a double in [0.0, 1.0)
///
/// The top 52 bits of `state0` become the mantissa of a double in
/// [1.0, 2.0), and 1.0 is subtracted. The result is exact.
pub fn to_double(state0: u64) -> f64 {
    f64::from_bits((state0 >> 12) | EXPONENT_BITS) - 1.0
}

/// Internal registers of the generator
///
/// Invariant: never all-zero. Every constructor goes through
/// [`GeneratorState::from_words`], which perturbs the degenerate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorState {
    state0: u64,
    state1: u64,
}

impl GeneratorState {
    /// Build a state from two raw words
    ///
    /// An all-zero pair is a fixed point of xorshift; it is replaced by
    /// `(0, murmur3(!0))`, the state seed `0` expands to.
    pub fn from_words(state0: u64, state1: u64) -> Self {
        if state0 == 0 && state1 == 0 {
            return Self {
                state0: 0,
                state1: murmur3(!0),
            };
        }
        Self { state0, state1 }
    }

    /// Expand a 64-bit seed into the full state
    ///
    /// `state0 = murmur3(seed)`, `state1 = murmur3(!state0)`. Because
    /// `murmur3` is a bijection fixing zero, at most one word can be zero.
    pub fn from_seed(seed: u64) -> Self {
        let state0 = murmur3(seed);
        let state1 = murmur3(!state0);
        Self::from_words(state0, state1)
    }

    /// Build a state from 16 little-endian entropy bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        lo.copy_from_slice(&bytes[..8]);
        hi.copy_from_slice(&bytes[8..]);
        Self::from_words(u64::from_le_bytes(lo), u64::from_le_bytes(hi))
    }

    /// Advance by one xorshift128+ step
    pub fn step(&mut self) {
        let mut s1 = self.state0;
        let s0 = self.state1;
        self.state0 = s0;
        s1 ^= s1 << 23;
        s1 ^= s1 >> 17;
        s1 ^= s0;
        s1 ^= s0 >> 26;
        self.state1 = s1;
    }

    /// First state word
    pub fn state0(&self) -> u64 {
        self.state0
    }

    /// Second state word
    pub fn state1(&self) -> u64 {
        self.state1
    }

    /// xorshift128+ output word (`state0 + state1`)
    pub fn sum(&self) -> u64 {
        self.state0.wrapping_add(self.state1)
    }
}

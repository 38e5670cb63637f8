//! Pseudorandom number generation
//!
//! Uses xorshift128+ seeded through MurmurHash3 for fast, reproducible
//! output. The stream is NOT cryptographically secure; only the entropy
//! seeding path draws from the OS CSPRNG.

mod engine;
mod sample;
mod seed;
mod xorshift;

pub use engine::Prng;
pub use sample::SampleError;
pub use seed::{seed_from_f64, Seed, SeedError, ENTROPY_BYTES};
pub use xorshift::{murmur3, to_double, GeneratorState};

/// Anything that can hand out uniform doubles in [0.0, 1.0)
///
/// Code that needs randomness should take a `&mut impl RandomSource` so that
/// tests can pass a seeded [`Prng`] while production passes the process-wide
/// [`crate::Ambient`] handle.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

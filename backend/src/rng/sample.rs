//! Sampling without replacement
//!
//! Both algorithms work on whichever side is smaller: the values to keep or
//! the values to throw away. Output is always in ascending order so that a
//! seeded generator yields the same `Vec`, independent of hashing.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::rng::engine::Prng;

/// Invalid sampling requests
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("Cannot sample {requested} unique values below {max}")]
    TooManyRequested { requested: usize, max: u64 },

    #[error("Cannot sample {requested} values: only {available} candidates remain after exclusions")]
    TooManyExcluded { requested: usize, available: u64 },
}

/// All values in [0, max) missing from `set`, ascending
fn complement(set: &BTreeSet<u64>, max: u64) -> Vec<u64> {
    (0..max).filter(|v| !set.contains(v)).collect()
}

impl Prng {
    /// Uniform index in [0, len)
    fn next_index(&mut self, len: u64) -> u64 {
        // Products close to `len` can round up for len > 2^52
        ((self.next_f64() * len as f64) as u64).min(len - 1)
    }

    /// `n` unique values in [0, max), ascending
    ///
    /// Draws values for the smaller of the "selected" and "excluded" sides
    /// and gives up after three draws per wanted value, finishing with
    /// [`Prng::next_sample_slow`].
    ///
    /// # Errors
    /// `SampleError::TooManyRequested` if `n > max`.
    ///
    /// # Example
    /// ```
    /// use reseed_core_rs::Prng;
    ///
    /// let mut rng = Prng::with_seed(42);
    /// let picks = rng.next_sample(10, 3).unwrap();
    /// assert_eq!(picks.len(), 3);
    /// assert!(picks.windows(2).all(|w| w[0] < w[1]));
    /// ```
    pub fn next_sample(&mut self, max: u64, n: usize) -> Result<Vec<u64>, SampleError> {
        if n as u64 > max {
            return Err(SampleError::TooManyRequested { requested: n, max });
        }
        if n == 0 {
            return Ok(Vec::new());
        }

        let smaller_part = (max - n as u64).min(n as u64) as usize;
        let mut selected = BTreeSet::new();
        let mut draws = 0usize;

        while selected.len() != smaller_part && draws / 3 < smaller_part {
            selected.insert(self.next_index(max));
            draws += 1;
        }

        if selected.len() == smaller_part {
            if smaller_part != n {
                return Ok(complement(&selected, max));
            }
            return Ok(selected.into_iter().collect());
        }

        if smaller_part == n {
            // Partial selection: finish by sampling the rest among the unpicked
            let remaining = n - selected.len();
            let mut rest = self.next_sample_slow(max, remaining, &selected)?;
            rest.extend(selected);
            rest.sort_unstable();
            return Ok(rest);
        }

        // Partial exclusion: pick the kept values among the non-excluded
        self.next_sample_slow(max, n, &BTreeSet::new())
    }

    /// `n` unique values in [0, max) that are not in `excluded`, ascending
    ///
    /// Builds the full candidate list and removes uniformly chosen entries
    /// until the smaller side is reached.
    ///
    /// # Errors
    /// `SampleError::TooManyExcluded` if fewer than `n` candidates remain.
    pub fn next_sample_slow(
        &mut self,
        max: u64,
        n: usize,
        excluded: &BTreeSet<u64>,
    ) -> Result<Vec<u64>, SampleError> {
        let candidates = complement(excluded, max);
        let available = candidates.len() as u64;
        if available < n as u64 {
            return Err(SampleError::TooManyExcluded {
                requested: n,
                available,
            });
        }

        let mut result = candidates;
        let larger_part = (result.len() - n).max(n);

        while result.len() != larger_part && result.len() > n {
            let x = self.next_index(result.len() as u64) as usize;
            result.swap_remove(x);
        }

        if result.len() != n {
            // `result` now holds the values to drop
            let dropped: BTreeSet<u64> = result.into_iter().collect();
            return Ok(complement(excluded, max)
                .into_iter()
                .filter(|v| !dropped.contains(v))
                .collect());
        }

        result.sort_unstable();
        Ok(result)
    }
}

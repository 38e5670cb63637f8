//! Entropy source
//!
//! Fetches bytes from the operating system CSPRNG (`getrandom(2)` on Linux,
//! `getentropy`/`arc4random` on the BSDs and macOS, `ProcessPrng` on
//! Windows). Every entropy-seeded `Prng` gets its bytes here.
//!
//! If the OS source fails the error is returned. No other source is tried.

use thiserror::Error;

/// Errors that can occur while fetching entropy
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntropyError {
    #[error("OS entropy source unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
thread_local! {
    static SIMULATED_OUTAGE: std::cell::Cell<bool> = const { std::cell::Cell::new(false) };
}

/// Make every fetch on the current thread fail until the guard is dropped
#[cfg(test)]
pub(crate) fn simulate_outage() -> OutageGuard {
    SIMULATED_OUTAGE.with(|flag| flag.set(true));
    OutageGuard
}

#[cfg(test)]
pub(crate) struct OutageGuard;

#[cfg(test)]
impl Drop for OutageGuard {
    fn drop(&mut self) {
        SIMULATED_OUTAGE.with(|flag| flag.set(false));
    }
}

impl From<getrandom::Error> for EntropyError {
    fn from(err: getrandom::Error) -> Self {
        EntropyError::Unavailable(err.to_string())
    }
}

/// Fill `buf` entirely with OS entropy
///
/// # Errors
/// Returns `EntropyError::Unavailable` if the OS source cannot be reached.
/// The contents of `buf` are unspecified in that case.
pub fn fill(buf: &mut [u8]) -> Result<(), EntropyError> {
    #[cfg(test)]
    if SIMULATED_OUTAGE.with(|flag| flag.get()) {
        return Err(EntropyError::Unavailable("simulated outage".to_string()));
    }
    getrandom::fill(buf)?;
    Ok(())
}

/// Fetch exactly `N` bytes of OS entropy
///
/// # Example
/// ```
/// use reseed_core_rs::os::entropy;
///
/// let a: [u8; 16] = entropy::fetch().unwrap();
/// let b: [u8; 16] = entropy::fetch().unwrap();
/// assert_ne!(a, b);
/// ```
pub fn fetch<const N: usize>() -> Result<[u8; N], EntropyError> {
    let mut buf = [0u8; N];
    fill(&mut buf)?;
    Ok(buf)
}

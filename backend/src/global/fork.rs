//! Fork-safety coordinator
//!
//! After `fork()` the child owns a bit-identical copy of every generator in
//! the parent, including the global slot. Unless one side reseeds, both
//! processes emit the same "random" sequence.
//!
//! The crate does not detect duplication on its own. Callers MUST run
//! [`reseed_after_fork`] at the start of any code path that may execute in a
//! freshly forked process, before drawing from the global slot, and call
//! `Prng::reseed` on any per-instance generator that crossed the fork.
//!
//! Two stricter options exist:
//! - [`fork_and_reseed`] forks and reseeds on both sides in one call
//! - `ForkPolicy::ReseedOnPidChange` makes the global slot reseed itself on
//!   the first draw in a process whose pid differs from the installer's

use crate::error::SeederError;
use crate::events::ReseedReason;
#[cfg(unix)]
use crate::os::{self, ForkResult};

use super::slot::reseed_with_reason;

/// Replace the global generator after a process duplication
///
/// Identical to `global_reseed()` except for the reason recorded in the
/// reseed history. Safe to call at any time, in any process.
pub fn reseed_after_fork() -> Result<u64, SeederError> {
    reseed_with_reason(ReseedReason::AfterFork)
}

/// `fork()`, then reseed the global generator in both processes
///
/// Per-instance generators are not touched; reseed them separately.
///
/// # Errors
/// - `SeederError::Process` if `fork()` fails. No child exists and nothing
///   is reseeded.
/// - `SeederError::ReseedAfterFork` if the fork succeeded but the reseed
///   failed on the calling side. The error carries the [`ForkResult`]; in the
///   child the caller must exit (e.g. `libc::_exit`) instead of continuing
///   as a second parent.
#[cfg(unix)]
pub fn fork_and_reseed() -> Result<ForkResult, SeederError> {
    let side = os::fork()?;
    match reseed_after_fork() {
        Ok(_) => Ok(side),
        Err(err) => Err(SeederError::ReseedAfterFork {
            side,
            source: Box::new(err),
        }),
    }
}

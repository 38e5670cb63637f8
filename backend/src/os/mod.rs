//! Operating system collaborators
//!
//! Thin, safe wrappers around the OS services the generator depends on:
//!
//! - **entropy**: unpredictable bytes from the kernel CSPRNG, used to seed
//!   generators that were not given an explicit seed
//! - **process**: `fork`, `getpid` and `waitpid`, used by the fork-safety
//!   coordinator and its tests
//!
//! Nothing in this module ever touches generator state.

pub mod entropy;

#[cfg(unix)]
pub mod process;

pub use entropy::EntropyError;

#[cfg(unix)]
pub use process::{fork, getpid, waitpid, ForkResult, ProcessError};

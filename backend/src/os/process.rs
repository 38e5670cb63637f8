//! Process collaborators (unix)
//!
//! `fork(2)`, `getpid(2)` and `waitpid(2)`. These exist so the fork-safety
//! coordinator can detect a pid change and so tests can exercise a real
//! process duplication.

use std::io;

use thiserror::Error;

/// Errors from process primitives
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("fork() failed: {0}")]
    ForkFailed(#[source] io::Error),

    #[error("waitpid({pid}) failed: {source}")]
    WaitFailed {
        pid: i32,
        #[source]
        source: io::Error,
    },
}

/// Which side of a successful `fork()` the caller is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkResult {
    /// Original process; `child` is the new process id
    Parent { child: i32 },
    /// Newly created process
    Child,
}

impl ForkResult {
    /// True in the newly created process
    pub fn is_child(&self) -> bool {
        matches!(self, ForkResult::Child)
    }
}

/// Duplicate the current process
///
/// Every generator in the child starts as a bit-identical copy of the
/// parent's. Call [`crate::reseed_after_fork`] (or `Prng::reseed`) in both
/// processes before drawing from them.
///
/// # Safety notes
/// Only the calling thread survives in the child. The crate itself holds no
/// lock across this call, but callers in multi-threaded programs must follow
/// the usual async-signal-safety rules until `exec` or `exit`.
pub fn fork() -> Result<ForkResult, ProcessError> {
    // SAFETY: fork has no memory-safety preconditions; see notes above.
    let pid = unsafe { libc::fork() };
    match pid {
        p if p < 0 => Err(ProcessError::ForkFailed(io::Error::last_os_error())),
        0 => Ok(ForkResult::Child),
        child => Ok(ForkResult::Parent { child }),
    }
}

/// Current process id
pub fn getpid() -> i32 {
    // SAFETY: getpid cannot fail.
    unsafe { libc::getpid() }
}

/// Wait for `pid` to terminate and return its raw wait status
///
/// Retries on `EINTR`.
pub fn waitpid(pid: i32) -> Result<i32, ProcessError> {
    let mut status: libc::c_int = 0;
    loop {
        // SAFETY: status points to a live c_int for the duration of the call.
        let res = unsafe { libc::waitpid(pid, &mut status, 0) };
        if res >= 0 {
            return Ok(status);
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(ProcessError::WaitFailed { pid, source: err });
        }
    }
}

/// Decode a wait status into an exit code, if the process exited normally
pub fn exit_code(status: i32) -> Option<i32> {
    if libc::WIFEXITED(status) {
        Some(libc::WEXITSTATUS(status))
    } else {
        None
    }
}

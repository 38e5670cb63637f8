//! Clocks
//!
//! Neither clock feeds generator state. `ticks()` exists so tests and
//! callers can assert forward progress, `now_from_system_time()` for
//! timestamps in the reseed log.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Last value handed out by `ticks()`
static LAST_TICK: AtomicI64 = AtomicI64::new(0);

/// Raw monotonic clock in nanoseconds
#[cfg(unix)]
fn monotonic_nanos() -> i64 {
    // SAFETY: timespec is plain old data; all-zero is a valid value.
    let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
    // SAFETY: ts is a valid, writable timespec.
    let res = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
    debug_assert_eq!(res, 0, "CLOCK_MONOTONIC unavailable");
    (ts.tv_sec as i64)
        .saturating_mul(1_000_000_000)
        .saturating_add(ts.tv_nsec as i64)
}

#[cfg(not(unix))]
fn monotonic_nanos() -> i64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    let origin = ORIGIN.get_or_init(Instant::now);
    i64::try_from(origin.elapsed().as_nanos()).unwrap_or(i64::MAX)
}

/// Strictly increasing tick counter (nanosecond based, never below 1)
///
/// Two calls in the same process always return different values, even if
/// the clock did not advance between them.
///
/// # Example
/// ```
/// use reseed_core_rs::core::time::ticks;
///
/// let a = ticks();
/// let b = ticks();
/// assert!(b > a);
/// ```
pub fn ticks() -> i64 {
    let now = monotonic_nanos().max(1);
    let mut last = LAST_TICK.load(Ordering::Relaxed);
    loop {
        let next = if now > last { now } else { last + 1 };
        match LAST_TICK.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

/// Wall-clock time in microseconds since the Unix epoch
///
/// Returns 0 for clocks set before the epoch.
pub fn now_from_system_time() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_micros()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

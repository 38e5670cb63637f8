//! Global generator slot
//!
//! One process-wide [`Prng`] behind the ambient [`random()`] function. The
//! slot starts empty; until something is installed, `random()` is served by
//! the host default generator (a `rand` [`StdRng`] created on first use).
//!
//! # Lifecycle
//!
//! ```text
//!  empty ──global_reseed()──► installed(gen 1) ──global_reseed()──► installed(gen 2) ...
//!    │                              ▲
//!    └──configure(seed)─────────────┘
//! ```
//!
//! Every install replaces the previous engine wholesale under the slot lock,
//! so no draw ever observes a half-replaced state.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ForkPolicy, SeederConfig};
use crate::core::time::now_from_system_time;
use crate::error::SeederError;
use crate::events::{ReseedEvent, ReseedLog, ReseedReason};
use crate::os::entropy::{self, EntropyError};
use crate::rng::{Prng, RandomSource};

struct GlobalSlot {
    engine: Option<Prng>,
    /// Host default, serving draws while `engine` is empty
    host: Option<StdRng>,
    /// Process that installed `engine` (or created the slot)
    owner_pid: i32,
    fork_policy: ForkPolicy,
    generation: u64,
    log: ReseedLog,
}

impl GlobalSlot {
    fn new() -> Self {
        Self {
            engine: None,
            host: None,
            owner_pid: current_pid(),
            fork_policy: ForkPolicy::default(),
            generation: 0,
            log: ReseedLog::default(),
        }
    }

    fn install(&mut self, engine: Prng, reason: ReseedReason) -> u64 {
        self.generation += 1;
        self.owner_pid = current_pid();
        self.log.log(ReseedEvent {
            generation: self.generation,
            pid: self.owner_pid,
            timestamp_us: now_from_system_time(),
            reason,
            seeded: engine.initial_seed().is_some(),
        });
        self.engine = Some(engine);
        self.generation
    }

    /// Install freshly seeded host default and engine together
    fn replace(&mut self, fresh: FreshGenerators, reason: ReseedReason) -> u64 {
        self.host = Some(fresh.host);
        self.install(fresh.engine, reason)
    }

    fn pid_changed(&self) -> bool {
        self.fork_policy == ForkPolicy::ReseedOnPidChange && self.owner_pid != current_pid()
    }

    fn next_f64(&mut self) -> Result<f64, SeederError> {
        if self.pid_changed() {
            let fresh = FreshGenerators::fetch()?;
            self.replace(fresh, ReseedReason::PidChanged);
        }

        if let Some(engine) = self.engine.as_mut() {
            return Ok(engine.next_f64());
        }
        let host = match self.host.take() {
            Some(host) => host,
            None => host_default()?,
        };
        Ok(self.host.insert(host).random::<f64>())
    }
}

fn slot() -> MutexGuard<'static, GlobalSlot> {
    static SLOT: OnceLock<Mutex<GlobalSlot>> = OnceLock::new();
    SLOT.get_or_init(|| Mutex::new(GlobalSlot::new()))
        .lock()
        // A panic inside a draw cannot leave the state half-written
        .unwrap_or_else(PoisonError::into_inner)
}

#[cfg(unix)]
fn current_pid() -> i32 {
    crate::os::getpid()
}

#[cfg(not(unix))]
fn current_pid() -> i32 {
    std::process::id() as i32
}

/// New host default generator seeded from OS entropy
fn host_default() -> Result<StdRng, EntropyError> {
    Ok(StdRng::from_seed(entropy::fetch()?))
}

/// Entropy-seeded replacements for both slot generators
///
/// Nothing is installed unless both were created.
struct FreshGenerators {
    host: StdRng,
    engine: Prng,
}

impl FreshGenerators {
    fn fetch() -> Result<Self, EntropyError> {
        Ok(Self {
            host: host_default()?,
            engine: Prng::new()?,
        })
    }
}

pub(crate) fn reseed_with_reason(reason: ReseedReason) -> Result<u64, SeederError> {
    let fresh = FreshGenerators::fetch()?;
    Ok(slot().replace(fresh, reason))
}

/// Reseed the process-wide generator from OS entropy
///
/// 1. reseeds the host default generator,
/// 2. builds a new entropy-seeded [`Prng`],
/// 3. installs it as the sole backing instance of [`random()`].
///
/// Returns the new slot generation.
///
/// # Errors
/// `SeederError::EntropyUnavailable` if the OS source fails. The previous
/// generator stays installed and nothing is logged.
///
/// # Example
/// ```
/// let generation = reseed_core_rs::global_reseed().unwrap();
/// assert!(generation >= 1);
///
/// let x = reseed_core_rs::random();
/// assert!((0.0..1.0).contains(&x));
/// ```
pub fn global_reseed() -> Result<u64, SeederError> {
    reseed_with_reason(ReseedReason::Explicit)
}

/// Apply a configuration to the global slot
///
/// Sets the fork policy and log capacity. With `seed: Some(_)` a
/// deterministically seeded generator is installed, making the ambient
/// stream reproducible.
pub fn configure(config: &SeederConfig) -> Result<(), SeederError> {
    config.validate()?;

    let mut slot = slot();
    slot.fork_policy = config.fork_policy;
    slot.owner_pid = current_pid();
    slot.log.set_capacity(config.log_capacity);
    if let Some(seed) = config.seed {
        slot.install(Prng::with_seed(seed), ReseedReason::Configured);
    }
    Ok(())
}

/// Next ambient random double in [0.0, 1.0)
///
/// Served by the installed generator, or by the host default when the slot
/// is empty. Under [`ForkPolicy::ReseedOnPidChange`] a pid change triggers
/// a reseed before the draw.
///
/// # Errors
/// `SeederError::EntropyUnavailable` if the OS source failed while a
/// pid-change reseed was pending or while the host default was being created
/// for its first draw. The slot is left unchanged.
pub fn try_random() -> Result<f64, SeederError> {
    slot().next_f64()
}

/// Next ambient random double in [0.0, 1.0)
///
/// Drop-in replacement for a host "random float" function.
///
/// # Panics
/// Panics if [`try_random`] fails, i.e. the OS entropy source could not be
/// reached for an automatic pid-change reseed or for the first host default
/// draw. Returning output from the copied pre-fork state instead would break
/// the fork-safety contract.
pub fn random() -> f64 {
    match try_random() {
        Ok(value) => value,
        Err(err) => panic!("ambient random() failed: {}", err),
    }
}

/// True if a generator is installed (false: host default in use)
pub fn is_installed() -> bool {
    slot().engine.is_some()
}

/// Remove the installed generator, returning to the host default
///
/// Returns whether a generator was installed. The generation counter and
/// history are kept.
pub fn uninstall() -> bool {
    slot().engine.take().is_some()
}

/// Number of installs since process start
pub fn generation() -> u64 {
    slot().generation
}

/// Currently active fork policy
pub fn fork_policy() -> ForkPolicy {
    slot().fork_policy
}

/// Retained reseed events, oldest first
pub fn reseed_history() -> Vec<ReseedEvent> {
    slot().log.events()
}

/// Handle to the ambient generator, for APIs that take a [`RandomSource`]
///
/// # Example
/// ```
/// use reseed_core_rs::{Ambient, Prng, RandomSource};
///
/// fn roll(rng: &mut impl RandomSource) -> u32 {
///     (rng.next_f64() * 6.0) as u32 + 1
/// }
///
/// assert!((1..=6).contains(&roll(&mut Ambient)));
/// assert!((1..=6).contains(&roll(&mut Prng::with_seed(3))));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Ambient;

impl RandomSource for Ambient {
    fn next_f64(&mut self) -> f64 {
        random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_records_event() {
        let mut slot = GlobalSlot::new();
        let generation = slot.install(Prng::with_seed(5), ReseedReason::Configured);

        assert_eq!(generation, 1);
        let event = slot.log.last().unwrap();
        assert_eq!(event.generation, 1);
        assert_eq!(event.reason, ReseedReason::Configured);
        assert_eq!(event.pid, current_pid());
        assert!(event.seeded);
    }

    #[test]
    fn test_install_replaces_engine() {
        let mut slot = GlobalSlot::new();
        slot.install(Prng::with_seed(1), ReseedReason::Configured);
        slot.install(Prng::with_seed(2), ReseedReason::Configured);

        assert_eq!(slot.generation, 2);
        assert_eq!(slot.engine, Some(Prng::with_seed(2)));
    }

    #[test]
    fn test_host_default_serves_empty_slot() {
        let mut slot = GlobalSlot::new();
        let value = slot.next_f64().unwrap();

        assert!((0.0..1.0).contains(&value));
        assert!(slot.host.is_some());
        assert_eq!(slot.generation, 0, "host default draws install nothing");
    }

    #[test]
    fn test_host_default_outage_is_reported() {
        let mut slot = GlobalSlot::new();
        {
            let _outage = entropy::simulate_outage();
            let err = slot.next_f64().unwrap_err();
            assert!(matches!(err, SeederError::EntropyUnavailable(_)));
            assert!(slot.host.is_none());
        }
        assert!(slot.next_f64().is_ok());
    }

    #[test]
    fn test_pid_change_outage_keeps_engine() {
        let mut slot = GlobalSlot::new();
        slot.install(Prng::with_seed(4), ReseedReason::Configured);
        slot.fork_policy = ForkPolicy::ReseedOnPidChange;
        slot.owner_pid = current_pid() + 1;

        let _outage = entropy::simulate_outage();
        let err = slot.next_f64().unwrap_err();

        assert!(matches!(err, SeederError::EntropyUnavailable(_)));
        assert_eq!(slot.engine, Some(Prng::with_seed(4)));
        assert_eq!(slot.generation, 1);
        assert_eq!(slot.log.len(), 1);
        assert!(slot.pid_changed(), "reseed stays pending");
    }

    #[test]
    fn test_pid_change_reseeds_before_draw() {
        let mut slot = GlobalSlot::new();
        slot.install(Prng::with_seed(4), ReseedReason::Configured);
        slot.fork_policy = ForkPolicy::ReseedOnPidChange;
        slot.owner_pid = current_pid() + 1;

        slot.next_f64().unwrap();

        assert_eq!(slot.generation, 2);
        assert_eq!(slot.log.last().unwrap().reason, ReseedReason::PidChanged);
        assert_eq!(slot.engine.as_ref().unwrap().initial_seed(), None);
        assert!(!slot.pid_changed());
    }

    #[test]
    fn test_global_reseed_outage_leaves_slot_unchanged() {
        let generation_before = generation();
        let history_before = reseed_history();

        let _outage = entropy::simulate_outage();
        for result in [global_reseed(), crate::global::reseed_after_fork()] {
            let err = result.unwrap_err();
            assert!(matches!(err, SeederError::EntropyUnavailable(_)));
        }

        assert_eq!(generation(), generation_before);
        assert_eq!(reseed_history(), history_before);
    }

    #[test]
    fn test_pid_changed_respects_policy() {
        let mut slot = GlobalSlot::new();
        slot.owner_pid = current_pid() + 1;
        assert!(!slot.pid_changed(), "manual policy never reacts");

        slot.fork_policy = ForkPolicy::ReseedOnPidChange;
        assert!(slot.pid_changed());

        slot.owner_pid = current_pid();
        assert!(!slot.pid_changed());
    }
}

//! Global slot tests
//!
//! Critical invariants tested:
//! - Consecutive global reseeds yield independent ambient streams
//! - A configured seed makes the ambient stream reproducible
//! - Installs are recorded in the reseed history
//!
//! The slot is process-wide, so every test takes SLOT_LOCK.

use std::sync::{Mutex, MutexGuard};

use reseed_core_rs::events::ReseedReason;
use reseed_core_rs::global::{generation, is_installed, uninstall};
use reseed_core_rs::{
    configure, global_reseed, random, reseed_history, try_random, Ambient, ForkPolicy, Prng,
    RandomSource, SeederConfig,
};

static SLOT_LOCK: Mutex<()> = Mutex::new(());

fn lock() -> MutexGuard<'static, ()> {
    SLOT_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

// ============================================================================
// Global Reseed
// ============================================================================

#[test]
fn test_global_reseed_pairwise_distinct() {
    let _guard = lock();

    global_reseed().unwrap();
    let t1 = random();
    let t2 = random();
    assert_ne!(t1, t2);

    global_reseed().unwrap();
    let t3 = random();
    let t4 = random();

    let values = [t1, t2, t3, t4];
    for i in 0..values.len() {
        for j in i + 1..values.len() {
            assert_ne!(values[i], values[j], "values {} and {} collided", i, j);
        }
    }
}

#[test]
fn test_global_reseed_increments_generation() {
    let _guard = lock();

    let before = generation();
    let first = global_reseed().unwrap();
    let second = global_reseed().unwrap();

    assert_eq!(first, before + 1);
    assert_eq!(second, before + 2);
    assert_eq!(generation(), second);
}

#[test]
fn test_global_reseed_recorded_in_history() {
    let _guard = lock();

    let generation = global_reseed().unwrap();
    let last = reseed_history().pop().unwrap();

    assert_eq!(last.generation, generation);
    assert_eq!(last.reason, ReseedReason::Explicit);
    assert!(!last.seeded);
    assert_eq!(last.pid, std::process::id() as i32);
}

#[test]
fn test_global_reseed_breaks_configured_sequence() {
    let _guard = lock();

    configure(&SeederConfig {
        seed: Some(0),
        ..SeederConfig::default()
    })
    .unwrap();
    global_reseed().unwrap();

    assert_ne!(random(), 0.39339363837962904);
}

// ============================================================================
// Host Default
// ============================================================================

#[test]
fn test_uninstalled_slot_uses_host_default() {
    let _guard = lock();

    uninstall();
    assert!(!is_installed());

    for _ in 0..100 {
        let value = try_random().unwrap();
        assert!((0.0..1.0).contains(&value));
    }
    assert!(!is_installed(), "drawing must not install a generator");

    global_reseed().unwrap();
    assert!(is_installed());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_configured_seed_reproducible() {
    let _guard = lock();

    let config = SeederConfig::from_json(r#"{"seed": 1}"#).unwrap();

    configure(&config).unwrap();
    assert_eq!(random(), 0.7662037068107435);
    assert_eq!(random(), 0.0562947746566671);

    configure(&config).unwrap();
    assert_eq!(random(), 0.7662037068107435);

    let last = reseed_history().pop().unwrap();
    assert_eq!(last.reason, ReseedReason::Configured);
    assert!(last.seeded);
}

#[test]
fn test_configure_sets_policy_and_capacity() {
    let _guard = lock();

    configure(&SeederConfig {
        seed: None,
        fork_policy: ForkPolicy::ReseedOnPidChange,
        log_capacity: 2,
    })
    .unwrap();
    assert_eq!(reseed_core_rs::global::fork_policy(), ForkPolicy::ReseedOnPidChange);

    for _ in 0..5 {
        global_reseed().unwrap();
    }
    assert_eq!(reseed_history().len(), 2);

    configure(&SeederConfig::default()).unwrap();
    assert_eq!(reseed_core_rs::global::fork_policy(), ForkPolicy::Manual);
}

#[test]
fn test_configure_rejects_zero_capacity() {
    let _guard = lock();

    let result = configure(&SeederConfig {
        log_capacity: 0,
        ..SeederConfig::default()
    });
    assert!(result.is_err());
}

// ============================================================================
// Injection
// ============================================================================

fn mean_of(rng: &mut impl RandomSource, n: usize) -> f64 {
    (0..n).map(|_| rng.next_f64()).sum::<f64>() / n as f64
}

#[test]
fn test_random_source_injection() {
    let _guard = lock();

    let seeded = mean_of(&mut Prng::with_seed(9), 1000);
    assert_eq!(seeded, mean_of(&mut Prng::with_seed(9), 1000));

    global_reseed().unwrap();
    let ambient = mean_of(&mut Ambient, 1000);
    assert!(ambient > 0.4 && ambient < 0.6, "ambient mean {}", ambient);
}

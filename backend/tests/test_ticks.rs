//! Tests for the tick counter and clocks

use reseed_core_rs::core::time::{now_from_system_time, ticks};

#[test]
fn test_ticks_differ_between_calls() {
    assert_ne!(ticks(), ticks());
}

#[test]
fn test_ticks_positive() {
    assert!(ticks() > 1);
}

#[test]
fn test_ticks_monotonic_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                let mut prev = ticks();
                for _ in 0..1000 {
                    let next = ticks();
                    assert!(next > prev);
                    prev = next;
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_system_time_advances() {
    let a = now_from_system_time();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let b = now_from_system_time();
    assert!(b > a);
}

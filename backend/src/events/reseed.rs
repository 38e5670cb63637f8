//! Reseed event log
//!
//! Every time the global slot installs a new generator a [`ReseedEvent`] is
//! recorded. The log is bounded; the oldest entries are dropped first.
//!
//! # Example
//!
//! ```rust
//! use reseed_core_rs::events::{ReseedEvent, ReseedLog, ReseedReason};
//!
//! let mut log = ReseedLog::with_capacity(2);
//! for generation in 1..=3 {
//!     log.log(ReseedEvent {
//!         generation,
//!         pid: 100,
//!         timestamp_us: 0,
//!         reason: ReseedReason::Explicit,
//!         seeded: false,
//!     });
//! }
//! assert_eq!(log.len(), 2);
//! assert_eq!(log.last().unwrap().generation, 3);
//! ```

use std::collections::VecDeque;

use serde::Serialize;

/// Default number of events kept by the global slot
pub const DEFAULT_LOG_CAPACITY: usize = 64;

/// Why a generator was installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReseedReason {
    /// `global_reseed()` called by the application
    Explicit,
    /// `reseed_after_fork()` called by the application
    AfterFork,
    /// Pid changed under `ForkPolicy::ReseedOnPidChange`
    PidChanged,
    /// `configure()` with an explicit seed
    Configured,
}

/// One generator installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReseedEvent {
    /// Slot generation after the install (starts at 1)
    pub generation: u64,
    /// Process that performed the install
    pub pid: i32,
    /// Wall-clock microseconds since the Unix epoch
    pub timestamp_us: i64,
    pub reason: ReseedReason,
    /// True if the new generator came from an explicit seed
    pub seeded: bool,
}

/// Bounded history of [`ReseedEvent`]s
#[derive(Debug, Clone)]
pub struct ReseedLog {
    events: VecDeque<ReseedEvent>,
    capacity: usize,
}

impl ReseedLog {
    /// Create an empty log keeping at most `capacity` events
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add an event, evicting the oldest one when full
    pub fn log(&mut self, event: ReseedEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Change the capacity, dropping the oldest events if needed
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn set_capacity(&mut self, capacity: usize) {
        assert!(capacity > 0, "capacity must be positive");
        while self.events.len() > capacity {
            self.events.pop_front();
        }
        self.capacity = capacity;
    }

    /// Maximum number of events retained
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of events retained
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Most recent event
    pub fn last(&self) -> Option<&ReseedEvent> {
        self.events.back()
    }

    /// Retained events, oldest first
    pub fn events(&self) -> Vec<ReseedEvent> {
        self.events.iter().cloned().collect()
    }

    /// Events with the given reason
    pub fn events_of_reason(&self, reason: ReseedReason) -> Vec<&ReseedEvent> {
        self.events.iter().filter(|e| e.reason == reason).collect()
    }

    /// Serialize the retained events as a JSON array
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.events)
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for ReseedLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(generation: u64, reason: ReseedReason) -> ReseedEvent {
        ReseedEvent {
            generation,
            pid: 1,
            timestamp_us: 1_700_000_000_000_000,
            reason,
            seeded: false,
        }
    }

    #[test]
    fn test_filter_by_reason() {
        let mut log = ReseedLog::default();
        log.log(event(1, ReseedReason::Explicit));
        log.log(event(2, ReseedReason::AfterFork));
        log.log(event(3, ReseedReason::Explicit));

        let explicit = log.events_of_reason(ReseedReason::Explicit);
        assert_eq!(explicit.len(), 2);
        assert_eq!(explicit[1].generation, 3);
    }

    #[test]
    fn test_to_json() {
        let mut log = ReseedLog::default();
        log.log(event(1, ReseedReason::PidChanged));

        let json = log.to_json().unwrap();
        assert!(json.contains("\"reason\":\"pid_changed\""));
        assert!(json.contains("\"generation\":1"));
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn test_zero_capacity_panics() {
        ReseedLog::with_capacity(0);
    }

    #[test]
    fn test_shrink_capacity_keeps_newest() {
        let mut log = ReseedLog::with_capacity(4);
        for generation in 1..=4 {
            log.log(event(generation, ReseedReason::Explicit));
        }
        log.set_capacity(2);

        let generations: Vec<u64> = log.events().iter().map(|e| e.generation).collect();
        assert_eq!(generations, vec![3, 4]);
        assert_eq!(log.capacity(), 2);
    }

    #[test]
    fn test_clear() {
        let mut log = ReseedLog::default();
        log.log(event(1, ReseedReason::Configured));
        log.clear();
        assert!(log.is_empty());
        assert!(log.last().is_none());
    }
}

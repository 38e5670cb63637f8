//! Configuration for the process-wide generator
//!
//! # Example
//! ```
//! use reseed_core_rs::{ForkPolicy, SeederConfig};
//!
//! let config = SeederConfig::from_json(r#"{"fork_policy": "reseed_on_pid_change"}"#).unwrap();
//! assert_eq!(config.seed, None);
//! assert_eq!(config.fork_policy, ForkPolicy::ReseedOnPidChange);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SeederError;
use crate::events::DEFAULT_LOG_CAPACITY;
use crate::rng::{seed_from_f64, SeedError};

/// What the global slot does when it notices it runs in a forked child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForkPolicy {
    /// Nothing; the caller must call `reseed_after_fork()` in the child
    #[default]
    Manual,
    /// Every ambient draw compares `getpid()` with the pid that installed
    /// the current generator and reseeds first if they differ
    ReseedOnPidChange,
}

/// Global slot configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeederConfig {
    /// Explicit seed for a reproducible ambient stream; `None` keeps the
    /// current generator (or the host default if none is installed)
    pub seed: Option<i64>,

    pub fork_policy: ForkPolicy,

    /// Number of reseed events kept in the history
    pub log_capacity: usize,
}

impl Default for SeederConfig {
    fn default() -> Self {
        Self {
            seed: None,
            fork_policy: ForkPolicy::Manual,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

/// Wire form, before seed validation
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSeederConfig {
    #[serde(default)]
    seed: Option<serde_json::Number>,
    #[serde(default)]
    fork_policy: ForkPolicy,
    #[serde(default = "default_log_capacity")]
    log_capacity: usize,
}

fn default_log_capacity() -> usize {
    DEFAULT_LOG_CAPACITY
}

/// Validate a JSON number as an explicit seed
fn seed_from_number(number: &serde_json::Number) -> Result<i64, SeedError> {
    if let Some(seed) = number.as_i64() {
        return Ok(seed);
    }
    // u64 above i64::MAX, or a float
    seed_from_f64(number.as_f64().unwrap_or(f64::NAN))
}

impl SeederConfig {
    /// Parse and validate a JSON configuration
    ///
    /// All fields are optional. Integral floats (`"seed": 3.0`) are accepted.
    ///
    /// # Errors
    /// - `SeederError::InvalidConfig` for malformed JSON, unknown fields or a
    ///   zero `log_capacity`
    /// - `SeederError::InvalidSeed` for fractional or out-of-range seeds
    pub fn from_json(json: &str) -> Result<Self, SeederError> {
        let raw: RawSeederConfig = serde_json::from_str(json)
            .map_err(|e| SeederError::InvalidConfig(format!("Config parse failed: {}", e)))?;

        let seed = raw.seed.as_ref().map(seed_from_number).transpose()?;

        let config = Self {
            seed,
            fork_policy: raw.fork_policy,
            log_capacity: raw.log_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that the type system does not enforce
    pub fn validate(&self) -> Result<(), SeederError> {
        if self.log_capacity == 0 {
            return Err(SeederError::InvalidConfig(
                "log_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Serialize back to JSON
    pub fn to_json(&self) -> Result<String, SeederError> {
        serde_json::to_string(self)
            .map_err(|e| SeederError::InvalidConfig(format!("Config serialization failed: {}", e)))
    }
}

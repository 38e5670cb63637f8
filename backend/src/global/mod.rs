//! Process-wide generator and fork-safety coordination

mod fork;
mod slot;

#[cfg(unix)]
pub use fork::fork_and_reseed;
pub use fork::reseed_after_fork;
pub use slot::{
    configure, fork_policy, generation, global_reseed, is_installed, random, reseed_history,
    try_random, uninstall, Ambient,
};

//! Reseed history for the process-wide generator

mod reseed;

pub use reseed::{ReseedEvent, ReseedLog, ReseedReason, DEFAULT_LOG_CAPACITY};

//! Process-level utilities shared by the generator and its tests

pub mod time;

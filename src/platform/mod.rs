// DayLog - platform/mod.rs
//
// Platform abstraction layer: wall clock, process/thread ids, filesystem
// enumeration, configuration paths.

pub mod clock;
pub mod config;
pub mod fs;
pub mod process;

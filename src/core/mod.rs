// DayLog - core/mod.rs
//
// Core logging logic: data model, level policy, record formatting, file
// rotation, and target flushing. No store state, no configuration loading.

pub mod format;
pub mod model;
pub mod policy;
pub mod rotation;
pub mod writer;

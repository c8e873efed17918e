// DayLog - app/mod.rs
//
// Application layer: the log store service, history parsing, call-site macros.
// Dependencies: core, platform, util.

pub mod history;
pub mod macros;
pub mod store;

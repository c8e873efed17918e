// DayLog - lib.rs
//
// Library entry point. The binary in `main.rs` is a thin CLI over the same
// modules.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use app::store::{list_log_files, LogStore, StoreConfig};
pub use core::model::{LogFormat, LogLevel, LogTarget, RotationPolicy, Settings, SourceLocation};

// DayLog - app/macros.rs
//
// Call-site capture for store writes.

/// The `SourceLocation` of the macro invocation: `file!()`,
/// `module_path!()` (standing in for the function name) and `line!()`.
#[macro_export]
macro_rules! source_location {
    () => {
        $crate::core::model::SourceLocation::new(file!(), module_path!(), line!())
    };
}

/// Write a formatted message to a store, tagged with the call site.
///
/// ```no_run
/// use daylog::app::store::{LogStore, StoreConfig};
/// use daylog::core::model::{LogFormat, LogLevel, LogTarget};
///
/// let store = LogStore::new(StoreConfig::default());
/// store.init(LogLevel::Info, LogTarget::FILE, LogFormat::Txt).unwrap();
/// let image = "cal.png";
/// daylog::daylog!(store, LogLevel::Info, "selected image {image} for calibration");
/// ```
#[macro_export]
macro_rules! daylog {
    ($store:expr, $level:expr, $($arg:tt)+) => {
        $store.write_fmt($level, $crate::source_location!(), format_args!($($arg)+))
    };
}

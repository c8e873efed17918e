// DayLog - util/constants.rs
//
// Single source of truth for named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "DayLog";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "DayLog";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Log file naming
// =============================================================================

/// Base name of rotated log files: `<dir>/<base>-<YYYY-MM-DD>.<ext>`.
pub const DEFAULT_BASE_NAME: &str = "Log";

/// Separator between the base name and the date in a log file name.
pub const DATE_SEPARATOR: char = '-';

/// Extension for plain-text log files (without the dot).
pub const TXT_EXTENSION: &str = "txt";

/// Extension for CSV log files (without the dot).
pub const CSV_EXTENSION: &str = "csv";

/// Glob patterns matched when enumerating log files in a directory.
pub const LOG_FILE_PATTERNS: &[&str] = &["*.txt", "*.csv"];

/// Maximum length of a configured base name. Keeps rotated file names well
/// inside every supported filesystem's name limit.
pub const MAX_BASE_NAME_LEN: usize = 64;

// =============================================================================
// Timestamps
// =============================================================================

/// chrono format of the record timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// chrono format of the date part used for rotation.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the `YYYY-MM-DD` prefix of a timestamp.
pub const DATE_LENGTH: usize = 10;

/// Pattern a `read_by_date` argument must match in full.
pub const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

// =============================================================================
// Record layout
// =============================================================================

/// Header row written once at the top of every CSV log file.
pub const CSV_HEADER: &str = "time,level,pid,tid,file,function:line,message";

/// Number of columns in a CSV record row.
pub const CSV_COLUMNS: usize = 7;

/// Initial capacity of the staging buffer. Sized for a typical record so
/// most writes never reallocate.
pub const STAGING_BUFFER_CAPACITY: usize = 512;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default level for the crate's own diagnostics (tracing).
pub const DEFAULT_DIAGNOSTIC_LEVEL: &str = "warn";

/// Levels accepted for the crate's own diagnostics.
pub const DIAGNOSTIC_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

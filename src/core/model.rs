// DayLog - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no platform
// dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

// =============================================================================
// Level
// =============================================================================

/// Severity levels in rank order.
///
/// A record is kept when its level is at or below the configured level, so
/// `Info` (the highest rank) records everything and `Error` records only
/// errors. `None` is a sentinel: configured, it records nothing; requested,
/// it is never recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum LogLevel {
    #[default]
    None,
    Error,
    Warning,
    Debug,
    Info,
}

impl LogLevel {
    /// Returns all recordable levels in rank order.
    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Error,
            LogLevel::Warning,
            LogLevel::Debug,
            LogLevel::Info,
        ]
    }

    /// Label written into records.
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::None => "NONE",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a level, target, format or rotation string is not
/// recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown {} '{}' (expected {})",
            self.kind, self.value, self.expected
        )
    }
}

impl std::error::Error for UnknownOption {}

impl FromStr for LogLevel {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(LogLevel::None),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            _ => Err(UnknownOption {
                kind: "level",
                value: s.to_string(),
                expected: "none, error, warning, debug, info",
            }),
        }
    }
}

// =============================================================================
// Target
// =============================================================================

/// Bitmask of output destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LogTarget(u8);

impl LogTarget {
    pub const NONE: LogTarget = LogTarget(0b00);
    pub const CONSOLE: LogTarget = LogTarget(0b01);
    pub const FILE: LogTarget = LogTarget(0b10);
    pub const CONSOLE_AND_FILE: LogTarget = LogTarget(0b11);

    /// Raw bit pattern.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Build a target from raw bits, dropping unknown bits.
    pub fn from_bits_truncate(bits: u8) -> Self {
        LogTarget(bits & Self::CONSOLE_AND_FILE.0)
    }

    /// True when every bit of `other` is set in `self`.
    pub fn contains(self, other: LogTarget) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }
}

impl BitOr for LogTarget {
    type Output = LogTarget;

    fn bitor(self, rhs: LogTarget) -> LogTarget {
        LogTarget(self.0 | rhs.0)
    }
}

impl BitOrAssign for LogTarget {
    fn bitor_assign(&mut self, rhs: LogTarget) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for LogTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match *self {
            LogTarget::NONE => "none",
            LogTarget::CONSOLE => "console",
            LogTarget::FILE => "file",
            _ => "console+file",
        };
        f.write_str(label)
    }
}

impl FromStr for LogTarget {
    type Err = UnknownOption;

    /// Accepts `none`, `console`, `file`, `both`, or a `+`/`|`/`,` separated
    /// combination such as `console|file`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownOption {
            kind: "target",
            value: s.to_string(),
            expected: "none, console, file, both",
        };

        let mut target = LogTarget::NONE;
        for part in s.split(['+', '|', ',']) {
            target |= match part.trim().to_ascii_lowercase().as_str() {
                "none" => LogTarget::NONE,
                "console" => LogTarget::CONSOLE,
                "file" => LogTarget::FILE,
                "both" | "console_and_file" => LogTarget::CONSOLE_AND_FILE,
                _ => return Err(unknown()),
            };
        }
        Ok(target)
    }
}

// =============================================================================
// Format
// =============================================================================

/// On-disk shape of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogFormat {
    #[default]
    Txt,
    Csv,
}

impl LogFormat {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            LogFormat::Txt => constants::TXT_EXTENSION,
            LogFormat::Csv => constants::CSV_EXTENSION,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for LogFormat {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(LogFormat::Txt),
            "csv" => Ok(LogFormat::Csv),
            _ => Err(UnknownOption {
                kind: "format",
                value: s.to_string(),
                expected: "txt, csv",
            }),
        }
    }
}

// =============================================================================
// Rotation policy
// =============================================================================

/// How the active log file path is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPolicy {
    /// Resolve the path from the clock on every write. Day rollover is
    /// picked up by the first write after midnight.
    #[default]
    PerWrite,

    /// Resolve the path once at `init` and keep it for the store's lifetime.
    /// A long-running process keeps writing to the first day's file.
    Pinned,
}

impl fmt::Display for RotationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationPolicy::PerWrite => f.write_str("per-write"),
            RotationPolicy::Pinned => f.write_str("pinned"),
        }
    }
}

impl FromStr for RotationPolicy {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-write" | "per_write" | "daily" => Ok(RotationPolicy::PerWrite),
            "pinned" | "once" => Ok(RotationPolicy::Pinned),
            _ => Err(UnknownOption {
                kind: "rotation",
                value: s.to_string(),
                expected: "per-write, pinned",
            }),
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// The (level, target, format) triple read on every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub level: LogLevel,
    pub target: LogTarget,
    pub format: LogFormat,
}

impl Settings {
    pub fn new(level: LogLevel, target: LogTarget, format: LogFormat) -> Self {
        Self {
            level,
            target,
            format,
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// Call site of a log statement, supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation<'a> {
    pub file: &'a str,
    pub function: &'a str,
    pub line: u32,
}

impl<'a> SourceLocation<'a> {
    pub fn new(file: &'a str, function: &'a str, line: u32) -> Self {
        Self {
            file,
            function,
            line,
        }
    }
}

/// One log event, built per write and dropped once formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord<'a> {
    /// Local time as `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    pub level: LogLevel,
    pub pid: u32,
    pub tid: u64,
    pub location: SourceLocation<'a>,
    pub message: &'a str,
}

impl LogRecord<'_> {
    /// `YYYY-MM-DD` prefix of the timestamp.
    pub fn date(&self) -> &str {
        self.timestamp
            .get(..constants::DATE_LENGTH)
            .unwrap_or(&self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_rank_order() {
        assert!(LogLevel::None < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
    }

    #[test]
    fn test_level_parse_is_case_insensitive() {
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!(" Info ".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_target_bitmask() {
        let both = LogTarget::CONSOLE | LogTarget::FILE;
        assert_eq!(both, LogTarget::CONSOLE_AND_FILE);
        assert_eq!(both.bits(), 3);
        assert!(both.contains(LogTarget::FILE));
        assert!(both.contains(LogTarget::CONSOLE));
        assert!(!LogTarget::FILE.contains(LogTarget::CONSOLE));
        assert!(!LogTarget::NONE.contains(LogTarget::NONE));
        assert_eq!(LogTarget::from_bits_truncate(0xff), LogTarget::CONSOLE_AND_FILE);
    }

    #[test]
    fn test_target_parse_combinations() {
        assert_eq!("console|file".parse(), Ok(LogTarget::CONSOLE_AND_FILE));
        assert_eq!("file + console".parse(), Ok(LogTarget::CONSOLE_AND_FILE));
        assert_eq!("both".parse(), Ok(LogTarget::CONSOLE_AND_FILE));
        assert_eq!("none".parse(), Ok(LogTarget::NONE));
        assert!("printer".parse::<LogTarget>().is_err());
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(LogFormat::Txt.extension(), "txt");
        assert_eq!(LogFormat::Csv.extension(), "csv");
        assert_eq!("CSV".parse(), Ok(LogFormat::Csv));
    }

    #[test]
    fn test_record_date_prefix() {
        let record = LogRecord {
            timestamp: "2024-03-09 23:59:58".to_string(),
            level: LogLevel::Info,
            pid: 1,
            tid: 1,
            location: SourceLocation::new("a.rs", "f", 1),
            message: "m",
        };
        assert_eq!(record.date(), "2024-03-09");
    }
}

// DayLog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Logging failures never cross the write boundary as errors: `write` reports
// them as `false`. These types cover the fallible edges: history reads,
// listing, export, store initialisation, and configuration loading.
// Library calls return the specific type; the CLI collects them into
// `LogStoreError` with `?`.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all DayLog operations.
#[derive(Debug)]
pub enum LogStoreError {
    /// Reading a day's history failed.
    Read(ReadError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// The log directory could not be created.
    CreateDir { path: PathBuf, source: io::Error },

    /// Listing log files in a directory failed.
    List(ListError),

    /// Writing parsed history to an output stream failed.
    Export(ExportError),
}

impl fmt::Display for LogStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "Read error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::CreateDir { path, source } => write!(
                f,
                "Could not create log directory '{}': {source}",
                path.display()
            ),
            Self::List(e) => write!(f, "List error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for LogStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::CreateDir { source, .. } => Some(source),
            Self::List(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Read errors
// ---------------------------------------------------------------------------

/// Errors returned when reading a day's log history.
#[derive(Debug)]
pub enum ReadError {
    /// The date argument does not look like `YYYY-MM-DD`.
    InvalidDateFormat { date: String },

    /// No log file exists for the requested date.
    FileNotFound { path: PathBuf },

    /// The file exists but could not be read.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDateFormat { date } => {
                write!(f, "'{date}' is not a valid date. Expected YYYY-MM-DD")
            }
            Self::FileNotFound { path } => {
                write!(f, "No log file at '{}'", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ReadError> for LogStoreError {
    fn from(e: ReadError) -> Self {
        Self::Read(e)
    }
}

// ---------------------------------------------------------------------------
// List errors
// ---------------------------------------------------------------------------

/// Errors returned when enumerating log files.
#[derive(Debug)]
pub enum ListError {
    /// The directory does not exist.
    NotADirectory { path: PathBuf },

    /// The directory path could not be turned into a glob pattern.
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADirectory { path } => {
                write!(f, "'{}' is not a directory", path.display())
            }
            Self::Pattern { pattern, source } => {
                write!(f, "Invalid file pattern '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for ListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ListError> for LogStoreError {
    fn from(e: ListError) -> Self {
        Self::List(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors returned when exporting parsed history.
#[derive(Debug)]
pub enum ExportError {
    /// CSV serialisation failed.
    Csv { source: csv::Error },

    /// JSON serialisation failed.
    Json { source: serde_json::Error },

    /// Flushing the output failed.
    Io { source: io::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv { source } => write!(f, "CSV export failed: {source}"),
            Self::Json { source } => write!(f, "JSON export failed: {source}"),
            Self::Io { source } => write!(f, "Export output failed: {source}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source } => Some(source),
            Self::Json { source } => Some(source),
            Self::Io { source } => Some(source),
        }
    }
}

impl From<ExportError> for LogStoreError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is not one of the recognised options.
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::InvalidValue {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is not recognised. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogStoreError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for DayLog results.
pub type Result<T> = std::result::Result<T, LogStoreError>;

// DayLog - app/store.rs
//
// The log store: one explicit, cloneable service object that owns the
// settings, the staging buffer and the rotation state behind a single
// readers-writer lock.
//
// Concurrency:
//   - `write` takes the exclusive guard for the whole format-and-flush. The
//     staging buffer is one reused String, so all writers are serialised
//     through this critical section. Log throughput is bounded by it.
//   - `read_by_date` / `read_rows_by_date` take the shared guard: reads run
//     concurrently with each other but never alongside a write.
//   - Getters and setters take the lock briefly, so a write always sees a
//     complete (level, target, format) triple.
//
// Clones share state. An application wires one store at its composition
// root and hands clones to whoever logs. A per-thread setup is just one
// `LogStore::new` per thread.

use crate::app::history::{self, HistoryRow};
use crate::core::format;
use crate::core::model::{
    LogFormat, LogLevel, LogRecord, LogTarget, RotationPolicy, Settings, SourceLocation,
};
use crate::core::policy;
use crate::core::rotation;
use crate::core::writer::{self, ConsoleSink, StderrConsole};
use crate::platform::clock::{Clock, SystemClock};
use crate::platform::{fs, process};
use crate::util::constants;
use crate::util::error::{ListError, LogStoreError, ReadError};
use parking_lot::RwLock;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// =============================================================================
// Configuration
// =============================================================================

/// Where and how a store names its files. Fixed for the store's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory that receives the rotated files.
    pub directory: PathBuf,

    /// File name prefix: `<base_name>-<YYYY-MM-DD>.<ext>`.
    pub base_name: String,

    /// Whether the file date follows the clock or is fixed at `init`.
    pub rotation: RotationPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            directory: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            base_name: constants::DEFAULT_BASE_NAME.to_string(),
            rotation: RotationPolicy::PerWrite,
        }
    }
}

impl StoreConfig {
    /// Default naming in `directory`.
    pub fn in_dir(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Default::default()
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// Mutable state guarded by the store lock.
#[derive(Debug)]
struct StoreState {
    settings: Settings,
    initialized: bool,
    /// Most recently formatted record. Cleared at the start of every
    /// accepted write; never an accumulating history.
    buffer: String,
    /// Date fixed at the first `init` under `RotationPolicy::Pinned`.
    pinned_date: Option<String>,
}

struct Inner {
    config: StoreConfig,
    state: RwLock<StoreState>,
    clock: Arc<dyn Clock>,
    console: Arc<dyn ConsoleSink>,
}

/// Thread-safe handle to a log store.
#[derive(Clone)]
pub struct LogStore {
    inner: Arc<Inner>,
}

impl fmt::Debug for LogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("LogStore")
            .field("config", &self.inner.config)
            .field("settings", &state.settings)
            .field("initialized", &state.initialized)
            .finish()
    }
}

impl LogStore {
    /// Create an uninitialised store using the system clock and stderr.
    ///
    /// Until `init` is called the configured level is `None`, so every
    /// write is rejected.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_capabilities(config, Arc::new(SystemClock), Arc::new(StderrConsole))
    }

    /// Create a store with an injected clock and console sink.
    pub fn with_capabilities(
        config: StoreConfig,
        clock: Arc<dyn Clock>,
        console: Arc<dyn ConsoleSink>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                state: RwLock::new(StoreState {
                    settings: Settings::new(LogLevel::None, LogTarget::NONE, LogFormat::Txt),
                    initialized: false,
                    buffer: String::with_capacity(constants::STAGING_BUFFER_CAPACITY),
                    pinned_date: None,
                }),
                clock,
                console,
            }),
        }
    }

    /// Set level, target and format and make sure the log directory exists.
    ///
    /// Calling it again just replaces the settings. Under
    /// `RotationPolicy::Pinned` the file date is taken from the first call
    /// and kept afterwards.
    pub fn init(
        &self,
        level: LogLevel,
        target: LogTarget,
        format: LogFormat,
    ) -> Result<(), LogStoreError> {
        let dir = &self.inner.config.directory;
        std::fs::create_dir_all(dir).map_err(|e| LogStoreError::CreateDir {
            path: dir.clone(),
            source: e,
        })?;

        let mut state = self.inner.state.write();
        state.settings = Settings::new(level, target, format);
        state.initialized = true;
        if self.inner.config.rotation == RotationPolicy::Pinned && state.pinned_date.is_none() {
            let today = self.today();
            tracing::debug!(date = %today, "Pinned log file date");
            state.pinned_date = Some(today);
        }
        drop(state);

        tracing::info!(
            log_level = %level,
            log_target = %target,
            log_format = %format,
            dir = %dir.display(),
            rotation = %self.inner.config.rotation,
            "Log store initialised"
        );
        Ok(())
    }

    /// Record one message. Returns true if at least one target received it.
    ///
    /// Returns false without touching the staging buffer when the level is
    /// filtered out (or the store is uninitialised), and false when every
    /// enabled target failed.
    pub fn write(&self, level: LogLevel, location: SourceLocation<'_>, message: &str) -> bool {
        let mut guard = self.inner.state.write();
        let state = &mut *guard;

        if !policy::should_record(level, state.settings.level) {
            return false;
        }

        state.buffer.clear();

        let Settings { target, format, .. } = state.settings;
        let timestamp = self
            .inner
            .clock
            .now()
            .format(constants::TIMESTAMP_FORMAT)
            .to_string();
        let date = state
            .pinned_date
            .as_deref()
            .unwrap_or_else(|| rotation::date_of(&timestamp));
        let path = self.path_for(date, format);

        let is_first_write_to_file = format == LogFormat::Csv
            && target.contains(LogTarget::FILE)
            && !path.exists();

        let record = LogRecord {
            level,
            pid: process::pid(),
            tid: process::thread_id(),
            location,
            message,
            timestamp,
        };
        format::format_into(&mut state.buffer, &record, format, is_first_write_to_file);

        writer::flush(&state.buffer, target, &path, self.inner.console.as_ref())
    }

    /// `write` with a message built from format arguments.
    ///
    /// The message is only rendered when the level passes the filter.
    pub fn write_fmt(
        &self,
        level: LogLevel,
        location: SourceLocation<'_>,
        args: fmt::Arguments<'_>,
    ) -> bool {
        if !policy::should_record(level, self.level()) {
            return false;
        }
        match args.as_str() {
            Some(literal) => self.write(level, location, literal),
            None => self.write(level, location, &args.to_string()),
        }
    }

    /// Every line of the log file for `date` (`YYYY-MM-DD`), in write order.
    ///
    /// Uses the extension of the currently configured format.
    pub fn read_by_date(&self, date: &str) -> Result<Vec<String>, ReadError> {
        rotation::validate_date(date)?;
        let state = self.inner.state.read();
        rotation::read_by_date(
            &self.inner.config.directory,
            &self.inner.config.base_name,
            date,
            state.settings.format,
        )
    }

    /// The log file for `date` parsed back into records.
    pub fn read_rows_by_date(&self, date: &str) -> Result<Vec<HistoryRow>, ReadError> {
        rotation::validate_date(date)?;
        let state = self.inner.state.read();
        let format = state.settings.format;
        let path = self.path_for(date, format);
        history::read_rows(&path, format)
    }

    /// Log files in this store's directory.
    pub fn log_files(&self) -> Result<Vec<String>, ListError> {
        fs::list_log_files(&self.inner.config.directory)
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    pub fn settings(&self) -> Settings {
        self.inner.state.read().settings
    }

    pub fn level(&self) -> LogLevel {
        self.inner.state.read().settings.level
    }

    pub fn set_level(&self, level: LogLevel) {
        self.inner.state.write().settings.level = level;
    }

    pub fn target(&self) -> LogTarget {
        self.inner.state.read().settings.target
    }

    pub fn set_target(&self, target: LogTarget) {
        self.inner.state.write().settings.target = target;
    }

    pub fn format(&self) -> LogFormat {
        self.inner.state.read().settings.format
    }

    pub fn set_format(&self, format: LogFormat) {
        self.inner.state.write().settings.format = format;
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.state.read().initialized
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Path the next accepted write would go to.
    pub fn current_log_file(&self) -> PathBuf {
        let state = self.inner.state.read();
        let date = state.pinned_date.clone().unwrap_or_else(|| self.today());
        self.path_for(&date, state.settings.format)
    }

    /// Copy of the staging buffer: the last record formatted.
    pub fn last_record(&self) -> String {
        self.inner.state.read().buffer.clone()
    }

    fn today(&self) -> String {
        self.inner
            .clock
            .now()
            .format(constants::DATE_FORMAT)
            .to_string()
    }

    fn path_for(&self, date: &str, format: LogFormat) -> PathBuf {
        rotation::resolve_path(
            &self.inner.config.directory,
            &self.inner.config.base_name,
            date,
            format,
        )
    }
}

/// Log files directly inside `dir`. Needs no store.
pub fn list_log_files(dir: &Path) -> Result<Vec<String>, ListError> {
    fs::list_log_files(dir)
}

// DayLog - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::{LogFormat, LogLevel, LogTarget, RotationPolicy};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Resolved platform paths for DayLog configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/daylog/ or %APPDATA%\DayLog\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[store]` section.
    pub store: StoreSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[store]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// "none", "error", "warning", "debug" or "info".
    pub level: Option<String>,
    /// "none", "console", "file" or "both".
    pub target: Option<String>,
    /// "txt" or "csv".
    pub format: Option<String>,
    /// Directory that receives the rotated files.
    pub directory: Option<String>,
    /// File name prefix before the date.
    pub base_name: Option<String>,
    /// "per-write" or "pinned".
    pub rotation: Option<String>,
}

/// `[logging]` config section (DayLog's own diagnostics).
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Diagnostic level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated configuration derived from `config.toml`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub level: LogLevel,
    pub target: LogTarget,
    pub format: LogFormat,
    /// `None` means the current working directory.
    pub directory: Option<PathBuf>,
    pub base_name: String,
    pub rotation: RotationPolicy,
    /// Diagnostic level string for the tracing subscriber.
    pub diagnostic_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            target: LogTarget::FILE,
            format: LogFormat::Txt,
            directory: None,
            base_name: constants::DEFAULT_BASE_NAME.to_string(),
            rotation: RotationPolicy::PerWrite,
            diagnostic_level: None,
        }
    }
}

/// Parse an optional option string, recording a problem and keeping the
/// default when it is not recognised.
fn parse_field<T: FromStr>(
    raw: Option<&str>,
    field: &str,
    expected: &str,
    slot: &mut T,
    problems: &mut Vec<ConfigError>,
) {
    if let Some(value) = raw {
        match value.parse::<T>() {
            Ok(parsed) => *slot = parsed,
            Err(_) => problems.push(ConfigError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
                expected: expected.to_string(),
            }),
        }
    }
}

/// True if `name` can be used as a file name prefix.
pub fn is_valid_base_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= constants::MAX_BASE_NAME_LEN
        && !name.contains(['/', '\\'])
        && name != "."
        && name != ".."
}

/// Validate a parsed `RawConfig` into an `AppConfig`.
///
/// Every field is checked; invalid values are reported and replaced by
/// their defaults.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<ConfigError>) {
    let mut config = AppConfig::default();
    let mut problems = Vec::new();
    let store = raw.store;

    parse_field(
        store.level.as_deref(),
        "store.level",
        "none, error, warning, debug, info",
        &mut config.level,
        &mut problems,
    );
    parse_field(
        store.target.as_deref(),
        "store.target",
        "none, console, file, both",
        &mut config.target,
        &mut problems,
    );
    parse_field(
        store.format.as_deref(),
        "store.format",
        "txt, csv",
        &mut config.format,
        &mut problems,
    );
    parse_field(
        store.rotation.as_deref(),
        "store.rotation",
        "per-write, pinned",
        &mut config.rotation,
        &mut problems,
    );

    if let Some(dir) = store.directory.filter(|d| !d.is_empty()) {
        config.directory = Some(PathBuf::from(dir));
    }

    if let Some(name) = store.base_name {
        if is_valid_base_name(&name) {
            config.base_name = name;
        } else {
            problems.push(ConfigError::InvalidValue {
                field: "store.base_name".to_string(),
                value: name,
                expected: format!(
                    "1-{} characters without path separators",
                    constants::MAX_BASE_NAME_LEN
                ),
            });
        }
    }

    if let Some(level) = raw.logging.level {
        if constants::DIAGNOSTIC_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.diagnostic_level = Some(level);
        } else {
            problems.push(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: level,
                expected: constants::DIAGNOSTIC_LEVELS.join(", "),
            });
        }
    }

    (config, problems)
}

/// Load and validate the config file at `config_path`.
///
/// Returns the validated config and a list of non-fatal problems.
/// A missing file yields defaults with no problems (first run). An
/// unreadable or unparseable file yields defaults plus the error.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            return (
                AppConfig::default(),
                vec![ConfigError::Io {
                    path: config_path.to_path_buf(),
                    source: e,
                }],
            );
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            return (
                AppConfig::default(),
                vec![ConfigError::TomlParse {
                    path: config_path.to_path_buf(),
                    source: e,
                }],
            );
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let (config, problems) = validate(raw);
    if !problems.is_empty() {
        tracing::warn!(count = problems.len(), "Config validation produced warnings");
    }
    (config, problems)
}

// DayLog - core/rotation.rs
//
// Day-based file naming and history reads.
//
// A log file is `<dir>/<base>-<YYYY-MM-DD>.<ext>`. The date comes from the
// record timestamp (local time), so the file changes as soon as the date
// does. Which timestamp is used (every write, or the one at init) is the
// store's RotationPolicy; this module only maps dates to paths.

use crate::core::model::LogFormat;
use crate::util::constants;
use crate::util::error::ReadError;
use regex::Regex;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Build the path of the log file for `date`.
pub fn resolve_path(dir: &Path, base_name: &str, date: &str, format: LogFormat) -> PathBuf {
    dir.join(format!(
        "{base_name}{}{date}.{}",
        constants::DATE_SEPARATOR,
        format.extension()
    ))
}

/// `YYYY-MM-DD` prefix of a `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn date_of(timestamp: &str) -> &str {
    timestamp.get(..constants::DATE_LENGTH).unwrap_or(timestamp)
}

fn date_regex() -> &'static Regex {
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    DATE_RE.get_or_init(|| Regex::new(constants::DATE_PATTERN).expect("date pattern is valid"))
}

/// True if `date` is exactly four digits, dash, two digits, dash, two digits.
///
/// Only the shape is checked (`2024-13-45` passes); the value is used to
/// build a file name, never interpreted as a calendar date.
pub fn is_valid_date(date: &str) -> bool {
    date_regex().is_match(date)
}

/// Reject malformed dates before any filesystem access.
pub fn validate_date(date: &str) -> Result<(), ReadError> {
    if is_valid_date(date) {
        Ok(())
    } else {
        Err(ReadError::InvalidDateFormat {
            date: date.to_string(),
        })
    }
}

/// Read the log file for `date` line by line (line terminators stripped).
pub fn read_by_date(
    dir: &Path,
    base_name: &str,
    date: &str,
    format: LogFormat,
) -> Result<Vec<String>, ReadError> {
    validate_date(date)?;
    let path = resolve_path(dir, base_name, date, format);
    read_lines(&path)
}

/// Read every line of `path`, mapping a missing file to `FileNotFound`.
pub fn read_lines(path: &Path) -> Result<Vec<String>, ReadError> {
    let file = std::fs::File::open(path).map_err(|e| open_error(path, e))?;
    BufReader::new(file)
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| ReadError::Io {
            path: path.to_path_buf(),
            source: e,
        })
}

pub(crate) fn open_error(path: &Path, e: io::Error) -> ReadError {
    if e.kind() == io::ErrorKind::NotFound {
        ReadError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        ReadError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_path_layout() {
        let p = resolve_path(Path::new("/var/log/app"), "Log", "2024-01-31", LogFormat::Txt);
        assert_eq!(p, PathBuf::from("/var/log/app/Log-2024-01-31.txt"));
        let p = resolve_path(Path::new("logs"), "Svc", "2024-01-31", LogFormat::Csv);
        assert_eq!(p, PathBuf::from("logs/Svc-2024-01-31.csv"));
    }

    #[test]
    fn test_date_of_timestamp() {
        assert_eq!(date_of("2024-01-31 23:59:59"), "2024-01-31");
        assert_eq!(date_of("short"), "short");
    }

    #[test]
    fn test_date_validation() {
        assert!(is_valid_date("2024-01-01"));
        for bad in ["2024/01/01", "abcd", "", "2024-1-01", "x2024-01-01", "2024-01-01.txt"] {
            assert!(!is_valid_date(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_read_invalid_date_skips_filesystem() {
        // The directory does not exist; an invalid date must fail first.
        let err = read_by_date(Path::new("/nonexistent/daylog"), "Log", "../x", LogFormat::Txt)
            .unwrap_err();
        assert!(matches!(err, ReadError::InvalidDateFormat { .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_by_date(dir.path(), "Log", "2024-01-01", LogFormat::Txt).unwrap_err();
        assert!(matches!(err, ReadError::FileNotFound { .. }));
    }

    #[test]
    fn test_read_returns_lines_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = resolve_path(dir.path(), "Log", "2024-01-01", LogFormat::Csv);
        fs::write(&path, "one\ntwo\nthree\n").unwrap();
        let lines = read_by_date(dir.path(), "Log", "2024-01-01", LogFormat::Csv).unwrap();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }
}

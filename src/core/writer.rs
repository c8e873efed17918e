// DayLog - core/writer.rs
//
// Flushes the staging buffer to the enabled targets.
//
// Failure policy:
//   - A file that cannot be opened or written makes the FILE branch fail.
//     The failure is reported as a diagnostic and as `false`, never as a
//     panic or error crossing the write boundary.
//   - Console output is treated as always succeeding.
//   - The overall result is true if any enabled branch succeeded.

use crate::core::model::LogTarget;
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

// =============================================================================
// Console sinks
// =============================================================================

/// Destination for console output.
pub trait ConsoleSink: Send + Sync {
    /// Emit one formatted record. Failures are swallowed.
    fn emit(&self, text: &str);
}

/// Writes records to the process's standard error stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrConsole;

impl ConsoleSink for StderrConsole {
    fn emit(&self, text: &str) {
        let mut err = io::stderr().lock();
        let _ = err.write_all(text.as_bytes());
        let _ = err.flush();
    }
}

/// Keeps every emitted record in memory. Used by tests and by embedders
/// that display console output themselves.
#[derive(Debug, Default)]
pub struct CaptureConsole {
    lines: Mutex<Vec<String>>,
}

impl CaptureConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, one entry per record.
    pub fn records(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl ConsoleSink for CaptureConsole {
    fn emit(&self, text: &str) {
        self.lines.lock().push(text.to_string());
    }
}

// =============================================================================
// Flush
// =============================================================================

/// Append `buffer` to `file_path` (created if absent).
pub fn append_to_file(file_path: &Path, buffer: &str) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;
    file.write_all(buffer.as_bytes())?;
    file.flush()
}

/// Send `buffer` to every target enabled in `target`.
pub fn flush(
    buffer: &str,
    target: LogTarget,
    file_path: &Path,
    console: &dyn ConsoleSink,
) -> bool {
    let mut ok = false;

    if target.contains(LogTarget::FILE) {
        match append_to_file(file_path, buffer) {
            Ok(()) => ok = true,
            Err(e) => {
                tracing::warn!(
                    path = %file_path.display(),
                    error = %e,
                    "Log file could not be opened for append; record dropped"
                );
            }
        }
    }

    if target.contains(LogTarget::CONSOLE) {
        console.emit(buffer);
        ok = true;
    }

    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_file_target_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Log-2024-01-01.txt");
        let console = CaptureConsole::new();

        assert!(flush("a\n", LogTarget::FILE, &path, &console));
        assert!(flush("b\n", LogTarget::FILE, &path, &console));

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
        assert!(console.is_empty());
    }

    #[test]
    fn test_console_target_only_emits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Log-2024-01-01.txt");
        let console = CaptureConsole::new();

        assert!(flush("hello\n", LogTarget::CONSOLE, &path, &console));

        assert_eq!(console.records(), vec!["hello\n".to_string()]);
        assert!(!path.exists());
    }

    #[test]
    fn test_file_failure_reports_false() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory is missing, so the open fails.
        let path = dir.path().join("missing").join("Log-2024-01-01.txt");
        let console = CaptureConsole::new();

        assert!(!flush("x\n", LogTarget::FILE, &path, &console));
    }

    #[test]
    fn test_any_branch_success_is_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("Log-2024-01-01.txt");
        let console = CaptureConsole::new();

        assert!(flush("x\n", LogTarget::CONSOLE_AND_FILE, &path, &console));
        assert_eq!(console.len(), 1);
    }

    #[test]
    fn test_no_target_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Log-2024-01-01.txt");
        let console = CaptureConsole::new();

        assert!(!flush("x\n", LogTarget::NONE, &path, &console));
        assert!(console.is_empty());
        assert!(!path.exists());
    }
}

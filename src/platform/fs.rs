// DayLog - platform/fs.rs
//
// Log file enumeration. Lists `*.txt` and `*.csv` files directly inside a
// directory (no recursion). Touches no store state, so it needs no lock.

use crate::util::constants::LOG_FILE_PATTERNS;
use crate::util::error::ListError;
use std::collections::BTreeSet;
use std::path::Path;

/// File names (not paths) of every log file in `dir`, sorted by name.
///
/// Unreadable entries are skipped with a debug diagnostic.
pub fn list_log_files(dir: &Path) -> Result<Vec<String>, ListError> {
    if !dir.is_dir() {
        return Err(ListError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let mut names = BTreeSet::new();

    for pattern in LOG_FILE_PATTERNS {
        let full = format!("{escaped_dir}/{pattern}");
        let paths = glob::glob(&full).map_err(|e| ListError::Pattern {
            pattern: full.clone(),
            source: e,
        })?;

        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => {
                    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                        names.insert(name.to_string());
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable directory entry");
                }
            }
        }
    }

    Ok(names.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_lists_only_txt_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("Log-2024-01-02.txt"), "").unwrap();
        fs::write(root.join("Log-2024-01-01.csv"), "").unwrap();
        fs::write(root.join("notes.md"), "").unwrap();
        fs::write(root.join("app.log"), "").unwrap();
        fs::create_dir(root.join("nested.txt")).unwrap();

        let names = list_log_files(root).unwrap();
        assert_eq!(names, vec!["Log-2024-01-01.csv", "Log-2024-01-02.txt"]);
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_log_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = list_log_files(&dir.path().join("gone"));
        assert!(matches!(result, Err(ListError::NotADirectory { .. })));
    }
}

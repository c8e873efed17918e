// DayLog - core/format.rs
//
// Renders a LogRecord as a TXT block or a CSV row.
// Core layer: pure string building. Whether the target file already exists
// is decided by the caller and passed in.
//
// CSV rows are comma-joined without quoting. A comma in the function name
// or message produces extra columns, and a newline in the message spills
// onto following lines; `app::history` reassembles both when reading.

use crate::core::model::{LogFormat, LogRecord};
use crate::util::constants::CSV_HEADER;
use std::fmt::Write;

/// Render `record` into a fresh string.
pub fn format_record(
    record: &LogRecord<'_>,
    format: LogFormat,
    is_first_write_to_file: bool,
) -> String {
    let mut out = String::new();
    format_into(&mut out, record, format, is_first_write_to_file);
    out
}

/// Append the rendering of `record` to `buf`.
///
/// The store passes its staging buffer here after clearing it, so the
/// buffer's allocation is reused across writes.
pub fn format_into(
    buf: &mut String,
    record: &LogRecord<'_>,
    format: LogFormat,
    is_first_write_to_file: bool,
) {
    match format {
        LogFormat::Txt => write_txt(buf, record),
        LogFormat::Csv => {
            if is_first_write_to_file {
                buf.push_str(CSV_HEADER);
                buf.push('\n');
            }
            write_csv(buf, record);
        }
    }
}

// `write!` into a String cannot fail; the Results below are discarded.

fn write_txt(buf: &mut String, r: &LogRecord<'_>) {
    let _ = write!(
        buf,
        "\n [{}]  [{}]  [PID: {}]  [TID: {}]  [{}]  [{}:{}]\n{}\n",
        r.level.label(),
        r.timestamp,
        r.pid,
        r.tid,
        r.location.file,
        r.location.function,
        r.location.line,
        r.message,
    );
}

fn write_csv(buf: &mut String, r: &LogRecord<'_>) {
    let _ = writeln!(
        buf,
        "{},{},{},{},{},{}:{},{}",
        r.timestamp,
        r.level.label(),
        r.pid,
        r.tid,
        r.location.file,
        r.location.function,
        r.location.line,
        r.message,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{LogLevel, SourceLocation};

    fn record(message: &str) -> LogRecord<'_> {
        LogRecord {
            timestamp: "2024-05-01 08:30:00".to_string(),
            level: LogLevel::Info,
            pid: 4242,
            tid: 7,
            location: SourceLocation::new("a.cpp", "foo", 10),
            message,
        }
    }

    #[test]
    fn test_txt_layout() {
        let out = format_record(&record("hello"), LogFormat::Txt, false);
        assert_eq!(
            out,
            "\n [INFO]  [2024-05-01 08:30:00]  [PID: 4242]  [TID: 7]  [a.cpp]  [foo:10]\nhello\n"
        );
    }

    #[test]
    fn test_txt_ignores_first_write_flag() {
        let a = format_record(&record("x"), LogFormat::Txt, true);
        let b = format_record(&record("x"), LogFormat::Txt, false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_csv_row_without_header() {
        let out = format_record(&record("hello"), LogFormat::Csv, false);
        assert_eq!(out, "2024-05-01 08:30:00,INFO,4242,7,a.cpp,foo:10,hello\n");
    }

    #[test]
    fn test_csv_header_on_first_write() {
        let out = format_record(&record("hello"), LogFormat::Csv, true);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].ends_with(",hello"));
    }

    #[test]
    fn test_csv_does_not_escape_commas() {
        let out = format_record(&record("a,b"), LogFormat::Csv, false);
        assert!(out.ends_with(",foo:10,a,b\n"));
    }

    #[test]
    fn test_format_into_appends() {
        let mut buf = String::from("keep");
        format_into(&mut buf, &record("m"), LogFormat::Csv, false);
        assert!(buf.starts_with("keep2024-05-01"));
    }
}

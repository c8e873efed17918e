// DayLog - app/history.rs
//
// Parses a day's log file back into structured rows for viewers, and
// exports rows as properly quoted CSV or JSON.
//
// CSV files are written unquoted, so history is read line by line rather
// than through a CSV reader. A line starts a new record only when its first
// four columns parse as timestamp, level, pid and tid. Every other line is a
// continuation of the previous record's message (blank lines included).
// Within a record, the first column from the sixth on that ends in
// `:<digits>` closes the function field, so commas in function names or in
// the message are folded back. A comma in the file name is read as part of
// the function name.
//
// TXT files are split on their bracketed header lines. The blank line that
// precedes every header is a separator, not message content.

use crate::core::model::{LogFormat, LogLevel};
use crate::core::rotation;
use crate::util::constants::{CSV_COLUMNS, CSV_HEADER, TIMESTAMP_FORMAT};
use crate::util::error::{ExportError, ReadError};
use chrono::NaiveDateTime;
use regex::Regex;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

/// One record read back from a log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub time: String,
    pub level: String,
    pub pid: u32,
    pub tid: u64,
    pub file: String,
    pub function: String,
    pub line: u32,
    pub message: String,
}

/// Parse the file at `path` according to `format`.
pub fn read_rows(path: &Path, format: LogFormat) -> Result<Vec<HistoryRow>, ReadError> {
    let lines = rotation::read_lines(path)?;
    Ok(match format {
        LogFormat::Csv => parse_csv(&lines),
        LogFormat::Txt => parse_txt(&lines),
    })
}

// =============================================================================
// CSV
// =============================================================================

/// Parse CSV history lines (as returned by `read_by_date`).
pub fn parse_csv(lines: &[String]) -> Vec<HistoryRow> {
    let mut rows: Vec<HistoryRow> = Vec::new();
    for line in lines {
        if line == CSV_HEADER {
            continue;
        }
        match row_from_line(line) {
            Some(row) => rows.push(row),
            None => match rows.last_mut() {
                Some(prev) => {
                    prev.message.push('\n');
                    prev.message.push_str(line);
                }
                None => {
                    tracing::debug!(line = %line, "Skipping CSV line that precedes any record");
                }
            },
        }
    }
    rows
}

fn row_from_line(line: &str) -> Option<HistoryRow> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < CSV_COLUMNS {
        return None;
    }
    NaiveDateTime::parse_from_str(fields[0], TIMESTAMP_FORMAT).ok()?;
    fields[1].parse::<LogLevel>().ok()?;
    let pid = fields[2].parse().ok()?;
    let tid = fields[3].parse().ok()?;

    let end = (5..fields.len()).find(|&i| split_function_line(fields[i]).is_some())?;
    let (tail, line_no) = split_function_line(fields[end])?;
    let mut function = fields[5..end].join(",");
    if end > 5 {
        function.push(',');
    }
    function.push_str(tail);

    Some(HistoryRow {
        time: fields[0].to_string(),
        level: fields[1].to_string(),
        pid,
        tid,
        file: fields[4].to_string(),
        function,
        line: line_no,
        message: fields[end + 1..].join(","),
    })
}

/// Split `function:line` at the last colon, so `a::b:10` keeps its path.
fn split_function_line(s: &str) -> Option<(&str, u32)> {
    let (function, line) = s.rsplit_once(':')?;
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((function, line.parse().ok()?))
}

// =============================================================================
// TXT
// =============================================================================

fn txt_header_regex() -> &'static Regex {
    static HEADER_RE: OnceLock<Regex> = OnceLock::new();
    HEADER_RE.get_or_init(|| {
        Regex::new(
            r"^ \[(?P<level>[A-Z]+)\]  \[(?P<time>[^\]]+)\]  \[PID: (?P<pid>\d+)\]  \[TID: (?P<tid>\d+)\]  \[(?P<file>.*)\]  \[(?P<function>.*):(?P<line>\d+)\]$",
        )
        .expect("TXT header pattern is valid")
    })
}

/// Move the collected body lines into the last row's message.
///
/// `before_header` drops the blank separator line that precedes the next
/// record's header. The last block has no separator to drop.
fn close_block(rows: &mut [HistoryRow], body: &mut Vec<&str>, before_header: bool) {
    if let Some(row) = rows.last_mut() {
        if before_header && body.last() == Some(&"") {
            body.pop();
        }
        row.message = body.join("\n");
    }
    body.clear();
}

/// Parse TXT history lines (as returned by `read_by_date`).
pub fn parse_txt(lines: &[String]) -> Vec<HistoryRow> {
    let re = txt_header_regex();
    let mut rows: Vec<HistoryRow> = Vec::new();
    let mut body: Vec<&str> = Vec::new();

    for line in lines {
        let Some(caps) = re.captures(line) else {
            if !rows.is_empty() {
                body.push(line);
            }
            continue;
        };
        let (Ok(pid), Ok(tid), Ok(line_no)) = (
            caps["pid"].parse::<u32>(),
            caps["tid"].parse::<u64>(),
            caps["line"].parse::<u32>(),
        ) else {
            if !rows.is_empty() {
                body.push(line);
            }
            continue;
        };

        close_block(&mut rows, &mut body, true);
        rows.push(HistoryRow {
            time: caps["time"].to_string(),
            level: caps["level"].to_string(),
            pid,
            tid,
            file: caps["file"].to_string(),
            function: caps["function"].to_string(),
            line: line_no,
            message: String::new(),
        });
    }
    close_block(&mut rows, &mut body, false);
    rows
}

// =============================================================================
// Export
// =============================================================================

/// Write `rows` as quoted CSV with a header row. Returns the row count.
///
/// Unlike the day files themselves, the output escapes commas, quotes and
/// newlines, so any CSV reader can load it.
pub fn export_csv<W: Write>(rows: &[HistoryRow], writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer
            .serialize(row)
            .map_err(|e| ExportError::Csv { source: e })?;
    }
    csv_writer
        .flush()
        .map_err(|e| ExportError::Io { source: e })?;
    Ok(rows.len())
}

/// Write `rows` as a pretty-printed JSON array. Returns the row count.
pub fn export_json<W: Write>(rows: &[HistoryRow], writer: W) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, rows).map_err(|e| ExportError::Json { source: e })?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::format_record;
    use crate::core::model::{LogLevel, LogRecord, SourceLocation};

    fn record_at<'a>(i: usize, location: SourceLocation<'a>, message: &'a str) -> LogRecord<'a> {
        LogRecord {
            timestamp: format!("2024-05-01 10:00:0{i}"),
            level: LogLevel::Warning,
            pid: 100,
            tid: i as u64 + 1,
            location,
            message,
        }
    }

    fn render(format: LogFormat, messages: &[&str]) -> String {
        let mut out = String::new();
        for (i, msg) in messages.iter().enumerate() {
            let record = record_at(i, SourceLocation::new("src/main.rs", "app::run", 42), msg);
            out.push_str(&format_record(&record, format, i == 0));
        }
        out
    }

    fn lines_of(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_csv_round_trip_fields() {
        let rows = parse_csv(&lines_of(&render(LogFormat::Csv, &["first", "second"])));
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            HistoryRow {
                time: "2024-05-01 10:00:00".to_string(),
                level: "WARNING".to_string(),
                pid: 100,
                tid: 1,
                file: "src/main.rs".to_string(),
                function: "app::run".to_string(),
                line: 42,
                message: "first".to_string(),
            }
        );
        assert_eq!(rows[1].tid, 2);
    }

    #[test]
    fn test_csv_repairs_commas_newlines_and_quotes() {
        let text = render(LogFormat::Csv, &["a, b, c", "line one\nline two", "say \"hi\""]);
        let rows = parse_csv(&lines_of(&text));
        let messages: Vec<&str> = rows.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["a, b, c", "line one\nline two", "say \"hi\""]);
    }

    #[test]
    fn test_csv_keeps_blank_lines_in_message() {
        let text = render(LogFormat::Csv, &["a\n\nb", "next"]);
        let rows = parse_csv(&lines_of(&text));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].message, "a\n\nb");
        assert_eq!(rows[1].message, "next");
    }

    #[test]
    fn test_csv_comma_in_function_starts_own_record() {
        let mut text = String::new();
        let first = record_at(0, SourceLocation::new("f.rs", "f", 1), "first");
        text.push_str(&format_record(&first, LogFormat::Csv, true));
        let second = record_at(5, SourceLocation::new("a.rs", "convert<A, B>", 9), "second, again");
        text.push_str(&format_record(&second, LogFormat::Csv, false));

        let rows = parse_csv(&lines_of(&text));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].message, "first");
        assert_eq!(rows[1].file, "a.rs");
        assert_eq!(rows[1].function, "convert<A, B>");
        assert_eq!(rows[1].line, 9);
        assert_eq!(rows[1].message, "second, again");
    }

    #[test]
    fn test_csv_continuation_that_looks_numeric_stays_in_message() {
        let text = render(LogFormat::Csv, &["totals:\n1,2,3,4,5,6:7,8"]);
        let rows = parse_csv(&lines_of(&text));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].message, "totals:\n1,2,3,4,5,6:7,8");
    }

    #[test]
    fn test_txt_blocks() {
        let rows = parse_txt(&lines_of(&render(LogFormat::Txt, &["hello", "multi\n\nline"])));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].message, "hello");
        assert_eq!(rows[0].function, "app::run");
        assert_eq!(rows[0].line, 42);
        assert_eq!(rows[1].message, "multi\n\nline");
        assert_eq!(rows[1].level, "WARNING");
    }

    #[test]
    fn test_txt_trailing_newline_kept_on_every_record() {
        let rows = parse_txt(&lines_of(&render(LogFormat::Txt, &["ends\n", "also ends\n"])));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].message, "ends\n");
        assert_eq!(rows[1].message, "also ends\n");
    }

    #[test]
    fn test_txt_ignores_leading_noise() {
        let lines = vec!["garbage".to_string(), String::new()];
        assert!(parse_txt(&lines).is_empty());
    }

    #[test]
    fn test_read_rows_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_rows(&dir.path().join("Log-2024-01-01.csv"), LogFormat::Csv).unwrap_err();
        assert!(matches!(err, ReadError::FileNotFound { .. }));
    }

    #[test]
    fn test_export_csv_quotes_fields() {
        let rows = parse_csv(&lines_of(&render(LogFormat::Csv, &["a, \"b\"\nc"])));
        let mut out = Vec::new();
        assert_eq!(export_csv(&rows, &mut out).unwrap(), 1);

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("time,level,pid,tid,file,function,line,message")
        );
        assert!(text.ends_with(",42,\"a, \"\"b\"\"\nc\"\n"));

        let mut rdr = csv::Reader::from_reader(text.as_bytes());
        let back: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(back.len(), 1);
        assert_eq!(&back[0][7], "a, \"b\"\nc");
    }

    #[test]
    fn test_export_json_array() {
        let rows = parse_csv(&lines_of(&render(LogFormat::Csv, &["x"])));
        let mut out = Vec::new();
        assert_eq!(export_json(&rows, &mut out).unwrap(), 1);
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["message"], "x");
        assert_eq!(value[0]["tid"], 1);
    }
}

// DayLog - core/policy.rs
//
// Level gate applied before a record is built.
// Core layer: pure logic, no I/O.

use crate::core::model::LogLevel;

/// Decide whether a record at `requested` is kept under `configured`.
///
/// Fails closed: nothing is recorded when the configured level is `None`,
/// and a record requested at `None` is never written.
pub fn should_record(requested: LogLevel, configured: LogLevel) -> bool {
    if configured == LogLevel::None || requested == LogLevel::None {
        return false;
    }
    requested <= configured
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [LogLevel; 5] = [
        LogLevel::None,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Debug,
        LogLevel::Info,
    ];

    #[test]
    fn test_configured_none_rejects_everything() {
        for requested in ALL {
            assert!(!should_record(requested, LogLevel::None));
        }
    }

    #[test]
    fn test_requested_none_is_never_recorded() {
        for configured in ALL {
            assert!(!should_record(LogLevel::None, configured));
        }
    }

    #[test]
    fn test_records_at_or_below_configured_rank() {
        for configured in LogLevel::all() {
            for requested in LogLevel::all() {
                assert_eq!(
                    should_record(*requested, *configured),
                    requested <= configured,
                    "requested {requested}, configured {configured}"
                );
            }
        }
    }

    #[test]
    fn test_error_threshold_drops_info() {
        assert!(should_record(LogLevel::Error, LogLevel::Error));
        assert!(!should_record(LogLevel::Info, LogLevel::Error));
        assert!(!should_record(LogLevel::Warning, LogLevel::Error));
    }
}

//! Error types for the timesheet engine.
//!
//! Request-level failures (bad input, unavailable storage, malformed results)
//! are reported through [`EngineError`]. Per-record data problems never reach
//! the caller; they are logged and downgraded inside the batch.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced while parsing raw clock, schedule or date strings.
///
/// # Example
///
/// ```
/// use timesheet_engine::error::TimeParseError;
///
/// let error = TimeParseError::InvalidInstant {
///     input: "not-a-time".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid instant: 'not-a-time'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// The input was empty or only whitespace.
    #[error("Empty time value")]
    Empty,

    /// The input could not be read as a date and time.
    #[error("Invalid instant: '{input}'")]
    InvalidInstant {
        /// The rejected input.
        input: String,
    },

    /// The input could not be read as a time of day.
    #[error("Invalid time of day: '{input}'")]
    InvalidTimeOfDay {
        /// The rejected input.
        input: String,
    },

    /// The input could not be read as a calendar date.
    #[error("Invalid calendar date: '{input}'")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },
}

/// The main error type for the timesheet engine.
///
/// # Example
///
/// ```
/// use timesheet_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A request date could not be parsed.
    #[error("Invalid date for '{field}': {source}")]
    InvalidDate {
        /// The request field holding the bad value.
        field: String,
        /// The underlying parse failure.
        #[source]
        source: TimeParseError,
    },

    /// The requested date range is empty or inverted.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// The requested first day.
        start: NaiveDate,
        /// The requested last day.
        end: NaiveDate,
    },

    /// A raw time value failed to parse.
    #[error(transparent)]
    TimeParse(#[from] TimeParseError),

    /// A second schedule was created for an employee who already has one on that date.
    #[error("Schedule already exists for employee {employee_id} on {date}")]
    DuplicateSchedule {
        /// The employee owning both schedules.
        employee_id: i64,
        /// The contested calendar date.
        date: NaiveDate,
    },

    /// The storage collaborator could not serve a read.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// A per-record calculation failed.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// The aggregator produced something other than a plain object.
    #[error("Structural error: {message}")]
    StructuralError {
        /// A description of what was malformed.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_date_displays_field_and_source() {
        let error = EngineError::InvalidDate {
            field: "start_date".to_string(),
            source: TimeParseError::InvalidDate {
                input: "2024-13-01".to_string(),
            },
        };
        assert_eq!(
            error.to_string(),
            "Invalid date for 'start_date': Invalid calendar date: '2024-13-01'"
        );
    }

    #[test]
    fn test_invalid_date_range_displays_bounds() {
        let error = EngineError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range: 2024-01-10 is after 2024-01-05"
        );
    }

    #[test]
    fn test_duplicate_schedule_displays_employee_and_date() {
        let error = EngineError::DuplicateSchedule {
            employee_id: 7,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Schedule already exists for employee 7 on 2024-01-05"
        );
    }

    #[test]
    fn test_time_parse_error_converts_transparently() {
        let error: EngineError = TimeParseError::Empty.into();
        assert_eq!(error.to_string(), "Empty time value");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
        assert_error::<TimeParseError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_storage_error() -> EngineResult<()> {
            Err(EngineError::Storage {
                message: "connection refused".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_storage_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

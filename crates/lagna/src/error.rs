use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Fatal errors from chart computation.
///
/// Provider failures never surface here; they degrade the chart instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid date/time '{date} {time}': {message}")]
    InvalidTimeFormat {
        date: String,
        time: String,
        message: String,
    },
    #[error("Birth input rejected: {0}")]
    ValidationFailed(ValidationErrors),
}

impl From<ValidationErrors> for ChartError {
    fn from(errors: ValidationErrors) -> Self {
        ChartError::ValidationFailed(errors)
    }
}

/// A single problem with a caller-supplied birth input.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Violation {
    #[error("date is required")]
    DateRequired,
    #[error("time is required")]
    TimeRequired,
    #[error("date '{value}' is not a calendar date (expected YYYY-MM-DD)")]
    DateUnparseable { value: String },
    #[error("time '{value}' is not a clock time (expected HH:MM or HH:MM:SS)")]
    TimeUnparseable { value: String },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Every violation found in one birth input, in field order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_display_joins_all() {
        let errors = ValidationErrors::new(vec![
            Violation::DateRequired,
            Violation::OutOfRange {
                field: "latitude",
                value: 91.0,
                min: -90.0,
                max: 90.0,
            },
        ]);
        assert_eq!(
            errors.to_string(),
            "date is required; latitude 91 is outside [-90, 90]"
        );
    }

    #[test]
    fn test_chart_error_wraps_violations() {
        let err: ChartError = ValidationErrors::new(vec![Violation::TimeRequired]).into();
        assert_eq!(err.to_string(), "Birth input rejected: time is required");
    }
}

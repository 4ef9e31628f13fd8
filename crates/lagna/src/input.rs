//! Caller-supplied birth data and the checks run before any computation.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationErrors, Violation};
use crate::time::{parse_civil_date, parse_civil_time};

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);
pub const UTC_OFFSET_RANGE: (f64, f64) = (-12.0, 14.0);

/// Birth details as supplied by the caller.
///
/// Accepts both the descriptive field names and the short keys used by
/// request bodies (`date`, `time`, `lat`, `lon`, `tz`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthInput {
    /// Local calendar date, `YYYY-MM-DD`
    #[serde(alias = "date")]
    pub civil_date: String,
    /// Local clock time, `HH:MM` or `HH:MM:SS`
    #[serde(alias = "time")]
    pub civil_time: String,
    #[serde(alias = "lat")]
    pub latitude_deg: f64,
    #[serde(alias = "lon")]
    pub longitude_deg: f64,
    /// Hours east of UTC (5.5 for IST)
    #[serde(alias = "tz")]
    pub utc_offset_hours: f64,
}

impl BirthInput {
    pub fn new(
        civil_date: impl Into<String>,
        civil_time: impl Into<String>,
        latitude_deg: f64,
        longitude_deg: f64,
        utc_offset_hours: f64,
    ) -> Self {
        Self {
            civil_date: civil_date.into(),
            civil_time: civil_time.into(),
            latitude_deg,
            longitude_deg,
            utc_offset_hours,
        }
    }

    /// Check every field and report all problems at once.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut violations = Vec::new();

        if self.civil_date.trim().is_empty() {
            violations.push(Violation::DateRequired);
        } else if parse_civil_date(&self.civil_date).is_none() {
            violations.push(Violation::DateUnparseable {
                value: self.civil_date.clone(),
            });
        }

        if self.civil_time.trim().is_empty() {
            violations.push(Violation::TimeRequired);
        } else if parse_civil_time(&self.civil_time).is_none() {
            violations.push(Violation::TimeUnparseable {
                value: self.civil_time.clone(),
            });
        }

        check_range(&mut violations, "latitude", self.latitude_deg, LATITUDE_RANGE);
        check_range(&mut violations, "longitude", self.longitude_deg, LONGITUDE_RANGE);
        check_range(
            &mut violations,
            "utcOffset",
            self.utc_offset_hours,
            UTC_OFFSET_RANGE,
        );

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(violations))
        }
    }
}

fn check_range(out: &mut Vec<Violation>, field: &'static str, value: f64, (min, max): (f64, f64)) {
    if !value.is_finite() {
        out.push(Violation::NotFinite { field });
    } else if value < min || value > max {
        out.push(Violation::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_passes() {
        let input = BirthInput::new("1990-05-21", "14:35", 12.97, 77.59, 5.5);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let input = BirthInput::new("1990-05-21", "00:00:00", -90.0, 180.0, 14.0);
        assert!(input.validate().is_ok());
        let input = BirthInput::new("1990-05-21", "23:59", 90.0, -180.0, -12.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_collects_every_violation() {
        let input = BirthInput::new("", "25:61", 95.0, f64::NAN, 15.0);
        let errors = input.validate().unwrap_err();
        assert_eq!(
            errors.violations(),
            &[
                Violation::DateRequired,
                Violation::TimeUnparseable {
                    value: "25:61".to_string()
                },
                Violation::OutOfRange {
                    field: "latitude",
                    value: 95.0,
                    min: -90.0,
                    max: 90.0
                },
                Violation::NotFinite { field: "longitude" },
                Violation::OutOfRange {
                    field: "utcOffset",
                    value: 15.0,
                    min: -12.0,
                    max: 14.0
                },
            ]
        );
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let input = BirthInput::new("   ", " ", 0.0, 0.0, 0.0);
        let errors = input.validate().unwrap_err();
        assert_eq!(
            errors.violations(),
            &[Violation::DateRequired, Violation::TimeRequired]
        );
    }

    #[test]
    fn test_impossible_calendar_date_is_rejected() {
        let input = BirthInput::new("1990-02-30", "12:00", 0.0, 0.0, 0.0);
        let errors = input.validate().unwrap_err();
        assert!(matches!(
            errors.violations(),
            [Violation::DateUnparseable { .. }]
        ));
    }

    #[test]
    fn test_unpadded_fields_and_leap_second_are_rejected() {
        let input = BirthInput::new("1990-5-1", "14:35:60", 0.0, 0.0, 0.0);
        let errors = input.validate().unwrap_err();
        assert_eq!(
            errors.violations(),
            &[
                Violation::DateUnparseable {
                    value: "1990-5-1".to_string()
                },
                Violation::TimeUnparseable {
                    value: "14:35:60".to_string()
                },
            ]
        );
    }
}

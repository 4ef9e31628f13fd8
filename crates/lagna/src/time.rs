//! Civil time normalization.
//!
//! Turns a local calendar date, clock time and numeric UTC offset into an
//! absolute [`Instant`]. The caller's offset is authoritative; no timezone
//! database is consulted, so DST is whatever the caller says it is.

use std::fmt;

use chrono::{
    DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc,
};
use serde::Serialize;

use crate::error::ChartError;
use crate::input::BirthInput;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: &[(&str, &str)] = &[("%H:%M:%S", "dd:dd:dd"), ("%H:%M", "dd:dd")];
const DATE_SHAPE: &str = "dddd-dd-dd";

/// An absolute, offset-free point in time (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }

    /// Julian Day (UT) on the Gregorian calendar.
    ///
    /// Providers backed by an ephemeris library should prefer the library's
    /// own calendar conversion.
    pub fn julian_day(&self) -> f64 {
        let dt = self.0;
        let hour_decimal = dt.hour() as f64
            + dt.minute() as f64 / 60.0
            + (dt.second() as f64 + dt.nanosecond() as f64 / 1e9) / 3600.0;

        let (mut year, mut month) = (dt.year() as f64, dt.month() as f64);
        if month <= 2.0 {
            year -= 1.0;
            month += 12.0;
        }
        let a = (year / 100.0).floor();
        let b = 2.0 - a + (a / 4.0).floor();

        (365.25 * (year + 4716.0)).floor()
            + (30.6001 * (month + 1.0)).floor()
            + dt.day() as f64
            + b
            - 1524.5
            + hour_decimal / 24.0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%SZ"))
    }
}

/// `d` in `shape` stands for an ASCII digit; every other byte must match.
/// chrono alone accepts unpadded fields such as `1990-5-1` or `1:2`.
fn has_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(v, s)| match s {
            b'd' => v.is_ascii_digit(),
            _ => v == s,
        })
}

pub(crate) fn parse_civil_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    if !has_shape(date, DATE_SHAPE) {
        return None;
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

pub(crate) fn parse_civil_time(time: &str) -> Option<NaiveTime> {
    let time = time.trim();
    TIME_FORMATS
        .iter()
        .filter(|(_, shape)| has_shape(time, shape))
        .find_map(|(fmt, _)| NaiveTime::parse_from_str(time, fmt).ok())
        // chrono reads second 60 as a leap second
        .filter(|t| t.nanosecond() < 1_000_000_000)
}

/// `civil date+time - utc_offset_hours`, as an absolute instant.
pub fn normalize(input: &BirthInput) -> Result<Instant, ChartError> {
    let invalid = |message: &str| ChartError::InvalidTimeFormat {
        date: input.civil_date.clone(),
        time: input.civil_time.clone(),
        message: message.to_string(),
    };

    let date = parse_civil_date(&input.civil_date)
        .ok_or_else(|| invalid("date does not parse as YYYY-MM-DD"))?;
    let time = parse_civil_time(&input.civil_time)
        .ok_or_else(|| invalid("time does not parse as HH:MM or HH:MM:SS"))?;

    if !input.utc_offset_hours.is_finite() {
        return Err(invalid("UTC offset is not a finite number"));
    }
    let offset = TimeDelta::try_seconds((input.utc_offset_hours * 3600.0).round() as i64)
        .ok_or_else(|| invalid("UTC offset is outside the supported range"))?;

    NaiveDateTime::new(date, time)
        .checked_sub_signed(offset)
        .map(|naive| Instant(naive.and_utc()))
        .ok_or_else(|| invalid("shifted instant is outside the supported calendar range"))
}

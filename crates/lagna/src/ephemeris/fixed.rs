//! Table-backed ephemeris provider.
//!
//! Serves the same precomputed values for every instant. Used when positions
//! come from an upstream service or a configuration snapshot, and as the
//! deterministic provider in tests and benchmarks.

use std::collections::HashMap;

use crate::ephemeris::types::{Body, EphemerisError, EphemerisProvider};
use crate::geometry::normalize_360;
use crate::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct StaticEphemeris {
    sidereal_time_hours: Option<f64>,
    obliquity_deg: Option<f64>,
    bodies: HashMap<Body, f64>,
}

impl StaticEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sidereal_time(mut self, hours: f64) -> Self {
        self.sidereal_time_hours = Some(hours);
        self
    }

    pub fn with_obliquity(mut self, degrees: f64) -> Self {
        self.obliquity_deg = Some(degrees);
        self
    }

    pub fn with_body(mut self, body: Body, longitude_deg: f64) -> Self {
        self.bodies.insert(body, normalize_360(longitude_deg));
        self
    }

    /// Build from body names as written in configuration ("sun", "Mars").
    pub fn from_named<'a, I>(
        sidereal_time_hours: Option<f64>,
        obliquity_deg: Option<f64>,
        bodies: I,
    ) -> Result<Self, EphemerisError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut table = Self {
            sidereal_time_hours,
            obliquity_deg,
            bodies: HashMap::new(),
        };
        for (name, longitude) in bodies {
            let body: Body = name.parse()?;
            table = table.with_body(body, longitude);
        }
        Ok(table)
    }
}

impl EphemerisProvider for StaticEphemeris {
    fn body_longitude(&self, body: Body, instant: Instant) -> Result<f64, EphemerisError> {
        self.bodies
            .get(&body)
            .copied()
            .ok_or_else(|| EphemerisError::BodyUnavailable {
                body,
                instant,
                message: "no longitude in the static table".to_string(),
            })
    }

    fn sidereal_time(&self, _instant: Instant) -> Result<f64, EphemerisError> {
        self.sidereal_time_hours
            .ok_or_else(|| EphemerisError::SiderealTimeUnavailable {
                message: "no sidereal time in the static table".to_string(),
            })
    }

    fn true_obliquity(&self, _instant: Instant) -> Result<f64, EphemerisError> {
        self.obliquity_deg
            .ok_or_else(|| EphemerisError::ObliquityUnavailable {
                message: "no obliquity in the static table".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn instant() -> Instant {
        Instant::from_utc(Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_missing_body_is_unavailable() {
        let table = StaticEphemeris::new().with_body(Body::Sun, 280.0);
        assert_eq!(table.body_longitude(Body::Sun, instant()), Ok(280.0));
        assert!(matches!(
            table.body_longitude(Body::Mars, instant()),
            Err(EphemerisError::BodyUnavailable { body: Body::Mars, .. })
        ));
    }

    #[test]
    fn test_longitudes_are_normalized() {
        let table = StaticEphemeris::new().with_body(Body::Moon, -30.0);
        assert_eq!(table.body_longitude(Body::Moon, instant()), Ok(330.0));
    }

    #[test]
    fn test_from_named_rejects_unknown_names() {
        let ok = StaticEphemeris::from_named(
            Some(1.0),
            Some(23.4),
            [("sun", 10.0), ("Venus", 20.0)],
        );
        assert!(ok.is_ok());

        let err = StaticEphemeris::from_named(None, None, [("uranus", 10.0)]).unwrap_err();
        assert!(matches!(err, EphemerisError::UnknownBody { .. }));
    }
}

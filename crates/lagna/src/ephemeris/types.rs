use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::Instant;

/// Errors reported by an ephemeris provider.
///
/// None of these abort a chart; they degrade the affected part of it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at {instant}: {message}")]
    BodyUnavailable {
        body: Body,
        instant: Instant,
        message: String,
    },
    #[error("Sidereal time unavailable: {message}")]
    SiderealTimeUnavailable { message: String },
    #[error("Obliquity unavailable: {message}")]
    ObliquityUnavailable { message: String },
    #[error("Unknown body: {name}. Valid bodies: {valid:?}")]
    UnknownBody { name: String, valid: Vec<String> },
}

/// The seven classical bodies, in canonical chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

impl Body {
    pub const ALL: [Body; 7] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EphemerisError::UnknownBody {
                name: s.to_string(),
                valid: Body::ALL.iter().map(|b| b.name().to_lowercase()).collect(),
            })
    }
}

/// Positional astronomy consumed by the chart engine.
///
/// Every call is a pure function of its arguments and either returns
/// promptly or fails; the engine never retries.
pub trait EphemerisProvider {
    /// Geocentric ecliptic longitude of `body`, degrees in [0, 360).
    fn body_longitude(&self, body: Body, instant: Instant) -> Result<f64, EphemerisError>;

    /// Greenwich apparent sidereal time, hours in [0, 24).
    fn sidereal_time(&self, instant: Instant) -> Result<f64, EphemerisError>;

    /// True obliquity of the ecliptic, degrees.
    fn true_obliquity(&self, instant: Instant) -> Result<f64, EphemerisError>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn body_longitude(&self, body: Body, instant: Instant) -> Result<f64, EphemerisError> {
        (**self).body_longitude(body, instant)
    }

    fn sidereal_time(&self, instant: Instant) -> Result<f64, EphemerisError> {
        (**self).sidereal_time(instant)
    }

    fn true_obliquity(&self, instant: Instant) -> Result<f64, EphemerisError> {
        (**self).true_obliquity(instant)
    }
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for Box<P> {
    fn body_longitude(&self, body: Body, instant: Instant) -> Result<f64, EphemerisError> {
        (**self).body_longitude(body, instant)
    }

    fn sidereal_time(&self, instant: Instant) -> Result<f64, EphemerisError> {
        (**self).sidereal_time(instant)
    }

    fn true_obliquity(&self, instant: Instant) -> Result<f64, EphemerisError> {
        (**self).true_obliquity(instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_from_str_ignores_case() {
        assert_eq!("sun".parse::<Body>().unwrap(), Body::Sun);
        assert_eq!(" MARS ".parse::<Body>().unwrap(), Body::Mars);
        assert_eq!("Saturn".parse::<Body>().unwrap(), Body::Saturn);
    }

    #[test]
    fn test_body_from_str_rejects_outer_planets() {
        let err = "pluto".parse::<Body>().unwrap_err();
        assert!(matches!(err, EphemerisError::UnknownBody { .. }));
        assert!(err.to_string().contains("jupiter"));
    }
}

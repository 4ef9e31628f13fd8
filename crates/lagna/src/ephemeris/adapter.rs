//! Swiss Ephemeris backed provider (`swisseph` feature).

use std::env;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Timelike};
use swisseph::swe::{calc_ut, houses_ex, julday};

use crate::ephemeris::types::{Body, EphemerisError, EphemerisProvider};
use crate::geometry::normalize_360;
use crate::time::Instant;

pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

// FLG_SWIEPH: read the Swiss Ephemeris data files
const FLG_SWIEPH: i32 = 2;
// SE_ECL_NUT: pseudo body carrying obliquity and nutation
const ECL_NUT: i32 = -1;

const PLANET_IDS: &[(Body, i32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
];

pub struct SwissEphemeris {
    ephemeris_path: PathBuf,
}

impl SwissEphemeris {
    /// Create a provider reading data files from `ephemeris_path`, falling
    /// back to `SWISS_EPHEMERIS_PATH` and then the system default.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. \
                          Please ensure Swiss Ephemeris data files are installed."
                    .to_string(),
            });
        }

        log::info!("Swiss Ephemeris data path: {}", path.display());
        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

fn planet_code(body: Body) -> i32 {
    PLANET_IDS
        .iter()
        .find(|(b, _)| *b == body)
        .map(|(_, code)| *code)
        .unwrap_or_default()
}

/// Julian Day (UT) through the library's own Gregorian conversion.
fn instant_to_julian_day(instant: Instant) -> f64 {
    let dt = instant.as_utc();
    let hour_decimal = dt.hour() as f64
        + dt.minute() as f64 / 60.0
        + (dt.second() as f64 + dt.nanosecond() as f64 / 1e9) / 3600.0;

    // GREG_CAL = 1
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, 1)
}

impl EphemerisProvider for SwissEphemeris {
    fn body_longitude(&self, body: Body, instant: Instant) -> Result<f64, EphemerisError> {
        let jd = instant_to_julian_day(instant);
        let result = calc_ut(jd, planet_code(body) as u32, FLG_SWIEPH as u32)
            .map_err(|e| EphemerisError::BodyUnavailable {
                body,
                instant,
                message: format!("Swiss Ephemeris error: {}", e),
            })?;
        Ok(normalize_360(result.out[0]))
    }

    fn sidereal_time(&self, instant: Instant) -> Result<f64, EphemerisError> {
        // ARMC at Greenwich is GAST expressed in degrees
        let jd = instant_to_julian_day(instant);
        let (_cusps, ascmc) = houses_ex(jd, FLG_SWIEPH, 0.0, 0.0, b'W' as i32);
        let armc = ascmc[2];
        if !armc.is_finite() {
            return Err(EphemerisError::SiderealTimeUnavailable {
                message: format!("house computation returned ARMC {}", armc),
            });
        }
        Ok(normalize_360(armc) / 15.0)
    }

    fn true_obliquity(&self, instant: Instant) -> Result<f64, EphemerisError> {
        let jd = instant_to_julian_day(instant);
        let result = calc_ut(jd, ECL_NUT as u32, FLG_SWIEPH as u32)
            .map_err(|e| EphemerisError::ObliquityUnavailable {
                message: format!("Swiss Ephemeris error: {}", e),
            })?;
        Ok(result.out[0])
    }
}

//! Zodiac signs and longitude -> sign mapping.
//!
//! The ecliptic is cut into 12 equal signs of 30 degrees, Aries first at 0.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ephemeris::Body;
use crate::geometry::normalize_360;

pub const SIGN_SPAN_DEG: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Sign at `index`, wrapping modulo 12.
    pub fn from_index(index: usize) -> Sign {
        Self::ALL[index % 12]
    }

    /// Sign containing an ecliptic longitude; any finite value is accepted.
    pub fn from_longitude(longitude_deg: f64) -> Sign {
        Self::from_index(sign_index(longitude_deg))
    }

    /// Position in the zodiac, 0 = Aries.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Traditional ruler (no outer planets).
    pub fn ruler(self) -> Body {
        match self {
            Sign::Aries | Sign::Scorpio => Body::Mars,
            Sign::Taurus | Sign::Libra => Body::Venus,
            Sign::Gemini | Sign::Virgo => Body::Mercury,
            Sign::Cancer => Body::Moon,
            Sign::Leo => Body::Sun,
            Sign::Sagittarius | Sign::Pisces => Body::Jupiter,
            Sign::Capricorn | Sign::Aquarius => Body::Saturn,
        }
    }

    /// The sign `steps` places forward, wrapping past Pisces.
    pub fn advance(self, steps: usize) -> Sign {
        Self::from_index(self.index() + steps)
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `floor(normalize360(longitude) / 30)`, always in 0..12.
pub fn sign_index(longitude_deg: f64) -> usize {
    let idx = (normalize_360(longitude_deg) / SIGN_SPAN_DEG).floor() as usize;
    idx.min(11)
}

/// Offset inside the containing sign, in [0, 30).
pub fn degree_in_sign(longitude_deg: f64) -> f64 {
    let lon = normalize_360(longitude_deg);
    lon - sign_index(lon) as f64 * SIGN_SPAN_DEG
}

/// Render an in-sign offset as degrees, minutes and seconds: `15°18'00"`.
pub fn format_dms(degrees: f64) -> String {
    let total_seconds = (degrees.abs() * 3600.0).round() as u64;
    let d = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    let sign = if degrees < 0.0 && total_seconds > 0 { "-" } else { "" };
    format!("{}{}°{:02}'{:02}\"", sign, d, m, s)
}

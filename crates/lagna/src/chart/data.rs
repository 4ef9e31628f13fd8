use std::fmt;

use serde::Serialize;

use crate::ephemeris::Body;
use crate::geometry::AngleSet;
use crate::time::Instant;
use crate::zodiac::{degree_in_sign, Sign};

/// Chart angles that can be placed into houses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AngleMarker {
    Asc,
    Mc,
    Ic,
}

impl fmt::Display for AngleMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AngleMarker::Asc => "ASC",
            AngleMarker::Mc => "MC",
            AngleMarker::Ic => "IC",
        })
    }
}

/// One tracked body. Longitude and sign are absent when the provider failed,
/// in which case `note` says why.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPosition {
    pub body: Body,
    pub longitude_deg: Option<f64>,
    pub sign: Option<Sign>,
    pub degree_in_sign: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl BodyPosition {
    pub fn located(body: Body, longitude_deg: f64) -> Self {
        Self {
            body,
            longitude_deg: Some(longitude_deg),
            sign: Some(Sign::from_longitude(longitude_deg)),
            degree_in_sign: Some(degree_in_sign(longitude_deg)),
            note: None,
        }
    }

    pub fn unavailable(body: Body, note: impl Into<String>) -> Self {
        Self {
            body,
            longitude_deg: None,
            sign: None,
            degree_in_sign: None,
            note: Some(note.into()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.longitude_deg.is_some()
    }
}

/// A whole-sign house. `sign` is absent only when the Ascendant is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub number: u8,
    pub sign: Option<Sign>,
    pub bodies: Vec<Body>,
    pub angles: Vec<AngleMarker>,
}

impl House {
    /// Traditional ruler of the house sign.
    pub fn ruler(&self) -> Option<Body> {
        self.sign.map(Sign::ruler)
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty() && self.angles.is_empty()
    }
}

/// A computed natal chart. Built once by the assembler; read-only after.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub(crate) angles: AngleSet,
    pub(crate) bodies: Vec<BodyPosition>,
    pub(crate) houses: Vec<House>,
    pub(crate) computed_at_utc: Instant,
}

impl Chart {
    pub fn angles(&self) -> &AngleSet {
        &self.angles
    }

    /// Always seven entries, Sun through Saturn.
    pub fn bodies(&self) -> &[BodyPosition] {
        &self.bodies
    }

    /// Always twelve entries, house 1 first.
    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    pub fn computed_at_utc(&self) -> Instant {
        self.computed_at_utc
    }

    pub fn body(&self, body: Body) -> Option<&BodyPosition> {
        self.bodies.iter().find(|p| p.body == body)
    }

    /// House by number, 1..=12.
    pub fn house(&self, number: u8) -> Option<&House> {
        self.houses.iter().find(|h| h.number == number)
    }

    pub fn ascendant_sign(&self) -> Option<Sign> {
        self.angles.ascendant_deg().map(Sign::from_longitude)
    }

    /// House holding `body`, if the body was located.
    pub fn house_of(&self, body: Body) -> Option<&House> {
        self.houses.iter().find(|h| h.bodies.contains(&body))
    }

    /// True when the angles or any body could not be computed. The polar
    /// Ascendant substitution does not count.
    pub fn is_degraded(&self) -> bool {
        self.angles.is_unavailable() || self.bodies.iter().any(|p| !p.is_available())
    }
}

//! Natal chart computation.
//!
//! Birth date, local time, UTC offset and coordinates go in; body signs,
//! Ascendant, MC/IC and whole-sign houses come out. Raw positional astronomy
//! is delegated to an [`EphemerisProvider`].

pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod geometry;
pub mod input;
pub mod time;
pub mod zodiac;

pub use chart::{compute_chart, AngleMarker, BodyPosition, Chart, House};
pub use ephemeris::{Body, EphemerisError, EphemerisProvider, StaticEphemeris};
pub use error::{ChartError, ValidationErrors, Violation};
pub use geometry::{normalize_360, AngleFallback, AngleSet};
pub use input::BirthInput;
pub use time::Instant;
pub use zodiac::{Element, Sign};

#[cfg(feature = "swisseph")]
pub use ephemeris::SwissEphemeris;

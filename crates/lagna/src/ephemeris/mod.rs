#[cfg(feature = "swisseph")]
pub mod adapter;
pub mod fixed;
pub mod types;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemeris;
pub use fixed::StaticEphemeris;
pub use types::{Body, EphemerisError, EphemerisProvider};

//! Ascendant and MC/IC computation.
//!
//! Standard spherical astronomy, applied to sidereal time and obliquity taken
//! from the ephemeris provider:
//!
//! - `theta = normalize360(GAST * 15 + lon)`
//! - `Asc = atan2(-cos(theta), sin(theta)*cos(eps) + tan(phi)*sin(eps))`
//! - `MC  = atan2(sin(theta)*cos(eps), cos(theta))`
//! - `IC  = MC + 180`
//!
//! `tan(phi)` diverges at the poles, so at |lat| >= 89.9 the Ascendant is
//! replaced by `MC + 90` and the substitution is flagged on the result.

use serde::Serialize;

use crate::ephemeris::EphemerisError;

/// Latitudes at or beyond this magnitude use the polar fallback.
pub const POLAR_LATITUDE_LIMIT_DEG: f64 = 89.9;

/// Normalize an angle to [0, 360) degrees. Non-finite input maps to 0.
pub fn normalize_360(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-20 + 360 rounds to 360
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Why an [`AngleSet`] is not the plain formula result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AngleFallback {
    /// Observer too close to a pole; Ascendant is `MC + 90`.
    DegenerateLatitude { latitude_deg: f64 },
    /// Sidereal time or obliquity could not be obtained; all angles absent.
    GeometryUnavailable { reason: String },
}

/// Chart angles in ecliptic longitude degrees.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleSet {
    ascendant_deg: Option<f64>,
    midheaven_deg: Option<f64>,
    imum_coeli_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<AngleFallback>,
}

impl AngleSet {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            ascendant_deg: None,
            midheaven_deg: None,
            imum_coeli_deg: None,
            fallback: Some(AngleFallback::GeometryUnavailable {
                reason: reason.into(),
            }),
        }
    }

    pub fn ascendant_deg(&self) -> Option<f64> {
        self.ascendant_deg
    }

    pub fn midheaven_deg(&self) -> Option<f64> {
        self.midheaven_deg
    }

    pub fn imum_coeli_deg(&self) -> Option<f64> {
        self.imum_coeli_deg
    }

    pub fn fallback(&self) -> Option<&AngleFallback> {
        self.fallback.as_ref()
    }

    pub fn is_degenerate_latitude(&self) -> bool {
        matches!(self.fallback, Some(AngleFallback::DegenerateLatitude { .. }))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.fallback, Some(AngleFallback::GeometryUnavailable { .. }))
    }
}

/// Local sidereal angle in degrees, [0, 360).
pub fn local_sidereal_deg(gast_hours: f64, longitude_deg: f64) -> f64 {
    normalize_360(gast_hours * 15.0 + longitude_deg)
}

/// Ascendant/MC/IC from provider outputs and observer position.
///
/// Either provider value failing (or being non-finite) yields an
/// unavailable set rather than an error.
pub fn compute_angles(
    gast_hours: Result<f64, EphemerisError>,
    obliquity_deg: Result<f64, EphemerisError>,
    latitude_deg: f64,
    longitude_deg: f64,
) -> AngleSet {
    let (gast_hours, obliquity_deg) = match (gast_hours, obliquity_deg) {
        (Ok(g), Ok(e)) if g.is_finite() && e.is_finite() => (g, e),
        (Err(e), _) | (_, Err(e)) => {
            log::warn!("Geometry unavailable: {}", e);
            return AngleSet::unavailable(e.to_string());
        }
        (Ok(g), Ok(e)) => {
            log::warn!(
                "Geometry unavailable: non-finite sidereal time {} or obliquity {}",
                g,
                e
            );
            return AngleSet::unavailable(
                "provider returned a non-finite sidereal time or obliquity",
            );
        }
    };

    let theta = local_sidereal_deg(gast_hours, longitude_deg).to_radians();
    let eps = obliquity_deg.to_radians();

    let mc = normalize_360(f64::atan2(theta.sin() * eps.cos(), theta.cos()).to_degrees());
    let ic = normalize_360(mc + 180.0);

    let (asc, fallback) = if latitude_deg.abs() >= POLAR_LATITUDE_LIMIT_DEG {
        log::warn!(
            "Latitude {} is at or beyond +/-{}; using MC + 90 for the Ascendant",
            latitude_deg,
            POLAR_LATITUDE_LIMIT_DEG
        );
        (
            normalize_360(mc + 90.0),
            Some(AngleFallback::DegenerateLatitude { latitude_deg }),
        )
    } else {
        let phi = latitude_deg.to_radians();
        let asc = f64::atan2(
            -theta.cos(),
            theta.sin() * eps.cos() + phi.tan() * eps.sin(),
        );
        (normalize_360(asc.to_degrees()), None)
    };

    log::debug!("Angles: asc={:.4} mc={:.4} ic={:.4}", asc, mc, ic);

    AngleSet {
        ascendant_deg: Some(asc),
        midheaven_deg: Some(mc),
        imum_coeli_deg: Some(ic),
        fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS_DEG: f64 = 23.44;

    fn angles(gast: f64, lat: f64, lon: f64) -> AngleSet {
        compute_angles(Ok(gast), Ok(EPS_DEG), lat, lon)
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(normalize_360(0.0), 0.0);
    }

    #[test]
    fn test_normalize_360_wraps() {
        assert_eq!(normalize_360(360.0), 0.0);
    }

    #[test]
    fn test_normalize_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_large() {
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
        assert!((normalize_360(-370.0) - 350.0).abs() < 1e-10);
    }

    #[test]
    fn test_normalize_tiny_negative_stays_in_range() {
        let r = normalize_360(-1e-20);
        assert!((0.0..360.0).contains(&r), "got {r}");
    }

    #[test]
    fn test_normalize_non_finite_is_zero() {
        assert_eq!(normalize_360(f64::NAN), 0.0);
        assert_eq!(normalize_360(f64::INFINITY), 0.0);
    }

    /// theta = 0 at the equator: atan2(-1, 0) = -90 -> 270; MC = 0.
    #[test]
    fn test_equator_theta_zero() {
        let set = angles(0.0, 0.0, 0.0);
        assert!((set.ascendant_deg().unwrap() - 270.0).abs() < 1e-10);
        assert!(set.midheaven_deg().unwrap().abs() < 1e-10);
        assert!((set.imum_coeli_deg().unwrap() - 180.0).abs() < 1e-10);
        assert!(set.fallback().is_none());
    }

    #[test]
    fn test_sidereal_angle_folds_longitude() {
        assert!((local_sidereal_deg(10.0, 77.59) - 227.59).abs() < 1e-9);
        assert!((local_sidereal_deg(23.0, 30.0) - 15.0).abs() < 1e-9);
        assert!((local_sidereal_deg(0.0, -15.0) - 345.0).abs() < 1e-9);
    }

    #[test]
    fn test_ascendant_sweeps_full_circle() {
        let mut min_asc = f64::MAX;
        let mut max_asc = f64::MIN;
        for i in 0..360 {
            let gast = 24.0 * i as f64 / 360.0;
            let asc = angles(gast, 28.6, 0.0).ascendant_deg().unwrap();
            min_asc = min_asc.min(asc);
            max_asc = max_asc.max(asc);
        }
        assert!(min_asc < 3.0, "min_asc = {min_asc}");
        assert!(max_asc > 357.0, "max_asc = {max_asc}");
    }

    #[test]
    fn test_polar_fallback_only_at_limit() {
        let below = angles(10.0, 89.89, 0.0);
        assert!(below.fallback().is_none());

        let at = angles(10.0, 89.9, 0.0);
        assert!(at.is_degenerate_latitude());

        let south = angles(10.0, -90.0, 0.0);
        assert!(south.is_degenerate_latitude());
        let mc = south.midheaven_deg().unwrap();
        assert!((south.ascendant_deg().unwrap() - normalize_360(mc + 90.0)).abs() < 1e-12);
    }

    #[test]
    fn test_provider_failure_makes_geometry_unavailable() {
        let set = compute_angles(
            Err(EphemerisError::SiderealTimeUnavailable {
                message: "offline".to_string(),
            }),
            Ok(EPS_DEG),
            12.0,
            77.0,
        );
        assert!(set.is_unavailable());
        assert_eq!(set.ascendant_deg(), None);
        assert_eq!(set.midheaven_deg(), None);
        assert_eq!(set.imum_coeli_deg(), None);
    }

    #[test]
    fn test_non_finite_obliquity_makes_geometry_unavailable() {
        let set = compute_angles(Ok(10.0), Ok(f64::NAN), 12.0, 77.0);
        assert!(set.is_unavailable());
    }
}

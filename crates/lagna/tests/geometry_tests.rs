use lagna::geometry::{compute_angles, normalize_360, POLAR_LATITUDE_LIMIT_DEG};
use lagna::zodiac::sign_index;
use lagna::Sign;

fn samples() -> impl Iterator<Item = f64> {
    (-2000..=2000)
        .map(|i| i as f64 * 0.731)
        .chain([0.0, -0.0, 359.999_999_999, 360.0, -360.0, 1e12, -1e12, -1e-300])
}

#[test]
fn test_normalize_is_total_and_idempotent() {
    for x in samples() {
        let once = normalize_360(x);
        assert!((0.0..360.0).contains(&once), "normalize_360({x}) = {once}");
        assert_eq!(normalize_360(once), once, "not idempotent at {x}");
    }
}

#[test]
fn test_sign_partition_is_total_and_disjoint() {
    for x in samples() {
        let idx = sign_index(x);
        assert!(idx < 12);
        let lon = normalize_360(x);
        let matching = Sign::ALL
            .iter()
            .filter(|s| {
                let start = s.index() as f64 * 30.0;
                lon >= start && lon < start + 30.0
            })
            .count();
        assert_eq!(matching, 1, "longitude {lon}");
        assert_eq!(Sign::from_longitude(x).index(), idx);
    }
}

#[test]
fn test_ic_opposite_mc_everywhere() {
    for step in 0..96 {
        let gast = step as f64 * 0.25;
        for lat in [-90.0, -89.95, -66.5, -12.0, 0.0, 23.4, 51.5, 89.9, 90.0] {
            let set = compute_angles(Ok(gast), Ok(23.44), lat, 77.59);
            let mc = set.midheaven_deg().unwrap();
            let ic = set.imum_coeli_deg().unwrap();
            assert_eq!(ic, normalize_360(mc + 180.0));
            assert!((0.0..360.0).contains(&set.ascendant_deg().unwrap()));
            assert!((0.0..360.0).contains(&mc));
        }
    }
}

#[test]
fn test_polar_flag_matches_threshold() {
    for lat in [-90.0, -89.9, -89.899, 0.0, 45.0, 89.899, 89.9, 90.0] {
        let set = compute_angles(Ok(6.0), Ok(23.44), lat, 0.0);
        let expected = f64::abs(lat) >= POLAR_LATITUDE_LIMIT_DEG;
        assert_eq!(set.is_degenerate_latitude(), expected, "lat {lat}");
        if expected {
            let mc = set.midheaven_deg().unwrap();
            assert_eq!(set.ascendant_deg().unwrap(), normalize_360(mc + 90.0));
        }
    }
}

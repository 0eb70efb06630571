//! Great-circle distance between two coordinates.

/// Haversine distance in kilometers on a sphere of radius 6371 km.
///
/// Returns `NaN` when any input is not finite; callers filter coordinates
/// before calling.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine::distance(
        haversine::Location {
            latitude: lat1,
            longitude: lon1,
        },
        haversine::Location {
            latitude: lat2,
            longitude: lon2,
        },
        haversine::Units::Kilometers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const LUCKNOW: (f64, f64) = (26.8467, 80.9462);
    const DELHI: (f64, f64) = (28.6139, 77.2090);

    #[test]
    fn test_lucknow_to_delhi() {
        let d = distance_km(LUCKNOW.0, LUCKNOW.1, DELHI.0, DELHI.1);
        // ~417 km as the crow flies
        assert!((d - 417.0).abs() < 10.0, "Lucknow-Delhi: {d}");
    }

    #[rstest]
    #[case(LUCKNOW, DELHI)]
    #[case((0.0, 0.0), (10.0, -10.0))]
    #[case((-33.86, 151.21), (51.5, -0.12))]
    fn test_symmetry(#[case] a: (f64, f64), #[case] b: (f64, f64)) {
        let ab = distance_km(a.0, a.1, b.0, b.1);
        let ba = distance_km(b.0, b.1, a.0, a.1);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[rstest]
    #[case(LUCKNOW)]
    #[case((0.0, 0.0))]
    #[case((-89.9, 179.9))]
    fn test_same_point_is_zero(#[case] p: (f64, f64)) {
        assert!(distance_km(p.0, p.1, p.0, p.1).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic_along_meridian() {
        let mut last = 0.0;
        for step in 1..=20 {
            let lat = LUCKNOW.0 + f64::from(step) * 0.05;
            let d = distance_km(LUCKNOW.0, LUCKNOW.1, lat, LUCKNOW.1);
            assert!(d > last, "distance should grow: {d} <= {last}");
            last = d;
        }
    }

    #[test]
    fn test_non_finite_input_is_nan() {
        assert!(distance_km(f64::NAN, 0.0, 0.0, 0.0).is_nan());
    }
}

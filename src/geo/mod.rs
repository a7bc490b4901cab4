//! Great-circle distance between venue coordinates.

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two points, by the haversine
/// formula. Returns `None` when any coordinate is absent.
///
/// # Examples
///
/// ```
/// use tourcast::geo::haversine_km;
///
/// // Madison Square Garden to the United Center is about 1150 km.
/// let d = haversine_km(
///     Some(40.7505), Some(-73.9934),
///     Some(41.8807), Some(-87.6742),
/// ).unwrap();
/// assert!((d - 1145.0).abs() < 10.0);
/// ```
pub fn haversine_km(
    lat1: Option<f64>,
    lon1: Option<f64>,
    lat2: Option<f64>,
    lon2: Option<f64>,
) -> Option<f64> {
    let (lat1, lon1, lat2, lon2) = (lat1?, lon1?, lat2?, lon2?);

    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1_r.cos() * lat2_r.cos() * (dlon / 2.0).sin().powi(2);
    Some(2.0 * EARTH_RADIUS_KM * a.sqrt().asin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn distance_is_zero_at_identity() {
        let d = haversine_km(Some(52.52), Some(13.405), Some(52.52), Some(13.405)).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn missing_coordinate_yields_none() {
        assert_eq!(haversine_km(None, Some(0.0), Some(0.0), Some(0.0)), None);
        assert_eq!(haversine_km(Some(0.0), Some(0.0), Some(0.0), None), None);
    }

    #[test]
    fn known_city_pair_distance() {
        // Paris to Berlin, roughly 878 km.
        let d = haversine_km(Some(48.8566), Some(2.3522), Some(52.52), Some(13.405)).unwrap();
        assert!((d - 878.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn quarter_meridian() {
        // Equator to pole along a meridian is a quarter of the great circle.
        let d = haversine_km(Some(0.0), Some(0.0), Some(90.0), Some(0.0)).unwrap();
        let expected = std::f64::consts::PI * super::EARTH_RADIUS_KM / 2.0;
        assert!((d - expected).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0f64..90.0,
            lon1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0,
            lon2 in -180.0f64..180.0,
        ) {
            let ab = haversine_km(Some(lat1), Some(lon1), Some(lat2), Some(lon2)).unwrap();
            let ba = haversine_km(Some(lat2), Some(lon2), Some(lat1), Some(lon1)).unwrap();
            prop_assert!((ab - ba).abs() < 1e-9);
        }

        #[test]
        fn distance_is_nonnegative_and_bounded(
            lat1 in -90.0f64..90.0,
            lon1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0,
            lon2 in -180.0f64..180.0,
        ) {
            let d = haversine_km(Some(lat1), Some(lon1), Some(lat2), Some(lon2)).unwrap();
            // No two points are farther apart than half the circumference.
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * super::EARTH_RADIUS_KM + 1e-6);
        }
    }
}

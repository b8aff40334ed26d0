// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Mean radius of Earth, in metres.
/// Source: https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius
const EARTH_RADIUS: f64 = 6_371_000.0;

/// Mean diameter of Earth, in metres.
/// Source: https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius
const EARTH_DIAMETER: f64 = EARTH_RADIUS + EARTH_RADIUS;

/// Calculates the great-circle distance between two lat-lon positions
/// on Earth using the `haversine formula <https://en.wikipedia.org/wiki/Haversine_formula>`_.
/// Returns the result in metres.
pub fn earth_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lon1 = lon1.to_radians();
    let lat2 = lat2.to_radians();
    let lon2 = lon2.to_radians();

    let sin_dlat_half = ((lat2 - lat1) * 0.5).sin();
    let sin_dlon_half = ((lon2 - lon1) * 0.5).sin();

    let h = sin_dlat_half * sin_dlat_half + lat1.cos() * lat2.cos() * sin_dlon_half * sin_dlon_half;

    EARTH_DIAMETER * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr, $eps:expr) => {
            assert!(
                (($a - $b).abs() < $eps),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    #[test]
    fn zero_distance() {
        assert_eq!(earth_distance(52.23, 21.01, 52.23, 21.01), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // One degree of latitude is roughly 111.2 km anywhere on the globe.
        let d = earth_distance(0.0, 0.0, 1.0, 0.0);
        assert_almost_eq!(d, 111_194.9, 1.0);

        let d = earth_distance(51.0, 17.0, 52.0, 17.0);
        assert_almost_eq!(d, 111_194.9, 1.0);
    }

    #[test]
    fn longitude_shrinks_with_latitude() {
        let at_equator = earth_distance(0.0, 0.0, 0.0, 1.0);
        let at_52_n = earth_distance(52.0, 0.0, 52.0, 1.0);
        assert_almost_eq!(at_52_n, at_equator * 52.0_f64.to_radians().cos(), 50.0);
    }

    #[test]
    fn symmetric() {
        let a = earth_distance(41.9022, 12.4956, 41.8902, 12.4922);
        let b = earth_distance(41.8902, 12.4922, 41.9022, 12.4956);
        assert_eq!(a, b);
    }
}

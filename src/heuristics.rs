// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::earth_distance;

/// A lower-bound cost estimator between two geographic points, used to steer
/// the A* search.
///
/// A heuristic is *admissible* when it never exceeds the true minimum
/// achievable cost under the active [Weighting](crate::Weighting); A*'s
/// optimality guarantee holds only for admissible heuristics.
/// [RoadGraph::default_heuristic](crate::RoadGraph::default_heuristic) always
/// returns an admissible variant matched to the view's weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Heuristic {
    /// Always estimates 0. Degrades A* to Dijkstra; always admissible.
    Zero,

    /// Great-circle distance between the two points, in metres.
    /// Admissible for [Weighting::Length](crate::Weighting::Length): the
    /// crow-flies distance never exceeds any real road path.
    GreatCircle,

    /// Sum of the latitude-only and longitude-only great-circle
    /// decompositions, a Manhattan-like approximation.
    ///
    /// NOT guaranteed admissible for geodesic routing; the lat/lon
    /// decomposition does not bound real road distance the way it would on a
    /// true grid. Kept as an experimental option; routes found with it are
    /// not necessarily cost-optimal.
    Orthogonal,

    /// Great-circle distance divided by a maximum speed in metres per second,
    /// estimating a lower bound on travel time.
    ///
    /// Admissible for [Weighting::TravelTime](crate::Weighting::TravelTime)
    /// provided the speed is not less than the true maximum achievable speed
    /// on any edge. Construct via [Heuristic::travel_time].
    TravelTime { max_speed_m_s: f64 },
}

impl Heuristic {
    /// Creates a [Heuristic::TravelTime] with the given maximum speed
    /// in metres per second.
    ///
    /// Panics if the speed is not a positive, finite number.
    pub fn travel_time(max_speed_m_s: f64) -> Self {
        assert!(
            max_speed_m_s.is_finite() && max_speed_m_s > 0.0,
            "heuristic max speed must be positive and finite, got {}",
            max_speed_m_s,
        );
        Self::TravelTime { max_speed_m_s }
    }

    /// Returns the estimated cost between two `(lat, lon)` positions.
    /// The estimate is stateless and non-negative.
    pub fn estimate(&self, from: (f64, f64), to: (f64, f64)) -> f64 {
        let (lat1, lon1) = from;
        let (lat2, lon2) = to;

        match *self {
            Self::Zero => 0.0,
            Self::GreatCircle => earth_distance(lat1, lon1, lat2, lon2),
            Self::Orthogonal => {
                let lat_dist = earth_distance(lat1, lon1, lat2, lon1);
                let lon_dist = earth_distance(lat1, lon1, lat1, lon2);
                lat_dist + lon_dist
            }
            Self::TravelTime { max_speed_m_s } => {
                earth_distance(lat1, lon1, lat2, lon2) / max_speed_m_s
            }
        }
    }
}

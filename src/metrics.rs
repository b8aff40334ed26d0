// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::cost::{self, Weighting};
use crate::{Graph, RoadGraph};

/// Two geometry/node positions closer than this, in degrees on both axes,
/// are considered the same point when building a display polyline.
const COINCIDENT_EPS: f64 = 1e-9;

/// Aggregate statistics about a path in the road network.
///
/// All values are re-derived by walking the path's edges in the graph,
/// independently of which [Weighting] the search optimized for - the same
/// path always reports both its real distance and its real travel time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PathMetrics {
    /// Total length of the traversed edges, in metres.
    pub distance_m: f64,

    /// Total effective travel time of the traversed edges, in seconds.
    pub travel_time_s: f64,

    /// Number of traversed edges.
    pub edge_count: usize,
}

impl PathMetrics {
    /// Returns the path length in kilometres.
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    /// Returns the travel time in minutes.
    pub fn travel_time_min(&self) -> f64 {
        self.travel_time_s / 60.0
    }
}

/// Computes aggregate metrics for a node path by re-walking its edges.
///
/// For every consecutive node pair, the parallel edge with the minimum
/// effective travel time (under the same fallback rules the cost model
/// applies during search) is selected; its real length and effective travel
/// time are accumulated. Node pairs without a traversable edge contribute
/// nothing - one bad pair never poisons the whole walk.
pub fn path_metrics(g: &Graph, path: &[i64]) -> PathMetrics {
    let view = RoadGraph::new(g, Weighting::TravelTime);
    let mut metrics = PathMetrics::default();

    for pair in path.windows(2) {
        if let Some(edge) = view.cheapest_edge(pair[0], pair[1]) {
            metrics.distance_m += edge.length.unwrap_or(0.0);
            metrics.travel_time_s +=
                cost::edge_cost(edge, Weighting::TravelTime, view.max_speed_m_s()).unwrap_or(0.0);
            metrics.edge_count += 1;
        }
    }

    metrics
}

/// Converts a node path into a `(lat, lon)` coordinate sequence for display.
///
/// With `follow_geometry`, the curve geometry of each traversed edge (the
/// same edge [path_metrics] selects) is spliced in between the endpoint
/// nodes, so the polyline follows the actual street shape: interior vertices
/// are emitted as-is, and the final geometry vertex is emitted only when it
/// does not coincide with the destination node's position - tiny
/// floating-point mismatches between geometry and node data must not produce
/// duplicate points.
pub fn path_coordinates(g: &Graph, path: &[i64], follow_geometry: bool) -> Vec<(f64, f64)> {
    let view = RoadGraph::new(g, Weighting::TravelTime);
    let mut coordinates = vec![];

    for (i, &node_id) in path.iter().enumerate() {
        let node = match g.get_node(node_id) {
            Some(node) => node,
            None => continue,
        };
        coordinates.push((node.lat, node.lon));

        if !follow_geometry || i + 1 >= path.len() {
            continue;
        }
        let next = match g.get_node(path[i + 1]) {
            Some(next) => next,
            None => continue,
        };
        let edge = match view.cheapest_edge(node_id, next.id) {
            Some(edge) => edge,
            None => continue,
        };
        if edge.geometry.len() < 2 {
            continue;
        }

        // The first vertex duplicates the source node; skip it.
        for &[lon, lat] in &edge.geometry[1..edge.geometry.len() - 1] {
            coordinates.push((lat, lon));
        }

        let &[last_lon, last_lat] = edge.geometry.last().unwrap();
        if (last_lat - next.lat).abs() > COINCIDENT_EPS
            || (last_lon - next.lon).abs() > COINCIDENT_EPS
        {
            coordinates.push((last_lat, last_lon));
        }
    }

    coordinates
}

/// Formats a distance in metres using human-readable units.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

/// Formats a duration in seconds using minutes and hours when appropriate.
pub fn format_time(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{:.0} sec", seconds)
    } else if seconds < 3600.0 {
        format!("{:.0} min", seconds / 60.0)
    } else {
        let hours = seconds / 3600.0;
        let minutes = (seconds % 3600.0) / 60.0;
        format!("{:.2} hr {:.0} min", hours, minutes.floor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Edge, Node, DEFAULT_MAX_SPEED_KPH};

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

    fn node(id: i64, lat: f64, lon: f64) -> Node {
        Node {
            id,
            lat,
            lon,
            synthetic: false,
        }
    }

    /// A -> B -> C with 100 m and 200 m edges, no speed data.
    fn line_graph() -> Graph {
        let mut g = Graph::new();
        g.set_node(node(1, 52.2297, 21.0122));
        g.set_node(node(2, 52.2298, 21.0137));
        g.set_node(node(3, 52.2300, 21.0166));
        g.add_edge(
            1,
            Edge {
                to: 2,
                length: Some(100.0),
                ..Edge::default()
            },
        );
        g.add_edge(
            2,
            Edge {
                to: 3,
                length: Some(200.0),
                ..Edge::default()
            },
        );
        g
    }

    #[test]
    fn single_edge_distance_matches_edge_length() {
        let g = line_graph();
        let metrics = path_metrics(&g, &[1, 2]);
        assert_eq!(metrics.distance_m, 100.0);
        assert_eq!(metrics.edge_count, 1);
    }

    #[test]
    fn line_graph_metrics() {
        let g = line_graph();
        let metrics = path_metrics(&g, &[1, 2, 3]);

        let fallback = DEFAULT_MAX_SPEED_KPH / 3.6;
        assert_eq!(metrics.distance_m, 300.0);
        assert_almost_eq!(metrics.travel_time_s, 300.0 / fallback, 1e-9);
        assert_eq!(metrics.edge_count, 2);
        assert_almost_eq!(metrics.distance_km(), 0.3, 1e-12);
    }

    #[test]
    fn explicit_travel_time_wins_over_derived() {
        let mut g = line_graph();
        g.add_edge(
            1,
            Edge {
                to: 2,
                length: Some(120.0),
                travel_time: Some(1.0),
                ..Edge::default()
            },
        );

        // The timed parallel edge is effectively faster; the reducer must
        // select it and report its length, not the shorter rival's.
        let metrics = path_metrics(&g, &[1, 2]);
        assert_eq!(metrics.distance_m, 120.0);
        assert_almost_eq!(metrics.travel_time_s, 1.0, 1e-12);
    }

    #[test]
    fn missing_edges_contribute_nothing() {
        let g = line_graph();
        let metrics = path_metrics(&g, &[1, 3]);
        assert_eq!(metrics, PathMetrics::default());

        let metrics = path_metrics(&g, &[]);
        assert_eq!(metrics, PathMetrics::default());
    }

    #[test]
    fn coordinates_without_geometry() {
        let g = line_graph();
        let coordinates = path_coordinates(&g, &[1, 2, 3], true);
        assert_eq!(
            coordinates,
            vec![
                (52.2297, 21.0122),
                (52.2298, 21.0137),
                (52.2300, 21.0166),
            ],
        );
    }

    fn curved_graph(last_vertex: [f64; 2]) -> Graph {
        let mut g = Graph::new();
        g.set_node(node(1, 52.0000, 21.0000));
        g.set_node(node(2, 52.0010, 21.0010));
        g.add_edge(
            1,
            Edge {
                to: 2,
                length: Some(200.0),
                geometry: vec![
                    [21.0000, 52.0000],
                    [21.0004, 52.0001],
                    [21.0008, 52.0006],
                    last_vertex,
                ],
                ..Edge::default()
            },
        );
        g
    }

    #[test]
    fn coordinates_follow_geometry() {
        let g = curved_graph([21.0010, 52.0010]);
        let coordinates = path_coordinates(&g, &[1, 2], true);
        assert_eq!(
            coordinates,
            vec![
                (52.0000, 21.0000),
                (52.0001, 21.0004),
                (52.0006, 21.0008),
                (52.0010, 21.0010),
            ],
        );

        // Without curve-following only the endpoint nodes are emitted.
        let straight = path_coordinates(&g, &[1, 2], false);
        assert_eq!(straight.len(), 2);
    }

    #[test]
    fn mismatched_final_vertex_is_kept() {
        // The geometry's tail sits a (non-trivial) hair away from the node.
        let g = curved_graph([21.0010, 52.0010 + 1e-6]);
        let coordinates = path_coordinates(&g, &[1, 2], true);
        assert_eq!(coordinates.len(), 5);
        assert_eq!(coordinates[3], (52.0010 + 1e-6, 21.0010));
        assert_eq!(coordinates[4], (52.0010, 21.0010));
    }

    #[test]
    fn nearly_coincident_final_vertex_is_dropped() {
        let g = curved_graph([21.0010, 52.0010 + 1e-12]);
        let coordinates = path_coordinates(&g, &[1, 2], true);
        assert_eq!(coordinates.len(), 4);
        assert_eq!(coordinates[3], (52.0010, 21.0010));
    }

    #[test]
    fn format_distance_switches_units() {
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(999.0), "999 m");
        assert_eq!(format_distance(1500.0), "1.50 km");
    }

    #[test]
    fn format_time_switches_units() {
        assert_eq!(format_time(45.0), "45 sec");
        assert_eq!(format_time(120.0), "2 min");
        assert_eq!(format_time(3700.0), "1.03 hr 1 min");
    }
}

// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::cost::usable_length;
use crate::{earth_distance, Edge, Graph, Node};

/// Error conditions which may occur during [densify].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DensifyError {
    /// The maximum segment length must be a positive number of metres.
    #[error("densification threshold must be positive, got {0}")]
    InvalidThreshold(f64),
}

/// Rewrites a graph so that no edge is longer than `max_segment_length`
/// metres, subdividing longer edges into chains of equal-length segments
/// joined by synthetic nodes.
///
/// Each over-threshold edge of length `l` becomes `ceil(l / max_segment_length)`
/// segments of length `l / count`. Intermediate nodes are placed at evenly
/// spaced normalized-arclength positions along the edge's curve geometry (or
/// along the straight line between its endpoints when it has none) and are
/// tagged [synthetic](Node::synthetic), with identifiers allocated past the
/// graph's maximum id. An explicit travel time is apportioned equally across
/// the segments; otherwise each segment keeps the declared speed values, so
/// the effective-speed fallback applies per segment. Every segment's geometry
/// is the two-point line between its own endpoints.
///
/// Edges at or under the threshold, without a usable length, or with a
/// missing destination node pass through unchanged.
///
/// This is a pure graph-to-graph transform: the input graph is untouched.
/// Construct a new [RoadGraph](crate::RoadGraph) view over the result, as the
/// graph-wide fallback speed must be surveyed against the new edge set.
pub fn densify(g: &Graph, max_segment_length: f64) -> Result<Graph, DensifyError> {
    if max_segment_length.is_nan() || max_segment_length <= 0.0 {
        return Err(DensifyError::InvalidThreshold(max_segment_length));
    }

    let mut out = Graph::new();
    for &node in g.iter() {
        out.set_node(node);
    }

    let mut next_synthetic_id = g.max_node_id() + 1;

    for node in g.iter() {
        for edge in g.get_edges(node.id) {
            let count = segment_count(edge, max_segment_length);
            match (count, g.get_node(edge.to)) {
                (Some(count), Some(to_node)) if count >= 2 => {
                    subdivide(&mut out, *node, to_node, edge, count, &mut next_synthetic_id);
                }
                _ => out.add_edge(node.id, edge.clone()),
            }
        }
    }

    Ok(out)
}

/// Number of segments an edge should be split into, or `None` when the edge
/// passes through unchanged.
fn segment_count(edge: &Edge, max_segment_length: f64) -> Option<usize> {
    let length = usable_length(edge)?;
    if length <= max_segment_length {
        return None;
    }

    let count = (length / max_segment_length).ceil() as usize;
    if count >= 2 {
        Some(count)
    } else {
        None
    }
}

/// Replaces `edge` with a chain of `count` segments in `out`, allocating
/// synthetic node ids from `next_id`.
fn subdivide(
    out: &mut Graph,
    from_node: Node,
    to_node: Node,
    edge: &Edge,
    count: usize,
    next_id: &mut i64,
) {
    let length = usable_length(edge).expect("segment_count only accepts measurable edges");
    let segment_length = length / count as f64;
    let segment_time = edge.travel_time.map(|t| t / count as f64);

    let curve = edge_curve(&from_node, &to_node, edge);

    let mut previous = from_node;
    for i in 1..=count {
        let is_last = i == count;
        let current = if is_last {
            to_node
        } else {
            let (lat, lon) = point_at_fraction(&curve, i as f64 / count as f64);
            let node = Node {
                id: *next_id,
                lat,
                lon,
                synthetic: true,
            };
            *next_id += 1;
            out.set_node(node);
            node
        };

        out.add_edge(
            previous.id,
            Edge {
                to: current.id,
                length: Some(segment_length),
                travel_time: segment_time,
                maxspeed: edge.maxspeed.clone(),
                geometry: vec![
                    [previous.lon, previous.lat],
                    [current.lon, current.lat],
                ],
            },
        );
        previous = current;
    }
}

/// The `(lat, lon)` polyline an edge physically follows: its curve geometry
/// when it has one, the straight endpoint line otherwise.
fn edge_curve(from_node: &Node, to_node: &Node, edge: &Edge) -> Vec<(f64, f64)> {
    if edge.geometry.len() >= 2 {
        edge.geometry.iter().map(|&[lon, lat]| (lat, lon)).collect()
    } else {
        vec![
            (from_node.lat, from_node.lon),
            (to_node.lat, to_node.lon),
        ]
    }
}

/// Returns the position at the given fraction (0..=1) of the polyline's
/// arclength. Within a polyline leg, positions are interpolated linearly in
/// coordinate space, which is accurate at the sub-kilometre spans involved.
fn point_at_fraction(curve: &[(f64, f64)], fraction: f64) -> (f64, f64) {
    debug_assert!(curve.len() >= 2);

    let leg_lengths: Vec<f64> = curve
        .windows(2)
        .map(|w| earth_distance(w[0].0, w[0].1, w[1].0, w[1].1))
        .collect();
    let total: f64 = leg_lengths.iter().sum();
    if total <= 0.0 {
        return curve[0];
    }

    let mut remaining = fraction.clamp(0.0, 1.0) * total;
    for (leg, &leg_length) in curve.windows(2).zip(&leg_lengths) {
        if remaining <= leg_length && leg_length > 0.0 {
            let t = remaining / leg_length;
            let (lat1, lon1) = leg[0];
            let (lat2, lon2) = leg[1];
            return (lat1 + (lat2 - lat1) * t, lon1 + (lon2 - lon1) * t);
        }
        remaining -= leg_length;
    }

    *curve.last().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{find_route, RoadGraph, Weighting, DEFAULT_STEP_LIMIT};

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

    /// A single 250 m edge between two nodes ~250 m apart.
    fn single_edge_graph() -> Graph {
        let mut g = Graph::new();
        g.set_node(node(1, 52.0000, 21.0000));
        g.set_node(node(2, 52.00225, 21.0000));
        g.add_edge(
            1,
            Edge {
                to: 2,
                length: Some(250.0),
                ..Edge::default()
            },
        );
        g
    }

    fn path_edges(g: &Graph, start: i64) -> Vec<Edge> {
        let mut edges = vec![];
        let mut at = start;
        loop {
            match g.get_edges(at) {
                [] => break,
                [edge] => {
                    edges.push(edge.clone());
                    at = edge.to;
                }
                _ => panic!("expected a chain at node {}", at),
            }
        }
        edges
    }

    #[test]
    fn splits_250m_edge_into_three_segments() {
        let g = single_edge_graph();
        let dense = densify(&g, 100.0).unwrap();

        // Two synthetic nodes were inserted.
        assert_eq!(dense.len(), 4);
        assert_eq!(dense.iter().filter(|n| n.synthetic).count(), 2);
        assert!(dense.iter().filter(|n| n.synthetic).all(|n| n.id > 2));

        let chain = path_edges(&dense, 1);
        assert_eq!(chain.len(), 3);

        let mut total = 0.0;
        for edge in &chain {
            let length = edge.length.unwrap();
            assert_almost_eq!(length, 250.0 / 3.0, 1e-9);
            assert!(length <= 100.0);
            total += length;
        }
        assert_almost_eq!(total, 250.0, 1e-9);

        // The chain ends at the original destination.
        assert_eq!(chain.last().unwrap().to, 2);
    }

    #[test]
    fn synthetic_nodes_are_evenly_spaced_on_straight_edges() {
        let g = single_edge_graph();
        let dense = densify(&g, 100.0).unwrap();

        let first = dense.get_node(3).unwrap();
        let second = dense.get_node(4).unwrap();
        assert_almost_eq!(first.lat, 52.0000 + 0.00225 / 3.0, 1e-9);
        assert_almost_eq!(second.lat, 52.0000 + 0.00225 * 2.0 / 3.0, 1e-9);
        assert_eq!(first.lon, 21.0000);
        assert_eq!(second.lon, 21.0000);
    }

    #[test]
    fn short_edges_pass_through_unchanged() {
        let g = single_edge_graph();
        let dense = densify(&g, 250.0).unwrap();
        assert_eq!(dense, g);

        let dense = densify(&g, 1000.0).unwrap();
        assert_eq!(dense, g);
    }

    #[test]
    fn unmeasurable_edges_pass_through_unchanged() {
        let mut g = Graph::new();
        g.set_node(node(1, 52.0, 21.0));
        g.set_node(node(2, 52.01, 21.0));
        g.add_edge(
            1,
            Edge {
                to: 2,
                ..Edge::default()
            },
        );

        let dense = densify(&g, 10.0).unwrap();
        assert_eq!(dense, g);
    }

    #[test]
    fn travel_time_is_apportioned_equally() {
        let mut g = single_edge_graph();
        g.add_edge(
            1,
            Edge {
                to: 2,
                length: Some(250.0),
                travel_time: Some(30.0),
                ..Edge::default()
            },
        );

        let dense = densify(&g, 100.0).unwrap();
        let with_time: Vec<&Edge> = dense
            .iter()
            .flat_map(|n| dense.get_edges(n.id))
            .filter(|e| e.travel_time.is_some())
            .collect();
        assert_eq!(with_time.len(), 3);
        for edge in with_time {
            assert_almost_eq!(edge.travel_time.unwrap(), 10.0, 1e-9);
        }
    }

    #[test]
    fn declared_speed_is_carried_onto_segments() {
        let mut g = Graph::new();
        g.set_node(node(1, 52.0000, 21.0000));
        g.set_node(node(2, 52.00225, 21.0000));
        g.add_edge(
            1,
            Edge {
                to: 2,
                length: Some(250.0),
                maxspeed: vec!["70".to_string()],
                ..Edge::default()
            },
        );

        let dense = densify(&g, 100.0).unwrap();
        for edge in path_edges(&dense, 1) {
            assert_eq!(edge.maxspeed, vec!["70".to_string()]);
        }
    }

    #[test]
    fn segments_follow_curve_geometry() {
        // An L-shaped edge: a ~68 m leg east, then a ~111 m leg north,
        // with the corner at (52.0, 21.001).
        let mut g = Graph::new();
        g.set_node(node(1, 52.0000, 21.0000));
        g.set_node(node(2, 52.0010, 21.0010));
        let east_leg = earth_distance(52.0, 21.0, 52.0, 21.001);
        let north_leg = earth_distance(52.0, 21.001, 52.001, 21.001);
        let length = east_leg + north_leg;
        g.add_edge(
            1,
            Edge {
                to: 2,
                length: Some(length),
                geometry: vec![[21.0000, 52.0000], [21.0010, 52.0000], [21.0010, 52.0010]],
                ..Edge::default()
            },
        );

        let dense = densify(&g, length * 0.51).unwrap();
        let chain = path_edges(&dense, 1);
        assert_eq!(chain.len(), 2);

        // Half the arclength lies past the corner, on the northward leg:
        // a straight-line split would sit near lon 21.0005 instead.
        let mid = dense.get_node(chain[0].to).unwrap();
        assert!(mid.synthetic);
        assert_almost_eq!(mid.lon, 21.0010, 1e-9);
        let along_north = (length / 2.0 - east_leg) / north_leg;
        assert_almost_eq!(mid.lat, 52.0000 + 0.001 * along_north, 1e-9);

        // Each segment's geometry is the two-point line between its endpoints.
        for edge in &chain {
            assert_eq!(edge.geometry.len(), 2);
        }
    }

    #[test]
    fn search_cost_is_preserved() {
        let g = single_edge_graph();
        let dense = densify(&g, 100.0).unwrap();

        let original = RoadGraph::new(&g, Weighting::Length);
        let densified = RoadGraph::new(&dense, Weighting::Length);

        let before = find_route(&original, 1, 2, DEFAULT_STEP_LIMIT).unwrap();
        let after = find_route(&densified, 1, 2, DEFAULT_STEP_LIMIT).unwrap();
        assert_almost_eq!(before.cost, after.cost, 1e-9);
        assert_eq!(after.nodes.len(), 4);
    }

    #[test]
    fn invalid_threshold() {
        let g = single_edge_graph();
        assert_eq!(densify(&g, 0.0), Err(DensifyError::InvalidThreshold(0.0)));
        assert_eq!(densify(&g, -5.0), Err(DensifyError::InvalidThreshold(-5.0)));
        assert!(densify(&g, f64::NAN).is_err());

        // An infinite threshold is a pointless but valid no-op.
        assert_eq!(densify(&g, f64::INFINITY).unwrap(), g);
    }
}

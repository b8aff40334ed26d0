// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::cost::{self, Weighting};
use crate::{Edge, Graph, Heuristic};

/// A search-facing view over a [Graph], deriving a single scalar cost per
/// edge under a fixed [Weighting].
///
/// The view caches the graph-wide fallback maximum speed at construction;
/// constructing a view is therefore an O(E) operation, and a fresh view must
/// be created whenever the underlying edge set changes (e.g. after
/// [densify](crate::densify)). The graph is borrowed immutably for the view's
/// lifetime and is never mutated through it.
#[derive(Debug, Clone, Copy)]
pub struct RoadGraph<'g> {
    graph: &'g Graph,
    weighting: Weighting,
    max_speed_m_s: f64,
}

impl<'g> RoadGraph<'g> {
    /// Creates a view over `graph` with the given weighting, surveying the
    /// graph for its fallback maximum speed.
    pub fn new(graph: &'g Graph, weighting: Weighting) -> Self {
        let max_speed_m_s = cost::survey_max_speed(graph);
        Self {
            graph,
            weighting,
            max_speed_m_s,
        }
    }

    /// The weighting this view derives costs under.
    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    /// The graph-wide fallback maximum speed, in metres per second.
    pub fn max_speed_m_s(&self) -> f64 {
        self.max_speed_m_s
    }

    /// The underlying graph.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Returns the neighboring nodes of `node` with the associated costs.
    ///
    /// Each neighbor appears once: when parallel edges exist, the minimum
    /// cost among the bundle is used. Edges without usable cost data are
    /// skipped and their neighbors (unless reachable over another edge) are
    /// not reported - malformed data must never default to a wrong magnitude.
    pub fn neighbors(&self, node: i64) -> Vec<(i64, f64)> {
        let mut best: BTreeMap<i64, f64> = BTreeMap::new();
        for edge in self.graph.get_edges(node) {
            if let Some(cost) = self.edge_cost(edge) {
                best.entry(edge.to)
                    .and_modify(|c| *c = c.min(cost))
                    .or_insert(cost);
            }
        }
        best.into_iter().collect()
    }

    /// Returns a node's `(lat, lon)` position, or `None` if it does not exist.
    pub fn node_coordinates(&self, node: i64) -> Option<(f64, f64)> {
        self.graph.get_node(node).map(|n| (n.lat, n.lon))
    }

    /// Returns all node identifiers present in the graph.
    pub fn all_nodes(&self) -> Vec<i64> {
        self.graph.iter().map(|n| n.id).collect()
    }

    /// Gets the minimum cost of travelling from one node to another over a
    /// direct edge. If no traversable edge exists, returns [f64::INFINITY] -
    /// absence of connectivity is data, not a fault.
    pub fn edge_weight(&self, from: i64, to: i64) -> f64 {
        self.cheapest_edge(from, to)
            .and_then(|e| self.edge_cost(e))
            .unwrap_or(f64::INFINITY)
    }

    /// Returns the cheapest traversable parallel edge from one node to
    /// another under this view's weighting, if any.
    pub fn cheapest_edge(&self, from: i64, to: i64) -> Option<&'g Edge> {
        self.graph
            .edges_between(from, to)
            .filter_map(|e| self.edge_cost(e).map(|c| (c, e)))
            .min_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap())
            .map(|(_, e)| e)
    }

    /// Returns an admissible [Heuristic] matched to this view's weighting:
    /// great-circle distance over the fallback maximum speed for travel time,
    /// plain great-circle distance for length.
    pub fn default_heuristic(&self) -> Heuristic {
        match self.weighting {
            Weighting::TravelTime => Heuristic::travel_time(self.max_speed_m_s),
            Weighting::Length => Heuristic::GreatCircle,
        }
    }

    fn edge_cost(&self, edge: &Edge) -> Option<f64> {
        cost::edge_cost(edge, self.weighting, self.max_speed_m_s)
    }
}

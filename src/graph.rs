// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{earth_distance, Edge, Node};
use std::collections::btree_map::{BTreeMap, Entry};

/// Represents a road network as a set of [Nodes](Node) and attributed
/// directed [Edges](Edge) between them.
///
/// Multiple parallel edges between the same ordered node pair are allowed
/// and represent alternative mapped road segments; their key is the position
/// within the source node's adjacency list.
///
/// A Graph is built once (by the [osm](crate::osm) loader or programmatically),
/// optionally rebuilt by [densify](crate::densify), and is read-only for the
/// remainder of its use; views and searches never mutate it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph(BTreeMap<i64, (Node, Vec<Edge>)>);

impl Graph {
    /// Creates a new, empty Graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over all [Nodes](Node) in the graph,
    /// in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.0.iter().map(|(_, (node, _))| node)
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: i64) -> Option<Node> {
        self.0.get(&id).map(|&(node, _)| node)
    }

    /// Returns the largest node id present in the graph, or 0 for an empty
    /// graph. [densify](crate::densify) allocates synthetic ids past this
    /// value, never aliasing identifiers from the original graph.
    pub fn max_node_id(&self) -> i64 {
        self.0.keys().next_back().copied().unwrap_or(0)
    }

    /// Creates or updates a [Node] with `node.id`.
    ///
    /// All outgoing and incoming edges are preserved. Updating a [Node]
    /// position desynchronizes it from edge lengths and geometries computed
    /// against the old position (and thus breaks route finding) and
    /// is therefore disallowed.
    pub fn set_node(&mut self, node: Node) {
        assert_ne!(node.id, 0);

        match self.0.entry(node.id) {
            Entry::Vacant(e) => {
                e.insert((node, Vec::default()));
            }
            Entry::Occupied(mut e) => {
                debug_assert_eq!(e.get().0.id, node.id);
                e.get_mut().0 = node;
            }
        }
    }

    /// Deletes a [Node] with a given `id`.
    ///
    /// While all outgoing edges are removed, incoming edges are preserved
    /// (as this would require a walk over all nodes in the graph).
    /// Thus, deleting a node and then re-using its id is disallowed.
    pub fn delete_node(&mut self, id: i64) {
        self.0.remove(&id);
    }

    /// Finds the closest [Node] to the given position.
    ///
    /// Synthetic nodes participate, so that positions snap to the subdivided
    /// waypoints a densified graph provides.
    ///
    /// This function requires computing the distance to every [Node] in the
    /// graph, and is not suitable for large graphs; see [KDTree](crate::KDTree).
    pub fn find_nearest_node(&self, lat: f64, lon: f64) -> Option<Node> {
        self.0
            .iter()
            .map(|(_, &(nd, _))| (earth_distance(lat, lon, nd.lat, nd.lon), nd))
            .min_by(|(a_dist, _), (b_dist, _)| a_dist.partial_cmp(b_dist).unwrap())
            .map(|(_, nd)| nd)
    }

    /// Gets all outgoing [Edges](Edge) from a node with a given id.
    pub fn get_edges(&self, from_id: i64) -> &[Edge] {
        self.0
            .get(&from_id)
            .map(|(_, e)| e.as_slice())
            .unwrap_or_default()
    }

    /// Returns all parallel [Edges](Edge) from one node to another.
    pub fn edges_between(&self, from_id: i64, to_id: i64) -> impl Iterator<Item = &Edge> {
        self.get_edges(from_id)
            .iter()
            .filter(move |e| e.to == to_id)
    }

    /// Appends an outgoing [Edge] to a node with a given id.
    ///
    /// Contrary to an upserting setter, parallel edges to the same
    /// destination accumulate; a multi-lane or duplicate mapping must never
    /// replace a cheaper alternative.
    ///
    /// Does nothing if `from_id` does not exist in the graph.
    pub fn add_edge(&mut self, from_id: i64, edge: Edge) {
        assert_ne!(from_id, 0);
        assert_ne!(edge.to, 0);

        if let Some((_, edges)) = self.0.get_mut(&from_id) {
            edges.push(edge);
        }
    }
}

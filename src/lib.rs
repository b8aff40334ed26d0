// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Cost-aware routing over [OpenStreetMap](https://www.openstreetmap.org/) road networks.
//!
//! Viaroute represents a road network as a weighted directed multigraph with
//! attributed edges (length, optional travel time, raw `maxspeed` values and
//! curve geometry), and runs A* or Dijkstra to find shortest paths between
//! nodes. The cost of each edge is derived on the fly by a [RoadGraph] view,
//! either as travel time or as plain length ([Weighting]); declared speed
//! limits in mixed units and formats are normalized by the cost model, with a
//! graph-wide fallback speed for edges that declare none.
//!
//! Long edges can be subdivided into bounded-length segments with [densify],
//! so that arbitrary positions snap to realistic waypoints along a street,
//! and a found path can be reduced back to user-facing metrics and a display
//! polyline with [path_metrics] and [path_coordinates].
//!
//! # Example
//!
//! ```no_run
//! let mut g = viaroute::Graph::new();
//! let osm_options = viaroute::osm::Options {
//!     profile: &viaroute::osm::CAR_PROFILE,
//!     file_format: viaroute::osm::FileFormat::Xml,
//!     bbox: [0.0; 4],
//! };
//! viaroute::osm::add_features_from_file(
//!     &mut g,
//!     &osm_options,
//!     "path/to/monaco.osm",
//! ).expect("failed to load monaco.osm");
//!
//! let start_node = g.find_nearest_node(43.7384, 7.4246).unwrap();
//! let end_node = g.find_nearest_node(43.7478, 7.4323).unwrap();
//!
//! let view = viaroute::RoadGraph::new(&g, viaroute::Weighting::TravelTime);
//! let route = viaroute::find_route(&view, start_node.id, end_node.id, viaroute::DEFAULT_STEP_LIMIT)
//!     .expect("failed to find route");
//!
//! let metrics = viaroute::path_metrics(&g, &route.nodes);
//! println!("Route: {:?} ({})", route.nodes, viaroute::format_distance(metrics.distance_m));
//! ```

mod cost;
mod densify;
mod distance;
mod graph;
mod heuristics;
mod kd;
mod metrics;
pub mod osm;
mod search;
mod view;

pub use cost::{parse_declared_speed_kph, Weighting, DEFAULT_MAX_SPEED_KPH};
pub use densify::{densify, DensifyError};
pub use distance::earth_distance;
pub use graph::Graph;
pub use heuristics::Heuristic;
pub use kd::KDTree;
pub use metrics::{format_distance, format_time, path_coordinates, path_metrics, PathMetrics};
pub use search::{
    find_route, find_route_dijkstra, find_route_with_heuristic, Route, SearchError,
    DEFAULT_STEP_LIMIT,
};
pub use view::RoadGraph;

/// Represents an element of the [Graph].
///
/// Nodes with `id == 0` are disallowed; zero is reserved as an absent-node
/// marker in adjacency data. Synthetic nodes are created only by [densify],
/// which places them along subdivided edges; they are never mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,

    /// True for intermediate nodes inserted by [densify],
    /// false for nodes present in the source data.
    pub synthetic: bool,
}

/// Represents an outgoing (one-way) connection from a specific [Node].
///
/// Contrary to classic weighted-graph representations, an Edge carries no
/// precomputed scalar cost; it carries the raw attributes from which a
/// [RoadGraph] view derives one under its active [Weighting]. Multiple
/// parallel edges to the same `to` node may exist in one adjacency list;
/// search always uses the cheapest of the bundle.
///
/// Due to implementation details, `to` might not exist in the [Graph].
/// Users must silently ignore such edges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Edge {
    pub to: i64,

    /// Length of the physical road segment, in metres.
    pub length: Option<f64>,

    /// Explicit traversal time, in seconds. Takes priority over any
    /// speed-derived estimate when the view weights by travel time.
    pub travel_time: Option<f64>,

    /// Raw declared speed limit values, as found in the source data.
    /// Only the first element is consulted; it may itself be a
    /// semicolon-separated list and may carry a `km/h`, `kph` or `mph` suffix.
    pub maxspeed: Vec<String>,

    /// Ordered `(lon, lat)` vertices describing the edge's physical curve,
    /// head and tail coincident with the endpoint nodes.
    /// Empty for a straight line between the endpoints.
    pub geometry: Vec<[f64; 2]>,
}

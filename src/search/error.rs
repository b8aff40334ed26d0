// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Recommended number of allowed node expansions in [find_route](crate::find_route),
/// [find_route_with_heuristic](crate::find_route_with_heuristic) and
/// [find_route_dijkstra](crate::find_route_dijkstra)
/// before [SearchError::StepLimitExceeded] is returned.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Error conditions which may occur during a shortest-path search.
///
/// Note that an unreachable goal is not an error; see [Route](crate::Route).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start or goal node doesn't exist in the graph. Callers are
    /// expected to resolve positions to existing node ids (e.g. via
    /// [Graph::find_nearest_node](crate::Graph::find_nearest_node)) before
    /// searching.
    InvalidReference(i64),

    /// Route search has exceeded its limit of steps.
    /// Either the nodes are really far apart, or no route exists.
    ///
    /// Concluding that no route exists requires traversing the whole graph,
    /// which can result in a denial-of-service. The step limit protects
    /// against resource exhaustion.
    StepLimitExceeded,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidReference(node_id) => write!(f, "invalid node: {}", node_id),
            Self::StepLimitExceeded => write!(f, "step limit exceeded"),
        }
    }
}

impl std::error::Error for SearchError {}

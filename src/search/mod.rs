// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod astar;
mod dijkstra;
mod error;

pub use astar::{find_route, find_route_with_heuristic};
pub use dijkstra::find_route_dijkstra;
pub use error::{SearchError, DEFAULT_STEP_LIMIT};

use std::collections::HashMap;

/// The result of a shortest-path search: the minimum-cost node sequence from
/// start to goal inclusive, and its total accumulated cost.
///
/// An unreachable goal is a valid, expected outcome, not an error: it is
/// represented by an empty node sequence and an infinite cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub nodes: Vec<i64>,
    pub cost: f64,
}

impl Route {
    /// True if the search reached the goal.
    pub fn is_found(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub(super) fn not_found() -> Self {
        Self {
            nodes: vec![],
            cost: f64::INFINITY,
        }
    }
}

/// Walks a predecessor map backwards from `last` to recover the node path.
pub(super) fn reconstruct_path(came_from: &HashMap<i64, i64>, mut last: i64) -> Vec<i64> {
    let mut path = vec![last];

    while let Some(&nd) = came_from.get(&last) {
        path.push(nd);
        last = nd;
    }

    path.reverse();
    return path;
}

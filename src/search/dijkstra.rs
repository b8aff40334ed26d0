// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap};

use super::{reconstruct_path, Route, SearchError};
use crate::RoadGraph;

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: i64,
    cost: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost)
    }
}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        // NOTE: We revert the order of comparison,
        // as lower costs are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other.cost.partial_cmp(&self.cost)
    }
}

impl Eq for QueueItem {}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.partial_cmp(self).unwrap()
    }
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the cheapest route between two nodes under the view's weighting.
///
/// Equivalent to A* with [Heuristic::Zero](crate::Heuristic::Zero), but
/// implemented independently, which makes it a useful cross-check for the
/// informed search. The frontier is a binary heap; nodes whose tentative
/// distance stays infinite never enter it, so the search stops as soon as
/// the goal is selected or the reachable component is exhausted.
///
/// Returns an empty [Route] with infinite cost if there is no route between
/// the two nodes, and [SearchError::InvalidReference] if either node does not
/// exist in the graph. `step_limit` behaves exactly as in
/// [find_route](crate::find_route).
pub fn find_route_dijkstra(
    view: &RoadGraph,
    from_id: i64,
    to_id: i64,
    step_limit: usize,
) -> Result<Route, SearchError> {
    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: HashMap<i64, i64> = HashMap::default();
    let mut distances: HashMap<i64, f64> = HashMap::default();
    let mut steps: usize = 0;

    if view.node_coordinates(to_id).is_none() {
        return Err(SearchError::InvalidReference(to_id));
    }
    if view.node_coordinates(from_id).is_none() {
        return Err(SearchError::InvalidReference(from_id));
    }

    queue.push(QueueItem {
        at: from_id,
        cost: 0.0,
    });
    distances.insert(from_id, 0.0);

    while let Some(item) = queue.pop() {
        if item.at == to_id {
            return Ok(Route {
                nodes: reconstruct_path(&came_from, to_id),
                cost: item.cost,
            });
        }

        // Skip stale entries for already-settled nodes.
        if item.cost > distances.get(&item.at).cloned().unwrap_or(f64::INFINITY) {
            continue;
        }

        steps += 1;
        if steps > step_limit {
            return Err(SearchError::StepLimitExceeded);
        }

        for (neighbor_id, edge_cost) in view.neighbors(item.at) {
            if view.node_coordinates(neighbor_id).is_none() {
                continue;
            }

            let neighbor_cost = item.cost + edge_cost;
            if neighbor_cost
                >= distances
                    .get(&neighbor_id)
                    .cloned()
                    .unwrap_or(f64::INFINITY)
            {
                continue;
            }

            came_from.insert(neighbor_id, item.at);
            distances.insert(neighbor_id, neighbor_cost);
            queue.push(QueueItem {
                at: neighbor_id,
                cost: neighbor_cost,
            });
        }
    }

    return Ok(Route::not_found());
}

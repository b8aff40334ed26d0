// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap};

use super::{reconstruct_path, Route, SearchError};
use crate::{Heuristic, RoadGraph};

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: i64,
    cost: f64,
    score: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.score.eq(&other.score)
    }
}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        // NOTE: We revert the order of comparison,
        // as lower scores are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other.score.partial_cmp(&self.score)
    }
}

impl Eq for QueueItem {}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.partial_cmp(self).unwrap()
    }
}

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// with the view's [default heuristic](RoadGraph::default_heuristic) to find
/// the cheapest route between two nodes under the view's weighting.
///
/// See [find_route_with_heuristic] for the full contract.
pub fn find_route(
    view: &RoadGraph,
    from_id: i64,
    to_id: i64,
    step_limit: usize,
) -> Result<Route, SearchError> {
    find_route_with_heuristic(view, from_id, to_id, &view.default_heuristic(), step_limit)
}

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// with an explicit [Heuristic] to find the cheapest route between two nodes
/// under the view's weighting.
///
/// Returns an empty [Route] with infinite cost if there is no route between
/// the two nodes, and [SearchError::InvalidReference] if either node does not
/// exist in the graph. The found route is cost-optimal provided the heuristic
/// is admissible; ties between equal-cost paths are broken arbitrarily.
///
/// `step_limit` limits how many nodes may be expanded during the search
/// before returning [SearchError::StepLimitExceeded]. Concluding that no
/// route exists requires expanding all nodes accessible from the start, which
/// is usually very time-consuming on large datasets. The recommended value is
/// [DEFAULT_STEP_LIMIT](crate::DEFAULT_STEP_LIMIT).
pub fn find_route_with_heuristic(
    view: &RoadGraph,
    from_id: i64,
    to_id: i64,
    heuristic: &Heuristic,
    step_limit: usize,
) -> Result<Route, SearchError> {
    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: HashMap<i64, i64> = HashMap::default();
    let mut known_costs: HashMap<i64, f64> = HashMap::default();
    let mut steps: usize = 0;

    let to_pos = view
        .node_coordinates(to_id)
        .ok_or(SearchError::InvalidReference(to_id))?;

    {
        let from_pos = view
            .node_coordinates(from_id)
            .ok_or(SearchError::InvalidReference(from_id))?;

        queue.push(QueueItem {
            at: from_id,
            cost: 0.0,
            score: heuristic.estimate(from_pos, to_pos),
        });
        known_costs.insert(from_id, 0.0);
    }

    while let Some(item) = queue.pop() {
        if item.at == to_id {
            return Ok(Route {
                nodes: reconstruct_path(&came_from, to_id),
                cost: item.cost,
            });
        }

        // Contrary to the wikipedia definition, we might keep multiple items
        // in the queue for the same node. Stale entries no longer represent
        // an improving cost and are skipped here rather than purged eagerly.
        if item.cost > known_costs.get(&item.at).cloned().unwrap_or(f64::INFINITY) {
            continue;
        }

        steps += 1;
        if steps > step_limit {
            return Err(SearchError::StepLimitExceeded);
        }

        for (neighbor_id, edge_cost) in view.neighbors(item.at) {
            // Check if the referred node exists
            if let Some(neighbor_pos) = view.node_coordinates(neighbor_id) {
                // Check if this is strictly the cheapest way to the neighbor
                let neighbor_cost = item.cost + edge_cost;
                if neighbor_cost
                    >= known_costs
                        .get(&neighbor_id)
                        .cloned()
                        .unwrap_or(f64::INFINITY)
                {
                    continue;
                }

                // Push the new item into the queue
                came_from.insert(neighbor_id, item.at);
                known_costs.insert(neighbor_id, neighbor_cost);
                queue.push(QueueItem {
                    at: neighbor_id,
                    cost: neighbor_cost,
                    score: neighbor_cost + heuristic.estimate(neighbor_pos, to_pos),
                });
            }
        }
    }

    return Ok(Route::not_found());
}

// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BinaryHeap;

use super::{check_reference, no_path, reconstruct_path, Route};
use crate::graph::{Edge, Graph, NodeIdx};
use crate::Result;

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: NodeIdx,
    cost: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost)
    }
}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for QueueItem {}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower costs are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other.cost.total_cmp(&self.cost)
    }
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// with a binary heap to find the shortest route between two nodes in the provided graph.
///
/// Edges are undirected and cost their [earth_distance](crate::earth_distance),
/// so the returned [Route] is the geodesically shortest chain of way-adjacent nodes.
///
/// Returns [Error::NoPathFound](crate::Error::NoPathFound) if `to` is not reachable from `from`.
pub fn find_route(g: &Graph, from: NodeIdx, to: NodeIdx) -> Result<Route> {
    check_reference(g, from)?;
    check_reference(g, to)?;

    let n = g.len();
    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: Vec<Option<NodeIdx>> = vec![None; n];
    let mut known_costs = vec![f64::INFINITY; n];
    let mut expanded: usize = 0;

    queue.push(QueueItem { at: from, cost: 0.0 });
    known_costs[from.index()] = 0.0;

    while let Some(item) = queue.pop() {
        if item.at == to {
            let route = Route::from_path(g, reconstruct_path(&came_from, to));
            log::debug!(
                "route {} -> {}: {} nodes, {:.1} m, {} nodes expanded",
                from,
                to,
                route.way().len(),
                route.length(),
                expanded,
            );
            return Ok(route);
        }

        // We might keep multiple items in the queue for the same node.
        if item.cost > known_costs[item.at.index()] {
            continue;
        }
        expanded += 1;

        for &Edge {
            to: neighbor,
            cost: edge_cost,
        } in g.get_edges(item.at)
        {
            let neighbor_cost = item.cost + edge_cost;
            if neighbor_cost >= known_costs[neighbor.index()] {
                continue;
            }

            came_from[neighbor.index()] = Some(item.at);
            known_costs[neighbor.index()] = neighbor_cost;
            queue.push(QueueItem {
                at: neighbor,
                cost: neighbor_cost,
            });
        }
    }

    log::debug!("no route {} -> {} after expanding {} nodes", from, to, expanded);
    Err(no_path(g, from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_pops_cheapest_first() {
        let mut queue = BinaryHeap::default();
        queue.push(QueueItem { at: NodeIdx(0), cost: 5.0 });
        queue.push(QueueItem { at: NodeIdx(1), cost: 1.0 });
        queue.push(QueueItem { at: NodeIdx(2), cost: 3.0 });
        let order: Vec<u32> = std::iter::from_fn(|| queue.pop()).map(|i| i.at.0).collect();
        assert_eq!(order, [1, 2, 0]);
    }
}

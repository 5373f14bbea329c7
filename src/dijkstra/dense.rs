// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::{check_reference, no_path, reconstruct_path, Route};
use crate::graph::{Edge, Graph, NodeIdx};
use crate::Result;

/// Uses the classic, O(V²) variant of [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the shortest route between two nodes in the provided graph.
///
/// On every step, all unvisited nodes are scanned for the one with the smallest
/// tentative distance (the first one found wins ties). This is only suitable
/// for graphs with up to a few thousand nodes; [find_route](super::find_route)
/// returns routes of the same length and should be preferred for anything bigger.
///
/// Returns [Error::NoPathFound](crate::Error::NoPathFound) if `to` is not reachable from `from`.
pub fn find_route_dense(g: &Graph, from: NodeIdx, to: NodeIdx) -> Result<Route> {
    check_reference(g, from)?;
    check_reference(g, to)?;

    let n = g.len();
    let mut distances = vec![f64::INFINITY; n];
    let mut came_from: Vec<Option<NodeIdx>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut expanded: usize = 0;

    distances[from.index()] = 0.0;
    let mut current = Some(from);

    while let Some(at) = current {
        if at == to {
            break;
        }

        visited[at.index()] = true;
        expanded += 1;

        for &Edge {
            to: neighbor,
            cost,
        } in g.get_edges(at)
        {
            let neighbor_cost = distances[at.index()] + cost;
            if neighbor_cost < distances[neighbor.index()] {
                distances[neighbor.index()] = neighbor_cost;
                came_from[neighbor.index()] = Some(at);
            }
        }

        current = closest_unvisited(&distances, &visited);
    }

    if distances[to.index()].is_infinite() {
        log::debug!("no route {} -> {} after expanding {} nodes", from, to, expanded);
        return Err(no_path(g, from, to));
    }

    let route = Route::from_path(g, reconstruct_path(&came_from, to));
    log::debug!(
        "route {} -> {}: {} nodes, {:.1} m, {} nodes expanded",
        from,
        to,
        route.way().len(),
        route.length(),
        expanded,
    );
    Ok(route)
}

/// Returns the unvisited node with the smallest finite tentative distance.
fn closest_unvisited(distances: &[f64], visited: &[bool]) -> Option<NodeIdx> {
    let mut best: Option<(f64, usize)> = None;

    for (i, (&d, &v)) in distances.iter().zip(visited).enumerate() {
        if v || d.is_infinite() {
            continue;
        }
        match best {
            Some((best_d, _)) if best_d <= d => {}
            _ => best = Some((d, i)),
        }
    }

    best.map(|(_, i)| NodeIdx(i as u32))
}

// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::{Graph, NodeIdx};
use crate::{earth_distance, GeoPoint};

impl Graph {
    /// Finds the closest [Node](super::Node) to the given position.
    /// Returns `None` only if the graph is empty.
    ///
    /// This function requires computing the distance to every node in the graph.
    /// Ties are resolved in favor of the node added first.
    pub fn find_nearest_node(&self, position: GeoPoint) -> Option<NodeIdx> {
        self.node_indices()
            .map(|idx| (earth_distance(position, self.node(idx).position), idx))
            .fold(None, |best: Option<(f64, NodeIdx)>, candidate| match best {
                Some((best_dist, _)) if best_dist <= candidate.0 => best,
                _ => Some(candidate),
            })
            .map(|(_, idx)| idx)
    }
}

// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicU64, Ordering};

use crate::graph::{Graph, Node, NodeIdx, Way};
use crate::{Error, GeoPoint, Result};

mod dense;
mod heap;

pub use dense::find_route_dense;
pub use heap::find_route;

static NEXT_ROUTE_ID: AtomicU64 = AtomicU64::new(1);

fn generate_route_id() -> String {
    format!("route-{}", NEXT_ROUTE_ID.fetch_add(1, Ordering::Relaxed))
}

/// Shortest path between two [Nodes](Node) of a [Graph].
///
/// The path itself is a synthetic, untagged [Way] over graph nodes.
/// A route may additionally start at a `head` node which is not part of the graph,
/// like the live position of the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    way: Way,
    head: Option<Node>,
    length: f64,
}

impl Route {
    /// Builds a route from a non-empty sequence of graph nodes.
    pub(crate) fn from_path(g: &Graph, path: Vec<NodeIdx>) -> Self {
        debug_assert!(!path.is_empty());
        let way = Way::new(generate_route_id(), path);
        let length = way.length(g);
        Self {
            way,
            head: None,
            length,
        }
    }

    /// Prepends a node from outside the graph to the route.
    pub fn with_head(mut self, g: &Graph, head: Node) -> Self {
        self.length += earth_distance_to_start(g, &self.way, &head);
        self.head = Some(head);
        self
    }

    pub fn id(&self) -> &str {
        &self.way.id
    }

    /// The graph part of the route.
    pub fn way(&self) -> &Way {
        &self.way
    }

    pub fn head(&self) -> Option<&Node> {
        self.head.as_ref()
    }

    /// First graph node of the route.
    pub fn start(&self) -> NodeIdx {
        self.way.nodes[0]
    }

    /// Last graph node of the route.
    pub fn destination(&self) -> NodeIdx {
        self.way.nodes[self.way.nodes.len() - 1]
    }

    /// Total length of the route (including the leg from the head node), in meters.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Geometry of the route, starting with the head node (if present).
    pub fn points(&self, g: &Graph) -> Vec<GeoPoint> {
        self.head
            .iter()
            .map(|n| n.position)
            .chain(
                self.way
                    .nodes
                    .iter()
                    .filter_map(|&idx| g.get_node(idx))
                    .map(|n| n.position),
            )
            .collect()
    }
}

fn earth_distance_to_start(g: &Graph, way: &Way, head: &Node) -> f64 {
    way.nodes
        .first()
        .and_then(|&idx| g.get_node(idx))
        .map(|start| head.distance_to(start))
        .unwrap_or(0.0)
}

fn check_reference(g: &Graph, idx: NodeIdx) -> Result<()> {
    if g.get_node(idx).is_some() {
        Ok(())
    } else {
        Err(Error::InvalidReference(idx))
    }
}

fn no_path(g: &Graph, from: NodeIdx, to: NodeIdx) -> Error {
    Error::NoPathFound {
        from: g.node(from).id.clone(),
        to: g.node(to).id.clone(),
    }
}

fn reconstruct_path(came_from: &[Option<NodeIdx>], mut last: NodeIdx) -> Vec<NodeIdx> {
    let mut path = vec![last];

    while let Some(nd) = came_from[last.index()] {
        path.push(nd);
        last = nd;
    }

    path.reverse();
    path
}

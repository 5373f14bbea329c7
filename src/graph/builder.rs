// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::{Entry, HashMap};

use super::{Edge, ElementRef, Graph, Node, NodeIdx, Tags, Way, WayIdx};
use crate::{earth_distance, GeoPoint};

/// Error conditions which may occur when building a [Graph].
///
/// Any error means that the partially-built graph must be discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("way {way} refers to unknown node {node}")]
    DanglingReference { way: String, node: String },

    #[error("way {0} has no nodes")]
    EmptyWay(String),
}

/// Helper object used for assembling a [Graph] from parsed nodes, ways and tags.
///
/// Nodes must be added before any way referencing them. The graph is only
/// exposed by [GraphBuilder::build], so a failure at any step leaves
/// no half-populated graph behind.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    g: Graph,
    node_ids: HashMap<String, NodeIdx>,
    way_ids: HashMap<String, WayIdx>,
}

impl GraphBuilder {
    /// Create a new, empty graph builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a node with the given id was already added.
    pub fn has_node(&self, id: &str) -> bool {
        self.node_ids.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.g.nodes.len()
    }

    pub fn way_count(&self) -> usize {
        self.g.ways.len()
    }

    /// Adds a node. The first added node becomes the [center node](Graph::center_node).
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        position: GeoPoint,
        tags: Tags,
    ) -> Result<NodeIdx, BuildError> {
        let id = id.into();
        let idx = NodeIdx(self.g.nodes.len() as u32);

        match self.node_ids.entry(id.clone()) {
            Entry::Occupied(_) => return Err(BuildError::DuplicateId { kind: "node", id }),
            Entry::Vacant(e) => {
                e.insert(idx);
            }
        }

        self.g.nodes.push(Node { id, position, tags });
        self.g.edges.push(Vec::default());
        Ok(idx)
    }

    /// Adds a way over previously-added nodes, referenced by their ids.
    pub fn add_way<I, S>(
        &mut self,
        id: impl Into<String>,
        node_ids: I,
        tags: Tags,
    ) -> Result<WayIdx, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let id = id.into();

        let nodes = node_ids
            .into_iter()
            .map(|node_id| {
                let node_id = node_id.as_ref();
                self.node_ids
                    .get(node_id)
                    .cloned()
                    .ok_or_else(|| BuildError::DanglingReference {
                        way: id.clone(),
                        node: node_id.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if nodes.is_empty() {
            return Err(BuildError::EmptyWay(id));
        }

        let idx = WayIdx(self.g.ways.len() as u32);
        match self.way_ids.entry(id.clone()) {
            Entry::Occupied(_) => return Err(BuildError::DuplicateId { kind: "way", id }),
            Entry::Vacant(e) => {
                e.insert(idx);
            }
        }

        self.create_edges(&nodes);
        self.g.ways.push(Way { id, nodes, tags });
        Ok(idx)
    }

    fn create_edges(&mut self, nodes: &[NodeIdx]) {
        nodes.windows(2).for_each(|pair| {
            let (left, right) = (pair[0], pair[1]);
            if left == right {
                return;
            }

            let cost = earth_distance(
                self.g.nodes[left.index()].position,
                self.g.nodes[right.index()].position,
            );

            self.g.edges[left.index()].push(Edge { to: right, cost });
            self.g.edges[right.index()].push(Edge { to: left, cost });
        });
    }

    /// Finishes building the [Graph].
    ///
    /// Every node and way is reachable by its id; additionally, entities with
    /// a `name` tag are reachable by that name. Keys are registered element by
    /// element (id, then name), nodes in insertion order followed by ways,
    /// and the last registration of a key wins.
    pub fn build(mut self) -> Graph {
        let g = &mut self.g;
        for (i, n) in g.nodes.iter().enumerate() {
            let r = ElementRef::Node(NodeIdx(i as u32));
            g.keys.insert(n.id.clone(), r);
            if let Some(name) = n.tags.get("name") {
                g.keys.insert(name.clone(), r);
            }
        }
        for (i, w) in g.ways.iter().enumerate() {
            let r = ElementRef::Way(WayIdx(i as u32));
            g.keys.insert(w.id.clone(), r);
            if let Some(name) = w.tags.get("name") {
                g.keys.insert(name.clone(), r);
            }
        }

        log::debug!(
            "built graph with {} nodes and {} ways",
            self.g.nodes.len(),
            self.g.ways.len()
        );
        self.g
    }
}

// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::{earth_distance, Error, GeoPoint, Result};

mod builder;
mod nearest;

pub use builder::{BuildError, GraphBuilder};

/// Key-value annotations attached to [Nodes](Node) and [Ways](Way).
pub type Tags = HashMap<String, String>;

/// Identifier given to synthetic nodes which don't belong to any map,
/// like the current position of the user. OSM ids are numeric,
/// so an id containing a space never collides with map data.
pub const DUMMY_NODE_ID: &str = "Dummy Node";

/// Position of a [Node] in the node arena of its [Graph].
///
/// Indices are only meaningful for the [Graph] which issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub(crate) u32);

impl NodeIdx {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position of a [Way] in the way arena of its [Graph].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WayIdx(pub(crate) u32);

impl WayIdx {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single geographic point with identity and tags.
///
/// Equality and hashing only consider the `id`.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub position: GeoPoint,
    pub tags: Tags,
}

impl Node {
    pub fn new(id: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            id: id.into(),
            position,
            tags: Tags::default(),
        }
    }

    /// Creates an ephemeral node outside of any map.
    pub fn dummy(position: GeoPoint) -> Self {
        Self::new(DUMMY_NODE_ID, position)
    }

    pub fn is_dummy(&self) -> bool {
        self.id == DUMMY_NODE_ID
    }

    #[inline]
    pub fn distance_to(&self, other: &Node) -> f64 {
        earth_distance(self.position, other.position)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// An ordered chain of [Nodes](Node), representing a road or a computed route.
///
/// Ways don't own their nodes - `nodes` refer to the node arena of a [Graph].
///
/// Equality and hashing only consider the `id`.
#[derive(Debug, Clone)]
pub struct Way {
    pub id: String,
    pub nodes: Vec<NodeIdx>,
    pub tags: Tags,
}

impl Way {
    pub fn new(id: impl Into<String>, nodes: Vec<NodeIdx>) -> Self {
        Self {
            id: id.into(),
            nodes,
            tags: Tags::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: NodeIdx) -> bool {
        self.nodes.contains(&node)
    }

    /// Sum of distances between consecutive nodes, in meters.
    /// References to nodes missing from `g` are skipped.
    pub fn length(&self, g: &Graph) -> f64 {
        let positions: Vec<GeoPoint> = self
            .nodes
            .iter()
            .filter_map(|&idx| g.get_node(idx))
            .map(|n| n.position)
            .collect();
        path_length(&positions)
    }
}

impl PartialEq for Way {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Way {}

impl Hash for Way {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Sum of [earth_distance] over consecutive points, in meters.
pub fn path_length(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| earth_distance(pair[0], pair[1]))
        .sum()
}

/// Union over entities which can be found in a [Graph] by a key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element<'a> {
    Node(NodeIdx, &'a Node),
    Way(WayIdx, &'a Way),
}

impl<'a> Element<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Self::Node(_, n) => &n.id,
            Self::Way(_, w) => &w.id,
        }
    }

    pub fn tags(&self) -> &'a Tags {
        match self {
            Self::Node(_, n) => &n.tags,
            Self::Way(_, w) => &w.tags,
        }
    }

    pub fn tag(&self, key: &str) -> Option<&'a str> {
        self.tags().get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ElementRef {
    Node(NodeIdx),
    Way(WayIdx),
}

/// Undirected connection between two consecutive [Nodes](Node) of some [Way].
///
/// `cost` is the [earth_distance] between the nodes, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: NodeIdx,
    pub cost: f64,
}

/// Represents a loaded map as an arena of [Nodes](Node) and [Ways](Way),
/// with adjacency derived from way membership.
///
/// Graphs are immutable once built - see [GraphBuilder].
#[derive(Debug, Default, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    ways: Vec<Way>,
    keys: HashMap<String, ElementRef>,
    edges: Vec<Vec<Edge>>,
}

impl Graph {
    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns all [Nodes](Node) in the graph, in load order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns all [Ways](Way) in the graph, in load order.
    pub fn ways(&self) -> &[Way] {
        &self.ways
    }

    /// Returns an iterator over all node indices.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIdx> {
        (0..self.nodes.len() as u32).map(NodeIdx)
    }

    /// Retrieves a [Node] at the provided index.
    pub fn get_node(&self, idx: NodeIdx) -> Option<&Node> {
        self.nodes.get(idx.index())
    }

    /// Retrieves a [Node] at the provided index.
    ///
    /// Panics if `idx` wasn't issued by this graph.
    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.index()]
    }

    pub fn get_way(&self, idx: WayIdx) -> Option<&Way> {
        self.ways.get(idx.index())
    }

    /// Resolves a node or way id, or the value of a `name` tag.
    pub fn lookup(&self, key: &str) -> Option<Element<'_>> {
        self.keys.get(key).map(|&r| match r {
            ElementRef::Node(idx) => Element::Node(idx, self.node(idx)),
            ElementRef::Way(idx) => Element::Way(idx, &self.ways[idx.index()]),
        })
    }

    /// Resolves a key (see [Graph::lookup]) which must refer to a [Node].
    pub fn lookup_node(&self, key: &str) -> Result<NodeIdx> {
        match self.lookup(key) {
            Some(Element::Node(idx, _)) => Ok(idx),
            Some(Element::Way(_, _)) => Err(Error::NotANode(key.to_string())),
            None => Err(Error::UnknownLocation(key.to_string())),
        }
    }

    /// Returns the node used as the origin for display projections -
    /// the first node of the map.
    pub fn center_node(&self) -> Result<&Node> {
        self.nodes.first().ok_or(Error::EmptyModel)
    }

    /// Gets all [Edges](Edge) incident to a node, that is the predecessors and successors
    /// of the node in every [Way] containing it.
    pub fn get_edges(&self, idx: NodeIdx) -> &[Edge] {
        self.edges
            .get(idx.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_graphs;

    #[test]
    fn node_equality_by_id() {
        let mut a = Node::new("1", GeoPoint::new(1.0, 1.0));
        let b = Node::new("1", GeoPoint::new(2.0, 2.0));
        a.tags.insert("name".to_string(), "Somewhere".to_string());
        assert_eq!(a, b);
        assert_ne!(a, Node::new("2", GeoPoint::new(1.0, 1.0)));
        assert!(Node::dummy(GeoPoint::default()).is_dummy());
    }

    #[test]
    fn map_node_named_dummy_is_not_synthetic() {
        let n = Node::new("dummy", GeoPoint::default());
        assert!(!n.is_dummy());
        assert_ne!(n, Node::dummy(GeoPoint::default()));
    }

    #[test]
    fn lookup_by_id_and_name() {
        let g = test_graphs::line();

        let a = g.lookup("a").expect("node a must exist");
        assert_eq!(a.id(), "a");
        assert!(matches!(a, Element::Node(_, _)));

        let by_name = g.lookup("Main Street").expect("way must be found by name");
        assert_eq!(by_name.id(), "w1");
        assert_eq!(by_name.tag("highway"), Some("residential"));

        let c = g.lookup("End").expect("node c must be found by name");
        assert_eq!(c.id(), "c");

        assert!(g.lookup("nowhere").is_none());
    }

    #[test]
    fn lookup_node() {
        let g = test_graphs::line();
        assert_eq!(g.node(g.lookup_node("b").unwrap()).id, "b");
        assert_eq!(
            g.lookup_node("w1"),
            Err(Error::NotANode("w1".to_string()))
        );
        assert_eq!(
            g.lookup_node("x"),
            Err(Error::UnknownLocation("x".to_string()))
        );
    }

    #[test]
    fn adjacency_from_ways() {
        let g = test_graphs::line();
        let a = g.lookup_node("a").unwrap();
        let b = g.lookup_node("b").unwrap();
        let c = g.lookup_node("c").unwrap();

        let mut from_b: Vec<NodeIdx> = g.get_edges(b).iter().map(|e| e.to).collect();
        from_b.sort();
        assert_eq!(from_b, vec![a, c]);

        // Endpoints only have a single neighbor
        assert_eq!(g.get_edges(a).len(), 1);
        assert_eq!(g.get_edges(a)[0].to, b);
        assert_eq!(g.get_edges(a)[0].cost, g.node(a).distance_to(g.node(b)));
    }

    #[test]
    fn center_node() {
        let g = test_graphs::line();
        assert_eq!(g.center_node().unwrap().id, "a");
        assert_eq!(Graph::default().center_node(), Err(Error::EmptyModel));
    }

    #[test]
    fn way_length() {
        let g = test_graphs::line();
        let w = &g.ways()[0];
        let a = g.node(g.lookup_node("a").unwrap());
        let b = g.node(g.lookup_node("b").unwrap());
        let c = g.node(g.lookup_node("c").unwrap());
        assert_eq!(w.len(), 3);
        assert!((w.length(&g) - (a.distance_to(b) + b.distance_to(c))).abs() < 1e-9);
        assert!(w.contains(g.lookup_node("b").unwrap()));
    }
}

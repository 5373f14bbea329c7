// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::path::Path;

use crate::graph::{Element, Graph, NodeIdx};
use crate::projection::{assign_display_point, ScreenPoint};
use crate::{osm, Error, Event, GeoPoint, Result, Route, RouteTracker, TrackerOptions};

/// Ties the currently loaded map together with the [RouteTracker] following it.
///
/// Until a map is [loaded](Navigator::load), every query fails with [Error::EmptyModel].
/// Loading a new map resets the tracker, as routes never outlive their map.
#[derive(Debug, Default)]
pub struct Navigator {
    graph: Option<Graph>,
    tracker: RouteTracker,
}

impl Navigator {
    pub fn new(options: TrackerOptions) -> Self {
        Self {
            graph: None,
            tracker: RouteTracker::new(options),
        }
    }

    /// Replaces the current map.
    pub fn load(&mut self, graph: Graph) {
        log::info!(
            "loaded map with {} nodes and {} ways",
            graph.len(),
            graph.ways().len()
        );
        self.graph = Some(graph);
        self.tracker.reset();
    }

    /// Parses an OSM file and replaces the current map with it.
    /// On failure, the current map and tracker state are left untouched.
    pub fn load_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        options: &osm::Options,
    ) -> Result<(), osm::Error> {
        let graph = osm::graph_from_file(options, path)?;
        self.load(graph);
        Ok(())
    }

    pub fn graph(&self) -> Result<&Graph> {
        self.graph.as_ref().ok_or(Error::EmptyModel)
    }

    pub fn tracker(&self) -> &RouteTracker {
        &self.tracker
    }

    pub fn active_route(&self) -> Option<&Route> {
        self.tracker.active_route()
    }

    /// Resolves a node/way id or a name.
    pub fn lookup(&self, key: &str) -> Result<Element<'_>> {
        self.graph()?
            .lookup(key)
            .ok_or_else(|| Error::UnknownLocation(key.to_string()))
    }

    /// Finds the node closest to the given position.
    pub fn closest_node(&self, position: GeoPoint) -> Result<NodeIdx> {
        self.graph()?
            .find_nearest_node(position)
            .ok_or(Error::EmptyModel)
    }

    /// Computes a route between two nodes, given by their ids or names,
    /// and makes it the active route.
    ///
    /// Returns `Ok(None)` if both keys refer to the same node.
    pub fn directions(&mut self, start: &str, dest: &str) -> Result<Option<&Route>> {
        let g = self.graph.as_ref().ok_or(Error::EmptyModel)?;
        let start = g.lookup_node(start)?;
        let dest = g.lookup_node(dest)?;
        self.tracker.route_between(g, start, dest)
    }

    /// Sets the "drive there" destination, given by its id or name.
    pub fn set_destination(&mut self, key: &str) -> Result<()> {
        let dest = self.graph()?.lookup_node(key)?;
        self.tracker.set_destination(dest);
        Ok(())
    }

    pub fn start_driving(&mut self) -> Result<()> {
        self.graph()?;
        self.tracker.start_driving()
    }

    /// Shorthand for [Navigator::set_destination] followed by [Navigator::start_driving].
    pub fn drive_there(&mut self, key: &str) -> Result<()> {
        self.set_destination(key)?;
        self.start_driving()
    }

    /// Feeds a live position to the tracker.
    pub fn update_position(&mut self, position: GeoPoint) -> Result<Vec<Event>> {
        let g = self.graph.as_ref().ok_or(Error::EmptyModel)?;
        self.tracker.on_position_update(g, position)
    }

    pub fn cancel(&mut self) {
        self.tracker.cancel();
    }

    /// Returns the display position of a node.
    pub fn display_point(&self, node: NodeIdx) -> Result<ScreenPoint> {
        assign_display_point(self.graph()?, node)
    }
}

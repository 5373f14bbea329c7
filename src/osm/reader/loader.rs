// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::{model, Error, Options};
use crate::graph::{Graph, GraphBuilder};
use crate::GeoPoint;

/// Helper object used for converting [OSM features](super::model::Feature)
/// into a [Graph].
pub(super) struct GraphLoader<'a> {
    b: GraphBuilder,
    options: &'a Options,
    dropped_references: usize,
    skipped_ways: usize,
}

impl<'a> GraphLoader<'a> {
    /// Create a new loader, producing an initially-empty graph.
    pub(super) fn new(options: &'a Options) -> Self {
        Self {
            b: GraphBuilder::new(),
            options,
            dropped_references: 0,
            skipped_ways: 0,
        }
    }

    /// Add all features from the provided iterator and build the [Graph].
    ///
    /// Any error discards everything loaded so far.
    pub(super) fn add_features<I>(mut self, features: I) -> Result<Graph, Error>
    where
        I: Iterator<Item = Result<model::Feature, quick_xml::Error>>,
    {
        for f in features {
            self.add_feature(f?)?;
        }

        if self.dropped_references > 0 || self.skipped_ways > 0 {
            log::warn!(
                "dropped {} references to unknown nodes, skipped {} ways without known nodes",
                self.dropped_references,
                self.skipped_ways,
            );
        }

        Ok(self.b.build())
    }

    fn add_feature(&mut self, f: model::Feature) -> Result<(), Error> {
        match f {
            model::Feature::Node(n) => self.add_node(n),
            model::Feature::Way(w) => self.add_way(w),
        }
    }

    fn add_node(&mut self, n: model::Node) -> Result<(), Error> {
        self.b.add_node(n.id, GeoPoint::new(n.lat, n.lon), n.tags)?;
        Ok(())
    }

    fn add_way(&mut self, w: model::Way) -> Result<(), Error> {
        let nodes = if self.options.strict_references {
            w.nodes
        } else {
            self.get_way_nodes(&w)
        };

        if nodes.is_empty() {
            log::debug!("skipping way {}: no known nodes", w.id);
            self.skipped_ways += 1;
            return Ok(());
        }

        self.b.add_way(w.id, nodes, w.tags)?;
        Ok(())
    }

    /// Removes references to unknown nodes.
    fn get_way_nodes(&mut self, w: &model::Way) -> Vec<String> {
        let nodes: Vec<String> = w
            .nodes
            .iter()
            .filter(|&node_id| self.b.has_node(node_id))
            .cloned()
            .collect();

        let dropped = w.nodes.len() - nodes.len();
        if dropped > 0 {
            log::debug!("way {}: dropped {} references to unknown nodes", w.id, dropped);
            self.dropped_references += dropped;
        }
        nodes
    }
}

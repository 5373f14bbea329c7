// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest-path routing and live route tracking over [OpenStreetMap](https://www.openstreetmap.org/) data.
//!
//! A map is loaded into an immutable [Graph] of [Nodes](Node) and [Ways](Way), where
//! consecutive nodes of every way are connected in both directions. Routes are found
//! with Dijkstra's algorithm over geodesic distances, and the [RouteTracker] follows
//! a moving position along the active route, re-routing when it strays off course.
//!
//! # Example
//!
//! ```no_run
//! let mut nav = osmnav::Navigator::default();
//! let options = osmnav::osm::Options::default();
//! nav.load_file("path/to/map.osm", &options)
//!     .expect("failed to load map.osm");
//!
//! let route = nav.directions("Main Street", "Town Hall")
//!     .expect("failed to find route");
//! println!("Route: {:?}", route);
//!
//! nav.drive_there("Town Hall").expect("failed to start driving");
//! for event in nav.update_position(osmnav::GeoPoint::new(52.2297, 21.0122)).unwrap() {
//!     println!("{:?}", event);
//! }
//! ```

mod dijkstra;
mod distance;
mod error;
pub mod graph;
mod navigator;
pub mod osm;
pub mod projection;
mod tracker;

#[cfg(test)]
mod test_graphs;

pub use dijkstra::{find_route, find_route_dense, Route};
pub use distance::{earth_distance, GeoPoint, EARTH_RADIUS};
pub use error::{Error, Result};
pub use graph::{Element, Graph, GraphBuilder, Node, NodeIdx, Way};
pub use navigator::Navigator;
pub use tracker::{Event, RouteTracker, TrackerOptions};

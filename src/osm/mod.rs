// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading [Graphs](crate::Graph) from [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML) files.

mod reader;

pub use reader::{graph_from_buffer, graph_from_file, graph_from_io, Error, FileFormat, Options};

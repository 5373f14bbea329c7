// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::graph::NodeIdx;

/// Error conditions which may occur when routing or tracking.
///
/// All of them, except for [Error::EmptyModel] and [Error::InvalidReference],
/// are caused by user input and should be reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The destination is not reachable from the start.
    #[error("there is no path between {from} and {to}")]
    NoPathFound { from: String, to: String },

    /// A key matches no node or way.
    #[error("unknown location: {0:?}")]
    UnknownLocation(String),

    /// A key refers to a way, while a node was required.
    #[error("not a node: {0:?}")]
    NotANode(String),

    /// "Drive there" mode requested without a destination.
    #[error("no destination selected")]
    NoDestinationSelected,

    /// Routing or tracking attempted before a map was loaded.
    #[error("no map loaded")]
    EmptyModel,

    /// A node index doesn't belong to the graph.
    #[error("invalid node: {0}")]
    InvalidReference(NodeIdx),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

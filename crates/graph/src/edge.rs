//! Undirected weighted edge.

use std::fmt;

use serde::Serialize;

use crate::{NodeId, Weight};

/// An undirected weighted edge.
///
/// Endpoints are stored normalised (`a < b`), so `Edge::new(1, 0, w)` and
/// `Edge::new(0, 1, w)` are the same edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    a: NodeId,
    b: NodeId,
    weight: Weight,
}

impl Edge {
    /// Create an edge, normalising endpoint order.
    #[must_use]
    pub const fn new(a: NodeId, b: NodeId, weight: Weight) -> Self {
        if a <= b {
            Self { a, b, weight }
        } else {
            Self { a: b, b: a, weight }
        }
    }

    /// Lower endpoint.
    #[must_use]
    pub const fn a(&self) -> NodeId {
        self.a
    }

    /// Higher endpoint.
    #[must_use]
    pub const fn b(&self) -> NodeId {
        self.b
    }

    #[must_use]
    pub const fn weight(&self) -> Weight {
        self.weight
    }

    #[must_use]
    pub const fn endpoints(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    /// Deterministic selection key shared by both MST engines:
    /// weight first, then lower endpoint, then higher endpoint.
    #[must_use]
    pub const fn selection_key(&self) -> (Weight, NodeId, NodeId) {
        (self.weight, self.a, self.b)
    }

    /// The endpoint opposite `node`, if `node` is an endpoint.
    #[must_use]
    pub const fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) = {}", self.a, self.b, self.weight)
    }
}

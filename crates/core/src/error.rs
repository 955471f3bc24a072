//! Core error types for spanstep operations.
//!
//! Every failure is typed and surfaced to the caller. A rejected graph mutation
//! leaves the graph untouched; a failed MST computation returns no partial result.

use std::path::PathBuf;

use thiserror::Error;

use crate::{NodeId, Weight};

/// Core error type for spanstep operations.
#[derive(Debug, Error)]
pub enum Error {
    // Graph construction errors
    #[error("node already exists: {id}")]
    DuplicateNode { id: NodeId },

    #[error("invalid edge ({a}, {b}): self loops are not allowed")]
    InvalidEdge { a: NodeId, b: NodeId },

    #[error("edge already exists: ({a}, {b})")]
    DuplicateEdge { a: NodeId, b: NodeId },

    #[error("invalid weight {weight} for edge ({a}, {b}): weights must be positive")]
    InvalidWeight { a: NodeId, b: NodeId, weight: Weight },

    #[error("node not found: {id}")]
    NodeNotFound { id: NodeId },

    // Computation errors
    #[error("graph is not connected: {node_count} nodes in {components} components")]
    DisconnectedGraph { node_count: usize, components: usize },

    #[error("unknown algorithm '{tag}': expected 'prim' or 'kruskal'")]
    InvalidAlgorithmSelection { tag: String },

    // Sequencer errors
    #[error("a run is already in progress")]
    AlreadyRunning,

    #[error("invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    // Input and configuration errors
    #[error("invalid edge spec '{spec}': {reason}")]
    InvalidEdgeSpec { spec: String, reason: String },

    #[error("failed to read config '{path}': {reason}")]
    ConfigReadFailed { path: PathBuf, reason: String },

    #[error("config parse error: {reason}")]
    ConfigParseFailed { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a duplicate node error.
    #[must_use]
    pub const fn duplicate_node(id: NodeId) -> Self {
        Self::DuplicateNode { id }
    }

    /// Create a self-loop error.
    #[must_use]
    pub const fn invalid_edge(a: NodeId, b: NodeId) -> Self {
        Self::InvalidEdge { a, b }
    }

    /// Create a duplicate edge error.
    #[must_use]
    pub const fn duplicate_edge(a: NodeId, b: NodeId) -> Self {
        Self::DuplicateEdge { a, b }
    }

    /// Create a non-positive weight error.
    #[must_use]
    pub const fn invalid_weight(a: NodeId, b: NodeId, weight: Weight) -> Self {
        Self::InvalidWeight { a, b, weight }
    }

    /// Create a missing node error.
    #[must_use]
    pub const fn node_not_found(id: NodeId) -> Self {
        Self::NodeNotFound { id }
    }

    /// Create a disconnected graph error.
    #[must_use]
    pub const fn disconnected(node_count: usize, components: usize) -> Self {
        Self::DisconnectedGraph {
            node_count,
            components,
        }
    }

    /// Create an unknown algorithm error.
    pub fn invalid_algorithm(tag: impl Into<String>) -> Self {
        Self::InvalidAlgorithmSelection { tag: tag.into() }
    }

    /// Create an invalid state transition error.
    pub fn invalid_transition(from: impl ToString, to: impl ToString) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Create an edge spec parse error.
    pub fn invalid_edge_spec(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEdgeSpec {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    /// Create a config read error.
    pub fn config_read_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a config parse error.
    pub fn config_parse_failed(reason: impl Into<String>) -> Self {
        Self::ConfigParseFailed {
            reason: reason.into(),
        }
    }
}

//! # Graph model
//!
//! Weighted undirected graph backed by petgraph's `UnGraph`.
//!
//! The model only grows: nodes and edges are added, never removed. Every
//! mutation is validated before it touches the underlying graph, so a rejected
//! call leaves the model exactly as it was.

use std::collections::BTreeMap;

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::{Bfs, EdgeRef};
use tracing::debug;

use crate::edge::Edge;
use crate::{Error, NodeId, Result, Weight};

/// Weighted undirected graph.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    /// The underlying undirected graph
    graph: UnGraph<NodeId, Weight>,
    /// Map from NodeId to NodeIndex, ordered so iteration is deterministic
    node_map: BTreeMap<NodeId, NodeIndex>,
}

impl GraphModel {
    /// Create an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use spanstep_graph::GraphModel;
    ///
    /// let graph = GraphModel::new();
    /// assert_eq!(graph.node_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph with nodes `0..node_count` and the given edges.
    ///
    /// # Errors
    ///
    /// Returns the first construction error raised by [`GraphModel::add_edge`].
    ///
    /// # Examples
    ///
    /// ```
    /// use spanstep_graph::GraphModel;
    ///
    /// # fn main() -> spanstep_graph::Result<()> {
    /// let graph = GraphModel::from_edges(3, [(0, 1, 4), (1, 2, 2), (0, 2, 9)])?;
    /// assert_eq!(graph.edge_count(), 3);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_edges(
        node_count: NodeId,
        edges: impl IntoIterator<Item = (NodeId, NodeId, Weight)>,
    ) -> Result<Self> {
        let mut graph = Self::new();
        for id in 0..node_count {
            graph.add_node(id)?;
        }
        for (a, b, weight) in edges {
            graph.add_edge(a, b, weight)?;
        }
        Ok(graph)
    }

    /// Add a node.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateNode` if `id` is already present.
    pub fn add_node(&mut self, id: NodeId) -> Result<()> {
        if self.node_map.contains_key(&id) {
            return Err(Error::duplicate_node(id));
        }

        let index = self.graph.add_node(id);
        self.node_map.insert(id, index);
        debug!(node = id, "Node added");

        Ok(())
    }

    /// Add an undirected edge between two existing nodes.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidEdge` if `a == b`
    /// * `Error::InvalidWeight` if `weight <= 0`
    /// * `Error::NodeNotFound` if either endpoint was never added
    /// * `Error::DuplicateEdge` if the unordered pair already has an edge
    ///
    /// # Examples
    ///
    /// ```
    /// use spanstep_graph::{Error, GraphModel};
    ///
    /// # fn main() -> spanstep_graph::Result<()> {
    /// let mut graph = GraphModel::from_edges(2, [])?;
    /// graph.add_edge(0, 1, 5)?;
    /// assert!(matches!(graph.add_edge(1, 0, 3), Err(Error::DuplicateEdge { .. })));
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: Weight) -> Result<()> {
        if a == b {
            return Err(Error::invalid_edge(a, b));
        }
        if weight <= 0 {
            return Err(Error::invalid_weight(a, b, weight));
        }

        let from = self.index_of(a)?;
        let to = self.index_of(b)?;

        if self.graph.find_edge(from, to).is_some() {
            return Err(Error::duplicate_edge(a.min(b), a.max(b)));
        }

        self.graph.add_edge(from, to, weight);
        debug!(a, b, weight, "Edge added");

        Ok(())
    }

    /// Neighbours of `node` with the connecting edge weight, sorted by neighbour id.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeNotFound` if `node` is not in the graph.
    pub fn neighbors(&self, node: NodeId) -> Result<Vec<(NodeId, Weight)>> {
        let index = self.index_of(node)?;

        let mut neighbors: Vec<(NodeId, Weight)> = self
            .graph
            .edges(index)
            .filter_map(|edge| {
                let other = if edge.source() == index {
                    edge.target()
                } else {
                    edge.source()
                };
                self.graph
                    .node_weight(other)
                    .map(|&id| (id, *edge.weight()))
            })
            .collect();
        neighbors.sort_unstable();

        Ok(neighbors)
    }

    /// Whether every node is reachable from every other node.
    ///
    /// Runs a breadth-first traversal from the lowest node id. Graphs with zero
    /// or one node are connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let Some((_, &start)) = self.node_map.first_key_value() else {
            return true;
        };

        let mut bfs = Bfs::new(&self.graph, start);
        let mut reached = 0usize;
        while bfs.next(&self.graph).is_some() {
            reached = reached.saturating_add(1);
        }

        reached == self.graph.node_count()
    }

    /// Precondition check run before any MST computation.
    ///
    /// # Errors
    ///
    /// Returns `Error::DisconnectedGraph` if the graph has more than one component.
    pub fn ensure_connected(&self) -> Result<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(Error::disconnected(self.node_count(), self.component_count()))
        }
    }

    /// Number of connected components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_map.contains_key(&id)
    }

    /// Lowest node id, the default starting node for Prim.
    #[must_use]
    pub fn lowest_node(&self) -> Option<NodeId> {
        self.node_map.keys().next().copied()
    }

    /// Node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_map.keys().copied()
    }

    /// All edges, normalised and sorted by `(a, b)`.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .graph
            .edge_references()
            .filter_map(|edge| {
                let a = self.graph.node_weight(edge.source())?;
                let b = self.graph.node_weight(edge.target())?;
                Some(Edge::new(*a, *b, *edge.weight()))
            })
            .collect();
        edges.sort_unstable_by_key(Edge::endpoints);
        edges
    }

    /// Weight of the edge between `a` and `b`, if one exists.
    #[must_use]
    pub fn weight(&self, a: NodeId, b: NodeId) -> Option<Weight> {
        let from = self.node_map.get(&a)?;
        let to = self.node_map.get(&b)?;
        let edge = self.graph.find_edge(*from, *to)?;
        self.graph.edge_weight(edge).copied()
    }

    fn index_of(&self, id: NodeId) -> Result<NodeIndex> {
        self.node_map
            .get(&id)
            .copied()
            .ok_or_else(|| Error::node_not_found(id))
    }
}

//! Minimum spanning tree result.

use serde::Serialize;

use crate::algorithm::Algorithm;
use crate::edge::Edge;
use crate::Weight;

/// Ordered MST edges plus their total weight.
///
/// Edge order is the order the algorithm selected them in. It is the replay
/// timeline and is kept exactly as produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MstResult {
    algorithm: Algorithm,
    edges: Vec<Edge>,
    total_weight: Weight,
}

impl MstResult {
    /// Wrap an ordered edge list produced by `algorithm`.
    #[must_use]
    pub fn new(algorithm: Algorithm, edges: Vec<Edge>) -> Self {
        let total_weight = edges
            .iter()
            .fold(0, |total: Weight, edge| total.saturating_add(edge.weight()));
        Self {
            algorithm,
            edges,
            total_weight,
        }
    }

    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Edges in selection order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub const fn total_weight(&self) -> Weight {
        self.total_weight
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }
}

impl<'a> IntoIterator for &'a MstResult {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

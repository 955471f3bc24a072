//! Kruskal's minimum spanning tree.
//!
//! Edges are scanned in `(weight, lower endpoint, higher endpoint)` order and
//! accepted when they join two different components of a disjoint-set forest.

use std::collections::HashMap;

use itertools::Itertools;
use petgraph::unionfind::UnionFind;
use tracing::{debug, trace};

use crate::algorithm::Algorithm;
use crate::edge::Edge;
use crate::model::GraphModel;
use crate::tree::MstResult;
use crate::{Error, NodeId, Result};

/// Kruskal's algorithm.
///
/// Every edge is scanned; the result holds the accepted edges in acceptance order.
///
/// # Errors
///
/// Returns `Error::DisconnectedGraph` if fewer than `n - 1` edges were accepted.
pub fn kruskal(graph: &GraphModel) -> Result<MstResult> {
    let slots: HashMap<NodeId, usize> = graph
        .nodes()
        .enumerate()
        .map(|(slot, node)| (node, slot))
        .collect();

    let node_count = slots.len();
    let needed = node_count.saturating_sub(1);
    let mut forest = UnionFind::<usize>::new(node_count);
    let mut tree = Vec::with_capacity(needed);

    for edge in graph.edges().into_iter().sorted_by_key(Edge::selection_key) {
        let (a, b) = edge.endpoints();
        let slot_a = slots.get(&a).copied().ok_or_else(|| Error::node_not_found(a))?;
        let slot_b = slots.get(&b).copied().ok_or_else(|| Error::node_not_found(b))?;

        if forest.union(slot_a, slot_b) {
            debug!(edge = %edge, "Kruskal accepted edge");
            tree.push(edge);
        } else {
            trace!(edge = %edge, "Kruskal skipped edge (cycle)");
        }
    }

    if tree.len() < needed {
        let components = node_count.saturating_sub(tree.len());
        return Err(Error::disconnected(node_count, components));
    }

    Ok(MstResult::new(Algorithm::Kruskal, tree))
}

//! Prim's minimum spanning tree.
//!
//! The frontier keeps one candidate edge per node outside the tree. A candidate
//! is only replaced by a strictly lighter edge, and the next edge is the minimum
//! candidate by `(weight, lower endpoint, higher endpoint)`.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::algorithm::Algorithm;
use crate::edge::Edge;
use crate::model::GraphModel;
use crate::tree::MstResult;
use crate::{Error, NodeId, Result};

/// Prim's algorithm starting from the lowest node id.
///
/// An empty graph yields an empty tree.
///
/// # Errors
///
/// Returns `Error::DisconnectedGraph` if some node cannot be reached.
pub fn prim(graph: &GraphModel) -> Result<MstResult> {
    match graph.lowest_node() {
        Some(start) => prim_from(graph, start),
        None => Ok(MstResult::new(Algorithm::Prim, Vec::new())),
    }
}

/// Prim's algorithm starting from `start`.
///
/// # Errors
///
/// * `Error::NodeNotFound` if `start` is not in the graph
/// * `Error::DisconnectedGraph` if the frontier empties before every node is reached
pub fn prim_from(graph: &GraphModel, start: NodeId) -> Result<MstResult> {
    if !graph.contains_node(start) {
        return Err(Error::node_not_found(start));
    }

    let node_count = graph.node_count();
    let mut visited = BTreeSet::from([start]);
    let mut frontier: BTreeMap<NodeId, Edge> = BTreeMap::new();
    let mut tree = Vec::with_capacity(node_count.saturating_sub(1));

    relax(graph, start, &visited, &mut frontier)?;

    while visited.len() < node_count {
        let Some((node, edge)) = frontier
            .iter()
            .min_by_key(|(_, edge)| edge.selection_key())
            .map(|(&node, &edge)| (node, edge))
        else {
            return Err(Error::disconnected(node_count, graph.component_count()));
        };

        frontier.remove(&node);
        visited.insert(node);
        tree.push(edge);
        debug!(edge = %edge, reached = node, "Prim selected edge");

        relax(graph, node, &visited, &mut frontier)?;
    }

    Ok(MstResult::new(Algorithm::Prim, tree))
}

/// Offer `node`'s edges to the frontier.
fn relax(
    graph: &GraphModel,
    node: NodeId,
    visited: &BTreeSet<NodeId>,
    frontier: &mut BTreeMap<NodeId, Edge>,
) -> Result<()> {
    for (neighbor, weight) in graph.neighbors(node)? {
        if visited.contains(&neighbor) {
            continue;
        }

        let candidate = Edge::new(node, neighbor, weight);
        match frontier.entry(neighbor) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if weight < slot.get().weight() {
                    trace!(replaced = %slot.get(), by = %candidate, "Frontier candidate improved");
                    slot.insert(candidate);
                }
            }
        }
    }

    Ok(())
}

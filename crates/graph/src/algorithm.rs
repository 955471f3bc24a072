//! Algorithm selection and the computation entry point.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::kruskal::kruskal;
use crate::model::GraphModel;
use crate::prim::{prim, prim_from};
use crate::tree::MstResult;
use crate::{Error, NodeId, Result};

/// Minimum spanning tree algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Prim,
    Kruskal,
}

impl Algorithm {
    pub const ALL: [Self; 2] = [Self::Prim, Self::Kruskal];

    /// Short lowercase tag accepted by [`Algorithm::from_str`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prim => "prim",
            Self::Kruskal => "kruskal",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prim => write!(f, "Prim's Algorithm"),
            Self::Kruskal => write!(f, "Kruskal's Algorithm"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Accepts `prim`, `prims`, `prim's`, `Prim's Algorithm` and the Kruskal
    /// equivalents, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase().replace('\u{2019}', "'");
        let name = lowered
            .strip_suffix(" algorithm")
            .unwrap_or(lowered.as_str())
            .trim_end();
        let base = name
            .strip_suffix("'s")
            .or_else(|| name.strip_suffix('s'))
            .unwrap_or(name);

        match base {
            "prim" => Ok(Self::Prim),
            "kruskal" => Ok(Self::Kruskal),
            _ => Err(Error::invalid_algorithm(s)),
        }
    }
}

/// Compute the MST of `graph` with `algorithm`.
///
/// Prim starts from the lowest node id.
///
/// # Errors
///
/// Returns `Error::DisconnectedGraph` if the graph is not connected. No partial
/// result is produced.
///
/// # Examples
///
/// ```
/// use spanstep_graph::{compute_mst, Algorithm, GraphModel};
///
/// # fn main() -> spanstep_graph::Result<()> {
/// let graph = GraphModel::from_edges(3, [(0, 1, 4), (1, 2, 2), (0, 2, 9)])?;
/// let prim = compute_mst(&graph, Algorithm::Prim)?;
/// let kruskal = compute_mst(&graph, Algorithm::Kruskal)?;
/// assert_eq!(prim.total_weight(), 6);
/// assert_eq!(prim.total_weight(), kruskal.total_weight());
/// # Ok(())
/// # }
/// ```
pub fn compute_mst(graph: &GraphModel, algorithm: Algorithm) -> Result<MstResult> {
    compute_mst_with(graph, algorithm, None)
}

/// Compute the MST of `graph`, starting Prim from `start_node` when given.
///
/// Kruskal has no starting node; `start_node` is ignored for it.
///
/// # Errors
///
/// * `Error::DisconnectedGraph` if the graph is not connected
/// * `Error::NodeNotFound` if `start_node` is not in the graph
pub fn compute_mst_with(
    graph: &GraphModel,
    algorithm: Algorithm,
    start_node: Option<NodeId>,
) -> Result<MstResult> {
    graph.ensure_connected()?;

    let result = match (algorithm, start_node) {
        (Algorithm::Prim, Some(start)) => prim_from(graph, start)?,
        (Algorithm::Prim, None) => prim(graph)?,
        (Algorithm::Kruskal, start) => {
            if let Some(start) = start {
                debug!(start, "Kruskal ignores the start node");
            }
            kruskal(graph)?
        }
    };

    info!(
        algorithm = algorithm.as_str(),
        edges = result.len(),
        total_weight = result.total_weight(),
        "MST computed"
    );

    Ok(result)
}

//! Run configuration.
//!
//! Settings come from an optional TOML file; command-line flags override them.
//!
//! ```toml
//! algorithm = "kruskal"
//! start_node = 0
//! nodes = 4
//!
//! [[edges]]
//! a = 0
//! b = 1
//! weight = 5
//!
//! [pacing]
//! begin_delay_ms = 500
//! commit_delay_ms = 250
//! ```

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use spanstep_core::{Error, Result, ResultExt};
use spanstep_graph::{Algorithm, GraphModel, NodeId, Weight};
use tracing::debug;

/// Nodes of the built-in demo graph.
pub const DEMO_NODES: NodeId = 6;

/// Built-in demo graph: a weighted chain `0-1-2-3-4-5` plus three chords.
pub const DEMO_EDGES: [(NodeId, NodeId, Weight); 8] = [
    (0, 1, 7),
    (1, 2, 3),
    (2, 3, 12),
    (3, 4, 5),
    (4, 5, 9),
    (0, 3, 6),
    (1, 4, 11),
    (2, 5, 4),
];

/// Build the demo graph.
///
/// # Errors
///
/// Never fails in practice; the signature mirrors [`GraphModel::from_edges`].
pub fn demo_graph() -> Result<GraphModel> {
    GraphModel::from_edges(DEMO_NODES, DEMO_EDGES)
}

/// One weighted edge as written in a config file or on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeConfig {
    pub a: NodeId,
    pub b: NodeId,
    pub weight: Weight,
}

impl EdgeConfig {
    #[must_use]
    pub const fn as_tuple(&self) -> (NodeId, NodeId, Weight) {
        (self.a, self.b, self.weight)
    }
}

impl FromStr for EdgeConfig {
    type Err = Error;

    /// Parses `A-B:W`, for example `0-1:4`.
    fn from_str(spec: &str) -> Result<Self> {
        let (pair, weight) = spec
            .trim()
            .split_once(':')
            .ok_or_else(|| Error::invalid_edge_spec(spec, "expected A-B:W"))?;
        let (a, b) = pair
            .split_once('-')
            .ok_or_else(|| Error::invalid_edge_spec(spec, "expected A-B before ':'"))?;

        let node = |text: &str| {
            text.trim()
                .parse::<NodeId>()
                .map_err(|e| Error::invalid_edge_spec(spec, format!("bad node id '{text}': {e}")))
        };
        let weight = weight
            .trim()
            .parse::<Weight>()
            .map_err(|e| Error::invalid_edge_spec(spec, format!("bad weight '{weight}': {e}")))?;

        Ok(Self {
            a: node(a)?,
            b: node(b)?,
            weight,
        })
    }
}

/// Delays the console renderer inserts after each half of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub begin_delay_ms: u64,
    pub commit_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            begin_delay_ms: 1200,
            commit_delay_ms: 1000,
        }
    }
}

impl PacingConfig {
    /// No delays. Used for JSON output and tests.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            begin_delay_ms: 0,
            commit_delay_ms: 0,
        }
    }

    #[must_use]
    pub const fn begin_delay(&self) -> Duration {
        Duration::from_millis(self.begin_delay_ms)
    }

    #[must_use]
    pub const fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }
}

/// Everything a run needs besides the output format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpanstepConfig {
    pub algorithm: Option<Algorithm>,
    /// Prim start node. Ignored by Kruskal.
    pub start_node: Option<NodeId>,
    /// Node count; inferred from the edges when absent.
    pub nodes: Option<NodeId>,
    pub edges: Vec<EdgeConfig>,
    pub pacing: PacingConfig,
}

impl SpanstepConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigParseFailed` if the document is not valid config.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config_parse_failed(e.to_string()))
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// * `Error::ConfigReadFailed` if the file cannot be read
    /// * `Error::ConfigParseFailed` if its contents are not valid config
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::config_read_failed(path, e.to_string()))
            .log_failure("Loading config")?;
        let config = Self::from_toml_str(&text).log_failure(path.display())?;
        debug!(path = %path.display(), edges = config.edges.len(), "Config loaded");
        Ok(config)
    }

    /// Node count to build: explicit, else one past the highest endpoint.
    #[must_use]
    pub fn node_count(&self) -> NodeId {
        self.nodes.unwrap_or_else(|| {
            self.edges
                .iter()
                .map(|edge| edge.a.max(edge.b).saturating_add(1))
                .max()
                .unwrap_or(0)
        })
    }

    /// Build the configured graph, or the demo graph when no edges are set.
    ///
    /// # Errors
    ///
    /// Any graph construction error for the configured edges.
    pub fn build_graph(&self) -> Result<GraphModel> {
        if self.edges.is_empty() {
            debug!("No edges configured, using demo graph");
            return demo_graph();
        }
        GraphModel::from_edges(
            self.node_count(),
            self.edges.iter().map(EdgeConfig::as_tuple),
        )
    }
}

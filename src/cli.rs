//! CLI command definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use spanstep_core::Result;
use spanstep_graph::{Algorithm, NodeId};

use crate::config::{EdgeConfig, SpanstepConfig};

/// spanstep - step-by-step minimum spanning trees
#[derive(Parser, Debug)]
#[command(name = "spanstep")]
#[command(version)]
#[command(about = "Compute a minimum spanning tree and replay it one edge at a time")]
#[command(
    long_about = "spanstep computes a minimum spanning tree with Prim's or Kruskal's algorithm and replays the chosen edges as a paced, cancellable timeline. Press Ctrl+C to stop a run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay the MST step by step
    Run {
        #[command(flatten)]
        graph: GraphArgs,

        /// Delay after announcing an edge, in milliseconds
        #[arg(long)]
        begin_delay_ms: Option<u64>,

        /// Delay after adding an edge, in milliseconds
        #[arg(long)]
        commit_delay_ms: Option<u64>,

        /// Print events as JSON lines without pacing
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Compute the MST and print it
    Compute {
        #[command(flatten)]
        graph: GraphArgs,

        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Graph and algorithm selection shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Algorithm: prim or kruskal
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Edge as A-B:W (repeatable). Without edges the demo graph is used
    #[arg(short, long = "edge", value_name = "A-B:W")]
    pub edges: Vec<EdgeConfig>,

    /// Number of nodes (default: highest endpoint + 1)
    #[arg(short, long)]
    pub nodes: Option<NodeId>,

    /// Prim start node (default: lowest node id)
    #[arg(long)]
    pub start_node: Option<NodeId>,

    /// TOML config file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl GraphArgs {
    /// Load the config file (if any) and apply flag overrides.
    ///
    /// # Errors
    ///
    /// Returns config read or parse errors.
    pub fn resolve(&self) -> Result<SpanstepConfig> {
        let mut config = match &self.config {
            Some(path) => SpanstepConfig::load(path)?,
            None => SpanstepConfig::default(),
        };

        if self.algorithm.is_some() {
            config.algorithm = self.algorithm;
        }
        if self.start_node.is_some() {
            config.start_node = self.start_node;
        }
        if self.nodes.is_some() {
            config.nodes = self.nodes;
        }
        if !self.edges.is_empty() {
            config.edges.clone_from(&self.edges);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use std::io::Write;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_parses_edges_and_algorithm() {
        let cli = Cli::try_parse_from([
            "spanstep",
            "run",
            "--algorithm",
            "Kruskal's Algorithm",
            "--edge",
            "0-1:4",
            "-e",
            "1-2:2",
            "--commit-delay-ms",
            "5",
        ])
        .unwrap();

        let Commands::Run {
            graph,
            commit_delay_ms,
            json,
            ..
        } = cli.command
        else {
            panic!("expected the run command");
        };
        assert_eq!(graph.algorithm, Some(Algorithm::Kruskal));
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(commit_delay_ms, Some(5));
        assert!(!json);
    }

    #[test]
    fn test_bad_algorithm_and_edge_are_rejected_by_parser() {
        assert!(Cli::try_parse_from(["spanstep", "compute", "-a", "dijkstra"]).is_err());
        assert!(Cli::try_parse_from(["spanstep", "compute", "--edge", "0:1"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "algorithm = \"prim\"\nstart_node = 2\n[[edges]]\na = 0\nb = 1\nweight = 9"
        )
        .unwrap();

        let args = GraphArgs {
            algorithm: Some(Algorithm::Kruskal),
            config: Some(file.path().to_path_buf()),
            ..GraphArgs::default()
        };
        let config = args.resolve().unwrap();

        assert_eq!(config.algorithm, Some(Algorithm::Kruskal));
        assert_eq!(config.start_node, Some(2));
        assert_eq!(config.edges.len(), 1);
    }
}

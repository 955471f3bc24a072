//! # spanstep - command-line entry point
//!
//! `spanstep run` computes the MST and replays it with pacing on Tokio's
//! blocking pool while the main task waits for either completion or Ctrl+C.
//! `spanstep compute` prints the result without replaying it.
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); stdout carries only the
//! step output.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use spanstep::cli::{Cli, Commands, GraphArgs};
use spanstep::spanstep_graph::{Algorithm, MstResult, compute_mst_with};
use spanstep::spanstep_sequencer::RunOutcome;
use spanstep::{ConsoleRenderer, JsonRenderer, Session, SpanstepConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            graph,
            begin_delay_ms,
            commit_delay_ms,
            json,
        } => {
            let mut config = load_config(&graph)?;
            if let Some(ms) = begin_delay_ms {
                config.pacing.begin_delay_ms = ms;
            }
            if let Some(ms) = commit_delay_ms {
                config.pacing.commit_delay_ms = ms;
            }
            run(config, json).await
        }
        Commands::Compute { graph, json } => compute(&load_config(&graph)?, json),
    }
}

/// Initialize tracing subscriber with environment filter, writing to stderr.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(args: &GraphArgs) -> Result<SpanstepConfig> {
    args.resolve().context("Failed to load configuration")
}

fn selected_algorithm(config: &SpanstepConfig) -> Result<Algorithm> {
    config
        .algorithm
        .context("Please select an algorithm first (--algorithm prim|kruskal)")
}

/// Replay the MST until it completes or Ctrl+C stops it.
async fn run(config: SpanstepConfig, json: bool) -> Result<()> {
    let algorithm = selected_algorithm(&config)?;
    let graph = config.build_graph().context("Invalid graph")?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Graph ready"
    );

    let mut session = Session::new(graph);
    let pacing = config.pacing;
    let sequencer = session
        .prepare_with(algorithm, config.start_node, |sequencer| {
            if json {
                sequencer.subscribe(JsonRenderer::stdout());
            } else {
                sequencer.subscribe(ConsoleRenderer::stdout(pacing));
            }
        })
        .with_context(|| format!("Cannot run {algorithm}"))?;

    if !json {
        println!("Running {algorithm}...");
    }

    let mut handle = Arc::clone(&sequencer).spawn();
    let joined = tokio::select! {
        joined = &mut handle => joined,
        () = wait_for_stop() => {
            session.stop();
            handle.await
        }
    };

    let outcome: RunOutcome = joined.context("Sequencer worker failed")??;
    info!(
        state = %outcome.state,
        committed_steps = outcome.committed_steps,
        total_steps = outcome.total_steps,
        weight = outcome.weight,
        "Run finished"
    );
    Ok(())
}

/// Print the MST without replaying it.
fn compute(config: &SpanstepConfig, json: bool) -> Result<()> {
    let algorithm = selected_algorithm(config)?;
    let graph = config.build_graph().context("Invalid graph")?;
    let result = compute_mst_with(&graph, algorithm, config.start_node)
        .with_context(|| format!("Cannot compute {algorithm}"))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to encode result")?
        );
    } else {
        print_result(&result);
    }
    Ok(())
}

fn print_result(result: &MstResult) {
    println!("{}:", result.algorithm());
    for edge in result {
        println!("  {edge}");
    }
    println!("Total MST weight = {}", result.total_weight());
}

/// Resolves on Ctrl+C. If the signal cannot be installed, never resolves.
async fn wait_for_stop() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, stopping run"),
        Err(err) => {
            error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    }
}

//! Session context.
//!
//! A session replaces process-wide "current graph" and "running" globals with
//! one owned value. It holds the graph that MST runs are computed from and the
//! sequencer of the most recent run.
//!
//! At most one sequencer per session can emit steps. A running sequencer blocks
//! `prepare` and `replace_graph`; a prepared one that has not started yet is
//! stopped before it is replaced, so a late `start()` only emits `Stopped`.

use std::sync::Arc;

use spanstep_core::{Error, Result};
use spanstep_graph::{Algorithm, GraphModel, NodeId, compute_mst_with};
use spanstep_sequencer::{AnimationState, Sequencer};
use tracing::{debug, info, warn};

/// Owner of the current graph and the active sequencer.
#[derive(Debug, Default)]
pub struct Session {
    graph: GraphModel,
    active: Option<Arc<Sequencer>>,
}

impl Session {
    #[must_use]
    pub fn new(graph: GraphModel) -> Self {
        Self {
            graph,
            active: None,
        }
    }

    #[must_use]
    pub const fn graph(&self) -> &GraphModel {
        &self.graph
    }

    /// The sequencer created by the last successful [`Session::prepare`].
    #[must_use]
    pub fn active(&self) -> Option<&Arc<Sequencer>> {
        self.active.as_ref()
    }

    /// Swap in a new graph and drop the previous run.
    ///
    /// A previous sequencer that has not started is stopped.
    ///
    /// # Errors
    ///
    /// Returns `Error::AlreadyRunning` while the active sequencer is running.
    pub fn replace_graph(&mut self, graph: GraphModel) -> Result<()> {
        self.ensure_not_running()?;
        self.retire_active()?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Graph replaced"
        );
        self.graph = graph;
        self.active = None;
        Ok(())
    }

    /// Compute the MST of the current graph and create a fresh sequencer for it.
    ///
    /// A previous sequencer that has not started is stopped and replaced.
    ///
    /// # Errors
    ///
    /// * `Error::AlreadyRunning` if the previous run is still in progress
    /// * `Error::DisconnectedGraph` if the graph is not connected
    pub fn prepare(&mut self, algorithm: Algorithm) -> Result<Arc<Sequencer>> {
        self.prepare_with(algorithm, None, |_| {})
    }

    /// Like [`Session::prepare`], with an explicit Prim start node and a hook
    /// to subscribe observers before the sequencer is shared.
    ///
    /// # Errors
    ///
    /// * `Error::AlreadyRunning` if the previous run is still in progress
    /// * `Error::DisconnectedGraph` if the graph is not connected
    /// * `Error::NodeNotFound` if `start_node` is not in the graph
    pub fn prepare_with(
        &mut self,
        algorithm: Algorithm,
        start_node: Option<NodeId>,
        configure: impl FnOnce(&mut Sequencer),
    ) -> Result<Arc<Sequencer>> {
        self.ensure_not_running()?;

        let result = compute_mst_with(&self.graph, algorithm, start_node)?;
        let mut sequencer = Sequencer::new(result);
        configure(&mut sequencer);

        self.retire_active()?;

        let sequencer = Arc::new(sequencer);
        self.active = Some(Arc::clone(&sequencer));
        debug!(algorithm = algorithm.as_str(), "Sequencer prepared");
        Ok(sequencer)
    }

    /// Stop the active run. Returns `false` when there is nothing to stop.
    pub fn stop(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|sequencer| sequencer.stop())
    }

    /// State of the active sequencer, `Idle` when none was prepared.
    #[must_use]
    pub fn status(&self) -> AnimationState {
        self.active
            .as_ref()
            .map_or(AnimationState::Idle, |sequencer| sequencer.status())
    }

    fn ensure_not_running(&self) -> Result<()> {
        if self.status() == AnimationState::Running {
            warn!("Session busy: a run is in progress");
            return Err(Error::AlreadyRunning);
        }
        Ok(())
    }

    /// Cancel an active sequencer that has not started so it can never emit
    /// steps after being replaced.
    ///
    /// If it started between the status check and the cancel, it halts at its
    /// next boundary and the caller gets `AlreadyRunning`.
    fn retire_active(&self) -> Result<()> {
        let Some(previous) = &self.active else {
            return Ok(());
        };
        match previous.status() {
            AnimationState::Running => return Err(Error::AlreadyRunning),
            AnimationState::Stopped | AnimationState::Completed => return Ok(()),
            AnimationState::Idle => {}
        }

        previous.stop();
        debug!("Unstarted sequencer cancelled before replacement");
        self.ensure_not_running()
    }
}

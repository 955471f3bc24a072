//! Step sequencer (animation controller).
//!
//! A sequencer owns one MST result, one state machine and one cancellation
//! token. `start()` walks the result's edges in order on the calling thread;
//! `stop()` and `status()` may be called concurrently from any thread.

use std::sync::Arc;

use spanstep_core::{Error, Result};
use spanstep_graph::{MstResult, Weight};
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::event::StepEvent;
use crate::observer::StepObserver;
use crate::state::{AnimationState, StateCell};

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// `Completed` or `Stopped`.
    pub state: AnimationState,
    /// Steps whose `Committed` event was emitted.
    pub committed_steps: usize,
    pub total_steps: usize,
    /// Weight of the committed edges.
    pub weight: Weight,
}

impl RunOutcome {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state == AnimationState::Completed
    }
}

/// Replays an [`MstResult`] as an ordered, cancellable stream of step events.
pub struct Sequencer {
    result: Arc<MstResult>,
    observers: Vec<Arc<dyn StepObserver>>,
    state: StateCell,
    cancel: CancelToken,
}

impl Sequencer {
    /// Create an idle sequencer for `result`.
    #[must_use]
    pub fn new(result: MstResult) -> Self {
        Self::from_shared(Arc::new(result))
    }

    /// Create an idle sequencer for a result shared with other readers.
    #[must_use]
    pub fn from_shared(result: Arc<MstResult>) -> Self {
        Self {
            result,
            observers: Vec::new(),
            state: StateCell::new(),
            cancel: CancelToken::new(),
        }
    }

    /// Register an observer. Observers receive events in registration order.
    pub fn subscribe(&mut self, observer: impl StepObserver + 'static) -> &mut Self {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Register an observer that is also held elsewhere.
    pub fn subscribe_shared(&mut self, observer: Arc<dyn StepObserver>) -> &mut Self {
        self.observers.push(observer);
        self
    }

    /// Builder form of [`Sequencer::subscribe`].
    #[must_use]
    pub fn with_observer(mut self, observer: impl StepObserver + 'static) -> Self {
        self.subscribe(observer);
        self
    }

    #[must_use]
    pub fn result(&self) -> &MstResult {
        &self.result
    }

    /// Current state.
    #[must_use]
    pub fn status(&self) -> AnimationState {
        self.state.load()
    }

    /// Token that stops this sequencer when cancelled.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Request cancellation.
    ///
    /// The running worker halts at the next step boundary. A step that has
    /// already begun still commits. Returns `true` if this call set the flag.
    pub fn stop(&self) -> bool {
        let newly_set = self.cancel.cancel();
        if newly_set {
            info!(state = %self.status(), "Stop requested");
        }
        newly_set
    }

    /// Return a finished sequencer to `Idle` and clear cancellation.
    ///
    /// The flag is cleared before the state leaves the terminal state, so a
    /// `stop()` that races with the reset survives into the next run.
    ///
    /// # Errors
    ///
    /// Returns `Error::AlreadyRunning` while a run is in progress.
    pub fn reset(&self) -> Result<()> {
        if self.status() == AnimationState::Running {
            return Err(Error::AlreadyRunning);
        }
        self.cancel.clear();

        let reopened = [AnimationState::Stopped, AnimationState::Completed]
            .into_iter()
            .any(|terminal| {
                self.state
                    .transition(terminal, AnimationState::Idle)
                    .is_ok()
            });
        if !reopened && self.status() == AnimationState::Running {
            return Err(Error::AlreadyRunning);
        }

        debug!("Sequencer reset");
        Ok(())
    }

    /// Run the timeline to completion or cancellation on the calling thread.
    ///
    /// Emits `Begin` then `Committed` for each edge, then `Finished` (or
    /// `Stopped` if cancellation was seen at a step boundary). Cancellation is
    /// an outcome, not an error.
    ///
    /// # Errors
    ///
    /// * `Error::AlreadyRunning` if another run of this sequencer is active
    /// * `Error::InvalidTransition` if the sequencer already finished and was not reset
    pub fn start(&self) -> Result<RunOutcome> {
        self.state
            .transition(AnimationState::Idle, AnimationState::Running)
            .inspect_err(|e| warn!(error = %e, "Rejected start"))?;

        let algorithm = self.result.algorithm();
        let total_steps = self.result.len();
        info!(algorithm = algorithm.as_str(), steps = total_steps, "Sequencer running");

        let mut weight: Weight = 0;
        for (index, &edge) in self.result.edges().iter().enumerate() {
            if self.cancel.is_cancelled() {
                return Ok(self.halt(index, weight));
            }

            self.emit(&StepEvent::Begin {
                index,
                total_steps,
                edge,
                weight_before: weight,
            });
            weight = weight.saturating_add(edge.weight());
            self.emit(&StepEvent::Committed {
                index,
                total_steps,
                edge,
                weight_after: weight,
            });
            debug!(index, edge = %edge, weight, "Step committed");
        }

        if self.cancel.is_cancelled() {
            return Ok(self.halt(total_steps, weight));
        }

        self.settle(AnimationState::Completed);
        self.emit(&StepEvent::Finished {
            algorithm,
            total_weight: weight,
        });
        info!(algorithm = algorithm.as_str(), total_weight = weight, "Sequencer completed");

        Ok(RunOutcome {
            state: AnimationState::Completed,
            committed_steps: total_steps,
            total_steps,
            weight,
        })
    }

    /// Run [`Sequencer::start`] on Tokio's blocking pool.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn(self: Arc<Self>) -> tokio::task::JoinHandle<Result<RunOutcome>> {
        tokio::task::spawn_blocking(move || self.start())
    }

    /// Run [`Sequencer::start`] on a dedicated OS thread.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the thread cannot be spawned.
    pub fn spawn_thread(self: Arc<Self>) -> Result<std::thread::JoinHandle<Result<RunOutcome>>> {
        std::thread::Builder::new()
            .name("spanstep-sequencer".to_string())
            .spawn(move || self.start())
            .map_err(Error::from)
    }

    fn halt(&self, committed_steps: usize, weight: Weight) -> RunOutcome {
        let algorithm = self.result.algorithm();
        self.settle(AnimationState::Stopped);
        self.emit(&StepEvent::Stopped {
            algorithm,
            committed_steps,
            weight_so_far: weight,
        });
        info!(
            algorithm = algorithm.as_str(),
            committed_steps,
            weight,
            "Sequencer stopped"
        );

        RunOutcome {
            state: AnimationState::Stopped,
            committed_steps,
            total_steps: self.result.len(),
            weight,
        }
    }

    /// Leave `Running`. Only `start` enters `Running`, so this cannot race.
    fn settle(&self, to: AnimationState) {
        if let Err(e) = self.state.transition(AnimationState::Running, to) {
            warn!(error = %e, "Unexpected state while finishing run");
        }
    }

    fn emit(&self, event: &StepEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}

impl std::fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("algorithm", &self.result.algorithm())
            .field("steps", &self.result.len())
            .field("observers", &self.observers.len())
            .field("state", &self.status())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

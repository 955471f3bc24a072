//! Step observers.

use std::sync::{Arc, Mutex, PoisonError};

use spanstep_graph::Edge;

use crate::event::{EventKind, StepEvent};

/// Receiver of step events.
///
/// Observers run on the sequencer's worker, in timeline order, one event at a
/// time. Pacing (sleeping between steps) is done here, never in the sequencer.
pub trait StepObserver: Send + Sync {
    fn on_event(&self, event: &StepEvent);
}

impl<F> StepObserver for F
where
    F: Fn(&StepEvent) + Send + Sync,
{
    fn on_event(&self, event: &StepEvent) {
        self(event);
    }
}

/// Observer that keeps every event for later inspection.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<StepEvent>>>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<StepEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events().iter().map(StepEvent::kind).collect()
    }

    /// Edges of `Committed` events, in order.
    #[must_use]
    pub fn committed_edges(&self) -> Vec<Edge> {
        self.events()
            .iter()
            .filter(|event| event.kind() == EventKind::Committed)
            .filter_map(StepEvent::edge)
            .copied()
            .collect()
    }
}

impl StepObserver for RecordingObserver {
    fn on_event(&self, event: &StepEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

//! Step events emitted by the sequencer.

use std::fmt;

use serde::Serialize;
use spanstep_graph::{Algorithm, Edge, Weight};

/// Kind of a [`StepEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Begin,
    Committed,
    Finished,
    Stopped,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Begin => "begin",
            Self::Committed => "committed",
            Self::Finished => "finished",
            Self::Stopped => "stopped",
        };
        write!(f, "{s}")
    }
}

/// One entry of the replay timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepEvent {
    /// An edge is about to be added. `weight_before` excludes it.
    Begin {
        index: usize,
        total_steps: usize,
        edge: Edge,
        weight_before: Weight,
    },
    /// An edge has been added. `weight_after` includes it.
    Committed {
        index: usize,
        total_steps: usize,
        edge: Edge,
        weight_after: Weight,
    },
    /// Every step was emitted.
    Finished {
        algorithm: Algorithm,
        total_weight: Weight,
    },
    /// The run was cancelled after `committed_steps` steps.
    Stopped {
        algorithm: Algorithm,
        committed_steps: usize,
        weight_so_far: Weight,
    },
}

impl StepEvent {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Begin { .. } => EventKind::Begin,
            Self::Committed { .. } => EventKind::Committed,
            Self::Finished { .. } => EventKind::Finished,
            Self::Stopped { .. } => EventKind::Stopped,
        }
    }

    /// The edge a step event refers to; `None` for terminal events.
    #[must_use]
    pub const fn edge(&self) -> Option<&Edge> {
        match self {
            Self::Begin { edge, .. } | Self::Committed { edge, .. } => Some(edge),
            Self::Finished { .. } | Self::Stopped { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished { .. } | Self::Stopped { .. })
    }
}

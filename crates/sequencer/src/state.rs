//! Animation state machine.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};
use spanstep_core::{Error, Result};

/// Lifecycle of a sequencer run.
///
/// `Idle → Running → {Completed | Stopped}`; a terminal state returns to `Idle`
/// only through an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationState {
    /// Not started.
    Idle,
    /// Emitting steps.
    Running,
    /// Halted by cancellation.
    Stopped,
    /// Every step emitted.
    Completed,
}

impl AnimationState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Stopped | Self::Completed)
    }

    /// Check if the state can transition to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Stopped | Self::Completed)
                | (Self::Stopped | Self::Completed, Self::Idle)
        )
    }

    const fn as_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Running => 1,
            Self::Stopped => 2,
            Self::Completed => 3,
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Running,
            2 => Self::Stopped,
            3 => Self::Completed,
            _ => Self::Idle,
        }
    }
}

impl fmt::Display for AnimationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// Atomically updated [`AnimationState`] shared between the running worker and
/// whoever polls `status()`.
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) const fn new() -> Self {
        Self(AtomicU8::new(AnimationState::Idle.as_u8()))
    }

    pub(crate) fn load(&self) -> AnimationState {
        AnimationState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Move from `from` to `to`, failing if the current state is not `from`.
    ///
    /// A run already in progress is reported as `Error::AlreadyRunning`.
    pub(crate) fn transition(&self, from: AnimationState, to: AnimationState) -> Result<()> {
        if !from.can_transition_to(to) {
            return Err(Error::invalid_transition(from, to));
        }

        self.0
            .compare_exchange(from.as_u8(), to.as_u8(), Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|actual| match AnimationState::from_u8(actual) {
                AnimationState::Running => Error::AlreadyRunning,
                other => Error::invalid_transition(other, to),
            })
    }
}

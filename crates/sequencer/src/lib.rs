//! # spanstep-sequencer
//!
//! Turns an [`MstResult`](spanstep_graph::MstResult) into an ordered, cancellable
//! timeline of step events.
//!
//! For every edge the sequencer emits a `Begin` event (weight before the edge)
//! followed by a `Committed` event (weight after it). Cancellation is checked
//! between steps only, so a step is never half emitted. The sequencer does not
//! sleep; pacing belongs to the observer.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

pub mod cancel;
pub mod event;
pub mod observer;
pub mod sequencer;
pub mod state;

pub use cancel::CancelToken;
pub use event::{EventKind, StepEvent};
pub use observer::{RecordingObserver, StepObserver};
pub use sequencer::{RunOutcome, Sequencer};
pub use state::AnimationState;

//! Step renderers.
//!
//! Both renderers are [`StepObserver`]s and run on the sequencer's worker.
//! Write failures are logged and never abort a run.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use spanstep_sequencer::{StepEvent, StepObserver};
use tracing::warn;

use crate::config::PacingConfig;

/// Human-readable line for a step event.
#[must_use]
pub fn describe(event: &StepEvent) -> String {
    match event {
        StepEvent::Begin { edge, .. } => {
            let (u, v) = edge.endpoints();
            format!("Adding edge ({u}, {v}) with weight {}", edge.weight())
        }
        StepEvent::Committed { weight_after, .. } => {
            format!("Current MST weight = {weight_after}")
        }
        StepEvent::Finished {
            algorithm,
            total_weight,
        } => format!("{algorithm} completed! Total MST weight = {total_weight}"),
        StepEvent::Stopped { .. } => "Animation stopped by user.".to_string(),
    }
}

/// Prints one line per event and paces the run.
///
/// After a `Begin` line the worker sleeps for the begin delay, after a
/// `Committed` line for the commit delay.
#[derive(Debug)]
pub struct ConsoleRenderer<W> {
    out: Mutex<W>,
    pacing: PacingConfig,
}

impl<W: Write + Send> ConsoleRenderer<W> {
    pub const fn new(out: W, pacing: PacingConfig) -> Self {
        Self {
            out: Mutex::new(out),
            pacing,
        }
    }
}

impl ConsoleRenderer<std::io::Stdout> {
    #[must_use]
    pub fn stdout(pacing: PacingConfig) -> Self {
        Self::new(std::io::stdout(), pacing)
    }
}

impl<W: Write + Send> StepObserver for ConsoleRenderer<W> {
    fn on_event(&self, event: &StepEvent) {
        write_line(&self.out, &describe(event));

        let pause = match event {
            StepEvent::Begin { .. } => self.pacing.begin_delay(),
            StepEvent::Committed { .. } => self.pacing.commit_delay(),
            StepEvent::Finished { .. } | StepEvent::Stopped { .. } => return,
        };
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }
    }
}

/// Prints every event as one JSON object per line.
#[derive(Debug)]
pub struct JsonRenderer<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonRenderer<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl JsonRenderer<std::io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> StepObserver for JsonRenderer<W> {
    fn on_event(&self, event: &StepEvent) {
        match serde_json::to_string(event) {
            Ok(line) => write_line(&self.out, &line),
            Err(e) => warn!(error = %e, kind = %event.kind(), "Failed to encode step event"),
        }
    }
}

fn write_line<W: Write>(out: &Mutex<W>, line: &str) {
    let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        warn!(error = %e, "Failed to write step output");
    }
}

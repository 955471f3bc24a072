#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # spanstep
//!
//! Minimum spanning trees, replayed one edge at a time.
//!
//! This crate ties the workspace together: a [`Session`] owns the current graph
//! and the active sequencer, [`config`] loads run settings from TOML, and
//! [`render`] provides the terminal and JSON-lines observers used by the
//! `spanstep` binary.

pub mod cli;
pub mod config;
pub mod render;
pub mod session;

pub use config::{EdgeConfig, PacingConfig, SpanstepConfig};
pub use render::{ConsoleRenderer, JsonRenderer};
pub use session::Session;

// Re-export workspace crates
pub use spanstep_core;
pub use spanstep_graph;
pub use spanstep_sequencer;

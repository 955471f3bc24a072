//! # spanstep-core
//!
//! Error taxonomy and result helpers shared by every spanstep crate.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

pub mod error;
pub mod result;

pub use error::Error;
pub use result::{Result, ResultExt};

/// Identifier of a graph node. Graph suppliers use small ids (`0..n`).
pub type NodeId = u32;

/// Edge weight. Valid weights are strictly positive.
pub type Weight = i64;

//! # spanstep-graph
//!
//! Weighted undirected graph model and the two minimum spanning tree engines.
//!
//! Both engines return an [`MstResult`] whose edge order is the order in which
//! the algorithm selected the edges. That order is the step timeline consumed by
//! `spanstep-sequencer` and is never re-sorted.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

pub mod algorithm;
pub mod edge;
pub mod kruskal;
pub mod model;
pub mod prim;
pub mod tree;

pub use algorithm::{Algorithm, compute_mst, compute_mst_with};
pub use edge::Edge;
pub use kruskal::kruskal;
pub use model::GraphModel;
pub use prim::{prim, prim_from};
pub use spanstep_core::{Error, NodeId, Result, Weight};
pub use tree::MstResult;

//! The snapshot contract: the public operation set a forkable cluster
//! snapshot exposes, its error model, and the read-view traits its
//! listings satisfy.
//!
//! This crate defines the capability set; `clustersnap-basic` and
//! `clustersnap-delta` are two implementations that satisfy it, optimized
//! for different fork-depth/state-size tradeoffs.

mod contract;
mod error;
mod views;

pub use contract::ClusterSnapshot;
pub use error::{EntityKind, SnapshotError};
pub use views::{NodeInfoView, PodView};

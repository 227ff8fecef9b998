//! Read views over a snapshot's active merged state.
//!
//! Views are not long-lived cursors: each call materializes a fresh,
//! owned copy of the active view at the moment of the call, so a caller
//! iterating a returned list sees a stable snapshot even if the underlying
//! store is mutated afterward.

use clustersnap_types::{NodeInfo, NodeName, Selector, Workload};

use crate::SnapshotError;

/// A read view over nodes and their assigned workloads.
pub trait NodeInfoView {
    /// All current `NodeInfo`s in the active view.
    fn list(&self) -> Vec<NodeInfo>;

    /// The `NodeInfo` for `name`, or `NotFound` if absent.
    fn get(&self, name: &NodeName) -> Result<NodeInfo, SnapshotError>;
}

/// A read view over workloads.
pub trait PodView {
    /// All workloads in the active view whose labels satisfy `selector`.
    fn list(&self, selector: &dyn Selector) -> Vec<Workload>;
}

//! Forkable cluster snapshot.
//!
//! An in-memory view of a compute cluster (nodes and the workloads placed
//! on them) that supports fast speculative modification with
//! commit/revert semantics, for a scheduling simulator exploring
//! hypothetical placements without mutating the authoritative view.
//!
//! Two implementations satisfy the same [`ClusterSnapshot`] contract:
//! [`BasicSnapshot`], a full-copy-on-fork reference implementation, and
//! [`DeltaSnapshot`], a layered-overlay implementation optimized for large
//! base state and many small mutations per fork. Pick `BasicSnapshot` when
//! fork depth stays shallow and cluster size is small; pick
//! `DeltaSnapshot` for the scheduling-simulator decision loop this crate
//! is built for, where hundreds of forks a second are expected.

pub use clustersnap_basic::BasicSnapshot;
pub use clustersnap_core::{ClusterSnapshot, EntityKind, NodeInfoView, PodView, SnapshotError};
pub use clustersnap_delta::DeltaSnapshot;
pub use clustersnap_types::{
    Everything, LabelSelector, Labels, Namespace, Node, NodeInfo, NodeName, PodId, PodName,
    Selector, Workload,
};

#[cfg(test)]
mod tests {
    use super::{BasicSnapshot, DeltaSnapshot};

    #[test]
    fn both_implementations_are_reachable_through_the_facade() {
        clustersnap_testkit::run_all(BasicSnapshot::new);
        clustersnap_testkit::run_all(DeltaSnapshot::new);
    }
}

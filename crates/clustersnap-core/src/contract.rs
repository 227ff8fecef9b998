//! The snapshot contract.
//!
//! One trait, two implementations (`clustersnap-basic`'s `BasicSnapshot`
//! and `clustersnap-delta`'s `DeltaSnapshot`) satisfy it. Scheduler
//! plugin code written against this trait cannot tell which store it is
//! running against: that substitutability is the point.

use clustersnap_types::{Node, NodeName, PodId, Workload};

use crate::{NodeInfoView, PodView, SnapshotError};

/// The operation set a forkable cluster snapshot exposes to callers.
///
/// All operations are synchronous and are not safe for concurrent use by
/// multiple mutators: the intended caller is a single simulator loop
/// that owns the snapshot and drives it serially.
pub trait ClusterSnapshot {
    /// The `NodeInfo` read view this implementation produces.
    type NodeInfos: NodeInfoView;
    /// The workload read view this implementation produces.
    type Pods: PodView;

    /// Add a node to the active view.
    ///
    /// # Errors
    /// [`SnapshotError::Duplicate`] if a node with that name already
    /// exists in the active view.
    fn add_node(&mut self, node: Node) -> Result<(), SnapshotError>;

    /// Add a sequence of nodes.
    ///
    /// Specified as a convenience loop over [`Self::add_node`]: on the
    /// first `Duplicate`, the loop stops and returns that error, but nodes
    /// added before the conflict remain in the active view. This is the
    /// one operation whose documented behavior leaves the store partially
    /// mutated after an `Err` return.
    fn add_nodes(&mut self, nodes: impl IntoIterator<Item = Node>) -> Result<(), SnapshotError> {
        for node in nodes {
            self.add_node(node)?;
        }
        Ok(())
    }

    /// Remove a node and every workload assigned to it, atomically.
    ///
    /// # Errors
    /// [`SnapshotError::NotFound`] if the node is absent.
    fn remove_node(&mut self, name: &NodeName) -> Result<(), SnapshotError>;

    /// Add a workload, assigning it to `node_name`.
    ///
    /// `node_name` is authoritative: the workload is recorded as assigned
    /// to `node_name` regardless of what `workload.node_name` was set to
    /// by the caller, matching the two-argument `AddPod(w, nodeName)`
    /// operation.
    ///
    /// # Errors
    /// [`SnapshotError::NotFound`] if `node_name` is absent.
    /// [`SnapshotError::Duplicate`] if the workload's id is already
    /// present.
    fn add_pod(&mut self, workload: Workload, node_name: &NodeName) -> Result<(), SnapshotError>;

    /// Remove a workload from `node_name`.
    ///
    /// # Errors
    /// [`SnapshotError::NotFound`] if `node_name` is absent, or if the
    /// workload itself is absent from that node (this crate resolves that
    /// case as `NotFound` too, for consistency with every other operation
    /// that names a missing entity).
    fn remove_pod(&mut self, id: &PodId, node_name: &NodeName) -> Result<(), SnapshotError>;

    /// Push a new overlay onto the fork stack. Always succeeds; nested
    /// forks are supported to arbitrary depth.
    fn fork(&mut self);

    /// Discard the topmost overlay, restoring the view to what it was
    /// before the matching [`Self::fork`].
    ///
    /// # Errors
    /// [`SnapshotError::InvalidOperation`] if no fork is open.
    fn revert(&mut self) -> Result<(), SnapshotError>;

    /// Merge the topmost overlay into the layer below it (or into the
    /// base, if it was the only overlay).
    ///
    /// # Errors
    /// [`SnapshotError::InvalidOperation`] if no fork is open.
    fn commit(&mut self) -> Result<(), SnapshotError>;

    /// A read view over nodes in the active merged view.
    fn node_infos(&self) -> Self::NodeInfos;

    /// A read view over workloads in the active merged view.
    fn pods(&self) -> Self::Pods;

    /// Empty the snapshot back to the empty, unforked state.
    fn clear(&mut self);
}

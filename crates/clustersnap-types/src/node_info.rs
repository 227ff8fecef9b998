//! The derived `NodeInfo` bundle.

use crate::{Node, Workload};

/// A node together with the workloads currently assigned to it.
///
/// Produced on demand by a read view; never a first-class stored entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    /// The node itself.
    pub node: Node,
    /// Workloads currently assigned to this node.
    pub workloads: Vec<Workload>,
}

impl NodeInfo {
    /// Bundle a node with its assigned workloads.
    pub fn new(node: Node, workloads: Vec<Workload>) -> Self {
        Self { node, workloads }
    }
}

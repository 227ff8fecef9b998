//! The `Workload` value type.

use crate::{Labels, Namespace, NodeName, PodId, PodName};
use serde::{Deserialize, Serialize};

/// An opaque placed unit, identified by the pair (namespace, name) and
/// assigned to exactly one node by name.
///
/// The snapshot does not interpret resource fields; scheduler plugins that
/// consume the read view do. This crate therefore carries only identity,
/// placement, and labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    /// Namespace component of this workload's identity.
    pub namespace: Namespace,
    /// Name component of this workload's identity.
    pub name: PodName,
    /// The node this workload is assigned to.
    pub node_name: NodeName,
    /// Arbitrary labels, uninterpreted by the snapshot itself.
    pub labels: Labels,
}

impl Workload {
    /// Build a workload with no labels.
    pub fn new(
        namespace: impl Into<Namespace>,
        name: impl Into<PodName>,
        node_name: impl Into<NodeName>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            node_name: node_name.into(),
            labels: Labels::new(),
        }
    }

    /// Build a workload with the given labels.
    pub fn with_labels(
        namespace: impl Into<Namespace>,
        name: impl Into<PodName>,
        node_name: impl Into<NodeName>,
        labels: Labels,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            node_name: node_name.into(),
            labels,
        }
    }

    /// This workload's (namespace, name) identity.
    pub fn id(&self) -> PodId {
        PodId::new(self.namespace.clone(), self.name.clone())
    }
}

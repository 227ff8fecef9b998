//! Read views for [`crate::DeltaSnapshot`].

use clustersnap_core::{NodeInfoView, PodView, SnapshotError};
use clustersnap_types::{NodeInfo, NodeName, Selector, Workload};

/// An eagerly-materialized, copy-on-read `NodeInfo` listing.
pub struct DeltaNodeInfos {
    pub(crate) items: Vec<NodeInfo>,
}

impl NodeInfoView for DeltaNodeInfos {
    fn list(&self) -> Vec<NodeInfo> {
        self.items.clone()
    }

    fn get(&self, name: &NodeName) -> Result<NodeInfo, SnapshotError> {
        self.items
            .iter()
            .find(|info| &info.node.name == name)
            .cloned()
            .ok_or_else(|| SnapshotError::node_not_found(name))
    }
}

/// An eagerly-materialized workload listing.
pub struct DeltaPods {
    pub(crate) items: Vec<Workload>,
}

impl PodView for DeltaPods {
    fn list(&self, selector: &dyn Selector) -> Vec<Workload> {
        self.items
            .iter()
            .filter(|workload| selector.matches(&workload.labels))
            .cloned()
            .collect()
    }
}

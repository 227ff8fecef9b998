//! Read views for [`crate::BasicSnapshot`].

use clustersnap_core::{NodeInfoView, PodView, SnapshotError};
use clustersnap_types::{NodeInfo, NodeName, Selector, Workload};

/// An eagerly-materialized `NodeInfo` listing.
///
/// Built once, at the moment [`crate::BasicSnapshot::node_infos`] is
/// called; later mutations to the snapshot do not affect an already
/// returned view.
pub struct BasicNodeInfos {
    pub(crate) items: Vec<NodeInfo>,
}

impl NodeInfoView for BasicNodeInfos {
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
pub struct BasicPods {
    pub(crate) items: Vec<Workload>,
}

impl PodView for BasicPods {
    fn list(&self, selector: &dyn Selector) -> Vec<Workload> {
        self.items
            .iter()
            .filter(|workload| selector.matches(&workload.labels))
            .cloned()
            .collect()
    }
}

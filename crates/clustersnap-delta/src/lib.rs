//! The delta cluster snapshot store: a layered overlay over a base,
//! optimized for large base state and many small mutations per fork.

mod layer;
mod store;
mod views;

pub use store::DeltaSnapshot;
pub use views::{DeltaNodeInfos, DeltaPods};

#[cfg(test)]
mod tests {
    use super::DeltaSnapshot;
    use clustersnap_basic::BasicSnapshot;
    use clustersnap_core::{ClusterSnapshot, NodeInfoView, PodView};
    use clustersnap_testkit::ClusterFixture;
    use clustersnap_types::{Everything, Node, NodeName};

    #[test]
    fn satisfies_the_shared_property_suite() {
        clustersnap_testkit::run_all(DeltaSnapshot::new);
    }

    /// Invariant 5: Basic and Delta produce element-wise identical
    /// listings after the same script of operations.
    #[test]
    fn matches_basic_store_element_wise() {
        let fixture = ClusterFixture::seeded(42, 4, 10);

        let mut basic = BasicSnapshot::new();
        let mut delta = DeltaSnapshot::new();

        for node in fixture.nodes.clone() {
            basic.add_node(node.clone()).unwrap();
            delta.add_node(node).unwrap();
        }

        basic.fork();
        delta.fork();
        for workload in fixture.workloads.clone() {
            let node_name = workload.node_name.clone();
            basic.add_pod(workload.clone(), &node_name).unwrap();
            delta.add_pod(workload, &node_name).unwrap();
        }

        let to_remove: Vec<_> = fixture.workloads.iter().take(5).map(|w| w.id()).collect();
        for id in &to_remove {
            let node_name = fixture
                .workloads
                .iter()
                .find(|w| &w.id() == id)
                .unwrap()
                .node_name
                .clone();
            basic.remove_pod(id, &node_name).unwrap();
            delta.remove_pod(id, &node_name).unwrap();
        }

        basic.commit().unwrap();
        delta.commit().unwrap();

        let mut basic_ids: Vec<String> = basic
            .pods()
            .list(&Everything)
            .into_iter()
            .map(|w| w.id().to_string())
            .collect();
        let mut delta_ids: Vec<String> = delta
            .pods()
            .list(&Everything)
            .into_iter()
            .map(|w| w.id().to_string())
            .collect();
        basic_ids.sort();
        delta_ids.sort();
        assert_eq!(basic_ids, delta_ids);

        let mut basic_nodes: Vec<String> = basic
            .node_infos()
            .list()
            .into_iter()
            .map(|n| n.node.name.to_string())
            .collect();
        let mut delta_nodes: Vec<String> = delta
            .node_infos()
            .list()
            .into_iter()
            .map(|n| n.node.name.to_string())
            .collect();
        basic_nodes.sort();
        delta_nodes.sort();
        assert_eq!(basic_nodes, delta_nodes);
    }

    /// Delta-only: removing a node only present in a lower layer installs
    /// a tombstone without copying the node into the top layer's added
    /// set.
    #[test]
    fn remove_of_lower_layer_node_is_a_tombstone_not_a_copy() {
        let mut snap = DeltaSnapshot::new();
        snap.add_node(Node::new("base-node")).unwrap();

        snap.fork();
        snap.remove_node(&NodeName::new("base-node")).unwrap();
        assert!(snap.node_infos().get(&NodeName::new("base-node")).is_err());

        snap.revert().unwrap();
        assert!(snap.node_infos().get(&NodeName::new("base-node")).is_ok());
    }

    /// Delta-only: workload removal on a node that only exists in a lower
    /// layer must not implicitly copy the node into the top layer.
    #[test]
    fn pod_removal_does_not_implicitly_copy_node() {
        use clustersnap_types::Workload;

        let mut snap = DeltaSnapshot::new();
        snap.add_node(Node::new("h")).unwrap();
        let node_name = NodeName::new("h");
        snap.add_pod(Workload::new("default", "p", node_name.clone()), &node_name)
            .unwrap();

        snap.fork();
        let id = clustersnap_types::PodId::new("default", "p");
        snap.remove_pod(&id, &node_name).unwrap();
        assert_eq!(snap.node_infos().get(&node_name).unwrap().workloads.len(), 0);

        snap.revert().unwrap();
        assert_eq!(snap.node_infos().get(&node_name).unwrap().workloads.len(), 1);
    }
}

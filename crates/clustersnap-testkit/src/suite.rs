//! The shared property suite, generic over any [`ClusterSnapshot`]
//! implementation.
//!
//! Each function is one invariant or end-to-end scenario every
//! implementation must satisfy. A consuming crate's `#[cfg(test)]` module
//! calls [`run_all`] (or the
//! individual functions, for a finer-grained failure message) with a
//! factory that builds a fresh, empty snapshot of the implementation under
//! test.

use clustersnap_core::{ClusterSnapshot, EntityKind, NodeInfoView, PodView, SnapshotError};
use clustersnap_types::{Everything, Node, NodeName, PodId, Workload};

use crate::fixture::ClusterFixture;

fn sorted_node_names<S: ClusterSnapshot>(snap: &S) -> Vec<String> {
    let mut names: Vec<String> = snap
        .node_infos()
        .list()
        .into_iter()
        .map(|info| info.node.name.to_string())
        .collect();
    names.sort();
    names
}

fn sorted_pod_ids<S: ClusterSnapshot>(snap: &S) -> Vec<String> {
    let mut ids: Vec<String> = snap
        .pods()
        .list(&Everything)
        .into_iter()
        .map(|w| w.id().to_string())
        .collect();
    ids.sort();
    ids
}

/// Run every invariant and scenario in this module against a fresh
/// snapshot built by `factory`.
pub fn run_all<S: ClusterSnapshot>(factory: impl Fn() -> S) {
    fork_revert_is_identity(&factory);
    fork_commit_equals_unforked(&factory);
    remove_node_clears_workloads(&factory);
    add_remove_add_same_layer(&factory);
    nested_forks_restore_exactly(&factory);
    fork_does_not_leak_node_additions(&factory);
    fork_does_not_leak_pod_additions(&factory);
    fork_does_not_leak_pod_removals(&factory);
    readd_after_remove_across_commit(&factory);
    not_found_surface(&factory);
    commit_of_add_pod_then_remove_host(&factory);
    add_nodes_stops_at_first_duplicate(&factory);
    remove_pod_missing_on_present_node_is_not_found(&factory);
}

/// Invariant 1: `Fork -> mutations -> Revert` equals the view just before
/// `Fork`.
pub fn fork_revert_is_identity<S: ClusterSnapshot>(factory: &impl Fn() -> S) {
    let mut snap = factory();
    let fixture = ClusterFixture::seeded(1, 3, 2);
    for node in fixture.nodes.clone() {
        snap.add_node(node).unwrap();
    }
    for workload in fixture.workloads.clone() {
        let node_name = workload.node_name.clone();
        snap.add_pod(workload, &node_name).unwrap();
    }

    let before_nodes = sorted_node_names(&snap);
    let before_pods = sorted_pod_ids(&snap);

    snap.fork();
    snap.add_node(Node::new("scratch")).unwrap();
    snap.remove_node(&NodeName::new("node-0")).unwrap();

    snap.revert().unwrap();

    assert_eq!(sorted_node_names(&snap), before_nodes);
    assert_eq!(sorted_pod_ids(&snap), before_pods);
}

/// Invariant 2: `Fork -> mutations -> Commit` equals applying the same
/// mutations with no fork at all.
pub fn fork_commit_equals_unforked<S: ClusterSnapshot>(factory: &impl Fn() -> S) {
    let fixture = ClusterFixture::seeded(2, 2, 3);

    let mut forked = factory();
    for node in fixture.nodes.clone() {
        forked.add_node(node).unwrap();
    }
    forked.fork();
    for workload in fixture.workloads.clone() {
        let node_name = workload.node_name.clone();
        forked.add_pod(workload, &node_name).unwrap();
    }
    forked.commit().unwrap();

    let mut unforked = factory();
    for node in fixture.nodes.clone() {
        unforked.add_node(node).unwrap();
    }
    for workload in fixture.workloads.clone() {
        let node_name = workload.node_name.clone();
        unforked.add_pod(workload, &node_name).unwrap();
    }

    assert_eq!(sorted_node_names(&forked), sorted_node_names(&unforked));
    assert_eq!(sorted_pod_ids(&forked), sorted_pod_ids(&unforked));
}

/// Invariant 3: `RemoveNode` implies `Get` returns `NotFound` and no
/// workload in any listing is assigned to that node.
pub fn remove_node_clears_workloads<S: ClusterSnapshot>(factory: &impl Fn() -> S) {
    let mut snap = factory();
    let fixture = ClusterFixture::seeded(3, 2, 4);
    for node in fixture.nodes.clone() {
        snap.add_node(node).unwrap();
    }
    for workload in fixture.workloads.clone() {
        let node_name = workload.node_name.clone();
        snap.add_pod(workload, &node_name).unwrap();
    }

    let target = NodeName::new("node-0");
    snap.remove_node(&target).unwrap();

    assert!(matches!(
        snap.node_infos().get(&target),
        Err(SnapshotError::NotFound { .. })
    ));
    assert!(snap
        .pods()
        .list(&Everything)
        .iter()
        .all(|w| w.node_name != target));
}

/// Invariant 4: `AddNode` then `RemoveNode` in the same layer leaves no
/// trace; re-`AddNode` afterward succeeds without `Duplicate`.
pub fn add_remove_add_same_layer<S: ClusterSnapshot>(factory: &impl Fn() -> S) {
    let mut snap = factory();
    let name = NodeName::new("x");
    snap.add_node(Node::new(name.clone())).unwrap();
    snap.remove_node(&name).unwrap();
    assert!(snap.node_infos().get(&name).is_err());

    snap.add_node(Node::new(name.clone())).unwrap();
    assert!(snap.node_infos().get(&name).is_ok());
}

/// Invariant 6: k successive `Fork`s followed by k `Revert`s restore the
/// original view exactly, for any k >= 0.
pub fn nested_forks_restore_exactly<S: ClusterSnapshot>(factory: &impl Fn() -> S) {
    let mut snap = factory();
    let fixture = ClusterFixture::seeded(4, 3, 1);
    for node in fixture.nodes.clone() {
        snap.add_node(node).unwrap();
    }
    let before = sorted_node_names(&snap);

    for k in 0..5usize {
        for depth in 0..k {
            snap.fork();
            snap.add_node(Node::new(format!("depth-{depth}"))).unwrap();
        }
        for _ in 0..k {
            snap.revert().unwrap();
        }
        assert_eq!(sorted_node_names(&snap), before, "k={k}");
    }
}

/// Scenario 1: fork does not leak node additions.
pub fn fork_does_not_leak_node_additions<S: ClusterSnapshot>(factory: &impl Fn() -> S) {
    let mut snap = factory();
    for i in 0..3 {
        snap.add_node(Node::new(format!("n{i}"))).unwrap();
    }
    snap.fork();
    snap.add_node(Node::new("tmp0")).unwrap();
    snap.add_node(Node::new("tmp1")).unwrap();

    assert_eq!(
        sorted_node_names(&snap),
        vec!["n0", "n1", "n2", "tmp0", "tmp1"]
    );

    snap.revert().unwrap();
    assert_eq!(sorted_node_names(&snap), vec!["n0", "n1", "n2"]);
}

/// Scenario 2: fork does not leak workload additions.
pub fn fork_does_not_leak_pod_additions<S: ClusterSnapshot>(factory: &impl Fn() -> S) {
    let mut snap = factory();
    let fixture = ClusterFixture::seeded(5, 3, 0);
    for node in fixture.nodes.clone() {
        snap.add_node(node).unwrap();
    }

    snap.fork();
    let fixture = ClusterFixture::seeded(5, 3, 30);
    for workload in fixture.workloads {
        let node_name = workload.node_name.clone();
        snap.add_pod(workload, &node_name).unwrap();
    }
    assert_eq!(snap.pods().list(&Everything).len(), 90);
    assert_eq!(snap.node_infos().list().len(), 3);

    snap.revert().unwrap();
    assert_eq!(snap.pods().list(&Everything).len(), 0);
    assert_eq!(snap.node_infos().list().len(), 3);
}

/// Scenario 3: fork does not leak workload removals.
pub fn fork_does_not_leak_pod_removals<S: ClusterSnapshot>(factory: &impl Fn() -> S) {
    let mut snap = factory();
    let fixture = ClusterFixture::seeded(6, 3, 30);
    for node in fixture.nodes.clone() {
        snap.add_node(node).unwrap();
    }
    let mut ids = Vec::new();
    for workload in fixture.workloads {
        let node_name = workload.node_name.clone();
        ids.push((workload.id(), node_name.clone()));
        snap.add_pod(workload, &node_name).unwrap();
    }
    assert_eq!(snap.pods().list(&Everything).len(), 90);

    snap.fork();
    for (id, node_name) in ids.iter().take(10) {
        snap.remove_pod(id, node_name).unwrap();
    }
    assert_eq!(snap.pods().list(&Everything).len(), 80);
    for info in snap.node_infos().list() {
        assert!(info.workloads.iter().all(|w| !ids
            .iter()
            .take(10)
            .any(|(id, _)| *id == w.id())));
    }

    snap.revert().unwrap();
    assert_eq!(snap.pods().list(&Everything).len(), 90);
}

/// Scenario 4: re-add after remove, then commit.
pub fn readd_after_remove_across_commit<S: ClusterSnapshot>(factory: &impl Fn() -> S) {
    let mut snap = factory();
    let x = NodeName::new("x");
    snap.add_node(Node::new(x.clone())).unwrap();

    snap.fork();
    snap.remove_node(&x).unwrap();
    snap.add_node(Node::new(x.clone())).unwrap();
    assert_eq!(sorted_node_names(&snap), vec!["x"]);

    snap.commit().unwrap();
    assert_eq!(sorted_node_names(&snap), vec!["x"]);
}

/// Scenario 5: `NotFound` surfaces for every operation naming a node, in
/// every lifecycle state that should produce it.
pub fn not_found_surface<S: ClusterSnapshot>(factory: &impl Fn() -> S) {
    let missing = NodeName::new("ghost");
    let pod_id = PodId::new("default", "p");

    // Empty snapshot.
    let mut snap = factory();
    assert!(snap.node_infos().get(&missing).is_err());
    assert!(snap.remove_node(&missing).is_err());
    assert!(snap
        .add_pod(Workload::new("default", "p", missing.clone()), &missing)
        .is_err());
    assert!(snap.remove_pod(&pod_id, &missing).is_err());

    // After Fork then RemoveNode(x) on base.
    let mut snap = factory();
    snap.add_node(Node::new("x")).unwrap();
    snap.fork();
    snap.remove_node(&NodeName::new("x")).unwrap();
    assert!(snap.node_infos().get(&NodeName::new("x")).is_err());
    assert!(snap.remove_node(&NodeName::new("x")).is_err());

    // RemoveNode(x) on base, no fork.
    let mut snap = factory();
    snap.add_node(Node::new("x")).unwrap();
    snap.remove_node(&NodeName::new("x")).unwrap();
    assert!(snap.node_infos().get(&NodeName::new("x")).is_err());

    // After Commit of a fork that removed x.
    let mut snap = factory();
    snap.add_node(Node::new("x")).unwrap();
    snap.fork();
    snap.remove_node(&NodeName::new("x")).unwrap();
    snap.commit().unwrap();
    assert!(snap.node_infos().get(&NodeName::new("x")).is_err());
}

/// Scenario 6: commit of a fork that adds a pod then removes its host.
pub fn commit_of_add_pod_then_remove_host<S: ClusterSnapshot>(factory: &impl Fn() -> S) {
    let mut snap = factory();
    let x = NodeName::new("x");
    snap.add_node(Node::new(x.clone())).unwrap();

    snap.fork();
    snap.add_pod(Workload::new("default", "p", x.clone()), &x)
        .unwrap();
    snap.remove_node(&x).unwrap();
    snap.commit().unwrap();

    assert!(snap.node_infos().list().is_empty());
    assert!(snap.pods().list(&Everything).is_empty());
}

/// §7/§9 open question 2: `AddNodes` keeps prior additions on a mid-batch
/// duplicate and returns the first error.
pub fn add_nodes_stops_at_first_duplicate<S: ClusterSnapshot>(factory: &impl Fn() -> S) {
    let mut snap = factory();
    snap.add_node(Node::new("a")).unwrap();

    let batch = vec![Node::new("b"), Node::new("c"), Node::new("a"), Node::new("d")];
    let result = snap.add_nodes(batch);

    assert!(matches!(
        result,
        Err(SnapshotError::Duplicate {
            kind: EntityKind::Node,
            ..
        })
    ));
    assert_eq!(sorted_node_names(&snap), vec!["a", "b", "c"]);
}

/// §9 open question 1: `RemovePod` on a present node with an absent
/// workload resolves to `NotFound` scoped to the workload, not the node.
pub fn remove_pod_missing_on_present_node_is_not_found<S: ClusterSnapshot>(
    factory: &impl Fn() -> S,
) {
    let mut snap = factory();
    let x = NodeName::new("x");
    snap.add_node(Node::new(x.clone())).unwrap();

    let ghost = PodId::new("default", "p");
    let result = snap.remove_pod(&ghost, &x);

    assert!(matches!(
        result,
        Err(SnapshotError::NotFound {
            kind: EntityKind::Workload,
            ..
        })
    ));
}

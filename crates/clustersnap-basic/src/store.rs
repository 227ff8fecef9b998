//! The basic store: the simplest correct implementation.
//!
//! State is a single `name -> Node` mapping plus a `(ns, name) -> Workload`
//! mapping, both `IndexMap`s so listings stay in insertion order across
//! calls when nothing has mutated. `Fork` captures a deep structural copy
//! of both mappings (the contained `Node`/`Workload` values are cheap,
//! owned clones; there is no shared mutable storage to alias) and pushes
//! the previous state onto a stack of saved states; `Revert` pops and
//! installs it; `Commit` simply discards it. This makes fork cost
//! O(|Nodes| + |Workloads|) and mutation cost O(1) amortized: correct and
//! obvious, serving as the reference semantics the delta store is tested
//! against.

use clustersnap_core::{ClusterSnapshot, SnapshotError};
use clustersnap_types::{Node, NodeInfo, NodeName, PodId, Workload};
use indexmap::IndexMap;

use crate::views::{BasicNodeInfos, BasicPods};

type NodeMap = IndexMap<NodeName, Node>;
type PodMap = IndexMap<PodId, Workload>;

/// The full-copy-on-fork cluster snapshot.
#[derive(Debug, Default)]
pub struct BasicSnapshot {
    nodes: NodeMap,
    workloads: PodMap,
    saved: Vec<(NodeMap, PodMap)>,
}

impl BasicSnapshot {
    /// An empty, unforked snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    fn node_infos_vec(&self) -> Vec<NodeInfo> {
        self.nodes
            .values()
            .map(|node| {
                let workloads = self
                    .workloads
                    .values()
                    .filter(|w| w.node_name == node.name)
                    .cloned()
                    .collect();
                NodeInfo::new(node.clone(), workloads)
            })
            .collect()
    }
}

impl ClusterSnapshot for BasicSnapshot {
    type NodeInfos = BasicNodeInfos;
    type Pods = BasicPods;

    fn add_node(&mut self, node: Node) -> Result<(), SnapshotError> {
        if self.nodes.contains_key(&node.name) {
            return Err(SnapshotError::node_duplicate(&node.name));
        }
        self.nodes.insert(node.name.clone(), node);
        Ok(())
    }

    fn remove_node(&mut self, name: &NodeName) -> Result<(), SnapshotError> {
        if self.nodes.shift_remove(name).is_none() {
            return Err(SnapshotError::node_not_found(name));
        }
        self.workloads.retain(|_, w| &w.node_name != name);
        Ok(())
    }

    fn add_pod(&mut self, mut workload: Workload, node_name: &NodeName) -> Result<(), SnapshotError> {
        if !self.nodes.contains_key(node_name) {
            return Err(SnapshotError::node_not_found(node_name));
        }
        workload.node_name = node_name.clone();
        let id = workload.id();
        if self.workloads.contains_key(&id) {
            return Err(SnapshotError::pod_duplicate(&id));
        }
        self.workloads.insert(id, workload);
        Ok(())
    }

    fn remove_pod(&mut self, id: &PodId, node_name: &NodeName) -> Result<(), SnapshotError> {
        if !self.nodes.contains_key(node_name) {
            return Err(SnapshotError::node_not_found(node_name));
        }
        if self.workloads.shift_remove(id).is_none() {
            return Err(SnapshotError::pod_not_found(id));
        }
        Ok(())
    }

    fn fork(&mut self) {
        tracing::debug!(depth = self.saved.len() + 1, "basic snapshot: fork");
        self.saved.push((self.nodes.clone(), self.workloads.clone()));
    }

    fn revert(&mut self) -> Result<(), SnapshotError> {
        let (nodes, workloads) = self.saved.pop().ok_or_else(|| SnapshotError::no_fork("revert"))?;
        tracing::debug!(depth = self.saved.len(), "basic snapshot: revert");
        self.nodes = nodes;
        self.workloads = workloads;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SnapshotError> {
        if self.saved.pop().is_none() {
            return Err(SnapshotError::no_fork("commit"));
        }
        tracing::debug!(depth = self.saved.len(), "basic snapshot: commit");
        Ok(())
    }

    fn node_infos(&self) -> Self::NodeInfos {
        BasicNodeInfos {
            items: self.node_infos_vec(),
        }
    }

    fn pods(&self) -> Self::Pods {
        BasicPods {
            items: self.workloads.values().cloned().collect(),
        }
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.workloads.clear();
        self.saved.clear();
    }
}

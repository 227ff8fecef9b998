//! The delta store: a non-empty stack of [`Layer`]s, the
//! bottom of which is the base. The active view is the top-down merge of
//! the stack; `Fork` pushes an empty layer (O(1)); `Revert` pops it
//! (O(1)); `Commit` folds the topmost layer into the one below
//! (O(size of top layer)).

use std::collections::HashMap;

use clustersnap_core::{ClusterSnapshot, SnapshotError};
use clustersnap_types::{Node, NodeInfo, NodeName, PodId, Workload};

use crate::layer::{Layer, PodDelta};
use crate::views::{DeltaNodeInfos, DeltaPods};

/// The layered-overlay cluster snapshot.
pub struct DeltaSnapshot {
    /// Non-empty; `layers[0]` is the base.
    layers: Vec<Layer>,
}

impl Default for DeltaSnapshot {
    fn default() -> Self {
        Self {
            layers: vec![Layer::default()],
        }
    }
}

impl DeltaSnapshot {
    /// An empty, unforked snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current fork depth: 0 means only the base layer is present.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    fn top(&self) -> &Layer {
        self.layers.last().expect("layer stack is never empty")
    }

    fn top_mut(&mut self) -> &mut Layer {
        self.layers.last_mut().expect("layer stack is never empty")
    }

    /// Does `name` resolve to a present node in the active view?
    fn node_exists(&self, name: &NodeName) -> bool {
        self.get_node(name).is_some()
    }

    /// Does `name` resolve to a present node when only layers below the
    /// top are considered? Used by `remove_node`'s add-then-remove
    /// tie-break.
    fn node_exists_below_top(&self, name: &NodeName) -> bool {
        let below = &self.layers[..self.layers.len() - 1];
        for layer in below.iter().rev() {
            if layer.tombstoned_nodes.contains(name) {
                return false;
            }
            if layer.added_nodes.contains_key(name) {
                return true;
            }
        }
        false
    }

    /// Resolve a node by walking layers top to bottom: the first layer
    /// that tombstones or adds it wins.
    fn get_node(&self, name: &NodeName) -> Option<Node> {
        for layer in self.layers.iter().rev() {
            if layer.tombstoned_nodes.contains(name) {
                return None;
            }
            if let Some(node) = layer.added_nodes.get(name) {
                return Some(node.clone());
            }
        }
        None
    }

    /// All node names present in the active view.
    fn active_node_names(&self) -> Vec<NodeName> {
        let mut resolved: HashMap<NodeName, bool> = HashMap::new();
        for layer in self.layers.iter().rev() {
            for name in &layer.tombstoned_nodes {
                resolved.entry(name.clone()).or_insert(false);
            }
            for name in layer.added_nodes.keys() {
                resolved.entry(name.clone()).or_insert(true);
            }
        }
        let mut names: Vec<NodeName> = resolved
            .into_iter()
            .filter_map(|(name, present)| present.then_some(name))
            .collect();
        names.sort();
        names
    }

    /// Materialize the `NodeInfo` for `name`: the node itself (if present)
    /// overlaid with every layer's workload add/delete ops for it, applied
    /// bottom to top. Reads the topmost layer's cache first and populates
    /// it on a miss.
    fn materialize(&self, name: &NodeName) -> Option<NodeInfo> {
        if let Some(cached) = self.top().cached(name) {
            return Some(cached);
        }

        let node = self.get_node(name)?;

        let mut pods: HashMap<PodId, Workload> = HashMap::new();
        for layer in &self.layers {
            if let Some(delta) = layer.pod_deltas.get(name) {
                for id in &delta.deleted {
                    pods.remove(id);
                }
                for (id, workload) in &delta.added {
                    pods.insert(id.clone(), workload.clone());
                }
            }
        }

        let mut workloads: Vec<Workload> = pods.into_values().collect();
        workloads.sort_by(|a, b| a.id().cmp(&b.id()));
        let info = NodeInfo::new(node, workloads);
        self.top().cache_insert(name.clone(), info.clone());
        Some(info)
    }

    /// Which node (if any) in the active view currently hosts `id`.
    fn pod_location(&self, id: &PodId) -> Option<NodeName> {
        self.active_node_names().into_iter().find(|name| {
            self.materialize(name)
                .is_some_and(|info| info.workloads.iter().any(|w| &w.id() == id))
        })
    }

    fn invalidate(&self, name: &NodeName) {
        self.top().invalidate(name);
    }
}

impl ClusterSnapshot for DeltaSnapshot {
    type NodeInfos = DeltaNodeInfos;
    type Pods = DeltaPods;

    fn add_node(&mut self, node: Node) -> Result<(), SnapshotError> {
        if self.node_exists(&node.name) {
            return Err(SnapshotError::node_duplicate(&node.name));
        }
        let name = node.name.clone();
        let top = self.top_mut();
        top.tombstoned_nodes.remove(&name);
        top.added_nodes.insert(name.clone(), node);
        self.invalidate(&name);
        Ok(())
    }

    fn remove_node(&mut self, name: &NodeName) -> Result<(), SnapshotError> {
        if !self.node_exists(name) {
            return Err(SnapshotError::node_not_found(name));
        }

        let below_has_it = self.node_exists_below_top(name);
        let top = self.top_mut();

        if top.added_nodes.remove(name).is_some() {
            // Added and removed within this layer: net no-op relative to
            // the layer below, unless that layer also has the node, in
            // which case we must mask it with a tombstone.
            if below_has_it {
                top.tombstoned_nodes.insert(name.clone());
            }
        } else {
            top.tombstoned_nodes.insert(name.clone());
        }

        top.pod_deltas.remove(name);
        top.modified.remove(name);
        self.invalidate(name);
        Ok(())
    }

    fn add_pod(&mut self, mut workload: Workload, node_name: &NodeName) -> Result<(), SnapshotError> {
        if !self.node_exists(node_name) {
            return Err(SnapshotError::node_not_found(node_name));
        }
        workload.node_name = node_name.clone();
        let id = workload.id();
        if self.pod_location(&id).is_some() {
            return Err(SnapshotError::pod_duplicate(&id));
        }

        let top = self.top_mut();
        let delta = top.pod_deltas.entry(node_name.clone()).or_insert_with(PodDelta::default);
        delta.deleted.remove(&id);
        delta.added.insert(id, workload);
        top.modified.insert(node_name.clone());
        self.invalidate(node_name);
        Ok(())
    }

    fn remove_pod(&mut self, id: &PodId, node_name: &NodeName) -> Result<(), SnapshotError> {
        if !self.node_exists(node_name) {
            return Err(SnapshotError::node_not_found(node_name));
        }
        // The workload's actual host may differ from `node_name` if the
        // caller's view is stale; key the delta off where the pod really
        // lives so the removal is visible regardless.
        let host = match self.pod_location(id) {
            Some(host) => host,
            None => return Err(SnapshotError::pod_not_found(id)),
        };

        let top = self.top_mut();
        let delta = top.pod_deltas.entry(host.clone()).or_insert_with(PodDelta::default);
        delta.added.remove(id);
        delta.deleted.insert(id.clone());
        top.modified.insert(host.clone());
        self.invalidate(&host);
        Ok(())
    }

    fn fork(&mut self) {
        tracing::debug!(depth = self.layers.len(), "delta snapshot: fork");
        self.layers.push(Layer::default());
    }

    fn revert(&mut self) -> Result<(), SnapshotError> {
        if self.layers.len() <= 1 {
            return Err(SnapshotError::no_fork("revert"));
        }
        self.layers.pop();
        tracing::debug!(depth = self.depth(), "delta snapshot: revert");
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SnapshotError> {
        if self.layers.len() <= 1 {
            return Err(SnapshotError::no_fork("commit"));
        }
        let top = self.layers.pop().expect("checked non-empty above");
        let below = self.layers.last_mut().expect("layer stack is never empty");
        merge_down(top, below);
        tracing::debug!(depth = self.depth(), "delta snapshot: commit");
        Ok(())
    }

    fn node_infos(&self) -> Self::NodeInfos {
        let items = self
            .active_node_names()
            .into_iter()
            .filter_map(|name| self.materialize(&name))
            .collect();
        DeltaNodeInfos { items }
    }

    fn pods(&self) -> Self::Pods {
        let mut items: Vec<Workload> = self
            .active_node_names()
            .into_iter()
            .filter_map(|name| self.materialize(&name))
            .flat_map(|info| info.workloads)
            .collect();
        items.sort_by(|a, b| a.id().cmp(&b.id()));
        DeltaPods { items }
    }

    fn clear(&mut self) {
        self.layers = vec![Layer::default()];
    }
}

/// Fold `top` into `below`.
fn merge_down(top: Layer, below: &mut Layer) {
    // Added nodes: a tombstone in `below` followed by this add collapses
    // to a plain add.
    for (name, node) in top.added_nodes {
        below.tombstoned_nodes.remove(&name);
        below.added_nodes.insert(name, node);
    }

    // Tombstones override any add/modification already folded into
    // `below` in this same merge.
    for name in top.tombstoned_nodes {
        below.added_nodes.remove(&name);
        below.pod_deltas.remove(&name);
        below.modified.remove(&name);
        below.tombstoned_nodes.insert(name);
    }

    // Per-node workload add/delete sets, top operations take precedence.
    for (name, delta) in top.pod_deltas {
        let below_delta = below.pod_deltas.entry(name).or_insert_with(PodDelta::default);
        for id in delta.deleted {
            below_delta.added.remove(&id);
            below_delta.deleted.insert(id);
        }
        for (id, workload) in delta.added {
            below_delta.deleted.remove(&id);
            below_delta.added.insert(id, workload);
        }
    }

    below.modified.extend(top.modified);

    // The merge changes `below`'s contents; its cache (if it had ever
    // itself been the topmost layer before something was pushed above it)
    // no longer reflects the merged state.
    below.cache.borrow_mut().clear();
}

//! A single overlay layer, recorded relative to the layer below it.
//!
//! A `Layer` wraps added entries, tombstones, and a lazily-populated cache
//! behind a `RefCell`, the same shape as a single base-plus-overlay pair.
//! The store above holds a `Vec<Layer>` instead of just one overlay, so
//! the same representation supports arbitrary fork depth and, unlike a
//! single discard-only overlay, can be folded down into the layer below
//! it on commit instead of only ever being thrown away.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use clustersnap_types::{Node, NodeInfo, NodeName, PodId, Workload};

/// Per-node workload changes recorded in one layer.
#[derive(Debug, Default, Clone)]
pub(crate) struct PodDelta {
    pub(crate) added: HashMap<PodId, Workload>,
    pub(crate) deleted: HashSet<PodId>,
}

/// One overlay in the delta store's layer stack.
#[derive(Debug, Default)]
pub(crate) struct Layer {
    /// Nodes added in this layer.
    pub(crate) added_nodes: HashMap<NodeName, Node>,
    /// Nodes tombstoned (masked) in this layer.
    pub(crate) tombstoned_nodes: HashSet<NodeName>,
    /// Per-node workload add/delete sets recorded in this layer.
    pub(crate) pod_deltas: HashMap<NodeName, PodDelta>,
    /// Node names whose workload set diverges from the layer below, even
    /// if the node itself is inherited rather than added here.
    pub(crate) modified: HashSet<NodeName>,
    /// Materialized-`NodeInfo` cache, populated lazily on first read of a
    /// name and invalidated by any mutation to that name in this layer.
    /// Only ever populated on the topmost layer; a layer stops being the
    /// top the moment a new one is pushed above it, at which point its
    /// cache is frozen and irrelevant until it is folded into by a commit
    /// (which clears it, since the merge changes its contents).
    pub(crate) cache: RefCell<HashMap<NodeName, NodeInfo>>,
}

impl Layer {
    pub(crate) fn invalidate(&self, name: &NodeName) {
        self.cache.borrow_mut().remove(name);
    }

    pub(crate) fn cached(&self, name: &NodeName) -> Option<NodeInfo> {
        self.cache.borrow().get(name).cloned()
    }

    pub(crate) fn cache_insert(&self, name: NodeName, info: NodeInfo) {
        self.cache.borrow_mut().insert(name, info);
    }
}

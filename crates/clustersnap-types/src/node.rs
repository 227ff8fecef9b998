//! The `Node` value type.

use crate::{Labels, NodeName};
use serde::{Deserialize, Serialize};

/// An opaque cluster machine, identified by a unique name.
///
/// The snapshot does not interpret a node's contents beyond its name;
/// `labels` is carried only so selectors have something to
/// match against when filtering the workloads assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique name within a snapshot view.
    pub name: NodeName,
    /// Arbitrary labels, uninterpreted by the snapshot itself.
    pub labels: Labels,
}

impl Node {
    /// Build a node with no labels.
    pub fn new(name: impl Into<NodeName>) -> Self {
        Self {
            name: name.into(),
            labels: Labels::new(),
        }
    }

    /// Build a node with the given labels.
    pub fn with_labels(name: impl Into<NodeName>, labels: Labels) -> Self {
        Self {
            name: name.into(),
            labels,
        }
    }
}

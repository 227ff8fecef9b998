//! Error types for the snapshot contract.

use thiserror::Error;

/// Which kind of entity a [`SnapshotError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A node, referenced by name.
    Node,
    /// A workload, referenced by (namespace, name).
    Workload,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Node => write!(f, "node"),
            EntityKind::Workload => write!(f, "workload"),
        }
    }
}

/// Errors returned by the snapshot contract.
///
/// Three kinds are sufficient: a missing reference, a colliding insertion,
/// and structural misuse of the fork stack. Errors never leave the store
/// partially mutated: on an `Err` return, the store is exactly as it was
/// before the call (`AddNodes` is the one documented exception; see
/// [`crate::ClusterSnapshot::add_nodes`]).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The referenced node or workload is absent in the active view.
    #[error("{kind} not found: {detail}")]
    NotFound {
        /// Which kind of entity was missing.
        kind: EntityKind,
        /// Human-readable detail (name or id) of the missing entity.
        detail: String,
    },

    /// Attempted insertion collides with an existing key.
    #[error("{kind} already exists: {detail}")]
    Duplicate {
        /// Which kind of entity collided.
        kind: EntityKind,
        /// Human-readable detail (name or id) of the colliding entity.
        detail: String,
    },

    /// Structural misuse of the fork stack: `Revert`/`Commit` with no open
    /// fork. A programming bug; callers are expected to treat it as fatal.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
}

impl SnapshotError {
    /// Build a [`SnapshotError::NotFound`] for a node.
    pub fn node_not_found(name: impl std::fmt::Display) -> Self {
        tracing::debug!(node = %name, "node not found");
        Self::NotFound {
            kind: EntityKind::Node,
            detail: name.to_string(),
        }
    }

    /// Build a [`SnapshotError::NotFound`] for a workload.
    pub fn pod_not_found(id: impl std::fmt::Display) -> Self {
        tracing::debug!(pod = %id, "workload not found");
        Self::NotFound {
            kind: EntityKind::Workload,
            detail: id.to_string(),
        }
    }

    /// Build a [`SnapshotError::Duplicate`] for a node.
    pub fn node_duplicate(name: impl std::fmt::Display) -> Self {
        tracing::debug!(node = %name, "duplicate node");
        Self::Duplicate {
            kind: EntityKind::Node,
            detail: name.to_string(),
        }
    }

    /// Build a [`SnapshotError::Duplicate`] for a workload.
    pub fn pod_duplicate(id: impl std::fmt::Display) -> Self {
        tracing::debug!(pod = %id, "duplicate workload");
        Self::Duplicate {
            kind: EntityKind::Workload,
            detail: id.to_string(),
        }
    }

    /// Build a [`SnapshotError::InvalidOperation`] for revert/commit misuse.
    pub fn no_fork(op: &'static str) -> Self {
        tracing::debug!(op, "no open fork");
        Self::InvalidOperation(op)
    }
}

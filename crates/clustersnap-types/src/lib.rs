//! Node/Workload data model for forkable cluster snapshots.
//!
//! This crate supplies the value types a `clustersnap-core` snapshot
//! consumes and produces: [`Node`], [`Workload`], the derived [`NodeInfo`]
//! bundle, and the [`Selector`] predicate used to filter workloads by
//! label. The snapshot itself never interprets anything beyond identity and
//! placement: resource fields, scheduling weights, and the rest of a real
//! workload spec belong to the caller, not to this crate.

mod identifiers;
mod labels;
mod node;
mod node_info;
mod workload;

pub use identifiers::{Namespace, NodeName, PodId, PodName};
pub use labels::{Everything, LabelSelector, Labels, Selector};
pub use node::Node;
pub use node_info::NodeInfo;
pub use workload::Workload;

//! Label maps and the selector predicate used to filter workloads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A workload's label mapping.
///
/// A `BTreeMap` rather than a `HashMap`: label equality and iteration order
/// stay deterministic without an extra sort step wherever labels are
/// compared or displayed.
pub type Labels = BTreeMap<String, String>;

/// A predicate over a label mapping.
///
/// The snapshot needs only the ability to ask "does this workload's label
/// mapping satisfy this selector?"; it does not model a selector grammar
/// itself. Callers that need the full Kubernetes label-selector grammar
/// implement this trait on their own selector type and pass it in.
pub trait Selector {
    /// Does `labels` satisfy this selector?
    fn matches(&self, labels: &Labels) -> bool;
}

/// A selector that matches every workload.
#[derive(Debug, Clone, Copy, Default)]
pub struct Everything;

impl Selector for Everything {
    fn matches(&self, _labels: &Labels) -> bool {
        true
    }
}

/// An exact-match AND of key/value pairs.
///
/// The one concrete selector this crate ships, useful directly and as a
/// reference implementation for `Selector`.
#[derive(Debug, Clone, Default)]
pub struct LabelSelector {
    required: Labels,
}

impl LabelSelector {
    /// A selector with no requirements (equivalent to [`Everything`]).
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `key` to be present with exactly `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.required.insert(key.into(), value.into());
        self
    }
}

impl Selector for LabelSelector {
    fn matches(&self, labels: &Labels) -> bool {
        self.required
            .iter()
            .all(|(k, v)| labels.get(k).is_some_and(|actual| actual == v))
    }
}

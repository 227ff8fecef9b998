//! Deterministic cluster fixtures.
//!
//! Given the same seed, [`ClusterFixture::seeded`] produces the same nodes
//! and workload placements every run, matching the determinism every
//! simulation fixture in this workspace is held to ("given the same seed,
//! it produces identical results every run").

use clustersnap_types::{Node, NodeName, Workload};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A deterministically generated cluster shape: N nodes, each carrying a
/// fixed number of workloads.
pub struct ClusterFixture {
    /// The generated nodes.
    pub nodes: Vec<Node>,
    /// The generated workloads, already assigned to one of `nodes`.
    pub workloads: Vec<Workload>,
}

impl ClusterFixture {
    /// Build a fixture with `n_nodes` nodes and `pods_per_node` workloads
    /// on each, named deterministically from `seed`.
    pub fn seeded(seed: u64, n_nodes: usize, pods_per_node: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let nodes: Vec<Node> = (0..n_nodes)
            .map(|i| Node::new(NodeName::new(format!("node-{i}"))))
            .collect();

        let mut workloads = Vec::with_capacity(n_nodes * pods_per_node);
        for node in &nodes {
            for j in 0..pods_per_node {
                // A label so selector-based listing tests have something
                // to filter on; not load-bearing for the generated shape.
                let tier = if rng.gen_bool(0.5) { "batch" } else { "serving" };
                let mut labels = clustersnap_types::Labels::new();
                labels.insert("tier".to_string(), tier.to_string());
                workloads.push(Workload::with_labels(
                    "default",
                    format!("{}-pod-{j}", node.name),
                    node.name.clone(),
                    labels,
                ));
            }
        }

        Self { nodes, workloads }
    }
}

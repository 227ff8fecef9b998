//! Deterministic fixtures and the shared property-test suite used by both
//! `clustersnap-basic` and `clustersnap-delta` to prove they satisfy the
//! same contract: one suite, parameterized by a factory, run against every
//! implementation.

mod fixture;
mod suite;

pub use fixture::ClusterFixture;
pub use suite::{
    add_nodes_stops_at_first_duplicate, add_remove_add_same_layer,
    commit_of_add_pod_then_remove_host, fork_commit_equals_unforked,
    fork_does_not_leak_node_additions, fork_does_not_leak_pod_additions,
    fork_does_not_leak_pod_removals, fork_revert_is_identity, nested_forks_restore_exactly,
    not_found_surface, readd_after_remove_across_commit, remove_node_clears_workloads,
    remove_pod_missing_on_present_node_is_not_found, run_all,
};

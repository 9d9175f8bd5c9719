//! Bounded flattening of a cluster tree into its leaf features.

use crate::decode::RawFeature;
use crate::error::Result;
use crate::index::{ClusterChild, ClusterIndex};
use rustc_hash::FxHashSet;
use tracing::debug;

/// Collects up to `cap` leaf features under `cluster_id`.
///
/// Traversal uses an explicit work stack with a locally-scoped accumulator,
/// so pathological tree depth cannot grow the call stack. Traversal stops
/// outright once the accumulator is full. Already-seen cluster ids are
/// skipped, so a malformed cyclic index terminates instead of looping.
///
/// Leaf order is the order the index yields under stack traversal; it is not
/// spatially meaningful.
pub fn flatten_cluster(
    index: &dyn ClusterIndex,
    cluster_id: u64,
    cap: usize,
) -> Result<Vec<RawFeature>> {
    let mut leaves = Vec::new();
    if cap == 0 {
        return Ok(leaves);
    }

    let mut stack = vec![cluster_id];
    let mut visited = FxHashSet::default();
    visited.insert(cluster_id);

    while let Some(id) = stack.pop() {
        for child in index.children(id)? {
            match child {
                ClusterChild::Cluster { cluster_id } => {
                    if visited.insert(cluster_id) {
                        stack.push(cluster_id);
                    }
                }
                ClusterChild::Leaf(feature) => {
                    leaves.push(feature);
                    if leaves.len() >= cap {
                        debug!(cluster_id, cap, "flatten truncated at cap");
                        return Ok(leaves);
                    }
                }
            }
        }
    }

    Ok(leaves)
}

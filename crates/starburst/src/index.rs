//! The hierarchical clustering collaborator seam.

use crate::decode::RawFeature;
use crate::error::Result;

/// One immediate child of a cluster node.
#[derive(Debug, Clone)]
pub enum ClusterChild {
    /// A nested cluster to descend into.
    Cluster { cluster_id: u64 },
    /// An original point feature, in geographic coordinates.
    Leaf(RawFeature),
}

/// Hierarchical clustering index (e.g. a supercluster-style tree).
///
/// Implementations return [`Error::UnknownCluster`](crate::Error) for ids
/// they have never issued.
pub trait ClusterIndex {
    fn children(&self, cluster_id: u64) -> Result<Vec<ClusterChild>>;
}

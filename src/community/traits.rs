//! Community detection traits.

use crate::error::Result;
use crate::graph::Graph;

/// Trait for community detection algorithms.
pub trait CommunityDetection {
    /// Detect communities in a graph.
    ///
    /// Returns a mapping from node index to a dense community ID.
    fn detect(&self, graph: &Graph) -> Result<Vec<usize>>;
}

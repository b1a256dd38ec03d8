//! Per-node metadata carried through the hierarchy.

use core::fmt;

/// Metadata and analytic accumulators owned by one graph node.
///
/// At level 0 a node stands for itself. After compression, a node stands for
/// a whole community and its identity is borrowed from one representative
/// member (see [`NodeInfo::merge`]).
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInfo {
    /// Stable identifier (the level-0 id of the representative).
    pub id: u64,
    /// Number of level-0 nodes folded into this node.
    pub size: usize,
    /// Free-form metadata from the import, if any.
    pub metadata: Option<String>,
    /// Accumulated custom analytic values, one per registered analytic.
    pub analytics: Vec<f64>,
    /// Index of the node in the next level's graph this node was folded into.
    community_node: Option<usize>,
}

impl NodeInfo {
    /// Create a level-0 node of size 1.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            size: 1,
            metadata: None,
            analytics: Vec::new(),
            community_node: None,
        }
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    /// Attach analytic values.
    pub fn with_analytics(mut self, analytics: Vec<f64>) -> Self {
        self.analytics = analytics;
        self
    }

    /// Index of the representative node in the next level, once compressed.
    ///
    /// Always points one level forward, never into the same or an earlier
    /// level's graph.
    pub fn community_node(&self) -> Option<usize> {
        self.community_node
    }

    pub(crate) fn set_community_node(&mut self, node: usize) {
        self.community_node = Some(node);
    }

    /// Fold `next` into the accumulated community info `acc`.
    ///
    /// Sizes and analytics are summed. Identity and metadata come from
    /// whichever side has the strictly larger weighted degree; on a tie the
    /// accumulated side keeps its identity. The returned degree is the
    /// winner's, so folding a community in member order selects the first
    /// member with the maximal weighted degree.
    pub(crate) fn merge(acc: (NodeInfo, f64), next: (&NodeInfo, f64)) -> (NodeInfo, f64) {
        let (mut merged, acc_degree) = acc;
        let (other, other_degree) = next;

        merged.size += other.size;
        if merged.analytics.len() < other.analytics.len() {
            merged.analytics.resize(other.analytics.len(), 0.0);
        }
        for (slot, value) in merged.analytics.iter_mut().zip(&other.analytics) {
            *slot += value;
        }

        if other_degree > acc_degree {
            merged.id = other.id;
            merged.metadata = other.metadata.clone();
            (merged, other_degree)
        } else {
            (merged, acc_degree)
        }
    }

    /// Start a fold from a single member; the back-reference is not carried.
    pub(crate) fn seed_fold(&self) -> NodeInfo {
        NodeInfo {
            community_node: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.metadata {
            Some(meta) => write!(f, "Node[{}] size={} ({})", self.id, self.size, meta),
            None => write!(f, "Node[{}] size={}", self.id, self.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_sums_size_and_analytics() {
        let a = NodeInfo::new(1).with_analytics(vec![1.0, 2.0]);
        let b = NodeInfo::new(2).with_analytics(vec![0.5, 0.5]);

        let (merged, _) = NodeInfo::merge((a.seed_fold(), 1.0), (&b, 1.0));
        assert_eq!(merged.size, 2);
        assert_eq!(merged.analytics, vec![1.5, 2.5]);
    }

    #[test]
    fn test_merge_identity_from_larger_degree() {
        let a = NodeInfo::new(1).with_metadata("a");
        let b = NodeInfo::new(2).with_metadata("b");
        let c = NodeInfo::new(3).with_metadata("c");

        let acc = NodeInfo::merge((a.seed_fold(), 2.0), (&b, 5.0));
        assert_eq!(acc.0.id, 2);
        assert_eq!(acc.0.metadata.as_deref(), Some("b"));

        // Tie keeps the current representative.
        let (merged, degree) = NodeInfo::merge(acc, (&c, 5.0));
        assert_eq!(merged.id, 2);
        assert_eq!(degree, 5.0);
        assert_eq!(merged.size, 3);
    }

    #[test]
    fn test_seed_fold_drops_back_reference() {
        let mut a = NodeInfo::new(7);
        a.set_community_node(3);
        assert_eq!(a.community_node(), Some(3));
        assert_eq!(a.seed_fold().community_node(), None);
    }
}

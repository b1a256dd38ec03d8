//! Community size statistics for a level.
//!
//! | Field | Over |
//! |-------|------|
//! | [`LevelStats::all`] | every non-empty community |
//! | [`LevelStats::non_singleton`] | communities with more than one member |
//!
//! Sizes count members at the level being described, not level-0 nodes.

use crate::community::Community;
use serde::{Deserialize, Serialize};

/// Summary of a set of community sizes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeStats {
    /// Number of communities described.
    pub count: usize,
    /// Smallest size (0 when `count == 0`).
    pub min: usize,
    /// Largest size (0 when `count == 0`).
    pub max: usize,
    /// Mean size.
    pub mean: f64,
    /// Population standard deviation of size.
    pub stddev: f64,
}

impl SizeStats {
    /// Describe `sizes`.
    pub fn from_sizes(sizes: &[usize]) -> Self {
        if sizes.is_empty() {
            return Self::default();
        }
        let count = sizes.len();
        let mean = sizes.iter().sum::<usize>() as f64 / count as f64;
        let variance = sizes
            .iter()
            .map(|&s| {
                let d = s as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / count as f64;

        Self {
            count,
            min: sizes.iter().copied().min().unwrap_or(0),
            max: sizes.iter().copied().max().unwrap_or(0),
            mean,
            stddev: variance.sqrt(),
        }
    }
}

/// Aggregate statistics of one converged level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelStats {
    /// Level index.
    pub level: usize,
    /// Nodes in the level's graph.
    pub node_count: usize,
    /// Modularity reached.
    pub modularity: f64,
    /// Sizes over non-empty communities.
    pub all: SizeStats,
    /// Sizes over communities with more than one member.
    pub non_singleton: SizeStats,
}

impl LevelStats {
    /// Collect statistics from a converged community.
    pub fn from_community(community: &Community) -> Self {
        let sizes: Vec<usize> = community
            .community_sizes()
            .iter()
            .copied()
            .filter(|&s| s > 0)
            .collect();
        let multi: Vec<usize> = sizes.iter().copied().filter(|&s| s > 1).collect();

        Self {
            level: community.level(),
            node_count: community.graph().node_count(),
            modularity: community.modularity(),
            all: SizeStats::from_sizes(&sizes),
            non_singleton: SizeStats::from_sizes(&multi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::EligibilityPolicy;
    use crate::config::LouvainConfig;
    use crate::graph::GraphBuilder;

    #[test]
    fn test_size_stats() {
        let s = SizeStats::from_sizes(&[1, 3, 3, 5]);
        assert_eq!(s.count, 4);
        assert_eq!(s.min, 1);
        assert_eq!(s.max, 5);
        assert!((s.mean - 3.0).abs() < 1e-12);
        assert!((s.stddev - 2.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_size_stats_empty() {
        assert_eq!(SizeStats::from_sizes(&[]), SizeStats::default());
    }

    #[test]
    fn test_level_stats_split_singletons() {
        // Triangle plus an isolated pair and a lone node.
        let graph = GraphBuilder::new(6)
            .edge(0, 1)
            .edge(1, 2)
            .edge(0, 2)
            .edge(3, 4)
            .build()
            .unwrap();
        let config = LouvainConfig::default();
        let mut c = Community::new(graph, 0, EligibilityPolicy::Baseline, &config).unwrap();
        let _ = c.run();

        let stats = LevelStats::from_community(&c);
        assert_eq!(stats.node_count, 6);
        assert_eq!(stats.all.count, 3);
        assert_eq!(stats.all.min, 1);
        assert_eq!(stats.all.max, 3);
        assert_eq!(stats.non_singleton.count, 2);
        assert_eq!(stats.non_singleton.min, 2);
        assert!((stats.non_singleton.mean - 2.5).abs() < 1e-12);
    }
}

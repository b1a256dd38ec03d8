//! Per-level results and the finished hierarchy.

use crate::community::{Community, LevelOutcome};
use crate::graph::Graph;

/// What the driver reports to its caller after each level.
///
/// Emitted after compression, so every node of `community.graph()` already
/// carries its back-reference into `next`.
#[derive(Debug)]
pub struct LevelResult<'a> {
    /// Level index (0 = input graph).
    pub level: usize,
    /// Optimization outcome of the level.
    pub outcome: LevelOutcome,
    /// Converged state of the level.
    pub community: &'a Community,
    /// Graph the level was compressed into.
    pub next: &'a Graph,
}

impl LevelResult<'_> {
    /// Modularity reached at this level.
    pub fn modularity(&self) -> f64 {
        self.outcome.modularity
    }

    /// Whether any node moved at this level.
    pub fn improvement(&self) -> bool {
        self.outcome.improvement
    }
}

/// Owned record of one level, kept after its graph is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSummary {
    /// Level index.
    pub level: usize,
    /// Modularity after optimization.
    pub modularity: f64,
    /// Whether any node moved.
    pub improvement: bool,
    /// Passes executed.
    pub passes: usize,
    /// Nodes in this level's graph.
    pub node_count: usize,
    /// Non-empty communities, i.e. nodes in the next level's graph.
    pub community_count: usize,
    /// Node of this level to node of the next level.
    pub assignment: Vec<usize>,
}

/// All levels of a finished run.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    levels: Vec<LevelSummary>,
    top: Graph,
}

impl Hierarchy {
    pub(crate) fn new(levels: Vec<LevelSummary>, top: Graph) -> Self {
        Self { levels, top }
    }

    /// Level summaries, level 0 first.
    pub fn levels(&self) -> &[LevelSummary] {
        &self.levels
    }

    /// Number of completed levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True if no level completed.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Graph produced by the last compression.
    pub fn top_graph(&self) -> &Graph {
        &self.top
    }

    /// Modularity of the last level.
    pub fn final_modularity(&self) -> Option<f64> {
        self.levels.last().map(|l| l.modularity)
    }

    /// Level with the highest modularity (first one on ties).
    pub fn best_level(&self) -> Option<usize> {
        self.levels
            .iter()
            .fold(None, |best: Option<&LevelSummary>, l| match best {
                Some(b) if b.modularity >= l.modularity => Some(b),
                _ => Some(l),
            })
            .map(|l| l.level)
    }

    /// Community of every level-0 node after `level` was compressed.
    ///
    /// Ids are the node indices of the graph built from that level.
    pub fn partition_at(&self, level: usize) -> Option<Vec<usize>> {
        let (first, rest) = self.levels.split_first()?;
        if level >= self.levels.len() {
            return None;
        }
        let mut result = first.assignment.clone();
        for summary in &rest[..level] {
            for comm in result.iter_mut() {
                *comm = summary.assignment[*comm];
            }
        }
        Some(result)
    }

    /// Community of every level-0 node at the top of the hierarchy.
    pub fn final_partition(&self) -> Option<Vec<usize>> {
        self.partition_at(self.levels.len().checked_sub(1)?)
    }
}

//! Multi-level orchestration.

use super::level::{Hierarchy, LevelResult, LevelSummary};
use crate::community::{Community, CommunityDetection};
use crate::config::LouvainConfig;
use crate::error::{Error, Result};
use crate::graph::Graph;
use std::collections::HashMap;
use tracing::{info, warn};

/// Runs Louvain level after level until a level makes no move.
///
/// ```text
/// level 0: Community(graph₀) → run → compress → graph₁
/// level 1: Community(graph₁) → run → compress → graph₂
/// ...       stop when a level reports no improvement
/// ```
///
/// A driver runs once. Each level's graph is dropped as soon as it is
/// compressed, so a second run has nothing to start from and fails with
/// [`Error::AlreadyConsumed`].
#[derive(Debug)]
pub struct HierarchyDriver {
    graph: Option<Graph>,
    config: LouvainConfig,
    seed: Vec<(usize, usize)>,
}

impl HierarchyDriver {
    /// Prepare a run over `graph`.
    pub fn new(graph: Graph, config: LouvainConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            graph: Some(graph),
            config,
            seed: Vec::new(),
        })
    }

    /// Seed level 0 with `(node, community)` pairs on dense indices.
    ///
    /// Supplying a seed forces a second level even if the seeded first level
    /// makes no move.
    pub fn with_partition_seed(mut self, seed: Vec<(usize, usize)>) -> Self {
        self.seed = seed;
        self.config.force_second_iteration = true;
        self
    }

    /// Seed level 0 with `(node id, community label)` pairs on stable ids.
    ///
    /// Labels are arbitrary; each label becomes the community of the first
    /// node seeded with it. A node seeded under two different labels is an
    /// error.
    pub fn with_partition_seed_by_id(self, pairs: &[(u64, u64)]) -> Result<Self> {
        let graph = self.graph.as_ref().ok_or(Error::AlreadyConsumed)?;

        let mut label_comm: HashMap<u64, usize> = HashMap::new();
        let mut node_label: HashMap<u64, u64> = HashMap::new();
        let mut seed = Vec::with_capacity(pairs.len());
        for &(id, label) in pairs {
            let node = graph.node_by_id(id).ok_or_else(|| {
                Error::InvalidPartition(format!("seed refers to unknown node id {id}"))
            })?;
            match node_label.insert(id, label) {
                Some(prev) if prev != label => {
                    return Err(Error::InvalidPartition(format!(
                        "node id {id} seeded with labels {prev} and {label}"
                    )));
                }
                Some(_) => continue,
                None => {}
            }
            let comm = *label_comm.entry(label).or_insert(node);
            seed.push((node, comm));
        }
        Ok(self.with_partition_seed(seed))
    }

    /// Configuration in effect.
    pub fn config(&self) -> &LouvainConfig {
        &self.config
    }

    /// True once [`run`](Self::run) or [`run_with`](Self::run_with) was called.
    pub fn is_consumed(&self) -> bool {
        self.graph.is_none()
    }

    /// Run to completion.
    pub fn run(&mut self) -> Result<Hierarchy> {
        self.run_with(|_| Ok(()))
    }

    /// Run to completion, calling `on_level` after every level.
    ///
    /// An error from `on_level` aborts the run and is returned unchanged.
    pub fn run_with<F>(&mut self, mut on_level: F) -> Result<Hierarchy>
    where
        F: FnMut(&LevelResult<'_>) -> Result<()>,
    {
        let mut graph = self.graph.take().ok_or(Error::AlreadyConsumed)?;
        let mut levels = Vec::new();
        let mut level = 0;

        loop {
            let policy = self
                .config
                .progression
                .policy_for_level(&self.config.policy, level);
            let mut community = Community::new(graph, level, policy, &self.config)?;
            if level == 0 && !self.seed.is_empty() {
                community.init_partition(&self.seed)?;
            }

            let outcome = community.run();
            let compression = community.compress()?;

            info!(
                level,
                policy = community.policy().name(),
                modularity = outcome.modularity,
                improvement = outcome.improvement,
                passes = outcome.passes,
                nodes = community.graph().node_count(),
                communities = compression.graph.node_count(),
                "level complete"
            );

            on_level(&LevelResult {
                level,
                outcome,
                community: &community,
                next: &compression.graph,
            })?;

            levels.push(LevelSummary {
                level,
                modularity: outcome.modularity,
                improvement: outcome.improvement,
                passes: outcome.passes,
                node_count: community.graph().node_count(),
                community_count: compression.graph.node_count(),
                assignment: compression.assignment,
            });
            drop(community);
            graph = compression.graph;

            let completed = level + 1;
            let forced = self.config.force_second_iteration && completed == 1;
            if !outcome.improvement && !forced {
                break;
            }
            if completed >= self.config.max_levels {
                warn!(
                    max_levels = self.config.max_levels,
                    "level cap reached before convergence"
                );
                break;
            }
            level = completed;
        }

        Ok(Hierarchy::new(levels, graph))
    }
}

/// Multi-level Louvain as a one-shot detector.
///
/// Returns the top-level community of every input node.
#[derive(Debug, Clone, Default)]
pub struct Louvain {
    config: LouvainConfig,
}

impl Louvain {
    /// Detector with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector with `config`.
    pub fn with_config(config: LouvainConfig) -> Self {
        Self { config }
    }
}

impl CommunityDetection for Louvain {
    fn detect(&self, graph: &Graph) -> Result<Vec<usize>> {
        let hierarchy = HierarchyDriver::new(graph.clone(), self.config.clone())?.run()?;
        Ok(hierarchy.final_partition().unwrap_or_default())
    }
}

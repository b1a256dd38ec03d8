//! Louvain local moving for one hierarchy level.
//!
//! ## The Algorithm (Blondel et al. 2008)
//!
//! Every node starts in its own community. A *pass* visits each node once,
//! detaches it from its community, and re-inserts it into the candidate
//! community with the largest modularity gain:
//!
//! ```text
//! gain(c) = k_i,c - tot[c] * k_i / 2m
//! ```
//!
//! where `k_i,c` is the edge weight from node `i` into `c`, `k_i` the weighted
//! degree of `i`, and `tot[c]` the summed weighted degree of `c`. The node's
//! own community is always the first candidate and the running best starts
//! at gain 0, so a node only leaves when another community does strictly
//! better. Ties keep the first candidate in visiting order, which is the
//! order neighbors are stored in the graph.
//!
//! Passes repeat while the last pass moved a node and raised modularity by
//! more than the configured minimum.
//!
//! ## Bookkeeping
//!
//! For every community `c`:
//!
//! - `tot[c]`: summed weighted degree of members; `Σ tot == 2m` always.
//! - `inner[c]`: `2 × internal edge weight + 2 × member self-loops`.
//! - `size[c]`: member count; `Σ size == n` always.
//!
//! ```text
//! Q = Σ_c inner[c] / 2m - (tot[c] / 2m)²
//! ```
//!
//! ## References
//!
//! Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! Journal of Statistical Mechanics: Theory and Experiment, P10008.

use super::policy::{EligibilityPolicy, Neighbor};
use crate::config::{LouvainConfig, PassOrder};
use crate::error::{Error, Result};
use crate::graph::Graph;
use rand::prelude::*;
use tracing::{debug, warn};

const UNASSIGNED: usize = usize::MAX;
const UNSEEN: f64 = -1.0;

/// Mutable optimization state for one level.
///
/// Built from exactly one [`Graph`], optimized with [`Community::run`],
/// folded into the next level's graph with [`Community::compress`], then
/// dropped.
#[derive(Debug)]
pub struct Community {
    pub(crate) graph: Graph,
    level: usize,
    policy: EligibilityPolicy,
    min_modularity_gain: f64,
    max_passes: usize,
    rng: Option<StdRng>,

    pub(crate) n2c: Vec<usize>,
    size: Vec<usize>,
    tot: Vec<f64>,
    inner: Vec<f64>,

    // Scratch for neighbor-community accumulation. `neigh_weight[c]` is
    // `UNSEEN` unless `c` is in `neigh_pos`.
    neigh_weight: Vec<f64>,
    neigh_eligible: Vec<bool>,
    neigh_pos: Vec<usize>,
}

/// Copy of a community's bookkeeping arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct CommunitySnapshot {
    /// Node to community.
    pub n2c: Vec<usize>,
    /// Community to member count.
    pub size: Vec<usize>,
    /// Community to summed weighted degree.
    pub tot: Vec<f64>,
    /// Community to internal weight (`in`).
    pub inner: Vec<f64>,
}

/// Result of optimizing one level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelOutcome {
    /// Whether any pass moved a node.
    pub improvement: bool,
    /// Modularity after the last pass.
    pub modularity: f64,
    /// Passes executed.
    pub passes: usize,
}

impl Community {
    /// Start a level with every node in its own community.
    ///
    /// Fails with [`Error::DegenerateGraph`] when the graph has no edge
    /// weight, since modularity is undefined there.
    pub fn new(
        graph: Graph,
        level: usize,
        policy: EligibilityPolicy,
        config: &LouvainConfig,
    ) -> Result<Self> {
        config.validate()?;
        if !(graph.total_weight() > 0.0) {
            return Err(Error::DegenerateGraph);
        }

        let n = graph.node_count();
        let tot: Vec<f64> = (0..n).map(|i| graph.weighted_degree(i)).collect();
        let inner: Vec<f64> = (0..n).map(|i| 2.0 * graph.nb_self_loops(i)).collect();

        let rng = match config.order {
            PassOrder::Sequential => None,
            PassOrder::Shuffled { seed } => {
                Some(StdRng::seed_from_u64(seed.wrapping_add(level as u64)))
            }
        };

        Ok(Self {
            graph,
            level,
            policy,
            min_modularity_gain: config.min_modularity_gain,
            max_passes: config.max_passes,
            rng,
            n2c: (0..n).collect(),
            size: vec![1; n],
            tot,
            inner,
            neigh_weight: vec![UNSEEN; n],
            neigh_eligible: vec![false; n],
            neigh_pos: Vec::new(),
        })
    }

    /// The graph being optimized.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Hierarchy level index.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Policy in force for this level.
    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    /// Current community of every node.
    pub fn n2c(&self) -> &[usize] {
        &self.n2c
    }

    /// Current community of `node`.
    pub fn community_of(&self, node: usize) -> usize {
        self.n2c[node]
    }

    /// Member count per community id (zero for empty communities).
    pub fn community_sizes(&self) -> &[usize] {
        &self.size
    }

    /// Summed weighted degree per community id.
    pub fn tot(&self) -> &[f64] {
        &self.tot
    }

    /// Internal weight per community id.
    pub fn inner(&self) -> &[f64] {
        &self.inner
    }

    /// Number of non-empty communities.
    pub fn community_count(&self) -> usize {
        self.size.iter().filter(|&&s| s > 0).count()
    }

    /// Copy the bookkeeping arrays.
    pub fn snapshot(&self) -> CommunitySnapshot {
        CommunitySnapshot {
            n2c: self.n2c.clone(),
            size: self.size.clone(),
            tot: self.tot.clone(),
            inner: self.inner.clone(),
        }
    }

    /// Modularity of the current partition.
    pub fn modularity(&self) -> f64 {
        let m2 = 2.0 * self.graph.total_weight();
        self.tot
            .iter()
            .zip(&self.inner)
            .filter(|(&tot, _)| tot > 0.0)
            .map(|(&tot, &inner)| inner / m2 - (tot / m2) * (tot / m2))
            .sum()
    }

    /// Force `(node, community)` assignments before optimizing.
    ///
    /// A node whose target community has no link to it is still moved, with
    /// zero connecting weight. Community ids are node indices of this level.
    pub fn init_partition(&mut self, seeds: &[(usize, usize)]) -> Result<()> {
        let n = self.graph.node_count();
        for &(node, comm) in seeds {
            if node >= n || comm >= n {
                return Err(Error::InvalidPartition(format!(
                    "seed ({node}, {comm}) out of range for {n} nodes"
                )));
            }

            let old = self.n2c[node];
            self.neigh_comm(node, false);
            let old_links = self.neigh_weight[old];
            self.remove(node, old, old_links);

            let links = self.neigh_weight[comm].max(0.0);
            self.insert(node, comm, links);
        }
        debug!(level = self.level, seeds = seeds.len(), "applied partition seed");
        Ok(())
    }

    /// Optimize until a pass makes no move, gains too little, or the pass
    /// cap is reached.
    pub fn run(&mut self) -> LevelOutcome {
        let mut improvement = false;
        let mut new_mod = self.modularity();

        for pass in 1..=self.max_passes {
            let cur_mod = new_mod;
            let moves = self.run_pass();
            new_mod = self.modularity();

            debug!(
                level = self.level,
                pass,
                moves,
                modularity = new_mod,
                "local moving pass"
            );

            if moves > 0 {
                improvement = true;
            }
            if moves == 0 || new_mod - cur_mod <= self.min_modularity_gain {
                return LevelOutcome {
                    improvement,
                    modularity: new_mod,
                    passes: pass,
                };
            }
        }

        warn!(
            level = self.level,
            max_passes = self.max_passes,
            "pass cap reached before convergence"
        );
        LevelOutcome {
            improvement,
            modularity: new_mod,
            passes: self.max_passes,
        }
    }

    /// One sweep over all nodes. Returns the number of nodes that moved.
    pub fn run_pass(&mut self) -> usize {
        let mut order: Vec<usize> = (0..self.graph.node_count()).collect();
        if let Some(rng) = self.rng.as_mut() {
            order.shuffle(rng);
        }

        let mut moves = 0;
        for node in order {
            let node_comm = self.n2c[node];
            let degree = self.graph.weighted_degree(node);

            self.neigh_comm(node, true);
            let own_links = self.neigh_weight[node_comm];
            self.remove(node, node_comm, own_links);

            let mut best_comm = node_comm;
            let mut best_links = own_links;
            let mut best_gain = 0.0;
            for &comm in &self.neigh_pos {
                if !self.neigh_eligible[comm] {
                    continue;
                }
                let links = self.neigh_weight[comm];
                let gain = self.gain(comm, links, degree);
                if gain > best_gain {
                    best_gain = gain;
                    best_comm = comm;
                    best_links = links;
                }
            }

            self.insert(node, best_comm, best_links);
            if best_comm != node_comm {
                moves += 1;
            }
        }
        moves
    }

    #[inline]
    fn gain(&self, comm: usize, links: f64, degree: f64) -> f64 {
        links - self.tot[comm] * degree / (2.0 * self.graph.total_weight())
    }

    /// Accumulate link weight from `node` into each neighboring community.
    ///
    /// Weights always cover every neighbor so `inner` stays exact; only the
    /// candidate flag is filtered by the policy. The node's own community
    /// comes first and is always a candidate.
    fn neigh_comm(&mut self, node: usize, filtered: bool) {
        for &comm in &self.neigh_pos {
            self.neigh_weight[comm] = UNSEEN;
            self.neigh_eligible[comm] = false;
        }
        self.neigh_pos.clear();

        let own = self.n2c[node];
        self.neigh_pos.push(own);
        self.neigh_weight[own] = 0.0;
        self.neigh_eligible[own] = true;

        for (neighbor, w) in self.graph.neighbors(node) {
            let comm = self.n2c[neighbor];
            if self.neigh_weight[comm] == UNSEEN {
                self.neigh_weight[comm] = 0.0;
                self.neigh_pos.push(comm);
            }
            self.neigh_weight[comm] += w;

            if !self.neigh_eligible[comm] {
                let candidate = Neighbor {
                    level: self.level,
                    degree: self.graph.nb_neighbors(neighbor),
                    community_size: self.size[comm],
                };
                if !filtered || self.policy.is_eligible(&candidate) {
                    self.neigh_eligible[comm] = true;
                }
            }
        }
    }

    fn remove(&mut self, node: usize, comm: usize, links: f64) {
        self.tot[comm] -= self.graph.weighted_degree(node);
        self.inner[comm] -= 2.0 * links + 2.0 * self.graph.nb_self_loops(node);
        self.size[comm] -= 1;
        self.n2c[node] = UNASSIGNED;
    }

    fn insert(&mut self, node: usize, comm: usize, links: f64) {
        self.tot[comm] += self.graph.weighted_degree(node);
        self.inner[comm] += 2.0 * links + 2.0 * self.graph.nb_self_loops(node);
        self.size[comm] += 1;
        self.n2c[node] = comm;
    }
}

//! Per-level Louvain optimization.
//!
//! ## The Modularity Objective
//!
//! Louvain maximizes **modularity** Q, which compares the weight inside
//! communities to what a random graph with the same degree sequence would
//! put there:
//!
//! ```text
//! Q = Σ_c [ in_c / 2m - (tot_c / 2m)² ]
//! ```
//!
//! Where:
//! - m = total edge weight (each undirected edge once, self-loops once)
//! - in_c = twice the weight of edges inside c, self-loops included
//! - tot_c = summed weighted degree of the members of c
//!
//! ## One Level
//!
//! 1. **Local moving** ([`Community::run`]): greedily move single nodes to
//!    the neighboring community with the best modularity gain, sweeping all
//!    nodes until a sweep changes nothing or gains too little.
//! 2. **Compression** ([`Community::compress`]): fold every community into
//!    one node of a new graph. Internal weight becomes a self-loop.
//!
//! The [`hierarchy`](crate::hierarchy) driver repeats this level by level.
//!
//! ## Eligibility
//!
//! An [`EligibilityPolicy`] can veto neighbors as move targets, e.g. to stop
//! hubs from swallowing their neighborhood. The policy only narrows the
//! candidate set; weights are always accounted over all neighbors.
//!
//! ## Usage
//!
//! ```rust
//! use tier_louvain::community::{Community, EligibilityPolicy};
//! use tier_louvain::graph::GraphBuilder;
//! use tier_louvain::LouvainConfig;
//!
//! let graph = GraphBuilder::new(4)
//!     .edge(0, 1)
//!     .edge(2, 3)
//!     .build()
//!     .unwrap();
//!
//! let config = LouvainConfig::default();
//! let mut community = Community::new(graph, 0, EligibilityPolicy::Baseline, &config).unwrap();
//! let outcome = community.run();
//! assert!(outcome.improvement);
//! assert_eq!(community.community_count(), 2);
//! ```
//!
//! ## References
//!
//! - Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! - Newman & Girvan (2004). "Finding and evaluating community structure in networks."

mod compress;
mod louvain;
mod policy;
mod traits;

pub use compress::Compression;
pub use louvain::{Community, CommunitySnapshot, LevelOutcome};
pub use policy::{EligibilityPolicy, Neighbor, PolicyProgression};
pub use traits::CommunityDetection;

//! # tier-louvain
//!
//! Multi-level Louvain clustering: each level optimizes modularity by local
//! node moves, then folds its communities into the next level's graph.
//!
//! - [`graph`]: immutable compressed-adjacency graph with per-node metadata
//! - [`community`]: one level's optimization state, eligibility policies,
//!   and compression
//! - [`hierarchy`]: the level-by-level driver
//! - [`metrics`]: community size statistics
//! - [`io`]: edge list and seed import, per-level export (feature `io`)
//!
//! ```rust
//! use tier_louvain::community::CommunityDetection;
//! use tier_louvain::graph::GraphBuilder;
//! use tier_louvain::Louvain;
//!
//! let graph = GraphBuilder::new(4).edge(0, 1).edge(2, 3).build().unwrap();
//! let communities = Louvain::new().detect(&graph).unwrap();
//! assert_eq!(communities, vec![0, 0, 1, 1]);
//! ```

pub mod community;
pub mod config;
/// Error types used across `tier-louvain`.
pub mod error;
pub mod graph;
pub mod hierarchy;
#[cfg(feature = "io")]
pub mod io;
pub mod metrics;


pub use community::{
    Community, CommunityDetection, CommunitySnapshot, EligibilityPolicy, LevelOutcome,
    PolicyProgression,
};
pub use config::{LouvainConfig, PassOrder};
pub use error::{Error, Result};
pub use graph::{Graph, GraphBuilder, NodeInfo};
pub use hierarchy::{Hierarchy, HierarchyDriver, LevelResult, LevelSummary, Louvain};
pub use metrics::{LevelStats, SizeStats};

//! Multi-resolution community hierarchy.
//!
//! # The Core Insight
//!
//! One Louvain level only merges single nodes into their neighbors'
//! communities. Compressing those communities into nodes and running again
//! lets whole communities merge, level after level:
//!
//! ```text
//! Level 2:            [A B C D]
//!                     /       \
//! Level 1:       [A B]         [C D]
//!                /   \         /   \
//! Level 0:    a1 a2  b1 b2  c1 c2  d1 d2
//! ```
//!
//! Each level is a coarser view of the same graph. Total edge weight is the
//! same at every level; only its split between self-loops and links moves.
//!
//! # Running
//!
//! [`HierarchyDriver`] owns the input graph and hands each level to a
//! [`Community`](crate::community::Community), then replaces it with the
//! compressed graph. A callback sees every level while it is still alive,
//! which is where per-level export happens. The returned [`Hierarchy`] keeps
//! only what survives: per-level summaries and the top graph.
//!
//! ```rust
//! use tier_louvain::graph::GraphBuilder;
//! use tier_louvain::{HierarchyDriver, LouvainConfig};
//!
//! let graph = GraphBuilder::new(6)
//!     .edge(0, 1).edge(1, 2).edge(0, 2)
//!     .edge(3, 4).edge(4, 5).edge(3, 5)
//!     .edge(2, 3)
//!     .build()
//!     .unwrap();
//!
//! let mut driver = HierarchyDriver::new(graph, LouvainConfig::default()).unwrap();
//! let hierarchy = driver.run().unwrap();
//! assert_eq!(hierarchy.partition_at(0).unwrap(), vec![0, 0, 0, 1, 1, 1]);
//! assert!(driver.run().is_err());
//! ```
//!
//! # Cutting the Hierarchy
//!
//! [`Hierarchy::partition_at`] maps every level-0 node through the
//! assignments of levels `0..=level`, the same way a dendrogram is cut at a
//! given height.

mod driver;
mod level;

pub use driver::{HierarchyDriver, Louvain};
pub use level::{Hierarchy, LevelResult, LevelSummary};

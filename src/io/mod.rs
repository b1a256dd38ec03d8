//! File-shaped adapters around the clustering core.
//!
//! The core never calls into this module: importers produce a
//! [`GraphBuilder`](crate::graph::GraphBuilder) or seed pairs, and the
//! exporter is meant to be passed to
//! [`HierarchyDriver::run_with`](crate::HierarchyDriver::run_with).
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use tier_louvain::io::{read_partition_seed, EdgeList, LevelExporter};
//! use tier_louvain::{HierarchyDriver, LouvainConfig};
//!
//! let edges = EdgeList::read(BufReader::new(File::open("graph.txt")?))?;
//! let graph = edges.into_builder().build()?;
//! let seed = read_partition_seed(BufReader::new(File::open("seed.txt")?))?;
//!
//! let exporter = LevelExporter::new("out");
//! let mut driver = HierarchyDriver::new(graph, LouvainConfig::default())?
//!     .with_partition_seed_by_id(&seed)?;
//! driver.run_with(|level| exporter.write_level(level))?;
//! # Ok::<(), tier_louvain::Error>(())
//! ```

mod export;
mod import;

pub use export::LevelExporter;
pub use import::{read_metadata, read_partition_seed, EdgeList};

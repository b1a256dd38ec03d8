//! Immutable weighted graph, one per hierarchy level.
//!
//! ## Layout
//!
//! Adjacency is stored compressed: a cumulative degree index plus parallel
//! neighbor-id and neighbor-weight arrays, so the neighbors of node `i`
//! occupy one contiguous slice.
//!
//! ```text
//! degrees:  [2, 3, 5]          (cumulative)
//! links:    [1, 2 | 0 | 0, 1]
//! weights:  [1., 3.| 1.| 3., 2.]
//! ```
//!
//! Self-loops are kept out of the slices and stored per node. With `m` the
//! total edge weight (every undirected edge once, every self-loop once), the
//! weighted degree of a node counts its self-loop twice, so the weighted
//! degrees always sum to `2m`.

mod builder;
mod node;

pub use builder::{analytic_fn, Analytic, GraphBuilder};
pub use node::NodeInfo;

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Weighted undirected graph with per-node metadata.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Cumulative degree: neighbors of `i` are `links[degrees[i-1]..degrees[i]]`.
    degrees: Vec<usize>,
    links: Vec<usize>,
    weights: Vec<f64>,
    self_loops: Vec<f64>,
    weighted_degrees: Vec<f64>,
    total_weight: f64,
    nodes: Vec<NodeInfo>,
    analytic_names: Vec<String>,
    id_index: HashMap<u64, usize>,
}

impl Graph {
    /// Assemble a graph from compressed adjacency.
    ///
    /// The adjacency must be symmetric; this is the caller's contract. Ids,
    /// weights, and array lengths are checked.
    pub(crate) fn from_parts(
        degrees: Vec<usize>,
        links: Vec<usize>,
        weights: Vec<f64>,
        self_loops: Vec<f64>,
        nodes: Vec<NodeInfo>,
        analytic_names: Vec<String>,
    ) -> Result<Self> {
        let n = nodes.len();
        if degrees.len() != n || self_loops.len() != n {
            return Err(Error::InvalidGraph(format!(
                "expected {n} degree and self-loop entries, got {} and {}",
                degrees.len(),
                self_loops.len()
            )));
        }
        if links.len() != weights.len() || degrees.last().copied().unwrap_or(0) != links.len() {
            return Err(Error::InvalidGraph(
                "cumulative degree does not match adjacency length".into(),
            ));
        }
        if degrees.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::InvalidGraph("cumulative degree is not monotone".into()));
        }
        if let Some(&bad) = links.iter().find(|&&j| j >= n) {
            return Err(Error::InvalidGraph(format!(
                "neighbor id {bad} out of range for {n} nodes"
            )));
        }
        for &w in weights.iter().chain(&self_loops) {
            check_weight(w)?;
        }

        let mut id_index = HashMap::with_capacity(n);
        for (idx, info) in nodes.iter().enumerate() {
            if id_index.insert(info.id, idx).is_some() {
                return Err(Error::InvalidGraph(format!("duplicate node id {}", info.id)));
            }
        }

        let mut graph = Self {
            degrees,
            links,
            weights,
            self_loops,
            weighted_degrees: Vec::new(),
            total_weight: 0.0,
            nodes,
            analytic_names,
            id_index,
        };

        graph.weighted_degrees = (0..n)
            .map(|i| graph.neighbors(i).map(|(_, w)| w).sum::<f64>() + 2.0 * graph.self_loops[i])
            .collect();
        graph.total_weight = graph.weighted_degrees.iter().sum::<f64>() / 2.0;

        Ok(graph)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected non-loop edges.
    pub fn edge_count(&self) -> usize {
        self.links.len() / 2
    }

    /// Total edge weight `m`: every undirected edge once, every self-loop once.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Incident weight of `node`, counting its self-loop twice.
    pub fn weighted_degree(&self, node: usize) -> f64 {
        self.weighted_degrees[node]
    }

    /// Self-loop weight of `node`.
    pub fn nb_self_loops(&self, node: usize) -> f64 {
        self.self_loops[node]
    }

    /// Number of distinct non-loop neighbors of `node`.
    pub fn nb_neighbors(&self, node: usize) -> usize {
        let (start, end) = self.range(node);
        end - start
    }

    /// `(neighbor, weight)` pairs of `node` in stored order. Self-loops excluded.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + Clone + '_ {
        let (start, end) = self.range(node);
        self.links[start..end]
            .iter()
            .copied()
            .zip(self.weights[start..end].iter().copied())
    }

    /// Metadata of `node`.
    pub fn node_info(&self, node: usize) -> &NodeInfo {
        &self.nodes[node]
    }

    /// All node infos, indexed by node.
    pub fn nodes(&self) -> &[NodeInfo] {
        &self.nodes
    }

    /// Names of the analytics folded into every [`NodeInfo::analytics`].
    pub fn analytic_names(&self) -> &[String] {
        &self.analytic_names
    }

    /// Dense index of the node whose stable id is `id`.
    pub fn node_by_id(&self, id: u64) -> Option<usize> {
        self.id_index.get(&id).copied()
    }

    /// Undirected edges `(i, j, w)` with `i < j`, in adjacency order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.node_count()).flat_map(move |i| {
            self.neighbors(i)
                .filter(move |&(j, _)| i < j)
                .map(move |(j, w)| (i, j, w))
        })
    }

    pub(crate) fn node_info_mut(&mut self, node: usize) -> &mut NodeInfo {
        &mut self.nodes[node]
    }

    fn range(&self, node: usize) -> (usize, usize) {
        let start = if node == 0 { 0 } else { self.degrees[node - 1] };
        (start, self.degrees[node])
    }
}

pub(crate) fn check_weight(w: f64) -> Result<()> {
    if !w.is_finite() || w < 0.0 {
        return Err(Error::InvalidGraph(format!(
            "edge weight must be finite and non-negative, got {w}"
        )));
    }
    Ok(())
}

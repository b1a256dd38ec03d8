//! Level-0 graph construction from an edge list.

use super::{check_weight, Graph, NodeInfo};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// A custom per-node value computed at import and summed on compression.
pub trait Analytic {
    /// Column name used by exporters.
    fn name(&self) -> &str;

    /// Value for the level-0 node with stable id `id`.
    fn extract(&self, id: u64, metadata: Option<&str>) -> f64;
}

struct FnAnalytic<F> {
    name: String,
    f: F,
}

impl<F> Analytic for FnAnalytic<F>
where
    F: Fn(u64, Option<&str>) -> f64,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, id: u64, metadata: Option<&str>) -> f64 {
        (self.f)(id, metadata)
    }
}

/// Wrap a closure as an [`Analytic`].
pub fn analytic_fn<F>(name: &str, f: F) -> impl Analytic
where
    F: Fn(u64, Option<&str>) -> f64,
{
    FnAnalytic {
        name: name.to_string(),
        f,
    }
}

/// Builder for a level-0 [`Graph`].
///
/// Nodes are dense indices `0..n`. Edges are undirected; parallel edges are
/// summed into the slot of their first occurrence, which fixes neighbor
/// iteration order to the first-seen order of the edge list.
///
/// ```rust
/// use tier_louvain::graph::GraphBuilder;
///
/// let graph = GraphBuilder::new(3)
///     .edge(0, 1)
///     .weighted_edge(1, 2, 2.5)
///     .build()
///     .unwrap();
/// assert_eq!(graph.total_weight(), 3.5);
/// ```
pub struct GraphBuilder {
    node_count: usize,
    edges: Vec<(usize, usize, f64)>,
    ids: Option<Vec<u64>>,
    metadata: Vec<(usize, String)>,
    analytics: Vec<Box<dyn Analytic>>,
}

impl GraphBuilder {
    /// Create a builder for `node_count` nodes with ids `0..node_count`.
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
            ids: None,
            metadata: Vec::new(),
            analytics: Vec::new(),
        }
    }

    /// Add an edge of weight 1.
    pub fn edge(self, src: usize, dst: usize) -> Self {
        self.weighted_edge(src, dst, 1.0)
    }

    /// Add a weighted edge. `src == dst` adds self-loop weight.
    pub fn weighted_edge(mut self, src: usize, dst: usize, weight: f64) -> Self {
        self.edges.push((src, dst, weight));
        self
    }

    /// Add many weighted edges.
    pub fn edges<I>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        self.edges.extend(edges);
        self
    }

    /// Set stable ids (one per node, unique). Defaults to the dense index.
    pub fn with_ids(mut self, ids: Vec<u64>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Attach metadata to node `node`; a later call for the same node
    /// replaces it. Out-of-range nodes fail at build.
    pub fn with_metadata(mut self, node: usize, metadata: impl Into<String>) -> Self {
        self.metadata.push((node, metadata.into()));
        self
    }

    /// Register a custom analytic. Analytics run in registration order.
    pub fn with_analytic(mut self, analytic: impl Analytic + 'static) -> Self {
        self.analytics.push(Box::new(analytic));
        self
    }

    /// Validate and build the graph.
    pub fn build(self) -> Result<Graph> {
        let n = self.node_count;

        let mut metadata: Vec<Option<String>> = vec![None; n];
        for (node, meta) in self.metadata {
            let slot = metadata.get_mut(node).ok_or_else(|| {
                Error::InvalidGraph(format!(
                    "metadata given for node {node} but graph has {n} nodes"
                ))
            })?;
            *slot = Some(meta);
        }

        let ids = match self.ids {
            Some(ids) if ids.len() != n => {
                return Err(Error::InvalidGraph(format!(
                    "expected {n} node ids, got {}",
                    ids.len()
                )))
            }
            Some(ids) => ids,
            None => (0..n as u64).collect(),
        };

        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        let mut slots: Vec<HashMap<usize, usize>> = vec![HashMap::new(); n];
        let mut self_loops = vec![0.0; n];

        for &(src, dst, w) in &self.edges {
            if src >= n || dst >= n {
                return Err(Error::InvalidGraph(format!(
                    "edge ({src}, {dst}) out of range for {n} nodes"
                )));
            }
            check_weight(w)?;

            if src == dst {
                self_loops[src] += w;
                continue;
            }
            for (a, b) in [(src, dst), (dst, src)] {
                match slots[a].get(&b) {
                    Some(&slot) => adjacency[a][slot].1 += w,
                    None => {
                        slots[a].insert(b, adjacency[a].len());
                        adjacency[a].push((b, w));
                    }
                }
            }
        }

        let analytic_names: Vec<String> =
            self.analytics.iter().map(|a| a.name().to_string()).collect();

        let nodes: Vec<NodeInfo> = ids
            .into_iter()
            .zip(metadata)
            .map(|(id, metadata)| {
                let values = self
                    .analytics
                    .iter()
                    .map(|a| a.extract(id, metadata.as_deref()))
                    .collect();
                let mut info = NodeInfo::new(id).with_analytics(values);
                info.metadata = metadata;
                info
            })
            .collect();

        let mut degrees = Vec::with_capacity(n);
        let mut links = Vec::new();
        let mut weights = Vec::new();
        for neighbors in adjacency {
            for (j, w) in neighbors {
                links.push(j);
                weights.push(w);
            }
            degrees.push(links.len());
        }

        let graph = Graph::from_parts(degrees, links, weights, self_loops, nodes, analytic_names)?;
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            total_weight = graph.total_weight(),
            "built level-0 graph"
        );
        Ok(graph)
    }
}

impl fmt::Debug for GraphBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphBuilder")
            .field("node_count", &self.node_count)
            .field("edges", &self.edges.len())
            .field("analytics", &self.analytics.len())
            .finish()
    }
}

#[cfg(feature = "petgraph")]
impl Graph {
    /// Build a level-0 graph from a petgraph `UnGraph`, weighting each edge
    /// with `weight`. Node ids are the petgraph node indices.
    pub fn from_petgraph<N, E, F>(graph: &petgraph::graph::UnGraph<N, E>, weight: F) -> Result<Self>
    where
        F: Fn(&E) -> f64,
    {
        use petgraph::visit::EdgeRef;

        let edges = graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), weight(e.weight())));
        GraphBuilder::new(graph.node_count()).edges(edges).build()
    }
}

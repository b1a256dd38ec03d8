//! Folding a converged level into the next level's graph.
//!
//! Surviving communities are renumbered densely in ascending order of their
//! id. Each becomes one node whose
//!
//! - edges to other communities sum the member-to-member edges between them,
//! - self-loop is the community's internal edge weight plus member self-loops,
//! - [`NodeInfo`] is the fold of the members' infos in member order.
//!
//! Total edge weight is preserved exactly, and so is modularity: the
//! singleton partition of the new graph scores what the old partition did.

use super::louvain::Community;
use crate::error::Result;
use crate::graph::{Graph, NodeInfo};
use tracing::debug;

const UNSEEN: f64 = -1.0;

/// Output of [`Community::compress`].
#[derive(Debug)]
pub struct Compression {
    /// Next level's graph; node `c` is dense community `c`.
    pub graph: Graph,
    /// Dense community index of each node of the compressed level.
    pub assignment: Vec<usize>,
}

impl Community {
    /// Build the next level's graph from the current partition.
    ///
    /// Every node of this level gets its back-reference
    /// ([`NodeInfo::community_node`]) set to its node in the returned graph.
    pub fn compress(&mut self) -> Result<Compression> {
        let n = self.graph.node_count();

        let mut renumber = vec![usize::MAX; n];
        for &comm in &self.n2c {
            renumber[comm] = 0;
        }
        let mut next = 0;
        for slot in renumber.iter_mut().filter(|s| **s != usize::MAX) {
            *slot = next;
            next += 1;
        }

        let assignment: Vec<usize> = self.n2c.iter().map(|&c| renumber[c]).collect();
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); next];
        for (node, &comm) in assignment.iter().enumerate() {
            members[comm].push(node);
        }

        let nodes: Vec<NodeInfo> = members
            .iter()
            .map(|group| self.fold_members(group))
            .collect();

        let mut degrees = Vec::with_capacity(next);
        let mut links = Vec::new();
        let mut weights = Vec::new();
        let mut self_loops = Vec::with_capacity(next);
        let mut link_weight = vec![UNSEEN; next];
        let mut link_pos: Vec<usize> = Vec::new();

        for (comm, group) in members.iter().enumerate() {
            let mut loops = 0.0;
            let mut internal = 0.0;
            for &node in group {
                loops += self.graph.nb_self_loops(node);
                for (neighbor, w) in self.graph.neighbors(node) {
                    let other = assignment[neighbor];
                    if other == comm {
                        internal += w;
                    } else {
                        if link_weight[other] == UNSEEN {
                            link_weight[other] = 0.0;
                            link_pos.push(other);
                        }
                        link_weight[other] += w;
                    }
                }
            }
            // Internal edges were seen from both endpoints.
            self_loops.push(loops + internal / 2.0);

            for &other in &link_pos {
                links.push(other);
                weights.push(link_weight[other]);
                link_weight[other] = UNSEEN;
            }
            link_pos.clear();
            degrees.push(links.len());
        }

        for (node, &comm) in assignment.iter().enumerate() {
            self.graph.node_info_mut(node).set_community_node(comm);
        }

        let graph = Graph::from_parts(
            degrees,
            links,
            weights,
            self_loops,
            nodes,
            self.graph.analytic_names().to_vec(),
        )?;

        debug!(
            level = self.level(),
            nodes = n,
            communities = graph.node_count(),
            total_weight = graph.total_weight(),
            "compressed level"
        );

        Ok(Compression { graph, assignment })
    }

    fn fold_members(&self, group: &[usize]) -> NodeInfo {
        let mut iter = group.iter();
        let Some(&first) = iter.next() else {
            return NodeInfo::new(0);
        };
        let start = (
            self.graph.node_info(first).seed_fold(),
            self.graph.weighted_degree(first),
        );
        iter.fold(start, |acc, &node| {
            NodeInfo::merge(
                acc,
                (self.graph.node_info(node), self.graph.weighted_degree(node)),
            )
        })
        .0
    }
}

#[cfg(test)]
mod tests {
    use crate::community::{Community, EligibilityPolicy};
    use crate::config::LouvainConfig;
    use crate::graph::{analytic_fn, GraphBuilder};

    fn run(graph: crate::graph::Graph) -> Community {
        let config = LouvainConfig::default();
        let mut c = Community::new(graph, 0, EligibilityPolicy::Baseline, &config).unwrap();
        let _ = c.run();
        c
    }

    fn two_triangles() -> GraphBuilder {
        GraphBuilder::new(6)
            .edge(0, 1)
            .edge(1, 2)
            .edge(0, 2)
            .edge(3, 4)
            .edge(4, 5)
            .edge(3, 5)
            .edge(2, 3)
    }

    #[test]
    fn test_compress_two_triangles() {
        let mut c = run(two_triangles().build().unwrap());
        let before = c.modularity();
        let out = c.compress().unwrap();

        assert_eq!(out.assignment, vec![0, 0, 0, 1, 1, 1]);
        let g = &out.graph;
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.nb_self_loops(0), 3.0);
        assert_eq!(g.nb_self_loops(1), 3.0);
        assert_eq!(g.neighbors(0).collect::<Vec<_>>(), vec![(1, 1.0)]);
        assert_eq!(g.total_weight(), 7.0);

        // Representatives are the bridge endpoints (highest degree).
        assert_eq!(g.node_info(0).id, 2);
        assert_eq!(g.node_info(1).id, 3);
        assert_eq!(g.node_info(0).size, 3);

        // Back-references point into the new graph.
        let refs: Vec<_> = c.graph().nodes().iter().map(|n| n.community_node()).collect();
        assert_eq!(refs, vec![Some(0), Some(0), Some(0), Some(1), Some(1), Some(1)]);

        // Singleton partition of the compressed graph keeps modularity.
        let next = Community::new(
            out.graph,
            1,
            EligibilityPolicy::Baseline,
            &LouvainConfig::default(),
        )
        .unwrap();
        assert!((next.modularity() - before).abs() < 1e-12);
    }

    #[test]
    fn test_compress_sums_analytics_and_keeps_names() {
        let graph = two_triangles()
            .with_analytic(analytic_fn("one", |_, _| 1.0))
            .build()
            .unwrap();
        let mut c = run(graph);
        let out = c.compress().unwrap();

        assert_eq!(out.graph.analytic_names(), ["one"]);
        assert_eq!(out.graph.node_info(0).analytics, vec![3.0]);
        assert_eq!(out.graph.node_info(1).analytics, vec![3.0]);
    }

    #[test]
    fn test_compress_preserves_total_weight_with_loops() {
        let graph = GraphBuilder::new(4)
            .weighted_edge(0, 1, 2.5)
            .weighted_edge(1, 2, 0.5)
            .weighted_edge(2, 3, 4.0)
            .weighted_edge(3, 3, 1.5)
            .weighted_edge(0, 0, 0.25)
            .build()
            .unwrap();
        let total = graph.total_weight();
        let mut c = run(graph);
        let out = c.compress().unwrap();
        assert!((out.graph.total_weight() - total).abs() < 1e-12);
    }

    #[test]
    fn test_first_max_degree_member_is_representative() {
        // Star center 0 with leaves; 0 has the largest degree though not
        // the largest id.
        let graph = GraphBuilder::new(4)
            .edge(0, 1)
            .edge(0, 2)
            .edge(0, 3)
            .with_ids(vec![40, 10, 20, 30])
            .build()
            .unwrap();
        let mut c = run(graph);
        let out = c.compress().unwrap();
        assert_eq!(out.graph.node_count(), 1);
        assert_eq!(out.graph.node_info(0).id, 40);
        assert_eq!(out.graph.node_info(0).size, 4);
    }
}

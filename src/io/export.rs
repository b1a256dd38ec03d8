//! Per-level export, driven from the hierarchy callback.
//!
//! For level `n` the exporter writes into `<root>/level_<n>/`:
//!
//! - `nodes.csv`: `id,community,community_size,weighted_degree,metadata,<analytics...>`
//!   with one row per node of the level. `community` is the stable id of the
//!   representative the node was folded into.
//! - `edges.tsv`: `src<TAB>dst<TAB>weight` of the compressed graph by stable
//!   id, self-loops included.
//! - `stats.json`: [`LevelStats`].

use crate::error::Result;
use crate::hierarchy::LevelResult;
use crate::metrics::LevelStats;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes each level under a root directory.
#[derive(Debug, Clone)]
pub struct LevelExporter {
    root: PathBuf,
}

impl LevelExporter {
    /// Export under `root`, created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory a level is written to.
    pub fn level_dir(&self, level: usize) -> PathBuf {
        self.root.join(format!("level_{level}"))
    }

    /// Write all files for one level.
    pub fn write_level(&self, result: &LevelResult<'_>) -> Result<()> {
        let dir = self.level_dir(result.level);
        fs::create_dir_all(&dir)?;

        write_nodes(&dir.join("nodes.csv"), result)?;
        write_edges(&dir.join("edges.tsv"), result)?;

        let stats = LevelStats::from_community(result.community);
        let file = BufWriter::new(File::create(dir.join("stats.json"))?);
        serde_json::to_writer_pretty(file, &stats)?;

        tracing::debug!(level = result.level, dir = %dir.display(), "exported level");
        Ok(())
    }
}

fn write_nodes(path: &Path, result: &LevelResult<'_>) -> Result<()> {
    let community = result.community;
    let graph = community.graph();
    let mut out = BufWriter::new(File::create(path)?);

    write!(out, "id,community,community_size,weighted_degree,metadata")?;
    for name in graph.analytic_names() {
        write!(out, ",{}", csv_field(name))?;
    }
    writeln!(out)?;

    for (node, info) in graph.nodes().iter().enumerate() {
        let representative = info
            .community_node()
            .map(|c| result.next.node_info(c).id)
            .unwrap_or(info.id);
        let size = community.community_sizes()[community.community_of(node)];
        write!(
            out,
            "{},{},{},{},{}",
            info.id,
            representative,
            size,
            graph.weighted_degree(node).round() as i64,
            csv_field(info.metadata.as_deref().unwrap_or(""))
        )?;
        for value in &info.analytics {
            write!(out, ",{value}")?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn write_edges(path: &Path, result: &LevelResult<'_>) -> Result<()> {
    let next = result.next;
    let mut out = BufWriter::new(File::create(path)?);
    for node in 0..next.node_count() {
        let loops = next.nb_self_loops(node);
        if loops > 0.0 {
            let id = next.node_info(node).id;
            writeln!(out, "{id}\t{id}\t{loops}")?;
        }
    }
    for (i, j, w) in next.edges() {
        writeln!(out, "{}\t{}\t{w}", next.node_info(i).id, next.node_info(j).id)?;
    }
    out.flush()?;
    Ok(())
}

/// Quote a CSV field when it contains a separator, quote, or newline.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LouvainConfig;
    use crate::graph::{analytic_fn, GraphBuilder};
    use crate::hierarchy::HierarchyDriver;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_export_two_triangles() {
        let graph = GraphBuilder::new(6)
            .edge(0, 1)
            .edge(1, 2)
            .edge(0, 2)
            .edge(3, 4)
            .edge(4, 5)
            .edge(3, 5)
            .edge(2, 3)
            .with_ids(vec![10, 11, 12, 13, 14, 15])
            .with_metadata(0, "first, node")
            .with_analytic(analytic_fn("unit", |_, _| 1.0))
            .build()
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let exporter = LevelExporter::new(dir.path());
        let mut driver = HierarchyDriver::new(graph, LouvainConfig::default()).unwrap();
        let hierarchy = driver.run_with(|level| exporter.write_level(level)).unwrap();
        assert_eq!(hierarchy.len(), 2);

        let nodes = fs::read_to_string(exporter.level_dir(0).join("nodes.csv")).unwrap();
        let lines: Vec<&str> = nodes.lines().collect();
        assert_eq!(
            lines[0],
            "id,community,community_size,weighted_degree,metadata,unit"
        );
        assert_eq!(lines[1], "10,12,3,2,\"first, node\",1");
        assert_eq!(lines[4], "13,13,3,3,,1");
        assert_eq!(lines.len(), 7);

        let edges = fs::read_to_string(exporter.level_dir(0).join("edges.tsv")).unwrap();
        assert_eq!(edges.lines().collect::<Vec<_>>(), vec!["12\t12\t3", "13\t13\t3", "12\t13\t1"]);

        let stats: LevelStats = serde_json::from_str(
            &fs::read_to_string(exporter.level_dir(0).join("stats.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(stats.all.count, 2);
        assert_eq!(stats.node_count, 6);

        // Level 1 makes no move; its nodes keep their own representative.
        let level1 = fs::read_to_string(exporter.level_dir(1).join("nodes.csv")).unwrap();
        let rows: Vec<&str> = level1.lines().skip(1).collect();
        assert_eq!(rows, vec!["12,12,1,7,,3", "13,13,1,7,,3"]);
    }
}

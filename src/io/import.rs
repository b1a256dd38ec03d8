//! Text importers: edge lists, node metadata, partition seeds.
//!
//! All formats are line based. Blank lines and lines starting with `#` are
//! skipped.
//!
//! | Input | Line format |
//! |-------|-------------|
//! | edge list | `src dst [weight]` (whitespace separated, weight defaults to 1) |
//! | metadata | `id<TAB>free text` |
//! | partition seed | `node community` (whitespace separated) |

use crate::error::{Error, Result};
use crate::graph::GraphBuilder;
use std::collections::HashMap;
use std::io::BufRead;
use std::str::FromStr;

/// Edge list with arbitrary `u64` node ids mapped to dense indices.
///
/// Dense indices follow first appearance in the file.
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    ids: Vec<u64>,
    index: HashMap<u64, usize>,
    edges: Vec<(usize, usize, f64)>,
}

impl EdgeList {
    /// Parse an edge list.
    pub fn read<R: BufRead>(reader: R) -> Result<Self> {
        let mut list = Self::default();
        for (line_no, line) in data_lines(reader) {
            let line = line?;
            let mut fields = line.split_whitespace();
            let src: u64 = field(&mut fields, line_no, "source id")?;
            let dst: u64 = field(&mut fields, line_no, "destination id")?;
            let weight = match fields.next() {
                Some(raw) => parse(raw, line_no, "weight")?,
                None => 1.0,
            };
            let src = list.intern(src);
            let dst = list.intern(dst);
            list.edges.push((src, dst, weight));
        }
        tracing::debug!(
            nodes = list.ids.len(),
            edges = list.edges.len(),
            "read edge list"
        );
        Ok(list)
    }

    /// Number of distinct node ids.
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Parsed edges on dense indices.
    pub fn edges(&self) -> &[(usize, usize, f64)] {
        &self.edges
    }

    /// Dense index of `id`.
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Builder carrying the edges and the original ids.
    pub fn into_builder(self) -> GraphBuilder {
        GraphBuilder::new(self.ids.len())
            .with_ids(self.ids)
            .edges(self.edges)
    }

    /// Builder carrying the edges, the original ids, and `metadata`.
    ///
    /// Metadata for an id absent from the edge list is an error.
    pub fn into_builder_with_metadata(self, metadata: &[(u64, String)]) -> Result<GraphBuilder> {
        let mut resolved = Vec::with_capacity(metadata.len());
        for (id, meta) in metadata {
            let node = self.index_of(*id).ok_or_else(|| {
                Error::InvalidGraph(format!("metadata for unknown node id {id}"))
            })?;
            resolved.push((node, meta.clone()));
        }
        Ok(resolved
            .into_iter()
            .fold(self.into_builder(), |b, (node, meta)| b.with_metadata(node, meta)))
    }

    fn intern(&mut self, id: u64) -> usize {
        *self.index.entry(id).or_insert_with(|| {
            self.ids.push(id);
            self.ids.len() - 1
        })
    }
}

/// Parse `id<TAB>metadata` lines.
pub fn read_metadata<R: BufRead>(reader: R) -> Result<Vec<(u64, String)>> {
    let mut out = Vec::new();
    for (line_no, line) in data_lines(reader) {
        let line = line?;
        let (id, meta) = line.split_once('\t').ok_or_else(|| Error::Parse {
            line: line_no,
            message: "expected `id<TAB>metadata`".into(),
        })?;
        out.push((parse(id.trim(), line_no, "node id")?, meta.to_string()));
    }
    Ok(out)
}

/// Parse `node community` seed lines into `(node id, community label)`.
pub fn read_partition_seed<R: BufRead>(reader: R) -> Result<Vec<(u64, u64)>> {
    let mut out = Vec::new();
    for (line_no, line) in data_lines(reader) {
        let line = line?;
        let mut fields = line.split_whitespace();
        let node = field(&mut fields, line_no, "node id")?;
        let comm = field(&mut fields, line_no, "community")?;
        out.push((node, comm));
    }
    Ok(out)
}

/// Non-blank, non-comment lines with their 1-based line numbers.
fn data_lines<R: BufRead>(reader: R) -> impl Iterator<Item = (usize, std::io::Result<String>)> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| match line {
            Ok(l) => {
                let t = l.trim();
                !t.is_empty() && !t.starts_with('#')
            }
            Err(_) => true,
        })
}

fn field<'a, T: FromStr>(
    fields: &mut impl Iterator<Item = &'a str>,
    line: usize,
    what: &str,
) -> Result<T> {
    let raw = fields.next().ok_or_else(|| Error::Parse {
        line,
        message: format!("missing {what}"),
    })?;
    parse(raw, line, what)
}

fn parse<T: FromStr>(raw: &str, line: usize, what: &str) -> Result<T> {
    raw.parse().map_err(|_| Error::Parse {
        line,
        message: format!("invalid {what} `{raw}`"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_edge_list() {
        let input = "# comment\n100 200\n200 300 2.5\n\n300 100 0.5\n";
        let list = EdgeList::read(input.as_bytes()).unwrap();

        assert_eq!(list.node_count(), 3);
        assert_eq!(list.index_of(300), Some(2));
        assert_eq!(list.edges(), &[(0, 1, 1.0), (1, 2, 2.5), (2, 0, 0.5)]);

        let graph = list.into_builder().build().unwrap();
        assert_eq!(graph.total_weight(), 4.0);
        assert_eq!(graph.node_info(1).id, 200);
    }

    #[test]
    fn test_bad_weight_reports_line() {
        let err = EdgeList::read("1 2\n2 3 heavy\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_missing_destination() {
        let err = EdgeList::read("7\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_metadata_attached_by_id() {
        let list = EdgeList::read("5 6\n".as_bytes()).unwrap();
        let meta = read_metadata("6\tsix\n5\tfive, with comma\n".as_bytes()).unwrap();
        let graph = list.into_builder_with_metadata(&meta).unwrap().build().unwrap();

        assert_eq!(graph.node_info(0).metadata.as_deref(), Some("five, with comma"));
        assert_eq!(graph.node_info(1).metadata.as_deref(), Some("six"));
    }

    #[test]
    fn test_metadata_for_unknown_id() {
        let list = EdgeList::read("5 6\n".as_bytes()).unwrap();
        let result = list.into_builder_with_metadata(&[(9, "x".into())]);
        assert!(matches!(result, Err(Error::InvalidGraph(_))));
    }

    #[test]
    fn test_read_partition_seed() {
        let seed = read_partition_seed("1 10\n2\t10\n# x\n3 30\n".as_bytes()).unwrap();
        assert_eq!(seed, vec![(1, 10), (2, 10), (3, 30)]);

        let err = read_partition_seed("1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }
}

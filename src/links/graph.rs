//! The cross-reference graph over a document collection.
//!
//! Nodes are keyed by vault-relative path in an arena map; edges live on the
//! nodes as ordered adjacency lists so traversal can follow links in the
//! order they appear in each document. The graph is rebuilt from scratch on
//! every analysis pass — inputs changed means discard and recompute, never
//! patch a cached graph piecemeal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::MnemaError,
    links::{extract::extract_links, resolve::resolve_reference},
    store::ContentStore,
};

/// One document in the link graph.
///
/// The outgoing list is deduplicated in first-occurrence order and is the
/// union of the regular and embed partitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteNode {
    pub path: String,
    /// Raw text, kept for the duration of the analysis pass.
    pub content: Option<String>,
    /// All resolved outgoing links, first-occurrence order, no duplicates.
    pub outgoing: Vec<String>,
    /// Outgoing links written as regular references.
    pub regular: Vec<String>,
    /// Outgoing links written as embeds.
    pub embeds: Vec<String>,
    /// Paths of documents linking here, in discovery order.
    pub incoming: Vec<String>,
    pub incoming_count: usize,
}

impl NoteNode {
    pub fn new(path: impl Into<String>) -> NoteNode {
        NoteNode {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// Arena of [`NoteNode`]s plus the collection's insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteGraph {
    nodes: BTreeMap<String, NoteNode>,
    order: Vec<String>,
}

impl NoteGraph {
    pub fn get(&self, path: &str) -> Option<&NoteNode> {
        self.nodes.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    /// Document paths in collection (listing) order.
    pub fn paths(&self) -> &[String] {
        &self.order
    }

    /// Nodes in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &NoteNode> {
        self.order.iter().filter_map(|p| self.nodes.get(p))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_nodes(self) -> BTreeMap<String, NoteNode> {
        self.nodes
    }

    pub(crate) fn insert(&mut self, node: NoteNode) {
        if !self.nodes.contains_key(&node.path) {
            self.order.push(node.path.clone());
        }
        self.nodes.insert(node.path.clone(), node);
    }

    /// Record one resolved reference. Repeated references between the same
    /// ordered pair count once; the first occurrence decides the
    /// regular/embed bucket. Self-references contribute nothing.
    pub(crate) fn add_edge(&mut self, source: &str, target: &str, embed: bool) {
        if source == target {
            return;
        }
        let Some(source_node) = self.nodes.get_mut(source) else {
            return;
        };
        if source_node.outgoing.iter().any(|p| p == target) {
            return;
        }
        source_node.outgoing.push(target.to_string());
        if embed {
            source_node.embeds.push(target.to_string());
        } else {
            source_node.regular.push(target.to_string());
        }
        if let Some(target_node) = self.nodes.get_mut(target) {
            target_node.incoming.push(source.to_string());
            target_node.incoming_count += 1;
        }
    }
}

/// Build the link graph for every document under `scope`.
///
/// Documents that vanish between listing and reading are skipped; references
/// that resolve to nothing are dropped. Neither is an error.
pub async fn build_graph(
    store: &dyn ContentStore,
    scope: &str,
    recursive: bool,
) -> Result<NoteGraph, MnemaError> {
    let known_paths = store.list_documents(scope, recursive).await?;
    let mut graph = NoteGraph::default();
    for path in &known_paths {
        graph.insert(NoteNode::new(path.clone()));
    }

    for path in &known_paths {
        let content = match store.read_document(path).await {
            Ok(text) => text,
            Err(MnemaError::NotFound(_)) => {
                tracing::debug!("Document {} disappeared during analysis, skipping", path);
                continue;
            }
            Err(e) => return Err(e),
        };
        for link in extract_links(&content) {
            if let Some(target) = resolve_reference(&link.reference, path, &known_paths) {
                graph.add_edge(path, &target, link.embed);
            }
        }
        if let Some(node) = graph.nodes.get_mut(path) {
            node.content = Some(content);
        }
    }

    tracing::debug!(
        "Built link graph over {} documents in scope '{}'",
        graph.len(),
        scope
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn node(path: &str) -> NoteNode {
        NoteNode::new(path)
    }

    fn graph_of(paths: &[&str]) -> NoteGraph {
        let mut graph = NoteGraph::default();
        for p in paths {
            graph.insert(node(p));
        }
        graph
    }

    #[test]
    fn edges_partition_consistently() {
        let mut graph = graph_of(&["A.md", "B.md", "C.md"]);
        graph.add_edge("A.md", "B.md", false);
        graph.add_edge("A.md", "C.md", true);

        let a = graph.get("A.md").unwrap();
        assert_eq!(a.outgoing, vec!["B.md", "C.md"]);
        assert_eq!(a.regular, vec!["B.md"]);
        assert_eq!(a.embeds, vec!["C.md"]);
        for link in a.regular.iter().chain(a.embeds.iter()) {
            assert!(a.outgoing.contains(link));
        }
        assert_eq!(graph.get("B.md").unwrap().incoming_count, 1);
        assert_eq!(graph.get("C.md").unwrap().incoming, vec!["A.md"]);
    }

    #[test]
    fn repeated_references_count_once() {
        let mut graph = graph_of(&["A.md", "B.md"]);
        graph.add_edge("A.md", "B.md", false);
        graph.add_edge("A.md", "B.md", true);
        graph.add_edge("A.md", "B.md", false);

        let a = graph.get("A.md").unwrap();
        assert_eq!(a.outgoing, vec!["B.md"]);
        assert_eq!(a.regular, vec!["B.md"]);
        assert!(a.embeds.is_empty());
        assert_eq!(graph.get("B.md").unwrap().incoming_count, 1);
    }

    #[test]
    fn self_references_are_inert() {
        let mut graph = graph_of(&["A.md"]);
        graph.add_edge("A.md", "A.md", false);
        let a = graph.get("A.md").unwrap();
        assert!(a.outgoing.is_empty());
        assert_eq!(a.incoming_count, 0);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let graph = graph_of(&["b.md", "a.md", "c.md"]);
        assert_eq!(graph.paths(), &["b.md", "a.md", "c.md"]);
    }
}

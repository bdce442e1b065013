//! Order-preserving traversal and the analysis pass.
//!
//! Traversal is a depth-first walk from the selected entry points that
//! follows links in the order they appear in each document, preferring the
//! regular-link list and falling back to the full outgoing list so embed-only
//! documents still continue the walk. Cycles are handled with an explicit
//! visited set over the arena; nodes are never colored in place, so the graph
//! stays reusable across repeated analyses.

use std::{
    collections::BTreeMap,
    collections::BTreeSet,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use serde::{Deserialize, Serialize};

use crate::{
    error::MnemaError,
    links::{
        entry::select_entry_points,
        graph::{build_graph, NoteGraph, NoteNode},
    },
    paths::{folder_of, in_scope},
    store::ContentStore,
};

/// The output of one analysis pass over a document collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewHierarchy {
    /// Entry documents the traversal started from.
    pub roots: Vec<String>,
    /// Every analyzed document, keyed by path.
    pub nodes: BTreeMap<String, NoteNode>,
    /// The canonical review order. Every entry exists in `nodes`; no
    /// duplicates.
    pub order: Vec<String>,
}

/// Depth-first walk from `root`, following links within the scope boundary
/// (the subtree of the root's containing folder) in recorded order.
fn traverse_from(
    graph: &NoteGraph,
    root: &str,
    visited: &mut BTreeSet<String>,
    order: &mut Vec<String>,
) {
    let scope = folder_of(root).to_string();
    let mut stack = vec![root.to_string()];
    while let Some(path) = stack.pop() {
        if !visited.insert(path.clone()) {
            continue;
        }
        order.push(path.clone());
        let Some(node) = graph.get(&path) else {
            continue;
        };
        let links = if node.regular.is_empty() {
            &node.outgoing
        } else {
            &node.regular
        };
        // Reverse push so the first recorded link is walked first.
        for target in links.iter().rev() {
            if visited.contains(target) || !graph.contains(target) {
                continue;
            }
            if !in_scope(folder_of(target), &scope) {
                tracing::trace!(
                    "Skipping {} -> {}: outside scope boundary '{}'",
                    path,
                    target,
                    scope
                );
                continue;
            }
            stack.push(target.clone());
        }
    }
}

/// Select entry points and derive the canonical review order for `graph`.
///
/// Roots are walked all-roots-first. Documents the walks did not reach are
/// then appended in collection order when they lie inside some root's scope
/// boundary; fallback (non-confident) selections append every remaining
/// document. Only out-of-scope documents under confidently elected roots are
/// dropped, so a linkless collection always yields a complete,
/// duplicate-free order.
pub fn build_hierarchy(graph: NoteGraph) -> ReviewHierarchy {
    let selection = select_entry_points(&graph);
    let mut visited = BTreeSet::new();
    let mut order = Vec::new();
    for root in &selection.roots {
        traverse_from(&graph, root, &mut visited, &mut order);
    }
    for path in graph.paths() {
        if visited.contains(path) {
            continue;
        }
        let in_root_scope = selection
            .roots
            .iter()
            .any(|root| in_scope(folder_of(path), folder_of(root)));
        if !selection.confident || in_root_scope {
            visited.insert(path.clone());
            order.push(path.clone());
        }
    }
    tracing::debug!(
        "Hierarchy: {} roots, {} of {} documents in review order",
        selection.roots.len(),
        order.len(),
        graph.len()
    );
    ReviewHierarchy {
        roots: selection.roots,
        nodes: graph.into_nodes(),
        order,
    }
}

/// One-shot analysis over an injected [`ContentStore`], with supersession:
/// a newer `analyze_collection` call for the same analyzer makes any
/// in-flight result discardable.
pub struct VaultAnalyzer {
    content: Arc<dyn ContentStore>,
    generation: AtomicU64,
}

impl VaultAnalyzer {
    pub fn new(content: Arc<dyn ContentStore>) -> VaultAnalyzer {
        VaultAnalyzer {
            content,
            generation: AtomicU64::new(0),
        }
    }

    /// Analyze every document under `scope`. Returns `Ok(None)` when a newer
    /// analysis request superseded this one while its content reads were in
    /// flight.
    pub async fn analyze_collection(
        &self,
        scope: &str,
        recursive: bool,
    ) -> Result<Option<ReviewHierarchy>, MnemaError> {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let graph = build_graph(self.content.as_ref(), scope, recursive).await?;
        if self.generation.load(Ordering::SeqCst) != my_generation {
            tracing::debug!(
                "Analysis of '{}' superseded by a newer request, discarding",
                scope
            );
            return Ok(None);
        }
        Ok(Some(build_hierarchy(graph)))
    }
}

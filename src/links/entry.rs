//! Entry-point selection for a document collection.
//!
//! Documents that behave as a collection's "home page" make the natural start
//! of a read-through. Candidates are elected per folder grouping through a
//! layered heuristic; when no folder elects one, a global link-count pass and
//! finally a first-document fallback guarantee the traversal is never empty
//! for a non-empty collection.

use crate::{
    links::graph::NoteGraph,
    paths::{file_name, file_stem, folder_of},
};

/// The chosen traversal roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySelection {
    /// Entry documents, one per electing folder. Never empty unless the
    /// collection is empty.
    pub roots: Vec<String>,
    /// True when the roots came from the name heuristics (folder match or
    /// index/main/readme). Fallback roots are not confident; traversal then
    /// appends unreached documents to keep the order complete.
    pub confident: bool,
}

const HOME_STEMS: [&str; 3] = ["index", "main", "readme"];

/// Minimum length for the contained side of a partial name match. A one- or
/// two-letter stem inside a folder label is noise, not a home page.
const MIN_PARTIAL_MATCH_LEN: usize = 3;

fn partial_name_match(stem: &str, folder_label: &str) -> bool {
    let (shorter, longer) = if stem.len() <= folder_label.len() {
        (stem, folder_label)
    } else {
        (folder_label, stem)
    };
    shorter.len() >= MIN_PARTIAL_MATCH_LEN && longer.contains(shorter)
}

/// Pick the entry point(s) for `graph` per the layered heuristic.
pub fn select_entry_points(graph: &NoteGraph) -> EntrySelection {
    if graph.is_empty() {
        return EntrySelection {
            roots: Vec::new(),
            confident: false,
        };
    }

    // Folder groupings in first-appearance order.
    let mut folders: Vec<&str> = Vec::new();
    for path in graph.paths() {
        let folder = folder_of(path);
        if !folders.contains(&folder) {
            folders.push(folder);
        }
    }

    let mut roots = Vec::new();
    for folder in &folders {
        let members: Vec<&String> = graph
            .paths()
            .iter()
            .filter(|p| folder_of(p) == *folder)
            .collect();
        if let Some(winner) = elect_for_folder(*folder, &members) {
            roots.push(winner.clone());
        }
    }
    if !roots.is_empty() {
        return EntrySelection {
            roots,
            confident: true,
        };
    }

    // Global link-count pass, ignoring folder grouping. Only meaningful when
    // somebody actually has regular links.
    let mut best: Option<(&String, usize, usize)> = None;
    for node in graph.iter() {
        let regular = node.regular.len();
        let total = node.outgoing.len();
        let better = match best {
            None => true,
            Some((_, best_regular, best_total)) => {
                regular > best_regular || (regular == best_regular && total > best_total)
            }
        };
        if better {
            best = Some((&node.path, regular, total));
        }
    }
    if let Some((path, regular, _)) = best {
        if regular > 0 {
            return EntrySelection {
                roots: vec![path.clone()],
                confident: false,
            };
        }
    }

    // First document in the collection, by insertion order.
    EntrySelection {
        roots: vec![graph.paths()[0].clone()],
        confident: false,
    }
}

/// The per-folder layers: exact folder-name match, partial folder-name match,
/// then the conventional home-page stems.
fn elect_for_folder(folder: &str, members: &[&String]) -> Option<String> {
    let folder_label = file_name(folder);
    let folder_lower = folder_label.to_lowercase();

    if !folder_lower.is_empty() {
        if let Some(exact) = members
            .iter()
            .find(|p| file_stem(p).eq_ignore_ascii_case(folder_label))
        {
            return Some((*exact).clone());
        }
        if let Some(partial) = members
            .iter()
            .find(|p| partial_name_match(&file_stem(p).to_lowercase(), &folder_lower))
        {
            return Some((*partial).clone());
        }
    }

    members
        .iter()
        .find(|p| {
            let stem = file_stem(p).to_lowercase();
            HOME_STEMS
                .iter()
                .any(|home| stem == *home || stem.contains(home))
        })
        .map(|p| (*p).clone())
}

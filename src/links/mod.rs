//! The link-graph traversal builder.
//!
//! Pipeline: [`extract`] scans raw text for wikilink references, [`resolve`]
//! maps them to known documents, [`graph`] assembles the node arena,
//! [`entry`] picks the traversal roots, and [`traverse`] derives the
//! canonical review order as a [`traverse::ReviewHierarchy`].

pub mod entry;
pub mod extract;
pub mod graph;
pub mod resolve;
pub mod traverse;

pub use entry::{select_entry_points, EntrySelection};
pub use extract::{extract_links, md_options, LinkRef};
pub use graph::{build_graph, NoteGraph, NoteNode};
pub use resolve::resolve_reference;
pub use traverse::{build_hierarchy, ReviewHierarchy, VaultAnalyzer};

//! Reference-to-document resolution.
//!
//! A raw reference either carries an explicit file extension (matched against
//! full paths and path suffixes) or is matched by base name against every
//! known document. Ambiguous matches prefer the referring document's own
//! directory; remaining ties resolve to the first match in the stable
//! known-document order. A reference that matches nothing is unresolved, not
//! an error — callers drop it from the graph.

use crate::paths::{file_name, file_stem, folder_of, normalize_reference, reference_has_extension};

/// Resolve `reference` (as written in the document at `from_path`) against the
/// known document set. Returns `None` when unresolved.
pub fn resolve_reference(
    reference: &str,
    from_path: &str,
    known_paths: &[String],
) -> Option<String> {
    let reference = normalize_reference(reference);
    if reference.is_empty() {
        return None;
    }

    let mut candidates: Vec<&String> = Vec::new();
    if reference_has_extension(&reference) {
        let suffix = format!("/{reference}");
        candidates = known_paths
            .iter()
            .filter(|p| **p == reference || p.ends_with(&suffix))
            .collect();
    }

    // Fall back to base-name matching (extension stripped, case-insensitive)
    // when the explicit-suffix pass found nothing.
    if candidates.is_empty() {
        let stem = file_stem(file_name(&reference)).to_lowercase();
        candidates = known_paths
            .iter()
            .filter(|p| file_stem(p).to_lowercase() == stem)
            .collect();
    }

    match candidates.len() {
        0 => {
            tracing::trace!("Unresolved reference '{}' from {}", reference, from_path);
            None
        }
        1 => Some(candidates[0].clone()),
        _ => {
            let from_folder = folder_of(from_path);
            let same_folder = candidates
                .iter()
                .find(|p| folder_of(p) == from_folder)
                .copied();
            Some(same_folder.unwrap_or(candidates[0]).clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn exact_path_with_extension() {
        let docs = known(&["Topic/Note.md", "Other/Note.md"]);
        assert_eq!(
            resolve_reference("Topic/Note.md", "index.md", &docs),
            Some("Topic/Note.md".to_string())
        );
    }

    #[test]
    fn suffix_match_with_extension() {
        let docs = known(&["deep/nested/Topic/Note.md"]);
        assert_eq!(
            resolve_reference("Topic/Note.md", "index.md", &docs),
            Some("deep/nested/Topic/Note.md".to_string())
        );
    }

    #[test]
    fn extension_miss_falls_back_to_base_name() {
        let docs = known(&["Elsewhere/Note.md"]);
        assert_eq!(
            resolve_reference("Missing/Note.md", "index.md", &docs),
            Some("Elsewhere/Note.md".to_string())
        );
    }

    #[test]
    fn base_name_is_case_insensitive() {
        let docs = known(&["Topic/My Note.md"]);
        assert_eq!(
            resolve_reference("my note", "index.md", &docs),
            Some("Topic/My Note.md".to_string())
        );
    }

    #[test]
    fn ambiguity_prefers_referring_directory() {
        let docs = known(&["Other/Note.md", "Sub/Note.md"]);
        assert_eq!(
            resolve_reference("Sub/Note", "Sub/Source.md", &docs),
            Some("Sub/Note.md".to_string())
        );
    }

    #[test]
    fn ambiguity_without_shared_directory_takes_first() {
        let docs = known(&["A/Note.md", "B/Note.md"]);
        assert_eq!(
            resolve_reference("Note", "C/Source.md", &docs),
            Some("A/Note.md".to_string())
        );
    }

    #[test]
    fn unresolved_reference_is_none() {
        let docs = known(&["A/Note.md"]);
        assert_eq!(resolve_reference("Ghost", "A/Note.md", &docs), None);
        assert_eq!(resolve_reference("  ", "A/Note.md", &docs), None);
    }
}

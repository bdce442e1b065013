//! Collaborator seams for content and schedule access.
//!
//! The navigation engine and the graph builder never touch ambient globals;
//! they take their collaborators as explicit constructor parameters so that
//! multiple instances (and test doubles) can coexist. [`ContentStore`] serves
//! raw document text and directory listings; [`ScheduleStore`] owns the
//! durable due-state and answers a single due query capable of both the
//! "due up to and including now" and "due exactly on a calendar date" modes.

use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::MnemaError,
    paths::{os_path_to_string, string_to_os_path},
};

/// A document currently due for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueItem {
    /// Vault-relative path, the document's identity.
    pub path: String,
    /// The scheduled review timestamp that made this item due.
    pub due: DateTime<Utc>,
}

impl DueItem {
    pub fn new(path: impl Into<String>, due: DateTime<Utc>) -> DueItem {
        DueItem {
            path: path.into(),
            due,
        }
    }
}

/// Which calendar slice of the schedule a queue rebuild should target.
///
/// Modeled as an explicit tagged mode rather than a nullable override field
/// inspected ad hoc at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DueMode {
    /// Everything due up to and including the evaluation instant.
    #[default]
    Default,
    /// Only items scheduled exactly on the given calendar date.
    ExactDate(NaiveDate),
}

impl DueMode {
    /// Lower the mode into the store query it corresponds to, evaluated at
    /// `now`.
    pub fn query_at(&self, now: DateTime<Utc>) -> DueQuery {
        match self {
            DueMode::Default => DueQuery::OnOrBefore(now),
            DueMode::ExactDate(date) => DueQuery::ExactlyOn(*date),
        }
    }
}

/// A single due query: on-or-before an instant, or exactly on a date. One of
/// the two, never a merge of overlapping results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DueQuery {
    OnOrBefore(DateTime<Utc>),
    ExactlyOn(NaiveDate),
}

impl DueQuery {
    /// Whether a scheduled timestamp satisfies this query.
    pub fn matches(&self, due: DateTime<Utc>) -> bool {
        match self {
            DueQuery::OnOrBefore(instant) => due <= *instant,
            DueQuery::ExactlyOn(date) => due.date_naive() == *date,
        }
    }
}

/// Read access to the document collection.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Read a document's raw text. Fails with [`MnemaError::NotFound`] when
    /// the path no longer exists.
    async fn read_document(&self, path: &str) -> Result<String, MnemaError>;

    /// List known document paths under `scope` (vault-relative folder, empty
    /// for the root), in a stable order. `recursive` descends into
    /// subfolders.
    async fn list_documents(&self, scope: &str, recursive: bool)
        -> Result<Vec<String>, MnemaError>;
}

/// Durable review schedule owned by an external spaced-repetition algorithm.
///
/// Mutations update due-state before the navigation engine's corresponding
/// queue transition runs.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// All items satisfying `query`, in the store's natural due-order.
    async fn due_items(&self, query: DueQuery) -> Result<Vec<DueItem>, MnemaError>;

    /// Rough reading time for a document, for session planning.
    async fn estimate_review_duration(&self, path: &str) -> Result<Duration, MnemaError>;

    /// Push a document's next review `days` into the future.
    async fn postpone(&self, path: &str, days: u32) -> Result<(), MnemaError>;

    /// Pull a document's next review earlier. Returns false when the schedule
    /// could not advance it (already at its earliest).
    async fn advance(&self, path: &str) -> Result<bool, MnemaError>;

    /// Reschedule a document for tomorrow without grading it.
    async fn skip_to_tomorrow(&self, path: &str) -> Result<(), MnemaError>;

    /// Drop a document from the schedule entirely.
    async fn remove(&self, path: &str) -> Result<(), MnemaError>;
}

/// [`ContentStore`] over a markdown vault on disk.
///
/// Listings are sorted by file name so the known-document order is stable
/// across rebuilds; dot files and dot directories are ignored.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> FsContentStore {
        FsContentStore { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn read_document(&self, path: &str) -> Result<String, MnemaError> {
        let os_path = self.root.join(string_to_os_path(path));
        tracing::debug!("Reading {:?}", os_path);
        Ok(tokio::fs::read_to_string(os_path).await?)
    }

    async fn list_documents(
        &self,
        scope: &str,
        recursive: bool,
    ) -> Result<Vec<String>, MnemaError> {
        let scope_dir = self.root.join(string_to_os_path(scope));
        let mut walker = walkdir::WalkDir::new(&scope_dir).sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }
        let mut paths = Vec::new();
        // Depth 0 is the walk root itself and may legitimately be dot-named
        // (tempdirs, hidden vaults); the filter only applies below it.
        for entry in walker.into_iter().filter_entry(|e| {
            e.depth() == 0
                || !e
                    .file_name()
                    .to_str()
                    .map(|name| name.starts_with('.'))
                    .unwrap_or(false)
        }) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let is_markdown = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("md"))
                .unwrap_or(false);
            if !is_markdown {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|e| MnemaError::Io(format!("Strip prefix failed for path: {e}")))?;
            paths.push(os_path_to_string(relative));
        }
        tracing::debug!(
            "Listed {} documents under '{}' (recursive: {})",
            paths.len(),
            scope,
            recursive
        );
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn due_query_on_or_before() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let query = DueMode::Default.query_at(now);
        assert!(query.matches(now));
        assert!(query.matches(now - chrono::Duration::days(3)));
        assert!(!query.matches(now + chrono::Duration::seconds(1)));
    }

    #[tokio::test]
    async fn lists_documents_under_hidden_root_directory() {
        let dir = tempfile::Builder::new()
            .prefix(".hidden")
            .tempdir()
            .unwrap();
        std::fs::write(dir.path().join("note.md"), "text\n").unwrap();
        std::fs::create_dir(dir.path().join(".obsidian")).unwrap();
        std::fs::write(dir.path().join(".obsidian").join("skip.md"), "meta\n").unwrap();

        let store = FsContentStore::new(dir.path());
        let listed = store.list_documents("", true).await.unwrap();
        assert_eq!(listed, vec!["note.md"]);
    }

    #[test]
    fn due_query_exact_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();
        let query = DueMode::ExactDate(date).query_at(Utc::now());
        let on_day = Utc.with_ymd_and_hms(2026, 3, 12, 23, 0, 0).unwrap();
        let day_before = Utc.with_ymd_and_hms(2026, 3, 11, 23, 0, 0).unwrap();
        assert!(query.matches(on_day));
        assert!(!query.matches(day_before));
    }
}

//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::{collections::BTreeMap, sync::Mutex, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use mnema_core::{
    config::OrderStore,
    error::MnemaError,
    store::{DueItem, DueQuery, ScheduleStore},
};
use tempfile::TempDir;

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times — subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Write a small linked vault into the temp dir:
///
/// - `Topic/Topic.md` links to Beta, Beta links to Gamma (a chain)
/// - `Topic/Other.md` is unlinked
/// - `alpha.md` at the root has no links
#[allow(dead_code)]
pub fn create_test_vault(temp_dir: &TempDir) -> std::path::PathBuf {
    let root = temp_dir.path().to_path_buf();
    std::fs::create_dir(root.join("Topic")).unwrap();
    std::fs::write(
        root.join("Topic").join("Topic.md"),
        "# Topic\n\nStart with [[Beta]].\n",
    )
    .unwrap();
    std::fs::write(
        root.join("Topic").join("Beta.md"),
        "# Beta\n\nContinue to [[Gamma]].\n",
    )
    .unwrap();
    std::fs::write(root.join("Topic").join("Gamma.md"), "# Gamma\n\nDone.\n").unwrap();
    std::fs::write(root.join("Topic").join("Other.md"), "# Other\n\nUnlinked.\n").unwrap();
    std::fs::write(root.join("alpha.md"), "# Alpha\n\nNo links here.\n").unwrap();
    root
}

/// Deterministic in-memory [`ScheduleStore`] double.
///
/// Natural due-order is insertion order, the way a real store would reflect
/// its stored ordering.
#[allow(dead_code)]
pub struct MemoryScheduleStore {
    items: Mutex<Vec<DueItem>>,
    advance_accepts: bool,
}

#[allow(dead_code)]
impl MemoryScheduleStore {
    pub fn new(items: Vec<DueItem>) -> MemoryScheduleStore {
        MemoryScheduleStore {
            items: Mutex::new(items),
            advance_accepts: true,
        }
    }

    pub fn refusing_advance(items: Vec<DueItem>) -> MemoryScheduleStore {
        MemoryScheduleStore {
            items: Mutex::new(items),
            advance_accepts: false,
        }
    }

    pub fn due_for(&self, path: &str) -> Option<DateTime<Utc>> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.path == path)
            .map(|item| item.due)
    }
}

#[async_trait]
impl ScheduleStore for MemoryScheduleStore {
    async fn due_items(&self, query: DueQuery) -> Result<Vec<DueItem>, MnemaError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| query.matches(item.due))
            .cloned()
            .collect())
    }

    async fn estimate_review_duration(&self, _path: &str) -> Result<Duration, MnemaError> {
        Ok(Duration::from_secs(60))
    }

    async fn postpone(&self, path: &str, days: u32) -> Result<(), MnemaError> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|item| item.path == path)
            .ok_or_else(|| MnemaError::NotFound(path.to_string()))?;
        item.due += ChronoDuration::days(days as i64);
        Ok(())
    }

    async fn advance(&self, path: &str) -> Result<bool, MnemaError> {
        if !self.advance_accepts {
            return Ok(false);
        }
        let mut items = self.items.lock().unwrap();
        items.retain(|item| item.path != path);
        Ok(true)
    }

    async fn skip_to_tomorrow(&self, path: &str) -> Result<(), MnemaError> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|item| item.path == path)
            .ok_or_else(|| MnemaError::NotFound(path.to_string()))?;
        item.due = Utc::now() + ChronoDuration::days(1);
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), MnemaError> {
        self.items.lock().unwrap().retain(|item| item.path != path);
        Ok(())
    }
}

/// In-memory [`OrderStore`] double.
#[allow(dead_code)]
#[derive(Default)]
pub struct MemoryOrderStore {
    order: Mutex<Vec<String>>,
    writes: Mutex<usize>,
}

#[allow(dead_code)]
impl MemoryOrderStore {
    pub fn with_order(order: Vec<String>) -> MemoryOrderStore {
        MemoryOrderStore {
            order: Mutex::new(order),
            writes: Mutex::new(0),
        }
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    pub fn stored(&self) -> Vec<String> {
        self.order.lock().unwrap().clone()
    }
}

impl OrderStore for MemoryOrderStore {
    fn custom_order(&self) -> Result<Vec<String>, MnemaError> {
        Ok(self.order.lock().unwrap().clone())
    }

    fn set_custom_order(&self, order: &[String]) -> Result<(), MnemaError> {
        *self.order.lock().unwrap() = order.to_vec();
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }
}

/// An in-memory map of document text acting as a [`mnema_core::store::ContentStore`].
#[allow(dead_code)]
#[derive(Default)]
pub struct MemoryContentStore {
    docs: BTreeMap<String, String>,
}

#[allow(dead_code)]
impl MemoryContentStore {
    pub fn with_docs(docs: &[(&str, &str)]) -> MemoryContentStore {
        MemoryContentStore {
            docs: docs
                .iter()
                .map(|(path, text)| (path.to_string(), text.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl mnema_core::store::ContentStore for MemoryContentStore {
    async fn read_document(&self, path: &str) -> Result<String, MnemaError> {
        self.docs
            .get(path)
            .cloned()
            .ok_or_else(|| MnemaError::NotFound(path.to_string()))
    }

    async fn list_documents(
        &self,
        scope: &str,
        _recursive: bool,
    ) -> Result<Vec<String>, MnemaError> {
        Ok(self
            .docs
            .keys()
            .filter(|path| mnema_core::paths::in_scope(mnema_core::paths::folder_of(path), scope))
            .cloned()
            .collect())
    }
}

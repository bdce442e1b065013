//! The review queue navigation engine.
//!
//! [`ReviewSession`] owns the live list of due documents, the active index,
//! and the user's custom order, and keeps the three consistent across every
//! mutation. The queue, index, and position map are always recomputed
//! together before any of them is readable again; callers that cross an
//! `await` boundary re-fetch rather than cache them.
//!
//! Collaborators are injected at construction — the schedule store that
//! decides *when* documents become due, the order store that persists the
//! custom order, and the content store the link analyzer reads from — so
//! independent sessions (and test doubles) coexist without interference.

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use chrono::Utc;
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    config::OrderStore,
    error::MnemaError,
    event::QueueEvent,
    links::{ReviewHierarchy, VaultAnalyzer},
    store::{ContentStore, DueItem, DueMode, ScheduleStore},
};

/// Where navigation landed. Empty-queue and wrapped-around conditions are
/// reported outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The active item after the operation.
    Current { index: usize, item: DueItem },
    /// Navigation was attempted with nothing due.
    NothingDue,
    /// A skip wrapped back to the item just skipped; the session is done.
    AllCaughtUp,
}

/// Live navigation state over the due-document queue.
pub struct ReviewSession {
    schedule: Arc<dyn ScheduleStore>,
    order_store: Arc<dyn OrderStore>,
    analyzer: VaultAnalyzer,
    events: Option<UnboundedSender<QueueEvent>>,
    mode: DueMode,
    queue: Vec<DueItem>,
    positions: BTreeMap<String, usize>,
    index: Option<usize>,
    custom_order: Vec<String>,
}

/// Reorder `due` by the custom order, appending items the custom order does
/// not mention in their natural due-order. Duplicate-free.
fn apply_custom_order(due: Vec<DueItem>, custom: &[String]) -> Vec<DueItem> {
    if custom.is_empty() {
        return due;
    }
    let mut queue: Vec<DueItem> = Vec::with_capacity(due.len());
    for path in custom {
        if queue.iter().any(|item| &item.path == path) {
            continue;
        }
        if let Some(item) = due.iter().find(|item| &item.path == path) {
            queue.push(item.clone());
        }
    }
    for item in due {
        if !queue.iter().any(|queued| queued.path == item.path) {
            queue.push(item);
        }
    }
    queue
}

/// Derived path-to-index lookup. Disposable; rebuilt on every queue change.
fn position_map(queue: &[DueItem]) -> BTreeMap<String, usize> {
    queue
        .iter()
        .enumerate()
        .map(|(idx, item)| (item.path.clone(), idx))
        .collect()
}

impl ReviewSession {
    pub fn new(
        schedule: Arc<dyn ScheduleStore>,
        order_store: Arc<dyn OrderStore>,
        content: Arc<dyn ContentStore>,
        events: Option<UnboundedSender<QueueEvent>>,
    ) -> ReviewSession {
        ReviewSession {
            schedule,
            order_store,
            analyzer: VaultAnalyzer::new(content),
            events,
            mode: DueMode::default(),
            queue: Vec::new(),
            positions: BTreeMap::new(),
            index: None,
            custom_order: Vec::new(),
        }
    }

    /// The current queue, in review order.
    pub fn queue(&self) -> &[DueItem] {
        &self.queue
    }

    /// Valid for the current queue length, or `None` when the queue is empty.
    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    pub fn current(&self) -> Option<&DueItem> {
        self.index.and_then(|idx| self.queue.get(idx))
    }

    pub fn current_path(&self) -> Option<String> {
        self.current().map(|item| item.path.clone())
    }

    pub fn position_of(&self, path: &str) -> Option<usize> {
        self.positions.get(path).copied()
    }

    pub fn due_mode(&self) -> DueMode {
        self.mode
    }

    /// Recompute the queue from the schedule store for `mode`.
    ///
    /// With `preserve_index`, the previously active document stays active if
    /// it survived the rebuild; otherwise the index resets to the front (or
    /// to nothing when the queue came back empty).
    pub async fn rebuild(&mut self, mode: DueMode, preserve_index: bool) -> Result<(), MnemaError> {
        self.mode = mode;
        let previous = self.current_path();
        let due = self
            .schedule
            .due_items(mode.query_at(Utc::now()))
            .await?;
        let custom = self.order_store.custom_order()?;
        let queue = apply_custom_order(due, &custom);
        let positions = position_map(&queue);
        let index = if queue.is_empty() {
            None
        } else if preserve_index {
            previous
                .as_ref()
                .and_then(|path| positions.get(path).copied())
                .or(Some(0))
        } else {
            Some(0)
        };

        // Swap all three in together so no reader observes a rebuilt queue
        // against a stale index or position map.
        self.queue = queue;
        self.positions = positions;
        self.custom_order = custom;
        self.index = index;

        self.emit(QueueEvent::QueueRebuilt(self.queue.len()));
        if self.current_path() != previous {
            self.emit_current();
        }
        tracing::debug!(
            "Queue rebuilt: {} items due, index {:?}",
            self.queue.len(),
            self.index
        );
        Ok(())
    }

    /// Rebuild under the session's current mode.
    pub async fn refresh(&mut self, preserve_index: bool) -> Result<(), MnemaError> {
        self.rebuild(self.mode, preserve_index).await
    }

    /// Jump to an explicit queue position. Out-of-bounds requests are
    /// clamped, never left invalid.
    pub fn set_current_index(&mut self, index: usize) {
        if self.queue.is_empty() {
            self.index = None;
            return;
        }
        let clamped = index.min(self.queue.len() - 1);
        if self.index != Some(clamped) {
            self.index = Some(clamped);
            self.emit_current();
        }
    }

    /// Advance to the next due document, wrapping at the end of the queue.
    pub fn navigate_next(&mut self) -> NavOutcome {
        self.navigate(1)
    }

    /// Retreat to the previous due document, wrapping at the front.
    pub fn navigate_previous(&mut self) -> NavOutcome {
        self.navigate(-1)
    }

    fn navigate(&mut self, step: isize) -> NavOutcome {
        let len = self.queue.len();
        if len == 0 {
            self.emit(QueueEvent::NothingDue);
            return NavOutcome::NothingDue;
        }
        let current = self.index.unwrap_or(0).min(len - 1);
        let next = (current as isize + step).rem_euclid(len as isize) as usize;
        if self.index != Some(next) {
            self.index = Some(next);
            self.emit_current();
        }
        NavOutcome::Current {
            index: next,
            item: self.queue[next].clone(),
        }
    }

    /// Exchange two queue entries and persist the result as the new custom
    /// order. A no-op returning false when either path is not queued.
    pub async fn swap(&mut self, path_a: &str, path_b: &str) -> Result<bool, MnemaError> {
        let (Some(pos_a), Some(pos_b)) = (self.position_of(path_a), self.position_of(path_b))
        else {
            tracing::debug!("Swap skipped: '{}' or '{}' not in queue", path_a, path_b);
            return Ok(false);
        };
        let mut order: Vec<String> = self.queue.iter().map(|item| item.path.clone()).collect();
        order.swap(pos_a, pos_b);
        self.persist_custom_order(order)?;
        self.refresh(true).await?;
        Ok(true)
    }

    /// Fix up the queue after `path` left today's due-set (postponed,
    /// advanced, skipped, or deleted).
    ///
    /// If the removed item was active, the item that slides into its slot
    /// becomes active (clamped at the end of the queue). If a different item
    /// was active, it is re-located by path.
    pub fn handle_removed(&mut self, path: &str) -> Result<(), MnemaError> {
        let active_path = self.current_path();
        if self.custom_order.iter().any(|p| p == path) {
            let order: Vec<String> = self
                .custom_order
                .iter()
                .filter(|p| *p != path)
                .cloned()
                .collect();
            self.persist_custom_order(order)?;
        }
        let Some(removed_pos) = self.position_of(path) else {
            return Ok(());
        };

        let mut queue = self.queue.clone();
        queue.remove(removed_pos);
        let positions = position_map(&queue);
        let index = if queue.is_empty() {
            None
        } else if active_path.as_deref() == Some(path) {
            Some(removed_pos.min(queue.len() - 1))
        } else {
            active_path
                .as_ref()
                .and_then(|p| positions.get(p).copied())
                .or_else(|| self.index.map(|idx| idx.min(queue.len() - 1)))
                .or(Some(0))
        };

        self.queue = queue;
        self.positions = positions;
        let changed = self.index != index || active_path.as_deref() == Some(path);
        self.index = index;
        if changed {
            self.emit_current();
        }
        Ok(())
    }

    /// Reschedule `path` for tomorrow and move on. Reports "all caught up"
    /// instead of looping back to the skipped document when nothing else is
    /// due.
    pub async fn skip_to_next(&mut self, path: &str) -> Result<NavOutcome, MnemaError> {
        self.schedule.skip_to_tomorrow(path).await?;
        self.refresh(true).await?;
        if self.queue.is_empty()
            || (self.queue.len() == 1 && self.queue[0].path == path)
        {
            self.emit(QueueEvent::AllCaughtUp);
            return Ok(NavOutcome::AllCaughtUp);
        }
        if self.current_path().as_deref() == Some(path) {
            return Ok(self.navigate_next());
        }
        // The rebuild already advanced us off the skipped document.
        let index = self.index.unwrap_or(0);
        Ok(NavOutcome::Current {
            index,
            item: self.queue[index].clone(),
        })
    }

    /// Push `path`'s next review `days` into the future and drop it from
    /// today's queue.
    pub async fn postpone(&mut self, path: &str, days: u32) -> Result<(), MnemaError> {
        self.schedule.postpone(path, days).await?;
        self.handle_removed(path)
    }

    /// Pull `path`'s next review earlier. When the schedule accepts, the item
    /// leaves today's queue.
    pub async fn advance(&mut self, path: &str) -> Result<bool, MnemaError> {
        let advanced = self.schedule.advance(path).await?;
        if advanced {
            self.handle_removed(path)?;
        }
        Ok(advanced)
    }

    /// Remove `path` from the schedule entirely and from today's queue.
    pub async fn remove(&mut self, path: &str) -> Result<(), MnemaError> {
        self.schedule.remove(path).await?;
        self.handle_removed(path)
    }

    /// Summed review-duration estimate for everything still queued.
    pub async fn estimated_remaining(&self) -> Result<Duration, MnemaError> {
        let mut total = Duration::ZERO;
        for item in &self.queue {
            total += self.schedule.estimate_review_duration(&item.path).await?;
        }
        Ok(total)
    }

    /// Analyze the link structure under `scope` and derive its canonical
    /// review order. `Ok(None)` when superseded by a newer analysis request.
    pub async fn analyze_collection(
        &self,
        scope: &str,
        recursive: bool,
    ) -> Result<Option<ReviewHierarchy>, MnemaError> {
        self.analyzer.analyze_collection(scope, recursive).await
    }

    fn persist_custom_order(&mut self, order: Vec<String>) -> Result<(), MnemaError> {
        self.order_store.set_custom_order(&order)?;
        self.emit(QueueEvent::OrderPersisted(order.len()));
        self.custom_order = order;
        Ok(())
    }

    fn emit_current(&self) {
        if let (Some(index), Some(item)) = (self.index, self.current()) {
            self.emit(QueueEvent::CurrentChanged(index, item.path.clone()));
        }
    }

    fn emit(&self, event: QueueEvent) {
        if let Some(tx) = &self.events {
            if tx.send(event.clone()).is_err() {
                tracing::debug!("Queue event receiver dropped, skipping {}", event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_log::test;

    fn item(path: &str) -> DueItem {
        let due = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        DueItem::new(path, due)
    }

    #[test]
    fn custom_order_takes_precedence_then_appends() {
        let due = vec![item("A.md"), item("B.md"), item("C.md")];
        let custom = vec!["C.md".to_string(), "A.md".to_string()];
        let queue = apply_custom_order(due, &custom);
        let paths: Vec<&str> = queue.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["C.md", "A.md", "B.md"]);
    }

    #[test]
    fn custom_order_ignores_departed_items() {
        let due = vec![item("A.md")];
        let custom = vec!["Gone.md".to_string(), "A.md".to_string()];
        let queue = apply_custom_order(due, &custom);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].path, "A.md");
    }

    #[test]
    fn empty_custom_order_is_due_order() {
        let due = vec![item("B.md"), item("A.md")];
        let queue = apply_custom_order(due.clone(), &[]);
        assert_eq!(queue, due);
    }

    #[test]
    fn position_map_mirrors_queue() {
        let queue = vec![item("C.md"), item("A.md")];
        let positions = position_map(&queue);
        assert_eq!(positions.get("C.md"), Some(&0));
        assert_eq!(positions.get("A.md"), Some(&1));
        assert_eq!(positions.len(), queue.len());
    }
}

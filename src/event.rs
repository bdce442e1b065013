use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Notifications emitted by the navigation engine whenever an observable part
/// of the session changes, so a UI layer can mirror the current document and
/// queue without polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueEvent {
    /// The queue was recomputed. Carries the new length.
    QueueRebuilt(usize),
    /// The active item changed. Carries the new index and path.
    CurrentChanged(usize, String),
    /// A new custom order was written to durable storage. Carries its length.
    OrderPersisted(usize),
    /// Navigation was attempted with nothing due. Informational, not an error.
    NothingDue,
    /// A skip wrapped around to the item just skipped; the session is done.
    AllCaughtUp,
}

impl Display for QueueEvent {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            QueueEvent::QueueRebuilt(len) => write!(f, "QueueRebuilt({len})"),
            QueueEvent::CurrentChanged(index, path) => {
                write!(f, "CurrentChanged({index}, {path})")
            }
            QueueEvent::OrderPersisted(len) => write!(f, "OrderPersisted({len})"),
            QueueEvent::NothingDue => write!(f, "NothingDue"),
            QueueEvent::AllCaughtUp => write!(f, "AllCaughtUp"),
        }
    }
}

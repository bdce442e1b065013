//! # mnema-core
//!
//! A Rust library for scheduling and sequencing review of interlinked
//! markdown documents. The name comes from the Greek *mnēmē* — memory.
//!
//! ## Overview
//!
//! mnema-core covers two coupled subsystems:
//!
//! - **Link-graph traversal** ([`links`]): parse wikilink cross-references,
//!   build a directed graph over a document collection, pick an entry point
//!   by heuristic, and derive a deterministic, order-preserving depth-first
//!   review order scoped to a folder boundary.
//! - **Queue navigation** ([`queue`]): maintain the ordered queue of
//!   documents currently due, with circular navigation, user reordering, and
//!   mutation operations (postpone, advance, skip, remove) that each
//!   re-derive a consistent queue and index without losing the user's place.
//!
//! The spaced-repetition interval math, persistent storage formats, and all
//! rendering live behind the [`store`] collaborator traits; the engine takes
//! them as explicit constructor parameters so multiple instances coexist.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mnema_core::{
//!     config::TomlOrderStore,
//!     queue::ReviewSession,
//!     store::{DueMode, FsContentStore},
//! };
//! # use mnema_core::{error::MnemaError, store::{DueItem, DueQuery, ScheduleStore}};
//! # use std::time::Duration;
//! # struct MySchedule;
//! # #[async_trait::async_trait]
//! # impl ScheduleStore for MySchedule {
//! #     async fn due_items(&self, _: DueQuery) -> Result<Vec<DueItem>, MnemaError> { Ok(vec![]) }
//! #     async fn estimate_review_duration(&self, _: &str) -> Result<Duration, MnemaError> { Ok(Duration::ZERO) }
//! #     async fn postpone(&self, _: &str, _: u32) -> Result<(), MnemaError> { Ok(()) }
//! #     async fn advance(&self, _: &str) -> Result<bool, MnemaError> { Ok(false) }
//! #     async fn skip_to_tomorrow(&self, _: &str) -> Result<(), MnemaError> { Ok(()) }
//! #     async fn remove(&self, _: &str) -> Result<(), MnemaError> { Ok(()) }
//! # }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schedule = Arc::new(MySchedule);
//!     let order = Arc::new(TomlOrderStore::new("./order.toml"));
//!     let content = Arc::new(FsContentStore::new("./vault"));
//!
//!     let mut session = ReviewSession::new(schedule, order, content.clone(), None);
//!     session.rebuild(DueMode::Default, false).await?;
//!
//!     // Walk today's queue.
//!     while let Some(item) = session.current() {
//!         println!("review: {}", item.path);
//!         session.navigate_next();
//!         break;
//!     }
//!
//!     // Derive the canonical read-through order for a folder.
//!     if let Some(hierarchy) = session.analyze_collection("Topic", true).await? {
//!         for path in &hierarchy.order {
//!             println!("then: {path}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Guide
//!
//! Start with [`queue::ReviewSession`] for the live session, then
//! [`links::VaultAnalyzer`] for one-shot collection analysis. [`store`]
//! defines the collaborator seams; [`event`] is the notification surface a
//! UI subscribes to.

pub mod config;
pub mod error;
pub mod event;
pub mod links;
pub mod paths;
pub mod queue;
pub mod store;

pub use error::*;

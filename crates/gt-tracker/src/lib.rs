//! # gt-tracker
//!
//! Goal store, persistence codec, and refresh orchestration.
//!
//! [`GoalTracker`] is the one stateful component: it owns the ordered goal
//! list and a kind index, drives periodic progress refreshes from host
//! callbacks (tick, stat changed, session connected), and persists the
//! whole collection as a single JSON blob after every mutation.
//!
//! ## Key components
//!
//! - [`GoalTracker`] — the orchestrator (add / remove / acknowledge / refresh)
//! - [`codec`] — goal list ↔ JSON blob, discriminator-dispatched
//! - [`GoalStorage`] — whole-blob load/store seam ([`FileStorage`],
//!   [`MemoryStorage`])
//! - [`TrackerEvent`] — change events for the rendering layer
//! - [`TrackerConfig`] — cadence and presentation options

pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod storage;
pub mod tracker;

pub use config::TrackerConfig;
pub use error::TrackerError;
pub use events::{EventDispatcher, LogSink, NotificationSink, TrackerEvent};
pub use storage::{FileStorage, GoalStorage, MemoryStorage};
pub use tracker::GoalTracker;

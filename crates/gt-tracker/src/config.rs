// config.rs — Tracker options.

use serde::{Deserialize, Serialize};

/// Options the host's config panel exposes.
///
/// `update_interval_ticks` bounds how much work the periodic tick does;
/// `notify_on_completion` gates completion events; the rest are
/// presentation hints carried for the panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Run a full refresh every Nth game tick.
    pub update_interval_ticks: u32,

    /// Dispatch a GoalCompleted event when a goal crosses its target.
    pub notify_on_completion: bool,

    /// Show completed goals in the tracker panel.
    pub show_completed: bool,

    /// Hide kind sections with no goals.
    pub auto_hide_empty: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            update_interval_ticks: 5,
            notify_on_completion: true,
            show_completed: true,
            auto_hide_empty: false,
        }
    }
}

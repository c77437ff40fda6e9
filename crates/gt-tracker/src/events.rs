// events.rs — Change events and notification dispatch.
//
// The tracker emits an event after every observable change so the
// rendering layer can refresh without the core depending on any UI
// framework. Sinks observe; they cannot veto or reorder anything.
// Dispatch is synchronous on the host's event thread — the host defers
// the actual repaint onto its own queue.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gt_goal::{Goal, GoalKind};

use crate::error::TrackerError;

/// Events emitted by the tracker at change points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum TrackerEvent {
    /// A goal was added to the store.
    GoalAdded {
        goal_id: Uuid,
        name: String,
        kind: GoalKind,
        timestamp: DateTime<Utc>,
    },

    /// A goal was removed from the store.
    GoalRemoved {
        goal_id: Uuid,
        name: String,
        timestamp: DateTime<Utc>,
    },

    /// A goal crossed its target for the first time.
    GoalCompleted {
        goal_id: Uuid,
        name: String,
        progress: String,
        timestamp: DateTime<Utc>,
    },

    /// The user acknowledged a completed goal.
    GoalAcknowledged {
        goal_id: Uuid,
        name: String,
        timestamp: DateTime<Utc>,
    },

    /// A refresh pass ran over the store (full or targeted).
    GoalsRefreshed {
        refreshed: usize,
        timestamp: DateTime<Utc>,
    },
}

impl TrackerEvent {
    /// The event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            TrackerEvent::GoalAdded { .. } => "goal_added",
            TrackerEvent::GoalRemoved { .. } => "goal_removed",
            TrackerEvent::GoalCompleted { .. } => "goal_completed",
            TrackerEvent::GoalAcknowledged { .. } => "goal_acknowledged",
            TrackerEvent::GoalsRefreshed { .. } => "goals_refreshed",
        }
    }

    pub fn goal_added(goal: &Goal) -> Self {
        TrackerEvent::GoalAdded {
            goal_id: goal.id,
            name: goal.name.clone(),
            kind: goal.kind(),
            timestamp: Utc::now(),
        }
    }

    pub fn goal_removed(goal: &Goal) -> Self {
        TrackerEvent::GoalRemoved {
            goal_id: goal.id,
            name: goal.name.clone(),
            timestamp: Utc::now(),
        }
    }

    pub fn goal_completed(goal: &Goal) -> Self {
        TrackerEvent::GoalCompleted {
            goal_id: goal.id,
            name: goal.name.clone(),
            progress: goal.formatted_progress(),
            timestamp: Utc::now(),
        }
    }

    pub fn goal_acknowledged(goal: &Goal) -> Self {
        TrackerEvent::GoalAcknowledged {
            goal_id: goal.id,
            name: goal.name.clone(),
            timestamp: Utc::now(),
        }
    }

    pub fn goals_refreshed(refreshed: usize) -> Self {
        TrackerEvent::GoalsRefreshed {
            refreshed,
            timestamp: Utc::now(),
        }
    }
}

/// Trait for receiving tracker events.
///
/// Implementations decide what to do with each event: repaint a panel,
/// fire a host notification, append to a log. Errors are logged but never
/// stop the tracker or other sinks.
pub trait NotificationSink {
    fn send(&self, event: &TrackerEvent) -> Result<(), TrackerError>;
}

/// Logs events as JSONL to a file.
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &TrackerEvent) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| TrackerError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| TrackerError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| TrackerError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Dispatches events to multiple sinks.
///
/// A failing sink is logged (via tracing) and never prevents the others
/// from receiving the event.
#[derive(Default)]
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    pub fn dispatch(&self, event: &TrackerEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!("notification sink error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_goal::{GoalVariant, Skill, SkillGoal, SkillGoalType};
    use tempfile::tempdir;

    fn sample_goal() -> Goal {
        Goal::new(
            "99 Magic",
            "",
            "",
            99,
            GoalVariant::Skill(SkillGoal {
                skill: Skill::Magic,
                goal_type: SkillGoalType::Level,
            }),
        )
    }

    #[test]
    fn event_serialization_round_trip() {
        let event = TrackerEvent::goal_added(&sample_goal());
        let json = serde_json::to_string(&event).unwrap();
        let restored: TrackerEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event.event_type(), restored.event_type());
        assert!(json.contains("\"goal_added\""));
    }

    #[test]
    fn log_sink_appends_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let sink = LogSink::new(&path);

        sink.send(&TrackerEvent::goal_added(&sample_goal())).unwrap();
        sink.send(&TrackerEvent::goals_refreshed(3)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn dispatcher_sends_to_all_sinks() {
        let dir = tempdir().unwrap();
        let path1 = dir.path().join("sink1.jsonl");
        let path2 = dir.path().join("sink2.jsonl");

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(LogSink::new(&path1)));
        dispatcher.add_sink(Box::new(LogSink::new(&path2)));

        dispatcher.dispatch(&TrackerEvent::goal_completed(&sample_goal()));

        assert!(fs::read_to_string(&path1).unwrap().contains("goal_completed"));
        assert!(fs::read_to_string(&path2).unwrap().contains("goal_completed"));
    }

    #[test]
    fn event_type_names() {
        let goal = sample_goal();
        assert_eq!(TrackerEvent::goal_added(&goal).event_type(), "goal_added");
        assert_eq!(
            TrackerEvent::goal_acknowledged(&goal).event_type(),
            "goal_acknowledged"
        );
        assert_eq!(
            TrackerEvent::goals_refreshed(0).event_type(),
            "goals_refreshed"
        );
    }
}

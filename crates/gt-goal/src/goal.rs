// goal.rs — The shared goal record and its completion state machine.
//
// Every goal, regardless of kind, carries the same base fields; the
// kind-specific payload is the flattened GoalVariant. The state machine
// is deliberately tiny:
//
//   InProgress → Completed   (one way, on reaching the target)
//
// Paused is declared for blob compatibility but nothing ever drives a
// transition into or out of it. Completed is terminal for the status; the
// only further mutation a completed goal accepts is acknowledgement.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::source::DataSource;
use crate::variants::GoalVariant;

/// Lifecycle status of a goal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    InProgress,
    Completed,
    /// Declared but never entered — no transition drives it.
    Paused,
}

/// The six goal kinds the creation form offers.
///
/// Only Skill, Item, and Combat have payloads and evaluation rules;
/// the other three are rejected at creation with
/// [`GoalError::UnimplementedKind`](crate::GoalError::UnimplementedKind).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalKind {
    Skill,
    Item,
    Combat,
    Quest,
    Achievement,
    Other,
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalKind::Skill => write!(f, "SKILL"),
            GoalKind::Item => write!(f, "ITEM"),
            GoalKind::Combat => write!(f, "COMBAT"),
            GoalKind::Quest => write!(f, "QUEST"),
            GoalKind::Achievement => write!(f, "ACHIEVEMENT"),
            GoalKind::Other => write!(f, "OTHER"),
        }
    }
}

/// A user-defined target with a measurable progress value.
///
/// Serializes as one flat JSON object: these fields plus the variant's
/// fields plus the `"type"` discriminator, which is what the persisted
/// blob stores per goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Unique identifier — the equality/removal key.
    pub id: Uuid,

    /// Display name. Non-empty; enforced by the creation form.
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    pub status: GoalStatus,

    pub created_at: DateTime<Utc>,

    /// Stamped on the transition to Completed; never cleared afterward,
    /// even if progress later regresses below the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    pub current_progress: i64,

    /// Positive; enforced by the creation form, immutable afterward.
    pub target_value: i64,

    /// Set only by explicit user acknowledgement after completion.
    #[serde(default)]
    pub acknowledged: bool,

    /// Kind-specific payload, flattened into the same JSON object.
    #[serde(flatten)]
    pub variant: GoalVariant,
}

impl Goal {
    /// Create a new goal in progress, with a fresh id and zero progress.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        target_value: i64,
        variant: GoalVariant,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            category: category.into(),
            status: GoalStatus::InProgress,
            created_at: Utc::now(),
            completed_at: None,
            current_progress: 0,
            target_value,
            acknowledged: false,
            variant,
        }
    }

    pub fn kind(&self) -> GoalKind {
        self.variant.kind()
    }

    pub fn is_completed(&self) -> bool {
        self.status == GoalStatus::Completed
    }

    /// Pull a fresh reading from the data source and run the completion
    /// check. Returns immediately when the source is not ready, so a
    /// disconnect can never zero out stored progress. Idempotent for
    /// identical readings.
    pub fn update_progress(&mut self, source: &dyn DataSource) {
        if !source.is_ready() {
            return;
        }

        if let Some(value) = self.variant.read(self.target_value, source) {
            self.current_progress = value;
        }

        self.check_completion();
    }

    /// Mark the goal completed the first time the target is reached.
    /// Does nothing once completed, so the timestamp is never overwritten.
    fn check_completion(&mut self) {
        if self.current_progress >= self.target_value && self.status != GoalStatus::Completed {
            self.status = GoalStatus::Completed;
            self.completed_at = Some(Utc::now());
        }
    }

    /// Acknowledge a completed goal. Rejected (returns false, no change)
    /// while the goal is still in progress.
    pub fn acknowledge(&mut self) -> bool {
        if !self.is_completed() {
            tracing::debug!(goal_id = %self.id, "ignoring acknowledgement of incomplete goal");
            return false;
        }
        self.acknowledged = true;
        true
    }

    /// Progress as a whole percentage, clamped to 0–100.
    /// A zero target reads as 0% (divide-by-zero guard; the form rejects
    /// zero targets, but loaded blobs are not trusted that far).
    pub fn progress_percentage(&self) -> u8 {
        if self.target_value == 0 {
            return 0;
        }
        (self.current_progress * 100 / self.target_value).clamp(0, 100) as u8
    }

    /// Human-readable progress string, e.g. `Level 92/99` or `70/120 killed`.
    pub fn formatted_progress(&self) -> String {
        self.variant
            .format(self.current_progress, self.target_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Skill, StaticSource};
    use crate::variants::{ItemGoal, ItemGoalType, SkillGoal, SkillGoalType};

    fn level_goal(target: i64) -> Goal {
        Goal::new(
            "99 Attack",
            "Max melee",
            "Combat",
            target,
            GoalVariant::Skill(SkillGoal {
                skill: Skill::Attack,
                goal_type: SkillGoalType::Level,
            }),
        )
    }

    #[test]
    fn new_goal_starts_in_progress_with_zero_progress() {
        let goal = level_goal(99);
        assert_eq!(goal.status, GoalStatus::InProgress);
        assert_eq!(goal.current_progress, 0);
        assert!(!goal.acknowledged);
        assert!(goal.completed_at.is_none());
        assert_eq!(goal.kind(), GoalKind::Skill);
    }

    #[test]
    fn fresh_goals_get_unique_ids() {
        assert_ne!(level_goal(99).id, level_goal(99).id);
    }

    #[test]
    fn update_against_unready_source_is_a_no_op() {
        let mut goal = level_goal(99);
        goal.current_progress = 42;
        goal.update_progress(&StaticSource::offline());
        assert_eq!(goal.current_progress, 42);
        assert_eq!(goal.status, GoalStatus::InProgress);
    }

    #[test]
    fn update_writes_reading_and_completes_at_target() {
        let mut goal = level_goal(50);
        let source =
            StaticSource::new().with_xp(Skill::Attack, crate::experience::xp_for_level(50));

        goal.update_progress(&source);
        assert_eq!(goal.current_progress, 50);
        assert!(goal.is_completed());
        assert!(goal.completed_at.is_some());
    }

    #[test]
    fn completion_timestamp_is_never_overwritten() {
        let mut goal = level_goal(50);
        let source =
            StaticSource::new().with_xp(Skill::Attack, crate::experience::xp_for_level(60));

        goal.update_progress(&source);
        let stamped = goal.completed_at;
        assert!(stamped.is_some());

        goal.update_progress(&source);
        goal.update_progress(&source);
        assert_eq!(goal.completed_at, stamped);
    }

    #[test]
    fn completion_is_one_way_even_if_progress_regresses() {
        let mut goal = Goal::new(
            "Full coins",
            "",
            "",
            1_000,
            GoalVariant::Item(ItemGoal {
                item_id: 995,
                goal_type: ItemGoalType::Inventory,
            }),
        );

        let rich = StaticSource::new()
            .with_container(crate::source::Container::Inventory, vec![(995, 1_500)]);
        goal.update_progress(&rich);
        assert!(goal.is_completed());
        let stamped = goal.completed_at;

        // Coins spent: progress regresses, status and timestamp stay.
        let poor = StaticSource::new()
            .with_container(crate::source::Container::Inventory, vec![(995, 10)]);
        goal.update_progress(&poor);
        assert_eq!(goal.current_progress, 10);
        assert!(goal.is_completed());
        assert_eq!(goal.completed_at, stamped);
    }

    #[test]
    fn level_92_of_99_reads_92_percent() {
        let mut goal = level_goal(99);
        let source =
            StaticSource::new().with_xp(Skill::Attack, crate::experience::xp_for_level(92));

        goal.update_progress(&source);
        assert_eq!(goal.progress_percentage(), 92);
        assert_eq!(goal.formatted_progress(), "Level 92/99");
    }

    #[test]
    fn percentage_is_clamped_to_100() {
        let mut goal = level_goal(10);
        goal.current_progress = 25;
        assert_eq!(goal.progress_percentage(), 100);
    }

    #[test]
    fn percentage_of_zero_target_is_zero() {
        let mut goal = level_goal(99);
        goal.target_value = 0;
        goal.current_progress = 5;
        assert_eq!(goal.progress_percentage(), 0);
    }

    #[test]
    fn negative_progress_reads_zero_percent() {
        let mut goal = level_goal(99);
        goal.current_progress = -5;
        assert_eq!(goal.progress_percentage(), 0);
    }

    #[test]
    fn acknowledge_requires_completion() {
        let mut goal = level_goal(99);
        assert!(!goal.acknowledge());
        assert!(!goal.acknowledged);

        goal.update_progress(&StaticSource::new().with_xp(Skill::Attack, 13_034_431));
        assert!(goal.is_completed());
        assert!(goal.acknowledge());
        assert!(goal.acknowledged);
    }

    #[test]
    fn goal_serializes_flat_with_type_discriminator() {
        let goal = level_goal(99);
        let json = serde_json::to_value(&goal).unwrap();
        assert_eq!(json["type"], "SKILL");
        assert_eq!(json["skill"], "ATTACK");
        assert_eq!(json["goal_type"], "LEVEL");
        assert_eq!(json["status"], "IN_PROGRESS");
        // Flat object: variant fields sit next to the base fields.
        assert!(json.get("variant").is_none());
        assert!(json.get("completed_at").is_none());
    }

    #[test]
    fn serialization_round_trip() {
        let mut goal = level_goal(99);
        goal.current_progress = 92;
        let json = serde_json::to_string(&goal).unwrap();
        let restored: Goal = serde_json::from_str(&json).unwrap();
        assert_eq!(goal, restored);
    }
}

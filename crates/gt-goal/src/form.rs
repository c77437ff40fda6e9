// form.rs — Creation-form validation.
//
// Mirrors the add-goal dialog's contract: free-text fields arrive as raw
// strings and are validated here, so the dialog itself stays a dumb shell.
// A rejected form never constructs a goal and never touches the store.

use crate::error::GoalError;
use crate::goal::{Goal, GoalKind};
use crate::source::Skill;
use crate::variants::{
    CombatGoal, CombatGoalType, GoalVariant, ItemGoal, ItemGoalType, SkillGoal, SkillGoalType,
};

/// Raw input from the add-goal dialog.
///
/// Text fields are kept as entered; `build` trims and parses them.
/// Selection fields are `Option` because the dialog only shows the ones
/// relevant to the chosen kind.
#[derive(Debug, Clone, Default)]
pub struct GoalForm {
    pub kind: Option<GoalKind>,
    pub name: String,
    pub description: String,
    pub category: String,
    pub target_value: String,

    // Skill goals.
    pub skill: Option<Skill>,
    pub skill_goal_type: Option<SkillGoalType>,

    // Item goals.
    pub item_id: String,
    pub item_goal_type: Option<ItemGoalType>,

    // Combat goals.
    pub npc_name: String,
    pub npc_id: String,
    pub combat_goal_type: Option<CombatGoalType>,
}

impl GoalForm {
    /// Validate the form and construct the goal.
    ///
    /// Zero, negative, and non-numeric target values are all the same
    /// [`GoalError::InvalidTarget`] — the dialog shows one message for
    /// the three.
    pub fn build(&self) -> Result<Goal, GoalError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(GoalError::MissingName);
        }

        let target_value: i64 = self
            .target_value
            .trim()
            .parse()
            .map_err(|_| GoalError::InvalidTarget)?;
        if target_value <= 0 {
            return Err(GoalError::InvalidTarget);
        }

        let kind = self.kind.ok_or(GoalError::MissingField("goal kind"))?;
        let variant = match kind {
            GoalKind::Skill => {
                let skill = self.skill.ok_or(GoalError::MissingField("skill"))?;
                let goal_type = self
                    .skill_goal_type
                    .ok_or(GoalError::MissingField("skill goal type"))?;
                GoalVariant::Skill(SkillGoal { skill, goal_type })
            }
            GoalKind::Item => {
                let raw = self.item_id.trim();
                if raw.is_empty() {
                    return Err(GoalError::MissingField("item ID"));
                }
                let item_id = raw.parse().map_err(|_| GoalError::InvalidNumber("item ID"))?;
                let goal_type = self
                    .item_goal_type
                    .ok_or(GoalError::MissingField("item goal type"))?;
                GoalVariant::Item(ItemGoal { item_id, goal_type })
            }
            GoalKind::Combat => {
                let npc_name = self.npc_name.trim();
                if npc_name.is_empty() {
                    return Err(GoalError::MissingField("NPC name"));
                }
                let raw = self.npc_id.trim();
                let npc_id = if raw.is_empty() {
                    0
                } else {
                    raw.parse().map_err(|_| GoalError::InvalidNumber("NPC ID"))?
                };
                let goal_type = self
                    .combat_goal_type
                    .ok_or(GoalError::MissingField("combat goal type"))?;
                GoalVariant::Combat(CombatGoal {
                    npc_name: npc_name.to_string(),
                    npc_id,
                    goal_type,
                    initial_kill_count: -1,
                })
            }
            GoalKind::Quest | GoalKind::Achievement | GoalKind::Other => {
                return Err(GoalError::UnimplementedKind(kind));
            }
        };

        Ok(Goal::new(
            name,
            self.description.trim(),
            self.category.trim(),
            target_value,
            variant,
        ))
    }
}

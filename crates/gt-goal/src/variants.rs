// variants.rs — The three implemented goal kinds as one tagged union.
//
// The serialized `type` field is the discriminator; dispatch is an
// exhaustive match on the same enum, so the tag and the behavior cannot
// go out of sync. Each variant knows two things: how to read its progress
// quantity from the data source, and how to render a progress string.

use serde::{Deserialize, Serialize};

use crate::experience;
use crate::goal::GoalKind;
use crate::source::{Container, DataSource, Skill};

/// Kind-specific payload of a goal.
///
/// Serializes with a `"type"` tag carrying the kind's textual name, and
/// the payload fields flattened alongside the shared goal fields — one
/// flat JSON object per goal in the persisted blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalVariant {
    Skill(SkillGoal),
    Item(ItemGoal),
    Combat(CombatGoal),
}

impl GoalVariant {
    pub fn kind(&self) -> GoalKind {
        match self {
            GoalVariant::Skill(_) => GoalKind::Skill,
            GoalVariant::Item(_) => GoalKind::Item,
            GoalVariant::Combat(_) => GoalKind::Combat,
        }
    }

    /// Read the current progress quantity from the data source.
    ///
    /// `None` means "no reading available" — the caller leaves the stored
    /// progress untouched. Mutable because the slayer variant seeds its
    /// baseline on first observation.
    pub(crate) fn read(&mut self, target_value: i64, source: &dyn DataSource) -> Option<i64> {
        match self {
            GoalVariant::Skill(goal) => goal.read(source),
            GoalVariant::Item(goal) => Some(goal.read(source)),
            GoalVariant::Combat(goal) => goal.read(target_value, source),
        }
    }

    pub(crate) fn format(&self, current: i64, target: i64) -> String {
        match self {
            GoalVariant::Skill(goal) => goal.format(current, target),
            GoalVariant::Item(_) => format!("{}/{}", current, target),
            GoalVariant::Combat(goal) => goal.format(current, target),
        }
    }
}

/// What a skill goal measures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillGoalType {
    /// Real (unboosted) level, 1–99.
    Level,
    /// Raw experience points.
    Experience,
    /// Level derived from XP through the experience table, past 99.
    VirtualLevel,
}

/// Track a skill to a target level or XP amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillGoal {
    pub skill: Skill,
    pub goal_type: SkillGoalType,
}

impl SkillGoal {
    fn read(&self, source: &dyn DataSource) -> Option<i64> {
        match self.goal_type {
            SkillGoalType::Level => source.skill_level(self.skill),
            SkillGoalType::Experience => source.skill_xp(self.skill),
            SkillGoalType::VirtualLevel => {
                source.skill_xp(self.skill).map(experience::level_for_xp)
            }
        }
    }

    fn format(&self, current: i64, target: i64) -> String {
        match self.goal_type {
            SkillGoalType::Level | SkillGoalType::VirtualLevel => {
                format!("Level {}/{}", current, target)
            }
            SkillGoalType::Experience => format!("{}/{} XP", current, target),
        }
    }
}

/// Which container(s) an item goal counts across.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemGoalType {
    Inventory,
    Bank,
    Equipment,
    /// Inventory + bank + equipment summed.
    All,
}

/// Collect a quantity of one item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemGoal {
    pub item_id: i64,
    pub goal_type: ItemGoalType,
}

impl ItemGoal {
    // An unavailable container contributes 0, never an error.
    fn read(&self, source: &dyn DataSource) -> i64 {
        let count = |container| source.item_count(container, self.item_id).unwrap_or(0);
        match self.goal_type {
            ItemGoalType::Inventory => count(Container::Inventory),
            ItemGoalType::Bank => count(Container::Bank),
            ItemGoalType::Equipment => count(Container::Equipment),
            ItemGoalType::All => {
                count(Container::Inventory) + count(Container::Bank) + count(Container::Equipment)
            }
        }
    }
}

/// What a combat goal counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatGoalType {
    SlayerTask,
    BossKills,
    MonsterKills,
}

/// Track kills of a named NPC.
///
/// Only [`CombatGoalType::SlayerTask`] has a live signal: the client
/// exposes the remaining-kill counter of the active task, and progress is
/// inferred against a baseline seeded on first observation. Boss and
/// monster kill counts have no reliable source reading and are declared
/// but not tracked — a known limitation carried over deliberately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombatGoal {
    pub npc_name: String,
    #[serde(default)]
    pub npc_id: i64,
    pub goal_type: CombatGoalType,
    /// Baseline for the slayer counter; -1 until the first observation.
    #[serde(default = "unset_baseline")]
    pub initial_kill_count: i64,
}

fn unset_baseline() -> i64 {
    -1
}

impl CombatGoal {
    fn read(&mut self, target_value: i64, source: &dyn DataSource) -> Option<i64> {
        match self.goal_type {
            CombatGoalType::SlayerTask => {
                let remaining = source.slayer_task_remaining()?;
                if self.initial_kill_count == -1 {
                    // First observation seeds the baseline from the
                    // current remaining counter; progress is written on
                    // subsequent calls only.
                    self.initial_kill_count = target_value + remaining;
                    return None;
                }
                // The task counter falls as kills land, so progress is
                // the distance from the baseline.
                Some(self.initial_kill_count - remaining)
            }
            // No kill-count signal exists for these; see type docs.
            CombatGoalType::BossKills | CombatGoalType::MonsterKills => None,
        }
    }

    fn format(&self, current: i64, target: i64) -> String {
        match self.goal_type {
            CombatGoalType::SlayerTask => format!("{}/{} killed", current, target),
            CombatGoalType::BossKills => format!("{}/{} boss kills", current, target),
            CombatGoalType::MonsterKills => format!("{}/{} kills", current, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;

    #[test]
    fn skill_readings_per_goal_type() {
        let source = StaticSource::new().with_xp(Skill::Cooking, 13_034_431);

        let mut level = GoalVariant::Skill(SkillGoal {
            skill: Skill::Cooking,
            goal_type: SkillGoalType::Level,
        });
        assert_eq!(level.read(99, &source), Some(99));

        let mut xp = GoalVariant::Skill(SkillGoal {
            skill: Skill::Cooking,
            goal_type: SkillGoalType::Experience,
        });
        assert_eq!(xp.read(200_000_000, &source), Some(13_034_431));
    }

    #[test]
    fn virtual_level_passes_99() {
        let source = StaticSource::new().with_xp(Skill::Cooking, 14_391_160);
        let mut goal = GoalVariant::Skill(SkillGoal {
            skill: Skill::Cooking,
            goal_type: SkillGoalType::VirtualLevel,
        });
        assert_eq!(goal.read(120, &source), Some(100));
    }

    #[test]
    fn item_all_is_sum_of_the_three_containers() {
        let source = StaticSource::new()
            .with_container(Container::Inventory, vec![(995, 100)])
            .with_container(Container::Bank, vec![(995, 1_000), (4151, 1)])
            .with_container(Container::Equipment, vec![(995, 5)]);

        let read = |goal_type| {
            GoalVariant::Item(ItemGoal {
                item_id: 995,
                goal_type,
            })
            .read(10_000, &source)
            .unwrap()
        };

        assert_eq!(
            read(ItemGoalType::All),
            read(ItemGoalType::Inventory)
                + read(ItemGoalType::Bank)
                + read(ItemGoalType::Equipment)
        );
        assert_eq!(read(ItemGoalType::All), 1_105);
    }

    #[test]
    fn missing_container_counts_zero() {
        let source = StaticSource::new().with_container(Container::Inventory, vec![(995, 100)]);
        let mut goal = GoalVariant::Item(ItemGoal {
            item_id: 995,
            goal_type: ItemGoalType::All,
        });
        // Bank and equipment unavailable: they contribute 0, not an error.
        assert_eq!(goal.read(10_000, &source), Some(100));
    }

    #[test]
    fn slayer_task_seeds_baseline_then_tracks_falling_counter() {
        let mut source = StaticSource::new().with_slayer_remaining(120);
        let mut goal = CombatGoal {
            npc_name: "Abyssal demon".to_string(),
            npc_id: 0,
            goal_type: CombatGoalType::SlayerTask,
            initial_kill_count: -1,
        };

        // First observation only seeds the baseline.
        assert_eq!(goal.read(50, &source), None);
        assert_eq!(goal.initial_kill_count, 170);

        source.set_slayer_remaining(100);
        assert_eq!(goal.read(50, &source), Some(70));
    }

    #[test]
    fn slayer_without_task_reads_nothing() {
        let source = StaticSource::new();
        let mut goal = CombatGoal {
            npc_name: "Kraken".to_string(),
            npc_id: 0,
            goal_type: CombatGoalType::SlayerTask,
            initial_kill_count: -1,
        };
        assert_eq!(goal.read(50, &source), None);
        assert_eq!(goal.initial_kill_count, -1);
    }

    #[test]
    fn boss_and_monster_kills_have_no_reading() {
        let source = StaticSource::new().with_slayer_remaining(10);
        for goal_type in [CombatGoalType::BossKills, CombatGoalType::MonsterKills] {
            let mut goal = CombatGoal {
                npc_name: "Zulrah".to_string(),
                npc_id: 0,
                goal_type,
                initial_kill_count: -1,
            };
            assert_eq!(goal.read(100, &source), None);
        }
    }

    #[test]
    fn format_strings_match_the_panel_contract() {
        let skill = |goal_type| SkillGoal {
            skill: Skill::Attack,
            goal_type,
        };
        assert_eq!(skill(SkillGoalType::Level).format(92, 99), "Level 92/99");
        assert_eq!(
            skill(SkillGoalType::VirtualLevel).format(104, 120),
            "Level 104/120"
        );
        assert_eq!(
            skill(SkillGoalType::Experience).format(1_000, 13_034_431),
            "1000/13034431 XP"
        );

        let item = GoalVariant::Item(ItemGoal {
            item_id: 995,
            goal_type: ItemGoalType::Bank,
        });
        assert_eq!(item.format(250, 1_000), "250/1000");

        let combat = |goal_type| CombatGoal {
            npc_name: "Jad".to_string(),
            npc_id: 0,
            goal_type,
            initial_kill_count: -1,
        };
        assert_eq!(
            combat(CombatGoalType::SlayerTask).format(70, 120),
            "70/120 killed"
        );
        assert_eq!(
            combat(CombatGoalType::BossKills).format(3, 100),
            "3/100 boss kills"
        );
        assert_eq!(
            combat(CombatGoalType::MonsterKills).format(12, 500),
            "12/500 kills"
        );
    }
}

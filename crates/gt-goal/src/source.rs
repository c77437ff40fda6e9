// source.rs — The DataSource seam to the live game client.
//
// The host client is an external collaborator: goals only ever read from
// it, synchronously and cheaply. Unavailability is a sentinel (`false`
// readiness, `None` readings), never an error and never a block.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::experience;

/// The trainable skills.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Skill {
    Attack,
    Defence,
    Strength,
    Hitpoints,
    Ranged,
    Prayer,
    Magic,
    Cooking,
    Woodcutting,
    Fletching,
    Fishing,
    Firemaking,
    Crafting,
    Smithing,
    Mining,
    Herblore,
    Agility,
    Thieving,
    Slayer,
    Farming,
    Runecraft,
    Hunter,
    Construction,
}

/// The inventory-like containers an item goal can count across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Inventory,
    Bank,
    Equipment,
}

/// Read-only access to live game state.
///
/// Implementations decide where the readings come from: the real client,
/// a replay, or a fixed fake in tests. A reading of `None` means "not
/// available right now" (e.g., the bank has never been opened this
/// session) and callers degrade gracefully — they never treat it as zero
/// progress unless the contract says so.
pub trait DataSource {
    /// Whether a session is connected and readings are meaningful.
    fn is_ready(&self) -> bool;

    /// Current real (unboosted) level for a skill.
    fn skill_level(&self, skill: Skill) -> Option<i64>;

    /// Raw experience points for a skill.
    fn skill_xp(&self, skill: Skill) -> Option<i64>;

    /// Total quantity of `item_id` across all stacks in one container.
    /// `None` if the container's contents are unavailable.
    fn item_count(&self, container: Container, item_id: i64) -> Option<i64>;

    /// Kills remaining on the current slayer task, if one is active.
    fn slayer_task_remaining(&self) -> Option<i64>;
}

/// An in-memory [`DataSource`] with fixed readings.
///
/// Used by tests throughout this workspace, and handy as a stand-in when
/// wiring the tracker up outside the host. Real levels are derived from
/// the stored XP through the experience table, capped at 99, the same way
/// the client reports them.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    offline: bool,
    xp: HashMap<Skill, i64>,
    containers: HashMap<Container, Vec<(i64, i64)>>,
    slayer_remaining: Option<i64>,
}

impl StaticSource {
    /// A ready source with no readings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A source that reports not-ready (logged out).
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Set the XP for a skill and return self.
    pub fn with_xp(mut self, skill: Skill, xp: i64) -> Self {
        self.set_xp(skill, xp);
        self
    }

    /// Set a container's contents as `(item_id, quantity)` stacks and return self.
    pub fn with_container(mut self, container: Container, stacks: Vec<(i64, i64)>) -> Self {
        self.containers.insert(container, stacks);
        self
    }

    /// Set the remaining slayer-task kills and return self.
    pub fn with_slayer_remaining(mut self, remaining: i64) -> Self {
        self.set_slayer_remaining(remaining);
        self
    }

    pub fn set_xp(&mut self, skill: Skill, xp: i64) {
        self.xp.insert(skill, xp);
    }

    pub fn set_slayer_remaining(&mut self, remaining: i64) {
        self.slayer_remaining = Some(remaining);
    }
}

impl DataSource for StaticSource {
    fn is_ready(&self) -> bool {
        !self.offline
    }

    fn skill_level(&self, skill: Skill) -> Option<i64> {
        let xp = self.xp.get(&skill).copied()?;
        Some(experience::level_for_xp(xp).min(experience::MAX_REAL_LEVEL))
    }

    fn skill_xp(&self, skill: Skill) -> Option<i64> {
        self.xp.get(&skill).copied()
    }

    fn item_count(&self, container: Container, item_id: i64) -> Option<i64> {
        let stacks = self.containers.get(&container)?;
        Some(
            stacks
                .iter()
                .filter(|(id, _)| *id == item_id)
                .map(|(_, quantity)| quantity)
                .sum(),
        )
    }

    fn slayer_task_remaining(&self) -> Option<i64> {
        self.slayer_remaining
    }
}

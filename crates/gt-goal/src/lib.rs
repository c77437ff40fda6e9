//! # gt-goal
//!
//! Goal model and progress evaluation for the goal tracker plugin.
//!
//! A [`Goal`] is a user-defined target with a measurable progress value and
//! a kind-specific evaluation rule. The three implemented kinds (skill,
//! item, combat) live in one tagged union, [`GoalVariant`], so the
//! discriminator and the behavior can never drift apart.
//!
//! ## Key components
//!
//! - [`Goal`] — the shared record and completion state machine
//!   (in progress → completed, one way)
//! - [`GoalVariant`] — skill / item / combat evaluation and formatting
//! - [`GoalForm`] — creation-form validation (the add-goal dialog contract)
//! - [`DataSource`] — trait seam to the live game client
//! - [`experience`] — the XP ↔ level curve, including virtual levels

pub mod error;
pub mod experience;
pub mod form;
pub mod goal;
pub mod source;
pub mod variants;

pub use error::GoalError;
pub use form::GoalForm;
pub use goal::{Goal, GoalKind, GoalStatus};
pub use source::{Container, DataSource, Skill, StaticSource};
pub use variants::{
    CombatGoal, CombatGoalType, GoalVariant, ItemGoal, ItemGoalType, SkillGoal, SkillGoalType,
};

// error.rs — Error types for goal creation and validation.

use thiserror::Error;

use crate::goal::GoalKind;

/// Errors that can occur while validating and building a goal.
///
/// These all surface as a rejection of the add-goal action; no goal is
/// constructed and no store is touched when one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GoalError {
    /// The goal name was empty or whitespace.
    #[error("goal name is required")]
    MissingName,

    /// The target value was empty, non-numeric, zero, or negative.
    /// All four cases are deliberately the same error.
    #[error("target value must be a positive number")]
    InvalidTarget,

    /// A kind-specific required field was not supplied.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A kind-specific numeric field did not parse.
    #[error("{0} must be a number")]
    InvalidNumber(&'static str),

    /// The selected kind is declared but has no implementation yet.
    #[error("goal kind {0} is not implemented yet")]
    UnimplementedKind(GoalKind),
}

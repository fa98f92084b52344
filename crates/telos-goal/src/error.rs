// error.rs — Error types for the goal lifecycle subsystem.

use thiserror::Error;

use crate::gate::Action;
use crate::goal::GoalStatus;

/// Errors that can occur during goal lifecycle operations.
///
/// Guard failures are split by cause so callers can tell "wrong moment"
/// (status) apart from "wrong person" (ownership / approver identity).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GoalError {
    /// The action exists but is not available while the goal is in this status.
    #[error("action '{action}' is not available while the goal is '{status}'")]
    WrongStatus { action: Action, status: GoalStatus },

    /// The action is reserved for the goal owner.
    #[error("action '{action}' is reserved for the goal owner")]
    NotOwner { action: Action },

    /// Only the owner's direct manager may approve a goal.
    #[error("only the goal owner's direct manager may approve this goal")]
    NotApprover,

    /// The goal owner has no manager, so there is nobody to approve the goal.
    #[error("the goal owner has no manager to submit the goal to")]
    NoManager,

    /// The actor has no employee profile and cannot act on goals.
    #[error("the current identity has no employee profile")]
    NoEmployeeProfile,

    /// Invalid status transition.
    #[error("invalid transition from '{from}' to '{to}' for goal {goal_id}")]
    InvalidTransition {
        goal_id: i64,
        from: GoalStatus,
        to: GoalStatus,
    },
}
